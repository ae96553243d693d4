//! # umlcpp Codegen
//!
//! C++ header generation from class-diagram models.
//!
//! This crate provides:
//! - One header per class, interface and enumeration
//! - A directory per package, mirroring the model hierarchy
//! - Relative `#include` resolution between headers
//! - Pluggable output sinks (file system or in memory)

pub mod cpp;
pub mod error;
pub mod generator;
pub mod options;
pub mod sink;
pub mod writer;

pub use error::CodegenError;
pub use generator::{GenerationReport, Generator};
pub use options::{GeneratorOptions, Indent};
pub use sink::{FsSink, MemorySink, OutputSink};
pub use writer::CodeWriter;

use std::path::Path;
use umlcpp_model::Model;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Generates headers for a whole model into `out_dir`.
///
/// `out_dir` is created if needed; the root package becomes its first
/// subdirectory.
///
/// # Errors
/// Returns `CodegenError` if a directory or header cannot be written.
pub async fn generate_model(
    model: &Model,
    out_dir: impl AsRef<Path>,
    options: &GeneratorOptions,
) -> Result<GenerationReport, CodegenError> {
    let out_dir = out_dir.as_ref();
    tokio::fs::create_dir_all(out_dir)
        .await
        .map_err(|source| CodegenError::CreateDirectory {
            path: out_dir.to_path_buf(),
            source,
        })?;
    let report = Generator::new(model, options, FsSink)
        .generate(model.root(), out_dir)
        .await?;
    tracing::info!(
        "Generated {} headers in {} ({} skipped)",
        report.headers_written,
        out_dir.display(),
        report.skipped
    );
    Ok(report)
}

/// Generates headers from XML model content.
///
/// # Errors
/// Returns `CodegenError` if parsing or generation fails.
pub async fn generate_from_xml(
    xml: &str,
    out_dir: impl AsRef<Path>,
    options: &GeneratorOptions,
) -> Result<GenerationReport, CodegenError> {
    let model = umlcpp_model::parse_model(xml)?;
    generate_model(&model, out_dir, options).await
}

/// Generates headers from an XML model file.
///
/// # Errors
/// Returns `CodegenError` if reading, parsing, or generation fails.
pub async fn generate_from_file(
    model_path: impl AsRef<Path>,
    out_dir: impl AsRef<Path>,
    options: &GeneratorOptions,
) -> Result<GenerationReport, CodegenError> {
    let xml = tokio::fs::read_to_string(model_path.as_ref()).await?;
    generate_from_xml(&xml, out_dir, options).await
}
