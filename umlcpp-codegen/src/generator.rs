//! Model tree walker.

use crate::cpp::{ClassGenerator, CppContext, EnumGenerator, assemble_header};
use crate::error::CodegenError;
use crate::options::GeneratorOptions;
use crate::sink::OutputSink;
use futures::FutureExt;
use futures::future::BoxFuture;
use std::io;
use std::path::{Path, PathBuf};
use umlcpp_model::{ElementId, ElementKind, Model};

/// Counters collected while walking a model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Package directories created.
    pub directories_created: usize,
    /// Package directories that already existed.
    pub directories_reused: usize,
    /// Header files written.
    pub headers_written: usize,
    /// Elements that produced no output.
    pub skipped: usize,
}

impl GenerationReport {
    /// Adds the counters of `other` to `self`.
    pub fn merge(&mut self, other: Self) {
        self.directories_created += other.directories_created;
        self.directories_reused += other.directories_reused;
        self.headers_written += other.headers_written;
        self.skipped += other.skipped;
    }
}

/// Walks a model and hands directories and headers to an [`OutputSink`].
///
/// Siblings are processed one at a time; the first failure stops the walk.
pub struct Generator<'a, S> {
    model: &'a Model,
    options: &'a GeneratorOptions,
    sink: S,
}

impl<'a, S: OutputSink> Generator<'a, S> {
    /// Creates a new generator.
    #[must_use]
    pub fn new(model: &'a Model, options: &'a GeneratorOptions, sink: S) -> Self {
        Self {
            model,
            options,
            sink,
        }
    }

    /// Returns the sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Renders the header for a class, interface or enumeration.
    ///
    /// Returns `Ok(None)` for elements that produce no header.
    ///
    /// # Errors
    /// Returns `CodegenError::Model` if `id` is unknown.
    pub fn render(&self, id: ElementId) -> Result<Option<String>, CodegenError> {
        let element = self.model.element(id)?;
        if element.name.is_empty() {
            return Ok(None);
        }
        let ctx = CppContext::new(self.model, self.options);
        let text = match &element.kind {
            ElementKind::Class(body) => assemble_header(&ctx, id, |writer, ctx, id| {
                ClassGenerator::new(*ctx).write_class(writer, id, body);
            }),
            ElementKind::Interface(body) => assemble_header(&ctx, id, |writer, ctx, id| {
                ClassGenerator::new(*ctx).write_interface(writer, id, body);
            }),
            ElementKind::Enumeration(body) => assemble_header(&ctx, id, |writer, ctx, id| {
                EnumGenerator::new(*ctx).write_enumeration(writer, id, body);
            }),
            ElementKind::Package(_) | ElementKind::Other(_) => return Ok(None),
        };
        Ok(Some(text))
    }

    /// Generates `id` into `out_dir`.
    ///
    /// A package becomes a directory under `out_dir` holding its children.
    /// Classes, interfaces and enumerations become `<Name>.h`.
    ///
    /// # Errors
    /// Returns the first directory or file failure. Output written before the
    /// failure is left in place.
    pub async fn generate(
        &self,
        id: ElementId,
        out_dir: impl AsRef<Path>,
    ) -> Result<GenerationReport, CodegenError> {
        self.walk(id, out_dir.as_ref().to_path_buf()).await
    }

    fn walk(
        &self,
        id: ElementId,
        dir: PathBuf,
    ) -> BoxFuture<'_, Result<GenerationReport, CodegenError>> {
        async move {
            let element = self.model.element(id)?;
            let mut report = GenerationReport::default();

            if element.name.is_empty() && !matches!(element.kind, ElementKind::Other(_)) {
                tracing::warn!("Skipping unnamed {} {}", element.kind.label(), id);
                report.skipped += 1;
                return Ok(report);
            }

            match &element.kind {
                ElementKind::Package(package) => {
                    let path = dir.join(&element.name);
                    match self.sink.create_dir(&path).await {
                        Ok(()) => {
                            tracing::info!("Created package directory {}", path.display());
                            report.directories_created += 1;
                        }
                        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                            tracing::info!("Using existing directory {}", path.display());
                            report.directories_reused += 1;
                        }
                        Err(source) => {
                            tracing::error!("Failed to create {}: {}", path.display(), source);
                            return Err(CodegenError::CreateDirectory { path, source });
                        }
                    }

                    for &child in &package.owned {
                        match self.walk(child, path.clone()).await {
                            Ok(child_report) => report.merge(child_report),
                            Err(e) => {
                                tracing::error!(
                                    "Generation of package '{}' failed: {}",
                                    element.name,
                                    e
                                );
                                return Err(e);
                            }
                        }
                    }
                }
                ElementKind::Class(_) | ElementKind::Interface(_) | ElementKind::Enumeration(_) => {
                    let Some(text) = self.render(id)? else {
                        report.skipped += 1;
                        return Ok(report);
                    };
                    let path = dir.join(format!("{}.h", element.name));
                    if let Err(source) = self.sink.write_file(&path, &text).await {
                        tracing::error!("Failed to write {}: {}", path.display(), source);
                        return Err(CodegenError::WriteFile { path, source });
                    }
                    tracing::debug!("Wrote {} ({} bytes)", path.display(), text.len());
                    report.headers_written += 1;
                }
                ElementKind::Other(kind) => {
                    tracing::debug!("Ignoring {} '{}'", kind, element.name);
                    report.skipped += 1;
                }
            }

            Ok(report)
        }
        .boxed()
    }
}
