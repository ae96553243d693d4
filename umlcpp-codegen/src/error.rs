//! Error types for code generation.

use std::path::PathBuf;
use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Model loading error.
    #[error("model parse error: {0}")]
    Parse(#[from] umlcpp_model::ParseError),

    /// Model lookup error.
    #[error("model error: {0}")]
    Model(#[from] umlcpp_model::ModelError),

    /// Directory creation failed for a reason other than "already exists".
    #[error("failed to create directory '{}': {source}", .path.display())]
    CreateDirectory {
        /// Directory path.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Header write failed.
    #[error("failed to write '{}': {source}", .path.display())]
    WriteFile {
        /// File path.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CodegenError {
    /// Returns the path the failed operation was targeting, if any.
    #[must_use]
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::CreateDirectory { path, .. } | Self::WriteFile { path, .. } => Some(path),
            _ => None,
        }
    }
}
