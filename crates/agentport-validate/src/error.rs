//! Error types for artifact validation.
//!
//! Schema violations are not errors: they are returned as
//! [`crate::ValidationResult`] lists. These variants cover conditions that
//! stop a whole validation run.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ValidateError {
    #[error("agents directory not found: `{path}`")]
    DirNotFound { path: PathBuf },

    #[error("no .json files found in `{path}`")]
    NoArtifacts { path: PathBuf },

    #[error("io error at `{path}`: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, ValidateError>;
