//! Error types for the conversion pipeline.

use std::path::PathBuf;

/// Conversion errors.
///
/// Malformed headers are not represented here: they degrade to empty
/// metadata inside the parser. Per-document failures inside a batch are
/// recorded in [`crate::types::ConversionStats`] rather than returned.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("source directory `{path}` does not exist")]
    SourceNotFound { path: PathBuf },

    #[error("no convertible documents found in `{path}`")]
    NoDocuments { path: PathBuf },

    #[error("cannot derive a name from `{path}`")]
    UnnamedDocument { path: PathBuf },

    #[error("io error at `{path}`: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConvertError {
    /// Wrap an [`std::io::Error`] together with the path it occurred at.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, ConvertError>;
