//! Error types for the papercheck crate.

use std::path::PathBuf;

/// Errors that abort a similarity check.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    /// I/O error with the path it happened on.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed or missing command-line input.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The finished result file could not be renamed over its target.
    #[error("failed to replace {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: tempfile::PersistError,
    },
}

impl CheckError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenience result type for papercheck operations.
pub type CheckResult<T> = Result<T, CheckError>;
