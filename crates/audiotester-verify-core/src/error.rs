//! Error types for recording verification

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while verifying a recordings directory
#[derive(Error, Debug)]
pub enum VerifyError {
    #[error("directory not found: {0}")]
    NotADirectory(PathBuf),

    #[error("I/O error on {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl VerifyError {
    /// Attach a path to an I/O error
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias used throughout the verification crate
pub type Result<T> = std::result::Result<T, VerifyError>;
