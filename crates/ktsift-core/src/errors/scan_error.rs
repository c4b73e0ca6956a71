//! File discovery errors.

use std::path::PathBuf;

use super::error_code::{self, KtsiftErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("Path does not exist: {path}")]
    PathNotFound { path: PathBuf },

    #[error("Invalid glob pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl KtsiftErrorCode for ScanError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Io { .. } => error_code::IO_ERROR,
            _ => error_code::SCAN_ERROR,
        }
    }
}
