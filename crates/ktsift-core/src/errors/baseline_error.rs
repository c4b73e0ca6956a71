//! Baseline file errors.

use std::path::PathBuf;

use super::error_code::{self, KtsiftErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum BaselineError {
    #[error("I/O error on baseline {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed baseline {path}: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl KtsiftErrorCode for BaselineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Io { .. } => error_code::IO_ERROR,
            Self::Format { .. } => error_code::BASELINE_ERROR,
        }
    }
}
