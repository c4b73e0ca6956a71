//! Report rendering errors.

use super::error_code::{self, KtsiftErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unknown report format: {format}")]
    UnknownFormat { format: String },
}

impl KtsiftErrorCode for ReportError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Io(_) => error_code::IO_ERROR,
            _ => error_code::REPORT_ERROR,
        }
    }
}
