//! Configuration loading and validation errors.

use std::path::PathBuf;

use super::error_code::{self, KtsiftErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl KtsiftErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => error_code::CONFIG_NOT_FOUND,
            Self::Io { .. } => error_code::IO_ERROR,
            Self::InvalidValue { .. } => error_code::CONFIG_INVALID,
            _ => error_code::CONFIG_ERROR,
        }
    }
}
