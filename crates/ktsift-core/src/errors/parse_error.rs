//! Parser errors.

use std::path::PathBuf;

use super::error_code::{self, KtsiftErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Grammar not found for language: {language}")]
    GrammarNotFound { language: String },

    #[error("Tree-sitter failed on {path}: {message}")]
    TreeSitterError { path: PathBuf, message: String },

    #[error("Unsupported file extension: {extension}")]
    UnsupportedLanguage { extension: String },
}

impl KtsiftErrorCode for ParseError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::GrammarNotFound { .. } => error_code::GRAMMAR_NOT_FOUND,
            _ => error_code::PARSE_ERROR,
        }
    }
}
