//! Kotlin parser backed by `tree-sitter-kotlin-sg`.

use std::path::Path;
use std::time::Instant;

use ktsift_core::errors::ParseError;
use tree_sitter::Parser;

use crate::syntax::lower::lower_tree;
use crate::syntax::SyntaxTree;

/// Parses Kotlin source and lowers it into a [`SyntaxTree`].
#[derive(Debug, Default, Clone, Copy)]
pub struct KotlinParser;

impl KotlinParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse `source`. `path` is only used for error messages and logging.
    ///
    /// Syntax errors do not fail the parse; they are counted on the tree.
    pub fn parse(&self, source: &str, path: &Path) -> Result<SyntaxTree, ParseError> {
        let start = Instant::now();

        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_kotlin_sg::LANGUAGE.into())
            .map_err(|_e| ParseError::GrammarNotFound {
                language: "kotlin".to_string(),
            })?;

        let tree = parser
            .parse(source, None)
            .ok_or_else(|| ParseError::TreeSitterError {
                path: path.to_path_buf(),
                message: "tree-sitter returned None".to_string(),
            })?;

        let lowered = lower_tree(&tree, source);
        tracing::debug!(
            path = %path.display(),
            nodes = lowered.len(),
            errors = lowered.error_count(),
            parse_time_us = u64::try_from(start.elapsed().as_micros()).unwrap_or(u64::MAX),
            "parsed kotlin file"
        );
        Ok(lowered)
    }
}
