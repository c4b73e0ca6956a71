//! Parsing: language detection and the tree-sitter Kotlin parser.

pub mod kotlin;
pub mod language;

pub use kotlin::KotlinParser;
pub use language::KotlinFileKind;
