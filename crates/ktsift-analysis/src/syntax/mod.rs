//! Kotlin syntax tree: arena nodes, lowering from tree-sitter.

pub mod lower;
pub mod tree;

pub use tree::{
    Argument, CallNode, NodeId, NodeKind, NodeTag, Span, SyntaxNode, SyntaxTree,
    SyntaxTreeBuilder,
};
