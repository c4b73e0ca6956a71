//! Lowering from the tree-sitter Kotlin CST into a [`SyntaxTree`].
//!
//! tree-sitter nests chains as `call_expression(navigation_expression(receiver,
//! navigation_suffix), call_suffix)`. Lowering rewrites that into
//! `DotQualified { receiver, selector: Call }` so that each chain hop is one
//! parent step away from the call it was applied to.

use smallvec::SmallVec;
use tree_sitter::Node;

use super::tree::{Argument, CallNode, NodeId, NodeKind, Span, SyntaxTree, SyntaxTreeBuilder};

/// Subtrees nested deeper than this are kept as opaque nodes.
const MAX_LOWERING_DEPTH: usize = 512;

/// Lower a parsed tree. Never fails: ERROR regions become `Other` nodes.
pub fn lower_tree(tree: &tree_sitter::Tree, source: &str) -> SyntaxTree {
    let root = tree.root_node();
    let mut builder = SyntaxTreeBuilder::new(source);
    builder.set_error_count(count_errors(root));

    let root_id = builder.alloc(other(root), span_of(root), None);
    collect_annotations(&mut builder, root_id, root, source);
    lower_named_children(&mut builder, root, root_id, source, 0);

    builder.build()
}

/// Count ERROR and MISSING nodes.
pub fn count_errors(root: Node) -> usize {
    if !root.has_error() {
        return 0;
    }
    let mut count = 0;
    let mut cursor = root.walk();
    loop {
        let node = cursor.node();
        if node.is_error() || node.is_missing() {
            count += 1;
        }
        if node.has_error() && cursor.goto_first_child() {
            continue;
        }
        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return count;
            }
        }
    }
}

fn lower_node(
    b: &mut SyntaxTreeBuilder,
    node: Node,
    parent: NodeId,
    source: &str,
    depth: usize,
) -> NodeId {
    if depth >= MAX_LOWERING_DEPTH {
        tracing::debug!(kind = node.kind(), "lowering depth limit reached");
        return b.alloc(other(node), span_of(node), Some(parent));
    }

    match node.kind() {
        "call_expression" => lower_call(b, node, parent, source, depth),
        "navigation_expression" => lower_navigation(b, node, parent, source, depth),
        "simple_identifier" => b.alloc(
            NodeKind::Reference {
                name: node_text(node, source).to_string(),
            },
            span_of(node),
            Some(parent),
        ),
        _ => lower_generic(b, node, parent, source, depth),
    }
}

fn lower_generic(
    b: &mut SyntaxTreeBuilder,
    node: Node,
    parent: NodeId,
    source: &str,
    depth: usize,
) -> NodeId {
    let id = b.alloc(other(node), span_of(node), Some(parent));
    collect_annotations(b, id, node, source);
    lower_named_children(b, node, id, source, depth);
    id
}

fn lower_named_children(
    b: &mut SyntaxTreeBuilder,
    node: Node,
    parent: NodeId,
    source: &str,
    depth: usize,
) {
    for i in 0..node.named_child_count() {
        if let Some(child) = node.named_child(i) {
            lower_node(b, child, parent, source, depth + 1);
        }
    }
}

fn lower_call(
    b: &mut SyntaxTreeBuilder,
    node: Node,
    parent: NodeId,
    source: &str,
    depth: usize,
) -> NodeId {
    let suffix = last_named_child_of_kind(node, "call_suffix");
    let callee = node.named_child(0).filter(|c| c.kind() != "call_suffix");
    let arguments = suffix
        .map(|s| collect_arguments(s, source))
        .unwrap_or_default();

    if let Some(callee) = callee {
        match callee.kind() {
            "simple_identifier" => {
                let id = b.alloc(
                    NodeKind::Call(CallNode {
                        callee: Some(node_text(callee, source).to_string()),
                        arguments,
                    }),
                    span_of(node),
                    Some(parent),
                );
                if let Some(s) = suffix {
                    lower_node(b, s, id, source, depth + 1);
                }
                return id;
            }
            "navigation_expression" => {
                if let Some(nav) = Navigation::of(callee, source) {
                    if nav.operator != Operator::CallableReference {
                        return lower_qualified_call(
                            b, node, nav, arguments, suffix, parent, source, depth,
                        );
                    }
                }
            }
            _ => {}
        }
    }

    // Callee is not a simple name: `(f)()`, `f()()`, `Foo::bar()`.
    let id = b.alloc(
        NodeKind::Call(CallNode {
            callee: None,
            arguments,
        }),
        span_of(node),
        Some(parent),
    );
    lower_named_children(b, node, id, source, depth);
    id
}

#[allow(clippy::too_many_arguments)]
fn lower_qualified_call(
    b: &mut SyntaxTreeBuilder,
    node: Node,
    nav: Navigation,
    arguments: SmallVec<[Argument; 4]>,
    suffix: Option<Node>,
    parent: NodeId,
    source: &str,
    depth: usize,
) -> NodeId {
    let qualified = b.alloc(other(node), span_of(node), Some(parent));
    let receiver = lower_node(b, nav.receiver, qualified, source, depth + 1);

    let selector_span = Span {
        start_byte: nav.name.start_byte(),
        start_line: nav.name.start_position().row as u32 + 1,
        start_column: nav.name.start_position().column as u32 + 1,
        ..span_of(node)
    };
    let selector = b.alloc(
        NodeKind::Call(CallNode {
            callee: Some(node_text(nav.name, source).to_string()),
            arguments,
        }),
        selector_span,
        Some(qualified),
    );
    if let Some(s) = suffix {
        lower_node(b, s, selector, source, depth + 1);
    }

    b.set_kind(qualified, nav.operator.qualified(receiver, selector));
    qualified
}

fn lower_navigation(
    b: &mut SyntaxTreeBuilder,
    node: Node,
    parent: NodeId,
    source: &str,
    depth: usize,
) -> NodeId {
    let nav = match Navigation::of(node, source) {
        Some(nav) if nav.operator != Operator::CallableReference => nav,
        _ => return lower_generic(b, node, parent, source, depth),
    };

    let qualified = b.alloc(other(node), span_of(node), Some(parent));
    let receiver = lower_node(b, nav.receiver, qualified, source, depth + 1);
    let selector = b.alloc(
        NodeKind::Reference {
            name: node_text(nav.name, source).to_string(),
        },
        span_of(nav.name),
        Some(qualified),
    );
    b.set_kind(qualified, nav.operator.qualified(receiver, selector));
    qualified
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    Dot,
    SafeCall,
    CallableReference,
}

impl Operator {
    fn qualified(self, receiver: NodeId, selector: NodeId) -> NodeKind {
        match self {
            Self::SafeCall => NodeKind::SafeQualified { receiver, selector },
            _ => NodeKind::DotQualified { receiver, selector },
        }
    }
}

/// The pieces of a `navigation_expression` with a plain member name.
struct Navigation<'tree> {
    receiver: Node<'tree>,
    name: Node<'tree>,
    operator: Operator,
}

impl<'tree> Navigation<'tree> {
    fn of(node: Node<'tree>, source: &str) -> Option<Self> {
        let receiver = node.named_child(0)?;
        let suffix = last_named_child_of_kind(node, "navigation_suffix")?;
        let name = last_named_child_of_kind(suffix, "simple_identifier")?;

        let suffix_text = node_text(suffix, source).trim_start();
        let operator = if suffix_text.starts_with("?.") {
            Operator::SafeCall
        } else if suffix_text.starts_with("::") {
            Operator::CallableReference
        } else {
            Operator::Dot
        };

        Some(Self {
            receiver,
            name,
            operator,
        })
    }
}

/// Value arguments and a trailing lambda, in source order.
fn collect_arguments(suffix: Node, source: &str) -> SmallVec<[Argument; 4]> {
    let mut arguments = SmallVec::new();
    for i in 0..suffix.named_child_count() {
        let Some(child) = suffix.named_child(i) else {
            continue;
        };
        match child.kind() {
            "value_arguments" => {
                for j in 0..child.named_child_count() {
                    if let Some(arg) = child.named_child(j) {
                        if arg.kind() == "value_argument" {
                            arguments.push(argument(arg, source));
                        }
                    }
                }
            }
            "annotated_lambda" | "lambda_literal" => arguments.push(argument(child, source)),
            _ => {}
        }
    }
    arguments
}

fn argument(node: Node, source: &str) -> Argument {
    Argument {
        text: node_text(node, source).to_string(),
        span: span_of(node),
    }
}

/// Record annotations from a `modifiers` child, direct `annotation` children,
/// and `file_annotation` children.
fn collect_annotations(b: &mut SyntaxTreeBuilder, id: NodeId, node: Node, source: &str) {
    for i in 0..node.named_child_count() {
        let Some(child) = node.named_child(i) else {
            continue;
        };
        match child.kind() {
            "annotation" | "file_annotation" => {
                b.annotate(id, node_text(child, source));
            }
            "modifiers" => {
                for j in 0..child.named_child_count() {
                    if let Some(m) = child.named_child(j) {
                        if m.kind() == "annotation" {
                            b.annotate(id, node_text(m, source));
                        }
                    }
                }
            }
            _ => {}
        }
    }
}

fn last_named_child_of_kind<'tree>(node: Node<'tree>, kind: &str) -> Option<Node<'tree>> {
    let mut found = None;
    for i in 0..node.named_child_count() {
        if let Some(child) = node.named_child(i) {
            if child.kind() == kind {
                found = Some(child);
            }
        }
    }
    found
}

fn other(node: Node) -> NodeKind {
    NodeKind::Other {
        kind: node.kind().to_string(),
    }
}

fn span_of(node: Node) -> Span {
    let start = node.start_position();
    let end = node.end_position();
    Span {
        start_byte: node.start_byte(),
        end_byte: node.end_byte(),
        start_line: start.row as u32 + 1,
        start_column: start.column as u32 + 1,
        end_line: end.row as u32 + 1,
        end_column: end.column as u32 + 1,
    }
}

fn node_text<'s>(node: Node, source: &'s str) -> &'s str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}
