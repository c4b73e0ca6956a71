//! Arena syntax tree with non-owning parent links.
//!
//! Nodes live in a single `Vec`; parent and child relations are `NodeId`
//! indices, so walking upward never touches ownership.

use smallvec::SmallVec;

/// Index of a node inside its [`SyntaxTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Byte range plus 1-based line/column bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start_byte: usize,
    pub end_byte: usize,
    pub start_line: u32,
    pub start_column: u32,
    pub end_line: u32,
    pub end_column: u32,
}

/// A single argument of a call, kept as raw source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    pub text: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallNode {
    /// Simple name of the invoked function; `None` when the callee is not a plain name.
    pub callee: Option<String>,
    pub arguments: SmallVec<[Argument; 4]>,
}

/// Node variants the rules distinguish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Call(CallNode),
    /// `receiver.selector`
    DotQualified { receiver: NodeId, selector: NodeId },
    /// `receiver?.selector`
    SafeQualified { receiver: NodeId, selector: NodeId },
    Reference { name: String },
    Other { kind: String },
}

/// Fieldless mirror of [`NodeKind`], used to route nodes to handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeTag {
    Call,
    DotQualified,
    SafeQualified,
    Reference,
    Other,
}

impl NodeKind {
    pub fn tag(&self) -> NodeTag {
        match self {
            Self::Call(_) => NodeTag::Call,
            Self::DotQualified { .. } => NodeTag::DotQualified,
            Self::SafeQualified { .. } => NodeTag::SafeQualified,
            Self::Reference { .. } => NodeTag::Reference,
            Self::Other { .. } => NodeTag::Other,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    pub span: Span,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Raw text of annotations attached to this node (`@Suppress("...")`).
    pub annotations: Vec<String>,
}

/// A lowered Kotlin file.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    nodes: Vec<SyntaxNode>,
    source: String,
    error_count: usize,
}

impl SyntaxTree {
    /// The root node. Always present: the first allocated node is the root.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> &SyntaxNode {
        &self.nodes[id.index()]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Number of ERROR/MISSING regions reported by the parser.
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// Ancestors of `id`, nearest first, excluding `id` itself.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |&current| self.parent(current))
    }

    /// Source text covered by the node.
    pub fn text(&self, id: NodeId) -> &str {
        let span = self.node(id).span;
        self.source.get(span.start_byte..span.end_byte).unwrap_or("")
    }

    pub fn call(&self, id: NodeId) -> Option<&CallNode> {
        match &self.node(id).kind {
            NodeKind::Call(call) => Some(call),
            _ => None,
        }
    }

    /// All call nodes in allocation (pre-order) order.
    pub fn calls(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| matches!(n.kind, NodeKind::Call(_)))
            .map(|(i, _)| NodeId(i as u32))
    }

    /// The parent of `id` when that parent is a `.` qualified expression.
    pub fn dot_qualified_parent(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        match self.node(parent).kind {
            NodeKind::DotQualified { .. } => Some(parent),
            _ => None,
        }
    }

    /// The selector of a `.` qualified expression when it is a call.
    pub fn selector_call(&self, id: NodeId) -> Option<&CallNode> {
        match self.node(id).kind {
            NodeKind::DotQualified { selector, .. } => self.call(selector),
            _ => None,
        }
    }
}

/// Incremental builder for [`SyntaxTree`].
///
/// Qualified nodes reference children that are allocated after them, so a node
/// is allocated with a placeholder kind first and finalized with [`set_kind`].
///
/// [`set_kind`]: SyntaxTreeBuilder::set_kind
#[derive(Debug)]
pub struct SyntaxTreeBuilder {
    nodes: Vec<SyntaxNode>,
    source: String,
    error_count: usize,
}

impl SyntaxTreeBuilder {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            nodes: Vec::new(),
            source: source.into(),
            error_count: 0,
        }
    }

    /// Allocate a node under `parent`. The first node allocated becomes the root.
    pub fn alloc(&mut self, kind: NodeKind, span: Span, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(SyntaxNode {
            kind,
            span,
            parent,
            children: Vec::new(),
            annotations: Vec::new(),
        });
        if let Some(p) = parent {
            self.nodes[p.index()].children.push(id);
        }
        id
    }

    pub fn set_kind(&mut self, id: NodeId, kind: NodeKind) {
        self.nodes[id.index()].kind = kind;
    }

    pub fn annotate(&mut self, id: NodeId, annotation: impl Into<String>) {
        self.nodes[id.index()].annotations.push(annotation.into());
    }

    pub fn set_error_count(&mut self, count: usize) {
        self.error_count = count;
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Finish the tree. An empty builder yields a tree with a single root node.
    pub fn build(mut self) -> SyntaxTree {
        if self.nodes.is_empty() {
            let span = Span {
                end_byte: self.source.len(),
                start_line: 1,
                start_column: 1,
                end_line: 1,
                end_column: 1,
                ..Span::default()
            };
            self.alloc(
                NodeKind::Other {
                    kind: "source_file".to_string(),
                },
                span,
                None,
            );
        }
        SyntaxTree {
            nodes: self.nodes,
            source: self.source,
            error_count: self.error_count,
        }
    }
}
