//! Single-pass visitor over a lowered syntax tree.
//!
//! The engine walks the tree once per file, dispatching `on_enter`/`on_exit` to
//! every registered handler interested in the node's tag. Rules MUST implement
//! [`RuleHandler`].

use ktsift_core::types::collections::{FxHashMap, FxHashSet};
use ktsift_core::{Debt, Finding, Severity};
use serde::{Deserialize, Serialize};

use crate::suppression;
use crate::syntax::{NodeId, NodeTag, SyntaxTree};

/// Context passed to every handler during traversal.
#[derive(Debug)]
pub struct RuleContext<'a> {
    pub file: &'a str,
    pub tree: &'a SyntaxTree,
}

impl<'a> RuleContext<'a> {
    pub fn new(file: &'a str, tree: &'a SyntaxTree) -> Self {
        Self { file, tree }
    }
}

/// Static description of what a rule reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub id: String,
    pub description: String,
    pub severity: Severity,
    pub debt: Debt,
}

/// A finding together with the node it is anchored on.
#[derive(Debug, Clone)]
pub struct Hit {
    pub anchor: NodeId,
    pub finding: Finding,
}

/// Trait for syntax-tree rules.
///
/// The engine dispatches `on_enter`/`on_exit` only for node tags the rule
/// declares interest in via `node_tags()`.
pub trait RuleHandler: Send {
    fn issue(&self) -> &Issue;

    /// Node tags this handler wants to visit. Empty = all nodes.
    fn node_tags(&self) -> &[NodeTag];

    /// Called when entering a node during depth-first traversal.
    fn on_enter(&mut self, node: NodeId, ctx: &RuleContext);

    /// Called when leaving a node, after all of its children.
    fn on_exit(&mut self, _node: NodeId, _ctx: &RuleContext) {}

    /// Collect results after traversal completes.
    fn results(&self) -> Vec<Hit>;

    /// Reset state for reuse on the next file.
    fn reset(&mut self);

    fn id(&self) -> &str {
        &self.issue().id
    }
}

/// Registry of rule handlers, indexed by node tag for O(1) dispatch.
pub struct RuleRegistry {
    handlers: Vec<Box<dyn RuleHandler>>,
    tag_handlers: FxHashMap<NodeTag, Vec<usize>>,
    wildcard_handlers: Vec<usize>,
    disabled: FxHashSet<String>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
            tag_handlers: FxHashMap::default(),
            wildcard_handlers: Vec::new(),
            disabled: FxHashSet::default(),
        }
    }

    pub fn register(&mut self, handler: Box<dyn RuleHandler>) {
        let idx = self.handlers.len();
        let tags = handler.node_tags();
        if tags.is_empty() {
            self.wildcard_handlers.push(idx);
        } else {
            for tag in tags {
                self.tag_handlers.entry(*tag).or_default().push(idx);
            }
        }
        self.handlers.push(handler);
    }

    /// Disable a rule by id. Unknown ids are accepted and ignored.
    pub fn disable(&mut self, id: &str) {
        self.disabled.insert(id.to_string());
    }

    pub fn enable(&mut self, id: &str) {
        self.disabled.remove(id);
    }

    pub fn is_enabled(&self, id: &str) -> bool {
        !self.disabled.contains(id)
    }

    /// Total number of registered handlers.
    pub fn count(&self) -> usize {
        self.handlers.len()
    }

    pub fn enabled_count(&self) -> usize {
        self.handlers
            .iter()
            .filter(|h| self.is_enabled(h.id()))
            .count()
    }

    /// Issues of all enabled rules, in registration order.
    pub fn issues(&self) -> Vec<Issue> {
        self.handlers
            .iter()
            .filter(|h| self.is_enabled(h.id()))
            .map(|h| h.issue().clone())
            .collect()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// The single-pass lint engine.
///
/// Each node is visited exactly once; findings suppressed in source are dropped.
pub struct LintEngine {
    registry: RuleRegistry,
}

impl LintEngine {
    pub fn new(registry: RuleRegistry) -> Self {
        Self { registry }
    }

    /// Run every enabled handler over `ctx.tree`.
    pub fn run(&mut self, ctx: &RuleContext) -> Vec<Finding> {
        for handler in &mut self.registry.handlers {
            handler.reset();
        }

        self.walk(ctx);

        let mut findings = Vec::new();
        for handler in &self.registry.handlers {
            if !self.registry.is_enabled(handler.id()) {
                continue;
            }
            for hit in handler.results() {
                if suppression::is_suppressed(ctx.tree, hit.anchor, &hit.finding.rule_id) {
                    tracing::debug!(
                        rule_id = %hit.finding.rule_id,
                        file = ctx.file,
                        line = hit.finding.location.line,
                        "finding suppressed in source"
                    );
                    continue;
                }
                findings.push(hit.finding);
            }
        }
        findings
    }

    /// Depth-first traversal with an explicit stack, so deep trees cannot
    /// overflow the call stack.
    fn walk(&mut self, ctx: &RuleContext) {
        let tree = ctx.tree;
        let mut stack: Vec<(NodeId, bool)> = vec![(tree.root(), false)];

        while let Some((node, exiting)) = stack.pop() {
            let tag = tree.node(node).kind.tag();
            if exiting {
                self.dispatch(tag, node, ctx, false);
                continue;
            }
            self.dispatch(tag, node, ctx, true);
            stack.push((node, true));
            for &child in tree.children(node).iter().rev() {
                stack.push((child, false));
            }
        }
    }

    fn dispatch(&mut self, tag: NodeTag, node: NodeId, ctx: &RuleContext, enter: bool) {
        let registry = &mut self.registry;
        let indices = registry
            .wildcard_handlers
            .iter()
            .chain(registry.tag_handlers.get(&tag).into_iter().flatten());

        for &idx in indices {
            let handler = &mut registry.handlers[idx];
            if registry.disabled.contains(handler.id()) {
                continue;
            }
            if enter {
                handler.on_enter(node, ctx);
            } else {
                handler.on_exit(node, ctx);
            }
        }
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }
}
