//! In-source suppression through `@Suppress` / `@SuppressWarnings`.
//!
//! An annotation suppresses a rule when its argument list names the rule id in
//! quotes, optionally prefixed with `detekt:` or `detekt.`, or names `"all"`.
//! Annotations apply to the annotated declaration and everything inside it;
//! `@file:Suppress(...)` applies to the whole file.

use crate::syntax::{NodeId, SyntaxTree};

const SUPPRESS_ANNOTATIONS: &[&str] = &["Suppress", "SuppressWarnings"];

/// Whether `rule_id` is suppressed at `node` or any of its ancestors.
pub fn is_suppressed(tree: &SyntaxTree, node: NodeId, rule_id: &str) -> bool {
    std::iter::once(node)
        .chain(tree.ancestors(node))
        .any(|id| {
            tree.node(id)
                .annotations
                .iter()
                .any(|annotation| suppresses(annotation, rule_id))
        })
}

/// Whether a single annotation's source text suppresses `rule_id`.
pub fn suppresses(annotation: &str, rule_id: &str) -> bool {
    let Some(body) = annotation.trim().strip_prefix('@') else {
        return false;
    };
    let body = body.strip_prefix("file:").unwrap_or(body).trim_start();

    let (name, args) = match body.find('(') {
        Some(open) => (body[..open].trim(), &body[open..]),
        None => return false,
    };
    let simple_name = name.rsplit('.').next().unwrap_or(name);
    if !SUPPRESS_ANNOTATIONS.contains(&simple_name) {
        return false;
    }

    let candidates = [
        format!("\"{rule_id}\""),
        format!("\"detekt:{rule_id}\""),
        format!("\"detekt.{rule_id}\""),
        "\"all\"".to_string(),
    ];
    candidates.iter().any(|c| args.contains(c.as_str()))
}
