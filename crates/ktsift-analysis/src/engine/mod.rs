//! Lint engine: rule trait, registry, single-pass traversal.

pub mod visitor;

pub use visitor::{Hit, Issue, LintEngine, RuleContext, RuleHandler, RuleRegistry};
