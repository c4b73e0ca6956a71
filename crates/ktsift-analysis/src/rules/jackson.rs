//! `JacksonFailOnUnknownProperties`: every `jacksonObjectMapper()` must
//! explicitly configure `FAIL_ON_UNKNOWN_PROPERTIES` within a short chain.
//!
//! The check is purely syntactic. Starting at the factory call it walks at
//! most `max_chain_depth` `.`-qualified parents; a hop satisfies the guard when
//! its selector calls one of the configuration methods with an argument whose
//! text contains the feature flag. Anything else (assignment then configure,
//! a configuring call past the bound, a `?.` chain) is reported.

use ktsift_core::config::JacksonRuleConfig;
use ktsift_core::{Debt, Finding, Location, Severity};

use crate::engine::{Hit, Issue, RuleContext, RuleHandler};
use crate::syntax::{NodeId, NodeKind, NodeTag, SyntaxTree};

pub const RULE_ID: &str = "JacksonFailOnUnknownProperties";

/// Rule constants, injected at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardSettings {
    pub factory_function: String,
    pub configuration_methods: Vec<String>,
    pub feature_flag: String,
    pub max_chain_depth: usize,
    pub severity: Severity,
}

impl GuardSettings {
    pub fn from_config(config: &JacksonRuleConfig) -> Self {
        Self {
            factory_function: config.effective_factory_function().to_string(),
            configuration_methods: config.effective_configuration_methods(),
            feature_flag: config.effective_feature_flag().to_string(),
            max_chain_depth: config.effective_max_chain_depth(),
            severity: config.effective_severity(),
        }
    }

    fn message(&self) -> String {
        format!("ObjectMapper must explicitly configure {}", self.feature_flag)
    }
}

impl Default for GuardSettings {
    fn default() -> Self {
        Self::from_config(&JacksonRuleConfig::default())
    }
}

pub struct JacksonFailOnUnknownPropertiesRule {
    settings: GuardSettings,
    issue: Issue,
    hits: Vec<Hit>,
}

impl JacksonFailOnUnknownPropertiesRule {
    pub fn new(settings: GuardSettings) -> Self {
        let issue = Issue {
            id: RULE_ID.to_string(),
            description: settings.message(),
            severity: settings.severity,
            debt: Debt::FIVE_MINS,
        };
        Self {
            settings,
            issue,
            hits: Vec::new(),
        }
    }

    pub fn settings(&self) -> &GuardSettings {
        &self.settings
    }

    /// Whether a configuring call follows `call` within the chain bound.
    pub fn is_configured(&self, tree: &SyntaxTree, call: NodeId) -> bool {
        let mut current = tree.dot_qualified_parent(call);
        let mut remaining = self.settings.max_chain_depth;

        while let Some(qualified) = current {
            if remaining == 0 {
                break;
            }
            if let Some(selector) = tree.selector_call(qualified) {
                let configures = selector.callee.as_deref().is_some_and(|name| {
                    self.settings
                        .configuration_methods
                        .iter()
                        .any(|m| m == name)
                });
                if configures
                    && selector
                        .arguments
                        .iter()
                        .any(|arg| arg.text.contains(self.settings.feature_flag.as_str()))
                {
                    return true;
                }
            }
            current = tree.dot_qualified_parent(qualified);
            remaining -= 1;
        }
        false
    }

    fn is_factory_call(&self, tree: &SyntaxTree, node: NodeId) -> bool {
        match &tree.node(node).kind {
            NodeKind::Call(call) => {
                call.callee.as_deref() == Some(self.settings.factory_function.as_str())
            }
            _ => false,
        }
    }

    fn finding(&self, ctx: &RuleContext, node: NodeId) -> Finding {
        let span = ctx.tree.node(node).span;
        Finding {
            rule_id: RULE_ID.to_string(),
            severity: self.issue.severity,
            debt: self.issue.debt,
            location: Location {
                file: ctx.file.to_string(),
                line: span.start_line,
                column: span.start_column,
                end_line: span.end_line,
                end_column: span.end_column,
                start_byte: span.start_byte,
                end_byte: span.end_byte,
            },
            message: self.settings.message(),
            snippet: ctx.tree.text(node).to_string(),
        }
    }
}

impl RuleHandler for JacksonFailOnUnknownPropertiesRule {
    fn issue(&self) -> &Issue {
        &self.issue
    }

    fn node_tags(&self) -> &[NodeTag] {
        &[NodeTag::Call]
    }

    fn on_enter(&mut self, node: NodeId, ctx: &RuleContext) {
        if !self.is_factory_call(ctx.tree, node) || self.is_configured(ctx.tree, node) {
            return;
        }
        let finding = self.finding(ctx, node);
        self.hits.push(Hit {
            anchor: node,
            finding,
        });
    }

    fn results(&self) -> Vec<Hit> {
        self.hits.clone()
    }

    fn reset(&mut self) {
        self.hits.clear();
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use smallvec::smallvec;

    use super::*;
    use crate::engine::{LintEngine, RuleRegistry};
    use crate::syntax::{Argument, CallNode, Span, SyntaxTreeBuilder};

    const FLAG_ARG: &str = "DeserializationFeature.FAIL_ON_UNKNOWN_PROPERTIES";

    fn call(callee: &str, args: &[&str]) -> NodeKind {
        NodeKind::Call(CallNode {
            callee: Some(callee.to_string()),
            arguments: args
                .iter()
                .map(|a| Argument {
                    text: a.to_string(),
                    span: Span::default(),
                })
                .collect(),
        })
    }

    fn placeholder() -> NodeKind {
        NodeKind::Other {
            kind: "placeholder".to_string(),
        }
    }

    /// Build `factory().m1(a).m2(b)...` the way lowering nests it:
    /// left-deep `DotQualified` nodes with the factory call innermost.
    fn chain(hops: &[(&str, &[&str])]) -> (SyntaxTree, NodeId) {
        let mut b = SyntaxTreeBuilder::new("");
        let root = b.alloc(
            NodeKind::Other {
                kind: "source_file".to_string(),
            },
            Span::default(),
            None,
        );

        // Allocate qualified nodes outermost first so parents exist before children.
        let mut parent = root;
        let mut qualified = Vec::new();
        for _ in hops {
            let q = b.alloc(placeholder(), Span::default(), Some(parent));
            qualified.push(q);
            parent = q;
        }
        let factory = b.alloc(call("jacksonObjectMapper", &[]), Span::default(), Some(parent));

        // The innermost qualified node holds the first hop.
        let mut receiver = factory;
        for (q, (name, args)) in qualified.iter().rev().zip(hops) {
            let selector = b.alloc(call(name, args), Span::default(), Some(*q));
            b.set_kind(*q, NodeKind::DotQualified { receiver, selector });
            receiver = *q;
        }
        (b.build(), factory)
    }

    fn run(tree: &SyntaxTree, settings: GuardSettings) -> Vec<Finding> {
        let mut registry = RuleRegistry::new();
        registry.register(Box::new(JacksonFailOnUnknownPropertiesRule::new(settings)));
        let mut engine = LintEngine::new(registry);
        engine.run(&RuleContext::new("Test.kt", tree))
    }

    #[test]
    fn bare_factory_call_is_reported_once() {
        let (tree, _) = chain(&[]);
        let findings = run(&tree, GuardSettings::default());
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].rule_id, RULE_ID);
        assert_eq!(findings[0].severity, Severity::Warning);
        assert_eq!(findings[0].debt, Debt::FIVE_MINS);
        assert_eq!(
            findings[0].message,
            "ObjectMapper must explicitly configure FAIL_ON_UNKNOWN_PROPERTIES"
        );
    }

    #[test]
    fn each_configuration_method_satisfies_the_guard() {
        for method in ["configure", "disable", "enable"] {
            let (tree, factory) = chain(&[(method, &[FLAG_ARG, "false"])]);
            let rule = JacksonFailOnUnknownPropertiesRule::new(GuardSettings::default());
            assert!(rule.is_configured(&tree, factory), "{method} should configure");
            assert!(run(&tree, GuardSettings::default()).is_empty());
        }
    }

    #[test]
    fn configuration_method_with_other_flag_is_reported() {
        let (tree, _) = chain(&[("disable", &["SerializationFeature.INDENT_OUTPUT"])]);
        assert_eq!(run(&tree, GuardSettings::default()).len(), 1);
    }

    #[test]
    fn flag_in_unrelated_method_does_not_count() {
        let (tree, _) = chain(&[("registerModule", &[FLAG_ARG])]);
        assert_eq!(run(&tree, GuardSettings::default()).len(), 1);
    }

    #[test]
    fn substring_anywhere_in_argument_counts() {
        let (tree, _) = chain(&[("configure", &["\"not FAIL_ON_UNKNOWN_PROPERTIES really\""])]);
        assert!(run(&tree, GuardSettings::default()).is_empty());
    }

    #[test]
    fn configuring_call_at_bound_is_found() {
        let (tree, _) = chain(&[
            ("registerModule", &["a"]),
            ("registerModule", &["b"]),
            ("disable", &[FLAG_ARG]),
        ]);
        assert!(run(&tree, GuardSettings::default()).is_empty());
    }

    #[test]
    fn configuring_call_past_bound_is_reported() {
        let (tree, _) = chain(&[
            ("registerModule", &["mod1"]),
            ("registerModule", &["mod2"]),
            ("registerModule", &["mod3"]),
            ("disable", &[FLAG_ARG]),
        ]);
        assert_eq!(run(&tree, GuardSettings::default()).len(), 1);

        let wider = GuardSettings {
            max_chain_depth: 4,
            ..GuardSettings::default()
        };
        assert!(run(&tree, wider).is_empty());
    }

    #[test]
    fn zero_depth_never_finds_configuration() {
        let (tree, _) = chain(&[("disable", &[FLAG_ARG])]);
        let settings = GuardSettings {
            max_chain_depth: 0,
            ..GuardSettings::default()
        };
        assert_eq!(run(&tree, settings).len(), 1);
    }

    #[test]
    fn custom_names_are_honoured() {
        let mut b = SyntaxTreeBuilder::new("");
        let root = b.alloc(placeholder(), Span::default(), None);
        let q = b.alloc(placeholder(), Span::default(), Some(root));
        let factory = b.alloc(call("objectMapper", &[]), Span::default(), Some(q));
        let selector = b.alloc(call("without", &["STRICT_MODE"]), Span::default(), Some(q));
        b.set_kind(q, NodeKind::DotQualified { receiver: factory, selector });
        let tree = b.build();

        let settings = GuardSettings {
            factory_function: "objectMapper".to_string(),
            configuration_methods: vec!["without".to_string()],
            feature_flag: "STRICT_MODE".to_string(),
            ..GuardSettings::default()
        };
        assert!(run(&tree, settings).is_empty());

        let findings = run(&tree, GuardSettings::default());
        assert!(findings.is_empty(), "default settings ignore objectMapper()");
    }

    #[test]
    fn safe_qualified_parent_ends_the_walk() {
        let mut b = SyntaxTreeBuilder::new("");
        let root = b.alloc(placeholder(), Span::default(), None);
        let q = b.alloc(placeholder(), Span::default(), Some(root));
        let factory = b.alloc(call("jacksonObjectMapper", &[]), Span::default(), Some(q));
        let selector = b.alloc(call("disable", &[FLAG_ARG]), Span::default(), Some(q));
        b.set_kind(q, NodeKind::SafeQualified { receiver: factory, selector });
        let tree = b.build();

        assert_eq!(run(&tree, GuardSettings::default()).len(), 1);
    }

    #[test]
    fn call_without_simple_callee_is_ignored() {
        let mut b = SyntaxTreeBuilder::new("");
        let root = b.alloc(placeholder(), Span::default(), None);
        b.alloc(
            NodeKind::Call(CallNode {
                callee: None,
                arguments: smallvec![],
            }),
            Span::default(),
            Some(root),
        );
        assert!(run(&b.build(), GuardSettings::default()).is_empty());
    }

    #[test]
    fn reset_clears_previous_file() {
        let (tree, _) = chain(&[]);
        let mut registry = RuleRegistry::new();
        registry.register(Box::new(JacksonFailOnUnknownPropertiesRule::new(
            GuardSettings::default(),
        )));
        let mut engine = LintEngine::new(registry);
        let ctx = RuleContext::new("A.kt", &tree);
        assert_eq!(engine.run(&ctx).len(), 1);
        assert_eq!(engine.run(&ctx).len(), 1);
    }

    proptest! {
        #[test]
        fn reported_iff_configuring_hop_is_past_bound(
            unrelated in 0usize..8,
            bound in 0usize..8,
        ) {
            let module_args: &[&str] = &["m"];
            let flag_args: &[&str] = &[FLAG_ARG];
            let mut hops: Vec<(&str, &[&str])> = vec![("registerModule", module_args); unrelated];
            hops.push(("disable", flag_args));
            let (tree, _) = chain(&hops);

            let settings = GuardSettings { max_chain_depth: bound, ..GuardSettings::default() };
            let findings = run(&tree, settings);
            let expected = usize::from(unrelated + 1 > bound);
            prop_assert_eq!(findings.len(), expected);
        }
    }
}
