//! Built-in rules and the default registry.

pub mod jackson;

use ktsift_core::config::RulesConfig;

use crate::engine::RuleRegistry;

pub use jackson::{GuardSettings, JacksonFailOnUnknownPropertiesRule};

/// Registry with every built-in rule configured from `config`.
///
/// Rules switched off via `active = false` or listed in `disabled` are
/// registered but disabled, so their issues stay out of reports.
pub fn create_registry(config: &RulesConfig) -> RuleRegistry {
    let mut registry = RuleRegistry::new();

    let jackson = &config.jackson_fail_on_unknown_properties;
    registry.register(Box::new(JacksonFailOnUnknownPropertiesRule::new(
        GuardSettings::from_config(jackson),
    )));
    if !jackson.effective_active() || config.is_disabled(jackson::RULE_ID) {
        registry.disable(jackson::RULE_ID);
    }
    registry
}
