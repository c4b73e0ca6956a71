//! Per-rule configuration.

use serde::{Deserialize, Serialize};

use crate::types::finding::Severity;

pub const DEFAULT_FACTORY_FUNCTION: &str = "jacksonObjectMapper";
pub const DEFAULT_CONFIGURATION_METHODS: &[&str] = &["configure", "disable", "enable"];
pub const DEFAULT_FEATURE_FLAG: &str = "FAIL_ON_UNKNOWN_PROPERTIES";
pub const DEFAULT_MAX_CHAIN_DEPTH: usize = 3;

/// Configuration for all rules.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct RulesConfig {
    /// Rule ids switched off for the whole run.
    pub disabled: Vec<String>,
    pub jackson_fail_on_unknown_properties: JacksonRuleConfig,
}

impl RulesConfig {
    pub fn is_disabled(&self, rule_id: &str) -> bool {
        self.disabled.iter().any(|id| id == rule_id)
    }
}

/// Configuration of the `JacksonFailOnUnknownProperties` rule.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct JacksonRuleConfig {
    /// Default: true.
    pub active: Option<bool>,
    /// Name of the mapper factory function. Default: `jacksonObjectMapper`.
    pub factory_function: Option<String>,
    /// Chained method names that may configure the flag. Default: configure, disable, enable.
    pub configuration_methods: Option<Vec<String>>,
    /// Substring an argument must contain. Default: `FAIL_ON_UNKNOWN_PROPERTIES`.
    pub feature_flag: Option<String>,
    /// Maximum number of chain hops inspected. Default: 3.
    pub max_chain_depth: Option<usize>,
    /// Default: warning.
    pub severity: Option<Severity>,
}

impl JacksonRuleConfig {
    pub fn effective_active(&self) -> bool {
        self.active.unwrap_or(true)
    }

    pub fn effective_factory_function(&self) -> &str {
        self.factory_function
            .as_deref()
            .unwrap_or(DEFAULT_FACTORY_FUNCTION)
    }

    pub fn effective_configuration_methods(&self) -> Vec<String> {
        match &self.configuration_methods {
            Some(methods) => methods.clone(),
            None => DEFAULT_CONFIGURATION_METHODS
                .iter()
                .map(|m| m.to_string())
                .collect(),
        }
    }

    pub fn effective_feature_flag(&self) -> &str {
        self.feature_flag.as_deref().unwrap_or(DEFAULT_FEATURE_FLAG)
    }

    pub fn effective_max_chain_depth(&self) -> usize {
        self.max_chain_depth.unwrap_or(DEFAULT_MAX_CHAIN_DEPTH)
    }

    pub fn effective_severity(&self) -> Severity {
        self.severity.unwrap_or(Severity::Warning)
    }
}
