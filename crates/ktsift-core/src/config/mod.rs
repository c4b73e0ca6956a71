//! Configuration: TOML file `ktsift.toml`, every field optional.

pub mod report_config;
pub mod rules_config;
pub mod scan_config;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

pub use report_config::{ReportConfig, ReportFormat};
pub use rules_config::{JacksonRuleConfig, RulesConfig};
pub use scan_config::ScanConfig;

/// File name looked up by [`KtsiftConfig::discover`].
pub const CONFIG_FILE_NAME: &str = "ktsift.toml";

/// Top-level configuration aggregating all subsystem configs.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct KtsiftConfig {
    pub scan: ScanConfig,
    pub rules: RulesConfig,
    pub report: ReportConfig,
}

impl KtsiftConfig {
    /// Load config from a TOML string, falling back to defaults for missing fields.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Read and parse a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "loaded config");
        Self::from_toml(&content)
    }

    /// Find `ktsift.toml` in `dir` or any of its ancestors.
    pub fn discover(dir: &Path) -> Option<PathBuf> {
        dir.ancestors()
            .map(|d| d.join(CONFIG_FILE_NAME))
            .find(|candidate| candidate.is_file())
    }

    /// Reject values no rule can work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let jackson = &self.rules.jackson_fail_on_unknown_properties;
        if jackson.effective_factory_function().trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "rules.jackson_fail_on_unknown_properties.factory_function".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        if jackson.effective_feature_flag().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "rules.jackson_fail_on_unknown_properties.feature_flag".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
