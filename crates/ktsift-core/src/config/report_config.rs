//! Reporting configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Output format of a lint report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
    Sarif,
}

impl ReportFormat {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
            Self::Sarif => "sarif",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "sarif" => Ok(Self::Sarif),
            other => Err(format!("unknown report format '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ReportConfig {
    /// Default: text.
    pub format: Option<ReportFormat>,
    /// Path to a baseline file whose findings are not reported.
    pub baseline: Option<String>,
    /// Findings tolerated before the run fails. Default: 0.
    pub max_issues: Option<usize>,
}

impl ReportConfig {
    pub fn effective_format(&self) -> ReportFormat {
        self.format.unwrap_or_default()
    }

    pub fn effective_max_issues(&self) -> usize {
        self.max_issues.unwrap_or(0)
    }
}
