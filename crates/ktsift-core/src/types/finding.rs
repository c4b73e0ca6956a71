//! Finding: the output type of every rule.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How serious a finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum Severity {
    Info,
    #[default]
    Warning,
    Error,
}

impl Severity {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }

    /// SARIF `level` value for this severity.
    pub fn sarif_level(&self) -> &'static str {
        match self {
            Self::Info => "note",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "info" => Ok(Self::Info),
            "warning" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            other => Err(format!("unknown severity '{other}'")),
        }
    }
}

/// Estimated remediation effort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Debt {
    pub days: u32,
    pub hours: u32,
    pub mins: u32,
}

impl Debt {
    pub const FIVE_MINS: Debt = Debt { days: 0, hours: 0, mins: 5 };
    pub const TEN_MINS: Debt = Debt { days: 0, hours: 0, mins: 10 };
    pub const TWENTY_MINS: Debt = Debt { days: 0, hours: 0, mins: 20 };

    /// Total effort in minutes (8h working day).
    pub fn total_minutes(&self) -> u32 {
        self.days * 8 * 60 + self.hours * 60 + self.mins
    }
}

impl fmt::Display for Debt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::with_capacity(3);
        if self.days > 0 {
            parts.push(format!("{}d", self.days));
        }
        if self.hours > 0 {
            parts.push(format!("{}h", self.hours));
        }
        if self.mins > 0 || parts.is_empty() {
            parts.push(format!("{}min", self.mins));
        }
        f.write_str(&parts.join(" "))
    }
}

/// Source location of a finding. Lines and columns are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Location {
    pub file: String,
    pub line: u32,
    pub column: u32,
    pub end_line: u32,
    pub end_column: u32,
    pub start_byte: usize,
    pub end_byte: usize,
}

/// A single reported rule violation. Produced once, never mutated by rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub rule_id: String,
    pub severity: Severity,
    pub debt: Debt,
    pub location: Location,
    pub message: String,
    /// Source text of the anchor node, used for baseline fingerprints.
    pub snippet: String,
}

impl Finding {
    /// Sort key giving deterministic report order.
    pub fn sort_key(&self) -> (&str, u32, u32, &str) {
        (
            &self.location.file,
            self.location.line,
            self.location.column,
            &self.rule_id,
        )
    }
}
