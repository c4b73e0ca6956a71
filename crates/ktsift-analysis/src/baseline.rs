//! Baseline: fingerprints of accepted findings that are not reported again.
//!
//! A fingerprint hashes the rule id, the file path, the whitespace-normalized
//! anchor text, and the occurrence index of that triple within the file. Line
//! numbers are not part of it, so findings survive unrelated edits above them.

use std::collections::BTreeSet;
use std::path::Path;

use ktsift_core::errors::BaselineError;
use ktsift_core::types::collections::FxHashMap;
use ktsift_core::Finding;
use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

pub const BASELINE_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Baseline {
    pub version: u32,
    pub fingerprints: BTreeSet<String>,
}

impl Default for Baseline {
    fn default() -> Self {
        Self {
            version: BASELINE_VERSION,
            fingerprints: BTreeSet::new(),
        }
    }
}

impl Baseline {
    pub fn from_findings(findings: &[Finding]) -> Self {
        Self {
            version: BASELINE_VERSION,
            fingerprints: fingerprints(findings).into_iter().collect(),
        }
    }

    pub fn load(path: &Path) -> Result<Self, BaselineError> {
        let content = std::fs::read_to_string(path).map_err(|source| BaselineError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| BaselineError::Format {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), BaselineError> {
        let json = serde_json::to_string_pretty(self).map_err(|source| BaselineError::Format {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(|source| BaselineError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn len(&self) -> usize {
        self.fingerprints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fingerprints.is_empty()
    }

    pub fn contains(&self, fingerprint: &str) -> bool {
        self.fingerprints.contains(fingerprint)
    }

    /// Drop findings present in the baseline. Returns the number dropped.
    pub fn filter(&self, findings: &mut Vec<Finding>) -> usize {
        let prints = fingerprints(findings);
        let before = findings.len();
        let mut keep = prints.iter().map(|p| !self.contains(p));
        findings.retain(|_| keep.next().unwrap_or(true));
        before - findings.len()
    }
}

/// Fingerprints for `findings`, in the same order.
pub fn fingerprints(findings: &[Finding]) -> Vec<String> {
    let mut occurrences: FxHashMap<(String, String, String), u32> = FxHashMap::default();
    findings
        .iter()
        .map(|f| {
            let file = f.location.file.replace('\\', "/");
            let snippet = normalize_whitespace(&f.snippet);
            let key = (f.rule_id.clone(), file, snippet);
            let index = occurrences.entry(key.clone()).or_insert(0);
            let print = fingerprint(&key.0, &key.1, &key.2, *index);
            *index += 1;
            print
        })
        .collect()
}

fn fingerprint(rule_id: &str, file: &str, snippet: &str, occurrence: u32) -> String {
    let input = format!("{rule_id}\0{file}\0{snippet}\0{occurrence}");
    format!("{:016x}", xxh3_64(input.as_bytes()))
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
