//! Scanner configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the file scanner subsystem.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ScanConfig {
    /// Maximum file size in bytes. Default: 1MB (1_048_576).
    pub max_file_size: Option<u64>,
    /// Number of threads. 0 = let rayon / ignore decide.
    pub threads: Option<usize>,
    /// Include glob patterns (gitignore syntax). If non-empty, only matching paths are scanned.
    pub include: Vec<String>,
    /// Additional ignore patterns beyond .gitignore/.ktsiftignore.
    pub extra_ignore: Vec<String>,
    /// Follow symbolic links. Default: false.
    pub follow_symlinks: Option<bool>,
    /// Also lint Kotlin script files (`.kts`). Default: true.
    pub include_scripts: Option<bool>,
}

impl ScanConfig {
    /// Returns the effective max file size, defaulting to 1MB.
    pub fn effective_max_file_size(&self) -> u64 {
        self.max_file_size.unwrap_or(1_048_576)
    }

    /// Returns the effective thread count, defaulting to 0 (auto-detect).
    pub fn effective_threads(&self) -> usize {
        self.threads.unwrap_or(0)
    }

    pub fn effective_follow_symlinks(&self) -> bool {
        self.follow_symlinks.unwrap_or(false)
    }

    pub fn effective_include_scripts(&self) -> bool {
        self.include_scripts.unwrap_or(true)
    }
}
