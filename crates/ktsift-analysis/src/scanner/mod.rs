//! File discovery for Kotlin sources.

pub mod walker;

use std::path::{Path, PathBuf};

use ktsift_core::config::ScanConfig;
use ktsift_core::errors::ScanError;

use crate::parsers::KotlinFileKind;

/// A Kotlin file found by the scanner.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct DiscoveredFile {
    pub path: PathBuf,
    pub file_size: u64,
    pub kind: KotlinFileKind,
}

/// Collect Kotlin files under every root. Roots that are files are taken as-is
/// when they have a Kotlin extension. Output is sorted and deduplicated.
pub fn collect_files(roots: &[PathBuf], config: &ScanConfig) -> Result<Vec<DiscoveredFile>, ScanError> {
    let mut files = Vec::new();
    for root in roots {
        if !root.exists() {
            return Err(ScanError::PathNotFound { path: root.clone() });
        }
        if root.is_file() {
            if let Some(file) = explicit_file(root, config)? {
                files.push(file);
            }
            continue;
        }
        files.extend(walker::walk_directory(root, config)?);
    }
    files.sort();
    files.dedup_by(|a, b| a.path == b.path);
    Ok(files)
}

fn explicit_file(path: &Path, config: &ScanConfig) -> Result<Option<DiscoveredFile>, ScanError> {
    let Some(kind) = KotlinFileKind::from_path(path) else {
        tracing::debug!(path = %path.display(), "skipping non-kotlin file");
        return Ok(None);
    };
    if kind == KotlinFileKind::Script && !config.effective_include_scripts() {
        return Ok(None);
    }
    let metadata = std::fs::metadata(path).map_err(|source| ScanError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(DiscoveredFile {
        path: path.to_path_buf(),
        file_size: metadata.len(),
        kind,
    }))
}
