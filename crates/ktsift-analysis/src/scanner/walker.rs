//! Parallel file walker using the `ignore` crate's `WalkParallel`.
//!
//! Supports `.ktsiftignore` (gitignore syntax, hierarchical) and the default
//! ignore patterns below.

use std::path::Path;

use crossbeam_channel as channel;
use ktsift_core::config::ScanConfig;
use ktsift_core::errors::ScanError;

use super::DiscoveredFile;
use crate::parsers::KotlinFileKind;

/// Default ignore patterns applied to every scan.
pub const DEFAULT_IGNORES: &[&str] = &[
    ".git",
    ".gradle",
    ".idea",
    "build",
    "out",
    "target",
    "node_modules",
];

/// Name of the per-directory ignore file.
pub const IGNORE_FILE_NAME: &str = ".ktsiftignore";

/// Walk a directory tree in parallel, collecting Kotlin files.
///
/// Respects `.gitignore`, `.ktsiftignore`, and [`DEFAULT_IGNORES`].
/// Returns files sorted by path for deterministic output.
pub fn walk_directory(root: &Path, config: &ScanConfig) -> Result<Vec<DiscoveredFile>, ScanError> {
    let (tx, rx) = channel::unbounded();

    let include_scripts = config.effective_include_scripts();
    let threads = config.effective_threads();

    let mut builder = ignore::WalkBuilder::new(root);
    builder
        .hidden(false)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .add_custom_ignore_filename(IGNORE_FILE_NAME)
        .max_filesize(Some(config.effective_max_file_size()))
        .follow_links(config.effective_follow_symlinks());

    if threads > 0 {
        builder.threads(threads);
    }

    // Positive patterns whitelist, negated patterns blacklist.
    let mut overrides = ignore::overrides::OverrideBuilder::new(root);
    for pattern in &config.include {
        add_override(&mut overrides, pattern)?;
    }
    for pattern in DEFAULT_IGNORES {
        add_override(&mut overrides, &format!("!{}/**", pattern))?;
        add_override(&mut overrides, &format!("!{}", pattern))?;
    }
    for pattern in &config.extra_ignore {
        add_override(&mut overrides, &format!("!{}", pattern))?;
    }
    let built = overrides.build().map_err(|e| ScanError::InvalidPattern {
        pattern: "<overrides>".to_string(),
        message: e.to_string(),
    })?;
    builder.overrides(built);

    builder.build_parallel().run(|| {
        let tx = tx.clone();
        Box::new(move |entry| {
            let entry = match entry {
                Ok(e) => e,
                Err(err) => {
                    tracing::warn!(error = %err, "walk error");
                    return ignore::WalkState::Continue;
                }
            };

            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                return ignore::WalkState::Continue;
            }

            let path = entry.path();
            let kind = match KotlinFileKind::from_path(path) {
                Some(KotlinFileKind::Script) if !include_scripts => {
                    return ignore::WalkState::Continue
                }
                Some(kind) => kind,
                None => return ignore::WalkState::Continue,
            };

            let file_size = entry.metadata().map(|m| m.len()).unwrap_or(0);
            let _ = tx.send(DiscoveredFile {
                path: path.to_path_buf(),
                file_size,
                kind,
            });
            ignore::WalkState::Continue
        })
    });
    drop(tx);

    let mut files: Vec<DiscoveredFile> = rx.into_iter().collect();
    files.sort();
    tracing::debug!(root = %root.display(), files = files.len(), "walk complete");
    Ok(files)
}

fn add_override(
    overrides: &mut ignore::overrides::OverrideBuilder,
    pattern: &str,
) -> Result<(), ScanError> {
    overrides
        .add(pattern)
        .map(|_| ())
        .map_err(|e| ScanError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })
}
