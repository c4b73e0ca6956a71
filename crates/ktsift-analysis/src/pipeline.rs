//! Analysis pipeline: scan → parse → lint → sort.

use std::path::{Path, PathBuf};
use std::time::Instant;

use ktsift_core::config::KtsiftConfig;
use ktsift_core::errors::{ParseError, ScanError};
use ktsift_core::Finding;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::baseline::Baseline;
use crate::engine::{Issue, LintEngine, RuleContext};
use crate::parsers::KotlinParser;
use crate::rules::create_registry;
use crate::scanner::{self, DiscoveredFile};

/// Result of linting a single file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReport {
    pub file: String,
    pub findings: Vec<Finding>,
    /// ERROR/MISSING regions in the parse; non-zero means findings may be incomplete.
    pub parse_errors: usize,
}

/// Result of a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintReport {
    pub files_analyzed: usize,
    pub files_with_parse_errors: usize,
    pub files_unreadable: usize,
    pub suppressed_by_baseline: usize,
    pub rules: Vec<Issue>,
    pub findings: Vec<Finding>,
    pub analysis_time_ms: u64,
}

impl LintReport {
    /// Drop findings present in `baseline`.
    pub fn apply_baseline(&mut self, baseline: &Baseline) {
        self.suppressed_by_baseline += baseline.filter(&mut self.findings);
    }

    pub fn is_clean(&self) -> bool {
        self.findings.is_empty()
    }
}

/// Owns the configuration and builds one engine per worker thread.
pub struct Analyzer {
    config: KtsiftConfig,
    parser: KotlinParser,
}

impl Analyzer {
    pub fn new(config: KtsiftConfig) -> Self {
        Self {
            config,
            parser: KotlinParser::new(),
        }
    }

    pub fn config(&self) -> &KtsiftConfig {
        &self.config
    }

    /// A fresh engine with every rule configured from this analyzer's config.
    pub fn build_engine(&self) -> LintEngine {
        LintEngine::new(create_registry(&self.config.rules))
    }

    /// Issues of all enabled rules.
    pub fn issues(&self) -> Vec<Issue> {
        create_registry(&self.config.rules).issues()
    }

    /// Lint an in-memory source. `file` is used as the finding location.
    pub fn analyze_source(&self, file: &str, source: &str) -> Result<FileReport, ParseError> {
        let mut engine = self.build_engine();
        self.analyze_with(&mut engine, file, source)
    }

    fn analyze_with(
        &self,
        engine: &mut LintEngine,
        file: &str,
        source: &str,
    ) -> Result<FileReport, ParseError> {
        let tree = self.parser.parse(source, Path::new(file))?;
        if tree.error_count() > 0 {
            tracing::warn!(
                file,
                errors = tree.error_count(),
                "syntax errors; findings may be incomplete"
            );
        }
        let mut findings = engine.run(&RuleContext::new(file, &tree));
        findings.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        Ok(FileReport {
            file: file.to_string(),
            findings,
            parse_errors: tree.error_count(),
        })
    }

    /// Scan `roots` and lint every Kotlin file in parallel.
    ///
    /// Files that cannot be read or parsed are logged and counted, never fatal.
    pub fn analyze_paths(&self, roots: &[PathBuf]) -> Result<LintReport, ScanError> {
        let start = Instant::now();
        let files = scanner::collect_files(roots, &self.config.scan)?;
        tracing::info!(files = files.len(), "analyzing kotlin files");

        let threads = self.config.scan.effective_threads();
        let outcomes = if threads > 0 {
            match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
                Ok(pool) => pool.install(|| self.analyze_files(&files)),
                Err(err) => {
                    tracing::warn!(error = %err, "falling back to global thread pool");
                    self.analyze_files(&files)
                }
            }
        } else {
            self.analyze_files(&files)
        };

        let mut report = LintReport {
            rules: self.issues(),
            ..LintReport::default()
        };
        for outcome in outcomes {
            match outcome {
                Some(file_report) => {
                    report.files_analyzed += 1;
                    if file_report.parse_errors > 0 {
                        report.files_with_parse_errors += 1;
                    }
                    report.findings.extend(file_report.findings);
                }
                None => report.files_unreadable += 1,
            }
        }
        report
            .findings
            .sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        report.analysis_time_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

        tracing::info!(
            files = report.files_analyzed,
            findings = report.findings.len(),
            unreadable = report.files_unreadable,
            time_ms = report.analysis_time_ms,
            "analysis complete"
        );
        Ok(report)
    }

    fn analyze_files(&self, files: &[DiscoveredFile]) -> Vec<Option<FileReport>> {
        files
            .par_iter()
            .map_init(
                || self.build_engine(),
                |engine, file| self.analyze_file(engine, file),
            )
            .collect()
    }

    fn analyze_file(&self, engine: &mut LintEngine, file: &DiscoveredFile) -> Option<FileReport> {
        let shown = file.path.display().to_string();
        let source = match std::fs::read_to_string(&file.path) {
            Ok(s) => s,
            Err(err) => {
                tracing::warn!(file = %shown, error = %err, "cannot read file");
                return None;
            }
        };
        match self.analyze_with(engine, &shown, &source) {
            Ok(report) => Some(report),
            Err(err) => {
                tracing::warn!(file = %shown, error = %err, "cannot parse file");
                None
            }
        }
    }
}
