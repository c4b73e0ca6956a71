use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ktsift_analysis::baseline::Baseline;
use ktsift_analysis::reporters;
use ktsift_analysis::{Analyzer, LintReport};
use ktsift_core::config::{KtsiftConfig, ReportFormat};
use ktsift_core::errors::{BaselineError, ConfigError, ParseError, ReportError, ScanError};
use ktsift_core::KtsiftErrorCode;

/// Findings exceeded the tolerated count.
const EXIT_FINDINGS: u8 = 2;
/// Configuration, scan, baseline or output failure.
const EXIT_FATAL: u8 = 1;

#[derive(Parser)]
#[command(name = "ktsift")]
#[command(about = "Static checks for Kotlin sources")]
#[command(version)]
struct Cli {
    /// Config file (default: nearest ktsift.toml above the working directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint Kotlin files and report findings
    Check {
        /// Files or directories to scan (default: current directory)
        paths: Vec<PathBuf>,
        /// Output format: text, json or sarif
        #[arg(long)]
        format: Option<ReportFormat>,
        /// Baseline file whose findings are not reported
        #[arg(long)]
        baseline: Option<PathBuf>,
        /// Findings tolerated before exiting with status 2
        #[arg(long)]
        max_issues: Option<usize>,
    },
    /// Record current findings into a baseline file
    Baseline {
        /// Files or directories to scan (default: current directory)
        paths: Vec<PathBuf>,
        /// Where to write the baseline
        #[arg(long, short)]
        output: PathBuf,
    },
}

fn main() -> ExitCode {
    ktsift_core::tracing::init_tracing();
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            match error_code(&err) {
                Some(code) => eprintln!("error: [{code}] {err:#}"),
                None => eprintln!("error: {err:#}"),
            }
            ExitCode::from(EXIT_FATAL)
        }
    }
}

/// Stable code of the first ktsift error in the chain, if any.
fn error_code(err: &anyhow::Error) -> Option<&'static str> {
    err.chain().find_map(|cause| {
        if let Some(e) = cause.downcast_ref::<ConfigError>() {
            Some(e.error_code())
        } else if let Some(e) = cause.downcast_ref::<ScanError>() {
            Some(e.error_code())
        } else if let Some(e) = cause.downcast_ref::<ParseError>() {
            Some(e.error_code())
        } else if let Some(e) = cause.downcast_ref::<BaselineError>() {
            Some(e.error_code())
        } else {
            cause.downcast_ref::<ReportError>().map(|e| e.error_code())
        }
    })
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Check {
            paths,
            format,
            baseline,
            max_issues,
        } => {
            let format = format.unwrap_or_else(|| config.report.effective_format());
            let max_issues = max_issues.unwrap_or_else(|| config.report.effective_max_issues());
            let baseline = baseline.or_else(|| config.report.baseline.as_ref().map(PathBuf::from));

            let report = check(config, &paths, baseline.as_deref())?;
            write_report(&report, format)?;

            if report.findings.len() > max_issues {
                Ok(ExitCode::from(EXIT_FINDINGS))
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }
        Commands::Baseline { paths, output } => {
            let report = analyze(config, &paths)?;
            let baseline = Baseline::from_findings(&report.findings);
            baseline
                .save(&output)
                .with_context(|| format!("cannot write baseline {}", output.display()))?;
            eprintln!(
                "wrote {} fingerprint(s) to {}",
                baseline.len(),
                output.display()
            );
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn load_config(explicit: Option<&Path>) -> Result<KtsiftConfig> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let cwd = std::env::current_dir().context("cannot resolve working directory")?;
            KtsiftConfig::discover(&cwd)
        }
    };
    match path {
        Some(path) => KtsiftConfig::load(&path)
            .with_context(|| format!("cannot load config {}", path.display())),
        None => {
            tracing::debug!("no config file found, using defaults");
            Ok(KtsiftConfig::default())
        }
    }
}

fn analyze(config: KtsiftConfig, paths: &[PathBuf]) -> Result<LintReport> {
    let roots = if paths.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        paths.to_vec()
    };
    let report = Analyzer::new(config).analyze_paths(&roots)?;
    Ok(report)
}

fn check(config: KtsiftConfig, paths: &[PathBuf], baseline: Option<&Path>) -> Result<LintReport> {
    let mut report = analyze(config, paths)?;
    if let Some(path) = baseline {
        let baseline = Baseline::load(path)
            .with_context(|| format!("cannot load baseline {}", path.display()))?;
        report.apply_baseline(&baseline);
    }
    Ok(report)
}

fn write_report(report: &LintReport, format: ReportFormat) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    reporters::render(report, format, &mut out)?;
    out.flush()?;
    Ok(())
}
