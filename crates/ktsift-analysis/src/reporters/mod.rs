//! Report rendering: text, JSON, SARIF.

pub mod json;
pub mod sarif;
pub mod text;

use std::io::Write;

use ktsift_core::config::ReportFormat;
use ktsift_core::errors::ReportError;

use crate::pipeline::LintReport;

/// Tool name written into machine-readable reports.
pub const TOOL_NAME: &str = "ktsift";

/// Render `report` in `format` to `out`.
pub fn render(report: &LintReport, format: ReportFormat, out: &mut dyn Write) -> Result<(), ReportError> {
    match format {
        ReportFormat::Text => text::write_text(report, out),
        ReportFormat::Json => json::write_json(report, out),
        ReportFormat::Sarif => sarif::write_sarif(report, out),
    }
}
