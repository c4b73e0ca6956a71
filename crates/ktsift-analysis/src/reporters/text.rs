//! Human-readable report, one line per finding.

use std::io::Write;

use ktsift_core::errors::ReportError;

use crate::pipeline::LintReport;

pub fn write_text(report: &LintReport, out: &mut dyn Write) -> Result<(), ReportError> {
    for f in &report.findings {
        writeln!(
            out,
            "{}:{}:{}: {} [{}] {}",
            f.location.file, f.location.line, f.location.column, f.severity, f.rule_id, f.message
        )?;
    }

    let debt: u32 = report.findings.iter().map(|f| f.debt.total_minutes()).sum();
    writeln!(
        out,
        "{} finding(s) in {} file(s), estimated debt {}min",
        report.findings.len(),
        report.files_analyzed,
        debt
    )?;
    if report.suppressed_by_baseline > 0 {
        writeln!(out, "{} finding(s) hidden by baseline", report.suppressed_by_baseline)?;
    }
    if report.files_with_parse_errors > 0 || report.files_unreadable > 0 {
        writeln!(
            out,
            "{} file(s) with syntax errors, {} unreadable",
            report.files_with_parse_errors, report.files_unreadable
        )?;
    }
    Ok(())
}
