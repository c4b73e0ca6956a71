//! JSON report: the serialized [`LintReport`].

use std::io::Write;

use ktsift_core::errors::ReportError;

use crate::pipeline::LintReport;

pub fn write_json(report: &LintReport, out: &mut dyn Write) -> Result<(), ReportError> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)?;
    Ok(())
}
