//! Stable string codes for errors crossing the CLI boundary.

/// Maps an error value to a stable, machine-readable code.
pub trait KtsiftErrorCode {
    fn error_code(&self) -> &'static str;
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const CONFIG_NOT_FOUND: &str = "CONFIG_NOT_FOUND";
pub const CONFIG_INVALID: &str = "CONFIG_INVALID";
pub const PARSE_ERROR: &str = "PARSE_ERROR";
pub const GRAMMAR_NOT_FOUND: &str = "GRAMMAR_NOT_FOUND";
pub const SCAN_ERROR: &str = "SCAN_ERROR";
pub const IO_ERROR: &str = "IO_ERROR";
pub const BASELINE_ERROR: &str = "BASELINE_ERROR";
pub const REPORT_ERROR: &str = "REPORT_ERROR";
