//! Error types for every ktsift subsystem.
//!
//! Each subsystem owns a `thiserror` enum; all of them implement
//! [`error_code::KtsiftErrorCode`] so callers can surface a stable code.

pub mod baseline_error;
pub mod config_error;
pub mod error_code;
pub mod parse_error;
pub mod report_error;
pub mod scan_error;

pub use baseline_error::BaselineError;
pub use config_error::ConfigError;
pub use parse_error::ParseError;
pub use report_error::ReportError;
pub use scan_error::ScanError;
