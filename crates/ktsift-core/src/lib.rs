//! # ktsift-core
//!
//! Foundation crate for the ktsift Kotlin lint engine.
//! Defines findings, severities, configuration, errors, and tracing setup.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod errors;
pub mod tracing;
pub mod types;

// Re-export the most commonly used types at the crate root.
pub use config::KtsiftConfig;
pub use errors::error_code::KtsiftErrorCode;
pub use types::collections::{FxHashMap, FxHashSet};
pub use types::finding::{Debt, Finding, Location, Severity};
