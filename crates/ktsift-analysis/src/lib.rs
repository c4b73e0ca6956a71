//! # ktsift-analysis
//!
//! Analysis engine for ktsift: Kotlin parsing and lowering, the single-pass
//! rule engine, built-in rules, suppression, file scanning, baselines and
//! reporters.

pub mod baseline;
pub mod engine;
pub mod parsers;
pub mod pipeline;
pub mod reporters;
pub mod rules;
pub mod scanner;
pub mod suppression;
pub mod syntax;

pub use pipeline::{Analyzer, FileReport, LintReport};
