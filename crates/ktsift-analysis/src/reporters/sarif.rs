//! SARIF v2.1.0 report for CI/CD integration.

use std::io::Write;

use ktsift_core::errors::ReportError;
use ktsift_core::Finding;
use serde::{Deserialize, Serialize};

use super::TOOL_NAME;
use crate::engine::Issue;
use crate::pipeline::LintReport;

const SARIF_SCHEMA: &str =
    "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/main/sarif-2.1/schema/sarif-schema-2.1.0.json";

pub fn write_sarif(report: &LintReport, out: &mut dyn Write) -> Result<(), ReportError> {
    let sarif = generate_sarif(report, env!("CARGO_PKG_VERSION"));
    serde_json::to_writer_pretty(&mut *out, &sarif)?;
    writeln!(out)?;
    Ok(())
}

/// Build a SARIF report from lint results.
pub fn generate_sarif(report: &LintReport, tool_version: &str) -> SarifReport {
    let rules: Vec<SarifRule> = report.rules.iter().map(build_rule).collect();
    let results = report
        .findings
        .iter()
        .map(|f| build_result(f, &report.rules))
        .collect();

    SarifReport {
        schema: SARIF_SCHEMA.to_string(),
        version: "2.1.0".to_string(),
        runs: vec![SarifRun {
            tool: SarifTool {
                driver: SarifDriver {
                    name: TOOL_NAME.to_string(),
                    version: tool_version.to_string(),
                    rules,
                },
            },
            results,
        }],
    }
}

fn build_rule(issue: &Issue) -> SarifRule {
    SarifRule {
        id: issue.id.clone(),
        short_description: SarifMessage {
            text: issue.description.clone(),
        },
        default_configuration: SarifRuleConfiguration {
            level: issue.severity.sarif_level().to_string(),
        },
    }
}

fn build_result(finding: &Finding, rules: &[Issue]) -> SarifResult {
    SarifResult {
        rule_id: finding.rule_id.clone(),
        rule_index: rules.iter().position(|r| r.id == finding.rule_id),
        level: finding.severity.sarif_level().to_string(),
        message: SarifMessage {
            text: finding.message.clone(),
        },
        locations: vec![SarifLocation {
            physical_location: SarifPhysicalLocation {
                artifact_location: SarifArtifactLocation {
                    uri: finding.location.file.replace('\\', "/"),
                },
                region: SarifRegion {
                    start_line: finding.location.line,
                    start_column: Some(finding.location.column),
                    end_line: Some(finding.location.end_line),
                    end_column: Some(finding.location.end_column),
                },
            },
        }],
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SarifReport {
    #[serde(rename = "$schema")]
    pub schema: String,
    pub version: String,
    pub runs: Vec<SarifRun>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SarifRun {
    pub tool: SarifTool,
    pub results: Vec<SarifResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SarifTool {
    pub driver: SarifDriver,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SarifDriver {
    pub name: String,
    pub version: String,
    pub rules: Vec<SarifRule>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifRule {
    pub id: String,
    pub short_description: SarifMessage,
    pub default_configuration: SarifRuleConfiguration,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SarifRuleConfiguration {
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifResult {
    pub rule_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_index: Option<usize>,
    pub level: String,
    pub message: SarifMessage,
    pub locations: Vec<SarifLocation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SarifMessage {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifLocation {
    pub physical_location: SarifPhysicalLocation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifPhysicalLocation {
    pub artifact_location: SarifArtifactLocation,
    pub region: SarifRegion,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SarifArtifactLocation {
    pub uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SarifRegion {
    pub start_line: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_column: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_line: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_column: Option<u32>,
}
