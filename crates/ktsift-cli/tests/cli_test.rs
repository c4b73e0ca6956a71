//! End-to-end runs of the `ktsift` binary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

const UNGUARDED: &str = "fun mapper() = jacksonObjectMapper()\n";

fn ktsift(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ktsift"))
        .args(args)
        .current_dir(dir)
        .env("KTSIFT_LOG", "off")
        .output()
        .unwrap()
}

#[test]
fn clean_project_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("A.kt"),
        "fun mapper() = jacksonObjectMapper().disable(DeserializationFeature.FAIL_ON_UNKNOWN_PROPERTIES)\n",
    )
    .unwrap();

    let out = ktsift(dir.path(), &["check"]);
    assert_eq!(out.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("0 finding(s) in 1 file(s)"));
}

#[test]
fn findings_exit_two() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("A.kt"), UNGUARDED).unwrap();

    let out = ktsift(dir.path(), &["check", "."]);
    assert_eq!(out.status.code(), Some(2));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("[JacksonFailOnUnknownProperties]"));
}

#[test]
fn max_issues_tolerates_findings() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("A.kt"), UNGUARDED).unwrap();

    let out = ktsift(dir.path(), &["check", "--max-issues", "1"]);
    assert_eq!(out.status.code(), Some(0));
}

#[test]
fn json_format_is_machine_readable() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("A.kt"), UNGUARDED).unwrap();

    let out = ktsift(dir.path(), &["check", "--format", "json"]);
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(value["findings"].as_array().unwrap().len(), 1);
}

#[test]
fn config_file_is_discovered() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("A.kt"), UNGUARDED).unwrap();
    fs::write(
        dir.path().join("ktsift.toml"),
        "[rules.jackson_fail_on_unknown_properties]\nactive = false\n",
    )
    .unwrap();

    let out = ktsift(dir.path(), &["check"]);
    assert_eq!(out.status.code(), Some(0));
}

#[test]
fn baseline_round_trip_silences_existing_findings() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("A.kt"), UNGUARDED).unwrap();

    let out = ktsift(dir.path(), &["baseline", "--output", "baseline.json"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(dir.path().join("baseline.json").exists());

    let out = ktsift(dir.path(), &["check", "--baseline", "baseline.json"]);
    assert_eq!(out.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("1 finding(s) hidden by baseline"));
}

#[test]
fn missing_path_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let out = ktsift(dir.path(), &["check", "does-not-exist"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("error: [SCAN_ERROR]"));
}

#[test]
fn invalid_config_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("bad.toml"), "[scan\n").unwrap();
    let out = ktsift(dir.path(), &["--config", "bad.toml", "check"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("error: [CONFIG_ERROR]"));
}

#[test]
fn missing_config_reports_its_code() {
    let dir = tempfile::tempdir().unwrap();
    let out = ktsift(dir.path(), &["--config", "absent.toml", "check"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("error: [CONFIG_NOT_FOUND]"));
}

#[test]
fn corrupt_baseline_reports_its_code() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("A.kt"), UNGUARDED).unwrap();
    fs::write(dir.path().join("baseline.json"), "not json").unwrap();

    let out = ktsift(dir.path(), &["check", "--baseline", "baseline.json"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("error: [BASELINE_ERROR]"));
}
