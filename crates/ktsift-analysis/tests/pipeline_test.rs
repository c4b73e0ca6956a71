//! Scan → parse → lint over real directories, plus baselines.

use std::fs;
use std::path::{Path, PathBuf};

use ktsift_analysis::baseline::Baseline;
use ktsift_analysis::scanner::collect_files;
use ktsift_analysis::Analyzer;
use ktsift_core::config::{KtsiftConfig, ScanConfig};
use ktsift_core::errors::error_code::{KtsiftErrorCode, SCAN_ERROR};
use ktsift_core::errors::ScanError;

const UNGUARDED: &str = "fun mapper() = jacksonObjectMapper()\n";
const GUARDED: &str =
    "fun mapper() = jacksonObjectMapper().disable(DeserializationFeature.FAIL_ON_UNKNOWN_PROPERTIES)\n";

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn file_names(report: &ktsift_analysis::LintReport) -> Vec<String> {
    report
        .findings
        .iter()
        .map(|f| {
            Path::new(&f.location.file)
                .file_name()
                .unwrap()
                .to_string_lossy()
                .into_owned()
        })
        .collect()
}

#[test]
fn analyzes_every_kotlin_file_under_root() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "src/main/kotlin/A.kt", UNGUARDED);
    write(dir.path(), "src/main/kotlin/B.kt", GUARDED);
    write(dir.path(), "build.gradle.kts", "val m = jacksonObjectMapper()\n");
    write(dir.path(), "README.md", "jacksonObjectMapper()");

    let report = Analyzer::new(KtsiftConfig::default())
        .analyze_paths(&[dir.path().to_path_buf()])
        .unwrap();

    assert_eq!(report.files_analyzed, 3);
    assert_eq!(report.files_unreadable, 0);
    assert_eq!(report.findings.len(), 2);
    assert_eq!(file_names(&report), vec!["build.gradle.kts", "A.kt"]);
    assert_eq!(report.rules.len(), 1);
    assert!(report.analysis_time_ms < 60_000);
    assert!(!report.is_clean());
}

#[test]
fn scripts_can_be_excluded() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "A.kt", UNGUARDED);
    write(dir.path(), "build.gradle.kts", UNGUARDED);

    let config = KtsiftConfig {
        scan: ScanConfig {
            include_scripts: Some(false),
            ..Default::default()
        },
        ..Default::default()
    };
    let report = Analyzer::new(config)
        .analyze_paths(&[dir.path().to_path_buf()])
        .unwrap();
    assert_eq!(report.files_analyzed, 1);
    assert_eq!(file_names(&report), vec!["A.kt"]);
}

#[test]
fn default_ignores_skip_build_output() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "src/A.kt", UNGUARDED);
    write(dir.path(), "build/generated/B.kt", UNGUARDED);
    write(dir.path(), ".gradle/C.kt", UNGUARDED);

    let files = collect_files(&[dir.path().to_path_buf()], &ScanConfig::default()).unwrap();
    assert_eq!(files.len(), 1);
    assert!(files[0].path.ends_with("src/A.kt"));
}

#[test]
fn ignore_file_and_extra_patterns_are_respected() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), ".ktsiftignore", "legacy/\n");
    write(dir.path(), "legacy/Old.kt", UNGUARDED);
    write(dir.path(), "gen/Gen.kt", UNGUARDED);
    write(dir.path(), "app/App.kt", UNGUARDED);

    let config = ScanConfig {
        extra_ignore: vec!["gen".to_string()],
        ..Default::default()
    };
    let files = collect_files(&[dir.path().to_path_buf()], &config).unwrap();
    let names: Vec<&Path> = files.iter().map(|f| f.path.as_path()).collect();
    assert_eq!(names.len(), 1, "{names:?}");
    assert!(names[0].ends_with("app/App.kt"));
}

#[test]
fn explicit_file_roots_are_taken_as_is() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "A.kt", UNGUARDED);
    write(dir.path(), "notes.txt", UNGUARDED);

    let roots = vec![
        dir.path().join("A.kt"),
        dir.path().join("notes.txt"),
        dir.path().join("A.kt"),
    ];
    let files = collect_files(&roots, &ScanConfig::default()).unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].file_size, UNGUARDED.len() as u64);
}

#[test]
fn missing_root_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing: PathBuf = dir.path().join("nope");

    let err = Analyzer::new(KtsiftConfig::default())
        .analyze_paths(&[missing.clone()])
        .unwrap_err();
    assert!(matches!(err, ScanError::PathNotFound { ref path } if *path == missing));
    assert_eq!(err.error_code(), SCAN_ERROR);
}

#[test]
fn syntax_errors_are_counted_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "Broken.kt", "fun broken( {\n");
    write(dir.path(), "A.kt", UNGUARDED);

    let report = Analyzer::new(KtsiftConfig::default())
        .analyze_paths(&[dir.path().to_path_buf()])
        .unwrap();
    assert_eq!(report.files_analyzed, 2);
    assert_eq!(report.files_with_parse_errors, 1);
    assert_eq!(report.findings.len(), 1);
}

#[test]
fn fixed_thread_count_gives_same_result() {
    let dir = tempfile::tempdir().unwrap();
    for i in 0..8 {
        write(dir.path(), &format!("pkg{i}/F{i}.kt"), UNGUARDED);
    }
    let roots = [dir.path().to_path_buf()];

    let auto = Analyzer::new(KtsiftConfig::default())
        .analyze_paths(&roots)
        .unwrap();
    let single = Analyzer::new(KtsiftConfig {
        scan: ScanConfig {
            threads: Some(1),
            ..Default::default()
        },
        ..Default::default()
    })
    .analyze_paths(&roots)
    .unwrap();

    assert_eq!(auto.findings, single.findings);
    assert_eq!(auto.findings.len(), 8);
}

#[test]
fn baseline_hides_known_findings() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "A.kt", UNGUARDED);
    let roots = [dir.path().to_path_buf()];
    let analyzer = Analyzer::new(KtsiftConfig::default());

    let first = analyzer.analyze_paths(&roots).unwrap();
    let baseline_path = dir.path().join("baseline.json");
    Baseline::from_findings(&first.findings)
        .save(&baseline_path)
        .unwrap();

    // A new unguarded mapper appears in another file.
    write(dir.path(), "B.kt", UNGUARDED);
    let mut second = analyzer.analyze_paths(&roots).unwrap();
    let baseline = Baseline::load(&baseline_path).unwrap();
    second.apply_baseline(&baseline);

    assert_eq!(second.suppressed_by_baseline, 1);
    assert_eq!(file_names(&second), vec!["B.kt"]);
}

#[test]
fn baseline_survives_line_shifts() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "A.kt", UNGUARDED);
    let roots = [dir.path().to_path_buf()];
    let analyzer = Analyzer::new(KtsiftConfig::default());

    let baseline = Baseline::from_findings(&analyzer.analyze_paths(&roots).unwrap().findings);

    write(dir.path(), "A.kt", &format!("package demo\n\n{UNGUARDED}"));
    let mut report = analyzer.analyze_paths(&roots).unwrap();
    report.apply_baseline(&baseline);
    assert!(report.is_clean());
}

#[test]
fn unreadable_files_are_counted_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "A.kt", UNGUARDED);
    fs::write(dir.path().join("Latin1.kt"), [0x66, 0x75, 0x6e, 0x20, 0xff, 0xfe, 0x0a]).unwrap();

    let report = Analyzer::new(KtsiftConfig::default())
        .analyze_paths(&[dir.path().to_path_buf()])
        .unwrap();
    assert_eq!(report.files_analyzed, 1);
    assert_eq!(report.files_unreadable, 1);
    assert_eq!(file_names(&report), vec!["A.kt"]);
}

#[test]
fn scripts_and_sources_are_sorted_by_path() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "b/Z.kt", UNGUARDED);
    write(dir.path(), "a/build.gradle.kts", UNGUARDED);
    write(dir.path(), "a/A.kt", UNGUARDED);

    let files = collect_files(&[dir.path().to_path_buf()], &ScanConfig::default()).unwrap();
    let paths: Vec<_> = files.iter().map(|f| f.path.clone()).collect();
    let mut sorted = paths.clone();
    sorted.sort();
    assert_eq!(paths, sorted);
    assert_eq!(files.len(), 3);
}
