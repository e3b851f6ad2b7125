#![allow(clippy::unwrap_used, clippy::expect_used)]

use diffractor_core::errors::{DiffractorError, ExErrorKind};
use diffractor_core::logging_facility::test_capture::init_test_capture;
use diffractor_core_types::schema::{
    FIELD_CLUSTER_COUNT, FIELD_ERR_CODE, FIELD_FILE_PATH, FIELD_RUN_ID,
};
use diffractor_engine::{run_comparison, EngineConfig, FileLister, FileReader};
use std::collections::BTreeMap;

/// In-memory snapshots keyed by raw path
#[derive(Default)]
struct MemoryFs {
    files: BTreeMap<String, String>,
    unreadable: Vec<String>,
    unlistable: Vec<String>,
}

impl MemoryFs {
    fn with(mut self, raw: &str, content: &str) -> Self {
        self.files.insert(raw.to_string(), content.to_string());
        self
    }
}

impl FileLister for MemoryFs {
    fn list(&self, root: &str, _pattern: &str) -> Result<Vec<String>, DiffractorError> {
        if self.unlistable.iter().any(|r| r == root) {
            return Err(DiffractorError::ListError {
                root: root.to_string(),
                reason: "permission denied".to_string(),
            });
        }
        let prefix = format!("{}/", root);
        Ok(self
            .files
            .keys()
            .filter(|k| k.starts_with(&prefix))
            .cloned()
            .collect())
    }
}

impl FileReader for MemoryFs {
    fn read(&self, raw_path: &str) -> Result<String, DiffractorError> {
        if self.unreadable.iter().any(|p| p == raw_path) {
            return Err(DiffractorError::ReadError {
                path: raw_path.to_string(),
                reason: "I/O error".to_string(),
            });
        }
        self.files
            .get(raw_path)
            .cloned()
            .ok_or_else(|| DiffractorError::ReadError {
                path: raw_path.to_string(),
                reason: "not found".to_string(),
            })
    }
}

fn config() -> EngineConfig {
    EngineConfig::new("old", "new")
}

fn sample() -> MemoryFs {
    MemoryFs::default()
        .with("old/a.html", "line1\nline2\n")
        .with("new/a.html", "line1\nCHANGED\n")
        .with("old/b.html", "line1\nline2\n")
        .with("new/b.html", "line1\nCHANGED\n")
        .with("old/same.html", "keep\n")
        .with("new/same.html", "keep\n")
        .with("old/gone.html", "bye\n")
        .with("new/fresh.html", "hi\n")
}

#[test]
fn test_identical_edit_in_two_files() {
    let fs = sample();

    let outcome = run_comparison(&config(), &fs, &fs).unwrap();

    assert_eq!(outcome.report.len(), 1);
    let entry = &outcome.report.clusters()[0];
    assert_eq!(entry.size(), 1);
    assert_eq!(entry.affected_file_count(), 2);
    assert_eq!(outcome.compared_files, 3);
    assert_eq!(
        outcome.added.iter().map(|p| p.as_str()).collect::<Vec<_>>(),
        vec!["fresh.html"]
    );
    assert_eq!(
        outcome.removed.iter().map(|p| p.as_str()).collect::<Vec<_>>(),
        vec!["gone.html"]
    );
    assert!(outcome.warnings.is_empty());
}

#[test]
fn test_rerun_produces_identical_report() {
    let fs = sample()
        .with("old/c.html", "<div class=\"card\">\n")
        .with("new/c.html", "<div class=\"card card--wide\">\n")
        .with("old/d.html", "<div class=\"card\">\n")
        .with("new/d.html", "<div class=\"card card--tall\">\n");

    let first = run_comparison(&config(), &fs, &fs).unwrap();
    let second = run_comparison(&config(), &fs, &fs).unwrap();

    assert_eq!(first.report, second.report);
    assert_ne!(first.run_id, second.run_id);
}

#[test]
fn test_unchanged_content_yields_empty_report() {
    let fs = MemoryFs::default()
        .with("old/a.html", "x\n")
        .with("new/a.html", "x\n");

    let outcome = run_comparison(&config(), &fs, &fs).unwrap();

    assert!(outcome.report.is_empty());
    assert_eq!(outcome.compared_files, 1);
}

#[test]
fn test_read_failure_aborts_run() {
    let mut fs = sample();
    fs.unreadable.push("new/b.html".to_string());

    let err = run_comparison(&config(), &fs, &fs).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::Read);
    assert_eq!(err.path(), Some("new/b.html"));
}

#[test]
fn test_list_failure_aborts_run() {
    let mut fs = sample();
    fs.unlistable.push("new".to_string());

    let err = run_comparison(&config(), &fs, &fs).unwrap_err();

    assert_eq!(err.code(), "ERR_LIST");
}

#[test]
fn test_duplicate_normalized_path_aborts_run() {
    let fs = sample().with("old/./a.html", "other\n");

    let err = run_comparison(&config(), &fs, &fs).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::DuplicatePath);
}

#[test]
fn test_binary_file_becomes_warning() {
    let fs = sample()
        .with("old/img.html", "GIF89a\0\0")
        .with("new/img.html", "GIF89a\0\x01");

    let outcome = run_comparison(&config(), &fs, &fs).unwrap();

    assert_eq!(outcome.warnings.len(), 1);
    let warning = &outcome.warnings[0];
    assert_eq!(warning.path.as_str(), "img.html");
    assert_eq!(warning.code, "ERR_DIFF_COMPUTATION");
    assert!(warning.message.contains("img.html"));
    assert_eq!(outcome.report.len(), 1);
    assert_eq!(outcome.compared_files, 3);
}

#[test]
fn test_binary_file_warning_is_logged_with_path() {
    let capture = init_test_capture();
    let fs = sample()
        .with("old/logged-binary.html", "\0a")
        .with("new/logged-binary.html", "\0b");

    run_comparison(&config(), &fs, &fs).unwrap();

    let warned = capture.count_events(|e| {
        e.level == tracing::Level::WARN
            && e.field(FIELD_FILE_PATH) == Some("logged-binary.html")
            && e.field(FIELD_ERR_CODE) == Some("ERR_DIFF_COMPUTATION")
    });
    assert_eq!(warned, 1);
}

#[test]
fn test_invalid_threshold_fails_before_listing() {
    let mut config = config();
    config.similarity_threshold = 7.0;
    let mut fs = sample();
    fs.unlistable.push("old".to_string());

    let err = run_comparison(&config, &fs, &fs).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::InvalidThreshold);
}

#[test]
fn test_run_logs_start_and_end_with_run_id() {
    let capture = init_test_capture();
    let fs = sample();

    let outcome = run_comparison(&config(), &fs, &fs).unwrap();

    let run_id = outcome.run_id.to_string();
    let ends: Vec<_> = capture
        .find("run_comparison", "end")
        .into_iter()
        .filter(|e| e.field(FIELD_RUN_ID) == Some(run_id.as_str()))
        .collect();
    assert_eq!(ends.len(), 1);
    assert_eq!(ends[0].field(FIELD_CLUSTER_COUNT), Some("1"));
    assert!(capture
        .find("run_comparison", "start")
        .iter()
        .any(|e| e.field(FIELD_RUN_ID) == Some(run_id.as_str())));
}

#[test]
fn test_outcome_serializes_to_json() {
    let fs = sample();

    let outcome = run_comparison(&config(), &fs, &fs).unwrap();
    let json = serde_json::to_value(&outcome).unwrap();

    assert_eq!(json["added"][0], "fresh.html");
    assert_eq!(json["report"]["clusters"][0]["affected_file_count"], 2);
    assert!(json["run_id"].is_string());
}
