#![allow(clippy::unwrap_used, clippy::expect_used)]

use diffractor_core::errors::{DiffractorError, ExError, ExErrorKind};
use diffractor_core::logging_facility::test_capture::init_test_capture;
use diffractor_core::{log_op_end, log_op_error, log_op_start};
use diffractor_core_types::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_DURATION_MS, FIELD_ERR_CODE, FIELD_ERR_KIND,
    FIELD_FILE_COUNT, FIELD_RUN_ID,
};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name);

    capture.assert_event_exists(op_name, EVENT_START);
}

#[test]
fn test_log_op_start_with_fields() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_fields_unique_2";

    log_op_start!(op_name, run_id = "run-42", file_count = 3u64);

    let events = capture.find(op_name, EVENT_START);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].field(FIELD_RUN_ID), Some("run-42"));
    assert_eq!(events[0].field(FIELD_FILE_COUNT), Some("3"));
}

#[test]
fn test_log_op_end_records_duration() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_3";

    log_op_end!(op_name, duration_ms = 42u64);

    let events = capture.find(op_name, EVENT_END);
    assert_eq!(events.len(), 1, "Should have exactly one end event");
    assert_eq!(events[0].field(FIELD_DURATION_MS), Some("42"));
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_4";

    let err = DiffractorError::ListError {
        root: "/missing".to_string(),
        reason: "not found".to_string(),
    };
    log_op_error!(op_name, err, duration_ms = 10u64);

    let events = capture.find(op_name, EVENT_END_ERROR);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].field(FIELD_ERR_CODE), Some("ERR_LIST"));
    assert_eq!(events[0].field(FIELD_ERR_KIND), Some("List"));
    assert_eq!(events[0].level, tracing::Level::ERROR);
}

#[test]
fn test_log_op_error_accepts_ex_error() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_ex_unique_5";

    let err = ExError::new(ExErrorKind::Config).with_message("bad threshold");
    log_op_error!(op_name, err, duration_ms = 1u64);

    let count = capture.count_events(|e| {
        e.op.as_deref() == Some(op_name) && e.field(FIELD_ERR_CODE) == Some("ERR_CONFIG")
    });
    assert_eq!(count, 1);
}

#[test]
fn test_component_is_module_path() {
    let capture = init_test_capture();
    let op_name = "test_component_unique_6";

    log_op_start!(op_name);

    let events = capture.find(op_name, EVENT_START);
    assert_eq!(
        events[0].component.as_deref(),
        Some("logging_facility_tests")
    );
}
