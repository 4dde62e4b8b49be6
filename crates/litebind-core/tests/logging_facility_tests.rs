#![allow(clippy::unwrap_used, clippy::expect_used)]

use litebind_core::errors::LitebindError;
use litebind_core::guard::DeferredAction;
use litebind_core::logging_facility::test_capture::init_test_capture;
use litebind_core::{log_op_aborted, log_op_end, log_op_error, log_op_start};
use litebind_core_types::schema::{
    EVENT_ABORTED, EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_DURATION_MS, FIELD_ERR_CODE,
    FIELD_ERR_KIND,
};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name);

    let start_events = capture.count_events(|e| {
        e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_START)
    });
    assert_eq!(start_events, 1);
}

#[test]
fn test_log_op_end_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_end_unique_2";

    log_op_end!(op_name, duration_ms = 42);

    let end_events: Vec<_> = capture
        .events_for_op(op_name)
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END))
        .collect();

    assert_eq!(end_events.len(), 1, "Should have exactly one end event");
    assert_eq!(end_events[0].fields.get(FIELD_DURATION_MS), Some(&"42".to_string()));
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = LitebindError::NoRows {
        sql: "SELECT 1 WHERE 0".to_string(),
    };
    log_op_error!(op_name, err, duration_ms = 10);

    capture.assert_event_exists(op_name, EVENT_END_ERROR);

    let events = capture.events_for_op(op_name);
    assert_eq!(
        events[0].fields.get(FIELD_ERR_CODE),
        Some(&"ERR_NO_ROWS".to_string())
    );
    assert_eq!(
        events[0].fields.get(FIELD_ERR_KIND),
        Some(&"NoRows".to_string())
    );
}

#[test]
fn test_aborted_event_from_guard() {
    let capture = init_test_capture();
    let op_name = "test_aborted_from_guard_unique_4";

    {
        let _aborted = DeferredAction::new(|| log_op_aborted!(op_name, duration_ms = 0));
    }

    capture.assert_event_exists(op_name, EVENT_ABORTED);
}

#[test]
fn test_dismissed_guard_leaves_only_end() {
    let capture = init_test_capture();
    let op_name = "test_dismissed_guard_unique_5";

    {
        let mut aborted = DeferredAction::new(|| log_op_aborted!(op_name, duration_ms = 0));
        log_op_start!(op_name);
        aborted.dismiss();
        log_op_end!(op_name, duration_ms = 1);
    }

    let events: Vec<_> = capture
        .events_for_op(op_name)
        .into_iter()
        .filter_map(|e| e.event)
        .collect();
    assert_eq!(events, vec![EVENT_START.to_string(), EVENT_END.to_string()]);
}

#[test]
fn test_log_macros_with_extra_fields() {
    let capture = init_test_capture();
    let op_name = "test_extra_fields_unique_6";

    log_op_start!(op_name, sql = "SELECT 1");

    let events = capture.events_for_op(op_name);
    assert_eq!(events[0].fields.get("sql"), Some(&"SELECT 1".to_string()));
}
