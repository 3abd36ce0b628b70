#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use gedcom_core::core_types::schema::{
    EVENT_END, EVENT_END_ERROR, EVENT_START, FIELD_COMPONENT, FIELD_DURATION_MS, FIELD_ERR_CODE,
    FIELD_ERR_KIND, FIELD_LINE_COUNT, FIELD_RECORD_COUNT,
};
use gedcom_core::errors::{ExError, ExErrorKind, GedcomError};
use gedcom_core::logging_facility::test_capture::init_test_capture;
use gedcom_core::{load_document, log_op_end, log_op_error, log_op_start, LoadOptions};

#[test]
fn test_log_op_start_macro() {
    let capture = init_test_capture();
    let op_name = "test_log_op_start_unique_1";

    log_op_start!(op_name);

    let events = capture.events();
    let start_events: Vec<_> = events
        .iter()
        .filter(|e| e.op.as_deref() == Some(op_name) && e.event.as_deref() == Some(EVENT_START))
        .collect();

    assert!(
        !start_events.is_empty(),
        "Should have captured at least one start event"
    );
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
    assert_eq!(end_events[0].field(FIELD_DURATION_MS), Some("42"));
}

#[test]
fn test_log_op_error_includes_code() {
    let capture = init_test_capture();
    let op_name = "test_log_op_error_unique_3";

    let err = GedcomError::RecordNotFound {
        xref: "N1".to_string(),
    };
    log_op_error!(op_name, err, duration_ms = 10);

    let error_events: Vec<_> = capture
        .events_for_op(op_name)
        .into_iter()
        .filter(|e| e.event.as_deref() == Some(EVENT_END_ERROR))
        .collect();

    assert_eq!(error_events.len(), 1, "Should have exactly one error event");
    assert_eq!(error_events[0].field(FIELD_ERR_CODE), Some("ERR_NOT_FOUND"));
    assert_eq!(error_events[0].field(FIELD_ERR_KIND), Some("NotFound"));
    assert!(error_events[0].field(FIELD_COMPONENT).is_some());
    assert_eq!(error_events[0].level, tracing::Level::ERROR);
}

#[test]
fn test_log_macros_with_multiple_fields() {
    let capture = init_test_capture();
    let op_name = "test_log_macros_fields_unique_4";

    log_op_start!(op_name, xref = "I7", line_count = 12);

    let events = capture.events_for_op(op_name);
    let start_event = events.first().expect("Should have start event");

    assert_eq!(start_event.xref.as_deref(), Some("I7"));
    assert_eq!(start_event.field(FIELD_LINE_COUNT), Some("12"));
}

#[test]
#[should_panic(expected = "Expected event")]
fn test_capture_assert_event_exists_fails() {
    let capture = init_test_capture();

    capture.assert_event_exists("nonexistent_op_truly_unique_999", EVENT_START);
}

#[test]
fn test_capture_count_events() {
    let capture = init_test_capture();
    let op1_name = "test_count_events_op1_unique_5";
    let op2_name = "test_count_events_op2_unique_5";

    log_op_start!(op1_name);
    log_op_start!(op2_name);
    log_op_end!(op1_name, duration_ms = 10);

    let ours = |e: &gedcom_core::logging_facility::test_capture::CapturedEvent| {
        e.op.as_deref() == Some(op1_name) || e.op.as_deref() == Some(op2_name)
    };
    let start_count = capture.count_events(|e| ours(e) && e.event.as_deref() == Some(EVENT_START));
    let end_count = capture.count_events(|e| ours(e) && e.event.as_deref() == Some(EVENT_END));

    assert_eq!(start_count, 2);
    assert_eq!(end_count, 1);
}

#[test]
fn test_load_document_emits_start_and_end() {
    let capture = init_test_capture();

    let text = "0 HEAD\n0 @N1@ NOTE logged load\n0 TRLR";
    load_document(text, LoadOptions::default()).unwrap();

    capture.assert_event_exists("load_document", EVENT_START);
    let ends = capture.count_events(|e| {
        e.op.as_deref() == Some("load_document")
            && e.event.as_deref() == Some(EVENT_END)
            && e.field(FIELD_RECORD_COUNT) == Some("1")
    });
    assert!(ends >= 1);
}

#[test]
fn test_load_failure_emits_error_event() {
    let capture = init_test_capture();

    let err = load_document("0 HEAD\nnot a line\n0 TRLR", LoadOptions::default()).unwrap_err();
    let ex_err: ExError = err.into();
    assert_eq!(ex_err.kind(), ExErrorKind::MalformedLine);

    let errors = capture.count_events(|e| {
        e.op.as_deref() == Some("load_document")
            && e.event.as_deref() == Some(EVENT_END_ERROR)
            && e.field(FIELD_ERR_CODE) == Some("ERR_MALFORMED_LINE")
    });
    assert!(errors >= 1);
}

#[test]
fn test_merge_emits_remap_count() {
    let capture = init_test_capture();

    let mut target = common::sample_document();
    target.merge(common::sample_document()).unwrap();

    let merged = capture.count_events(|e| {
        e.op.as_deref() == Some("merge_documents")
            && e.event.as_deref() == Some(EVENT_END)
            && e.field("remapped") == Some("5")
    });
    assert!(merged >= 1);
}
