use super::*;
use crate::state::analytics::{FeedStatus, LIVE_ROWS_MAX};

#[test]
fn backoff_doubles_from_one_second_and_caps() {
    assert_eq!(backoff_delay_ms(0), 1_000);
    assert_eq!(backoff_delay_ms(1), 2_000);
    assert_eq!(backoff_delay_ms(2), 4_000);
    assert_eq!(backoff_delay_ms(3), 8_000);
    assert_eq!(backoff_delay_ms(4), 16_000);
    assert_eq!(backoff_delay_ms(5), 30_000);
    assert_eq!(backoff_delay_ms(20), 30_000);
}

#[test]
fn ride_status_event_parses_with_derived_kind() {
    let raw = r#"{"type":"ride.status_changed","payload":{
        "id": 12, "status": "picked_up", "city": "Libreville",
        "amount": "2500", "updatedAt": "2026-08-30T10:00:00Z"}}"#;
    let event = parse_feed_event(raw).expect("event");
    match event {
        FeedEvent::StatusChanged(row) => {
            assert_eq!(row.id, 12);
            assert_eq!(row.kind, "ride");
            assert_eq!(row.status, "picked_up");
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[test]
fn rental_status_event_keeps_explicit_kind() {
    let raw = r#"{"type":"rental.status_changed","payload":{
        "id": 3, "type": "rental", "status": "confirmed", "updatedAt": ""}}"#;
    match parse_feed_event(raw).expect("event") {
        FeedEvent::StatusChanged(row) => assert_eq!(row.kind, "rental"),
        other => panic!("unexpected event: {other:?}"),
    }
}

#[test]
fn payment_event_requests_a_reload() {
    let event = parse_feed_event(r#"{"type":"payment.status","payload":{"id":9}}"#).expect("event");
    assert_eq!(event, FeedEvent::PaymentStatus);

    let mut state = AnalyticsState::default();
    assert!(apply_feed_event(&mut state, event));
    assert!(state.live.is_empty());
}

#[test]
fn issue_event_defaults_severity_and_count() {
    let raw = r#"{"type":"system.issue","payload":{"message":"GPS drift in zone 4"}}"#;
    match parse_feed_event(raw).expect("event") {
        FeedEvent::Issue(row) => {
            assert_eq!(row.kind, "issue");
            assert_eq!(row.message, "GPS drift in zone 4");
            assert_eq!(row.count, 1);
        }
        other => panic!("unexpected event: {other:?}"),
    }
}

#[test]
fn issue_event_without_message_is_dropped() {
    assert_eq!(parse_feed_event(r#"{"type":"system.issue","payload":{"severity":"warn"}}"#), None);
}

#[test]
fn unknown_and_malformed_frames_are_ignored() {
    assert_eq!(parse_feed_event(r#"{"type":"driver.located","payload":{}}"#), None);
    assert_eq!(parse_feed_event("not json at all"), None);
    assert_eq!(parse_feed_event(r#"{"payload":{}}"#), None);
    assert_eq!(parse_feed_event(r#"{"type":"ride.status_changed"}"#), None);
}

#[test]
fn status_events_fold_into_bounded_live_list() {
    let mut state = AnalyticsState::default();
    for i in 0..(LIVE_ROWS_MAX as i64 + 5) {
        let raw = format!(
            r#"{{"type":"ride.status_changed","payload":{{"id":{i},"status":"accepted","updatedAt":""}}}}"#
        );
        let event = parse_feed_event(&raw).expect("event");
        assert!(!apply_feed_event(&mut state, event));
    }
    assert_eq!(state.live.len(), LIVE_ROWS_MAX);
    assert_eq!(state.feed_status, FeedStatus::Closed);
}

#[test]
fn closed_handle_is_no_longer_current() {
    let handle = FeedHandle::for_tests();
    assert!(handle.is_current());
    let page_copy = handle.clone();
    page_copy.close();
    assert!(!handle.is_current());
}
