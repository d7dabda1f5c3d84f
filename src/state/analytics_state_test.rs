use super::*;

fn live_row(id: i64, kind: &str, status: &str) -> LiveRow {
    serde_json::from_value(serde_json::json!({
        "id": id, "type": kind, "status": status, "updatedAt": "2026-08-30T10:00:00Z"
    }))
    .expect("live row")
}

fn issue_row(message: &str) -> IssueRow {
    serde_json::from_value(serde_json::json!({
        "ts": "2026-08-30T10:00:00Z", "type": "incident", "message": message, "count": 1
    }))
    .expect("issue row")
}

#[test]
fn push_live_prepends_and_replaces_same_entity() {
    let mut state = AnalyticsState::default();
    state.push_live(live_row(1, "ride", "accepted"));
    state.push_live(live_row(2, "ride", "accepted"));
    state.push_live(live_row(1, "ride", "picked_up"));

    assert_eq!(state.live.len(), 2);
    assert_eq!(state.live[0].id, 1);
    assert_eq!(state.live[0].status, "picked_up");
    assert_eq!(state.live[1].id, 2);
}

#[test]
fn same_id_different_kind_are_distinct_rows() {
    let mut state = AnalyticsState::default();
    state.push_live(live_row(1, "ride", "accepted"));
    state.push_live(live_row(1, "rental", "confirmed"));
    assert_eq!(state.live.len(), 2);
}

#[test]
fn live_rows_are_bounded() {
    let mut state = AnalyticsState::default();
    for i in 0..(LIVE_ROWS_MAX as i64 + 10) {
        state.push_live(live_row(i, "ride", "accepted"));
    }
    assert_eq!(state.live.len(), LIVE_ROWS_MAX);
    // Newest first.
    assert_eq!(state.live[0].id, LIVE_ROWS_MAX as i64 + 9);
}

#[test]
fn issues_are_bounded() {
    let mut state = AnalyticsState::default();
    for i in 0..(ISSUES_MAX + 5) {
        state.push_issue(issue_row(&format!("issue {i}")));
    }
    assert_eq!(state.issues.len(), ISSUES_MAX);
    assert_eq!(state.issues[0].message, format!("issue {}", ISSUES_MAX + 4));
}

#[test]
fn feed_status_labels() {
    assert_eq!(FeedStatus::Closed.label(), "offline");
    assert_eq!(FeedStatus::Connecting.label(), "connecting");
    assert_eq!(FeedStatus::Open.label(), "live");
}
