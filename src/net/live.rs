//! Reconnecting WebSocket client for the ops live feed.
//!
//! SYSTEM CONTEXT
//! ==============
//! The analytics page opens one socket to `<ws>/ws/ops/?token=<access>`
//! and folds its events into `AnalyticsState`. Drops reconnect with
//! exponential backoff, capped at 30s, and the retry counter resets on a
//! successful open. A `FeedHandle` cancels the loop on page teardown so a
//! stale loop never reconnects over a fresh one.
//!
//! Malformed or unknown events are ignored; one bad producer must not
//! take the dashboard down.

#[cfg(test)]
#[path = "live_test.rs"]
mod live_test;

use serde_json::Value;

use crate::net::types::{IssueRow, LiveRow};
use crate::state::analytics::AnalyticsState;

pub const BACKOFF_BASE_MS: u32 = 1_000;
pub const BACKOFF_CAP_MS: u32 = 30_000;

/// Delay before reconnect attempt `retry` (0-based).
pub fn backoff_delay_ms(retry: u32) -> u32 {
    BACKOFF_BASE_MS
        .saturating_mul(1_u32.checked_shl(retry.min(15)).unwrap_or(u32::MAX))
        .min(BACKOFF_CAP_MS)
}

/// A decoded feed event the dashboard reacts to.
#[derive(Clone, Debug, PartialEq)]
pub enum FeedEvent {
    /// A ride or rental changed status; update the live table in place.
    StatusChanged(LiveRow),
    /// A payment settled or failed; the aggregates need a REST reload.
    PaymentStatus,
    /// An operational issue to prepend to the issues table.
    Issue(IssueRow),
}

/// Decode one raw frame. `None` for unknown types and malformed JSON.
pub fn parse_feed_event(raw: &str) -> Option<FeedEvent> {
    let msg: Value = serde_json::from_str(raw).ok()?;
    let kind = msg.get("type").and_then(Value::as_str)?;
    match kind {
        "ride.status_changed" | "rental.status_changed" => {
            let mut payload = msg.get("payload").cloned().unwrap_or(Value::Null);
            // Producers omit the row kind; derive it from the event type.
            if let Some(map) = payload.as_object_mut() {
                map.entry("type").or_insert_with(|| {
                    Value::String(kind.split('.').next().unwrap_or("ride").to_owned())
                });
            }
            let row: LiveRow = serde_json::from_value(payload).ok()?;
            Some(FeedEvent::StatusChanged(row))
        }
        "payment.status" => Some(FeedEvent::PaymentStatus),
        "system.issue" => {
            let payload = msg.get("payload").unwrap_or(&msg);
            let row = IssueRow {
                ts: payload
                    .get("ts")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_owned(),
                kind: payload
                    .get("severity")
                    .and_then(Value::as_str)
                    .unwrap_or("issue")
                    .to_owned(),
                message: payload.get("message").and_then(Value::as_str)?.to_owned(),
                count: payload.get("count").and_then(Value::as_i64).unwrap_or(1),
            };
            Some(FeedEvent::Issue(row))
        }
        _ => None,
    }
}

/// Fold one event into the dashboard state. Returns true when the caller
/// should reload the REST aggregates.
pub fn apply_feed_event(state: &mut AnalyticsState, event: FeedEvent) -> bool {
    match event {
        FeedEvent::StatusChanged(row) => {
            state.push_live(row);
            false
        }
        FeedEvent::PaymentStatus => true,
        FeedEvent::Issue(row) => {
            state.push_issue(row);
            false
        }
    }
}

/// Cancels the feed loop it was returned from. Dropping the handle
/// without `close` leaves the loop running.
#[derive(Clone)]
pub struct FeedHandle {
    generation: std::sync::Arc<std::sync::atomic::AtomicU64>,
    mine: u64,
}

impl FeedHandle {
    fn new() -> Self {
        Self {
            generation: std::sync::Arc::new(std::sync::atomic::AtomicU64::new(0)),
            mine: 0,
        }
    }

    /// Whether the loop this handle belongs to is still the live one.
    pub fn is_current(&self) -> bool {
        self.generation.load(std::sync::atomic::Ordering::SeqCst) == self.mine
    }

    /// Stop the loop: the socket closes on drop and no reconnect follows.
    pub fn close(&self) {
        self.generation
            .store(self.mine + 1, std::sync::atomic::Ordering::SeqCst);
    }
}

#[cfg(test)]
impl FeedHandle {
    pub(crate) fn for_tests() -> Self {
        Self::new()
    }
}

/// Open the ops feed and keep it open, folding events into `analytics`.
/// `on_reload` fires when aggregates went stale (payment events).
#[cfg(feature = "hydrate")]
pub fn spawn_feed(
    analytics: leptos::prelude::RwSignal<AnalyticsState>,
    tokens: crate::net::token::TokenStore,
    on_reload: leptos::prelude::Callback<()>,
) -> FeedHandle {
    let handle = FeedHandle::new();
    let loop_handle = handle.clone();
    leptos::task::spawn_local(async move {
        feed_loop(loop_handle, analytics, tokens, on_reload).await;
    });
    handle
}

#[cfg(feature = "hydrate")]
async fn feed_loop(
    handle: FeedHandle,
    analytics: leptos::prelude::RwSignal<AnalyticsState>,
    tokens: crate::net::token::TokenStore,
    on_reload: leptos::prelude::Callback<()>,
) {
    use futures::StreamExt;
    use gloo_net::websocket::{Message, futures::WebSocket};
    use leptos::logging::{log, warn};
    use leptos::prelude::{Callable, Update};

    use crate::state::analytics::FeedStatus;

    let mut retry: u32 = 0;
    loop {
        if !handle.is_current() {
            return;
        }
        let Some(access) = tokens.access() else {
            // No session, nothing to stream. The page respawns the feed
            // after login.
            analytics.update(|s| s.feed_status = FeedStatus::Closed);
            return;
        };
        analytics.update(|s| s.feed_status = FeedStatus::Connecting);

        let token = js_sys::encode_uri_component(&access);
        let url = format!("{}/ws/ops/?token={token}", crate::config::ws_base());
        match WebSocket::open(&url) {
            Ok(mut socket) => {
                log!("ops feed connected");
                analytics.update(|s| s.feed_status = FeedStatus::Open);
                retry = 0;
                while let Some(frame) = socket.next().await {
                    if !handle.is_current() {
                        return;
                    }
                    let Ok(Message::Text(text)) = frame else {
                        continue;
                    };
                    if let Some(event) = parse_feed_event(&text) {
                        let mut reload = false;
                        analytics.update(|s| reload = apply_feed_event(s, event));
                        if reload {
                            on_reload.run(());
                        }
                    }
                }
            }
            Err(e) => warn!("ops feed connect failed: {e:?}"),
        }

        if !handle.is_current() {
            return;
        }
        analytics.update(|s| s.feed_status = FeedStatus::Closed);
        let delay = backoff_delay_ms(retry);
        warn!("ops feed closed, reconnecting in {delay}ms");
        gloo_timers::future::TimeoutFuture::new(delay).await;
        retry = retry.saturating_add(1);
    }
}
