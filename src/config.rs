//! Build-time endpoints for the external Blaze API.
//!
//! SYSTEM CONTEXT
//! ==============
//! The dashboard is a thin client over a REST+JWT backend and a websocket
//! feed. Both base URLs come from the build environment with localhost
//! defaults, normalized so path joins never double a slash.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

const DEFAULT_API_BASE: &str = "http://localhost:8000/api";
const DEFAULT_WS_BASE: &str = "ws://localhost:8000";

/// REST base URL, e.g. `http://localhost:8000/api`.
pub fn api_base() -> String {
    normalize_base(option_env!("BLAZE_API_BASE").unwrap_or(DEFAULT_API_BASE))
}

/// WebSocket base URL, e.g. `ws://localhost:8000`.
pub fn ws_base() -> String {
    normalize_base(option_env!("BLAZE_WS_BASE").unwrap_or(DEFAULT_WS_BASE))
}

pub(crate) fn normalize_base(raw: &str) -> String {
    raw.trim_end_matches('/').to_owned()
}
