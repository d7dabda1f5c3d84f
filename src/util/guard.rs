//! Edge-time route protection based on cookie presence.
//!
//! SYSTEM CONTEXT
//! ==============
//! This is the coarse gate evaluated before a protected page is served:
//! it only checks that the access-token cookie exists. Token validity is
//! the API's problem, and an expired-but-present token still passes here.
//! The render-time counterpart lives in `components::protected_route`.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

/// Route prefixes that require an access-token cookie.
pub const PROTECTED_PREFIXES: &[&str] = &["/dashboard", "/drivers"];

/// Whether `path` falls under one of the protected prefixes.
///
/// Matches on segment boundaries, so `/driversabc` is not protected.
pub fn is_protected_path(path: &str) -> bool {
    PROTECTED_PREFIXES.iter().any(|prefix| {
        path.strip_prefix(prefix)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    })
}

/// The redirect target for a request, if any.
pub fn edge_redirect(path: &str, has_access_cookie: bool) -> Option<&'static str> {
    if is_protected_path(path) && !has_access_cookie {
        Some("/login")
    } else {
        None
    }
}

/// Whether a `Cookie` header carries a non-empty value for `name`.
pub fn cookie_header_has(header: &str, name: &str) -> bool {
    header.split(';').any(|pair| {
        pair.trim()
            .strip_prefix(name)
            .and_then(|rest| rest.strip_prefix('='))
            .is_some_and(|value| !value.is_empty())
    })
}

/// Axum layer enforcing the cookie gate in front of protected paths.
#[cfg(feature = "ssr")]
pub async fn require_access_cookie(
    req: axum::extract::Request,
    next: axum::middleware::Next,
) -> axum::response::Response {
    use axum::response::{IntoResponse, Redirect};

    let has_cookie = req
        .headers()
        .get(axum::http::header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|header| cookie_header_has(header, crate::net::token::ACCESS_KEY));

    if let Some(target) = edge_redirect(req.uri().path(), has_cookie) {
        return Redirect::temporary(target).into_response();
    }
    next.run(req).await
}
