//! Hard browser navigation for post-auth transitions.

/// Navigate by setting `window.location`, dropping all in-memory state.
///
/// Used after login/logout where a full reload is the simplest way to
/// guarantee page state matches the new session.
pub fn redirect(path: &str) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(path);
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = path;
    }
}
