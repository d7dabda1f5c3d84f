//! Cookie mirror for the access token.
//!
//! SYSTEM CONTEXT
//! ==============
//! The edge guard only sees cookies, so every access-token write must be
//! mirrored into `document.cookie`. Like storage, cookie writes are
//! fail-safe: a denied document never throws.

#[cfg(test)]
#[path = "cookies_test.rs"]
mod cookies_test;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Write-only cookie capability; reads happen at the edge, not here.
pub trait CookieJar: Send + Sync {
    fn set(&self, name: &str, value: &str, max_age_secs: u32);
    fn clear(&self, name: &str);
}

pub type SharedJar = Arc<dyn CookieJar>;

/// The `Set-Cookie`-style string for a write, lax same-site, path `/`.
pub(crate) fn format_set(name: &str, value: &str, max_age_secs: u32) -> String {
    format!("{name}={value}; path=/; max-age={max_age_secs}; SameSite=Lax")
}

/// The string that expires a cookie immediately.
pub(crate) fn format_clear(name: &str) -> String {
    format!("{name}=; path=/; max-age=0; SameSite=Lax")
}

#[cfg(feature = "hydrate")]
pub struct BrowserCookies;

#[cfg(feature = "hydrate")]
impl BrowserCookies {
    fn document() -> Option<web_sys::HtmlDocument> {
        use wasm_bindgen::JsCast;
        web_sys::window()?.document()?.dyn_into::<web_sys::HtmlDocument>().ok()
    }
}

#[cfg(feature = "hydrate")]
impl CookieJar for BrowserCookies {
    fn set(&self, name: &str, value: &str, max_age_secs: u32) {
        if let Some(document) = Self::document() {
            let _ = document.set_cookie(&format_set(name, value, max_age_secs));
        }
    }

    fn clear(&self, name: &str) {
        if let Some(document) = Self::document() {
            let _ = document.set_cookie(&format_clear(name));
        }
    }
}

/// In-memory jar used on the server and in tests.
#[derive(Default)]
pub struct MemoryCookies {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryCookies {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<String> {
        self.entries.lock().unwrap().get(name).cloned()
    }
}

impl CookieJar for MemoryCookies {
    fn set(&self, name: &str, value: &str, _max_age_secs: u32) {
        self.entries.lock().unwrap().insert(name.to_owned(), value.to_owned());
    }

    fn clear(&self, name: &str) {
        self.entries.lock().unwrap().remove(name);
    }
}

/// The jar appropriate for the current build target.
pub fn platform_jar() -> SharedJar {
    #[cfg(feature = "hydrate")]
    {
        Arc::new(BrowserCookies)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Arc::new(MemoryCookies::new())
    }
}
