//! Access/refresh token persistence with a cookie mirror.
//!
//! SYSTEM CONTEXT
//! ==============
//! Tokens live redundantly in local storage (both tokens) and in a cookie
//! (access token only) so the edge guard can gate protected paths without
//! touching storage. Every write keeps the two in sync; a missing access
//! token means "logged out" for the UI.

#[cfg(test)]
#[path = "token_test.rs"]
mod token_test;

use crate::util::cookies::{self, SharedJar};
use crate::util::storage::{self, SharedStore};

pub const ACCESS_KEY: &str = "access_token";
pub const REFRESH_KEY: &str = "refresh_token";
pub const COOKIE_MAX_AGE_SECS: u32 = 3600;

#[derive(Clone)]
pub struct TokenStore {
    store: SharedStore,
    cookies: SharedJar,
}

impl TokenStore {
    pub fn new(store: SharedStore, cookies: SharedJar) -> Self {
        Self { store, cookies }
    }

    /// Store backed by the current platform (localStorage + document
    /// cookies in the browser, in-memory elsewhere).
    pub fn platform() -> Self {
        Self::new(storage::platform_store(), cookies::platform_jar())
    }

    pub fn access(&self) -> Option<String> {
        self.store.get(ACCESS_KEY)
    }

    pub fn refresh(&self) -> Option<String> {
        self.store.get(REFRESH_KEY)
    }

    /// Persist an access token, mirroring it into the edge cookie.
    ///
    /// `refresh` of `None` leaves the stored refresh token untouched;
    /// `Some("")` removes it; a non-empty value replaces it.
    pub fn set(&self, access: &str, refresh: Option<&str>) {
        if access.is_empty() {
            return;
        }
        self.store.set(ACCESS_KEY, access);
        self.cookies.set(ACCESS_KEY, access, COOKIE_MAX_AGE_SECS);
        match refresh {
            None => {}
            Some("") => self.store.remove(REFRESH_KEY),
            Some(token) => self.store.set(REFRESH_KEY, token),
        }
    }

    /// Drop both tokens and the edge cookie.
    pub fn clear(&self) {
        self.store.remove(ACCESS_KEY);
        self.store.remove(REFRESH_KEY);
        self.cookies.clear(ACCESS_KEY);
    }
}
