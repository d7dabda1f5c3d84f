//! Login, logout, and session restore on top of the HTTP client.
//!
//! SYSTEM CONTEXT
//! ==============
//! On page load the UI hydrates optimistically from the cached profile
//! snapshot, then `restore` revalidates against `users/me/` in the
//! background. Transient failures keep the cached session alive; only a
//! proven-dead refresh token logs the user out.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use serde_json::json;

use crate::net::http::{ApiError, ApiRequest, HttpClient, describe_error_body};
use crate::net::types::UserProfile;
use crate::util::storage::{SharedStore, load_json, save_json};

pub const PROFILE_KEY: &str = "user";

/// Outcome of a background session restore.
#[derive(Clone, Debug, PartialEq)]
pub enum RestoreOutcome {
    /// Fresh profile from the server; replace whatever was cached.
    Authenticated(UserProfile),
    /// Could not revalidate right now; the cached profile stays.
    KeepCached,
    /// The session is dead; cache and tokens are gone.
    Anonymous,
}

#[derive(Clone)]
pub struct SessionManager {
    http: HttpClient,
    store: SharedStore,
}

impl SessionManager {
    pub fn new(http: HttpClient, store: SharedStore) -> Self {
        Self { http, store }
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    pub fn cached_profile(&self) -> Option<UserProfile> {
        load_json(self.store.as_ref(), PROFILE_KEY)
    }

    fn cache_profile(&self, profile: &UserProfile) {
        save_json(self.store.as_ref(), PROFILE_KEY, profile);
    }

    fn drop_cached_profile(&self) {
        self.store.remove(PROFILE_KEY);
    }

    /// One `users/me/` attempt with the stored access token, no refresh.
    ///
    /// # Errors
    ///
    /// `NoToken` when no access token is stored, `Unauthorized` on a 401,
    /// `NetworkOrServer`/`MalformedResponse` otherwise.
    async fn fetch_me(&self) -> Result<UserProfile, ApiError> {
        if self.http.tokens().access().is_none() {
            return Err(ApiError::NoToken);
        }
        let resp = self.http.request_once(&ApiRequest::get("users/me/")).await?;
        if !resp.ok() {
            let fallback = format!("HTTP {}", resp.status);
            return Err(ApiError::NetworkOrServer(describe_error_body(&resp.body, &fallback)));
        }
        serde_json::from_value(resp.body).map_err(|e| ApiError::MalformedResponse(e.to_string()))
    }

    /// Revalidate the stored session.
    ///
    /// A 401 gets exactly one refresh attempt. A dead refresh token (or no
    /// tokens at all) ends the session; any other failure is treated as
    /// transient and keeps the cached profile.
    pub async fn restore(&self) -> RestoreOutcome {
        match self.fetch_me().await {
            Ok(profile) => {
                self.cache_profile(&profile);
                RestoreOutcome::Authenticated(profile)
            }
            Err(ApiError::NoToken) => {
                self.drop_cached_profile();
                RestoreOutcome::Anonymous
            }
            Err(ApiError::Unauthorized) => {
                if !self.http.refresh().await {
                    self.drop_cached_profile();
                    return RestoreOutcome::Anonymous;
                }
                match self.fetch_me().await {
                    Ok(profile) => {
                        self.cache_profile(&profile);
                        RestoreOutcome::Authenticated(profile)
                    }
                    Err(_) => RestoreOutcome::KeepCached,
                }
            }
            Err(_) => RestoreOutcome::KeepCached,
        }
    }

    /// Exchange credentials for a token pair, then best-effort load the
    /// profile. A failed profile load still counts as a successful login;
    /// the caller gets `None` and `restore` fills it in later.
    ///
    /// # Errors
    ///
    /// `InvalidCredentials` with the server's message on a rejected login,
    /// `MalformedResponse` when the token body is unusable.
    pub async fn login(&self, email: &str, password: &str) -> Result<Option<UserProfile>, ApiError> {
        let req = ApiRequest::post("token/", json!({ "email": email, "password": password }));
        let resp = self.http.request_unauthenticated(&req).await?;
        if !resp.ok() {
            return Err(ApiError::InvalidCredentials(describe_error_body(
                &resp.body,
                "Invalid credentials",
            )));
        }
        let access = resp
            .body
            .get("access")
            .and_then(serde_json::Value::as_str)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::MalformedResponse("token body without access".to_owned()))?;
        let refresh = resp
            .body
            .get("refresh")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("");
        self.http.tokens().set(access, Some(refresh));

        match self.fetch_me().await {
            Ok(profile) => {
                self.cache_profile(&profile);
                Ok(Some(profile))
            }
            Err(_) => {
                self.drop_cached_profile();
                Ok(None)
            }
        }
    }

    /// Drop tokens, cookie, and the cached profile.
    pub fn logout(&self) {
        self.http.tokens().clear();
        self.drop_cached_profile();
    }

    /// Refresh the access token through the shared single-flight gate.
    pub async fn refresh_access_token(&self) -> bool {
        self.http.refresh().await
    }
}

/// Hydrate the session signal from cache, then revalidate in the
/// background and apply the outcome.
#[cfg(feature = "hydrate")]
pub fn spawn_restore(
    manager: SessionManager,
    session: leptos::prelude::RwSignal<crate::state::session::SessionState>,
) {
    use leptos::prelude::Update;

    if let Some(cached) = manager.cached_profile() {
        session.update(|s| s.user = Some(cached));
    }
    leptos::task::spawn_local(async move {
        let outcome = manager.restore().await;
        session.update(|s| {
            match outcome {
                RestoreOutcome::Authenticated(profile) => s.user = Some(profile),
                RestoreOutcome::KeepCached => {}
                RestoreOutcome::Anonymous => s.user = None,
            }
            s.loading = false;
        });
    });
}
