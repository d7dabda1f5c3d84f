use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use futures::executor::block_on;
use futures::future::LocalBoxFuture;
use serde_json::{Value, json};

use super::*;
use crate::net::http::{ApiResponse, Transport};
use crate::net::token::TokenStore;
use crate::util::cookies::MemoryCookies;
use crate::util::storage::{KeyValueStore, MemoryStore};

/// Answers each path from a scripted queue, in order.
#[derive(Default)]
struct ScriptedTransport {
    scripts: Mutex<Vec<(&'static str, VecDeque<(u16, Value)>)>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn script(self: &Arc<Self>, suffix: &'static str, responses: Vec<(u16, Value)>) -> Arc<Self> {
        self.scripts.lock().unwrap().push((suffix, responses.into()));
        self.clone()
    }

    fn calls_to(&self, suffix: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|p| p.ends_with(suffix)).count()
    }
}

impl Transport for ScriptedTransport {
    fn send(
        &self,
        req: ApiRequest,
        _bearer: Option<String>,
    ) -> LocalBoxFuture<'static, Result<ApiResponse, ApiError>> {
        self.calls.lock().unwrap().push(req.path.clone());
        let next = self
            .scripts
            .lock()
            .unwrap()
            .iter_mut()
            .find(|(suffix, _)| req.path.ends_with(suffix))
            .and_then(|(_, queue)| queue.pop_front());
        Box::pin(async move {
            match next {
                Some((status, body)) => Ok(ApiResponse { status, body }),
                None => Err(ApiError::NetworkOrServer("connection refused".to_owned())),
            }
        })
    }
}

fn profile_body(email: &str) -> Value {
    json!({ "id": 1, "email": email, "first_name": "Ada", "user_type": "manager_staff" })
}

fn manager_with(transport: Arc<ScriptedTransport>) -> (SessionManager, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let tokens = TokenStore::new(store.clone(), Arc::new(MemoryCookies::new()));
    let http = HttpClient::new("http://api.test/api", tokens, transport);
    (SessionManager::new(http, store.clone()), store)
}

#[test]
fn restore_with_valid_token_authenticates_and_caches() {
    let transport = ScriptedTransport::new().script("users/me/", vec![(200, profile_body("ops@blaze.app"))]);
    let (manager, store) = manager_with(transport);
    manager.http().tokens().set("acc", Some("ref"));

    let outcome = block_on(manager.restore());

    match outcome {
        RestoreOutcome::Authenticated(profile) => assert_eq!(profile.email, "ops@blaze.app"),
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert!(store.get(PROFILE_KEY).is_some());
}

#[test]
fn restore_without_tokens_is_anonymous_and_drops_cache() {
    let transport = ScriptedTransport::new();
    let (manager, store) = manager_with(transport.clone());
    store.set(PROFILE_KEY, r#"{"id":1,"email":"stale@blaze.app"}"#);

    assert_eq!(block_on(manager.restore()), RestoreOutcome::Anonymous);
    assert_eq!(store.get(PROFILE_KEY), None);
    assert_eq!(transport.calls_to("users/me/"), 0);
}

#[test]
fn restore_refreshes_once_then_retries_me() {
    let transport = ScriptedTransport::new()
        .script("users/me/", vec![(401, Value::Null), (200, profile_body("ops@blaze.app"))])
        .script("token/refresh/", vec![(200, json!({ "access": "fresh" }))]);
    let (manager, _store) = manager_with(transport.clone());
    manager.http().tokens().set("stale", Some("ref"));

    let outcome = block_on(manager.restore());

    assert!(matches!(outcome, RestoreOutcome::Authenticated(_)));
    assert_eq!(transport.calls_to("token/refresh/"), 1);
    assert_eq!(transport.calls_to("users/me/"), 2);
    assert_eq!(manager.http().tokens().access(), Some("fresh".to_owned()));
}

#[test]
fn restore_with_dead_refresh_token_goes_anonymous() {
    let transport = ScriptedTransport::new()
        .script("users/me/", vec![(401, Value::Null)])
        .script("token/refresh/", vec![(401, json!({ "detail": "expired" }))]);
    let (manager, store) = manager_with(transport);
    manager.http().tokens().set("stale", Some("dead"));
    store.set(PROFILE_KEY, r#"{"id":1,"email":"stale@blaze.app"}"#);

    assert_eq!(block_on(manager.restore()), RestoreOutcome::Anonymous);
    assert_eq!(store.get(PROFILE_KEY), None);
    assert_eq!(manager.http().tokens().access(), None);
}

#[test]
fn restore_keeps_cache_when_retried_me_fails() {
    // Refresh works but the retried profile fetch hits a server error.
    let transport = ScriptedTransport::new()
        .script("users/me/", vec![(401, Value::Null), (500, json!({ "detail": "boom" }))])
        .script("token/refresh/", vec![(200, json!({ "access": "fresh" }))]);
    let (manager, store) = manager_with(transport);
    manager.http().tokens().set("stale", Some("ref"));
    store.set(PROFILE_KEY, r#"{"id":1,"email":"cached@blaze.app"}"#);

    assert_eq!(block_on(manager.restore()), RestoreOutcome::KeepCached);
    assert!(store.get(PROFILE_KEY).is_some());
}

#[test]
fn restore_keeps_cache_on_transient_server_errors() {
    let transport = ScriptedTransport::new().script("users/me/", vec![(503, Value::Null)]);
    let (manager, store) = manager_with(transport);
    manager.http().tokens().set("acc", Some("ref"));
    store.set(PROFILE_KEY, r#"{"id":1,"email":"cached@blaze.app"}"#);

    assert_eq!(block_on(manager.restore()), RestoreOutcome::KeepCached);
    assert!(store.get(PROFILE_KEY).is_some());
}

#[test]
fn login_stores_tokens_and_profile() {
    let transport = ScriptedTransport::new()
        .script("token/", vec![(200, json!({ "access": "acc-1", "refresh": "ref-1" }))])
        .script("users/me/", vec![(200, profile_body("ops@blaze.app"))]);
    let (manager, store) = manager_with(transport);

    let profile = block_on(manager.login("ops@blaze.app", "hunter2")).expect("login");

    assert_eq!(profile.expect("profile").email, "ops@blaze.app");
    assert_eq!(manager.http().tokens().access(), Some("acc-1".to_owned()));
    assert_eq!(manager.http().tokens().refresh(), Some("ref-1".to_owned()));
    assert!(store.get(PROFILE_KEY).is_some());
}

#[test]
fn login_with_bad_credentials_reports_server_message() {
    let transport = ScriptedTransport::new().script(
        "token/",
        vec![(401, json!({ "detail": "No active account found" }))],
    );
    let (manager, _store) = manager_with(transport);

    let err = block_on(manager.login("x@blaze.app", "wrong")).expect_err("rejected");
    assert_eq!(err, ApiError::InvalidCredentials("No active account found".to_owned()));
    assert_eq!(manager.http().tokens().access(), None);
}

#[test]
fn login_succeeds_even_when_profile_fetch_fails() {
    let transport = ScriptedTransport::new()
        .script("token/", vec![(200, json!({ "access": "acc-1", "refresh": "ref-1" }))])
        .script("users/me/", vec![(503, Value::Null)]);
    let (manager, store) = manager_with(transport);

    let profile = block_on(manager.login("ops@blaze.app", "hunter2")).expect("login");

    assert_eq!(profile, None);
    assert_eq!(manager.http().tokens().access(), Some("acc-1".to_owned()));
    assert_eq!(store.get(PROFILE_KEY), None);
}

#[test]
fn login_without_access_token_is_malformed() {
    let transport = ScriptedTransport::new().script("token/", vec![(200, json!({ "refresh": "only" }))]);
    let (manager, _store) = manager_with(transport);

    let err = block_on(manager.login("x@blaze.app", "pw")).expect_err("malformed");
    assert!(matches!(err, ApiError::MalformedResponse(_)));
}

#[test]
fn logout_clears_tokens_and_cache() {
    let transport = ScriptedTransport::new();
    let (manager, store) = manager_with(transport);
    manager.http().tokens().set("acc", Some("ref"));
    store.set(PROFILE_KEY, r#"{"id":1,"email":"x@blaze.app"}"#);

    manager.logout();

    assert_eq!(manager.http().tokens().access(), None);
    assert_eq!(manager.http().tokens().refresh(), None);
    assert_eq!(store.get(PROFILE_KEY), None);
}
