//! Authenticated HTTP client with single-flight token refresh.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every request carries `Authorization: Bearer <access>` when a token is
//! present. A 401 triggers the refresh-and-retry path; interleaved 401s
//! from concurrent calls collapse into exactly one network refresh, with
//! the other callers queued on oneshot channels until it resolves.
//!
//! ERROR HANDLING
//! ==============
//! `Unauthorized` only surfaces when the refresh itself fails or a
//! retried request 401s again. Transport is a trait so the whole path is
//! exercised with fakes off-wasm.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::sync::{Arc, Mutex};

use futures::channel::oneshot;
use futures::future::LocalBoxFuture;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::net::token::TokenStore;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("no access token available")]
    NoToken,
    #[error("unauthorized")]
    Unauthorized,
    #[error("{0}")]
    InvalidCredentials(String),
    #[error("{0}")]
    NetworkOrServer(String),
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

#[derive(Clone, Debug)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            query: Vec::new(),
            body: Some(body),
        }
    }

    pub fn patch(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Patch,
            path: path.into(),
            query: Vec::new(),
            body: Some(body),
        }
    }

    #[must_use]
    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Server-provided human message, when present.
    pub fn detail(&self) -> Option<&str> {
        self.body
            .get("detail")
            .and_then(Value::as_str)
            .or_else(|| self.body.get("message").and_then(Value::as_str))
    }
}

/// Render a DRF error body: `detail` wins, then per-field validation
/// messages joined one per line, then the fallback.
pub fn describe_error_body(body: &Value, fallback: &str) -> String {
    if let Some(text) = body.as_str() {
        return text.to_owned();
    }
    let Some(map) = body.as_object() else {
        return fallback.to_owned();
    };
    if let Some(detail) = map.get("detail").and_then(Value::as_str) {
        return detail.to_owned();
    }
    let mut lines = Vec::new();
    for (field, value) in map {
        match value {
            Value::String(msg) => lines.push(format!("{field}: {msg}")),
            Value::Array(msgs) => {
                let joined = msgs
                    .iter()
                    .filter_map(Value::as_str)
                    .collect::<Vec<_>>()
                    .join(", ");
                if !joined.is_empty() {
                    lines.push(format!("{field}: {joined}"));
                }
            }
            _ => {}
        }
    }
    if lines.is_empty() {
        fallback.to_owned()
    } else {
        lines.join("\n")
    }
}

/// One network hop. The future is `'static` so implementations clone what
/// they need up front.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        req: ApiRequest,
        bearer: Option<String>,
    ) -> LocalBoxFuture<'static, Result<ApiResponse, ApiError>>;
}

#[derive(Default)]
struct RefreshGate {
    in_flight: bool,
    waiters: Vec<oneshot::Sender<bool>>,
}

#[derive(Clone)]
pub struct HttpClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    base: String,
    tokens: TokenStore,
    transport: Arc<dyn Transport>,
    gate: Mutex<RefreshGate>,
}

impl HttpClient {
    pub fn new(base: impl Into<String>, tokens: TokenStore, transport: Arc<dyn Transport>) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                base: base.into(),
                tokens,
                transport,
                gate: Mutex::new(RefreshGate::default()),
            }),
        }
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.inner.tokens
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.inner.base, path.trim_start_matches('/'))
    }

    async fn send_raw(&self, req: &ApiRequest, bearer: Option<String>) -> Result<ApiResponse, ApiError> {
        let mut absolute = req.clone();
        absolute.path = self.url(&req.path);
        self.inner.transport.send(absolute, bearer).await
    }

    /// One attempt, bearer attached when an access token is stored.
    /// Requests without a token go out unauthenticated; the API rejects
    /// them itself.
    async fn send_once(&self, req: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let bearer = self.inner.tokens.access();
        self.send_raw(req, bearer).await
    }

    /// A single attempt with no retry path, classified: 401 becomes
    /// `Unauthorized`, other statuses pass through for the caller to
    /// inspect. Used where the caller owns refresh policy (session
    /// restore, login).
    pub async fn request_once(&self, req: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let resp = self.send_once(req).await?;
        if resp.status == 401 {
            return Err(ApiError::Unauthorized);
        }
        Ok(resp)
    }

    /// An unauthenticated attempt, regardless of stored tokens.
    pub async fn request_unauthenticated(&self, req: &ApiRequest) -> Result<ApiResponse, ApiError> {
        self.send_raw(req, None).await
    }

    /// Authenticated request with the transparent refresh-and-retry path.
    ///
    /// # Errors
    ///
    /// `Unauthorized` when the refresh fails or the retried request 401s
    /// again; transport failures propagate as `NetworkOrServer`.
    pub async fn request(&self, req: ApiRequest) -> Result<ApiResponse, ApiError> {
        let first = self.send_once(&req).await?;
        if first.status != 401 {
            return Ok(first);
        }
        if !self.refresh().await {
            return Err(ApiError::Unauthorized);
        }
        // One retry only. A second 401 propagates to the caller.
        let second = self.send_once(&req).await?;
        if second.status == 401 {
            return Err(ApiError::Unauthorized);
        }
        Ok(second)
    }

    /// `request` + 2xx check + JSON decode.
    ///
    /// # Errors
    ///
    /// Non-2xx bodies become `NetworkOrServer` with the server's detail
    /// text; undecodable bodies become `MalformedResponse`.
    pub async fn fetch_json<T: DeserializeOwned>(&self, req: ApiRequest) -> Result<T, ApiError> {
        let resp = self.request(req).await?;
        if !resp.ok() {
            let fallback = format!("HTTP {}", resp.status);
            return Err(ApiError::NetworkOrServer(describe_error_body(&resp.body, &fallback)));
        }
        serde_json::from_value(resp.body).map_err(|e| ApiError::MalformedResponse(e.to_string()))
    }

    /// Join or start the single in-flight refresh. At most one refresh
    /// network call exists system-wide; every other caller waits on a
    /// oneshot and is released with the shared outcome. Failure clears
    /// all tokens.
    pub async fn refresh(&self) -> bool {
        let waiter = {
            let mut gate = self.inner.gate.lock().unwrap();
            if gate.in_flight {
                let (tx, rx) = oneshot::channel();
                gate.waiters.push(tx);
                Some(rx)
            } else {
                gate.in_flight = true;
                None
            }
        };
        if let Some(rx) = waiter {
            return rx.await.unwrap_or(false);
        }

        let ok = self.refresh_once().await;
        if !ok {
            self.inner.tokens.clear();
        }
        let waiters = {
            let mut gate = self.inner.gate.lock().unwrap();
            gate.in_flight = false;
            std::mem::take(&mut gate.waiters)
        };
        for tx in waiters {
            let _ = tx.send(ok);
        }
        ok
    }

    /// The refresh network call itself: POST `token/refresh/` with the
    /// stored refresh token, unauthenticated. Success persists the new
    /// access token only; rotation of the refresh token is not assumed.
    async fn refresh_once(&self) -> bool {
        let Some(refresh) = self.inner.tokens.refresh() else {
            return false;
        };
        let req = ApiRequest::post("token/refresh/", serde_json::json!({ "refresh": refresh }));
        let Ok(resp) = self.send_raw(&req, None).await else {
            return false;
        };
        if !resp.ok() {
            return false;
        }
        match resp.body.get("access").and_then(Value::as_str) {
            Some(access) if !access.is_empty() => {
                self.inner.tokens.set(access, None);
                true
            }
            _ => false,
        }
    }
}

/// Browser transport over `gloo-net`.
#[cfg(feature = "hydrate")]
pub struct GlooTransport;

#[cfg(feature = "hydrate")]
impl Transport for GlooTransport {
    fn send(
        &self,
        req: ApiRequest,
        bearer: Option<String>,
    ) -> LocalBoxFuture<'static, Result<ApiResponse, ApiError>> {
        Box::pin(async move {
            use gloo_net::http::Request;

            let builder = match req.method {
                Method::Get => Request::get(&req.path),
                Method::Post => Request::post(&req.path),
                Method::Patch => Request::patch(&req.path),
                Method::Delete => Request::delete(&req.path),
            };
            let mut builder = builder
                .query(req.query.iter().map(|(k, v)| (k.as_str(), v.as_str())))
                .header("Accept", "application/json");
            if let Some(token) = bearer {
                builder = builder.header("Authorization", &format!("Bearer {token}"));
            }
            let request = match req.body {
                Some(body) => builder
                    .json(&body)
                    .map_err(|e| ApiError::NetworkOrServer(e.to_string()))?,
                None => builder
                    .build()
                    .map_err(|e| ApiError::NetworkOrServer(e.to_string()))?,
            };
            let resp = request
                .send()
                .await
                .map_err(|e| ApiError::NetworkOrServer(e.to_string()))?;
            let status = resp.status();
            // Bodies that are not JSON (204s, proxies) read as Null.
            let body = resp.json::<Value>().await.unwrap_or(Value::Null);
            Ok(ApiResponse { status, body })
        })
    }
}

/// Server-side stub; these endpoints are only meaningful in the browser.
#[cfg(not(feature = "hydrate"))]
pub struct NullTransport;

#[cfg(not(feature = "hydrate"))]
impl Transport for NullTransport {
    fn send(
        &self,
        _req: ApiRequest,
        _bearer: Option<String>,
    ) -> LocalBoxFuture<'static, Result<ApiResponse, ApiError>> {
        Box::pin(async { Err(ApiError::NetworkOrServer("not available on server".to_owned())) })
    }
}

/// The transport appropriate for the current build target.
pub fn platform_transport() -> Arc<dyn Transport> {
    #[cfg(feature = "hydrate")]
    {
        Arc::new(GlooTransport)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Arc::new(NullTransport)
    }
}
