//! Authenticated request wrapper for the remote REST API.
//!
//! Every resource call in `net::resources` goes through [`ApiClient`], which
//! attaches the bearer token from the [`SessionStore`] and turns raw
//! responses into typed results.
//!
//! ERROR HANDLING
//! ==============
//! A 401 on an authenticated request is a forced logout: the store is
//! cleared, [`SessionEvent::ForcedLogout`] is published so the auth context
//! settles to anonymous, and the browser goes to the sign-in page unless it is
//! already there. The caller still gets [`ApiError::SessionExpired`] to show.
//! Nothing is retried.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use session::RoutePolicy;

use super::transport::{HttpRequest, HttpResponse, HttpTransport, Method};
use crate::state::events::{SessionEvent, SessionEvents};
use crate::util::session_store::SessionStore;

pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired. Please login again.";

/// Failure of an API call.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The bearer token was rejected; the session has been dropped.
    #[error("Session expired. Please login again.")]
    SessionExpired,
    /// Non-2xx response other than a forced logout.
    #[error("{message}")]
    Status { status: u16, message: String },
    /// No response was received.
    #[error("request failed: {0}")]
    Transport(String),
    /// A 2xx body did not match the expected shape.
    #[error("invalid response body: {0}")]
    Decode(String),
    /// Called outside the browser.
    #[error("not available on server")]
    Unavailable,
}

impl ApiError {
    /// HTTP status carried by the error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::SessionExpired => Some(401),
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Message for a failed response: the body's `message` field when present,
/// otherwise a generic status line.
pub(crate) fn error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_owned))
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| format!("HTTP error! status: {status}"))
}

pub(crate) fn bearer_header(token: &str) -> String {
    format!("Bearer {token}")
}

/// Parse a 2xx body. An empty body reads as JSON `null`.
pub(crate) fn parse_body<R: DeserializeOwned>(body: &str) -> Result<R, ApiError> {
    if body.trim().is_empty() {
        return serde_json::from_value(serde_json::Value::Null).map_err(|e| ApiError::Decode(e.to_string()));
    }
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

// =============================================================================
// NAVIGATION
// =============================================================================

/// Full-page navigation, so the server-side route guard sees the new state.
pub trait Navigator: Send + Sync {
    fn current_path(&self) -> String;
    fn navigate(&self, path: &str);
}

/// `window.location` navigator.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn current_path(&self) -> String {
        #[cfg(feature = "hydrate")]
        {
            web_sys::window()
                .and_then(|w| w.location().pathname().ok())
                .unwrap_or_default()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            String::new()
        }
    }

    fn navigate(&self, path: &str) {
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
}

// =============================================================================
// CLIENT
// =============================================================================

/// Remote API client. Cheap to clone; clones share transport and session.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    transport: Arc<dyn HttpTransport>,
    store: SessionStore,
    events: SessionEvents,
    navigator: Arc<dyn Navigator>,
    policy: RoutePolicy,
}

impl ApiClient {
    #[must_use]
    pub fn new(
        base_url: &str,
        transport: Arc<dyn HttpTransport>,
        store: SessionStore,
        events: SessionEvents,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            transport,
            store,
            events,
            navigator,
            policy: RoutePolicy::default(),
        }
    }

    /// Use `policy` to locate the sign-in page.
    #[must_use]
    pub fn with_policy(mut self, policy: RoutePolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Request without credentials (sign-in, sign-up).
    pub(crate) async fn send_public<R, B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<R, ApiError>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let resp = self.dispatch(method, path, body, false).await?;
        self.handle_response(path, &resp, false)
    }

    /// Request carrying the bearer token of the current session.
    pub(crate) async fn send_authed<R, B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<R, ApiError>
    where
        R: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let resp = self.dispatch(method, path, body, true).await?;
        self.handle_response(path, &resp, true)
    }

    /// Authenticated request with no body.
    pub(crate) async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        self.send_authed::<R, ()>(Method::Get, path, None).await
    }

    async fn dispatch<B>(&self, method: Method, path: &str, body: Option<&B>, authed: bool) -> Result<HttpResponse, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let mut headers = vec![("Content-Type".to_owned(), "application/json".to_owned())];
        if authed {
            if let Some(token) = self.store.token() {
                headers.push(("Authorization".to_owned(), bearer_header(&token)));
            }
        }
        let body = body
            .map(serde_json::to_value)
            .transpose()
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        let request = HttpRequest { method, url: self.endpoint(path), headers, body };
        self.transport.send(request).await
    }

    fn handle_response<R: DeserializeOwned>(&self, path: &str, resp: &HttpResponse, authed: bool) -> Result<R, ApiError> {
        if resp.is_success() {
            return parse_body(&resp.body);
        }
        if resp.status == 401 && authed {
            self.force_logout(path);
            return Err(ApiError::SessionExpired);
        }
        Err(ApiError::Status { status: resp.status, message: error_message(resp.status, &resp.body) })
    }

    fn force_logout(&self, path: &str) {
        self.store.clear();
        self.events.publish(&SessionEvent::ForcedLogout { path: path.to_owned() });
        let current = self.navigator.current_path();
        if self.policy.is_sign_in_path(&current) {
            leptos::logging::log!("api: 401 on sign-in page, not redirecting");
            return;
        }
        self.navigator.navigate(self.policy.sign_in_path());
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient").field("base_url", &self.base_url).finish_non_exhaustive()
    }
}
