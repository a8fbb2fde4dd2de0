//! Route guard middleware for page requests.
//!
//! SYSTEM CONTEXT
//! ==============
//! Runs in front of every SSR page. It reads the `user` cookie the browser
//! client writes on sign-in, classifies the path through [`RoutePolicy`], and
//! either lets the request through or answers with a temporary redirect.
//!
//! A cookie that does not decode is treated as no session. Evaluation goes on
//! and a removal `Set-Cookie` rides on whatever response is produced, so the
//! next request starts clean.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use session::{RouteDecision, SESSION_KEY, SessionRecord};
use time::Duration;

use crate::state::AppState;

/// Session carried by the request cookie.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum CookieSession {
    Absent,
    Valid(SessionRecord),
    Malformed,
}

impl CookieSession {
    /// The jar percent-decodes values on extraction, so `raw` is already
    /// the record JSON.
    pub(crate) fn from_jar(jar: &CookieJar) -> Self {
        let Some(raw) = jar.get(SESSION_KEY).map(Cookie::value) else {
            return Self::Absent;
        };
        if raw.trim().is_empty() {
            return Self::Absent;
        }
        match SessionRecord::from_json(raw) {
            Ok(record) => Self::Valid(record),
            Err(e) => {
                tracing::warn!(error = %e, "discarding malformed session cookie");
                Self::Malformed
            }
        }
    }

    fn record(&self) -> Option<&SessionRecord> {
        match self {
            Self::Valid(record) => Some(record),
            _ => None,
        }
    }
}

/// Expired `user` cookie matching the attributes the client writes.
pub(crate) fn removal_cookie(secure: bool) -> Cookie<'static> {
    Cookie::build((SESSION_KEY, ""))
        .path("/")
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::ZERO)
        .build()
}

/// `from_fn_with_state` middleware enforcing the route policy.
pub async fn route_guard(State(state): State<AppState>, jar: CookieJar, request: Request, next: Next) -> Response {
    let path = request.uri().path().to_owned();
    if state.policy.is_excluded(&path) {
        return next.run(request).await;
    }

    let session = CookieSession::from_jar(&jar);
    let response = match state.policy.decide(&path, session.record()) {
        RouteDecision::Allow => next.run(request).await,
        RouteDecision::Redirect(target) => {
            tracing::debug!(%path, %target, "route guard redirect");
            Redirect::temporary(&target).into_response()
        }
    };

    if session == CookieSession::Malformed {
        let jar = CookieJar::new().add(removal_cookie(state.cookie_secure));
        return (jar, response).into_response();
    }
    response
}
