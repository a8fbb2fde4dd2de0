//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into the route guard via `from_fn_with_state`. It
//! is immutable after startup; the guard never calls the remote API.

use std::sync::Arc;

use session::RoutePolicy;

use crate::config::ServerConfig;

#[derive(Clone, Debug)]
pub struct AppState {
    pub policy: Arc<RoutePolicy>,
    /// `Secure` attribute on cookies the server emits.
    pub cookie_secure: bool,
}

impl AppState {
    #[must_use]
    pub fn new(policy: RoutePolicy, cookie_secure: bool) -> Self {
        Self { policy: Arc::new(policy), cookie_secure }
    }

    #[must_use]
    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(config.policy.clone(), config.cookie_secure)
    }
}
