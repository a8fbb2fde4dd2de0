//! Server configuration parsed from environment variables.
//!
//! Every value has a default, so a bare `cargo leptos serve` works. Route
//! classes can be overridden with comma-separated prefix lists.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use session::RoutePolicy;

pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid PORT {0:?}: expected an integer in 1..=65535")]
    InvalidPort(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub policy: RoutePolicy,
    pub cookie_secure: bool,
}

impl ServerConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `GUARD_PROTECTED_PREFIXES`: default `/dashboard,/profile`
    /// - `GUARD_ADMIN_PREFIXES`: default `/dashboard`
    /// - `GUARD_AUTH_PREFIXES`: default `/login,/register`
    /// - `GUARD_EXCLUDED_PREFIXES`: default `/pkg,/api,/favicon.ico`
    /// - `COOKIE_SECURE`: default false
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPort`] when `PORT` is set but unusable.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = parse_port(std::env::var("PORT").ok().as_deref())?;

        let mut policy = RoutePolicy::default();
        if let Some(prefixes) = env_list("GUARD_PROTECTED_PREFIXES") {
            policy = policy.with_protected(prefixes);
        }
        if let Some(prefixes) = env_list("GUARD_ADMIN_PREFIXES") {
            policy = policy.with_admin_only(prefixes);
        }
        if let Some(prefixes) = env_list("GUARD_AUTH_PREFIXES") {
            policy = policy.with_auth_only(prefixes);
        }
        if let Some(prefixes) = env_list("GUARD_EXCLUDED_PREFIXES") {
            policy = policy.with_excluded(prefixes);
        }

        let cookie_secure = env_bool("COOKIE_SECURE").unwrap_or(false);
        Ok(Self { port, policy, cookie_secure })
    }
}

pub(crate) fn parse_port(raw: Option<&str>) -> Result<u16, ConfigError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(DEFAULT_PORT),
        Some(value) => match value.parse::<u16>() {
            Ok(port) if port > 0 => Ok(port),
            _ => Err(ConfigError::InvalidPort(value.to_owned())),
        },
    }
}

pub(crate) fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key)
        .ok()
        .and_then(|raw| match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        })
}

/// Comma-separated list; `None` when unset or containing no entries.
pub(crate) fn env_list(key: &str) -> Option<Vec<String>> {
    let raw = std::env::var(key).ok()?;
    let items: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect();
    (!items.is_empty()).then_some(items)
}
