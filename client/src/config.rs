//! Build-time client configuration.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// API base URL used when `FOODFACTS_API_URL` is unset at build time.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api/v1";

/// Base URL of the remote API, without a trailing slash.
#[must_use]
pub fn api_base_url() -> String {
    normalize_base_url(option_env!("FOODFACTS_API_URL").unwrap_or(DEFAULT_API_URL))
}

pub(crate) fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return DEFAULT_API_URL.to_owned();
    }
    trimmed.to_owned()
}
