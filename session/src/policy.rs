//! Static route classification and redirect decisions.
//!
//! SYSTEM CONTEXT
//! ==============
//! The server's route guard calls [`RoutePolicy::decide`] before rendering a
//! page; the client uses [`RoutePolicy::landing_for`] after sign-in and
//! [`RoutePolicy::is_sign_in_path`] to avoid redirect loops on forced logout.
//!
//! Matching is by path segment: `/profile` covers `/profile/favorites` but not
//! `/profiles`. Admin-only prefixes are always protected as well.

#[cfg(test)]
#[path = "policy_test.rs"]
mod policy_test;

use crate::record::SessionRecord;

/// Outcome of evaluating a request path against the policy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouteDecision {
    /// Render the page.
    Allow,
    /// Send the browser elsewhere.
    Redirect(String),
}

/// Path prefixes per route class plus the redirect targets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoutePolicy {
    protected: Vec<String>,
    admin_only: Vec<String>,
    auth_only: Vec<String>,
    excluded: Vec<String>,
    sign_in_path: String,
    public_landing: String,
    admin_landing: String,
}

impl Default for RoutePolicy {
    fn default() -> Self {
        Self {
            protected: vec!["/dashboard".to_owned(), "/profile".to_owned()],
            admin_only: vec!["/dashboard".to_owned()],
            auth_only: vec!["/login".to_owned(), "/register".to_owned()],
            excluded: vec!["/pkg".to_owned(), "/api".to_owned(), "/favicon.ico".to_owned()],
            sign_in_path: "/login".to_owned(),
            public_landing: "/".to_owned(),
            admin_landing: "/dashboard".to_owned(),
        }
    }
}

fn normalize_prefixes<I, S>(prefixes: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    prefixes
        .into_iter()
        .filter_map(|p| {
            let p = p.as_ref().trim();
            if p.is_empty() {
                return None;
            }
            let p = p.trim_end_matches('/');
            Some(if p.starts_with('/') { p.to_owned() } else { format!("/{p}") })
        })
        .collect()
}

/// Segment-aware prefix match. The root prefix `/` only matches `/` itself.
fn matches_prefix(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

impl RoutePolicy {
    /// Replace the protected prefixes. Admin-only prefixes stay protected.
    #[must_use]
    pub fn with_protected<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.protected = normalize_prefixes(prefixes);
        self
    }

    /// Replace the admin-only prefixes.
    #[must_use]
    pub fn with_admin_only<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.admin_only = normalize_prefixes(prefixes);
        self
    }

    /// Replace the auth-only (sign-in / registration) prefixes.
    #[must_use]
    pub fn with_auth_only<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.auth_only = normalize_prefixes(prefixes);
        self
    }

    /// Replace the prefixes the guard never looks at (assets, API proxies).
    #[must_use]
    pub fn with_excluded<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.excluded = normalize_prefixes(prefixes);
        self
    }

    #[must_use]
    pub fn sign_in_path(&self) -> &str {
        &self.sign_in_path
    }

    #[must_use]
    pub fn public_landing(&self) -> &str {
        &self.public_landing
    }

    #[must_use]
    pub fn admin_landing(&self) -> &str {
        &self.admin_landing
    }

    /// Paths the route guard lets through without reading the session.
    #[must_use]
    pub fn is_excluded(&self, path: &str) -> bool {
        self.excluded.iter().any(|p| matches_prefix(path, p))
    }

    #[must_use]
    pub fn is_auth_only(&self, path: &str) -> bool {
        self.auth_only.iter().any(|p| matches_prefix(path, p))
    }

    #[must_use]
    pub fn is_admin_only(&self, path: &str) -> bool {
        self.admin_only.iter().any(|p| matches_prefix(path, p))
    }

    /// Protected means any session is required; admin-only paths count too.
    #[must_use]
    pub fn is_protected(&self, path: &str) -> bool {
        self.is_admin_only(path) || self.protected.iter().any(|p| matches_prefix(path, p))
    }

    #[must_use]
    pub fn is_sign_in_path(&self, path: &str) -> bool {
        matches_prefix(path, &self.sign_in_path)
    }

    /// Where a freshly signed-in user belongs.
    #[must_use]
    pub fn landing_for(&self, record: &SessionRecord) -> &str {
        if record.is_admin() { &self.admin_landing } else { &self.public_landing }
    }

    /// Evaluate a request path against an optional cookie session.
    ///
    /// Order matters: auth-only redirect for signed-in users, then the
    /// sign-in redirect for protected paths, then the admin check. Excluded
    /// paths are the caller's to skip; see [`RoutePolicy::is_excluded`].
    #[must_use]
    pub fn decide(&self, path: &str, session: Option<&SessionRecord>) -> RouteDecision {
        if let Some(record) = session {
            if self.is_auth_only(path) {
                return RouteDecision::Redirect(self.landing_for(record).to_owned());
            }
        }
        if self.is_protected(path) {
            let Some(record) = session else {
                return RouteDecision::Redirect(self.sign_in_path.clone());
            };
            if self.is_admin_only(path) && !record.is_admin() {
                return RouteDecision::Redirect(self.public_landing.clone());
            }
        }
        RouteDecision::Allow
    }
}
