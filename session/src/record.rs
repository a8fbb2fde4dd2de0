//! The signed-in user record and its persisted encodings.
//!
//! DESIGN
//! ======
//! The same record is written to two places: local storage as plain JSON and
//! the `user` cookie as percent-encoded JSON. Encoding the cookie keeps quotes,
//! commas and semicolons out of the raw header value. Readers of the cookie
//! get it through a cookie parser that undoes the encoding exactly once and
//! then call [`SessionRecord::from_json`].
//!
//! Admin markers come in two spellings from the backend. Records built from a
//! sign-in response carry only [`ADMIN_ROLE`]; [`is_admin_role`] still accepts
//! [`LEGACY_ADMIN_ROLE`] for records written before normalization.

#[cfg(test)]
#[path = "record_test.rs"]
mod record_test;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::SessionError;

/// Local storage key and cookie name holding the session record.
pub const SESSION_KEY: &str = "user";

/// Cookie lifetime: seven days.
pub const SESSION_COOKIE_MAX_AGE_SECS: i64 = 7 * 24 * 60 * 60;

/// Canonical admin marker.
pub const ADMIN_ROLE: &str = "ADMIN";

/// Prefixed admin marker still emitted by older backend builds.
pub const LEGACY_ADMIN_ROLE: &str = "ROLE_ADMIN";

/// Whether `role` grants dashboard access.
#[must_use]
pub fn is_admin_role(role: &str) -> bool {
    role == ADMIN_ROLE || role == LEGACY_ADMIN_ROLE
}

/// Trim a role string and fold the legacy admin spelling into [`ADMIN_ROLE`].
#[must_use]
pub fn normalize_role(role: &str) -> String {
    let role = role.trim();
    if role == LEGACY_ADMIN_ROLE { ADMIN_ROLE.to_owned() } else { role.to_owned() }
}

// =============================================================================
// SESSION RECORD
// =============================================================================

/// Identity, roles and bearer credential of the signed-in user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// User identifier assigned by the remote API.
    pub id: i64,
    /// Display name.
    pub username: String,
    /// Role strings; serialized as a JSON array.
    #[serde(default)]
    pub roles: BTreeSet<String>,
    /// Bearer token for authenticated API calls.
    pub token: String,
}

impl SessionRecord {
    /// Whether the role set contains either admin marker.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(|role| is_admin_role(role))
    }

    /// Serialize as the JSON stored under [`SESSION_KEY`] in local storage.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Malformed`] if serialization fails.
    pub fn to_json(&self) -> Result<String, SessionError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse the JSON stored under [`SESSION_KEY`] in local storage.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Malformed`] for anything that is not a record.
    pub fn from_json(raw: &str) -> Result<Self, SessionError> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// Percent-encode a record for the `user` cookie.
///
/// # Errors
///
/// Returns [`SessionError::Malformed`] if the record cannot be serialized.
pub fn encode_cookie_value(record: &SessionRecord) -> Result<String, SessionError> {
    let json = record.to_json()?;
    Ok(urlencoding::encode(&json).into_owned())
}

// =============================================================================
// SIGN-IN / SIGN-UP WIRE TYPES
// =============================================================================

/// Body of `POST /authentication/sign-in`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInRequest {
    pub username: String,
    pub password: String,
}

/// Body of `POST /authentication/sign-up`.
pub type SignUpRequest = SignInRequest;

/// Response of `POST /authentication/sign-in`.
///
/// The token has shipped under several names; `token` is canonical and the
/// others are only accepted here, never persisted.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SignInResponse {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default, alias = "accessToken", alias = "access_token", alias = "jwt")]
    pub token: String,
}

impl TryFrom<SignInResponse> for SessionRecord {
    type Error = SessionError;

    fn try_from(resp: SignInResponse) -> Result<Self, Self::Error> {
        let token = resp.token.trim();
        if token.is_empty() {
            return Err(SessionError::MissingToken);
        }
        let roles = resp
            .roles
            .iter()
            .map(|role| normalize_role(role))
            .filter(|role| !role.is_empty())
            .collect();
        Ok(Self { id: resp.id, username: resp.username, roles, token: token.to_owned() })
    }
}
