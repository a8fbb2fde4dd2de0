//! Shared session model for the browser client and the SSR host.
//!
//! This crate owns the representation of the signed-in user that both sides
//! read: the client persists it after sign-in, the server's route guard reads
//! it back out of the `user` cookie on every page request. It also owns the
//! static route policy so both sides agree on where a user lands.
//!
//! Nothing in here touches the network or the browser; callers supply raw
//! strings and get typed values back.

pub mod policy;
pub mod record;

pub use policy::{RouteDecision, RoutePolicy};
pub use record::{
    ADMIN_ROLE, LEGACY_ADMIN_ROLE, SESSION_COOKIE_MAX_AGE_SECS, SESSION_KEY, SessionRecord, SignInRequest,
    SignInResponse, SignUpRequest, encode_cookie_value, is_admin_role, normalize_role,
};

/// Error returned when a session record cannot be built, encoded or parsed.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The persisted payload is not a valid JSON session record.
    #[error("malformed session record: {0}")]
    Malformed(#[from] serde_json::Error),
    /// The sign-in response carried no usable bearer token.
    #[error("sign-in response is missing a token")]
    MissingToken,
}
