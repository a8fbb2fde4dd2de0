//! Client-side state modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `auth` owns the session lifecycle, `events` carries forced-logout signals
//! from the API client to it, and `notifications` queues user-facing toasts.

pub mod auth;
pub mod events;
pub mod notifications;
