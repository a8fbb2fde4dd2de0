//! Networking modules for the remote REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `transport` is the HTTP seam, `api` wraps it with session credentials and
//! forced logout, `resources` maps endpoint groups, and `types` defines the
//! wire schema.

pub mod api;
pub mod resources;
pub mod transport;
pub mod types;
