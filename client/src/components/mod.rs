//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render app chrome and read shared state from Leptos context
//! providers.

pub mod navbar;
pub mod notification_list;
