//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped data loading and delegates shared chrome to
//! `components`.

pub mod dashboard;
pub mod home;
pub mod login;
pub mod profile;
pub mod register;
pub mod restaurants;
