//! # client
//!
//! Leptos + WASM frontend for the food-facts catalog.
//!
//! This crate contains pages, components, the auth-session state, the remote
//! REST client, and the session store shared with the server's route guard
//! through the `user` cookie.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: hydrate the server-rendered body.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::hydrate_body(app::App);
}
