//! Shared auth UI helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! The server guard only runs on full page loads. Route components install
//! these redirects so client-side navigation gets the same treatment once the
//! auth state has settled.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::state::auth::AuthState;

/// True once auth has loaded and nobody is signed in.
#[must_use]
pub fn should_redirect_unauth(state: &AuthState) -> bool {
    !state.is_loading() && state.user().is_none()
}

/// True once auth has loaded and the signed-in user lacks the admin marker.
/// Anonymous users are left to [`should_redirect_unauth`].
#[must_use]
pub fn should_redirect_non_admin(state: &AuthState) -> bool {
    state.user().is_some_and(|user| !user.is_admin())
}

/// Redirect to the sign-in page whenever auth has loaded and no user is present.
pub fn install_unauth_redirect<F>(auth: RwSignal<AuthState>, sign_in_path: String, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if should_redirect_unauth(&auth.get()) {
            navigate(&sign_in_path, NavigateOptions::default());
        }
    });
}

/// Redirect signed-in non-admins to the public landing page.
pub fn install_admin_redirect<F>(auth: RwSignal<AuthState>, landing_path: String, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if should_redirect_non_admin(&auth.get()) {
            navigate(&landing_path, NavigateOptions::default());
        }
    });
}
