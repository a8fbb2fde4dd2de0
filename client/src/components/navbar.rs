//! Top navigation bar.
//!
//! Links depend on the auth state: anonymous visitors see sign-in and
//! register, signed-in users see their profile, admins also see the dashboard.

#[cfg(test)]
#[path = "navbar_test.rs"]
mod navbar_test;

use leptos::prelude::*;
use session::RoutePolicy;

use crate::components::notification_list::Notifier;
use crate::net::api::{BrowserNavigator, Navigator};
use crate::state::auth::{AuthContext, AuthState};

/// `(href, label)` pairs for the current auth state.
pub(crate) fn nav_links(state: &AuthState) -> Vec<(&'static str, &'static str)> {
    let mut links = vec![("/", "Products"), ("/restaurants", "Restaurants")];
    match state {
        AuthState::Uninitialized | AuthState::Loading => {}
        AuthState::Anonymous => {
            links.push(("/login", "Sign in"));
            links.push(("/register", "Register"));
        }
        AuthState::Authenticated(record) => {
            links.push(("/profile", "Profile"));
            links.push(("/profile/favorites", "Favorites"));
            if record.is_admin() {
                links.push(("/dashboard", "Dashboard"));
            }
        }
    }
    links
}

#[component]
pub fn Navbar() -> impl IntoView {
    let auth = expect_context::<AuthContext>();
    let auth_state = expect_context::<RwSignal<AuthState>>();
    let policy = expect_context::<RoutePolicy>();
    let notifier = Notifier::from_context();

    let username = move || auth_state.get().user().map(|u| u.username.clone());

    let on_logout = move |_| {
        auth.logout();
        notifier.clear();
        notifier.info("Signed out", None);
        BrowserNavigator.navigate(policy.public_landing());
    };

    view! {
        <nav class="navbar">
            <a class="navbar__brand" href="/">"Food Facts"</a>
            <ul class="navbar__links">
                {move || {
                    nav_links(&auth_state.get())
                        .into_iter()
                        .map(|(href, label)| view! { <li><a href=href>{label}</a></li> })
                        .collect_view()
                }}
            </ul>
            <Show when=move || username().is_some()>
                <span class="navbar__user">{move || username().unwrap_or_default()}</span>
                <button class="navbar__logout" on:click=on_logout.clone()>"Sign out"</button>
            </Show>
        </nav>
    }
}
