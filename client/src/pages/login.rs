//! Sign-in page.
//!
//! On success the record goes to the auth context (which persists it to both
//! session slots) and the browser does a full navigation to the landing page
//! for the user's role, so the server guard sees the fresh cookie.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use session::{RoutePolicy, SignInRequest};

use crate::components::notification_list::Notifier;
use crate::net::api::ApiClient;
use crate::state::auth::AuthContext;

/// Trimmed credentials, or the message to show when one is blank.
pub(crate) fn validate_credentials(username: &str, password: &str) -> Result<SignInRequest, &'static str> {
    let username = username.trim();
    if username.is_empty() {
        return Err("Enter your username.");
    }
    if password.is_empty() {
        return Err("Enter your password.");
    }
    Ok(SignInRequest { username: username.to_owned(), password: password.to_owned() })
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let auth = expect_context::<AuthContext>();
    let policy = expect_context::<RoutePolicy>();
    let notifier = Notifier::from_context();

    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let request = match validate_credentials(&username.get(), &password.get()) {
            Ok(request) => request,
            Err(message) => {
                error.set(Some(message.to_owned()));
                return;
            }
        };
        error.set(None);
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            use crate::net::api::Navigator;

            let api = api.clone();
            let auth = auth.clone();
            let policy = policy.clone();
            leptos::task::spawn_local(async move {
                match api.auth().sign_in(&request).await {
                    Ok(record) => {
                        let landing = policy.landing_for(&record).to_owned();
                        notifier.success("Signed in", Some(&format!("Welcome back, {}.", record.username)));
                        auth.login(record);
                        crate::net::api::BrowserNavigator.navigate(&landing);
                    }
                    Err(e) => {
                        leptos::logging::warn!("login: sign-in failed: {e}");
                        error.set(Some(e.to_string()));
                        notifier.api_error("Sign in failed", &e);
                        busy.set(false);
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&api, &auth, &policy, request, notifier);
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Food Facts"</h1>
                <p class="login-card__subtitle">"Sign in to your account"</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="text"
                        autocomplete="username"
                        placeholder="Username"
                        prop:value=move || username.get()
                        on:input=move |ev| username.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        autocomplete="current-password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>
                <Show when=move || error.get().is_some()>
                    <p class="login-message login-message--error">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <p class="login-card__footer">"No account? " <a href="/register">"Register"</a></p>
            </div>
        </div>
    }
}
