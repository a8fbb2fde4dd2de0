//! Account registration page. A successful sign-up sends the user to sign in.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use leptos::prelude::*;
use session::{RoutePolicy, SignUpRequest};

use crate::components::notification_list::Notifier;
use crate::net::api::ApiClient;
use crate::pages::login::validate_credentials;

pub(crate) const MIN_PASSWORD_LEN: usize = 6;

pub(crate) fn validate_registration(username: &str, password: &str, confirm: &str) -> Result<SignUpRequest, &'static str> {
    let request = validate_credentials(username, password)?;
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err("Password must be at least 6 characters.");
    }
    if password != confirm {
        return Err("Passwords do not match.");
    }
    Ok(request)
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let policy = expect_context::<RoutePolicy>();
    let notifier = Notifier::from_context();

    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let request = match validate_registration(&username.get(), &password.get(), &confirm.get()) {
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
            let sign_in = policy.sign_in_path().to_owned();
            leptos::task::spawn_local(async move {
                match api.auth().sign_up(&request).await {
                    Ok(user) => {
                        notifier.success("Account created", Some(&format!("Sign in as {}.", user.username)));
                        crate::net::api::BrowserNavigator.navigate(&sign_in);
                    }
                    Err(e) => {
                        error.set(Some(e.to_string()));
                        notifier.api_error("Registration failed", &e);
                        busy.set(false);
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&api, &policy, request, notifier);
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Create account"</h1>
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
                        autocomplete="new-password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        autocomplete="new-password"
                        placeholder="Confirm password"
                        prop:value=move || confirm.get()
                        on:input=move |ev| confirm.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>"Register"</button>
                </form>
                <Show when=move || error.get().is_some()>
                    <p class="login-message login-message--error">{move || error.get().unwrap_or_default()}</p>
                </Show>
                <p class="login-card__footer">"Already registered? " <a href="/login">"Sign in"</a></p>
            </div>
        </div>
    }
}
