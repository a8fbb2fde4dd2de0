//! Own profile and favorite restaurants.
//!
//! SYSTEM CONTEXT
//! ==============
//! Both routes are protected by the server guard; the client-side redirect
//! covers in-app navigation after a logout. A 404 from `/profiles/me` means
//! the account has no profile yet and shows the create form.

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;
use leptos_router::hooks::use_navigate;
use session::RoutePolicy;

use crate::components::notification_list::Notifier;
use crate::net::api::{ApiClient, ApiError};
use crate::net::types::{CreateProfile, Profile, Restaurant};
use crate::state::auth::AuthState;
use crate::util::auth::install_unauth_redirect;

/// Result of loading the signed-in user's profile.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum ProfileLoad {
    Loading,
    Missing,
    Loaded(Profile),
    Failed(String),
}

impl ProfileLoad {
    pub(crate) fn from_result(result: Result<Profile, ApiError>) -> Self {
        match result {
            Ok(profile) => Self::Loaded(profile),
            Err(e) if e.status() == Some(404) => Self::Missing,
            Err(e) => Self::Failed(e.to_string()),
        }
    }
}

/// `user@domain.tld` shape; the API does the real validation.
pub(crate) fn is_valid_email(email: &str) -> bool {
    email.split_once('@').is_some_and(|(user, domain)| !user.is_empty() && domain.contains('.'))
}

/// Trimmed profile fields, or the first validation message.
pub(crate) fn validate_profile(form: &CreateProfile) -> Result<CreateProfile, &'static str> {
    let trimmed = CreateProfile {
        first_name: form.first_name.trim().to_owned(),
        last_name: form.last_name.trim().to_owned(),
        email: form.email.trim().to_owned(),
        phone: form.phone.trim().to_owned(),
        street_address: form.street_address.trim().to_owned(),
    };
    if trimmed.first_name.is_empty() || trimmed.last_name.is_empty() {
        return Err("First and last name are required.");
    }
    if !is_valid_email(&trimmed.email) {
        return Err("Enter a valid email address.");
    }
    Ok(trimmed)
}

fn use_profile_loader(api: ApiClient, auth: RwSignal<AuthState>, notifier: Notifier) -> RwSignal<ProfileLoad> {
    let profile = RwSignal::new(ProfileLoad::Loading);
    Effect::new(move || {
        if auth.get().user().is_none() {
            return;
        }
        #[cfg(feature = "hydrate")]
        {
            let api = api.clone();
            leptos::task::spawn_local(async move {
                let load = ProfileLoad::from_result(api.profiles().me().await);
                if let ProfileLoad::Failed(message) = &load {
                    notifier.error("Could not load profile", Some(message));
                }
                profile.set(load);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&api, notifier);
        }
    });
    profile
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let policy = expect_context::<RoutePolicy>();
    let notifier = Notifier::from_context();
    install_unauth_redirect(auth, policy.sign_in_path().to_owned(), use_navigate());

    let profile = use_profile_loader(api.clone(), auth, notifier);

    view! {
        <div class="profile-page">
            <h1>"My profile"</h1>
            {move || match profile.get() {
                ProfileLoad::Loading => view! { <p>"Loading..."</p> }.into_any(),
                ProfileLoad::Failed(message) => view! { <p class="profile-page__error">{message}</p> }.into_any(),
                ProfileLoad::Missing => view! { <CreateProfileForm api=api.clone() profile=profile notifier=notifier/> }.into_any(),
                ProfileLoad::Loaded(p) => view! { <ProfileDetails profile=p/> }.into_any(),
            }}
        </div>
    }
}

#[component]
fn ProfileDetails(profile: Profile) -> impl IntoView {
    view! {
        <dl class="profile-details">
            <dt>"Name"</dt>
            <dd>{profile.full_name()}</dd>
            <dt>"Email"</dt>
            <dd>{profile.email.clone()}</dd>
            <dt>"Phone"</dt>
            <dd>{profile.phone.clone()}</dd>
            <dt>"Address"</dt>
            <dd>{profile.street_address.clone()}</dd>
            <dt>"Favorites"</dt>
            <dd>
                <a href="/profile/favorites">{format!("{} restaurants", profile.favorite_restaurants.len())}</a>
            </dd>
        </dl>
    }
}

#[component]
fn CreateProfileForm(api: ApiClient, profile: RwSignal<ProfileLoad>, notifier: Notifier) -> impl IntoView {
    let form = RwSignal::new(CreateProfile::default());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let body = match validate_profile(&form.get()) {
            Ok(body) => body,
            Err(message) => {
                error.set(Some(message.to_owned()));
                return;
            }
        };
        error.set(None);
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            let api = api.clone();
            leptos::task::spawn_local(async move {
                match api.profiles().create(&body).await {
                    Ok(created) => {
                        notifier.success("Profile created", None);
                        profile.set(ProfileLoad::Loaded(created));
                    }
                    Err(e) => {
                        error.set(Some(e.to_string()));
                        busy.set(false);
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&api, body, profile, notifier);
        }
    };

    let field = move |label: &'static str, get: fn(&CreateProfile) -> String, set: fn(&mut CreateProfile, String)| {
        view! {
            <label class="profile-form__field">
                {label}
                <input
                    class="profile-form__input"
                    type="text"
                    prop:value=move || get(&form.get())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        form.update(|f| set(f, value));
                    }
                />
            </label>
        }
    };

    view! {
        <form class="profile-form" on:submit=on_submit>
            <p>"You have no profile yet."</p>
            {field("First name", |f| f.first_name.clone(), |f, v| f.first_name = v)}
            {field("Last name", |f| f.last_name.clone(), |f, v| f.last_name = v)}
            {field("Email", |f| f.email.clone(), |f, v| f.email = v)}
            {field("Phone", |f| f.phone.clone(), |f, v| f.phone = v)}
            {field("Address", |f| f.street_address.clone(), |f, v| f.street_address = v)}
            <button class="profile-form__submit" type="submit" disabled=move || busy.get()>"Create profile"</button>
            <Show when=move || error.get().is_some()>
                <p class="profile-form__error">{move || error.get().unwrap_or_default()}</p>
            </Show>
        </form>
    }
}

#[component]
pub fn FavoritesPage() -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let policy = expect_context::<RoutePolicy>();
    let notifier = Notifier::from_context();
    install_unauth_redirect(auth, policy.sign_in_path().to_owned(), use_navigate());

    let profile = use_profile_loader(api.clone(), auth, notifier);
    let favorites = move || match profile.get() {
        ProfileLoad::Loaded(p) => p.favorite_restaurants,
        _ => Vec::new(),
    };

    let on_remove = Callback::new(move |restaurant_id: i64| {
        #[cfg(feature = "hydrate")]
        {
            let api = api.clone();
            leptos::task::spawn_local(async move {
                match api.profiles().remove_favorite(restaurant_id).await {
                    Ok(()) => {
                        profile.update(|load| {
                            if let ProfileLoad::Loaded(p) = load {
                                p.favorite_restaurants.retain(|r| r.id != restaurant_id);
                            }
                        });
                        notifier.info("Removed from favorites", None);
                    }
                    Err(e) => {
                        notifier.api_error("Could not remove favorite", &e);
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&api, restaurant_id);
        }
    });

    view! {
        <div class="favorites-page">
            <h1>"Favorite restaurants"</h1>
            <Show
                when=move || !favorites().is_empty()
                fallback=|| view! { <p>"No favorites yet. " <a href="/restaurants">"Browse restaurants"</a></p> }
            >
                <ul class="restaurant-list">
                    <For each=favorites key=|r: &Restaurant| r.id let:r>
                        <li class="restaurant-row">
                            <strong>{r.name.clone()}</strong>
                            <button class="restaurant-row__remove" on:click=move |_| on_remove.run(r.id)>"Remove"</button>
                        </li>
                    </For>
                </ul>
            </Show>
        </div>
    }
}
