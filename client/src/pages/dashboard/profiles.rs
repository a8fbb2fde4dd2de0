//! Profile browsing: list, lookup by email and a per-profile detail screen.

#[cfg(test)]
#[path = "profiles_test.rs"]
mod profiles_test;

use leptos::prelude::*;
use leptos::tachys::view::any_view::IntoAny;
use leptos_router::hooks::use_params_map;

#[cfg(feature = "hydrate")]
use super::AdminPage;
use super::{BackToDashboard, use_admin_page};
use crate::net::types::{Profile, User};
use crate::pages::profile::is_valid_email;

pub(crate) fn detail_href(profile_id: i64) -> String {
    format!("/dashboard/profiles/{profile_id}")
}

/// Route parameter as a profile id; anything but a positive integer is `None`.
pub(crate) fn parse_profile_id(raw: Option<&str>) -> Option<i64> {
    raw?.trim().parse::<i64>().ok().filter(|id| *id > 0)
}

/// Trimmed email to look up, or the validation message.
pub(crate) fn email_query(raw: &str) -> Result<String, &'static str> {
    let email = raw.trim();
    if !is_valid_email(email) {
        return Err("Enter a valid email address.");
    }
    Ok(email.to_owned())
}

#[component]
fn ProfileRow(profile: Profile) -> impl IntoView {
    view! {
        <tr>
            <td>{profile.id}</td>
            <td>{profile.full_name()}</td>
            <td>{profile.email.clone()}</td>
            <td>{profile.favorite_restaurants.len()}</td>
            <td><a href=detail_href(profile.id)>"View"</a></td>
        </tr>
    }
}

#[component]
pub fn AdminProfilesPage() -> impl IntoView {
    let page = use_admin_page();
    let profiles = RwSignal::new(Vec::<Profile>::new());
    let query = RwSignal::new(String::new());
    let found = RwSignal::new(None::<Profile>);
    let search_error = RwSignal::new(None::<String>);

    Effect::new({
        let page = page.clone();
        move || {
            if !page.ready() {
                return;
            }
            #[cfg(feature = "hydrate")]
            {
                let AdminPage { api, notifier, .. } = page.clone();
                leptos::task::spawn_local(async move {
                    match api.profiles().list().await {
                        Ok(list) => profiles.set(list),
                        Err(e) => {
                            notifier.api_error("Could not load profiles", &e);
                        }
                    }
                });
            }
        }
    });

    let on_search = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        found.set(None);
        let email = match email_query(&query.get()) {
            Ok(email) => email,
            Err(message) => {
                search_error.set(Some(message.to_owned()));
                return;
            }
        };
        search_error.set(None);

        #[cfg(feature = "hydrate")]
        {
            let api = page.api.clone();
            leptos::task::spawn_local(async move {
                match api.profiles().by_email(&email).await {
                    Ok(profile) => found.set(Some(profile)),
                    Err(e) if e.status() == Some(404) => search_error.set(Some(format!("No profile for {email}."))),
                    Err(e) => search_error.set(Some(e.to_string())),
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&page, email);
        }
    };

    view! {
        <div class="admin-page">
            <BackToDashboard/>
            <h1>"Profiles"</h1>
            <form class="search-form search-form--inline" on:submit=on_search>
                <input
                    class="search-input"
                    type="email"
                    placeholder="Find by email"
                    prop:value=move || query.get()
                    on:input=move |ev| query.set(event_target_value(&ev))
                />
                <button class="search-button" type="submit">"Find"</button>
            </form>
            <Show when=move || search_error.get().is_some()>
                <p class="search-error">{move || search_error.get().unwrap_or_default()}</p>
            </Show>
            {move || found.get().map(|p| view! {
                <p class="admin-page__found">
                    {format!("{} <{}>", p.full_name(), p.email)} " " <a href=detail_href(p.id)>"View"</a>
                </p>
            })}
            <table class="admin-table">
                <thead>
                    <tr><th>"ID"</th><th>"Name"</th><th>"Email"</th><th>"Favorites"</th><th></th></tr>
                </thead>
                <tbody>
                    <For each=move || profiles.get() key=|p| p.id let:p>
                        <ProfileRow profile=p/>
                    </For>
                </tbody>
            </table>
        </div>
    }
}

/// Loaded profile plus its owning account, when that lookup succeeds.
#[derive(Clone, Debug)]
enum DetailLoad {
    Loading,
    Invalid,
    Loaded(Profile, Option<User>),
    Failed(String),
}

#[component]
pub fn AdminProfileDetailPage() -> impl IntoView {
    let page = use_admin_page();
    let params = use_params_map();
    let detail = RwSignal::new(DetailLoad::Loading);

    Effect::new({
        let page = page.clone();
        move || {
            let Some(id) = params.with(|p| parse_profile_id(p.get("id").as_deref())) else {
                detail.set(DetailLoad::Invalid);
                return;
            };
            if !page.ready() {
                return;
            }
            #[cfg(feature = "hydrate")]
            {
                let AdminPage { api, .. } = page.clone();
                leptos::task::spawn_local(async move {
                    let load = match api.profiles().get(id).await {
                        Ok(profile) => {
                            // Owner lookup is best effort; the profile still renders without it.
                            let owner = api.users().get(profile.user_id).await.ok();
                            DetailLoad::Loaded(profile, owner)
                        }
                        Err(e) => DetailLoad::Failed(e.to_string()),
                    };
                    detail.set(load);
                });
            }
            #[cfg(not(feature = "hydrate"))]
            {
                let _ = id;
            }
        }
    });

    view! {
        <div class="admin-page">
            <a class="dashboard-back" href="/dashboard/profiles">"← Profiles"</a>
            {move || match detail.get() {
                DetailLoad::Loading => view! { <p>"Loading..."</p> }.into_any(),
                DetailLoad::Invalid => view! { <p class="profile-page__error">"Unknown profile."</p> }.into_any(),
                DetailLoad::Failed(message) => view! { <p class="profile-page__error">{message}</p> }.into_any(),
                DetailLoad::Loaded(profile, owner) => view! {
                    <h1>{profile.full_name()}</h1>
                    <dl class="profile-details">
                        <dt>"Email"</dt>
                        <dd>{profile.email.clone()}</dd>
                        <dt>"Phone"</dt>
                        <dd>{profile.phone.clone()}</dd>
                        <dt>"Address"</dt>
                        <dd>{profile.street_address.clone()}</dd>
                        <dt>"Account"</dt>
                        <dd>{owner.map_or_else(|| format!("user #{}", profile.user_id), |u| u.username)}</dd>
                    </dl>
                    <h2>"Favorite restaurants"</h2>
                    <ul class="restaurant-list">
                        {profile
                            .favorite_restaurants
                            .iter()
                            .map(|r| view! { <li class="restaurant-row">{r.name.clone()}</li> })
                            .collect_view()}
                    </ul>
                }
                .into_any(),
            }}
        </div>
    }
}
