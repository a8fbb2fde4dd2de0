//! Restaurant directory with tag filter and add-to-favorites.
//!
//! The API requires a bearer token for every restaurant call, so anonymous
//! visitors get a sign-in prompt instead of a request that would 401.

#[cfg(test)]
#[path = "restaurants_test.rs"]
mod restaurants_test;

use leptos::prelude::*;

use crate::components::notification_list::Notifier;
use crate::net::api::ApiClient;
use crate::net::resources::tags_from_restaurants;
use crate::net::types::{Restaurant, Tag};
use crate::state::auth::AuthState;

pub(crate) const MAX_STARS: u8 = 5;

/// Filled and empty stars, clamped to five.
pub(crate) fn stars_label(stars: u8) -> String {
    let filled = stars.min(MAX_STARS);
    let mut label = "★".repeat(usize::from(filled));
    label.push_str(&"☆".repeat(usize::from(MAX_STARS - filled)));
    label
}

/// Tag filter value: `None` for the "all" option.
pub(crate) fn selected_tag(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

#[component]
pub fn RestaurantsPage() -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let notifier = Notifier::from_context();

    let restaurants = RwSignal::new(Vec::<Restaurant>::new());
    let tags = RwSignal::new(Vec::<Tag>::new());
    let filter = RwSignal::new(None::<String>);
    let loading = RwSignal::new(false);

    let signed_in = move || auth.get().user().is_some();

    let load_api = api.clone();
    Effect::new(move || {
        let state = auth.get();
        let tag = filter.get();
        if state.user().is_none() {
            return;
        }
        loading.set(true);

        #[cfg(feature = "hydrate")]
        {
            let api = load_api.clone();
            leptos::task::spawn_local(async move {
                let result = match &tag {
                    Some(tag) => api.restaurants().by_tag(tag).await,
                    None => api.restaurants().list().await,
                };
                match result {
                    Ok(list) => {
                        if tag.is_none() {
                            tags.set(tags_from_restaurants(&list));
                        }
                        restaurants.set(list);
                    }
                    Err(e) => {
                        notifier.api_error("Could not load restaurants", &e);
                    }
                }
                loading.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&load_api, tag, tags, notifier);
        }
    });

    let on_favorite = move |restaurant_id: i64| {
        #[cfg(feature = "hydrate")]
        {
            let api = api.clone();
            leptos::task::spawn_local(async move {
                match api.profiles().add_favorite(restaurant_id).await {
                    Ok(()) => {
                        notifier.success("Added to favorites", None);
                    }
                    Err(e) => {
                        notifier.api_error("Could not add favorite", &e);
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&api, restaurant_id);
        }
    };
    let on_favorite = Callback::new(on_favorite);

    view! {
        <div class="restaurants-page">
            <h1>"Restaurants"</h1>
            <Show
                when=signed_in
                fallback=|| view! { <p class="restaurants-page__prompt">"Sign in to browse restaurants." " " <a href="/login">"Sign in"</a></p> }
            >
                <label class="restaurants-page__filter">
                    "Tag "
                    <select on:change=move |ev| filter.set(selected_tag(&event_target_value(&ev)))>
                        <option value="">"All"</option>
                        {move || {
                            tags.get()
                                .into_iter()
                                .map(|t| {
                                    let label = format!("{} ({})", t.name, t.restaurant_count);
                                    view! { <option value=t.name>{label}</option> }
                                })
                                .collect_view()
                        }}
                    </select>
                </label>
                <Show when=move || loading.get()>
                    <p class="restaurants-page__loading">"Loading..."</p>
                </Show>
                <ul class="restaurant-list">
                    <For each=move || restaurants.get() key=|r| r.id let:r>
                        <RestaurantRow restaurant=r on_favorite=on_favorite/>
                    </For>
                </ul>
            </Show>
        </div>
    }
}

#[component]
fn RestaurantRow(restaurant: Restaurant, on_favorite: Callback<i64>) -> impl IntoView {
    let id = restaurant.id;
    view! {
        <li class="restaurant-row">
            <div class="restaurant-row__main">
                <strong>{restaurant.name.clone()}</strong>
                <span class="restaurant-row__stars">{stars_label(restaurant.stars)}</span>
                {restaurant.address.clone().map(|a| view! { <span class="restaurant-row__address">{a}</span> })}
            </div>
            <div class="restaurant-row__tags">
                {restaurant.tags.iter().map(|t| view! { <span class="tag">{t.clone()}</span> }).collect_view()}
            </div>
            <button class="restaurant-row__favorite" on:click=move |_| on_favorite.run(id)>"♥ Favorite"</button>
        </li>
    }
}
