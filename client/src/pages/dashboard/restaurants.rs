//! Restaurant management: catalogue listing and the create form.

#[cfg(test)]
#[path = "restaurants_test.rs"]
mod restaurants_test;

use leptos::prelude::*;
#[cfg(feature = "hydrate")]
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

#[cfg(feature = "hydrate")]
use super::AdminPage;
use super::{BackToDashboard, use_admin_page};
use crate::net::types::{CreateRestaurant, Restaurant};
use crate::pages::restaurants::stars_label;

const LIST_PATH: &str = "/dashboard/restaurants";

/// Raw form input; every field is text until validated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct RestaurantForm {
    pub name: String,
    pub latitude: String,
    pub longitude: String,
    pub stars: String,
}

impl Default for RestaurantForm {
    fn default() -> Self {
        Self { name: String::new(), latitude: "0".to_owned(), longitude: "0".to_owned(), stars: "5".to_owned() }
    }
}

fn coordinate(raw: &str, limit: f64) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite() && v.abs() <= limit)
}

/// Create-body from the form, or the first validation message.
pub(crate) fn validate_restaurant(form: &RestaurantForm) -> Result<CreateRestaurant, &'static str> {
    let name = form.name.trim();
    if name.is_empty() {
        return Err("Enter a restaurant name.");
    }
    let latitude = coordinate(&form.latitude, 90.0).ok_or("Latitude must be between -90 and 90.")?;
    let longitude = coordinate(&form.longitude, 180.0).ok_or("Longitude must be between -180 and 180.")?;
    let stars = form
        .stars
        .trim()
        .parse::<u8>()
        .ok()
        .filter(|s| (1..=5).contains(s))
        .ok_or("Stars must be between 1 and 5.")?;
    Ok(CreateRestaurant { name: name.to_owned(), latitude, longitude, stars })
}

#[component]
pub fn AdminRestaurantsPage() -> impl IntoView {
    let page = use_admin_page();
    let restaurants = RwSignal::new(Vec::<Restaurant>::new());

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
                    match api.restaurants().list().await {
                        Ok(list) => restaurants.set(list),
                        Err(e) => {
                            notifier.api_error("Could not load restaurants", &e);
                        }
                    }
                });
            }
        }
    });

    view! {
        <div class="admin-page">
            <BackToDashboard/>
            <header class="admin-page__header">
                <h1>"Restaurants"</h1>
                <a class="admin-page__action" href="/dashboard/restaurants/create">"New restaurant"</a>
            </header>
            <table class="admin-table">
                <thead>
                    <tr><th>"ID"</th><th>"Name"</th><th>"Stars"</th><th>"Location"</th><th>"Tags"</th></tr>
                </thead>
                <tbody>
                    <For each=move || restaurants.get() key=|r| r.id let:r>
                        <tr>
                            <td>{r.id}</td>
                            <td>{r.name.clone()}</td>
                            <td>{stars_label(r.stars)}</td>
                            <td>{format!("{:.4}, {:.4}", r.latitude, r.longitude)}</td>
                            <td>{r.tags.join(", ")}</td>
                        </tr>
                    </For>
                </tbody>
            </table>
        </div>
    }
}

#[component]
pub fn CreateRestaurantPage() -> impl IntoView {
    let page = use_admin_page();
    let navigate = use_navigate();
    let form = RwSignal::new(RestaurantForm::default());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let body = match validate_restaurant(&form.get()) {
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
            let AdminPage { api, notifier, .. } = page.clone();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match api.restaurants().create(&body).await {
                    Ok(created) => {
                        notifier.success("Restaurant created", Some(&created.name));
                        navigate(LIST_PATH, NavigateOptions::default());
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
            let _ = (&page, &navigate, body);
        }
    };

    let field = move |label: &'static str, kind: &'static str, get: fn(&RestaurantForm) -> String, set: fn(&mut RestaurantForm, String)| {
        view! {
            <label class="admin-form__field">
                {label}
                <input
                    class="admin-form__input"
                    type=kind
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
        <div class="admin-page">
            <BackToDashboard/>
            <h1>"New restaurant"</h1>
            <form class="admin-form" on:submit=on_submit>
                {field("Name", "text", |f| f.name.clone(), |f, v| f.name = v)}
                {field("Latitude", "number", |f| f.latitude.clone(), |f, v| f.latitude = v)}
                {field("Longitude", "number", |f| f.longitude.clone(), |f, v| f.longitude = v)}
                {field("Stars (1-5)", "number", |f| f.stars.clone(), |f, v| f.stars = v)}
                <div class="admin-form__actions">
                    <button type="submit" disabled=move || busy.get()>"Create"</button>
                    <a href=LIST_PATH>"Cancel"</a>
                </div>
                <Show when=move || error.get().is_some()>
                    <p class="admin-form__error">{move || error.get().unwrap_or_default()}</p>
                </Show>
            </form>
        </div>
    }
}
