//! Tag management.
//!
//! The API has no tag collection; tags are derived from the restaurant list.
//! Assigning a tag posts it onto one restaurant, re-reads that restaurant and
//! derives the tag list again from the patched catalogue.

#[cfg(test)]
#[path = "tags_test.rs"]
mod tags_test;

use leptos::prelude::*;

use super::{AdminPage, BackToDashboard, use_admin_page};
#[cfg(feature = "hydrate")]
use crate::net::resources::tags_from_restaurants;
use crate::net::types::{Restaurant, Tag};

/// Restaurant id and trimmed tag name, or the first validation message.
pub(crate) fn validate_assignment(restaurant_id: &str, tag: &str) -> Result<(i64, String), &'static str> {
    let id = restaurant_id.trim().parse::<i64>().ok().filter(|id| *id > 0).ok_or("Choose a restaurant.")?;
    let tag = tag.trim();
    if tag.is_empty() {
        return Err("Enter a tag name.");
    }
    Ok((id, tag.to_owned()))
}

/// Swap in `fresh` by id, appending it when the list does not have it yet.
pub(crate) fn replace_restaurant(list: &mut Vec<Restaurant>, fresh: Restaurant) {
    match list.iter_mut().find(|r| r.id == fresh.id) {
        Some(slot) => *slot = fresh,
        None => list.push(fresh),
    }
}

#[component]
pub fn AdminTagsPage() -> impl IntoView {
    let page = use_admin_page();
    let tags = RwSignal::new(Vec::<Tag>::new());
    let restaurants = RwSignal::new(Vec::<Restaurant>::new());
    let selected = RwSignal::new(None::<String>);
    let tagged = RwSignal::new(Vec::<Restaurant>::new());

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
                        Ok(list) => {
                            tags.set(tags_from_restaurants(&list));
                            restaurants.set(list);
                        }
                        Err(e) => {
                            notifier.api_error("Could not load tags", &e);
                        }
                    }
                });
            }
        }
    });

    Effect::new({
        let page = page.clone();
        move || {
            let Some(name) = selected.get() else {
                tagged.set(Vec::new());
                return;
            };
            #[cfg(feature = "hydrate")]
            {
                let AdminPage { api, notifier, .. } = page.clone();
                leptos::task::spawn_local(async move {
                    match api.tags().restaurants(&name).await {
                        Ok(list) => tagged.set(list),
                        Err(e) => {
                            notifier.api_error("Could not load restaurants for tag", &e);
                        }
                    }
                });
            }
            #[cfg(not(feature = "hydrate"))]
            {
                let _ = (&page, name);
            }
        }
    });

    view! {
        <div class="admin-page">
            <BackToDashboard/>
            <h1>"Tags"</h1>
            <div class="admin-split">
                <section>
                    <h2>"All tags"</h2>
                    <ul class="tag-list">
                        <For each=move || tags.get() key=|t| t.name.clone() let:t>
                            {
                                let name = t.name.clone();
                                let active = {
                                    let name = name.clone();
                                    move || selected.get().as_deref() == Some(name.as_str())
                                };
                                view! {
                                    <li>
                                        <button
                                            class=move || if active() { "tag tag--active" } else { "tag" }
                                            on:click=move |_| selected.set(Some(name.clone()))
                                        >
                                            {format!("{} ({})", t.name, t.restaurant_count)}
                                        </button>
                                    </li>
                                }
                            }
                        </For>
                    </ul>
                </section>
                <section>
                    <h2>{move || selected.get().map_or_else(|| "Pick a tag".to_owned(), |t| format!("Tagged \"{t}\""))}</h2>
                    <ul class="restaurant-list">
                        <For each=move || tagged.get() key=|r| r.id let:r>
                            <li class="restaurant-row">{r.name.clone()}</li>
                        </For>
                    </ul>
                </section>
            </div>
            <AssignTagForm page=page restaurants=restaurants tags=tags/>
        </div>
    }
}

#[component]
fn AssignTagForm(page: AdminPage, restaurants: RwSignal<Vec<Restaurant>>, tags: RwSignal<Vec<Tag>>) -> impl IntoView {
    let restaurant_id = RwSignal::new(String::new());
    let tag = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let (id, name) = match validate_assignment(&restaurant_id.get(), &tag.get()) {
            Ok(pair) => pair,
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
            leptos::task::spawn_local(async move {
                match api.tags().add_to_restaurant(id, &name).await {
                    Ok(()) => {
                        notifier.success("Tag added", Some(&name));
                        tag.set(String::new());
                        match api.restaurants().get(id).await {
                            Ok(fresh) => {
                                restaurants.update(|list| replace_restaurant(list, fresh));
                                tags.set(restaurants.with(|list| tags_from_restaurants(list)));
                            }
                            Err(e) => {
                                notifier.api_error("Could not refresh restaurant", &e);
                            }
                        }
                    }
                    Err(e) => error.set(Some(e.to_string())),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&page, id, name, tags);
        }
    };

    view! {
        <form class="admin-form admin-form--inline" on:submit=on_submit>
            <h2>"Assign tag"</h2>
            <select class="admin-form__input" on:change=move |ev| restaurant_id.set(event_target_value(&ev))>
                <option value="">"Restaurant..."</option>
                <For each=move || restaurants.get() key=|r| r.id let:r>
                    <option value=r.id.to_string()>{r.name.clone()}</option>
                </For>
            </select>
            <input
                class="admin-form__input"
                type="text"
                placeholder="Tag name"
                prop:value=move || tag.get()
                on:input=move |ev| tag.set(event_target_value(&ev))
            />
            <button type="submit" disabled=move || busy.get()>"Add"</button>
            <Show when=move || error.get().is_some()>
                <p class="admin-form__error">{move || error.get().unwrap_or_default()}</p>
            </Show>
        </form>
    }
}
