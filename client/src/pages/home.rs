//! Landing page: look a product up by barcode.

#[cfg(test)]
#[path = "home_test.rs"]
mod home_test;

use leptos::prelude::*;

use crate::components::notification_list::Notifier;
use crate::net::api::ApiClient;
use crate::net::types::Product;

/// Barcode with spaces and dashes removed; `None` unless only digits remain.
pub(crate) fn normalize_code(raw: &str) -> Option<String> {
    let code: String = raw.chars().filter(|c| !c.is_whitespace() && *c != '-').collect();
    if code.is_empty() || !code.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    Some(code)
}

#[component]
pub fn HomePage() -> impl IntoView {
    let api = expect_context::<ApiClient>();
    let notifier = Notifier::from_context();

    let code = RwSignal::new(String::new());
    let product = RwSignal::new(None::<Product>);
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let on_search = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let Some(code_value) = normalize_code(&code.get()) else {
            error.set(Some("Enter a numeric barcode.".to_owned()));
            return;
        };
        error.set(None);
        product.set(None);
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            let api = api.clone();
            leptos::task::spawn_local(async move {
                match api.products().by_code(&code_value).await {
                    Ok(found) => product.set(Some(found)),
                    Err(e) => {
                        error.set(Some(e.to_string()));
                        notifier.api_error("Product lookup failed", &e);
                    }
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&api, code_value, notifier);
        }
    };

    view! {
        <div class="home-page">
            <h1>"Find a product"</h1>
            <form class="search-form" on:submit=on_search>
                <input
                    class="search-input"
                    type="text"
                    inputmode="numeric"
                    placeholder="Barcode, e.g. 3017620422003"
                    prop:value=move || code.get()
                    on:input=move |ev| code.set(event_target_value(&ev))
                />
                <button class="search-button" type="submit" disabled=move || busy.get()>"Search"</button>
            </form>
            <Show when=move || error.get().is_some()>
                <p class="search-error">{move || error.get().unwrap_or_default()}</p>
            </Show>
            {move || product.get().map(|p| view! { <ProductCard product=p/> })}
        </div>
    }
}

#[component]
fn ProductCard(product: Product) -> impl IntoView {
    let name = if product.product_name.is_empty() { product.code.clone() } else { product.product_name.clone() };
    view! {
        <article class="product-card">
            {product.image_url.clone().map(|src| view! { <img class="product-card__image" src=src alt=name.clone()/> })}
            <h2 class="product-card__name">{name.clone()}</h2>
            {product.brands.clone().map(|b| view! { <p class="product-card__brands">{b}</p> })}
            <dl class="product-card__facts">
                <dt>"Code"</dt>
                <dd>{product.code.clone()}</dd>
                <dt>"Nutrition grade"</dt>
                <dd>{product.grade_label()}</dd>
                <dt>"Energy"</dt>
                <dd>{product.energy_label()}</dd>
            </dl>
        </article>
    }
}
