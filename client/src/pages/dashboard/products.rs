//! Product catalogue maintenance: add, rename and delete products.

#[cfg(test)]
#[path = "products_test.rs"]
mod products_test;

use leptos::prelude::*;

use super::{AdminPage, BackToDashboard, use_admin_page};
use crate::net::types::Product;
use crate::pages::home::normalize_code;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct ProductForm {
    pub code: String,
    pub name: String,
    pub brands: String,
}

/// New product from the form, or the first validation message.
pub(crate) fn validate_product(form: &ProductForm) -> Result<Product, &'static str> {
    let code = normalize_code(&form.code).ok_or("Enter a numeric barcode.")?;
    let name = form.name.trim();
    if name.is_empty() {
        return Err("Enter a product name.");
    }
    let brands = Some(form.brands.trim()).filter(|b| !b.is_empty()).map(str::to_owned);
    Ok(Product { code, product_name: name.to_owned(), brands, ..Product::default() })
}

/// Copy of `product` under a new name.
pub(crate) fn renamed(product: &Product, name: &str) -> Result<Product, &'static str> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Enter a product name.");
    }
    Ok(Product { product_name: name.to_owned(), ..product.clone() })
}

fn row_key(product: &Product) -> String {
    product.id.map_or_else(|| format!("code:{}", product.code), |id| id.to_string())
}

#[component]
pub fn AdminProductsPage() -> impl IntoView {
    let page = use_admin_page();
    let products = RwSignal::new(Vec::<Product>::new());
    let reload = RwSignal::new(0_u32);

    Effect::new({
        let page = page.clone();
        move || {
            let _ = reload.get();
            if !page.ready() {
                return;
            }
            #[cfg(feature = "hydrate")]
            {
                let AdminPage { api, notifier, .. } = page.clone();
                leptos::task::spawn_local(async move {
                    match api.products().list().await {
                        Ok(list) => products.set(list),
                        Err(e) => {
                            notifier.api_error("Could not load products", &e);
                        }
                    }
                });
            }
        }
    });

    let on_rename = Callback::new({
        let page = page.clone();
        move |(product, name): (Product, String)| {
            let AdminPage { notifier, .. } = page.clone();
            let updated = match renamed(&product, &name) {
                Ok(updated) => updated,
                Err(message) => {
                    notifier.error(message, None);
                    return;
                }
            };
            let Some(id) = updated.id else {
                return;
            };
            #[cfg(feature = "hydrate")]
            {
                let api = page.api.clone();
                leptos::task::spawn_local(async move {
                    match api.products().update(id, &updated).await {
                        Ok(saved) => {
                            notifier.success("Product updated", Some(&saved.product_name));
                            reload.update(|n| *n += 1);
                        }
                        Err(e) => {
                            notifier.api_error("Could not update product", &e);
                        }
                    }
                });
            }
            #[cfg(not(feature = "hydrate"))]
            {
                let _ = (id, updated);
            }
        }
    });

    let on_delete = Callback::new({
        let page = page.clone();
        move |id: i64| {
            #[cfg(feature = "hydrate")]
            {
                let AdminPage { api, notifier, .. } = page.clone();
                leptos::task::spawn_local(async move {
                    match api.products().delete(id).await {
                        Ok(()) => {
                            products.update(|list| list.retain(|p| p.id != Some(id)));
                            notifier.warning("Product deleted", None);
                        }
                        Err(e) => {
                            notifier.api_error("Could not delete product", &e);
                        }
                    }
                });
            }
            #[cfg(not(feature = "hydrate"))]
            {
                let _ = (&page, id);
            }
        }
    });

    view! {
        <div class="admin-page">
            <BackToDashboard/>
            <h1>"Products"</h1>
            <CreateProductForm page=page reload=reload/>
            <table class="admin-table">
                <thead>
                    <tr><th>"Code"</th><th>"Name"</th><th>"Brand"</th><th>"Grade"</th><th></th></tr>
                </thead>
                <tbody>
                    <For each=move || products.get() key=row_key let:product>
                        <ProductRow product=product on_rename=on_rename on_delete=on_delete/>
                    </For>
                </tbody>
            </table>
        </div>
    }
}

#[component]
fn ProductRow(product: Product, on_rename: Callback<(Product, String)>, on_delete: Callback<i64>) -> impl IntoView {
    let name = RwSignal::new(product.product_name.clone());
    let id = product.id;
    let actions = id.map(|id| {
        let product = product.clone();
        view! {
            <button on:click=move |_| on_rename.run((product.clone(), name.get()))>"Rename"</button>
            <button class="admin-table__danger" on:click=move |_| on_delete.run(id)>"Delete"</button>
        }
    });

    view! {
        <tr>
            <td>{product.code.clone()}</td>
            <td>
                <input
                    class="admin-form__input"
                    type="text"
                    prop:value=move || name.get()
                    on:input=move |ev| name.set(event_target_value(&ev))
                />
            </td>
            <td>{product.brands.clone().unwrap_or_default()}</td>
            <td>{product.grade_label()}</td>
            <td>{actions}</td>
        </tr>
    }
}

#[component]
fn CreateProductForm(page: AdminPage, reload: RwSignal<u32>) -> impl IntoView {
    let form = RwSignal::new(ProductForm::default());
    let error = RwSignal::new(None::<String>);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let body = match validate_product(&form.get()) {
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
            leptos::task::spawn_local(async move {
                match api.products().create(&body).await {
                    Ok(created) => {
                        notifier.success("Product added", Some(&created.product_name));
                        form.set(ProductForm::default());
                        reload.update(|n| *n += 1);
                    }
                    Err(e) => error.set(Some(e.to_string())),
                }
                busy.set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&page, body, reload);
        }
    };

    let field = move |placeholder: &'static str, get: fn(&ProductForm) -> String, set: fn(&mut ProductForm, String)| {
        view! {
            <input
                class="admin-form__input"
                type="text"
                placeholder=placeholder
                prop:value=move || get(&form.get())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    form.update(|f| set(f, value));
                }
            />
        }
    };

    view! {
        <form class="admin-form admin-form--inline" on:submit=on_submit>
            {field("Barcode", |f| f.code.clone(), |f, v| f.code = v)}
            {field("Name", |f| f.name.clone(), |f, v| f.name = v)}
            {field("Brand", |f| f.brands.clone(), |f, v| f.brands = v)}
            <button type="submit" disabled=move || busy.get()>"Add product"</button>
            <Show when=move || error.get().is_some()>
                <p class="admin-form__error">{move || error.get().unwrap_or_default()}</p>
            </Show>
        </form>
    }
}
