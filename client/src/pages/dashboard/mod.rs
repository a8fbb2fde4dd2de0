//! Admin dashboard: overview plus the management screens under `/dashboard/*`.
//!
//! SYSTEM CONTEXT
//! ==============
//! Admin-only. The server guard turns non-admins away on page load; the
//! client-side redirects installed by [`use_admin_page`] cover in-app
//! navigation. Every screen loads only once the auth state says admin, so an
//! anonymous render never fires a request that would answer 401.


pub mod products;
pub mod profiles;
pub mod restaurants;
pub mod tags;
pub mod users;

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use session::RoutePolicy;

use crate::components::notification_list::Notifier;
use crate::net::api::ApiClient;
use crate::net::types::{ApiStatus, DashboardStats, EndpointStatus};
use crate::state::auth::AuthState;
use crate::state::notifications::{Notification, NotificationKind};
use crate::util::auth::{install_admin_redirect, install_unauth_redirect};

/// Management screens linked from the overview, in display order.
pub(crate) const SECTIONS: [(&str, &str); 5] = [
    ("/dashboard/restaurants", "Restaurants"),
    ("/dashboard/tags", "Tags"),
    ("/dashboard/profiles", "Profiles"),
    ("/dashboard/products", "Products"),
    ("/dashboard/users", "Users"),
];

/// Context every admin screen needs.
#[derive(Clone)]
pub(crate) struct AdminPage {
    pub api: ApiClient,
    pub auth: RwSignal<AuthState>,
    pub notifier: Notifier,
}

impl AdminPage {
    /// Whether screen data may be requested yet.
    pub fn ready(&self) -> bool {
        self.auth.get().is_admin()
    }
}

/// Pull admin context and install the sign-in and admin redirects.
pub(crate) fn use_admin_page() -> AdminPage {
    let auth = expect_context::<RwSignal<AuthState>>();
    let policy = expect_context::<RoutePolicy>();
    let navigate = use_navigate();
    install_unauth_redirect(auth, policy.sign_in_path().to_owned(), navigate.clone());
    install_admin_redirect(auth, policy.public_landing().to_owned(), navigate);
    AdminPage { api: expect_context::<ApiClient>(), auth, notifier: Notifier::from_context() }
}

pub(crate) fn stat_cards(stats: &DashboardStats) -> [(&'static str, usize); 4] {
    [
        ("Restaurants", stats.total_restaurants),
        ("Users", stats.total_users),
        ("Tags", stats.total_tags),
        ("Profiles", stats.total_profiles),
    ]
}

pub(crate) fn endpoint_label(status: &EndpointStatus) -> (&'static str, &'static str) {
    match status {
        EndpointStatus::Up => ("Online", "status--up"),
        EndpointStatus::Down(_) => ("Offline", "status--down"),
    }
}

/// Sticky warning raised when the status check finds an endpoint down.
pub(crate) fn degraded_notice(status: &ApiStatus) -> Option<Notification> {
    if status.all_up() {
        return None;
    }
    let down: Vec<&str> = [("profiles", &status.profiles), ("restaurants", &status.restaurants), ("products", &status.products)]
        .into_iter()
        .filter(|(_, s)| !s.is_up())
        .map(|(name, _)| name)
        .collect();
    let message = format!("Unreachable: {}", down.join(", "));
    Some(Notification::new(NotificationKind::Warning, "API degraded", Some(&message)).sticky())
}

/// Back link shown at the top of every management screen.
#[component]
pub(crate) fn BackToDashboard() -> impl IntoView {
    view! { <a class="dashboard-back" href="/dashboard">"← Dashboard"</a> }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let page = use_admin_page();
    let auth = page.auth;

    let stats = RwSignal::new(None::<DashboardStats>);
    let status = RwSignal::new(None::<ApiStatus>);
    let refresh = RwSignal::new(0_u32);

    Effect::new({
        let page = page.clone();
        move || {
            let _ = refresh.get();
            if !page.ready() {
                return;
            }
            #[cfg(feature = "hydrate")]
            {
                let AdminPage { api, notifier, .. } = page.clone();
                leptos::task::spawn_local(async move {
                    match api.dashboard_stats().await {
                        Ok(s) => stats.set(Some(s)),
                        Err(e) => {
                            notifier.api_error("Could not load statistics", &e);
                        }
                    }
                    let checked = api.check_status().await;
                    if let Some(notice) = degraded_notice(&checked) {
                        notifier.push(notice);
                    }
                    status.set(Some(checked));
                });
            }
        }
    });

    let welcome = move || auth.get().user().map(|u| format!("Welcome, {}.", u.username)).unwrap_or_default();

    view! {
        <div class="dashboard-page">
            <header class="dashboard-page__header">
                <h1>"Admin dashboard"</h1>
                <p>{welcome}</p>
                <button class="dashboard-page__refresh" on:click=move |_| refresh.update(|n| *n += 1)>"Refresh"</button>
            </header>

            <nav class="dashboard-sections">
                {SECTIONS
                    .into_iter()
                    .map(|(href, label)| view! { <a class="dashboard-sections__link" href=href>{label}</a> })
                    .collect_view()}
            </nav>

            <section class="dashboard-stats">
                {move || {
                    stats.get().map(|s| {
                        stat_cards(&s)
                            .into_iter()
                            .map(|(label, value)| view! {
                                <div class="stat-card">
                                    <span class="stat-card__value">{value}</span>
                                    <span class="stat-card__label">{label}</span>
                                </div>
                            })
                            .collect_view()
                    })
                }}
            </section>

            <section class="api-status">
                <h2>"API status"</h2>
                {move || {
                    status.get().map(|s| {
                        [("Profiles", s.profiles), ("Restaurants", s.restaurants), ("Products", s.products)]
                            .into_iter()
                            .map(|(name, endpoint)| {
                                let (label, class) = endpoint_label(&endpoint);
                                let detail = match endpoint {
                                    EndpointStatus::Down(reason) => Some(reason),
                                    EndpointStatus::Up => None,
                                };
                                view! {
                                    <div class=format!("api-status__row {class}") title=detail>
                                        <span>{name}</span>
                                        <span>{label}</span>
                                    </div>
                                }
                            })
                            .collect_view()
                    })
                }}
            </section>
        </div>
    }
}
