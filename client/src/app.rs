//! Root application component with routing and context providers.

use std::sync::Arc;

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    ParamSegment, StaticSegment,
    components::{Route, Router, Routes},
};
use session::RoutePolicy;

use crate::components::{navbar::Navbar, notification_list::NotificationList};
use crate::net::api::{ApiClient, BrowserNavigator};
use crate::net::transport::FetchTransport;
use crate::pages::{
    dashboard::{
        DashboardPage,
        products::AdminProductsPage,
        profiles::{AdminProfileDetailPage, AdminProfilesPage},
        restaurants::{AdminRestaurantsPage, CreateRestaurantPage},
        tags::AdminTagsPage,
        users::AdminUsersPage,
    },
    home::HomePage,
    login::LoginPage,
    profile::{FavoritesPage, ProfilePage},
    register::RegisterPage,
    restaurants::RestaurantsPage,
};
use crate::state::auth::{AuthContext, AuthState};
use crate::state::events::SessionEvents;
use crate::state::notifications::NotificationState;
use crate::util::session_store::SessionStore;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Wires the session store, auth context and API client together and provides
/// them, plus reactive mirrors, to every route.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let policy = RoutePolicy::default();
    let store = SessionStore::browser();
    let events = SessionEvents::new();
    let auth = AuthContext::new(store.clone());
    auth.attach(&events);

    let api = ApiClient::new(
        &crate::config::api_base_url(),
        Arc::new(FetchTransport),
        store,
        events,
        Arc::new(BrowserNavigator),
    )
    .with_policy(policy.clone());

    // Views read the signal; the context stays the source of truth.
    let auth_state = RwSignal::new(AuthState::default());
    auth.subscribe(move |state| auth_state.set(state.clone()));
    let notifications = RwSignal::new(NotificationState::default());

    provide_context(auth.clone());
    provide_context(auth_state);
    provide_context(api);
    provide_context(policy);
    provide_context(notifications);

    Effect::new(move || auth.initialize());

    view! {
        <Stylesheet id="leptos" href="/pkg/foodfacts.css"/>
        <Title text="Food Facts"/>

        <Router>
            <Navbar/>
            <main class="app-main">
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("") view=HomePage/>
                    <Route path=StaticSegment("login") view=LoginPage/>
                    <Route path=StaticSegment("register") view=RegisterPage/>
                    <Route path=StaticSegment("restaurants") view=RestaurantsPage/>
                    <Route path=StaticSegment("profile") view=ProfilePage/>
                    <Route path=(StaticSegment("profile"), StaticSegment("favorites")) view=FavoritesPage/>
                    <Route path=StaticSegment("dashboard") view=DashboardPage/>
                    <Route path=(StaticSegment("dashboard"), StaticSegment("restaurants")) view=AdminRestaurantsPage/>
                    <Route
                        path=(StaticSegment("dashboard"), StaticSegment("restaurants"), StaticSegment("create"))
                        view=CreateRestaurantPage
                    />
                    <Route path=(StaticSegment("dashboard"), StaticSegment("tags")) view=AdminTagsPage/>
                    <Route path=(StaticSegment("dashboard"), StaticSegment("profiles")) view=AdminProfilesPage/>
                    <Route
                        path=(StaticSegment("dashboard"), StaticSegment("profiles"), ParamSegment("id"))
                        view=AdminProfileDetailPage
                    />
                    <Route path=(StaticSegment("dashboard"), StaticSegment("products")) view=AdminProductsPage/>
                    <Route path=(StaticSegment("dashboard"), StaticSegment("users")) view=AdminUsersPage/>
                </Routes>
            </main>
            <NotificationList/>
        </Router>
    }
}
