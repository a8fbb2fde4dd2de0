//! Account list with admin and member counts.

#[cfg(test)]
#[path = "users_test.rs"]
mod users_test;

use leptos::prelude::*;

#[cfg(feature = "hydrate")]
use super::AdminPage;
use super::{BackToDashboard, use_admin_page};
use crate::net::types::User;

pub(crate) fn role_summary(user: &User) -> String {
    if user.roles.is_empty() {
        return "-".to_owned();
    }
    user.roles.join(", ")
}

/// `(admins, members)` among `users`.
pub(crate) fn role_counts(users: &[User]) -> (usize, usize) {
    let admins = users.iter().filter(|u| u.is_admin()).count();
    (admins, users.len() - admins)
}

#[component]
pub fn AdminUsersPage() -> impl IntoView {
    let page = use_admin_page();
    let users = RwSignal::new(Vec::<User>::new());

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
                    match api.users().list().await {
                        Ok(list) => users.set(list),
                        Err(e) => {
                            notifier.api_error("Could not load users", &e);
                        }
                    }
                });
            }
        }
    });

    let counts = move || {
        let (admins, members) = users.with(|list| role_counts(list));
        format!("{admins} admins, {members} members")
    };

    view! {
        <div class="admin-page">
            <BackToDashboard/>
            <h1>"Users"</h1>
            <p class="admin-page__summary">{counts}</p>
            <table class="admin-table">
                <thead>
                    <tr><th>"ID"</th><th>"Username"</th><th>"Roles"</th></tr>
                </thead>
                <tbody>
                    <For each=move || users.get() key=|u| u.id let:u>
                        <tr>
                            <td>{u.id}</td>
                            <td>{u.username.clone()}</td>
                            <td>{role_summary(&u)}</td>
                        </tr>
                    </For>
                </tbody>
            </table>
        </div>
    }
}
