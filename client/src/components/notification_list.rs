//! Toast stack plus the `Notifier` handle views use to raise toasts.
//!
//! SYSTEM CONTEXT
//! ==============
//! `Notifier` pushes into the `RwSignal<NotificationState>` provided by `App`
//! and, in the browser, arms the auto-close timer for each toast it pushes.

use leptos::prelude::*;

use crate::net::api::ApiError;
use crate::state::notifications::{Notification, NotificationKind, NotificationState};

/// Copyable handle over the notification queue.
#[derive(Clone, Copy)]
pub struct Notifier {
    state: RwSignal<NotificationState>,
}

impl Notifier {
    /// Handle over the queue provided in context.
    #[must_use]
    pub fn from_context() -> Self {
        Self { state: expect_context::<RwSignal<NotificationState>>() }
    }

    pub fn push(self, notification: Notification) -> String {
        let auto_close = notification.auto_close.then_some(notification.duration_ms);
        let id = self.state.try_update(|s| s.push(notification)).unwrap_or_default();
        if let Some(duration_ms) = auto_close {
            self.schedule_dismiss(id.clone(), duration_ms);
        }
        id
    }

    pub fn success(self, title: &str, message: Option<&str>) -> String {
        self.push(Notification::new(NotificationKind::Success, title, message))
    }

    pub fn error(self, title: &str, message: Option<&str>) -> String {
        self.push(Notification::new(NotificationKind::Error, title, message))
    }

    pub fn warning(self, title: &str, message: Option<&str>) -> String {
        self.push(Notification::new(NotificationKind::Warning, title, message))
    }

    pub fn info(self, title: &str, message: Option<&str>) -> String {
        self.push(Notification::new(NotificationKind::Info, title, message))
    }

    pub fn api_error(self, title: &str, err: &ApiError) -> String {
        self.error(title, Some(&err.to_string()))
    }

    pub fn dismiss(self, id: &str) {
        self.state.update(|s| s.dismiss(id));
    }

    pub fn clear(self) {
        self.state.update(NotificationState::clear);
    }

    fn schedule_dismiss(self, id: String, duration_ms: u32) {
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(duration_ms).await;
            self.dismiss(&id);
        });
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (id, duration_ms);
        }
    }
}

/// Fixed toast stack rendered once at the app root.
#[component]
pub fn NotificationList() -> impl IntoView {
    let notifier = Notifier::from_context();
    let state = expect_context::<RwSignal<NotificationState>>();

    view! {
        <div class="notification-list" aria-live="polite">
            <For each=move || state.get().items key=|n| n.id.clone() let:n>
                {
                    let id = n.id.clone();
                    view! {
                        <div class=format!("notification {}", n.kind.css_class()) role="status">
                            <div class="notification__body">
                                <strong class="notification__title">{n.title.clone()}</strong>
                                {n.message.clone().map(|m| view! { <p class="notification__message">{m}</p> })}
                            </div>
                            <button
                                class="notification__close"
                                aria-label="Dismiss"
                                on:click=move |_| notifier.dismiss(&id)
                            >
                                "×"
                            </button>
                        </div>
                    }
                }
            </For>
        </div>
    }
}
