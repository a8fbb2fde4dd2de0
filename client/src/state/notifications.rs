//! Toast notification queue.
//!
//! Views push into an `RwSignal<NotificationState>` provided at the app root;
//! the `NotificationList` component renders the queue and schedules the
//! auto-close timers.

#[cfg(test)]
#[path = "notifications_test.rs"]
mod notifications_test;

/// Auto-close delay applied unless overridden.
pub const DEFAULT_DURATION_MS: u32 = 5_000;

/// Severity of a notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    Info,
}

impl NotificationKind {
    /// CSS modifier for the toast.
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Success => "notification--success",
            Self::Error => "notification--error",
            Self::Warning => "notification--warning",
            Self::Info => "notification--info",
        }
    }
}

/// One queued toast.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub id: String,
    pub kind: NotificationKind,
    pub title: String,
    pub message: Option<String>,
    pub auto_close: bool,
    pub duration_ms: u32,
}

impl Notification {
    #[must_use]
    pub fn new(kind: NotificationKind, title: &str, message: Option<&str>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            kind,
            title: title.to_owned(),
            message: message.map(str::to_owned),
            auto_close: true,
            duration_ms: DEFAULT_DURATION_MS,
        }
    }

    /// Keep the toast until dismissed.
    #[must_use]
    pub fn sticky(mut self) -> Self {
        self.auto_close = false;
        self
    }
}

/// Ordered notification queue, oldest first.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NotificationState {
    pub items: Vec<Notification>,
}

impl NotificationState {
    /// Append `notification` and return its id.
    pub fn push(&mut self, notification: Notification) -> String {
        let id = notification.id.clone();
        self.items.push(notification);
        id
    }

    /// Remove the notification with `id`; unknown ids are ignored.
    pub fn dismiss(&mut self, id: &str) {
        self.items.retain(|n| n.id != id);
    }

    /// Drop every queued notification.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}
