//! Publish/subscribe channel for session lifecycle events.
//!
//! SYSTEM CONTEXT
//! ==============
//! The API client publishes [`SessionEvent::ForcedLogout`] when the remote API
//! rejects the bearer token; the auth context subscribes and drops to
//! anonymous. Neither side holds a reference to the other, only to this bus,
//! which is created once at the composition root.

#[cfg(test)]
#[path = "events_test.rs"]
mod events_test;

use std::sync::{Arc, Mutex, PoisonError};

/// Session lifecycle signal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    /// The remote API answered 401 to an authenticated request.
    ForcedLogout {
        /// Request path that was rejected.
        path: String,
    },
}

/// Handle returned by [`SessionEvents::subscribe`].
pub type SubscriberId = u64;

type Handler = Arc<dyn Fn(&SessionEvent) + Send + Sync>;

#[derive(Default)]
struct Subscribers {
    next_id: SubscriberId,
    handlers: Vec<(SubscriberId, Handler)>,
}

/// Cloneable event bus; clones share one subscriber list.
#[derive(Clone, Default)]
pub struct SessionEvents {
    inner: Arc<Mutex<Subscribers>>,
}

impl SessionEvents {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for every future event.
    pub fn subscribe<F>(&self, handler: F) -> SubscriberId
    where
        F: Fn(&SessionEvent) + Send + Sync + 'static,
    {
        let mut subs = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        subs.next_id += 1;
        let id = subs.next_id;
        subs.handlers.push((id, Arc::new(handler)));
        id
    }

    /// Remove a handler. Unknown ids are ignored.
    pub fn unsubscribe(&self, id: SubscriberId) {
        let mut subs = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        subs.handlers.retain(|(sub_id, _)| *sub_id != id);
    }

    /// Deliver `event` to every subscriber in registration order.
    ///
    /// Handlers run after the subscriber lock is released, so a handler may
    /// subscribe or publish without deadlocking.
    pub fn publish(&self, event: &SessionEvent) {
        let handlers: Vec<Handler> = {
            let subs = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
            subs.handlers.iter().map(|(_, h)| Arc::clone(h)).collect()
        };
        for handler in handlers {
            handler(event);
        }
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).handlers.len()
    }
}

impl std::fmt::Debug for SessionEvents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionEvents").field("subscribers", &self.subscriber_count()).finish()
    }
}
