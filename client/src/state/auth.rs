//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! [`AuthContext`] is the one source of truth for who is signed in. It is
//! built at the composition root, provided to views through Leptos context,
//! and mirrored into an `RwSignal<AuthState>` through [`AuthContext::subscribe`]
//! so route guards and the navbar re-render on change.
//!
//! LIFECYCLE
//! =========
//! `Uninitialized -> Loading -> {Anonymous, Authenticated}` on mount; after
//! that `login`, `logout` and the forced-logout event move between the two
//! settled states. Every transition writes through to the [`SessionStore`].

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::{Arc, Mutex, PoisonError};

use session::SessionRecord;

use crate::state::events::{SessionEvent, SessionEvents, SubscriberId};
use crate::util::session_store::SessionStore;

/// Authentication state of the page session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum AuthState {
    /// Not yet mounted.
    #[default]
    Uninitialized,
    /// Reading the persisted session.
    Loading,
    /// No session.
    Anonymous,
    /// Signed in.
    Authenticated(SessionRecord),
}

impl AuthState {
    /// The signed-in record, if any.
    #[must_use]
    pub fn user(&self) -> Option<&SessionRecord> {
        match self {
            Self::Authenticated(record) => Some(record),
            _ => None,
        }
    }

    /// True until the persisted session has been read.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Uninitialized | Self::Loading)
    }

    /// Admin marker present on a settled, signed-in state.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user().is_some_and(SessionRecord::is_admin)
    }
}

/// Handle returned by [`AuthContext::subscribe`].
pub type ListenerId = u64;

type Listener = Arc<dyn Fn(&AuthState) + Send + Sync>;

#[derive(Default)]
struct Inner {
    state: AuthState,
    next_listener: ListenerId,
    listeners: Vec<(ListenerId, Listener)>,
}

/// Observable auth state holder with write-through persistence.
///
/// Clones share state, listeners and store.
#[derive(Clone)]
pub struct AuthContext {
    store: SessionStore,
    inner: Arc<Mutex<Inner>>,
}

impl AuthContext {
    #[must_use]
    pub fn new(store: SessionStore) -> Self {
        Self { store, inner: Arc::new(Mutex::new(Inner::default())) }
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> AuthState {
        self.lock().state.clone()
    }

    #[must_use]
    pub fn user(&self) -> Option<SessionRecord> {
        self.lock().state.user().cloned()
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.lock().state.is_admin()
    }

    /// Hydrate from the session store. Only the first call has an effect.
    pub fn initialize(&self) {
        if self.lock().state != AuthState::Uninitialized {
            return;
        }
        self.transition(AuthState::Loading);
        let next = match self.store.read() {
            Some(record) => {
                leptos::logging::log!("auth: restored session for {}", record.username);
                AuthState::Authenticated(record)
            }
            None => AuthState::Anonymous,
        };
        self.transition(next);
    }

    /// Become `Authenticated(record)` and persist it.
    pub fn login(&self, record: SessionRecord) {
        self.store.save(&record);
        self.transition(AuthState::Authenticated(record));
    }

    /// Become `Anonymous` and clear persistence.
    pub fn logout(&self) {
        self.store.clear();
        self.transition(AuthState::Anonymous);
    }

    /// Subscribe this context to forced-logout events on `events`.
    pub fn attach(&self, events: &SessionEvents) -> SubscriberId {
        let ctx = self.clone();
        events.subscribe(move |event| ctx.handle_event(event))
    }

    fn handle_event(&self, event: &SessionEvent) {
        match event {
            SessionEvent::ForcedLogout { path } => {
                leptos::logging::warn!("auth: forced logout after 401 from {path}");
                self.store.clear();
                if matches!(self.lock().state, AuthState::Authenticated(_)) {
                    self.transition(AuthState::Anonymous);
                }
            }
        }
    }

    /// Register `listener`; it runs after every state change.
    pub fn subscribe<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&AuthState) + Send + Sync + 'static,
    {
        let mut inner = self.lock();
        inner.next_listener += 1;
        let id = inner.next_listener;
        inner.listeners.push((id, Arc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: ListenerId) {
        self.lock().listeners.retain(|(listener_id, _)| *listener_id != id);
    }

    fn transition(&self, next: AuthState) {
        let (state, listeners) = {
            let mut inner = self.lock();
            if inner.state == next {
                return;
            }
            inner.state = next;
            let listeners: Vec<Listener> = inner.listeners.iter().map(|(_, l)| Arc::clone(l)).collect();
            (inner.state.clone(), listeners)
        };
        for listener in listeners {
            listener(&state);
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthContext").field("state", &self.state()).finish_non_exhaustive()
    }
}
