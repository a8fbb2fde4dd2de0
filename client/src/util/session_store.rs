//! Dual-location persistence for the signed-in user record.
//!
//! SYSTEM CONTEXT
//! ==============
//! The record lives in `localStorage` for client code and in the `user`
//! cookie for the server's route guard, which runs in a different process and
//! can only see cookies. [`SessionStore`] is the single write path for both,
//! so callers never touch one location without the other.
//!
//! TRADE-OFFS
//! ==========
//! Browser slots are best-effort: a missing `window` or a storage exception is
//! swallowed and SSR builds compile them to no-ops. A corrupted record reads as
//! "no session" and is purged from both slots rather than surfacing an error.

#[cfg(test)]
#[path = "session_store_test.rs"]
mod session_store_test;

use std::sync::{Arc, Mutex, PoisonError};

use session::{SESSION_COOKIE_MAX_AGE_SECS, SESSION_KEY, SessionRecord};

/// One persistence backend holding a single raw string value.
pub trait StorageSlot: Send + Sync {
    /// Current raw value, if any.
    fn load(&self) -> Option<String>;
    /// Replace the raw value.
    fn store(&self, raw: &str);
    /// Delete the value. Deleting a missing value is a no-op.
    fn remove(&self);
}

// =============================================================================
// MEMORY SLOT
// =============================================================================

/// In-process slot used during SSR and in tests.
#[derive(Clone, Debug, Default)]
pub struct MemorySlot {
    value: Arc<Mutex<Option<String>>>,
}

impl MemorySlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot pre-filled with `raw`.
    #[must_use]
    pub fn with_value(raw: &str) -> Self {
        Self { value: Arc::new(Mutex::new(Some(raw.to_owned()))) }
    }
}

impl StorageSlot for MemorySlot {
    fn load(&self) -> Option<String> {
        self.value.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn store(&self, raw: &str) {
        *self.value.lock().unwrap_or_else(PoisonError::into_inner) = Some(raw.to_owned());
    }

    fn remove(&self) {
        *self.value.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

// =============================================================================
// BROWSER SLOTS
// =============================================================================

/// `window.localStorage` entry.
#[derive(Clone, Debug)]
pub struct LocalStorageSlot {
    key: String,
}

impl LocalStorageSlot {
    #[must_use]
    pub fn new(key: &str) -> Self {
        Self { key: key.to_owned() }
    }
}

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

impl StorageSlot for LocalStorageSlot {
    fn load(&self) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?.get_item(&self.key).ok().flatten()
        }
        #[cfg(not(feature = "hydrate"))]
        {
            None
        }
    }

    fn store(&self, raw: &str) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.set_item(&self.key, raw);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&self.key, raw);
        }
    }

    fn remove(&self) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.remove_item(&self.key);
            }
        }
    }
}

/// `document.cookie` entry with a fixed max-age and `Path=/`.
#[derive(Clone, Debug)]
pub struct CookieSlot {
    name: String,
    max_age_secs: i64,
}

impl CookieSlot {
    #[must_use]
    pub fn new(name: &str, max_age_secs: i64) -> Self {
        Self { name: name.to_owned(), max_age_secs }
    }
}

/// Build a `document.cookie` assignment string.
pub(crate) fn format_cookie(name: &str, value: &str, max_age_secs: i64) -> String {
    format!("{name}={value}; Max-Age={max_age_secs}; Path=/; SameSite=Lax")
}

/// Find `name` in a `document.cookie` style `a=1; b=2` string.
pub(crate) fn find_cookie<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then_some(value)
    })
}

#[cfg(feature = "hydrate")]
fn html_document() -> Option<web_sys::HtmlDocument> {
    use wasm_bindgen::JsCast;

    web_sys::window()?.document()?.dyn_into::<web_sys::HtmlDocument>().ok()
}

impl StorageSlot for CookieSlot {
    fn load(&self) -> Option<String> {
        #[cfg(feature = "hydrate")]
        {
            let header = html_document()?.cookie().ok()?;
            find_cookie(&header, &self.name).filter(|v| !v.is_empty()).map(str::to_owned)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            None
        }
    }

    fn store(&self, raw: &str) {
        let cookie = format_cookie(&self.name, raw, self.max_age_secs);
        #[cfg(feature = "hydrate")]
        {
            if let Some(doc) = html_document() {
                let _ = doc.set_cookie(&cookie);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = cookie;
        }
    }

    fn remove(&self) {
        let cookie = format_cookie(&self.name, "", 0);
        #[cfg(feature = "hydrate")]
        {
            if let Some(doc) = html_document() {
                let _ = doc.set_cookie(&cookie);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = cookie;
        }
    }
}

// =============================================================================
// SESSION STORE
// =============================================================================

/// Write-through store over a local slot and a cookie slot.
///
/// The local slot holds plain JSON and is the one [`SessionStore::read`]
/// consults; the cookie slot holds percent-encoded JSON for the server.
#[derive(Clone)]
pub struct SessionStore {
    local: Arc<dyn StorageSlot>,
    cookie: Arc<dyn StorageSlot>,
}

impl SessionStore {
    #[must_use]
    pub fn new(local: Arc<dyn StorageSlot>, cookie: Arc<dyn StorageSlot>) -> Self {
        Self { local, cookie }
    }

    /// Store backed by `localStorage["user"]` and the 7-day `user` cookie.
    #[must_use]
    pub fn browser() -> Self {
        Self::new(
            Arc::new(LocalStorageSlot::new(SESSION_KEY)),
            Arc::new(CookieSlot::new(SESSION_KEY, SESSION_COOKIE_MAX_AGE_SECS)),
        )
    }

    /// Store backed by two fresh [`MemorySlot`]s.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemorySlot::new()), Arc::new(MemorySlot::new()))
    }

    /// Persist `record` to both slots.
    pub fn save(&self, record: &SessionRecord) {
        let local = match record.to_json() {
            Ok(raw) => raw,
            Err(e) => {
                leptos::logging::warn!("session store: cannot serialize record: {e}");
                return;
            }
        };
        let cookie = match session::encode_cookie_value(record) {
            Ok(raw) => raw,
            Err(e) => {
                leptos::logging::warn!("session store: cannot encode cookie: {e}");
                return;
            }
        };
        self.local.store(&local);
        self.cookie.store(&cookie);
    }

    /// Remove the record from both slots.
    pub fn clear(&self) {
        self.local.remove();
        self.cookie.remove();
    }

    /// Current record from the local slot. Corrupted data is purged.
    #[must_use]
    pub fn read(&self) -> Option<SessionRecord> {
        let raw = self.local.load()?;
        match SessionRecord::from_json(&raw) {
            Ok(record) => Some(record),
            Err(e) => {
                leptos::logging::warn!("session store: dropping corrupted record: {e}");
                self.clear();
                None
            }
        }
    }

    /// Bearer token of the current record.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.read().map(|record| record.token)
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore").finish_non_exhaustive()
    }
}
