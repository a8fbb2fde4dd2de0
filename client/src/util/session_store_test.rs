use super::*;

fn alice() -> SessionRecord {
    SessionRecord {
        id: 1,
        username: "alice".to_owned(),
        roles: ["ADMIN".to_owned()].into_iter().collect(),
        token: "tok123".to_owned(),
    }
}

fn store_with_slots() -> (SessionStore, MemorySlot, MemorySlot) {
    let local = MemorySlot::new();
    let cookie = MemorySlot::new();
    let store = SessionStore::new(Arc::new(local.clone()), Arc::new(cookie.clone()));
    (store, local, cookie)
}

// =============================================================================
// save / read / clear
// =============================================================================

#[test]
fn save_then_read_returns_same_record() {
    let (store, _, _) = store_with_slots();
    store.save(&alice());
    assert_eq!(store.read(), Some(alice()));
}

#[test]
fn save_writes_both_slots() {
    let (store, local, cookie) = store_with_slots();
    store.save(&alice());

    let local_raw = local.load().expect("local value");
    assert_eq!(SessionRecord::from_json(&local_raw).expect("json"), alice());

    let cookie_raw = cookie.load().expect("cookie value");
    assert_eq!(cookie_raw, session::encode_cookie_value(&alice()).expect("cookie"));
}

#[test]
fn clear_empties_both_slots() {
    let (store, local, cookie) = store_with_slots();
    store.save(&alice());
    store.clear();
    assert!(local.load().is_none());
    assert!(cookie.load().is_none());
    assert!(store.read().is_none());
}

#[test]
fn clear_is_idempotent() {
    let (store, local, cookie) = store_with_slots();
    store.clear();
    store.clear();
    assert!(local.load().is_none());
    assert!(cookie.load().is_none());
}

#[test]
fn read_on_empty_store_is_none() {
    assert!(SessionStore::in_memory().read().is_none());
}

#[test]
fn corrupted_record_reads_as_none_and_is_purged() {
    let local = MemorySlot::with_value("{not json");
    let cookie = MemorySlot::with_value("stale");
    let store = SessionStore::new(Arc::new(local.clone()), Arc::new(cookie.clone()));

    assert!(store.read().is_none());
    assert!(local.load().is_none());
    assert!(cookie.load().is_none());
    assert!(store.read().is_none());
}

#[test]
fn token_comes_from_saved_record() {
    let store = SessionStore::in_memory();
    assert!(store.token().is_none());
    store.save(&alice());
    assert_eq!(store.token().as_deref(), Some("tok123"));
}

// =============================================================================
// cookie string helpers
// =============================================================================

#[test]
fn format_cookie_sets_max_age_and_root_path() {
    assert_eq!(format_cookie("user", "abc", 604_800), "user=abc; Max-Age=604800; Path=/; SameSite=Lax");
}

#[test]
fn format_cookie_with_zero_max_age_expires_it() {
    assert!(format_cookie("user", "", 0).starts_with("user=; Max-Age=0;"));
}

#[test]
fn find_cookie_picks_named_pair() {
    let header = "theme=dark; user=%7B%22id%22%3A1%7D; other=1";
    assert_eq!(find_cookie(header, "user"), Some("%7B%22id%22%3A1%7D"));
    assert_eq!(find_cookie(header, "theme"), Some("dark"));
    assert_eq!(find_cookie(header, "missing"), None);
}

#[test]
fn find_cookie_ignores_name_suffix_matches() {
    assert_eq!(find_cookie("superuser=x", "user"), None);
    assert_eq!(find_cookie("", "user"), None);
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn browser_slots_are_inert_without_a_browser() {
    let store = SessionStore::browser();
    store.save(&alice());
    assert!(store.read().is_none());
    store.clear();
}
