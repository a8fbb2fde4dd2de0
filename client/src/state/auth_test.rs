use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;

fn record(roles: &[&str]) -> SessionRecord {
    SessionRecord {
        id: 1,
        username: "alice".to_owned(),
        roles: roles.iter().map(|r| (*r).to_owned()).collect(),
        token: "tok123".to_owned(),
    }
}

fn forced_logout() -> SessionEvent {
    SessionEvent::ForcedLogout { path: "/profiles/me".to_owned() }
}

// =============================================================
// AuthState
// =============================================================

#[test]
fn auth_state_default_is_uninitialized() {
    assert_eq!(AuthState::default(), AuthState::Uninitialized);
}

#[test]
fn auth_state_is_loading_until_settled() {
    assert!(AuthState::Uninitialized.is_loading());
    assert!(AuthState::Loading.is_loading());
    assert!(!AuthState::Anonymous.is_loading());
    assert!(!AuthState::Authenticated(record(&[])).is_loading());
}

#[test]
fn auth_state_is_admin_only_when_authenticated_with_marker() {
    assert!(!AuthState::Loading.is_admin());
    assert!(!AuthState::Anonymous.is_admin());
    assert!(!AuthState::Authenticated(record(&["USER"])).is_admin());
    assert!(AuthState::Authenticated(record(&["ADMIN"])).is_admin());
    assert!(AuthState::Authenticated(record(&["ROLE_ADMIN"])).is_admin());
}

// =============================================================
// initialize
// =============================================================

#[test]
fn initialize_without_stored_session_is_anonymous() {
    let ctx = AuthContext::new(SessionStore::in_memory());
    assert_eq!(ctx.state(), AuthState::Uninitialized);
    ctx.initialize();
    assert_eq!(ctx.state(), AuthState::Anonymous);
}

#[test]
fn initialize_restores_stored_session() {
    let store = SessionStore::in_memory();
    store.save(&record(&["ADMIN"]));
    let ctx = AuthContext::new(store);
    ctx.initialize();
    assert_eq!(ctx.user(), Some(record(&["ADMIN"])));
    assert!(ctx.is_admin());
}

#[test]
fn initialize_passes_through_loading() {
    let ctx = AuthContext::new(SessionStore::in_memory());
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    ctx.subscribe(move |s| sink.lock().unwrap().push(s.clone()));

    ctx.initialize();
    assert_eq!(*seen.lock().unwrap(), vec![AuthState::Loading, AuthState::Anonymous]);
}

#[test]
fn initialize_runs_once() {
    let store = SessionStore::in_memory();
    let ctx = AuthContext::new(store.clone());
    ctx.initialize();
    store.save(&record(&[]));
    ctx.initialize();
    assert_eq!(ctx.state(), AuthState::Anonymous);
}

// =============================================================
// login / logout
// =============================================================

#[test]
fn login_writes_through_to_store() {
    let store = SessionStore::in_memory();
    let ctx = AuthContext::new(store.clone());
    ctx.initialize();
    ctx.login(record(&["ADMIN"]));

    assert_eq!(store.read(), Some(record(&["ADMIN"])));
    assert!(ctx.is_admin());
}

#[test]
fn login_works_from_any_state() {
    let ctx = AuthContext::new(SessionStore::in_memory());
    ctx.login(record(&[]));
    assert_eq!(ctx.state(), AuthState::Authenticated(record(&[])));
}

#[test]
fn logout_clears_state_and_store() {
    let store = SessionStore::in_memory();
    let ctx = AuthContext::new(store.clone());
    ctx.login(record(&["USER"]));
    ctx.logout();
    assert_eq!(ctx.state(), AuthState::Anonymous);
    assert!(store.read().is_none());
}

#[test]
fn logout_twice_matches_logout_once() {
    let store = SessionStore::in_memory();
    let ctx = AuthContext::new(store.clone());
    ctx.login(record(&["USER"]));
    ctx.logout();
    let once = (ctx.state(), store.read());
    ctx.logout();
    assert_eq!((ctx.state(), store.read()), once);
}

#[test]
fn admin_round_trip_accepts_both_markers() {
    for marker in ["ADMIN", "ROLE_ADMIN"] {
        let ctx = AuthContext::new(SessionStore::in_memory());
        ctx.login(record(&[marker]));
        assert!(ctx.is_admin(), "marker {marker}");
    }
}

// =============================================================
// subscriptions
// =============================================================

#[test]
fn listeners_fire_only_on_change() {
    let ctx = AuthContext::new(SessionStore::in_memory());
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hits);
    ctx.subscribe(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    ctx.logout();
    ctx.logout();
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[test]
fn unsubscribed_listener_is_silent() {
    let ctx = AuthContext::new(SessionStore::in_memory());
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hits);
    let id = ctx.subscribe(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    ctx.unsubscribe(id);
    ctx.login(record(&[]));
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[test]
fn listener_can_read_context_without_deadlock() {
    let ctx = AuthContext::new(SessionStore::in_memory());
    let observed = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&observed);
    let reader = ctx.clone();
    ctx.subscribe(move |_| *sink.lock().unwrap() = Some(reader.is_admin()));

    ctx.login(record(&["ADMIN"]));
    assert_eq!(*observed.lock().unwrap(), Some(true));
}

// =============================================================
// forced logout
// =============================================================

#[test]
fn forced_logout_event_drops_to_anonymous() {
    let store = SessionStore::in_memory();
    let events = SessionEvents::new();
    let ctx = AuthContext::new(store.clone());
    ctx.attach(&events);
    ctx.login(record(&["ADMIN"]));

    events.publish(&forced_logout());

    assert_eq!(ctx.state(), AuthState::Anonymous);
    assert!(store.read().is_none());
    assert!(!ctx.is_admin());
}

#[test]
fn forced_logout_leaves_unsettled_states_alone() {
    let events = SessionEvents::new();
    let ctx = AuthContext::new(SessionStore::in_memory());
    ctx.attach(&events);
    events.publish(&forced_logout());
    assert_eq!(ctx.state(), AuthState::Uninitialized);
}

#[test]
fn forced_logout_notifies_listeners() {
    let events = SessionEvents::new();
    let ctx = AuthContext::new(SessionStore::in_memory());
    ctx.attach(&events);
    ctx.login(record(&[]));

    let last = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&last);
    ctx.subscribe(move |s| *sink.lock().unwrap() = Some(s.clone()));
    events.publish(&forced_logout());

    assert_eq!(*last.lock().unwrap(), Some(AuthState::Anonymous));
}
