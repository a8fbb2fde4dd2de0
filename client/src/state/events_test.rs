use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;

fn forced(path: &str) -> SessionEvent {
    SessionEvent::ForcedLogout { path: path.to_owned() }
}

#[test]
fn publish_reaches_every_subscriber() {
    let events = SessionEvents::new();
    let hits = Arc::new(AtomicUsize::new(0));
    for _ in 0..3 {
        let hits = Arc::clone(&hits);
        events.subscribe(move |_| {
            hits.fetch_add(1, Ordering::SeqCst);
        });
    }
    events.publish(&forced("/profiles/me"));
    assert_eq!(hits.load(Ordering::SeqCst), 3);
}

#[test]
fn subscribers_see_event_payload() {
    let events = SessionEvents::new();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    events.subscribe(move |ev| sink.lock().unwrap().push(ev.clone()));

    events.publish(&forced("/users"));
    assert_eq!(*seen.lock().unwrap(), vec![forced("/users")]);
}

#[test]
fn unsubscribe_stops_delivery() {
    let events = SessionEvents::new();
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hits);
    let id = events.subscribe(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    events.unsubscribe(id);
    events.unsubscribe(id);
    events.publish(&forced("/x"));
    assert_eq!(hits.load(Ordering::SeqCst), 0);
    assert_eq!(events.subscriber_count(), 0);
}

#[test]
fn clones_share_subscribers() {
    let events = SessionEvents::new();
    let other = events.clone();
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hits);
    other.subscribe(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    events.publish(&forced("/x"));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[test]
fn handler_may_publish_reentrantly() {
    let events = SessionEvents::new();
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hits);
    let bus = events.clone();
    events.subscribe(move |ev| {
        if counter.fetch_add(1, Ordering::SeqCst) == 0 {
            bus.publish(ev);
        }
    });
    events.publish(&forced("/x"));
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}
