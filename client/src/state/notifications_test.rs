use super::*;

fn note(kind: NotificationKind, title: &str) -> Notification {
    Notification::new(kind, title, None)
}

#[test]
fn new_notification_auto_closes_after_default_duration() {
    let n = Notification::new(NotificationKind::Info, "Saved", None);
    assert!(n.auto_close);
    assert_eq!(n.duration_ms, DEFAULT_DURATION_MS);
    assert!(!n.sticky().auto_close);
}

#[test]
fn push_returns_unique_ids_in_order() {
    let mut state = NotificationState::default();
    let a = state.push(note(NotificationKind::Success, "One"));
    let b = state.push(Notification::new(NotificationKind::Warning, "Two", Some("careful")));
    assert_ne!(a, b);
    let kinds: Vec<NotificationKind> = state.items.iter().map(|n| n.kind).collect();
    assert_eq!(kinds, vec![NotificationKind::Success, NotificationKind::Warning]);
    assert_eq!(state.items[1].message.as_deref(), Some("careful"));
}

#[test]
fn dismiss_removes_only_matching_id() {
    let mut state = NotificationState::default();
    let a = state.push(note(NotificationKind::Info, "a"));
    let b = state.push(note(NotificationKind::Error, "b"));
    state.dismiss(&a);
    state.dismiss("missing");
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.items[0].id, b);
}

#[test]
fn clear_empties_queue() {
    let mut state = NotificationState::default();
    state.push(note(NotificationKind::Info, "a"));
    state.push(note(NotificationKind::Info, "b"));
    state.clear();
    assert!(state.items.is_empty());
}

#[test]
fn kind_css_classes_are_distinct() {
    let classes = [
        NotificationKind::Success.css_class(),
        NotificationKind::Error.css_class(),
        NotificationKind::Warning.css_class(),
        NotificationKind::Info.css_class(),
    ];
    for (i, a) in classes.iter().enumerate() {
        for b in &classes[i + 1..] {
            assert_ne!(a, b);
        }
    }
}
