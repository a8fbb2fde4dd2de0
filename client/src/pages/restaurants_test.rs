use super::*;

#[test]
fn stars_label_pads_to_five() {
    assert_eq!(stars_label(3), "★★★☆☆");
    assert_eq!(stars_label(0), "☆☆☆☆☆");
}

#[test]
fn stars_label_clamps_overflow() {
    assert_eq!(stars_label(9), "★★★★★");
}

#[test]
fn selected_tag_maps_blank_to_all() {
    assert_eq!(selected_tag(""), None);
    assert_eq!(selected_tag("  "), None);
    assert_eq!(selected_tag(" vegan "), Some("vegan".to_owned()));
}
