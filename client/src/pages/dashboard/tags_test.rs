use super::*;
use crate::net::resources::tags_from_restaurants;

fn restaurant(id: i64, tags: &[&str]) -> Restaurant {
    Restaurant {
        id,
        name: format!("r{id}"),
        latitude: 0.0,
        longitude: 0.0,
        stars: 3,
        tags: tags.iter().map(|t| (*t).to_owned()).collect(),
        address: None,
    }
}

#[test]
fn assignment_needs_a_restaurant() {
    assert_eq!(validate_assignment("", "vegan"), Err("Choose a restaurant."));
    assert_eq!(validate_assignment("abc", "vegan"), Err("Choose a restaurant."));
    assert_eq!(validate_assignment("0", "vegan"), Err("Choose a restaurant."));
}

#[test]
fn assignment_needs_a_tag_name() {
    assert_eq!(validate_assignment("3", "   "), Err("Enter a tag name."));
}

#[test]
fn assignment_trims_inputs() {
    assert_eq!(validate_assignment(" 3 ", " fast food "), Ok((3, "fast food".to_owned())));
}

#[test]
fn replace_restaurant_updates_in_place() {
    let mut list = vec![restaurant(1, &["bbq"]), restaurant(2, &[])];
    replace_restaurant(&mut list, restaurant(2, &["vegan"]));
    assert_eq!(list.len(), 2);
    assert_eq!(list[1].tags, vec!["vegan".to_owned()]);
    let names: Vec<String> = tags_from_restaurants(&list).into_iter().map(|t| t.name).collect();
    assert_eq!(names, vec!["bbq", "vegan"]);
}

#[test]
fn replace_restaurant_appends_unknown_id() {
    let mut list = vec![restaurant(1, &[])];
    replace_restaurant(&mut list, restaurant(5, &["sushi"]));
    let ids: Vec<i64> = list.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 5]);
}
