use session::SessionRecord;

use super::*;

fn signed_in(roles: &[&str]) -> AuthState {
    AuthState::Authenticated(SessionRecord {
        id: 1,
        username: "alice".to_owned(),
        roles: roles.iter().map(|r| (*r).to_owned()).collect(),
        token: "tok".to_owned(),
    })
}

fn hrefs(state: &AuthState) -> Vec<&'static str> {
    nav_links(state).into_iter().map(|(href, _)| href).collect()
}

#[test]
fn loading_shows_only_public_links() {
    assert_eq!(hrefs(&AuthState::Loading), vec!["/", "/restaurants"]);
}

#[test]
fn anonymous_sees_sign_in_and_register() {
    let links = hrefs(&AuthState::Anonymous);
    assert!(links.contains(&"/login"));
    assert!(links.contains(&"/register"));
    assert!(!links.contains(&"/profile"));
}

#[test]
fn member_sees_profile_but_not_dashboard() {
    let links = hrefs(&signed_in(&["USER"]));
    assert!(links.contains(&"/profile"));
    assert!(!links.contains(&"/dashboard"));
    assert!(!links.contains(&"/login"));
}

#[test]
fn admin_sees_dashboard() {
    assert!(hrefs(&signed_in(&["ROLE_ADMIN"])).contains(&"/dashboard"));
}
