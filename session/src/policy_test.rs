use std::collections::BTreeSet;

use super::*;

fn session(roles: &[&str]) -> SessionRecord {
    SessionRecord {
        id: 7,
        username: "alice".to_owned(),
        roles: roles.iter().map(|r| (*r).to_owned()).collect::<BTreeSet<_>>(),
        token: "tok".to_owned(),
    }
}

fn redirect(to: &str) -> RouteDecision {
    RouteDecision::Redirect(to.to_owned())
}

// =============================================================================
// matches_prefix
// =============================================================================

#[test]
fn prefix_matches_exact_and_nested_paths() {
    assert!(matches_prefix("/profile", "/profile"));
    assert!(matches_prefix("/profile/favorites", "/profile"));
    assert!(matches_prefix("/profile/", "/profile"));
}

#[test]
fn prefix_does_not_match_sibling_words() {
    assert!(!matches_prefix("/profiles", "/profile"));
    assert!(!matches_prefix("/loginx", "/login"));
    assert!(!matches_prefix("/", "/profile"));
}

#[test]
fn root_prefix_only_matches_root() {
    assert!(matches_prefix("/", "/"));
    assert!(!matches_prefix("/anything", "/"));
}

#[test]
fn normalize_prefixes_adds_leading_and_strips_trailing_slash() {
    assert_eq!(normalize_prefixes(["admin/", " /x ", "", "/y/"]), vec!["/admin", "/x", "/y"]);
}

// =============================================================================
// classification
// =============================================================================

#[test]
fn default_policy_classifies_known_paths() {
    let policy = RoutePolicy::default();
    assert!(policy.is_protected("/profile"));
    assert!(policy.is_protected("/dashboard/users"));
    assert!(policy.is_admin_only("/dashboard/tags"));
    assert!(!policy.is_admin_only("/profile"));
    assert!(policy.is_auth_only("/login"));
    assert!(policy.is_auth_only("/register"));
    assert!(!policy.is_protected("/restaurants"));
    assert!(policy.is_excluded("/pkg/client.wasm"));
}

#[test]
fn admin_only_prefixes_are_always_protected() {
    let policy = RoutePolicy::default().with_protected(["/profile"]).with_admin_only(["/admin"]);
    assert!(policy.is_protected("/admin/users"));
    assert_eq!(policy.decide("/admin/users", None), redirect("/login"));
}

#[test]
fn landing_depends_on_admin_marker() {
    let policy = RoutePolicy::default();
    assert_eq!(policy.landing_for(&session(&["ADMIN"])), "/dashboard");
    assert_eq!(policy.landing_for(&session(&["ROLE_ADMIN"])), "/dashboard");
    assert_eq!(policy.landing_for(&session(&["USER"])), "/");
}

#[test]
fn sign_in_path_detection_is_segment_aware() {
    let policy = RoutePolicy::default();
    assert!(policy.is_sign_in_path("/login"));
    assert!(policy.is_sign_in_path("/login/"));
    assert!(!policy.is_sign_in_path("/loginhelp"));
    assert!(!policy.is_sign_in_path("/"));
}

// =============================================================================
// decide
// =============================================================================

#[test]
fn anonymous_protected_path_goes_to_sign_in() {
    let policy = RoutePolicy::default();
    assert_eq!(policy.decide("/profile", None), redirect("/login"));
    assert_eq!(policy.decide("/profile/favorites", None), redirect("/login"));
}

#[test]
fn anonymous_admin_path_goes_to_sign_in_before_admin_check() {
    let policy = RoutePolicy::default();
    assert_eq!(policy.decide("/dashboard", None), redirect("/login"));
    assert_eq!(policy.decide("/dashboard/restaurants/create", None), redirect("/login"));
}

#[test]
fn non_admin_session_passes_protected_but_not_admin_paths() {
    let policy = RoutePolicy::default();
    let user = session(&["USER"]);
    assert_eq!(policy.decide("/profile", Some(&user)), RouteDecision::Allow);
    assert_eq!(policy.decide("/dashboard", Some(&user)), redirect("/"));
    assert_eq!(policy.decide("/dashboard/users", Some(&user)), redirect("/"));
}

#[test]
fn admin_session_reaches_dashboard_with_either_marker() {
    let policy = RoutePolicy::default();
    assert_eq!(policy.decide("/dashboard", Some(&session(&["ADMIN"]))), RouteDecision::Allow);
    assert_eq!(policy.decide("/dashboard", Some(&session(&["ROLE_ADMIN"]))), RouteDecision::Allow);
}

#[test]
fn signed_in_users_are_sent_away_from_auth_pages() {
    let policy = RoutePolicy::default();
    assert_eq!(policy.decide("/login", Some(&session(&["USER"]))), redirect("/"));
    assert_eq!(policy.decide("/register", Some(&session(&["ADMIN"]))), redirect("/dashboard"));
}

#[test]
fn anonymous_users_see_auth_and_public_pages() {
    let policy = RoutePolicy::default();
    for path in ["/", "/login", "/register", "/restaurants", "/product/123", "/profiles"] {
        assert_eq!(policy.decide(path, None), RouteDecision::Allow, "path {path}");
    }
}

#[test]
fn excluded_prefix_is_reported_without_changing_decisions() {
    let policy = RoutePolicy::default().with_excluded(["/dashboard/assets"]);
    assert!(policy.is_excluded("/dashboard/assets/logo.svg"));
    assert!(!policy.is_excluded("/dashboard"));
    assert_eq!(policy.decide("/dashboard/assets/logo.svg", None), redirect("/login"));
}

#[test]
fn every_admin_path_redirects_non_admins_to_public_landing() {
    let policy = RoutePolicy::default().with_admin_only(["/dashboard", "/ops"]);
    let user = session(&["USER", "EDITOR"]);
    for path in ["/dashboard", "/dashboard/x", "/ops", "/ops/a/b"] {
        assert_eq!(policy.decide(path, Some(&user)), redirect("/"), "path {path}");
        assert_eq!(policy.decide(path, None), redirect("/login"), "path {path}");
    }
}
