use super::*;

fn user(id: i64, roles: &[&str]) -> User {
    User { id, username: format!("u{id}"), roles: roles.iter().map(|r| (*r).to_owned()).collect() }
}

#[test]
fn role_summary_joins_roles() {
    assert_eq!(role_summary(&user(1, &["ADMIN", "USER"])), "ADMIN, USER");
    assert_eq!(role_summary(&user(2, &[])), "-");
}

#[test]
fn role_counts_accept_both_admin_markers() {
    let users = [user(1, &["ADMIN"]), user(2, &["ROLE_ADMIN"]), user(3, &["USER"]), user(4, &[])];
    assert_eq!(role_counts(&users), (2, 2));
    assert_eq!(role_counts(&[]), (0, 0));
}
