use super::*;

#[test]
fn validate_credentials_trims_username() {
    let req = validate_credentials("  alice ", "secret").unwrap();
    assert_eq!(req.username, "alice");
    assert_eq!(req.password, "secret");
}

#[test]
fn validate_credentials_rejects_blank_username() {
    assert_eq!(validate_credentials("   ", "secret"), Err("Enter your username."));
}

#[test]
fn validate_credentials_rejects_empty_password() {
    assert_eq!(validate_credentials("alice", ""), Err("Enter your password."));
}

#[test]
fn validate_credentials_keeps_password_whitespace() {
    assert_eq!(validate_credentials("alice", " pw ").unwrap().password, " pw ");
}
