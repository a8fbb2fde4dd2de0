use super::*;

#[test]
fn normalize_base_url_trims_trailing_slashes() {
    assert_eq!(normalize_base_url("https://api.example.com/api/v1//"), "https://api.example.com/api/v1");
    assert_eq!(normalize_base_url("  http://x:8080/api/v1 "), "http://x:8080/api/v1");
}

#[test]
fn normalize_base_url_falls_back_when_blank() {
    assert_eq!(normalize_base_url(""), DEFAULT_API_URL);
    assert_eq!(normalize_base_url(" / "), DEFAULT_API_URL);
}

#[test]
fn api_base_url_has_no_trailing_slash() {
    assert!(!api_base_url().ends_with('/'));
}
