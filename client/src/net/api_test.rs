use std::sync::Mutex;

use async_trait::async_trait;
use futures::executor::block_on;
use session::SessionRecord;

use super::*;
use crate::state::auth::{AuthContext, AuthState};

// =============================================================================
// Test doubles
// =============================================================================

#[derive(Default)]
struct MockTransport {
    requests: Mutex<Vec<HttpRequest>>,
    response: Mutex<Option<Result<HttpResponse, ApiError>>>,
}

impl MockTransport {
    fn replying(status: u16, body: &str) -> Arc<Self> {
        let mock = Self::default();
        *mock.response.lock().unwrap() = Some(Ok(HttpResponse { status, body: body.to_owned() }));
        Arc::new(mock)
    }

    fn failing(err: ApiError) -> Arc<Self> {
        let mock = Self::default();
        *mock.response.lock().unwrap() = Some(Err(err));
        Arc::new(mock)
    }

    fn last(&self) -> HttpRequest {
        self.requests.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait(?Send)]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        self.requests.lock().unwrap().push(request);
        self.response
            .lock()
            .unwrap()
            .clone()
            .unwrap_or(Ok(HttpResponse { status: 200, body: String::new() }))
    }
}

struct MockNavigator {
    current: String,
    visited: Mutex<Vec<String>>,
}

impl MockNavigator {
    fn at(path: &str) -> Arc<Self> {
        Arc::new(Self { current: path.to_owned(), visited: Mutex::new(Vec::new()) })
    }

    fn visited(&self) -> Vec<String> {
        self.visited.lock().unwrap().clone()
    }
}

impl Navigator for MockNavigator {
    fn current_path(&self) -> String {
        self.current.clone()
    }

    fn navigate(&self, path: &str) {
        self.visited.lock().unwrap().push(path.to_owned());
    }
}

fn record() -> SessionRecord {
    SessionRecord {
        id: 7,
        username: "alice".to_owned(),
        roles: ["ADMIN".to_owned()].into_iter().collect(),
        token: "tok123".to_owned(),
    }
}

struct Harness {
    api: ApiClient,
    store: SessionStore,
    auth: AuthContext,
    navigator: Arc<MockNavigator>,
}

fn harness(transport: Arc<MockTransport>, at: &str) -> Harness {
    let store = SessionStore::in_memory();
    let events = SessionEvents::new();
    let auth = AuthContext::new(store.clone());
    auth.attach(&events);
    let navigator = MockNavigator::at(at);
    let api = ApiClient::new("http://api.test/api/v1/", transport, store.clone(), events, navigator.clone());
    Harness { api, store, auth, navigator }
}

// =============================================================================
// Helpers
// =============================================================================

#[test]
fn error_message_prefers_server_message() {
    assert_eq!(error_message(409, r#"{"message":"Username taken"}"#), "Username taken");
}

#[test]
fn error_message_falls_back_to_status_line() {
    assert_eq!(error_message(500, "<html>oops</html>"), "HTTP error! status: 500");
    assert_eq!(error_message(404, r#"{"message":"  "}"#), "HTTP error! status: 404");
    assert_eq!(error_message(400, ""), "HTTP error! status: 400");
}

#[test]
fn parse_body_empty_reads_as_null() {
    let value: serde_json::Value = parse_body("").unwrap();
    assert!(value.is_null());
    let unit: Option<u32> = parse_body("  ").unwrap();
    assert_eq!(unit, None);
}

#[test]
fn parse_body_reports_shape_mismatch() {
    let result: Result<Vec<u32>, _> = parse_body(r#"{"a":1}"#);
    assert!(matches!(result, Err(ApiError::Decode(_))));
}

#[test]
fn api_error_status_codes() {
    assert_eq!(ApiError::SessionExpired.status(), Some(401));
    assert_eq!(ApiError::Status { status: 404, message: String::new() }.status(), Some(404));
    assert_eq!(ApiError::Unavailable.status(), None);
    assert_eq!(ApiError::SessionExpired.to_string(), SESSION_EXPIRED_MESSAGE);
}

// =============================================================================
// Request shaping
// =============================================================================

#[test]
fn base_url_trailing_slash_is_trimmed() {
    let h = harness(MockTransport::replying(200, "[]"), "/");
    assert_eq!(h.api.base_url(), "http://api.test/api/v1");
    assert_eq!(h.api.endpoint("/users"), "http://api.test/api/v1/users");
}

#[test]
fn authed_request_carries_bearer_token() {
    let transport = MockTransport::replying(200, "[]");
    let h = harness(transport.clone(), "/");
    h.store.save(&record());

    let _: Vec<serde_json::Value> = block_on(h.api.get("/users")).unwrap();

    let sent = transport.last();
    assert_eq!(sent.method, Method::Get);
    assert_eq!(sent.url, "http://api.test/api/v1/users");
    assert_eq!(sent.header("authorization"), Some("Bearer tok123"));
    assert_eq!(sent.header("Content-Type"), Some("application/json"));
}

#[test]
fn authed_request_without_session_has_no_authorization() {
    let transport = MockTransport::replying(200, "[]");
    let h = harness(transport.clone(), "/");

    let _: Vec<serde_json::Value> = block_on(h.api.get("/users")).unwrap();
    assert_eq!(transport.last().header("Authorization"), None);
}

#[test]
fn public_request_never_carries_token() {
    let transport = MockTransport::replying(200, "{}");
    let h = harness(transport.clone(), "/login");
    h.store.save(&record());

    let body = serde_json::json!({ "username": "a", "password": "b" });
    let _: serde_json::Value = block_on(h.api.send_public(Method::Post, "/authentication/sign-in", Some(&body))).unwrap();

    let sent = transport.last();
    assert_eq!(sent.header("Authorization"), None);
    assert_eq!(sent.body, Some(body));
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn unauthorized_forces_logout_and_redirects() {
    let h = harness(MockTransport::replying(401, ""), "/profile");
    h.auth.login(record());

    let result: Result<serde_json::Value, _> = block_on(h.api.get("/profiles/me"));

    assert_eq!(result, Err(ApiError::SessionExpired));
    assert!(h.store.read().is_none());
    assert_eq!(h.auth.state(), AuthState::Anonymous);
    assert_eq!(h.navigator.visited(), vec!["/login".to_owned()]);
}

#[test]
fn unauthorized_on_sign_in_page_does_not_redirect() {
    let h = harness(MockTransport::replying(401, ""), "/login");
    h.auth.login(record());

    let result: Result<serde_json::Value, _> = block_on(h.api.get("/profiles/me"));

    assert_eq!(result, Err(ApiError::SessionExpired));
    assert_eq!(h.auth.state(), AuthState::Anonymous);
    assert!(h.navigator.visited().is_empty());
}

#[test]
fn unauthorized_public_request_is_plain_error() {
    let h = harness(MockTransport::replying(401, r#"{"message":"Bad credentials"}"#), "/login");
    h.auth.login(record());

    let result: Result<serde_json::Value, _> =
        block_on(h.api.send_public::<_, ()>(Method::Post, "/authentication/sign-in", None));

    assert_eq!(result, Err(ApiError::Status { status: 401, message: "Bad credentials".to_owned() }));
    assert!(h.store.read().is_some());
    assert!(h.navigator.visited().is_empty());
}

#[test]
fn server_error_keeps_session() {
    let h = harness(MockTransport::replying(500, r#"{"message":"boom"}"#), "/profile");
    h.auth.login(record());

    let result: Result<serde_json::Value, _> = block_on(h.api.get("/profiles/me"));

    assert_eq!(result.unwrap_err().to_string(), "boom");
    assert_eq!(h.store.read(), Some(record()));
    assert!(h.auth.state().user().is_some());
}

#[test]
fn transport_failure_passes_through() {
    let h = harness(MockTransport::failing(ApiError::Transport("offline".to_owned())), "/");
    let result: Result<serde_json::Value, _> = block_on(h.api.get("/users"));
    assert_eq!(result, Err(ApiError::Transport("offline".to_owned())));
}
