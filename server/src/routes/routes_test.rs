use axum::body::Body;
use axum::http::Request;
use session::RoutePolicy;
use tower::ServiceExt;

use super::*;

// =============================================================================
// healthz
// =============================================================================

fn health_router() -> Router {
    with_guard(Router::new().route("/healthz", get(healthz)), AppState::new(RoutePolicy::default(), false))
}

#[tokio::test]
async fn healthz_answers_ok_through_the_guard() {
    let req = Request::builder().uri("/healthz").body(Body::empty()).unwrap();
    let resp = health_router().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn healthz_ignores_a_broken_session_cookie() {
    let req = Request::builder()
        .uri("/healthz")
        .header("cookie", "user=garbage")
        .body(Body::empty())
        .unwrap();
    let resp = health_router().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}
