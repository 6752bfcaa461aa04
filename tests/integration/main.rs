//! Integration tests for the status service.
//!
//! These drive the full router in-process; no socket is bound.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use pretty_assertions::assert_eq;
use tower::ServiceExt;

use idle_api::api::{create_router, AppState};
use idle_api::config::Config;
use idle_api::StatusHolder;

/// Build a router with the default initial status.
fn test_app() -> Router {
    create_router(AppState::new(StatusHolder::default()))
}

async fn get_status(app: &Router) -> (StatusCode, String) {
    send(app, Request::builder().uri("/status").body(Body::empty()).unwrap()).await
}

async fn post_status(app: &Router, query: &str) -> (StatusCode, String) {
    let uri = format!("/status{query}");
    send(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn get_before_any_post_returns_idle() {
    let app = test_app();

    assert_eq!(get_status(&app).await, (StatusCode::OK, "idle".to_string()));
}

#[tokio::test]
async fn post_then_get_returns_posted_value() {
    let app = test_app();

    let posted = post_status(&app, "?state=running").await;
    assert_eq!(posted, (StatusCode::OK, "running".to_string()));
    assert_eq!(get_status(&app).await, (StatusCode::OK, "running".to_string()));
}

#[tokio::test]
async fn empty_state_is_stored() {
    let app = test_app();

    assert_eq!(post_status(&app, "?state=").await, (StatusCode::OK, String::new()));
    assert_eq!(get_status(&app).await, (StatusCode::OK, String::new()));
}

#[tokio::test]
async fn sequential_posts_keep_the_last_value() {
    let app = test_app();
    let values = ["starting", "running", "draining", "stopped"];

    for value in values {
        let (status, body) = post_status(&app, &format!("?state={value}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, value);
    }

    assert_eq!(get_status(&app).await.1, "stopped");
}

#[tokio::test]
async fn post_decodes_percent_encoded_state() {
    let app = test_app();

    let (status, body) = post_status(&app, "?state=on%20hold").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "on hold");
}

#[tokio::test]
async fn post_without_state_is_rejected_and_keeps_value() {
    let app = test_app();
    post_status(&app, "?state=running").await;

    let (status, body) = post_status(&app, "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("state"), "unexpected body {body:?}");

    assert_eq!(get_status(&app).await.1, "running");
}

#[tokio::test]
async fn post_with_undecodable_state_is_rejected_and_keeps_value() {
    let app = test_app();
    post_status(&app, "?state=running").await;

    let (status, body) = post_status(&app, "?state=%FF").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.starts_with("invalid query string"), "unexpected body {body:?}");

    assert_eq!(get_status(&app).await.1, "running");
}

#[tokio::test]
async fn configured_initial_status_is_served() {
    let config = Config {
        initial_status: "booting".to_string(),
        ..Config::default()
    };
    let app = create_router(AppState::new(StatusHolder::new(config.initial_status)));

    assert_eq!(get_status(&app).await.1, "booting");
}

#[tokio::test]
async fn health_reports_ok() {
    let app = test_app();

    let (status, body) = send(&app, Request::builder().uri("/health").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn unsupported_method_is_rejected() {
    let app = test_app();

    let (status, _) = send(
        &app,
        Request::builder()
            .method("DELETE")
            .uri("/status")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}
