//! Shared helpers for HTTP-level integration tests.
//!
//! Mirrors the router construction in `main.rs` so tests exercise the same
//! middleware stack that production uses, backed by a fresh in-memory store
//! per test.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use mediavault_api::auth::jwt::JwtConfig;
use mediavault_api::config::ServerConfig;
use mediavault_api::router::build_app_router;
use mediavault_api::state::AppState;
use mediavault_db::Store;

pub const TEST_SECRET: &str = "integration-test-secret-key-0123456789";

/// Build a test `ServerConfig` with a known signing secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: Some(JwtConfig {
            secret: TEST_SECRET.to_string(),
            token_ttl_hours: 24,
        }),
    }
}

/// Build the full application router over the given store and config.
pub fn build_test_app_with(store: Store, config: ServerConfig) -> Router {
    let state = AppState::new(store, config.clone());
    build_app_router(state, &config)
}

/// Build the full application router over the given store.
pub fn build_test_app(store: Store) -> Router {
    build_test_app_with(store, test_config())
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("DELETE")
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Register a user through the API and return the issued token.
pub async fn register_user(app: Router, user: &str, email: &str, password: &str) -> String {
    let response = post_json(
        app,
        "/register",
        serde_json::json!({ "user": user, "email": email, "password": password }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["token"]
        .as_str()
        .expect("register response must contain a token")
        .to_string()
}

/// A valid media item body.
pub fn media_body(
    name: &str,
    media_type: &str,
    language: &str,
    score: f64,
    completed: &str,
) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "completedDate": completed,
        "score": score,
        "poster": format!("http://example.com/{name}.jpg"),
        "mediaType": media_type,
        "language": language,
        "comment": "worth revisiting"
    })
}
