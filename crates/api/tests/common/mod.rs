//! Shared helpers for HTTP-level integration tests.
//!
//! Mirrors the production router construction (same middleware stack) and
//! provides `tower::ServiceExt::oneshot` request helpers.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use openmusic_api::auth::jwt::JwtConfig;
use openmusic_api::cache::MemoryCache;
use openmusic_api::config::ServerConfig;
use openmusic_api::router::build_app_router;
use openmusic_api::state::AppState;
use openmusic_export::PgExportQueue;

/// Build a test `ServerConfig` with safe defaults and known JWT secrets.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            access_secret: "test-access-secret-long-enough-for-hmac".to_string(),
            refresh_secret: "test-refresh-secret-long-enough-for-hmac".to_string(),
            access_expiry_mins: 30,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool, an in-memory cache, and the Postgres-backed queue.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool: pool.clone(),
        config: Arc::new(config.clone()),
        cache: Arc::new(MemoryCache::new()),
        queue: Arc::new(PgExportQueue::new(pool)),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn request(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    request(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    request(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    request(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    request(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    request(app, Method::POST, uri, Some(token), None).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    request(app, Method::PUT, uri, None, Some(body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    request(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    request(app, Method::DELETE, uri, None, Some(body)).await
}

pub async fn delete_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    request(app, Method::DELETE, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    request(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Scenario helpers
// ---------------------------------------------------------------------------

/// Password used for all test users.
pub const TEST_PASSWORD: &str = "pw12345678";

/// Register a user via the API and return their public id.
pub async fn register_user(app: &Router, username: &str) -> String {
    let body = serde_json::json!({
        "username": username,
        "password": TEST_PASSWORD,
        "fullname": format!("{username} Fullname"),
    });
    let response = post_json(app.clone(), "/api/v1/users", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    json["data"]["userId"].as_str().unwrap().to_string()
}

/// Log a registered user in and return (access_token, refresh_token).
pub async fn login_user(app: &Router, username: &str) -> (String, String) {
    let body = serde_json::json!({ "username": username, "password": TEST_PASSWORD });
    let response = post_json(app.clone(), "/api/v1/authentications", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    (
        json["data"]["accessToken"].as_str().unwrap().to_string(),
        json["data"]["refreshToken"].as_str().unwrap().to_string(),
    )
}

/// Register + login in one step, returning (user_id, access_token).
pub async fn signup(app: &Router, username: &str) -> (String, String) {
    let user_id = register_user(app, username).await;
    let (access, _refresh) = login_user(app, username).await;
    (user_id, access)
}

/// Create a playlist owned by the given token's user, returning its id.
pub async fn create_playlist(app: &Router, token: &str, name: &str) -> String {
    let response = post_json_auth(
        app.clone(),
        "/api/v1/playlists",
        token,
        serde_json::json!({ "name": name }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    json["data"]["playlistId"].as_str().unwrap().to_string()
}

/// Create a song via the API, returning its id.
pub async fn create_song(app: &Router, title: &str, performer: &str) -> String {
    let body = serde_json::json!({
        "title": title,
        "year": 1999,
        "genre": "rock",
        "performer": performer,
    });
    let response = post_json(app.clone(), "/api/v1/songs", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    json["data"]["songId"].as_str().unwrap().to_string()
}

/// Create an album via the API, returning its id.
pub async fn create_album(app: &Router, name: &str, year: i32) -> String {
    let response = post_json(
        app.clone(),
        "/api/v1/albums",
        serde_json::json!({ "name": name, "year": year }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    json["data"]["albumId"].as_str().unwrap().to_string()
}
