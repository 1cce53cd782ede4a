//! HTTP-level integration tests for album likes and the cache-aside
//! counter.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_album, delete_auth, get, post_auth, signup};
use sqlx::PgPool;

/// Scenario D: like, duplicate like fails with a validation error, unlike,
/// then re-like succeeds.
#[sqlx::test(migrations = "../../migrations")]
async fn test_like_twice_then_unlike_and_relike(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_alice_id, alice) = signup(&app, "alice").await;
    let album_id = create_album(&app, "Machine Head", 1972).await;
    let uri = format!("/api/v1/albums/{album_id}/likes");

    let first = post_auth(app.clone(), &uri, &alice).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let duplicate = post_auth(app.clone(), &uri, &alice).await;
    assert_eq!(duplicate.status(), StatusCode::BAD_REQUEST);
    let json = body_json(duplicate).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["message"], "You have already liked this album");

    let unlike = delete_auth(app.clone(), &uri, &alice).await;
    assert_eq!(unlike.status(), StatusCode::OK);

    let relike = post_auth(app, &uri, &alice).await;
    assert_eq!(relike.status(), StatusCode::CREATED);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_like_missing_album_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_alice_id, alice) = signup(&app, "alice").await;

    let response = post_auth(app, "/api/v1/albums/album-missing/likes", &alice).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Unliking an album that was never liked is still a success.
#[sqlx::test(migrations = "../../migrations")]
async fn test_unlike_is_idempotent(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_alice_id, alice) = signup(&app, "alice").await;
    let album_id = create_album(&app, "Quiet", 2001).await;

    let response = delete_auth(app, &format!("/api/v1/albums/{album_id}/likes"), &alice).await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// The count endpoint is public, cache-accelerated, and marks cache hits
/// with `X-Data-Source: cache`. Mutations invalidate, so the next read is
/// a miss that repopulates with the fresh value.
#[sqlx::test(migrations = "../../migrations")]
async fn test_count_cache_roundtrip(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_alice_id, alice) = signup(&app, "alice").await;
    let (_bob_id, bob) = signup(&app, "bob").await;
    let album_id = create_album(&app, "Counted", 1999).await;
    let uri = format!("/api/v1/albums/{album_id}/likes");

    post_auth(app.clone(), &uri, &alice).await;
    post_auth(app.clone(), &uri, &bob).await;

    // First read: miss, served from the database, no cache marker.
    let response = get(app.clone(), &uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get("x-data-source").is_none());
    let json = body_json(response).await;
    assert_eq!(json["data"]["likes"], 2);

    // Second read: hit, marked as cache-sourced.
    let response = get(app.clone(), &uri).await;
    assert_eq!(
        response.headers().get("x-data-source").map(|v| v.to_str().unwrap()),
        Some("cache")
    );
    let json = body_json(response).await;
    assert_eq!(json["data"]["likes"], 2);

    // Unlike invalidates: the next read is a miss with the fresh count...
    delete_auth(app.clone(), &uri, &bob).await;
    let response = get(app.clone(), &uri).await;
    assert!(response.headers().get("x-data-source").is_none());
    let json = body_json(response).await;
    assert_eq!(json["data"]["likes"], 1);

    // ...and it repopulated the cache.
    let response = get(app, &uri).await;
    assert_eq!(
        response.headers().get("x-data-source").map(|v| v.to_str().unwrap()),
        Some("cache")
    );
    let json = body_json(response).await;
    assert_eq!(json["data"]["likes"], 1);
}

/// The counter reads require no authentication.
#[sqlx::test(migrations = "../../migrations")]
async fn test_count_is_public(pool: PgPool) {
    let app = common::build_test_app(pool);
    let album_id = create_album(&app, "Open", 2010).await;

    let response = get(app, &format!("/api/v1/albums/{album_id}/likes")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["likes"], 0);
}
