//! HTTP-level integration tests for collaboration grant management.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_playlist, delete_json_auth, post_json_auth, signup};
use sqlx::PgPool;

/// Granting twice for the same pair returns the same collaboration id
/// both times and creates exactly one row.
#[sqlx::test(migrations = "../../migrations")]
async fn test_add_collaborator_is_idempotent(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_alice_id, alice) = signup(&app, "alice").await;
    let (bob_id, _bob) = signup(&app, "bob").await;

    let playlist_id = create_playlist(&app, &alice, "Shared").await;
    let pair = serde_json::json!({ "playlistId": playlist_id, "userId": bob_id });

    let first = post_json_auth(app.clone(), "/api/v1/collaborations", &alice, pair.clone()).await;
    assert_eq!(first.status(), StatusCode::CREATED);
    let first_id = body_json(first).await["data"]["collaborationId"]
        .as_str()
        .unwrap()
        .to_string();

    let second = post_json_auth(app, "/api/v1/collaborations", &alice, pair).await;
    assert_eq!(second.status(), StatusCode::CREATED);
    let second_id = body_json(second).await["data"]["collaborationId"]
        .as_str()
        .unwrap()
        .to_string();

    assert_eq!(first_id, second_id, "idempotent grant must return the same id");

    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM collaborations WHERE playlist_id = $1")
            .bind(&playlist_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(count, 1);
}

/// Only the owner may manage grants; a collaborator is not enough.
#[sqlx::test(migrations = "../../migrations")]
async fn test_grant_management_is_owner_only(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_alice_id, alice) = signup(&app, "alice").await;
    let (bob_id, bob) = signup(&app, "bob").await;
    let (carol_id, _carol) = signup(&app, "carol").await;

    let playlist_id = create_playlist(&app, &alice, "Guarded").await;
    post_json_auth(
        app.clone(),
        "/api/v1/collaborations",
        &alice,
        serde_json::json!({ "playlistId": playlist_id, "userId": bob_id }),
    )
    .await;

    // Bob, a collaborator, may not grant carol access.
    let response = post_json_auth(
        app.clone(),
        "/api/v1/collaborations",
        &bob,
        serde_json::json!({ "playlistId": playlist_id, "userId": carol_id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Nor revoke his own grant.
    let response = delete_json_auth(
        app,
        "/api/v1/collaborations",
        &bob,
        serde_json::json!({ "playlistId": playlist_id, "userId": bob_id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_grant_for_missing_user_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_alice_id, alice) = signup(&app, "alice").await;
    let playlist_id = create_playlist(&app, &alice, "Lonely").await;

    let response = post_json_auth(
        app,
        "/api/v1/collaborations",
        &alice,
        serde_json::json!({ "playlistId": playlist_id, "userId": "user-missing" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_grant_for_missing_playlist_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_alice_id, alice) = signup(&app, "alice").await;
    let (bob_id, _bob) = signup(&app, "bob").await;

    let response = post_json_auth(
        app,
        "/api/v1/collaborations",
        &alice,
        serde_json::json!({ "playlistId": "playlist-missing", "userId": bob_id }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Revoking a grant that does not exist is a success (idempotent delete).
#[sqlx::test(migrations = "../../migrations")]
async fn test_revoke_is_idempotent(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_alice_id, alice) = signup(&app, "alice").await;
    let (bob_id, _bob) = signup(&app, "bob").await;

    let playlist_id = create_playlist(&app, &alice, "Transient").await;
    let pair = serde_json::json!({ "playlistId": playlist_id, "userId": bob_id });

    post_json_auth(app.clone(), "/api/v1/collaborations", &alice, pair.clone()).await;

    let first = delete_json_auth(app.clone(), "/api/v1/collaborations", &alice, pair.clone()).await;
    assert_eq!(first.status(), StatusCode::OK);

    let second = delete_json_auth(app, "/api/v1/collaborations", &alice, pair).await;
    assert_eq!(second.status(), StatusCode::OK);
}
