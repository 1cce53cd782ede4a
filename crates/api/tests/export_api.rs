//! HTTP-level integration tests for the export producer endpoint.

mod common;

use axum::http::StatusCode;
use common::{create_playlist, post_json_auth, signup};
use openmusic_db::models::export_job::ExportJobStatus;
use openmusic_db::repositories::ExportJobRepo;
use openmusic_export::EXPORT_QUEUE;
use sqlx::PgPool;

/// Scenario C: exporting someone else's playlist is forbidden; exporting
/// your own enqueues exactly one durable message with the agreed payload.
#[sqlx::test(migrations = "../../migrations")]
async fn test_export_is_strict_owner_and_enqueues_once(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_alice_id, alice) = signup(&app, "alice").await;
    let (_bob_id, bob) = signup(&app, "bob").await;

    let bobs_playlist = create_playlist(&app, &bob, "Bob's Mix").await;
    let alices_playlist = create_playlist(&app, &alice, "Alice's Mix").await;

    let body = serde_json::json!({ "targetEmail": "alice@example.com" });

    // Alice cannot export Bob's playlist.
    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/export/playlists/{bobs_playlist}"),
        &alice,
        body.clone(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(ExportJobRepo::list(&pool, EXPORT_QUEUE).await.unwrap().is_empty());

    // Exporting her own returns immediately with 201.
    let response = post_json_auth(
        app,
        &format!("/api/v1/export/playlists/{alices_playlist}"),
        &alice,
        body,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let jobs = ExportJobRepo::list(&pool, EXPORT_QUEUE).await.unwrap();
    assert_eq!(jobs.len(), 1, "exactly one message must be enqueued");
    assert_eq!(jobs[0].status, ExportJobStatus::Pending.as_str());
    assert_eq!(jobs[0].payload["playlistId"], alices_playlist.as_str());
    assert_eq!(jobs[0].payload["targetEmail"], "alice@example.com");
}

/// Collaborators hold shared-tier rights only: export is refused.
#[sqlx::test(migrations = "../../migrations")]
async fn test_collaborator_cannot_export(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_alice_id, alice) = signup(&app, "alice").await;
    let (bob_id, bob) = signup(&app, "bob").await;

    let playlist_id = create_playlist(&app, &alice, "Shared").await;
    post_json_auth(
        app.clone(),
        "/api/v1/collaborations",
        &alice,
        serde_json::json!({ "playlistId": playlist_id, "userId": bob_id }),
    )
    .await;

    let response = post_json_auth(
        app,
        &format!("/api/v1/export/playlists/{playlist_id}"),
        &bob,
        serde_json::json!({ "targetEmail": "bob@example.com" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(ExportJobRepo::list(&pool, EXPORT_QUEUE).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_export_missing_playlist_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (_alice_id, alice) = signup(&app, "alice").await;

    let response = post_json_auth(
        app,
        "/api/v1/export/playlists/playlist-missing",
        &alice,
        serde_json::json!({ "targetEmail": "alice@example.com" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../migrations")]
async fn test_export_rejects_invalid_email(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let (_alice_id, alice) = signup(&app, "alice").await;
    let playlist_id = create_playlist(&app, &alice, "Mailless").await;

    let response = post_json_auth(
        app,
        &format!("/api/v1/export/playlists/{playlist_id}"),
        &alice,
        serde_json::json!({ "targetEmail": "not-an-email" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(ExportJobRepo::list(&pool, EXPORT_QUEUE).await.unwrap().is_empty());
}
