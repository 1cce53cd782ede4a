//! Integration tests for the export pipeline: queue lifecycle, single
//! delivery under concurrent claims, crash redelivery, and consumer
//! failure isolation.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use openmusic_db::models::export_job::ExportJobStatus;
use openmusic_db::models::song::CreateSong;
use openmusic_db::models::user::CreateUser;
use openmusic_db::repositories::{
    ExportJobRepo, PlaylistRepo, PlaylistSongRepo, SongRepo, UserRepo,
};
use openmusic_export::{
    EmailError, ExportConsumer, ExportQueue, ExportRequest, Mailer, PgExportQueue, EXPORT_QUEUE,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Records sent emails instead of talking to an SMTP server.
#[derive(Default)]
struct RecordingMailer {
    sent: Mutex<Vec<(String, String, String)>>,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(
        &self,
        to_email: &str,
        subject: &str,
        html_body: &str,
    ) -> Result<(), EmailError> {
        self.sent.lock().unwrap().push((
            to_email.to_string(),
            subject.to_string(),
            html_body.to_string(),
        ));
        Ok(())
    }
}

/// A mailer that always fails, for failure-isolation tests.
struct FailingMailer;

#[async_trait]
impl Mailer for FailingMailer {
    async fn send(&self, _: &str, _: &str, _: &str) -> Result<(), EmailError> {
        Err(EmailError::Build("smtp is down".to_string()))
    }
}

async fn seed_playlist(pool: &PgPool) -> String {
    let alice = UserRepo::create(
        pool,
        &CreateUser {
            username: "alice".to_string(),
            password_hash: "$argon2id$fake".to_string(),
            fullname: "Alice".to_string(),
        },
    )
    .await
    .unwrap();

    let playlist = PlaylistRepo::create(pool, "Road Trip", &alice.id).await.unwrap();

    let song = SongRepo::create(
        pool,
        &CreateSong {
            title: "Highway Star".to_string(),
            year: 1972,
            genre: "rock".to_string(),
            performer: "Deep Purple".to_string(),
            duration: Some(368),
            album_id: None,
        },
    )
    .await
    .unwrap();
    PlaylistSongRepo::add(pool, &playlist.id, &song.id).await.unwrap();

    playlist.id
}

fn request_payload(playlist_id: &str) -> serde_json::Value {
    serde_json::to_value(ExportRequest {
        playlist_id: playlist_id.to_string(),
        target_email: "alice@example.com".to_string(),
    })
    .unwrap()
}

// ---------------------------------------------------------------------------
// Queue lifecycle
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn publish_creates_one_pending_job(pool: PgPool) {
    let queue = PgExportQueue::new(pool.clone());
    queue
        .publish(EXPORT_QUEUE, request_payload("playlist-abc"))
        .await
        .unwrap();

    let jobs = ExportJobRepo::list(&pool, EXPORT_QUEUE).await.unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].status, ExportJobStatus::Pending.as_str());
    assert_eq!(jobs[0].payload["playlistId"], "playlist-abc");
}

#[sqlx::test(migrations = "../../migrations")]
async fn claim_is_exclusive_and_ordered(pool: PgPool) {
    ExportJobRepo::submit(&pool, EXPORT_QUEUE, &request_payload("playlist-first"))
        .await
        .unwrap();
    ExportJobRepo::submit(&pool, EXPORT_QUEUE, &request_payload("playlist-second"))
        .await
        .unwrap();

    let first = ExportJobRepo::claim_next(&pool, EXPORT_QUEUE).await.unwrap().unwrap();
    assert_eq!(first.payload["playlistId"], "playlist-first");

    let second = ExportJobRepo::claim_next(&pool, EXPORT_QUEUE).await.unwrap().unwrap();
    assert_eq!(second.payload["playlistId"], "playlist-second");

    // Both claimed: nothing left.
    let third = ExportJobRepo::claim_next(&pool, EXPORT_QUEUE).await.unwrap();
    assert!(third.is_none());
}

#[sqlx::test(migrations = "../../migrations")]
async fn stale_running_jobs_are_released_for_redelivery(pool: PgPool) {
    ExportJobRepo::submit(&pool, EXPORT_QUEUE, &request_payload("playlist-stuck"))
        .await
        .unwrap();
    let job = ExportJobRepo::claim_next(&pool, EXPORT_QUEUE).await.unwrap().unwrap();

    // A cutoff in the future treats the claim as already stale.
    let cutoff = chrono::Utc::now() + chrono::Duration::seconds(60);
    let released = ExportJobRepo::release_stale(&pool, EXPORT_QUEUE, cutoff).await.unwrap();
    assert_eq!(released, 1);

    let reclaimed = ExportJobRepo::claim_next(&pool, EXPORT_QUEUE).await.unwrap().unwrap();
    assert_eq!(reclaimed.id, job.id);
}

#[sqlx::test(migrations = "../../migrations")]
async fn settled_jobs_are_never_released(pool: PgPool) {
    ExportJobRepo::submit(&pool, EXPORT_QUEUE, &request_payload("playlist-done"))
        .await
        .unwrap();
    let job = ExportJobRepo::claim_next(&pool, EXPORT_QUEUE).await.unwrap().unwrap();
    ExportJobRepo::fail(&pool, job.id, "boom").await.unwrap();

    let cutoff = chrono::Utc::now() + chrono::Duration::seconds(60);
    let released = ExportJobRepo::release_stale(&pool, EXPORT_QUEUE, cutoff).await.unwrap();
    assert_eq!(released, 0);
}

// ---------------------------------------------------------------------------
// Consumer
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn consumer_sends_email_and_completes_job(pool: PgPool) {
    let playlist_id = seed_playlist(&pool).await;
    ExportJobRepo::submit(&pool, EXPORT_QUEUE, &request_payload(&playlist_id))
        .await
        .unwrap();

    let mailer = Arc::new(RecordingMailer::default());
    let consumer = ExportConsumer::new(pool.clone(), mailer.clone());

    let processed = consumer.process_next().await.unwrap();
    assert!(processed);

    let sent = mailer.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    let (to, subject, body) = &sent[0];
    assert_eq!(to, "alice@example.com");
    assert_eq!(subject, "Export Playlist: Road Trip");
    assert!(body.contains("Highway Star"));
    drop(sent);

    let jobs = ExportJobRepo::list(&pool, EXPORT_QUEUE).await.unwrap();
    assert_eq!(jobs[0].status, ExportJobStatus::Completed.as_str());
}

#[sqlx::test(migrations = "../../migrations")]
async fn malformed_payload_is_dropped_not_retried(pool: PgPool) {
    ExportJobRepo::submit(&pool, EXPORT_QUEUE, &serde_json::json!({"bogus": true}))
        .await
        .unwrap();

    let mailer = Arc::new(RecordingMailer::default());
    let consumer = ExportConsumer::new(pool.clone(), mailer.clone());

    let processed = consumer.process_next().await.unwrap();
    assert!(processed);
    assert!(mailer.sent.lock().unwrap().is_empty());

    let jobs = ExportJobRepo::list(&pool, EXPORT_QUEUE).await.unwrap();
    assert_eq!(jobs[0].status, ExportJobStatus::Failed.as_str());
    assert!(jobs[0].error_message.as_deref().unwrap().contains("Malformed"));

    // Terminal: nothing left to claim.
    let next = ExportJobRepo::claim_next(&pool, EXPORT_QUEUE).await.unwrap();
    assert!(next.is_none());
}

#[sqlx::test(migrations = "../../migrations")]
async fn mail_failure_is_terminal_and_does_not_poison_the_loop(pool: PgPool) {
    let playlist_id = seed_playlist(&pool).await;
    ExportJobRepo::submit(&pool, EXPORT_QUEUE, &request_payload(&playlist_id))
        .await
        .unwrap();
    ExportJobRepo::submit(&pool, EXPORT_QUEUE, &request_payload(&playlist_id))
        .await
        .unwrap();

    let consumer = ExportConsumer::new(pool.clone(), Arc::new(FailingMailer));

    // Both attempts settle despite the failing mailer.
    assert!(consumer.process_next().await.unwrap());
    assert!(consumer.process_next().await.unwrap());
    assert!(!consumer.process_next().await.unwrap());

    let jobs = ExportJobRepo::list(&pool, EXPORT_QUEUE).await.unwrap();
    assert_eq!(jobs.len(), 2);
    assert!(jobs
        .iter()
        .all(|j| j.status == ExportJobStatus::Failed.as_str()));
}
