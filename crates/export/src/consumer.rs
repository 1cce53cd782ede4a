//! Export consumer: the long-running worker side of the pipeline.
//!
//! Claims one job at a time via `FOR UPDATE SKIP LOCKED`, so any number of
//! worker processes can share a queue. A job is settled (completed or
//! failed) only after the handler finishes; the policy is "acknowledge once
//! attempted": business failures (missing playlist, mail errors, malformed
//! payloads) are logged and marked failed, never requeued. Only a process
//! crash -- a job stuck in `running` past the visibility timeout -- leads
//! to redelivery, via [`ExportJobRepo::release_stale`].

use std::sync::Arc;
use std::time::Duration;

use openmusic_db::models::export_job::ExportJob;
use openmusic_db::repositories::{ExportJobRepo, PlaylistRepo, PlaylistSongRepo};
use openmusic_db::DbPool;
use tokio_util::sync::CancellationToken;

use crate::mailer::{EmailError, Mailer};
use crate::queue::{ExportRequest, EXPORT_QUEUE};
use crate::render::{render_html, subject, ExportDocument, ExportedPlaylist};

/// Default polling interval for the consumer loop.
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// How long a claimed job may sit in `running` before it is presumed
/// orphaned by a crashed worker and released for redelivery.
const DEFAULT_VISIBILITY_TIMEOUT: Duration = Duration::from_secs(300);

/// Error from a single export attempt. All variants are terminal for the
/// message that caused them.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The payload was not a valid [`ExportRequest`]. Such a message can
    /// never succeed, so it is dropped without retry.
    #[error("Malformed export payload: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The playlist disappeared between enqueue and processing.
    #[error("Playlist {0} no longer exists")]
    PlaylistGone(String),

    /// A database read failed.
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    /// Email composition or delivery failed.
    #[error(transparent)]
    Mail(#[from] EmailError),
}

/// The export worker loop.
pub struct ExportConsumer {
    pool: DbPool,
    mailer: Arc<dyn Mailer>,
    poll_interval: Duration,
    visibility_timeout: Duration,
}

impl ExportConsumer {
    pub fn new(pool: DbPool, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            pool,
            mailer,
            poll_interval: DEFAULT_POLL_INTERVAL,
            visibility_timeout: DEFAULT_VISIBILITY_TIMEOUT,
        }
    }

    /// Run the consumer loop until the cancellation token is triggered.
    pub async fn run(&self, cancel: CancellationToken) {
        let mut ticker = tokio::time::interval(self.poll_interval);
        tracing::info!(
            queue = EXPORT_QUEUE,
            poll_interval_ms = self.poll_interval.as_millis() as u64,
            "Export consumer started",
        );

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Export consumer shutting down");
                    break;
                }
                _ = ticker.tick() => {
                    if let Err(e) = self.release_orphans().await {
                        tracing::error!(error = %e, "Failed to release stale export jobs");
                    }
                    // Drain everything currently pending before sleeping.
                    loop {
                        match self.process_next().await {
                            Ok(true) => continue,
                            Ok(false) => break,
                            Err(e) => {
                                tracing::error!(error = %e, "Failed to claim export job");
                                break;
                            }
                        }
                    }
                }
            }
        }
    }

    /// Claim and process at most one job. Returns `Ok(true)` if a job was
    /// claimed. A failing job never propagates: it is logged and settled so
    /// one poisoned message cannot take down the loop.
    pub async fn process_next(&self) -> Result<bool, sqlx::Error> {
        let Some(job) = ExportJobRepo::claim_next(&self.pool, EXPORT_QUEUE).await? else {
            return Ok(false);
        };

        let job_id = job.id;
        match self.handle(&job).await {
            Ok(()) => {
                tracing::info!(job_id, "Export job completed");
                ExportJobRepo::complete(&self.pool, job_id).await?;
            }
            Err(e) => {
                tracing::error!(job_id, error = %e, "Export job failed");
                ExportJobRepo::fail(&self.pool, job_id, &e.to_string()).await?;
            }
        }
        Ok(true)
    }

    /// Release jobs orphaned by a crashed worker back to pending.
    async fn release_orphans(&self) -> Result<(), sqlx::Error> {
        let cutoff = chrono::Utc::now()
            - chrono::Duration::from_std(self.visibility_timeout)
                .unwrap_or_else(|_| chrono::Duration::seconds(300));
        let released = ExportJobRepo::release_stale(&self.pool, EXPORT_QUEUE, cutoff).await?;
        if released > 0 {
            tracing::warn!(released, "Released stale export jobs for redelivery");
        }
        Ok(())
    }

    /// One export attempt: parse, fetch, render, send.
    async fn handle(&self, job: &ExportJob) -> Result<(), ExportError> {
        let request: ExportRequest = serde_json::from_value(job.payload.clone())?;

        tracing::info!(
            playlist_id = %request.playlist_id,
            target_email = %request.target_email,
            "Processing export",
        );

        let playlist = PlaylistRepo::find_by_id(&self.pool, &request.playlist_id)
            .await?
            .ok_or_else(|| ExportError::PlaylistGone(request.playlist_id.clone()))?;

        let songs = PlaylistSongRepo::list_songs(&self.pool, &playlist.id).await?;

        let document = ExportDocument {
            playlist: ExportedPlaylist {
                id: playlist.id,
                name: playlist.name.clone(),
                songs,
            },
        };

        self.mailer
            .send(
                &request.target_email,
                &subject(&playlist.name),
                &render_html(&document),
            )
            .await?;

        Ok(())
    }
}
