//! Durable export queue, producer side.
//!
//! [`ExportQueue`] is the capability the API server holds; the Postgres
//! implementation writes a pending row to `export_jobs`, which survives
//! restarts of both the server and the broker-less worker. Publishing is
//! fire-and-forget from the caller's perspective: nothing waits for the
//! email to go out.

use async_trait::async_trait;
use openmusic_db::repositories::ExportJobRepo;
use openmusic_db::DbPool;
use serde::{Deserialize, Serialize};

/// The queue export requests travel on.
pub const EXPORT_QUEUE: &str = "export:playlist";

/// Error publishing to the queue.
#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    /// The underlying insert failed.
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Wire payload of an export request. Field names are part of the message
/// contract and must stay camelCase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportRequest {
    #[serde(rename = "playlistId")]
    pub playlist_id: String,
    #[serde(rename = "targetEmail")]
    pub target_email: String,
}

/// Capability for publishing durable messages to a named queue.
#[async_trait]
pub trait ExportQueue: Send + Sync {
    /// Publish a JSON payload. Returns once the message is durable.
    async fn publish(&self, queue: &str, payload: serde_json::Value) -> Result<(), QueueError>;
}

/// Postgres-backed queue producer.
pub struct PgExportQueue {
    pool: DbPool,
}

impl PgExportQueue {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ExportQueue for PgExportQueue {
    async fn publish(&self, queue: &str, payload: serde_json::Value) -> Result<(), QueueError> {
        let job = ExportJobRepo::submit(&self.pool, queue, &payload).await?;
        tracing::info!(job_id = job.id, queue, "Export job enqueued");
        Ok(())
    }
}
