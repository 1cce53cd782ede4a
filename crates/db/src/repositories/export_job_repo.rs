//! Repository for the `export_jobs` durable queue.
//!
//! Claiming uses `SELECT ... FOR UPDATE SKIP LOCKED` so any number of
//! worker processes can poll the same queue without double-delivering a
//! message. A job stuck in `running` (worker crashed mid-processing) is
//! released back to `pending` by [`ExportJobRepo::release_stale`], which is
//! the redelivery path for process crashes -- business failures are
//! terminal (`failed`) and never requeued.

use openmusic_core::types::Timestamp;
use sqlx::PgPool;

use crate::models::export_job::{ExportJob, ExportJobStatus};

/// Column list for `export_jobs` queries.
const COLUMNS: &str =
    "id, queue, payload, status, error_message, submitted_at, claimed_at, completed_at";

/// Provides publish/claim/settle operations for export jobs.
pub struct ExportJobRepo;

impl ExportJobRepo {
    /// Enqueue a new pending job. Returns immediately with the job row.
    pub async fn submit(
        pool: &PgPool,
        queue: &str,
        payload: &serde_json::Value,
    ) -> Result<ExportJob, sqlx::Error> {
        let query = format!(
            "INSERT INTO export_jobs (queue, payload)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ExportJob>(&query)
            .bind(queue)
            .bind(payload)
            .fetch_one(pool)
            .await
    }

    /// Atomically claim the oldest pending job on `queue`, if any.
    pub async fn claim_next(
        pool: &PgPool,
        queue: &str,
    ) -> Result<Option<ExportJob>, sqlx::Error> {
        let query = format!(
            "UPDATE export_jobs \
             SET status = $2, claimed_at = NOW() \
             WHERE id = ( \
                 SELECT id FROM export_jobs \
                 WHERE queue = $1 AND status = $3 \
                 ORDER BY submitted_at ASC \
                 LIMIT 1 \
                 FOR UPDATE SKIP LOCKED \
             ) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ExportJob>(&query)
            .bind(queue)
            .bind(ExportJobStatus::Running.as_str())
            .bind(ExportJobStatus::Pending.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Mark a job as completed.
    pub async fn complete(pool: &PgPool, job_id: i64) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE export_jobs SET status = $2, completed_at = NOW() WHERE id = $1")
            .bind(job_id)
            .bind(ExportJobStatus::Completed.as_str())
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Mark a job as terminally failed with an error message.
    pub async fn fail(pool: &PgPool, job_id: i64, error: &str) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE export_jobs \
             SET status = $2, error_message = $3, completed_at = NOW() \
             WHERE id = $1",
        )
        .bind(job_id)
        .bind(ExportJobStatus::Failed.as_str())
        .bind(error)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Release jobs claimed before `cutoff` back to pending. Returns the
    /// count of released jobs.
    pub async fn release_stale(
        pool: &PgPool,
        queue: &str,
        cutoff: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE export_jobs \
             SET status = $2, claimed_at = NULL \
             WHERE queue = $1 AND status = $3 AND claimed_at < $4",
        )
        .bind(queue)
        .bind(ExportJobStatus::Pending.as_str())
        .bind(ExportJobStatus::Running.as_str())
        .bind(cutoff)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// List all jobs on a queue, oldest first. Used by tests and debugging.
    pub async fn list(pool: &PgPool, queue: &str) -> Result<Vec<ExportJob>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM export_jobs WHERE queue = $1 ORDER BY submitted_at");
        sqlx::query_as::<_, ExportJob>(&query)
            .bind(queue)
            .fetch_all(pool)
            .await
    }
}
