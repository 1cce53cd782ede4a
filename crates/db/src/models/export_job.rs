//! Durable export-queue job model.

use openmusic_core::types::Timestamp;
use sqlx::FromRow;

/// Lifecycle states of an export job.
///
/// `Completed` and `Failed` are both terminal: a business-level failure is
/// recorded and never redelivered. Only a process crash (job stuck in
/// `Running`) leads to redelivery via stale release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportJobStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

impl ExportJobStatus {
    /// The TEXT value stored in the `status` column.
    pub fn as_str(self) -> &'static str {
        match self {
            ExportJobStatus::Pending => "pending",
            ExportJobStatus::Running => "running",
            ExportJobStatus::Completed => "completed",
            ExportJobStatus::Failed => "failed",
        }
    }
}

/// A row from the `export_jobs` table.
#[derive(Debug, Clone, FromRow)]
pub struct ExportJob {
    pub id: i64,
    pub queue: String,
    pub payload: serde_json::Value,
    pub status: String,
    pub error_message: Option<String>,
    pub submitted_at: Timestamp,
    pub claimed_at: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
}
