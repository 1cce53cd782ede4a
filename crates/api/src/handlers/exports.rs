//! Handler for requesting a playlist export.
//!
//! The producer half of the export pipeline: verify strict ownership, then
//! publish a durable message and return. The HTTP call never waits for the
//! email to be rendered or sent -- that happens in the worker process.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use openmusic_export::{ExportRequest, EXPORT_QUEUE};
use serde::Deserialize;
use validator::Validate;

use crate::access::require_owner;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Request body for `POST /export/playlists/{playlist_id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct ExportPlaylistRequest {
    #[validate(email(message = "targetEmail must be a valid email address"))]
    #[serde(rename = "targetEmail")]
    pub target_email: String,
}

/// POST /api/v1/export/playlists/{playlist_id}
///
/// Strict owner tier: collaborators may NOT export.
pub async fn export_playlist(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(playlist_id): Path<String>,
    Json(input): Json<ExportPlaylistRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<()>>)> {
    input.validate()?;

    require_owner(&state.pool, &playlist_id, &auth_user.user_id).await?;

    let payload = serde_json::to_value(ExportRequest {
        playlist_id: playlist_id.clone(),
        target_email: input.target_email,
    })
    .map_err(|e| AppError::InternalError(format!("Export payload encoding error: {e}")))?;

    state.queue.publish(EXPORT_QUEUE, payload).await?;

    tracing::info!(%playlist_id, "Export request enqueued");

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::message("Your export request is being processed")),
    ))
}
