//! Handlers for the `/collaborations` resource (owner-only grant management).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use openmusic_core::CoreError;
use openmusic_db::repositories::{CollaborationRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::access::require_owner;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Request body for both add and remove.
#[derive(Debug, Deserialize)]
pub struct CollaborationRequest {
    #[serde(rename = "playlistId")]
    pub playlist_id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
}

#[derive(Debug, Serialize)]
pub struct CollaborationCreated {
    #[serde(rename = "collaborationId")]
    pub collaboration_id: String,
}

/// POST /api/v1/collaborations
///
/// Grant shared-tier rights on a playlist. Owner only; the target user
/// must exist. Granting is idempotent: if the pair already exists, the
/// existing collaboration id is returned and no new row is created.
pub async fn add(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<CollaborationRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<CollaborationCreated>>)> {
    require_owner(&state.pool, &input.playlist_id, &auth_user.user_id).await?;

    if UserRepo::find_by_id(&state.pool, &input.user_id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::NotFound { entity: "User" }));
    }

    let collaboration =
        match CollaborationRepo::find(&state.pool, &input.playlist_id, &input.user_id).await? {
            Some(existing) => existing,
            None => {
                CollaborationRepo::create(&state.pool, &input.playlist_id, &input.user_id).await?
            }
        };

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::data(CollaborationCreated {
            collaboration_id: collaboration.id,
        })),
    ))
}

/// DELETE /api/v1/collaborations
///
/// Revoke a grant. Owner only; deleting an absent grant is not an error.
pub async fn remove(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<CollaborationRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    require_owner(&state.pool, &input.playlist_id, &auth_user.user_id).await?;

    CollaborationRepo::delete(&state.pool, &input.playlist_id, &input.user_id).await?;

    Ok(Json(ApiResponse::message("Collaborator removed successfully")))
}
