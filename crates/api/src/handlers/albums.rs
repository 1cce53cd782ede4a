//! Handlers for the `/albums` resource (catalog CRUD).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use openmusic_core::CoreError;
use openmusic_db::models::album::CreateAlbum;
use openmusic_db::models::song::SongSummary;
use openmusic_db::repositories::{AlbumRepo, SongRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for creating or updating an album.
#[derive(Debug, Deserialize, Validate)]
pub struct AlbumRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(range(min = 1900, max = 2100, message = "year must be 1900-2100"))]
    pub year: i32,
}

/// Album detail with its songs, as returned by the get endpoint.
#[derive(Debug, Serialize)]
pub struct AlbumDetail {
    pub id: String,
    pub name: String,
    pub year: i32,
    #[serde(rename = "coverUrl", skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
    pub songs: Vec<SongSummary>,
}

#[derive(Debug, Serialize)]
pub struct CreatedAlbum {
    #[serde(rename = "albumId")]
    pub album_id: String,
}

#[derive(Debug, Serialize)]
pub struct AlbumData {
    pub album: AlbumDetail,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/albums
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<AlbumRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<CreatedAlbum>>)> {
    input.validate()?;

    let album = AlbumRepo::create(
        &state.pool,
        &CreateAlbum {
            name: input.name,
            year: input.year,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::data(CreatedAlbum { album_id: album.id })),
    ))
}

/// GET /api/v1/albums/{id}
///
/// Returns the album with its songs.
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<AlbumData>>> {
    let album = AlbumRepo::find_by_id(&state.pool, &id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Album" }))?;

    let songs = SongRepo::list_by_album(&state.pool, &album.id).await?;

    Ok(Json(ApiResponse::data(AlbumData {
        album: AlbumDetail {
            id: album.id,
            name: album.name,
            year: album.year,
            cover_url: album.cover_url,
            songs,
        },
    })))
}

/// PUT /api/v1/albums/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<AlbumRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    input.validate()?;

    let updated = AlbumRepo::update(
        &state.pool,
        &id,
        &CreateAlbum {
            name: input.name,
            year: input.year,
        },
    )
    .await?;

    if updated.is_none() {
        return Err(AppError::Core(CoreError::NotFound { entity: "Album" }));
    }

    Ok(Json(ApiResponse::message("Album updated successfully")))
}

/// DELETE /api/v1/albums/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    let removed = AlbumRepo::delete(&state.pool, &id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::NotFound { entity: "Album" }));
    }

    Ok(Json(ApiResponse::message("Album deleted successfully")))
}
