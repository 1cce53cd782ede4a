//! Handlers for the `/songs` resource (catalog CRUD + filtering).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use openmusic_core::CoreError;
use openmusic_db::models::song::{CreateSong, Song, SongFilter, SongSummary, UpdateSong};
use openmusic_db::repositories::{AlbumRepo, SongRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for creating or updating a song.
#[derive(Debug, Deserialize, Validate)]
pub struct SongRequest {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    #[validate(range(min = 1900, max = 2100, message = "year must be 1900-2100"))]
    pub year: i32,
    #[validate(length(min = 1, message = "genre must not be empty"))]
    pub genre: String,
    #[validate(length(min = 1, message = "performer must not be empty"))]
    pub performer: String,
    pub duration: Option<i32>,
    #[serde(rename = "albumId")]
    pub album_id: Option<String>,
}

/// Substring filters for `GET /songs` (case-insensitive, AND semantics).
#[derive(Debug, Deserialize)]
pub struct SongListQuery {
    pub title: Option<String>,
    pub performer: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CreatedSong {
    #[serde(rename = "songId")]
    pub song_id: String,
}

#[derive(Debug, Serialize)]
pub struct SongsData {
    pub songs: Vec<SongSummary>,
}

#[derive(Debug, Serialize)]
pub struct SongData {
    pub song: Song,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/songs
///
/// An optional `albumId` must reference an existing album.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<SongRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<CreatedSong>>)> {
    input.validate()?;
    ensure_album_exists(&state, input.album_id.as_deref()).await?;

    let song = SongRepo::create(
        &state.pool,
        &CreateSong {
            title: input.title,
            year: input.year,
            genre: input.genre,
            performer: input.performer,
            duration: input.duration,
            album_id: input.album_id,
        },
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::data(CreatedSong { song_id: song.id })),
    ))
}

/// GET /api/v1/songs?title=&performer=
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<SongListQuery>,
) -> AppResult<Json<ApiResponse<SongsData>>> {
    let songs = SongRepo::list(
        &state.pool,
        &SongFilter {
            title: query.title,
            performer: query.performer,
        },
    )
    .await?;

    Ok(Json(ApiResponse::data(SongsData { songs })))
}

/// GET /api/v1/songs/{id}
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<SongData>>> {
    let song = SongRepo::find_by_id(&state.pool, &id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Song" }))?;

    Ok(Json(ApiResponse::data(SongData { song })))
}

/// PUT /api/v1/songs/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<SongRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    input.validate()?;
    ensure_album_exists(&state, input.album_id.as_deref()).await?;

    let updated = SongRepo::update(
        &state.pool,
        &id,
        &UpdateSong {
            title: Some(input.title),
            year: Some(input.year),
            genre: Some(input.genre),
            performer: Some(input.performer),
            duration: input.duration,
            album_id: input.album_id,
        },
    )
    .await?;

    if updated.is_none() {
        return Err(AppError::Core(CoreError::NotFound { entity: "Song" }));
    }

    Ok(Json(ApiResponse::message("Song updated successfully")))
}

/// DELETE /api/v1/songs/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    let removed = SongRepo::delete(&state.pool, &id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::NotFound { entity: "Song" }));
    }

    Ok(Json(ApiResponse::message("Song deleted successfully")))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// 404 when a provided album reference is dangling.
async fn ensure_album_exists(state: &AppState, album_id: Option<&str>) -> AppResult<()> {
    if let Some(album_id) = album_id {
        if AlbumRepo::find_by_id(&state.pool, album_id).await?.is_none() {
            return Err(AppError::Core(CoreError::NotFound { entity: "Album" }));
        }
    }
    Ok(())
}
