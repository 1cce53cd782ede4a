//! Handlers for the `/playlists` resource: playlist CRUD, song membership,
//! and the owner-only activity log.
//!
//! Each song membership mutation commits the membership change and its
//! activity-log row in ONE transaction: a failed activity insert must roll
//! back the membership change with it.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use openmusic_core::CoreError;
use openmusic_db::models::activity::{ActivityEntry, ACTION_ADD, ACTION_DELETE};
use openmusic_db::models::playlist::PlaylistSummary;
use openmusic_db::models::song::SongSummary;
use openmusic_db::repositories::{
    ActivityRepo, PlaylistRepo, PlaylistSongRepo, SongRepo, UserRepo,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::access::{require_owner, resolve};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /playlists`.
#[derive(Debug, Deserialize, Validate)]
pub struct PlaylistRequest {
    #[validate(length(min = 1, max = 50, message = "name must be 1-50 characters"))]
    pub name: String,
}

/// Request body for adding/removing a playlist song.
#[derive(Debug, Deserialize)]
pub struct PlaylistSongRequest {
    #[serde(rename = "songId")]
    pub song_id: String,
}

#[derive(Debug, Serialize)]
pub struct CreatedPlaylist {
    #[serde(rename = "playlistId")]
    pub playlist_id: String,
}

#[derive(Debug, Serialize)]
pub struct PlaylistsData {
    pub playlists: Vec<PlaylistSummary>,
}

/// Playlist detail with owner username and songs.
#[derive(Debug, Serialize)]
pub struct PlaylistWithSongs {
    pub id: String,
    pub name: String,
    pub username: String,
    pub songs: Vec<SongSummary>,
}

#[derive(Debug, Serialize)]
pub struct PlaylistData {
    pub playlist: PlaylistWithSongs,
}

#[derive(Debug, Serialize)]
pub struct ActivitiesData {
    #[serde(rename = "playlistId")]
    pub playlist_id: String,
    pub activities: Vec<ActivityEntry>,
}

// ---------------------------------------------------------------------------
// Playlist CRUD
// ---------------------------------------------------------------------------

/// POST /api/v1/playlists
pub async fn create(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<PlaylistRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<CreatedPlaylist>>)> {
    input.validate()?;

    let playlist = PlaylistRepo::create(&state.pool, &input.name, &auth_user.user_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::data(CreatedPlaylist {
            playlist_id: playlist.id,
        })),
    ))
}

/// GET /api/v1/playlists
///
/// Union of playlists owned by or shared with the requester, each
/// annotated with the owner's username.
pub async fn list(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<ApiResponse<PlaylistsData>>> {
    let playlists = PlaylistRepo::list_for_user(&state.pool, &auth_user.user_id).await?;

    Ok(Json(ApiResponse::data(PlaylistsData { playlists })))
}

/// DELETE /api/v1/playlists/{playlist_id}
///
/// Strict owner tier. Collaborations, memberships, and activity rows are
/// cascaded away; songs and users stay.
pub async fn delete(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(playlist_id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    require_owner(&state.pool, &playlist_id, &auth_user.user_id).await?;

    PlaylistRepo::delete(&state.pool, &playlist_id).await?;

    Ok(Json(ApiResponse::message("Playlist deleted successfully")))
}

// ---------------------------------------------------------------------------
// Song membership (shared tier)
// ---------------------------------------------------------------------------

/// POST /api/v1/playlists/{playlist_id}/songs
pub async fn add_song(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(playlist_id): Path<String>,
    Json(input): Json<PlaylistSongRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<()>>)> {
    resolve(&state.pool, &playlist_id, &auth_user.user_id).await?;
    ensure_song_exists(&state, &input.song_id).await?;

    // Membership change + activity row commit or roll back together.
    let mut tx = state.pool.begin().await?;
    PlaylistSongRepo::add(&mut *tx, &playlist_id, &input.song_id).await?;
    ActivityRepo::append(
        &mut *tx,
        &playlist_id,
        &auth_user.user_id,
        &input.song_id,
        ACTION_ADD,
    )
    .await?;
    tx.commit().await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::message("Song added to playlist")),
    ))
}

/// GET /api/v1/playlists/{playlist_id}/songs
pub async fn get_songs(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(playlist_id): Path<String>,
) -> AppResult<Json<ApiResponse<PlaylistData>>> {
    let (playlist, _access) = resolve(&state.pool, &playlist_id, &auth_user.user_id).await?;

    let owner = UserRepo::find_by_id(&state.pool, &playlist.owner)
        .await?
        .ok_or_else(|| AppError::InternalError("Playlist owner row missing".into()))?;

    let songs = PlaylistSongRepo::list_songs(&state.pool, &playlist.id).await?;

    Ok(Json(ApiResponse::data(PlaylistData {
        playlist: PlaylistWithSongs {
            id: playlist.id,
            name: playlist.name,
            username: owner.username,
            songs,
        },
    })))
}

/// DELETE /api/v1/playlists/{playlist_id}/songs
pub async fn remove_song(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(playlist_id): Path<String>,
    Json(input): Json<PlaylistSongRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    resolve(&state.pool, &playlist_id, &auth_user.user_id).await?;
    ensure_song_exists(&state, &input.song_id).await?;

    let mut tx = state.pool.begin().await?;
    PlaylistSongRepo::remove(&mut *tx, &playlist_id, &input.song_id).await?;
    ActivityRepo::append(
        &mut *tx,
        &playlist_id,
        &auth_user.user_id,
        &input.song_id,
        ACTION_DELETE,
    )
    .await?;
    tx.commit().await?;

    Ok(Json(ApiResponse::message("Song removed from playlist")))
}

// ---------------------------------------------------------------------------
// Activity log (strict owner tier)
// ---------------------------------------------------------------------------

/// GET /api/v1/playlists/{playlist_id}/activities
pub async fn activities(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(playlist_id): Path<String>,
) -> AppResult<Json<ApiResponse<ActivitiesData>>> {
    require_owner(&state.pool, &playlist_id, &auth_user.user_id).await?;

    let activities = ActivityRepo::list_for_playlist(&state.pool, &playlist_id).await?;

    Ok(Json(ApiResponse::data(ActivitiesData {
        playlist_id,
        activities,
    })))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn ensure_song_exists(state: &AppState, song_id: &str) -> AppResult<()> {
    if SongRepo::find_by_id(&state.pool, song_id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound { entity: "Song" }));
    }
    Ok(())
}
