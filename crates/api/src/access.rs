//! Playlist access-control resolution.
//!
//! Two tiers exist. "Shared" operations (song add/remove, viewing songs)
//! accept owner or collaborator via [`resolve`]. "Strict owner" operations
//! (delete playlist, manage collaborators, view the activity log, initiate
//! export) go through [`require_owner`] and never accept collaborators.

use openmusic_core::CoreError;
use openmusic_db::models::playlist::Playlist;
use openmusic_db::repositories::{CollaborationRepo, PlaylistRepo};
use openmusic_db::DbPool;

use crate::error::{AppError, AppResult};

/// The requester's relationship to a playlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaylistAccess {
    Owner,
    Collaborator,
}

/// Resolve shared-tier access for `user_id` on `playlist_id`.
///
/// Lookup order: playlist by id (404 if absent), owner check, then
/// collaboration existence. Anything else is forbidden.
pub async fn resolve(
    pool: &DbPool,
    playlist_id: &str,
    user_id: &str,
) -> AppResult<(Playlist, PlaylistAccess)> {
    let playlist = PlaylistRepo::find_by_id(pool, playlist_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Playlist" }))?;

    if playlist.owner == user_id {
        return Ok((playlist, PlaylistAccess::Owner));
    }

    if CollaborationRepo::exists(pool, playlist_id, user_id).await? {
        return Ok((playlist, PlaylistAccess::Collaborator));
    }

    Err(AppError::Core(CoreError::not_resource_owner()))
}

/// Strict-tier check: `user_id` must be the playlist's owner.
///
/// Collaborators are rejected with the same Forbidden error as strangers.
pub async fn require_owner(
    pool: &DbPool,
    playlist_id: &str,
    user_id: &str,
) -> AppResult<Playlist> {
    let playlist = PlaylistRepo::find_by_id(pool, playlist_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Playlist" }))?;

    if playlist.owner != user_id {
        return Err(AppError::Core(CoreError::not_resource_owner()));
    }

    Ok(playlist)
}
