//! Playlist entity model and DTOs.

use openmusic_core::types::{EntityId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full playlist row from the `playlists` table.
#[derive(Debug, Clone, FromRow)]
pub struct Playlist {
    pub id: EntityId,
    pub name: String,
    /// Owning user's id. Immutable after creation.
    pub owner: EntityId,
    pub created_at: Timestamp,
}

/// Listing shape: a playlist annotated with its owner's username.
/// Returned for playlists the user owns or collaborates on.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PlaylistSummary {
    pub id: EntityId,
    pub name: String,
    pub username: String,
}
