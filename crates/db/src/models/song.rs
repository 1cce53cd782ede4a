//! Song entity model and DTOs.

use openmusic_core::types::{EntityId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full song row from the `songs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Song {
    pub id: EntityId,
    pub title: String,
    pub year: i32,
    pub genre: String,
    pub performer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i32>,
    #[serde(rename = "albumId", skip_serializing_if = "Option::is_none")]
    pub album_id: Option<EntityId>,
    #[serde(skip)]
    pub created_at: Timestamp,
}

/// Compact song shape used in playlist payloads and list endpoints.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SongSummary {
    pub id: EntityId,
    pub title: String,
    pub performer: String,
}

/// DTO for creating a new song.
#[derive(Debug)]
pub struct CreateSong {
    pub title: String,
    pub year: i32,
    pub genre: String,
    pub performer: String,
    pub duration: Option<i32>,
    pub album_id: Option<EntityId>,
}

/// DTO for a partial song update. Only non-`None` fields are applied.
#[derive(Debug, Default)]
pub struct UpdateSong {
    pub title: Option<String>,
    pub year: Option<i32>,
    pub genre: Option<String>,
    pub performer: Option<String>,
    pub duration: Option<i32>,
    pub album_id: Option<EntityId>,
}

/// Optional substring filters for song listing (AND semantics).
#[derive(Debug, Default)]
pub struct SongFilter {
    pub title: Option<String>,
    pub performer: Option<String>,
}
