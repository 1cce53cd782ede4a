//! Album entity model and DTOs.

use openmusic_core::types::{EntityId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full album row from the `albums` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Album {
    pub id: EntityId,
    pub name: String,
    pub year: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
    #[serde(skip)]
    pub created_at: Timestamp,
}

/// DTO for creating or fully updating an album.
#[derive(Debug)]
pub struct CreateAlbum {
    pub name: String,
    pub year: i32,
}
