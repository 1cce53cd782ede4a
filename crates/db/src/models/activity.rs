//! Playlist activity log models.

use openmusic_core::types::Timestamp;
use serde::Serialize;
use sqlx::FromRow;

/// Actions recorded in the activity log.
pub const ACTION_ADD: &str = "add";
pub const ACTION_DELETE: &str = "delete";

/// An activity entry joined with the acting username and song title,
/// as returned to the playlist owner.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ActivityEntry {
    pub username: String,
    pub title: String,
    pub action: String,
    pub time: Timestamp,
}
