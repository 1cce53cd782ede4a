//! Album like model.

use openmusic_core::types::{EntityId, Timestamp};
use sqlx::FromRow;

/// A row from the `user_album_likes` table. Unique per (user, album).
#[derive(Debug, Clone, FromRow)]
pub struct UserAlbumLike {
    pub id: EntityId,
    pub user_id: EntityId,
    pub album_id: EntityId,
    pub created_at: Timestamp,
}
