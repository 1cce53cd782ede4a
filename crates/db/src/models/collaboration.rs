//! Collaboration grant model.

use openmusic_core::types::EntityId;
use sqlx::FromRow;

/// A row from the `collaborations` table: a (playlist, user) pair granting
/// shared-tier rights. Unique per pair.
#[derive(Debug, Clone, FromRow)]
pub struct Collaboration {
    pub id: EntityId,
    pub playlist_id: EntityId,
    pub user_id: EntityId,
}
