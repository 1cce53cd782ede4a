//! Refresh-token allow-list model.

use openmusic_core::types::Timestamp;
use sqlx::FromRow;

/// A row from the `refresh_tokens` table.
///
/// The token string itself is the primary key. Existence of the row is the
/// sole authority for token liveness; the JWT signature alone is never
/// enough to rotate or log out.
#[derive(Debug, Clone, FromRow)]
pub struct RefreshToken {
    pub token: String,
    pub created_at: Timestamp,
}
