//! Repository for the `collaborations` table.

use openmusic_core::id::public_id;
use sqlx::PgPool;

use crate::models::collaboration::Collaboration;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, playlist_id, user_id";

/// Provides operations for collaboration grants.
pub struct CollaborationRepo;

impl CollaborationRepo {
    /// Find the grant for a (playlist, user) pair.
    pub async fn find(
        pool: &PgPool,
        playlist_id: &str,
        user_id: &str,
    ) -> Result<Option<Collaboration>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM collaborations WHERE playlist_id = $1 AND user_id = $2");
        sqlx::query_as::<_, Collaboration>(&query)
            .bind(playlist_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Whether an active grant exists for the (playlist, user) pair.
    pub async fn exists(
        pool: &PgPool,
        playlist_id: &str,
        user_id: &str,
    ) -> Result<bool, sqlx::Error> {
        let found: Option<i32> = sqlx::query_scalar(
            "SELECT 1 FROM collaborations WHERE playlist_id = $1 AND user_id = $2",
        )
        .bind(playlist_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
        Ok(found.is_some())
    }

    /// Insert a grant, returning the created row.
    pub async fn create(
        pool: &PgPool,
        playlist_id: &str,
        user_id: &str,
    ) -> Result<Collaboration, sqlx::Error> {
        let query = format!(
            "INSERT INTO collaborations (id, playlist_id, user_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Collaboration>(&query)
            .bind(public_id("collab"))
            .bind(playlist_id)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Delete the grant for a (playlist, user) pair. Absence is not an error.
    pub async fn delete(
        pool: &PgPool,
        playlist_id: &str,
        user_id: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM collaborations WHERE playlist_id = $1 AND user_id = $2")
            .bind(playlist_id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
