//! Repository for the `playlists` table.

use openmusic_core::id::public_id;
use sqlx::PgPool;

use crate::models::playlist::{Playlist, PlaylistSummary};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, owner, created_at";

/// Provides CRUD operations for playlists.
pub struct PlaylistRepo;

impl PlaylistRepo {
    /// Insert a new playlist owned by `owner`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        name: &str,
        owner: &str,
    ) -> Result<Playlist, sqlx::Error> {
        let query = format!(
            "INSERT INTO playlists (id, name, owner)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Playlist>(&query)
            .bind(public_id("playlist"))
            .bind(name)
            .bind(owner)
            .fetch_one(pool)
            .await
    }

    /// Find a playlist by id.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Playlist>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM playlists WHERE id = $1");
        sqlx::query_as::<_, Playlist>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List playlists owned by OR shared with `user_id`, annotated with the
    /// owner's username. Song contents are not included.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: &str,
    ) -> Result<Vec<PlaylistSummary>, sqlx::Error> {
        sqlx::query_as::<_, PlaylistSummary>(
            "SELECT p.id, p.name, u.username
             FROM playlists p
             JOIN users u ON p.owner = u.id
             LEFT JOIN collaborations c ON p.id = c.playlist_id
             WHERE p.owner = $1 OR c.user_id = $1
             GROUP BY p.id, p.name, u.username, p.created_at
             ORDER BY p.created_at",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Delete a playlist. Returns `true` if a row was removed.
    ///
    /// Collaborations, memberships, and activity rows go with it via
    /// ON DELETE CASCADE; songs and users are untouched.
    pub async fn delete(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM playlists WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
