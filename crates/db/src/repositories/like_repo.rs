//! Repository for the `user_album_likes` table.

use openmusic_core::id::public_id;
use sqlx::PgPool;

use crate::models::like::UserAlbumLike;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, album_id, created_at";

/// Provides like/unlike/count operations for albums.
pub struct LikeRepo;

impl LikeRepo {
    /// Find an existing like for the (user, album) pair.
    pub async fn find(
        pool: &PgPool,
        user_id: &str,
        album_id: &str,
    ) -> Result<Option<UserAlbumLike>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_album_likes WHERE user_id = $1 AND album_id = $2"
        );
        sqlx::query_as::<_, UserAlbumLike>(&query)
            .bind(user_id)
            .bind(album_id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a like. Violating the (user, album) uniqueness surfaces as a
    /// database error the caller pre-checks with [`LikeRepo::find`].
    pub async fn create(pool: &PgPool, user_id: &str, album_id: &str) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO user_album_likes (id, user_id, album_id) VALUES ($1, $2, $3)")
            .bind(public_id("like"))
            .bind(user_id)
            .bind(album_id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Remove a like. Absence is not an error.
    pub async fn delete(pool: &PgPool, user_id: &str, album_id: &str) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM user_album_likes WHERE user_id = $1 AND album_id = $2")
            .bind(user_id)
            .bind(album_id)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Count likes for an album straight from the source of truth.
    pub async fn count_for_album(pool: &PgPool, album_id: &str) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM user_album_likes WHERE album_id = $1")
            .bind(album_id)
            .fetch_one(pool)
            .await
    }
}
