//! Repository for the `albums` table.

use openmusic_core::id::public_id;
use sqlx::PgPool;

use crate::models::album::{Album, CreateAlbum};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, year, cover_url, created_at";

/// Provides CRUD operations for albums.
pub struct AlbumRepo;

impl AlbumRepo {
    /// Insert a new album, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateAlbum) -> Result<Album, sqlx::Error> {
        let query = format!(
            "INSERT INTO albums (id, name, year)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Album>(&query)
            .bind(public_id("album"))
            .bind(&input.name)
            .bind(input.year)
            .fetch_one(pool)
            .await
    }

    /// Find an album by id.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Album>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM albums WHERE id = $1");
        sqlx::query_as::<_, Album>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Update an album's name and year. Returns `None` if no row matched.
    pub async fn update(
        pool: &PgPool,
        id: &str,
        input: &CreateAlbum,
    ) -> Result<Option<Album>, sqlx::Error> {
        let query = format!(
            "UPDATE albums SET name = $2, year = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Album>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.year)
            .fetch_optional(pool)
            .await
    }

    /// Delete an album. Returns `true` if a row was removed.
    ///
    /// Songs referencing the album are removed by the ON DELETE CASCADE.
    pub async fn delete(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM albums WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
