//! Repository for the `songs` table.

use openmusic_core::id::public_id;
use sqlx::PgPool;

use crate::models::song::{CreateSong, Song, SongFilter, SongSummary, UpdateSong};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, year, genre, performer, duration, album_id, created_at";

/// Provides CRUD operations for songs.
pub struct SongRepo;

impl SongRepo {
    /// Insert a new song, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateSong) -> Result<Song, sqlx::Error> {
        let query = format!(
            "INSERT INTO songs (id, title, year, genre, performer, duration, album_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Song>(&query)
            .bind(public_id("song"))
            .bind(&input.title)
            .bind(input.year)
            .bind(&input.genre)
            .bind(&input.performer)
            .bind(input.duration)
            .bind(&input.album_id)
            .fetch_one(pool)
            .await
    }

    /// Find a song by id.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Song>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM songs WHERE id = $1");
        sqlx::query_as::<_, Song>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List songs in compact form, with optional case-insensitive substring
    /// filters on title and performer (AND semantics).
    pub async fn list(
        pool: &PgPool,
        filter: &SongFilter,
    ) -> Result<Vec<SongSummary>, sqlx::Error> {
        // Build the WHERE clause; the bind position follows from how many
        // conditions precede it.
        let mut conditions: Vec<String> = Vec::new();

        if filter.title.is_some() {
            conditions.push(format!("title ILIKE ${}", conditions.len() + 1));
        }
        if filter.performer.is_some() {
            conditions.push(format!("performer ILIKE ${}", conditions.len() + 1));
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query =
            format!("SELECT id, title, performer FROM songs {where_clause} ORDER BY created_at");

        let mut q = sqlx::query_as::<_, SongSummary>(&query);
        if let Some(title) = &filter.title {
            q = q.bind(format!("%{title}%"));
        }
        if let Some(performer) = &filter.performer {
            q = q.bind(format!("%{performer}%"));
        }

        q.fetch_all(pool).await
    }

    /// List the songs belonging to an album, in compact form.
    pub async fn list_by_album(
        pool: &PgPool,
        album_id: &str,
    ) -> Result<Vec<SongSummary>, sqlx::Error> {
        sqlx::query_as::<_, SongSummary>(
            "SELECT id, title, performer FROM songs WHERE album_id = $1 ORDER BY created_at",
        )
        .bind(album_id)
        .fetch_all(pool)
        .await
    }

    /// Partially update a song. Only non-`None` fields in `input` are
    /// applied. Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: &str,
        input: &UpdateSong,
    ) -> Result<Option<Song>, sqlx::Error> {
        let query = format!(
            "UPDATE songs SET
                title = COALESCE($2, title),
                year = COALESCE($3, year),
                genre = COALESCE($4, genre),
                performer = COALESCE($5, performer),
                duration = COALESCE($6, duration),
                album_id = COALESCE($7, album_id)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Song>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(input.year)
            .bind(&input.genre)
            .bind(&input.performer)
            .bind(input.duration)
            .bind(&input.album_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a song. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM songs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
