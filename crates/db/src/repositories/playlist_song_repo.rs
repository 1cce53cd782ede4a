//! Repository for the `playlist_songs` membership table.
//!
//! The mutating methods take `impl PgExecutor` because song add/remove must
//! commit in the same transaction as the paired activity-log insert.

use openmusic_core::id::public_id;
use sqlx::{PgExecutor, PgPool};

use crate::models::song::SongSummary;

/// Provides membership operations for playlist songs.
pub struct PlaylistSongRepo;

impl PlaylistSongRepo {
    /// Add a song to a playlist. Re-adding an existing member is a no-op.
    pub async fn add(
        executor: impl PgExecutor<'_>,
        playlist_id: &str,
        song_id: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO playlist_songs (id, playlist_id, song_id)
             VALUES ($1, $2, $3)
             ON CONFLICT ON CONSTRAINT uq_playlist_songs_playlist_song DO NOTHING",
        )
        .bind(public_id("ps"))
        .bind(playlist_id)
        .bind(song_id)
        .execute(executor)
        .await?;
        Ok(())
    }

    /// Remove a song from a playlist. Absence is not an error.
    pub async fn remove(
        executor: impl PgExecutor<'_>,
        playlist_id: &str,
        song_id: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM playlist_songs WHERE playlist_id = $1 AND song_id = $2")
            .bind(playlist_id)
            .bind(song_id)
            .execute(executor)
            .await?;
        Ok(())
    }

    /// List the songs in a playlist, in compact form.
    pub async fn list_songs(
        pool: &PgPool,
        playlist_id: &str,
    ) -> Result<Vec<SongSummary>, sqlx::Error> {
        sqlx::query_as::<_, SongSummary>(
            "SELECT s.id, s.title, s.performer
             FROM songs s
             JOIN playlist_songs ps ON s.id = ps.song_id
             WHERE ps.playlist_id = $1",
        )
        .bind(playlist_id)
        .fetch_all(pool)
        .await
    }
}
