//! Repository for the append-only `playlist_song_activities` log.

use openmusic_core::id::public_id;
use sqlx::{PgExecutor, PgPool};

use crate::models::activity::ActivityEntry;

/// Provides append and read operations for the activity log.
///
/// There are no update or delete methods on purpose: the log is immutable.
pub struct ActivityRepo;

impl ActivityRepo {
    /// Append one activity row. Takes an executor so the append commits in
    /// the same transaction as the membership change it records.
    pub async fn append(
        executor: impl PgExecutor<'_>,
        playlist_id: &str,
        user_id: &str,
        song_id: &str,
        action: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO playlist_song_activities (id, playlist_id, user_id, song_id, action)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(public_id("activity"))
        .bind(playlist_id)
        .bind(user_id)
        .bind(song_id)
        .bind(action)
        .execute(executor)
        .await?;
        Ok(())
    }

    /// List a playlist's activities joined with the acting username and
    /// song title, chronologically ascending.
    pub async fn list_for_playlist(
        pool: &PgPool,
        playlist_id: &str,
    ) -> Result<Vec<ActivityEntry>, sqlx::Error> {
        sqlx::query_as::<_, ActivityEntry>(
            "SELECT u.username, s.title, a.action, a.time
             FROM playlist_song_activities a
             JOIN users u ON a.user_id = u.id
             JOIN songs s ON a.song_id = s.id
             WHERE a.playlist_id = $1
             ORDER BY a.time",
        )
        .bind(playlist_id)
        .fetch_all(pool)
        .await
    }
}
