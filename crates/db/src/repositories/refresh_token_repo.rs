//! Repository for the `refresh_tokens` allow-list.
//!
//! Deleting a row is the only revocation mechanism in the system: the JWT
//! signature says nothing about liveness.

use sqlx::PgPool;

use crate::models::refresh_token::RefreshToken;

/// Provides allow-list operations for refresh tokens.
pub struct RefreshTokenRepo;

impl RefreshTokenRepo {
    /// Persist a freshly issued refresh token.
    pub async fn insert(pool: &PgPool, token: &str) -> Result<(), sqlx::Error> {
        sqlx::query("INSERT INTO refresh_tokens (token) VALUES ($1)")
            .bind(token)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Look up a token. `None` means the token was rotated, revoked, or
    /// never issued.
    pub async fn find(pool: &PgPool, token: &str) -> Result<Option<RefreshToken>, sqlx::Error> {
        sqlx::query_as::<_, RefreshToken>(
            "SELECT token, created_at FROM refresh_tokens WHERE token = $1",
        )
        .bind(token)
        .fetch_optional(pool)
        .await
    }

    /// Delete a token. Returns `true` if a row was removed; deleting an
    /// absent token is not an error.
    pub async fn delete(pool: &PgPool, token: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE token = $1")
            .bind(token)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
