//! Handlers for album likes with the cache-aside counter.
//!
//! The read path is cache-first with a fixed TTL; both mutations invalidate
//! the key before responding, so a caller who just liked an album never
//! reads its own stale count. Cache failures are swallowed and treated as
//! misses: the database stays the only authority.

use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use openmusic_core::CoreError;
use openmusic_db::repositories::{AlbumRepo, LikeRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Cache TTL for like counts: 30 minutes.
const CACHE_TTL: Duration = Duration::from_secs(1800);

/// Response header marking a cache-served count.
const DATA_SOURCE_HEADER: &str = "x-data-source";

#[derive(Debug, Serialize)]
pub struct LikesData {
    pub likes: i64,
}

/// Cache key for an album's like count.
fn likes_cache_key(album_id: &str) -> String {
    format!("likes:{album_id}")
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/albums/{id}/likes
///
/// Liking twice is a validation error -- unlike collaboration grants,
/// likes are user-facing actions and duplicates are rejected, not
/// absorbed.
pub async fn like(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(album_id): Path<String>,
) -> AppResult<(StatusCode, Json<ApiResponse<()>>)> {
    if AlbumRepo::find_by_id(&state.pool, &album_id).await?.is_none() {
        return Err(AppError::Core(CoreError::NotFound { entity: "Album" }));
    }

    if LikeRepo::find(&state.pool, &auth_user.user_id, &album_id)
        .await?
        .is_some()
    {
        return Err(already_liked());
    }

    if let Err(e) = LikeRepo::create(&state.pool, &auth_user.user_id, &album_id).await {
        // Lost a race with a concurrent like from the same user: same
        // outcome as the pre-check.
        if is_unique_violation(&e) {
            return Err(already_liked());
        }
        return Err(e.into());
    }

    invalidate_count(&state, &album_id).await;

    Ok((StatusCode::CREATED, Json(ApiResponse::message("Album liked"))))
}

/// DELETE /api/v1/albums/{id}/likes
///
/// Unliking is idempotent.
pub async fn unlike(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(album_id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    LikeRepo::delete(&state.pool, &auth_user.user_id, &album_id).await?;

    invalidate_count(&state, &album_id).await;

    Ok(Json(ApiResponse::message("Album unliked")))
}

/// GET /api/v1/albums/{id}/likes
///
/// Public. Serves from the cache when possible, marking such responses
/// with `X-Data-Source: cache`; otherwise reads the count from the
/// database and repopulates the cache.
pub async fn count(
    State(state): State<AppState>,
    Path(album_id): Path<String>,
) -> AppResult<Response> {
    let key = likes_cache_key(&album_id);

    let cached = match state.cache.get(&key).await {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(error = %e, "Cache get failed, falling back to database");
            None
        }
    };

    if let Some(cached) = cached.and_then(|v| v.parse::<i64>().ok()) {
        let mut response =
            Json(ApiResponse::data(LikesData { likes: cached })).into_response();
        response
            .headers_mut()
            .insert(DATA_SOURCE_HEADER, HeaderValue::from_static("cache"));
        return Ok(response);
    }

    let likes = LikeRepo::count_for_album(&state.pool, &album_id).await?;

    if let Err(e) = state.cache.set(&key, &likes.to_string(), CACHE_TTL).await {
        tracing::warn!(error = %e, "Cache set failed, serving uncached");
    }

    Ok(Json(ApiResponse::data(LikesData { likes })).into_response())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn already_liked() -> AppError {
    AppError::Core(CoreError::Validation(
        "You have already liked this album".into(),
    ))
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505"))
}

/// Best-effort cache invalidation before the mutation response goes out.
async fn invalidate_count(state: &AppState, album_id: &str) {
    if let Err(e) = state.cache.delete(&likes_cache_key(album_id)).await {
        tracing::warn!(error = %e, album_id, "Cache invalidation failed");
    }
}
