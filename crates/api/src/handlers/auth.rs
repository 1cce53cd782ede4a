//! Handlers for the `/authentications` resource (login, refresh, logout).
//!
//! Refresh tokens are JWTs, but their liveness is governed solely by the
//! allow-list in `refresh_tokens`: a row exists while the token is live and
//! is deleted on rotation or logout. Rotation burns the old token BEFORE
//! verifying its signature -- a stolen-and-reused token is therefore dead
//! after its first rotation attempt no matter what, which is the theft-
//! detection property the whole scheme hangs on.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use openmusic_core::CoreError;
use openmusic_db::repositories::{RefreshTokenRepo, UserRepo};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::{sign_access_token, sign_refresh_token, verify_refresh_token};
use crate::auth::password::verify_password;
use crate::error::{AppError, AppResult};
use crate::response::ApiResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /authentications`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Request body for `PUT` and `DELETE /authentications`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    #[serde(rename = "refreshToken")]
    pub refresh_token: String,
}

/// A freshly issued access/refresh pair.
#[derive(Debug, Serialize)]
pub struct TokenPair {
    #[serde(rename = "accessToken")]
    pub access_token: String,
    #[serde(rename = "refreshToken")]
    pub refresh_token: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/authentications
///
/// Authenticate with username + password. Returns an access/refresh pair
/// and persists the refresh token in the allow-list.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<TokenPair>>)> {
    let user = UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .ok_or_else(invalid_credentials)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(invalid_credentials());
    }

    let pair = issue_token_pair(&state, &user.id).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::data(pair))))
}

/// PUT /api/v1/authentications
///
/// Exchange a refresh token for a new pair (token rotation). The order of
/// steps is deliberate and must not be rearranged:
///
/// 1. Allow-list lookup first -- a token with no row fails with a 400
///    regardless of its signature, so forged-but-matching tokens gain
///    nothing.
/// 2. Delete the row immediately. The old token is now unusable even if a
///    later step fails.
/// 3. Only then verify signature and type. An invalid token at this point
///    leaves the user logged out; the row is never restored.
/// 4. Issue and persist a brand-new pair for the same user.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<ApiResponse<TokenPair>>> {
    let stored = RefreshTokenRepo::find(&state.pool, &input.refresh_token).await?;
    if stored.is_none() {
        return Err(AppError::Core(CoreError::Validation(
            "Refresh token not found".into(),
        )));
    }

    RefreshTokenRepo::delete(&state.pool, &input.refresh_token).await?;

    let user_id = verify_refresh_token(&input.refresh_token, &state.config.jwt).map_err(|_| {
        AppError::Core(CoreError::Authentication(
            "Invalid refresh token signature".into(),
        ))
    })?;

    let pair = issue_token_pair(&state, &user_id).await?;

    Ok(Json(ApiResponse::data(pair)))
}

/// DELETE /api/v1/authentications
///
/// Revoke a refresh token (logout). Idempotent: an absent token means the
/// user is already logged out, which is a success.
pub async fn logout(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<ApiResponse<()>>> {
    let removed = RefreshTokenRepo::delete(&state.pool, &input.refresh_token).await?;
    if !removed {
        tracing::debug!("Logout for a refresh token that was already gone");
    }

    Ok(Json(ApiResponse::message("Refresh token deleted successfully")))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn invalid_credentials() -> AppError {
    AppError::Core(CoreError::Authentication(
        "Invalid username or password".into(),
    ))
}

/// Sign an access/refresh pair and persist the refresh token.
async fn issue_token_pair(state: &AppState, user_id: &str) -> AppResult<TokenPair> {
    let access_token = sign_access_token(user_id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    let refresh_token = sign_refresh_token(user_id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    RefreshTokenRepo::insert(&state.pool, &refresh_token).await?;

    Ok(TokenPair {
        access_token,
        refresh_token,
    })
}
