//! Route definitions for the `/authentications` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/authentications`.
///
/// ```text
/// POST   /  -> login
/// PUT    /  -> refresh (token rotation)
/// DELETE /  -> logout (revoke refresh token)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        post(auth::login).put(auth::refresh).delete(auth::logout),
    )
}
