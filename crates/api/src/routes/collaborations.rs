//! Route definitions for the `/collaborations` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::collaborations;
use crate::state::AppState;

/// Routes mounted at `/collaborations`. Owner-only; the pair travels in
/// the request body for both add and remove.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        post(collaborations::add).delete(collaborations::remove),
    )
}
