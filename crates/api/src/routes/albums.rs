//! Route definitions for the `/albums` resource, including likes.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{albums, likes};
use crate::state::AppState;

/// Routes mounted at `/albums`.
///
/// ```text
/// POST   /             -> create
/// GET    /{id}         -> get (with songs)
/// PUT    /{id}         -> update
/// DELETE /{id}         -> delete
/// POST   /{id}/likes   -> like (auth)
/// DELETE /{id}/likes   -> unlike (auth)
/// GET    /{id}/likes   -> count (public, cache-aside)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(albums::create))
        .route(
            "/{id}",
            get(albums::get).put(albums::update).delete(albums::delete),
        )
        .route(
            "/{id}/likes",
            post(likes::like).delete(likes::unlike).get(likes::count),
        )
}
