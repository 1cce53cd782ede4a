//! Route definitions for the `/songs` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::songs;
use crate::state::AppState;

/// Routes mounted at `/songs`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(songs::create).get(songs::list))
        .route(
            "/{id}",
            get(songs::get).put(songs::update).delete(songs::delete),
        )
}
