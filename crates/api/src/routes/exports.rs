//! Route definition for playlist export requests.

use axum::routing::post;
use axum::Router;

use crate::handlers::exports;
use crate::state::AppState;

/// Routes mounted at `/export`.
pub fn router() -> Router<AppState> {
    Router::new().route("/playlists/{playlist_id}", post(exports::export_playlist))
}
