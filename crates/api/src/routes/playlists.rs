//! Route definitions for the `/playlists` resource.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::playlists;
use crate::state::AppState;

/// Routes mounted at `/playlists`. All require authentication; the
/// handlers enforce the owner/collaborator tiers.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(playlists::create).get(playlists::list))
        .route("/{playlist_id}", delete(playlists::delete))
        .route(
            "/{playlist_id}/songs",
            post(playlists::add_song)
                .get(playlists::get_songs)
                .delete(playlists::remove_song),
        )
        .route("/{playlist_id}/activities", get(playlists::activities))
}
