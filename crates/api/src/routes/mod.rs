//! Route definitions, one module per resource.

pub mod albums;
pub mod auth;
pub mod collaborations;
pub mod exports;
pub mod health;
pub mod playlists;
pub mod songs;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /users                               register (public)
///
/// /authentications                     login (POST), refresh (PUT),
///                                      logout (DELETE)
///
/// /albums                              create
/// /albums/{id}                         get, update, delete
/// /albums/{id}/likes                   like (auth), unlike (auth),
///                                      count (public, cached)
///
/// /songs                               create, list (?title=&performer=)
/// /songs/{id}                          get, update, delete
///
/// /playlists                           create, list (auth)
/// /playlists/{id}                      delete (owner)
/// /playlists/{id}/songs                add, get, remove (owner or collab)
/// /playlists/{id}/activities           activity log (owner)
///
/// /collaborations                      add, remove (owner)
///
/// /export/playlists/{id}               request export (owner)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/users", users::router())
        .nest("/authentications", auth::router())
        .nest("/albums", albums::router())
        .nest("/songs", songs::router())
        .nest("/playlists", playlists::router())
        .nest("/collaborations", collaborations::router())
        .nest("/export", exports::router())
}
