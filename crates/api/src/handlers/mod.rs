//! HTTP handlers, one module per resource.

pub mod albums;
pub mod auth;
pub mod collaborations;
pub mod exports;
pub mod likes;
pub mod playlists;
pub mod songs;
pub mod users;
