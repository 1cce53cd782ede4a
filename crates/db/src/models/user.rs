//! User entity model and DTOs.

use openmusic_core::types::{EntityId, Timestamp};
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// Contains the password hash -- NEVER serialize this to API responses.
/// Endpoints expose only the id, username, and fullname fields they need.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: EntityId,
    pub username: String,
    pub password_hash: String,
    pub fullname: String,
    pub created_at: Timestamp,
}

/// DTO for creating a new user. The password is already hashed by the
/// caller; repositories never see plaintext credentials.
#[derive(Debug)]
pub struct CreateUser {
    pub username: String,
    pub password_hash: String,
    pub fullname: String,
}
