//! Domain error taxonomy.
//!
//! Every fallible service operation surfaces one of these variants. The API
//! layer owns the mapping to HTTP statuses and response bodies; repositories
//! and the worker never construct transport-level errors themselves.

use thiserror::Error;

/// Domain-level error raised by service operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A requested entity does not exist. Maps to 404.
    #[error("{entity} not found")]
    NotFound {
        /// The entity kind, e.g. `"Playlist"` or `"Song"`.
        entity: &'static str,
    },

    /// Input violates a business rule or constraint. Maps to 400.
    #[error("{0}")]
    Validation(String),

    /// Credentials or token signature/expiry/type are invalid. Maps to 401.
    #[error("{0}")]
    Authentication(String),

    /// Authenticated but lacking ownership or collaboration. Maps to 403.
    #[error("{0}")]
    Forbidden(String),

    /// A store-level uniqueness clash that was not pre-checked. Maps to 409.
    #[error("{0}")]
    Conflict(String),

    /// Anything unexpected. Maps to 500 with a sanitized body; the full
    /// message is only ever logged server-side.
    #[error("{0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for the standard forbidden-resource message used across
    /// playlist, collaboration, and export operations.
    pub fn not_resource_owner() -> Self {
        CoreError::Forbidden("You are not entitled to access this resource".into())
    }
}
