//! Shared response envelope for API handlers.
//!
//! Every success body is `{ "status": "success", "message"?, "data"? }`.
//! Use [`ApiResponse`] instead of ad-hoc `serde_json::json!` so handlers
//! get compile-time type safety and consistent serialization. Error bodies
//! are produced by the [`crate::error::AppError`] responder.

use serde::Serialize;

/// Standard success envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Always `"success"` for bodies built here.
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// A success envelope carrying a typed payload.
    pub fn data(data: T) -> Self {
        Self {
            status: "success",
            message: None,
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// A success envelope carrying only a human-readable message.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status: "success",
            message: Some(message.into()),
            data: None,
        }
    }
}
