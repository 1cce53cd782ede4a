//! Shared domain types for the OpenMusic backend.
//!
//! This crate is dependency-light on purpose: it holds the domain error
//! taxonomy, the public-id generator, and common type aliases used by the
//! persistence, export, and API crates. No I/O happens here.

pub mod error;
pub mod id;
pub mod types;

pub use error::CoreError;
