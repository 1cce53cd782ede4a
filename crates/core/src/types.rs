/// Public entity identifiers are prefixed random strings (see [`crate::id`]).
pub type EntityId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
