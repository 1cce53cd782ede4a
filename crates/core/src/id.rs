//! Public-id generation.
//!
//! Primary keys exposed through the API are short prefixed random strings
//! (`user-Ab3…`, `playlist-Xy9…`) rather than sequential integers, so ids
//! can be handed to clients without revealing row counts.

use rand::distr::Alphanumeric;
use rand::Rng;

/// Length of the random suffix following the entity prefix.
const SUFFIX_LEN: usize = 16;

/// Generate a random alphanumeric string of the given length.
///
/// Also used for the `jti` claim that makes every issued token unique.
pub fn random_string(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Generate a public id of the form `{prefix}-{16 alphanumeric chars}`.
pub fn public_id(prefix: &str) -> String {
    format!("{prefix}-{}", random_string(SUFFIX_LEN))
}
