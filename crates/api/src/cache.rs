//! Key-value cache capability with TTL.
//!
//! The cache is an optional accelerant in front of the database, never an
//! authority: callers must treat any cache error as a miss and fall back to
//! the source of truth. [`MemoryCache`] is the in-process implementation;
//! the trait boundary keeps handlers ignorant of the backing store so tests
//! (or a future networked cache) can swap it out.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;

/// Error type for cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// The backing store misbehaved. Callers fail open on this.
    #[error("Cache backend error: {0}")]
    Backend(String),
}

/// Capability for a string key-value cache with per-entry TTL.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Get a value. `None` means miss (absent or expired).
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Set a value with a time-to-live.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError>;

    /// Delete a key. Absence is not an error.
    async fn delete(&self, key: &str) -> Result<(), CacheError>;
}

/// In-process TTL cache over a mutex-guarded map.
///
/// Expired entries are dropped lazily on read.
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, (String, Instant)>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut entries = self.entries.lock().expect("cache mutex poisoned");
        match entries.get(key) {
            Some((value, expires_at)) if *expires_at > Instant::now() => Ok(Some(value.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let mut entries = self.entries.lock().expect("cache mutex poisoned");
        entries.insert(key.to_string(), (value.to_string(), Instant::now() + ttl));
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut entries = self.entries.lock().expect("cache mutex poisoned");
        entries.remove(key);
        Ok(())
    }
}
