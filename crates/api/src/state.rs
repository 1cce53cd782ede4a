use std::sync::Arc;

use openmusic_export::ExportQueue;

use crate::cache::Cache;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`). The cache and
/// queue are capability traits so tests can substitute fakes; lifecycle is
/// init-at-startup, teardown-at-shutdown, with no mid-life mutation.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: openmusic_db::DbPool,
    /// Server configuration (JWT secrets, timeouts, CORS).
    pub config: Arc<ServerConfig>,
    /// Key-value cache with TTL, used by the album-likes counter.
    pub cache: Arc<dyn Cache>,
    /// Durable queue producer for export requests.
    pub queue: Arc<dyn ExportQueue>,
}
