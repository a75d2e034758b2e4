use std::sync::Arc;

use freight_db::retry::RetryPolicy;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: freight_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Backoff applied to store reads (list, get, evaluate).
    pub read_retry: RetryPolicy,
}

impl AppState {
    pub fn new(pool: freight_db::DbPool, config: ServerConfig) -> Self {
        let read_retry = config.read_retry_policy();
        Self {
            pool,
            config: Arc::new(config),
            read_retry,
        }
    }
}
