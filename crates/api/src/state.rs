use std::sync::Arc;

use personnel_db::allocation::AllocationPolicy;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: personnel_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Retry budget for department code and employee id allocation.
    pub allocation: Arc<AllocationPolicy>,
}

impl AppState {
    pub fn new(pool: personnel_db::DbPool, config: ServerConfig) -> Self {
        let allocation = Arc::new(config.allocation_policy());
        Self {
            pool,
            config: Arc::new(config),
            allocation,
        }
    }
}
