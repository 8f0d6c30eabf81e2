use std::time::Duration;

use personnel_db::allocation::AllocationPolicy;
use personnel_db::PoolSettings;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// Per-request deadline in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long shutdown waits for the pool to close, in seconds (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// Maximum pooled database connections (default: `20`).
    pub db_max_connections: u32,
    /// Seconds a request may wait for a pooled connection (default: `5`).
    pub db_acquire_timeout_secs: u64,
    /// Attempts per create before an allocation conflict is reported (default: `5`).
    pub id_allocation_max_attempts: u32,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                      | Default                  |
    /// |------------------------------|--------------------------|
    /// | `HOST`                       | `0.0.0.0`                |
    /// | `PORT`                       | `5000`                   |
    /// | `CORS_ORIGINS`               | `http://localhost:3000`  |
    /// | `REQUEST_TIMEOUT_SECS`       | `30`                     |
    /// | `SHUTDOWN_TIMEOUT_SECS`      | `30`                     |
    /// | `DB_MAX_CONNECTIONS`         | `20`                     |
    /// | `DB_ACQUIRE_TIMEOUT_SECS`    | `5`                      |
    /// | `ID_ALLOCATION_MAX_ATTEMPTS` | `5`                      |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        Self {
            host,
            port: env_or("PORT", 5000),
            cors_origins,
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", 30),
            shutdown_timeout_secs: env_or("SHUTDOWN_TIMEOUT_SECS", 30),
            db_max_connections: env_or("DB_MAX_CONNECTIONS", 20),
            db_acquire_timeout_secs: env_or("DB_ACQUIRE_TIMEOUT_SECS", 5),
            id_allocation_max_attempts: env_or("ID_ALLOCATION_MAX_ATTEMPTS", 5),
        }
    }

    pub fn pool_settings(&self) -> PoolSettings {
        PoolSettings {
            max_connections: self.db_max_connections,
            acquire_timeout: Duration::from_secs(self.db_acquire_timeout_secs),
        }
    }

    pub fn allocation_policy(&self) -> AllocationPolicy {
        AllocationPolicy {
            max_attempts: self.id_allocation_max_attempts,
            ..AllocationPolicy::default()
        }
    }
}

/// Read and parse an env var, falling back to `default` when unset.
///
/// Panics on an unparseable value so misconfiguration fails at startup.
fn env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .unwrap_or_else(|e| panic!("{key} must be a valid {}: {e}", std::any::type_name::<T>())),
        Err(_) => default,
    }
}
