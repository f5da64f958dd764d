//! Collection store configuration.

use serde::{Deserialize, Serialize};

/// Connection settings for the collection store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Store backend: `"postgres"` or `"memory"`.
    pub provider: String,
    /// PostgreSQL connection URL.
    pub url: String,
    /// Upper bound on pooled connections.
    pub max_connections: u32,
    /// Connections kept open while idle.
    pub min_connections: u32,
    /// Seconds to wait when acquiring a connection.
    pub connect_timeout_seconds: u64,
    /// Seconds before an idle connection is reaped.
    pub idle_timeout_seconds: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            provider: "postgres".to_string(),
            url: String::new(),
            max_connections: 20,
            min_connections: 5,
            connect_timeout_seconds: 10,
            idle_timeout_seconds: 300,
        }
    }
}
