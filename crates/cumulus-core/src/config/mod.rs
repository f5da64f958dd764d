//! Application configuration schemas.
//!
//! Each sub-module is one logical section of the merged TOML configuration.
//! Components receive their section as a struct at construction time;
//! nothing reads the environment ad hoc.

pub mod app;
pub mod auth;
pub mod database;
pub mod logging;
pub mod storage;
pub mod worker;

use serde::{Deserialize, Serialize};

use self::app::ServerConfig;
use self::auth::AuthConfig;
use self::logging::LoggingConfig;
use self::storage::StorageConfig;
use self::worker::WorkerConfig;

use crate::error::AppError;

pub use database::DatabaseConfig;

/// Root application configuration, the deserialization target for the
/// merged configuration sources.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Collection store settings.
    pub database: DatabaseConfig,
    /// Session provider settings.
    pub auth: AuthConfig,
    /// Blob storage settings.
    pub storage: StorageConfig,
    /// Share link settings.
    pub sharing: SharingConfig,
    /// Background worker settings.
    pub worker: WorkerConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Share link configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SharingConfig {
    /// Base URL prepended to share tokens when building public links.
    pub public_base_url: String,
}

impl Default for SharingConfig {
    fn default() -> Self {
        Self {
            public_base_url: "http://localhost:5173".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration for the given environment name.
    ///
    /// Merge order, later sources winning: `config/default.toml`, then
    /// `config/{env}.toml`, then `CUMULUS_`-prefixed environment variables
    /// (e.g. `CUMULUS_DATABASE__URL`).
    pub fn load(env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix("CUMULUS")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}
