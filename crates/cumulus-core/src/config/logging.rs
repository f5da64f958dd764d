//! Logging configuration.

use serde::{Deserialize, Serialize};

/// Tracing output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Minimum level emitted when `RUST_LOG` is not set.
    pub level: String,
    /// Output format: `"pretty"` for terminals, `"json"` for log ingestion.
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
