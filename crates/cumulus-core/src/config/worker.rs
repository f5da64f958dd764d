//! Background worker configuration.

use serde::{Deserialize, Serialize};

/// Background retention worker configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Whether the worker is enabled.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Activity records older than this many days are pruned.
    #[serde(default = "default_retention_days")]
    pub activity_retention_days: u32,
    /// Maximum number of records deleted per prune batch.
    #[serde(default = "default_prune_batch")]
    pub prune_batch_size: u32,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            activity_retention_days: default_retention_days(),
            prune_batch_size: default_prune_batch(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_retention_days() -> u32 {
    90
}

fn default_prune_batch() -> u32 {
    500
}
