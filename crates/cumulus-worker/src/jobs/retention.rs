//! Activity-log retention pruning.

use std::sync::Arc;

use tracing::{error, info};

use cumulus_core::config::worker::WorkerConfig;
use cumulus_service::ActivityService;

/// Prunes activity records past the retention window.
#[derive(Debug, Clone)]
pub struct RetentionJob {
    activity: Arc<ActivityService>,
    retention_days: u32,
}

impl RetentionJob {
    /// Creates a new retention job.
    pub fn new(activity: Arc<ActivityService>, config: &WorkerConfig) -> Self {
        Self {
            activity,
            retention_days: config.activity_retention_days,
        }
    }

    /// Run one pruning pass. Errors are logged, never propagated — the
    /// scheduler will try again on the next tick.
    pub async fn run(&self) {
        match self.activity.prune(self.retention_days).await {
            Ok(deleted) => {
                info!(
                    deleted,
                    retention_days = self.retention_days,
                    "Activity retention pass complete"
                );
            }
            Err(e) => {
                error!(error = %e, "Activity retention pass failed");
            }
        }
    }
}
