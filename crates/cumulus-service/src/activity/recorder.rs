//! Best-effort activity recording.

use std::sync::Arc;

use tracing::warn;

use cumulus_database::ActivityStore;
use cumulus_entity::activity::CreateActivity;

/// The best-effort side channel for audit writes.
///
/// A failure to append an activity record must never fail or roll back the
/// operation that triggered it; the error is logged and swallowed here, the
/// single place in the system where that happens.
#[derive(Debug, Clone)]
pub struct ActivityRecorder {
    store: Arc<dyn ActivityStore>,
}

impl ActivityRecorder {
    /// Creates a new recorder.
    pub fn new(store: Arc<dyn ActivityStore>) -> Self {
        Self { store }
    }

    /// Append an activity record, discarding any store error.
    pub async fn record(&self, entry: CreateActivity) {
        if let Err(e) = self.store.append(&entry).await {
            warn!(
                action = ?entry.action,
                target_id = %entry.target_id,
                error = %e,
                "Failed to record activity"
            );
        }
    }
}
