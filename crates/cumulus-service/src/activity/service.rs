//! Activity history listing and retention pruning.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::info;

use cumulus_core::result::AppResult;
use cumulus_core::types::{ListRange, Page};
use cumulus_database::ActivityStore;
use cumulus_entity::activity::ActivityRecord;

use crate::context::RequestContext;

/// Reads and prunes the activity log.
#[derive(Debug, Clone)]
pub struct ActivityService {
    store: Arc<dyn ActivityStore>,
    /// Maximum records deleted per prune batch.
    prune_batch_size: u32,
}

impl ActivityService {
    /// Creates a new activity service.
    pub fn new(store: Arc<dyn ActivityStore>, prune_batch_size: u32) -> Self {
        Self {
            store,
            prune_batch_size: prune_batch_size.max(1),
        }
    }

    /// Lists the caller's activity, newest-first.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        range: ListRange,
    ) -> AppResult<Page<ActivityRecord>> {
        self.store.list_by_user(ctx.user_id, &range).await
    }

    /// Deletes records older than the retention window, in bounded batches.
    ///
    /// Idempotent: a second run with no new old records deletes nothing.
    /// Returns the total number of records deleted.
    pub async fn prune(&self, older_than_days: u32) -> AppResult<u64> {
        let cutoff = Utc::now() - Duration::days(i64::from(older_than_days));
        let batch = i64::from(self.prune_batch_size);
        let mut total = 0u64;

        loop {
            let deleted = self.store.delete_older_than(cutoff, batch).await?;
            total += deleted;
            if deleted < batch as u64 {
                break;
            }
        }

        if total > 0 {
            info!(total, older_than_days, "Pruned old activity records");
        }
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cumulus_database::Stores;
    use cumulus_entity::activity::{ActivityAction, CreateActivity};
    use cumulus_entity::resource::ResourceType;
    use uuid::Uuid;

    fn entry(user_id: Uuid) -> CreateActivity {
        CreateActivity::new(
            user_id,
            ActivityAction::Upload,
            Uuid::new_v4(),
            "a.txt",
            ResourceType::File,
        )
    }

    #[tokio::test]
    async fn test_list_is_newest_first_and_scoped_to_user() {
        let stores = Stores::memory();
        let service = ActivityService::new(stores.activities.clone(), 500);
        let user = Uuid::new_v4();
        let other = Uuid::new_v4();

        let mut first = entry(user);
        first.target_name = "first".to_string();
        stores.activities.append(&first).await.unwrap();

        let mut second = entry(user);
        second.target_name = "second".to_string();
        stores.activities.append(&second).await.unwrap();

        stores.activities.append(&entry(other)).await.unwrap();

        let ctx = RequestContext::new(user);
        let page = service.list(&ctx, ListRange::default()).await.unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(page.items[0].target_name, "second");
        assert_eq!(page.items[1].target_name, "first");
    }

    #[tokio::test]
    async fn test_prune_is_idempotent() {
        let stores = Stores::memory();
        let service = ActivityService::new(stores.activities.clone(), 500);
        let user = Uuid::new_v4();

        // Freshly appended records are inside any retention window.
        stores.activities.append(&entry(user)).await.unwrap();
        stores.activities.append(&entry(user)).await.unwrap();

        assert_eq!(service.prune(90).await.unwrap(), 0);
        assert_eq!(service.prune(90).await.unwrap(), 0);

        let ctx = RequestContext::new(user);
        let page = service.list(&ctx, ListRange::default()).await.unwrap();
        assert_eq!(page.total, 2);
    }

    #[tokio::test]
    async fn test_prune_removes_expired_records_in_batches() {
        let stores = Stores::memory();
        // Batch size 1 forces the loop to take several rounds.
        let service = ActivityService::new(stores.activities.clone(), 1);
        let user = Uuid::new_v4();

        stores.activities.append(&entry(user)).await.unwrap();
        stores.activities.append(&entry(user)).await.unwrap();
        stores.activities.append(&entry(user)).await.unwrap();

        // A zero-day window makes every existing record prunable.
        let deleted = service.prune(0).await.unwrap();
        assert_eq!(deleted, 3);

        let ctx = RequestContext::new(user);
        let page = service.list(&ctx, ListRange::default()).await.unwrap();
        assert_eq!(page.total, 0);
    }
}
