//! In-memory activity store.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use cumulus_core::result::AppResult;
use cumulus_core::types::{ListRange, Page};
use cumulus_entity::activity::{ActivityRecord, CreateActivity};

use crate::stores::ActivityStore;

/// Activity store backed by a process-local vector.
#[derive(Debug, Default)]
pub struct MemoryActivityStore {
    rows: RwLock<Vec<ActivityRecord>>,
}

impl MemoryActivityStore {
    fn read(&self) -> RwLockReadGuard<'_, Vec<ActivityRecord>> {
        self.rows.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<ActivityRecord>> {
        self.rows.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl ActivityStore for MemoryActivityStore {
    async fn append(&self, data: &CreateActivity) -> AppResult<ActivityRecord> {
        let record = ActivityRecord {
            id: Uuid::new_v4(),
            user_id: data.user_id,
            action: data.action,
            target_id: data.target_id,
            target_name: data.target_name.clone(),
            target_type: data.target_type,
            details: data.details.clone(),
            created_at: Utc::now(),
        };
        self.write().push(record.clone());
        Ok(record)
    }

    async fn list_by_user(
        &self,
        user_id: Uuid,
        range: &ListRange,
    ) -> AppResult<Page<ActivityRecord>> {
        let rows = self.read();
        let matching: Vec<&ActivityRecord> =
            rows.iter().filter(|r| r.user_id == user_id).collect();
        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .rev()
            .skip(range.offset as usize)
            .take(range.limit as usize)
            .cloned()
            .collect();
        Ok(Page::new(items, total, range))
    }

    async fn delete_older_than(&self, cutoff: DateTime<Utc>, limit: i64) -> AppResult<u64> {
        let mut rows = self.write();
        let mut remaining = limit.max(0) as usize;
        let before = rows.len();
        rows.retain(|r| {
            if remaining > 0 && r.created_at < cutoff {
                remaining -= 1;
                false
            } else {
                true
            }
        });
        Ok((before - rows.len()) as u64)
    }
}
