//! In-memory share store.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use cumulus_core::error::AppError;
use cumulus_core::result::AppResult;
use cumulus_core::types::{ListRange, Page};
use cumulus_entity::share::{CreateShare, Share};

use crate::stores::ShareStore;

/// Share store backed by a process-local vector.
#[derive(Debug, Default)]
pub struct MemoryShareStore {
    rows: RwLock<Vec<Share>>,
}

impl MemoryShareStore {
    fn read(&self) -> RwLockReadGuard<'_, Vec<Share>> {
        self.rows.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Share>> {
        self.rows.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl ShareStore for MemoryShareStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Share>> {
        Ok(self.read().iter().find(|s| s.id == id).cloned())
    }

    async fn find_by_token(&self, token: &str) -> AppResult<Option<Share>> {
        Ok(self.read().iter().find(|s| s.token == token).cloned())
    }

    async fn list_by_owner(&self, owner_id: Uuid, range: &ListRange) -> AppResult<Page<Share>> {
        let rows = self.read();
        let matching: Vec<&Share> = rows.iter().filter(|s| s.owner_id == owner_id).collect();
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

    async fn create(&self, data: &CreateShare) -> AppResult<Share> {
        let share = Share {
            id: Uuid::new_v4(),
            resource_id: data.resource_id,
            resource_type: data.resource_type,
            owner_id: data.owner_id,
            shared_with_email: data.shared_with_email.clone(),
            permissions: data.permissions.clone(),
            token: data.token.clone(),
            expires_at: data.expires_at,
            is_public: data.is_public,
            created_at: Utc::now(),
        };
        self.write().push(share.clone());
        Ok(share)
    }

    async fn update(&self, share: &Share) -> AppResult<Share> {
        let mut rows = self.write();
        let existing = rows
            .iter_mut()
            .find(|s| s.id == share.id)
            .ok_or_else(|| AppError::not_found(format!("Share {} not found", share.id)))?;
        existing.permissions = share.permissions.clone();
        existing.expires_at = share.expires_at;
        existing.is_public = share.is_public;
        Ok(existing.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut rows = self.write();
        let before = rows.len();
        rows.retain(|s| s.id != id);
        Ok(rows.len() < before)
    }
}
