//! In-memory folder store.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use cumulus_core::error::AppError;
use cumulus_core::result::AppResult;
use cumulus_core::types::{ListRange, Page};
use cumulus_entity::folder::{CreateFolder, Folder};

use crate::stores::FolderStore;

/// Folder store backed by a process-local vector.
#[derive(Debug, Default)]
pub struct MemoryFolderStore {
    rows: RwLock<Vec<Folder>>,
}

impl MemoryFolderStore {
    fn read(&self) -> RwLockReadGuard<'_, Vec<Folder>> {
        self.rows.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Folder>> {
        self.rows.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl FolderStore for MemoryFolderStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Folder>> {
        Ok(self.read().iter().find(|f| f.id == id).cloned())
    }

    async fn list(
        &self,
        owner_id: Uuid,
        parent_id: Option<Uuid>,
        range: &ListRange,
    ) -> AppResult<Page<Folder>> {
        let rows = self.read();
        let matching: Vec<&Folder> = rows
            .iter()
            .filter(|f| f.owner_id == owner_id && f.parent_id == parent_id)
            .collect();
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

    async fn create(&self, data: &CreateFolder) -> AppResult<Folder> {
        let now = Utc::now();
        let folder = Folder {
            id: Uuid::new_v4(),
            name: data.name.clone(),
            parent_id: data.parent_id,
            owner_id: data.owner_id,
            path: data.path.clone(),
            is_shared: false,
            share_token: None,
            share_expiry: None,
            created_at: now,
            updated_at: now,
        };
        self.write().push(folder.clone());
        Ok(folder)
    }

    async fn rename(&self, id: Uuid, new_name: &str) -> AppResult<Folder> {
        let mut rows = self.write();
        let folder = rows
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))?;
        folder.name = new_name.to_string();
        folder.updated_at = Utc::now();
        Ok(folder.clone())
    }

    async fn set_share_state(
        &self,
        id: Uuid,
        is_shared: bool,
        share_token: Option<&str>,
        share_expiry: Option<DateTime<Utc>>,
    ) -> AppResult<()> {
        let mut rows = self.write();
        if let Some(folder) = rows.iter_mut().find(|f| f.id == id) {
            folder.is_shared = is_shared;
            folder.share_token = share_token.map(String::from);
            folder.share_expiry = share_expiry;
            folder.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut rows = self.write();
        let before = rows.len();
        rows.retain(|f| f.id != id);
        Ok(rows.len() < before)
    }

    async fn search(&self, owner_id: Uuid, query: &str, limit: i64) -> AppResult<Vec<Folder>> {
        let needle = query.to_lowercase();
        Ok(self
            .read()
            .iter()
            .filter(|f| f.owner_id == owner_id && f.name.to_lowercase().contains(&needle))
            .rev()
            .take(limit as usize)
            .cloned()
            .collect())
    }
}
