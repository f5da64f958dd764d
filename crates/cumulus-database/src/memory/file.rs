//! In-memory file store.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use cumulus_core::error::AppError;
use cumulus_core::result::AppResult;
use cumulus_core::types::{ListRange, Page};
use cumulus_entity::file::{CreateFile, File};

use crate::stores::FileStore;

/// File store backed by a process-local vector.
#[derive(Debug, Default)]
pub struct MemoryFileStore {
    rows: RwLock<Vec<File>>,
}

impl MemoryFileStore {
    fn read(&self) -> RwLockReadGuard<'_, Vec<File>> {
        self.rows.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<File>> {
        self.rows.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl FileStore for MemoryFileStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<File>> {
        Ok(self.read().iter().find(|f| f.id == id).cloned())
    }

    async fn list(
        &self,
        owner_id: Uuid,
        folder_id: Option<Uuid>,
        range: &ListRange,
    ) -> AppResult<Page<File>> {
        let rows = self.read();
        let matching: Vec<&File> = rows
            .iter()
            .filter(|f| f.owner_id == owner_id && f.folder_id == folder_id)
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

    async fn create(&self, data: &CreateFile) -> AppResult<File> {
        let now = Utc::now();
        let file = File {
            id: Uuid::new_v4(),
            name: data.name.clone(),
            original_name: data.original_name.clone(),
            size_bytes: data.size_bytes,
            mime_type: data.mime_type.clone(),
            storage_id: data.storage_id.clone(),
            folder_id: data.folder_id,
            owner_id: data.owner_id,
            path: data.path.clone(),
            is_shared: false,
            share_token: None,
            share_expiry: None,
            tags: data.tags.clone(),
            created_at: now,
            updated_at: now,
        };
        self.write().push(file.clone());
        Ok(file)
    }

    async fn rename(&self, id: Uuid, new_name: &str) -> AppResult<File> {
        let mut rows = self.write();
        let file = rows
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| AppError::not_found(format!("File {id} not found")))?;
        file.name = new_name.to_string();
        file.updated_at = Utc::now();
        Ok(file.clone())
    }

    async fn move_to(&self, id: Uuid, folder_id: Option<Uuid>, path: &str) -> AppResult<File> {
        let mut rows = self.write();
        let file = rows
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or_else(|| AppError::not_found(format!("File {id} not found")))?;
        file.folder_id = folder_id;
        file.path = path.to_string();
        file.updated_at = Utc::now();
        Ok(file.clone())
    }

    async fn set_share_state(
        &self,
        id: Uuid,
        is_shared: bool,
        share_token: Option<&str>,
        share_expiry: Option<DateTime<Utc>>,
    ) -> AppResult<()> {
        let mut rows = self.write();
        if let Some(file) = rows.iter_mut().find(|f| f.id == id) {
            file.is_shared = is_shared;
            file.share_token = share_token.map(String::from);
            file.share_expiry = share_expiry;
            file.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut rows = self.write();
        let before = rows.len();
        rows.retain(|f| f.id != id);
        Ok(rows.len() < before)
    }

    async fn search(&self, owner_id: Uuid, query: &str, limit: i64) -> AppResult<Vec<File>> {
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
