//! In-memory blob store.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use bytes::Bytes;
use uuid::Uuid;

use cumulus_core::error::AppError;
use cumulus_core::result::AppResult;
use cumulus_core::traits::blob::BlobStore;

/// Blob store keeping contents in a process-local map. Used by tests and
/// the `storage.provider = "memory"` development mode.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: RwLock<HashMap<String, Bytes>>,
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    fn provider_type(&self) -> &str {
        "memory"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn put(&self, data: Bytes) -> AppResult<String> {
        let storage_id = Uuid::new_v4().to_string();
        self.blobs
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(storage_id.clone(), data);
        Ok(storage_id)
    }

    async fn get(&self, storage_id: &str) -> AppResult<Bytes> {
        self.blobs
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(storage_id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Blob not found: {storage_id}")))
    }

    async fn delete(&self, storage_id: &str) -> AppResult<()> {
        self.blobs
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(storage_id);
        Ok(())
    }

    async fn exists(&self, storage_id: &str) -> AppResult<bool> {
        Ok(self
            .blobs
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .contains_key(storage_id))
    }
}
