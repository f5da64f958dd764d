//! Local filesystem blob store.

use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tracing::debug;
use uuid::Uuid;

use cumulus_core::error::{AppError, ErrorKind};
use cumulus_core::result::AppResult;
use cumulus_core::traits::blob::BlobStore;

/// Blob store writing one file per blob under a root directory.
///
/// Blob ids are generated uuids; the two leading hex characters shard the
/// directory so a large store does not put every blob in one directory.
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    /// Root directory for all stored blobs.
    root: PathBuf,
}

impl LocalBlobStore {
    /// Create a new local blob store rooted at the given path.
    pub async fn new(root_path: &str) -> AppResult<Self> {
        let root = PathBuf::from(root_path);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create blob root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self { root })
    }

    /// Resolve a blob id to its on-disk path.
    fn resolve(&self, storage_id: &str) -> PathBuf {
        let shard = &storage_id[..storage_id.len().min(2)];
        self.root.join(shard).join(storage_id)
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    fn provider_type(&self) -> &str {
        "local"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(self.root.exists() && self.root.is_dir())
    }

    async fn put(&self, data: Bytes) -> AppResult<String> {
        let storage_id = Uuid::new_v4().to_string();
        let path = self.resolve(&storage_id);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to create blob shard: {}", parent.display()),
                    e,
                )
            })?;
        }

        fs::write(&path, &data).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write blob {storage_id}"),
                e,
            )
        })?;

        debug!(storage_id, bytes = data.len(), "Wrote blob");
        Ok(storage_id)
    }

    async fn get(&self, storage_id: &str) -> AppResult<Bytes> {
        let path = self.resolve(storage_id);
        let data = fs::read(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AppError::not_found(format!("Blob not found: {storage_id}"))
            } else {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to read blob {storage_id}"),
                    e,
                )
            }
        })?;
        Ok(Bytes::from(data))
    }

    async fn delete(&self, storage_id: &str) -> AppResult<()> {
        let path = self.resolve(storage_id);
        match fs::remove_file(&path).await {
            Ok(()) => {
                debug!(storage_id, "Deleted blob");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to delete blob {storage_id}"),
                e,
            )),
        }
    }

    async fn exists(&self, storage_id: &str) -> AppResult<bool> {
        Ok(self.resolve(storage_id).exists())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_get_delete_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path().to_str().unwrap())
            .await
            .unwrap();

        let data = Bytes::from("hello world");
        let id = store.put(data.clone()).await.unwrap();

        assert!(store.exists(&id).await.unwrap());
        assert_eq!(store.get(&id).await.unwrap(), data);

        store.delete(&id).await.unwrap();
        assert!(!store.exists(&id).await.unwrap());
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path().to_str().unwrap())
            .await
            .unwrap();

        let err = store.get("no-such-blob").await.unwrap_err();
        assert_eq!(err.kind, cumulus_core::error::ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_delete_missing_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path().to_str().unwrap())
            .await
            .unwrap();

        store.delete("no-such-blob").await.unwrap();
    }

    #[tokio::test]
    async fn test_ids_are_unique() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path().to_str().unwrap())
            .await
            .unwrap();

        let a = store.put(Bytes::from("a")).await.unwrap();
        let b = store.put(Bytes::from("b")).await.unwrap();
        assert_ne!(a, b);
    }
}
