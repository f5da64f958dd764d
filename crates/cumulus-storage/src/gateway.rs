//! Blob gateway that dispatches to the configured provider.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::info;

use cumulus_core::config::storage::StorageConfig;
use cumulus_core::error::AppError;
use cumulus_core::result::AppResult;
use cumulus_core::traits::blob::BlobStore;

/// Blob gateway wrapping the configured provider.
///
/// The provider is selected once at construction time based on
/// configuration; everything above this type sees only the [`BlobStore`]
/// contract.
#[derive(Debug, Clone)]
pub struct BlobGateway {
    /// The inner blob store.
    inner: Arc<dyn BlobStore>,
}

impl BlobGateway {
    /// Create a new blob gateway from configuration.
    pub async fn new(config: &StorageConfig) -> AppResult<Self> {
        let inner: Arc<dyn BlobStore> = match config.provider.as_str() {
            "local" => {
                info!(root = %config.local.root_path, "Initializing local blob store");
                Arc::new(crate::providers::LocalBlobStore::new(&config.local.root_path).await?)
            }
            "memory" => {
                info!("Initializing in-memory blob store");
                Arc::new(crate::providers::MemoryBlobStore::default())
            }
            #[cfg(feature = "s3")]
            "s3" => Arc::new(crate::providers::S3BlobStore::new(&config.s3).await?),
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown blob provider: '{other}'. Supported: local, memory, s3"
                )));
            }
        };

        Ok(Self { inner })
    }

    /// Create a gateway from an existing provider (for testing).
    pub fn from_provider(provider: Arc<dyn BlobStore>) -> Self {
        Self { inner: provider }
    }
}

#[async_trait]
impl BlobStore for BlobGateway {
    fn provider_type(&self) -> &str {
        self.inner.provider_type()
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.inner.health_check().await
    }

    async fn put(&self, data: Bytes) -> AppResult<String> {
        self.inner.put(data).await
    }

    async fn get(&self, storage_id: &str) -> AppResult<Bytes> {
        self.inner.get(storage_id).await
    }

    async fn delete(&self, storage_id: &str) -> AppResult<()> {
        self.inner.delete(storage_id).await
    }

    async fn exists(&self, storage_id: &str) -> AppResult<bool> {
        self.inner.exists(storage_id).await
    }
}
