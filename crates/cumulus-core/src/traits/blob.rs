//! Blob store trait for pluggable binary storage backends.

use async_trait::async_trait;
use bytes::Bytes;

use crate::result::AppResult;

/// Trait for content storage backends.
///
/// The store is addressed purely by opaque ids of its own choosing: `put`
/// generates and returns the id, and no other structure (paths, folders,
/// owners) leaks into this layer. Implementations exist for the local
/// filesystem, in-memory maps, and S3-compatible object stores; the trait is
/// defined here in `cumulus-core` and implemented in `cumulus-storage`.
#[async_trait]
pub trait BlobStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local", "s3").
    fn provider_type(&self) -> &str;

    /// Check whether the provider is healthy and reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Store a blob and return its newly assigned opaque id.
    async fn put(&self, data: Bytes) -> AppResult<String>;

    /// Read a blob into memory. Fails with `NotFound` for unknown ids.
    async fn get(&self, storage_id: &str) -> AppResult<Bytes>;

    /// Delete a blob. Deleting an unknown id is a no-op.
    async fn delete(&self, storage_id: &str) -> AppResult<()>;

    /// Check whether a blob exists.
    async fn exists(&self, storage_id: &str) -> AppResult<bool>;
}
