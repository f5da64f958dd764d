//! S3-compatible blob store (requires the `s3` feature).

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use bytes::Bytes;
use tracing::{debug, info};
use uuid::Uuid;

use cumulus_core::config::storage::S3BlobConfig;
use cumulus_core::error::{AppError, ErrorKind};
use cumulus_core::result::AppResult;
use cumulus_core::traits::blob::BlobStore;

/// Blob store backed by an S3-compatible object store.
#[derive(Debug, Clone)]
pub struct S3BlobStore {
    client: Client,
    bucket: String,
    key_prefix: String,
}

impl S3BlobStore {
    /// Create a new S3 blob store from configuration. Credentials come from
    /// the standard AWS provider chain.
    pub async fn new(config: &S3BlobConfig) -> AppResult<Self> {
        info!(
            endpoint = %config.endpoint,
            region = %config.region,
            bucket = %config.bucket,
            "Initializing S3 blob store"
        );

        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_sdk_s3::config::Region::new(config.region.clone()));
        if !config.endpoint.is_empty() {
            loader = loader.endpoint_url(&config.endpoint);
        }
        let sdk_config = loader.load().await;

        Ok(Self {
            client: Client::new(&sdk_config),
            bucket: config.bucket.clone(),
            key_prefix: config.key_prefix.clone(),
        })
    }

    fn key(&self, storage_id: &str) -> String {
        if self.key_prefix.is_empty() {
            storage_id.to_string()
        } else {
            format!("{}/{}", self.key_prefix.trim_end_matches('/'), storage_id)
        }
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    fn provider_type(&self) -> &str {
        "s3"
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.client
            .head_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .map(|_| true)
            .map_err(|e| {
                AppError::with_source(ErrorKind::Storage, "S3 bucket unreachable", e)
            })
    }

    async fn put(&self, data: Bytes) -> AppResult<String> {
        let storage_id = Uuid::new_v4().to_string();

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(self.key(&storage_id))
            .body(ByteStream::from(data.clone()))
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to write blob {storage_id}"),
                    e,
                )
            })?;

        debug!(storage_id, bytes = data.len(), "Wrote blob to S3");
        Ok(storage_id)
    }

    async fn get(&self, storage_id: &str) -> AppResult<Bytes> {
        let output = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(self.key(storage_id))
            .send()
            .await
            .map_err(|e| {
                let service_err = e.into_service_error();
                if service_err.is_no_such_key() {
                    AppError::not_found(format!("Blob not found: {storage_id}"))
                } else {
                    AppError::with_source(
                        ErrorKind::Storage,
                        format!("Failed to read blob {storage_id}"),
                        service_err,
                    )
                }
            })?;

        let data = output.body.collect().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to read blob body {storage_id}"),
                e,
            )
        })?;
        Ok(data.into_bytes())
    }

    async fn delete(&self, storage_id: &str) -> AppResult<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(self.key(storage_id))
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to delete blob {storage_id}"),
                    e,
                )
            })?;
        Ok(())
    }

    async fn exists(&self, storage_id: &str) -> AppResult<bool> {
        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(self.key(storage_id))
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(e) => {
                let service_err = e.into_service_error();
                if service_err.is_not_found() {
                    Ok(false)
                } else {
                    Err(AppError::with_source(
                        ErrorKind::Storage,
                        format!("Failed to stat blob {storage_id}"),
                        service_err,
                    ))
                }
            }
        }
    }
}
