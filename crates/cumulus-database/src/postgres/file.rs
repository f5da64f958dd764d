//! PostgreSQL file store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use cumulus_core::error::{AppError, ErrorKind};
use cumulus_core::result::AppResult;
use cumulus_core::types::{ListRange, Page};
use cumulus_entity::file::{CreateFile, File};

use crate::stores::FileStore;

/// File store backed by the `files` table.
#[derive(Debug, Clone)]
pub struct PgFileStore {
    pool: PgPool,
}

impl PgFileStore {
    /// Create a new file store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FileStore for PgFileStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<File>> {
        sqlx::query_as::<_, File>("SELECT * FROM files WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find file", e))
    }

    async fn list(
        &self,
        owner_id: Uuid,
        folder_id: Option<Uuid>,
        range: &ListRange,
    ) -> AppResult<Page<File>> {
        let (total, files) = if let Some(folder) = folder_id {
            let total: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM files WHERE owner_id = $1 AND folder_id = $2",
            )
            .bind(owner_id)
            .bind(folder)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count files", e))?;
            let files = sqlx::query_as::<_, File>(
                "SELECT * FROM files WHERE owner_id = $1 AND folder_id = $2 \
                 ORDER BY created_at DESC LIMIT $3 OFFSET $4",
            )
            .bind(owner_id)
            .bind(folder)
            .bind(range.limit())
            .bind(range.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list files", e))?;
            (total, files)
        } else {
            let total: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM files WHERE owner_id = $1 AND folder_id IS NULL",
            )
            .bind(owner_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count files", e))?;
            let files = sqlx::query_as::<_, File>(
                "SELECT * FROM files WHERE owner_id = $1 AND folder_id IS NULL \
                 ORDER BY created_at DESC LIMIT $2 OFFSET $3",
            )
            .bind(owner_id)
            .bind(range.limit())
            .bind(range.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list files", e))?;
            (total, files)
        };

        Ok(Page::new(files, total as u64, range))
    }

    async fn create(&self, data: &CreateFile) -> AppResult<File> {
        sqlx::query_as::<_, File>(
            "INSERT INTO files \
             (name, original_name, size_bytes, mime_type, storage_id, folder_id, owner_id, path, tags) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.original_name)
        .bind(data.size_bytes)
        .bind(&data.mime_type)
        .bind(&data.storage_id)
        .bind(data.folder_id)
        .bind(data.owner_id)
        .bind(&data.path)
        .bind(&data.tags)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create file", e))
    }

    async fn rename(&self, id: Uuid, new_name: &str) -> AppResult<File> {
        sqlx::query_as::<_, File>(
            "UPDATE files SET name = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(new_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to rename file", e))?
        .ok_or_else(|| AppError::not_found(format!("File {id} not found")))
    }

    async fn move_to(&self, id: Uuid, folder_id: Option<Uuid>, path: &str) -> AppResult<File> {
        sqlx::query_as::<_, File>(
            "UPDATE files SET folder_id = $2, path = $3, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(folder_id)
        .bind(path)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to move file", e))?
        .ok_or_else(|| AppError::not_found(format!("File {id} not found")))
    }

    async fn set_share_state(
        &self,
        id: Uuid,
        is_shared: bool,
        share_token: Option<&str>,
        share_expiry: Option<DateTime<Utc>>,
    ) -> AppResult<()> {
        sqlx::query(
            "UPDATE files SET is_shared = $2, share_token = $3, share_expiry = $4, \
             updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(is_shared)
        .bind(share_token)
        .bind(share_expiry)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update file share state", e)
        })?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM files WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete file", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn search(&self, owner_id: Uuid, query: &str, limit: i64) -> AppResult<Vec<File>> {
        sqlx::query_as::<_, File>(
            "SELECT * FROM files WHERE owner_id = $1 AND name ILIKE '%' || $2 || '%' \
             ORDER BY created_at DESC LIMIT $3",
        )
        .bind(owner_id)
        .bind(query)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to search files", e))
    }
}
