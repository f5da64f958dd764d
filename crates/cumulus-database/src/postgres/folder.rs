//! PostgreSQL folder store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use cumulus_core::error::{AppError, ErrorKind};
use cumulus_core::result::AppResult;
use cumulus_core::types::{ListRange, Page};
use cumulus_entity::folder::{CreateFolder, Folder};

use crate::stores::FolderStore;

/// Folder store backed by the `folders` table.
#[derive(Debug, Clone)]
pub struct PgFolderStore {
    pool: PgPool,
}

impl PgFolderStore {
    /// Create a new folder store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FolderStore for PgFolderStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find folder", e))
    }

    async fn list(
        &self,
        owner_id: Uuid,
        parent_id: Option<Uuid>,
        range: &ListRange,
    ) -> AppResult<Page<Folder>> {
        let (total, folders) = if let Some(parent) = parent_id {
            let total: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM folders WHERE owner_id = $1 AND parent_id = $2",
            )
            .bind(owner_id)
            .bind(parent)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count folders", e)
            })?;
            let folders = sqlx::query_as::<_, Folder>(
                "SELECT * FROM folders WHERE owner_id = $1 AND parent_id = $2 \
                 ORDER BY created_at DESC LIMIT $3 OFFSET $4",
            )
            .bind(owner_id)
            .bind(parent)
            .bind(range.limit())
            .bind(range.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list folders", e)
            })?;
            (total, folders)
        } else {
            let total: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM folders WHERE owner_id = $1 AND parent_id IS NULL",
            )
            .bind(owner_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count folders", e)
            })?;
            let folders = sqlx::query_as::<_, Folder>(
                "SELECT * FROM folders WHERE owner_id = $1 AND parent_id IS NULL \
                 ORDER BY created_at DESC LIMIT $2 OFFSET $3",
            )
            .bind(owner_id)
            .bind(range.limit())
            .bind(range.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list folders", e)
            })?;
            (total, folders)
        };

        Ok(Page::new(folders, total as u64, range))
    }

    async fn create(&self, data: &CreateFolder) -> AppResult<Folder> {
        sqlx::query_as::<_, Folder>(
            "INSERT INTO folders (name, parent_id, owner_id, path) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(&data.name)
        .bind(data.parent_id)
        .bind(data.owner_id)
        .bind(&data.path)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create folder", e))
    }

    async fn rename(&self, id: Uuid, new_name: &str) -> AppResult<Folder> {
        sqlx::query_as::<_, Folder>(
            "UPDATE folders SET name = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(new_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to rename folder", e))?
        .ok_or_else(|| AppError::not_found(format!("Folder {id} not found")))
    }

    async fn set_share_state(
        &self,
        id: Uuid,
        is_shared: bool,
        share_token: Option<&str>,
        share_expiry: Option<DateTime<Utc>>,
    ) -> AppResult<()> {
        sqlx::query(
            "UPDATE folders SET is_shared = $2, share_token = $3, share_expiry = $4, \
             updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .bind(is_shared)
        .bind(share_token)
        .bind(share_expiry)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update folder share state", e)
        })?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM folders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete folder", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    async fn search(&self, owner_id: Uuid, query: &str, limit: i64) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>(
            "SELECT * FROM folders WHERE owner_id = $1 AND name ILIKE '%' || $2 || '%' \
             ORDER BY created_at DESC LIMIT $3",
        )
        .bind(owner_id)
        .bind(query)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to search folders", e))
    }
}
