//! PostgreSQL share store.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use cumulus_core::error::{AppError, ErrorKind};
use cumulus_core::result::AppResult;
use cumulus_core::types::{ListRange, Page};
use cumulus_entity::share::{CreateShare, Share};

use crate::stores::ShareStore;

/// Share store backed by the `shares` table.
#[derive(Debug, Clone)]
pub struct PgShareStore {
    pool: PgPool,
}

impl PgShareStore {
    /// Create a new share store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShareStore for PgShareStore {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Share>> {
        sqlx::query_as::<_, Share>("SELECT * FROM shares WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find share", e))
    }

    async fn find_by_token(&self, token: &str) -> AppResult<Option<Share>> {
        sqlx::query_as::<_, Share>("SELECT * FROM shares WHERE token = $1")
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find share by token", e)
            })
    }

    async fn list_by_owner(&self, owner_id: Uuid, range: &ListRange) -> AppResult<Page<Share>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM shares WHERE owner_id = $1")
            .bind(owner_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count shares", e))?;

        let shares = sqlx::query_as::<_, Share>(
            "SELECT * FROM shares WHERE owner_id = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(owner_id)
        .bind(range.limit())
        .bind(range.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list shares", e))?;

        Ok(Page::new(shares, total as u64, range))
    }

    async fn create(&self, data: &CreateShare) -> AppResult<Share> {
        sqlx::query_as::<_, Share>(
            "INSERT INTO shares \
             (resource_id, resource_type, owner_id, shared_with_email, permissions, token, expires_at, is_public) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(data.resource_id)
        .bind(data.resource_type)
        .bind(data.owner_id)
        .bind(&data.shared_with_email)
        .bind(&data.permissions)
        .bind(&data.token)
        .bind(data.expires_at)
        .bind(data.is_public)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create share", e))
    }

    async fn update(&self, share: &Share) -> AppResult<Share> {
        sqlx::query_as::<_, Share>(
            "UPDATE shares SET permissions = $2, expires_at = $3, is_public = $4 \
             WHERE id = $1 RETURNING *",
        )
        .bind(share.id)
        .bind(&share.permissions)
        .bind(share.expires_at)
        .bind(share.is_public)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update share", e))?
        .ok_or_else(|| AppError::not_found(format!("Share {} not found", share.id)))
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM shares WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete share", e))?;
        Ok(result.rows_affected() > 0)
    }
}
