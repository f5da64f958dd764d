//! PostgreSQL activity store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use cumulus_core::error::{AppError, ErrorKind};
use cumulus_core::result::AppResult;
use cumulus_core::types::{ListRange, Page};
use cumulus_entity::activity::{ActivityRecord, CreateActivity};

use crate::stores::ActivityStore;

/// Activity store backed by the `activities` table.
#[derive(Debug, Clone)]
pub struct PgActivityStore {
    pool: PgPool,
}

impl PgActivityStore {
    /// Create a new activity store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ActivityStore for PgActivityStore {
    async fn append(&self, data: &CreateActivity) -> AppResult<ActivityRecord> {
        sqlx::query_as::<_, ActivityRecord>(
            "INSERT INTO activities (user_id, action, target_id, target_name, target_type, details) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(data.user_id)
        .bind(data.action)
        .bind(data.target_id)
        .bind(&data.target_name)
        .bind(data.target_type)
        .bind(&data.details)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to append activity", e))
    }

    async fn list_by_user(
        &self,
        user_id: Uuid,
        range: &ListRange,
    ) -> AppResult<Page<ActivityRecord>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM activities WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count activities", e)
            })?;

        let records = sqlx::query_as::<_, ActivityRecord>(
            "SELECT * FROM activities WHERE user_id = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(range.limit())
        .bind(range.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list activities", e))?;

        Ok(Page::new(records, total as u64, range))
    }

    async fn delete_older_than(&self, cutoff: DateTime<Utc>, limit: i64) -> AppResult<u64> {
        let result = sqlx::query(
            "DELETE FROM activities WHERE id IN \
             (SELECT id FROM activities WHERE created_at < $1 ORDER BY created_at ASC LIMIT $2)",
        )
        .bind(cutoff)
        .bind(limit)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to prune activities", e))?;
        Ok(result.rows_affected())
    }
}
