//! Collection store traits.
//!
//! The document database is an external collaborator: each collection is
//! reached through one of these traits, and the backend (PostgreSQL or
//! in-memory) is chosen once at construction. Entity-specific query methods
//! live on the traits; nothing above this layer issues queries directly.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use cumulus_core::result::AppResult;
use cumulus_core::types::{ListRange, Page};
use cumulus_entity::activity::{ActivityRecord, CreateActivity};
use cumulus_entity::file::{CreateFile, File};
use cumulus_entity::folder::{CreateFolder, Folder};
use cumulus_entity::share::{CreateShare, Share};

/// Store for the `folders` collection.
#[async_trait]
pub trait FolderStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a folder by ID.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Folder>>;

    /// List an owner's immediate children of `parent_id` (roots when
    /// `None`), newest-first.
    async fn list(
        &self,
        owner_id: Uuid,
        parent_id: Option<Uuid>,
        range: &ListRange,
    ) -> AppResult<Page<Folder>>;

    /// Create a new folder.
    async fn create(&self, data: &CreateFolder) -> AppResult<Folder>;

    /// Rename a folder. The materialized path is left untouched.
    async fn rename(&self, id: Uuid, new_name: &str) -> AppResult<Folder>;

    /// Set the denormalized share fields.
    async fn set_share_state(
        &self,
        id: Uuid,
        is_shared: bool,
        share_token: Option<&str>,
        share_expiry: Option<DateTime<Utc>>,
    ) -> AppResult<()>;

    /// Delete a folder record. Returns `true` if a record was removed.
    /// Children are not touched.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    /// Case-insensitive name-contains search over an owner's folders,
    /// newest-first.
    async fn search(&self, owner_id: Uuid, query: &str, limit: i64) -> AppResult<Vec<Folder>>;
}

/// Store for the `files` collection.
#[async_trait]
pub trait FileStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a file by ID.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<File>>;

    /// List an owner's files in `folder_id` (root-level when `None`),
    /// newest-first.
    async fn list(
        &self,
        owner_id: Uuid,
        folder_id: Option<Uuid>,
        range: &ListRange,
    ) -> AppResult<Page<File>>;

    /// Create a new file record.
    async fn create(&self, data: &CreateFile) -> AppResult<File>;

    /// Rename a file. The materialized path is left untouched.
    async fn rename(&self, id: Uuid, new_name: &str) -> AppResult<File>;

    /// Move a file to a different folder, replacing its materialized path.
    async fn move_to(
        &self,
        id: Uuid,
        folder_id: Option<Uuid>,
        path: &str,
    ) -> AppResult<File>;

    /// Set the denormalized share fields.
    async fn set_share_state(
        &self,
        id: Uuid,
        is_shared: bool,
        share_token: Option<&str>,
        share_expiry: Option<DateTime<Utc>>,
    ) -> AppResult<()>;

    /// Delete a file record. Returns `true` if a record was removed.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    /// Case-insensitive name-contains search over an owner's files,
    /// newest-first.
    async fn search(&self, owner_id: Uuid, query: &str, limit: i64) -> AppResult<Vec<File>>;
}

/// Store for the `shares` collection.
#[async_trait]
pub trait ShareStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a share by ID.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Share>>;

    /// Find a share by its bearer token.
    async fn find_by_token(&self, token: &str) -> AppResult<Option<Share>>;

    /// List shares created by an owner, newest-first.
    async fn list_by_owner(&self, owner_id: Uuid, range: &ListRange) -> AppResult<Page<Share>>;

    /// Create a new share.
    async fn create(&self, data: &CreateShare) -> AppResult<Share>;

    /// Replace an existing share row.
    async fn update(&self, share: &Share) -> AppResult<Share>;

    /// Delete a share record. Returns `true` if a record was removed.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

/// Store for the `activities` collection.
#[async_trait]
pub trait ActivityStore: Send + Sync + std::fmt::Debug + 'static {
    /// Append a new activity record.
    async fn append(&self, data: &CreateActivity) -> AppResult<ActivityRecord>;

    /// List a user's activity, newest-first.
    async fn list_by_user(
        &self,
        user_id: Uuid,
        range: &ListRange,
    ) -> AppResult<Page<ActivityRecord>>;

    /// Delete up to `limit` records older than `cutoff`. Returns the number
    /// deleted; repeated calls with no new old records delete nothing.
    async fn delete_older_than(&self, cutoff: DateTime<Utc>, limit: i64) -> AppResult<u64>;
}

/// The full set of collection stores, selected per backend.
#[derive(Debug, Clone)]
pub struct Stores {
    /// Folder collection.
    pub folders: Arc<dyn FolderStore>,
    /// File collection.
    pub files: Arc<dyn FileStore>,
    /// Share collection.
    pub shares: Arc<dyn ShareStore>,
    /// Activity collection.
    pub activities: Arc<dyn ActivityStore>,
}

impl Stores {
    /// Stores backed by a PostgreSQL pool.
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            folders: Arc::new(crate::postgres::PgFolderStore::new(pool.clone())),
            files: Arc::new(crate::postgres::PgFileStore::new(pool.clone())),
            shares: Arc::new(crate::postgres::PgShareStore::new(pool.clone())),
            activities: Arc::new(crate::postgres::PgActivityStore::new(pool)),
        }
    }

    /// Stores backed by process-local memory. Used by tests and the
    /// `database.provider = "memory"` development mode; contents do not
    /// survive a restart.
    pub fn memory() -> Self {
        Self {
            folders: Arc::new(crate::memory::MemoryFolderStore::default()),
            files: Arc::new(crate::memory::MemoryFileStore::default()),
            shares: Arc::new(crate::memory::MemoryShareStore::default()),
            activities: Arc::new(crate::memory::MemoryActivityStore::default()),
        }
    }
}
