//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::resource::Owned;

/// A folder in the file hierarchy.
///
/// `path` is the materialized concatenation of ancestor names ending in `/`
/// (root folders have `"/"`). It is computed once at creation from the
/// parent's `path + name + "/"` and is never recomputed when an ancestor is
/// renamed.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Folder {
    /// Unique folder identifier.
    pub id: Uuid,
    /// Folder name.
    pub name: String,
    /// Parent folder ID (null for root folders). Immutable after creation.
    pub parent_id: Option<Uuid>,
    /// The folder owner.
    pub owner_id: Uuid,
    /// Materialized ancestor path (e.g., `/Docs/2024/`).
    pub path: String,
    /// Whether an active share points at this folder.
    pub is_shared: bool,
    /// Denormalized token of the most recent share.
    pub share_token: Option<String>,
    /// Denormalized expiry of the most recent share.
    pub share_expiry: Option<DateTime<Utc>>,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
    /// When the folder was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Folder {
    /// The path a direct child of this folder materializes at creation.
    pub fn child_path(&self) -> String {
        format!("{}{}/", self.path, self.name)
    }
}

impl Owned for Folder {
    fn owner_id(&self) -> Uuid {
        self.owner_id
    }
}

/// Data required to create a new folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolder {
    /// Folder name.
    pub name: String,
    /// Parent folder (None for root).
    pub parent_id: Option<Uuid>,
    /// The folder owner.
    pub owner_id: Uuid,
    /// Materialized ancestor path.
    pub path: String,
}

/// One element of a breadcrumb trail, as returned by the path walk.
///
/// The first element is always the synthetic `Home` root with `id: None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathSegment {
    /// Folder id, or `None` for the synthetic root.
    pub id: Option<Uuid>,
    /// Display name.
    pub name: String,
    /// Materialized path of the segment.
    pub path: String,
}

impl PathSegment {
    /// The synthetic root segment prepended to every breadcrumb.
    pub fn home() -> Self {
        Self {
            id: None,
            name: "Home".to_string(),
            path: "/".to_string(),
        }
    }
}
