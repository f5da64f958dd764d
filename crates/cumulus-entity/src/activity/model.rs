//! Activity log entry entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::resource::ResourceType;

/// The action an activity record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "activity_action", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ActivityAction {
    /// A file was uploaded.
    Upload,
    /// A file was downloaded.
    Download,
    /// A file was renamed.
    Rename,
    /// A file was moved to a different folder.
    Move,
    /// A file was deleted.
    Delete,
    /// A file was shared.
    Share,
    /// A file share was revoked.
    Unshare,
    /// A folder was created.
    CreateFolder,
    /// A folder was renamed.
    RenameFolder,
    /// A folder was deleted.
    DeleteFolder,
    /// A folder was shared.
    ShareFolder,
    /// A folder share was revoked.
    UnshareFolder,
}

/// An immutable audit log entry recording one state-changing action.
///
/// Entries are append-only; the only deletion path is age-based retention
/// pruning.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ActivityRecord {
    /// Unique entry identifier.
    pub id: Uuid,
    /// The user who performed the action.
    pub user_id: Uuid,
    /// The action that was performed.
    pub action: ActivityAction,
    /// The target resource ID.
    pub target_id: Uuid,
    /// The target's name at the time of the action.
    pub target_name: String,
    /// The type of the target resource.
    pub target_type: ResourceType,
    /// Additional free-text details (e.g., `"old → new"` for renames).
    pub details: Option<String>,
    /// When the action occurred.
    pub created_at: DateTime<Utc>,
}

/// Data required to append a new activity record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateActivity {
    /// The acting user.
    pub user_id: Uuid,
    /// The action performed.
    pub action: ActivityAction,
    /// The target resource ID.
    pub target_id: Uuid,
    /// The target's name.
    pub target_name: String,
    /// The target's type.
    pub target_type: ResourceType,
    /// Additional details.
    pub details: Option<String>,
}

impl CreateActivity {
    /// Shorthand for the common detail-less entry.
    pub fn new(
        user_id: Uuid,
        action: ActivityAction,
        target_id: Uuid,
        target_name: impl Into<String>,
        target_type: ResourceType,
    ) -> Self {
        Self {
            user_id,
            action,
            target_id,
            target_name: target_name.into(),
            target_type,
            details: None,
        }
    }

    /// Attach free-text details.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}
