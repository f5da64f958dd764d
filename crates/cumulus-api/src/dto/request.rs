//! Request body DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use cumulus_entity::resource::ResourceType;

/// Body for `POST /api/folders`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateFolderRequest {
    /// Folder name.
    #[validate(length(min = 1, message = "Folder name is required"))]
    pub name: String,
    /// Parent folder ID.
    #[serde(default)]
    pub parent_id: Option<Uuid>,
}

/// Body for the rename endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RenameRequest {
    /// The new name.
    #[validate(length(min = 1, message = "New name is required"))]
    pub new_name: String,
}

/// Body for `PATCH /api/files/{id}/move`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveFileRequest {
    /// Destination folder (null or absent = root).
    #[serde(default)]
    pub folder_id: Option<Uuid>,
}

/// Body for `POST /api/sharing`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateShareRequest {
    /// The resource being shared.
    pub resource_id: Uuid,
    /// Its type.
    pub resource_type: ResourceType,
    /// Granted permissions.
    #[serde(default = "default_permissions")]
    pub permissions: Vec<String>,
    /// Expiry (absent = never).
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    /// Whether the link is public.
    #[serde(default = "default_is_public")]
    pub is_public: bool,
    /// Email the share is addressed to.
    #[serde(default)]
    pub shared_with_email: Option<String>,
}

fn default_permissions() -> Vec<String> {
    vec!["read".to_string()]
}

fn default_is_public() -> bool {
    true
}
