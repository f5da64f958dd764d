//! File entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::resource::Owned;

/// A file stored in Cumulus.
///
/// The raw bytes live in the blob store under the opaque `storage_id`; this
/// record is the only link between the hierarchy and the blob.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct File {
    /// Unique file identifier.
    pub id: Uuid,
    /// Current file name (may diverge from `original_name` after renames).
    pub name: String,
    /// The name the file was uploaded with.
    pub original_name: String,
    /// File size in bytes.
    pub size_bytes: i64,
    /// MIME type of the file.
    pub mime_type: String,
    /// Opaque blob store id holding the content.
    pub storage_id: String,
    /// The containing folder (null for root-level files).
    pub folder_id: Option<Uuid>,
    /// The file owner.
    pub owner_id: Uuid,
    /// Materialized path of the containing folder at upload/move time.
    pub path: String,
    /// Whether an active share points at this file.
    pub is_shared: bool,
    /// Denormalized token of the most recent share.
    pub share_token: Option<String>,
    /// Denormalized expiry of the most recent share.
    pub share_expiry: Option<DateTime<Utc>>,
    /// User-assigned tags.
    pub tags: Vec<String>,
    /// When the file was created.
    pub created_at: DateTime<Utc>,
    /// When the file was last updated.
    pub updated_at: DateTime<Utc>,
}

impl File {
    /// Get the file extension (lowercase), if any.
    pub fn extension(&self) -> Option<String> {
        self.name
            .rsplit('.')
            .next()
            .filter(|ext| *ext != self.name)
            .map(|ext| ext.to_lowercase())
    }
}

impl Owned for File {
    fn owner_id(&self) -> Uuid {
        self.owner_id
    }
}

/// Data required to create a new file record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFile {
    /// The file name.
    pub name: String,
    /// The name the file was uploaded with.
    pub original_name: String,
    /// File size in bytes.
    pub size_bytes: i64,
    /// MIME type.
    pub mime_type: String,
    /// Opaque blob store id.
    pub storage_id: String,
    /// The containing folder (None for root-level).
    pub folder_id: Option<Uuid>,
    /// The file owner.
    pub owner_id: Uuid,
    /// Materialized path of the containing folder.
    pub path: String,
    /// User-assigned tags.
    pub tags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension() {
        let mut file = File {
            id: Uuid::new_v4(),
            name: "Report.PDF".to_string(),
            original_name: "Report.PDF".to_string(),
            size_bytes: 10,
            mime_type: "application/pdf".to_string(),
            storage_id: "blob-1".to_string(),
            folder_id: None,
            owner_id: Uuid::new_v4(),
            path: "/".to_string(),
            is_shared: false,
            share_token: None,
            share_expiry: None,
            tags: Vec::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(file.extension(), Some("pdf".to_string()));

        file.name = "Makefile".to_string();
        assert_eq!(file.extension(), None);
    }
}
