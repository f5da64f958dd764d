//! Resource polymorphism: the two kinds of things a user owns.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::file::File;
use crate::folder::Folder;

/// The type of a shareable resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "resource_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    /// A file.
    File,
    /// A folder.
    Folder,
}

impl std::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Folder => write!(f, "folder"),
        }
    }
}

/// A resolved resource, as returned by share resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Resource {
    /// A file resource.
    File(File),
    /// A folder resource.
    Folder(Folder),
}

impl Resource {
    /// The resource's id.
    pub fn id(&self) -> Uuid {
        match self {
            Self::File(f) => f.id,
            Self::Folder(f) => f.id,
        }
    }

    /// The resource's display name.
    pub fn name(&self) -> &str {
        match self {
            Self::File(f) => &f.name,
            Self::Folder(f) => &f.name,
        }
    }
}

/// Anything with a single owning user.
///
/// The one ownership predicate every component uses; services call
/// `cumulus_auth::ownership::require_owner` against this trait instead of
/// comparing id fields at each call site.
pub trait Owned {
    /// The id of the owning user.
    fn owner_id(&self) -> Uuid;
}

impl Owned for Resource {
    fn owner_id(&self) -> Uuid {
        match self {
            Self::File(f) => f.owner_id,
            Self::Folder(f) => f.owner_id,
        }
    }
}
