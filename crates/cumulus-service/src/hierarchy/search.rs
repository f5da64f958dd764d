//! Name search across the caller's files and folders.

use std::sync::Arc;

use cumulus_core::error::AppError;
use cumulus_core::result::AppResult;
use cumulus_database::{FileStore, FolderStore};
use cumulus_entity::file::File;
use cumulus_entity::folder::Folder;

use crate::context::RequestContext;

/// Which collections a search covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchFilter {
    /// Files only.
    Files,
    /// Folders only.
    Folders,
    /// Both collections.
    #[default]
    All,
}

impl SearchFilter {
    /// Parse the query-string form (`files`, `folders`, `all`).
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "files" => Some(Self::Files),
            "folders" => Some(Self::Folders),
            "all" => Some(Self::All),
            _ => None,
        }
    }
}

/// Search hits, grouped by collection.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SearchResults {
    /// Matching files, newest-first.
    pub files: Vec<File>,
    /// Matching folders, newest-first.
    pub folders: Vec<Folder>,
}

/// Case-insensitive name-contains search over the caller's own resources.
#[derive(Debug, Clone)]
pub struct SearchService {
    files: Arc<dyn FileStore>,
    folders: Arc<dyn FolderStore>,
}

impl SearchService {
    /// Creates a new search service.
    pub fn new(files: Arc<dyn FileStore>, folders: Arc<dyn FolderStore>) -> Self {
        Self { files, folders }
    }

    /// Run a search. The query must be non-empty.
    pub async fn search(
        &self,
        ctx: &RequestContext,
        query: &str,
        filter: SearchFilter,
        limit: u32,
    ) -> AppResult<SearchResults> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::validation("Search query is required"));
        }
        let limit = i64::from(limit.clamp(1, 100));

        let files = match filter {
            SearchFilter::Files | SearchFilter::All => {
                self.files.search(ctx.user_id, query, limit).await?
            }
            SearchFilter::Folders => Vec::new(),
        };

        let folders = match filter {
            SearchFilter::Folders | SearchFilter::All => {
                self.folders.search(ctx.user_id, query, limit).await?
            }
            SearchFilter::Files => Vec::new(),
        };

        Ok(SearchResults { files, folders })
    }
}
