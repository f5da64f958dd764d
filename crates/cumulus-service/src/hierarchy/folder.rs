//! Folder operations: listing, creation, rename, shallow delete, and the
//! breadcrumb walk.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use cumulus_auth::ownership::require_owner;
use cumulus_core::error::AppError;
use cumulus_core::result::AppResult;
use cumulus_core::types::{ListRange, Page};
use cumulus_database::FolderStore;
use cumulus_entity::activity::{ActivityAction, CreateActivity};
use cumulus_entity::folder::{CreateFolder, Folder, PathSegment};
use cumulus_entity::resource::ResourceType;

use crate::activity::ActivityRecorder;
use crate::context::RequestContext;

/// Manages folder CRUD and the hierarchy walk.
#[derive(Debug, Clone)]
pub struct FolderService {
    /// Folder collection.
    folders: Arc<dyn FolderStore>,
    /// Best-effort audit channel.
    recorder: ActivityRecorder,
}

/// Request to create a new folder.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CreateFolderRequest {
    /// Folder name.
    pub name: String,
    /// Parent folder ID (None for root-level).
    pub parent_id: Option<Uuid>,
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(folders: Arc<dyn FolderStore>, recorder: ActivityRecorder) -> Self {
        Self { folders, recorder }
    }

    /// Lists the caller's immediate children of `parent_id` (roots when
    /// `None`), newest-first.
    pub async fn list_folders(
        &self,
        ctx: &RequestContext,
        parent_id: Option<Uuid>,
        range: ListRange,
    ) -> AppResult<Page<Folder>> {
        self.folders.list(ctx.user_id, parent_id, &range).await
    }

    /// Gets a folder by ID, enforcing ownership.
    pub async fn get_folder(&self, ctx: &RequestContext, folder_id: Uuid) -> AppResult<Folder> {
        let folder = self
            .folders
            .find_by_id(folder_id)
            .await?
            .ok_or_else(|| AppError::not_found("Folder not found"))?;

        require_owner(ctx.user_id, &folder)?;
        Ok(folder)
    }

    /// Creates a new folder.
    ///
    /// The materialized path is fixed here, once: a child of P lives at
    /// `P.path + P.name + "/"`, a root folder at `"/"`.
    pub async fn create_folder(
        &self,
        ctx: &RequestContext,
        req: CreateFolderRequest,
    ) -> AppResult<Folder> {
        let name = req.name.trim();
        if name.is_empty() {
            return Err(AppError::validation("Folder name is required"));
        }

        let path = match req.parent_id {
            Some(parent_id) => {
                let parent = self
                    .folders
                    .find_by_id(parent_id)
                    .await?
                    .ok_or_else(|| AppError::not_found("Parent folder not found"))?;
                require_owner(ctx.user_id, &parent)?;
                parent.child_path()
            }
            None => "/".to_string(),
        };

        let folder = self
            .folders
            .create(&CreateFolder {
                name: name.to_string(),
                parent_id: req.parent_id,
                owner_id: ctx.user_id,
                path,
            })
            .await?;

        self.recorder
            .record(CreateActivity::new(
                ctx.user_id,
                ActivityAction::CreateFolder,
                folder.id,
                &folder.name,
                ResourceType::Folder,
            ))
            .await;

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder.id,
            path = %folder.path,
            "Folder created"
        );

        Ok(folder)
    }

    /// Renames a folder. Only `name` changes; the stored path of the folder
    /// and of every descendant keeps the old name.
    pub async fn rename_folder(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
        new_name: &str,
    ) -> AppResult<Folder> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(AppError::validation("New name is required"));
        }

        let folder = self.get_folder(ctx, folder_id).await?;
        let old_name = folder.name.clone();

        let renamed = self.folders.rename(folder_id, new_name).await?;

        self.recorder
            .record(
                CreateActivity::new(
                    ctx.user_id,
                    ActivityAction::RenameFolder,
                    renamed.id,
                    &renamed.name,
                    ResourceType::Folder,
                )
                .with_details(format!("{old_name} → {new_name}")),
            )
            .await;

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder_id,
            new_name = %new_name,
            "Folder renamed"
        );

        Ok(renamed)
    }

    /// Deletes a folder record.
    ///
    /// Shallow: children keep their dangling `parent_id` references and
    /// simply stop appearing in any listing that walks through this folder.
    pub async fn delete_folder(&self, ctx: &RequestContext, folder_id: Uuid) -> AppResult<()> {
        let folder = self.get_folder(ctx, folder_id).await?;

        if !self.folders.delete(folder_id).await? {
            return Err(AppError::not_found("Folder not found"));
        }

        self.recorder
            .record(CreateActivity::new(
                ctx.user_id,
                ActivityAction::DeleteFolder,
                folder.id,
                &folder.name,
                ResourceType::Folder,
            ))
            .await;

        info!(
            user_id = %ctx.user_id,
            folder_id = %folder_id,
            path = %folder.path,
            "Folder deleted"
        );

        Ok(())
    }

    /// Walks `parent_id` links from `folder_id` up to a root and returns the
    /// breadcrumb trail, rooted at the synthetic `Home` segment.
    ///
    /// Fails `Forbidden` at the first ancestor not owned by the caller.
    /// O(depth); parents are immutable after creation, so the walk cannot
    /// cycle.
    pub async fn folder_path(
        &self,
        ctx: &RequestContext,
        folder_id: Uuid,
    ) -> AppResult<Vec<PathSegment>> {
        let mut trail = Vec::new();
        let mut current = Some(folder_id);

        while let Some(id) = current {
            let folder = self
                .folders
                .find_by_id(id)
                .await?
                .ok_or_else(|| AppError::not_found("Folder not found"))?;
            require_owner(ctx.user_id, &folder)?;

            trail.push(PathSegment {
                id: Some(folder.id),
                name: folder.name.clone(),
                path: folder.path.clone(),
            });
            current = folder.parent_id;
        }

        trail.push(PathSegment::home());
        trail.reverse();
        Ok(trail)
    }
}
