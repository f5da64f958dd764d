//! File operations: upload, download, rename, move, and delete.
//!
//! Every operation pairing a record with a blob is ordered to fail safe:
//! upload writes the blob before the record (a crash strands a harmless
//! orphan blob), delete removes the blob before the record (a crash leaves
//! a tombstoned record that surfaces `NotFound` on download).

use std::sync::Arc;

use bytes::Bytes;
use tracing::{info, warn};
use uuid::Uuid;

use cumulus_auth::ownership::require_owner;
use cumulus_core::error::{AppError, ErrorKind};
use cumulus_core::result::AppResult;
use cumulus_core::traits::blob::BlobStore;
use cumulus_core::types::{ListRange, Page};
use cumulus_database::{FileStore, FolderStore};
use cumulus_entity::activity::{ActivityAction, CreateActivity};
use cumulus_entity::file::{CreateFile, File};
use cumulus_entity::resource::ResourceType;
use cumulus_storage::BlobGateway;

use crate::activity::ActivityRecorder;
use crate::context::RequestContext;

/// Manages file records and their backing blobs.
#[derive(Debug, Clone)]
pub struct FileService {
    /// File collection.
    files: Arc<dyn FileStore>,
    /// Folder collection, for containment checks and path derivation.
    folders: Arc<dyn FolderStore>,
    /// Blob gateway holding the raw bytes.
    blobs: BlobGateway,
    /// Best-effort audit channel.
    recorder: ActivityRecorder,
}

/// Request to upload a new file.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct UploadRequest {
    /// File name.
    pub name: String,
    /// MIME type reported by the client.
    pub mime_type: String,
    /// Destination folder (None for root-level).
    pub folder_id: Option<Uuid>,
}

impl FileService {
    /// Creates a new file service.
    pub fn new(
        files: Arc<dyn FileStore>,
        folders: Arc<dyn FolderStore>,
        blobs: BlobGateway,
        recorder: ActivityRecorder,
    ) -> Self {
        Self {
            files,
            folders,
            blobs,
            recorder,
        }
    }

    /// Lists the caller's files in `folder_id` (root-level when `None`),
    /// newest-first.
    pub async fn list_files(
        &self,
        ctx: &RequestContext,
        folder_id: Option<Uuid>,
        range: ListRange,
    ) -> AppResult<Page<File>> {
        self.files.list(ctx.user_id, folder_id, &range).await
    }

    /// Gets a file by ID, enforcing ownership.
    pub async fn get_file(&self, ctx: &RequestContext, file_id: Uuid) -> AppResult<File> {
        let file = self
            .files
            .find_by_id(file_id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))?;

        require_owner(ctx.user_id, &file)?;
        Ok(file)
    }

    /// Uploads a file: blob write first, then the record.
    ///
    /// A blob failure aborts with no record. If the record cannot be created
    /// after the blob was written, the blob is deleted best-effort; a blob
    /// stranded by a crash in between is harmless.
    pub async fn upload(
        &self,
        ctx: &RequestContext,
        req: UploadRequest,
        data: Bytes,
    ) -> AppResult<File> {
        let name = req.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::validation("File name is required"));
        }

        let size_bytes = data.len() as i64;
        let storage_id = self.blobs.put(data).await?;

        match self.create_record(ctx, &req, &name, size_bytes, &storage_id).await {
            Ok(file) => {
                self.recorder
                    .record(CreateActivity::new(
                        ctx.user_id,
                        ActivityAction::Upload,
                        file.id,
                        &file.name,
                        ResourceType::File,
                    ))
                    .await;

                info!(
                    user_id = %ctx.user_id,
                    file_id = %file.id,
                    size_bytes,
                    "File uploaded"
                );

                Ok(file)
            }
            Err(e) => {
                if let Err(cleanup) = self.blobs.delete(&storage_id).await {
                    warn!(
                        storage_id = %storage_id,
                        error = %cleanup,
                        "Failed to clean up blob after aborted upload"
                    );
                }
                Err(e)
            }
        }
    }

    async fn create_record(
        &self,
        ctx: &RequestContext,
        req: &UploadRequest,
        name: &str,
        size_bytes: i64,
        storage_id: &str,
    ) -> AppResult<File> {
        let path = match req.folder_id {
            Some(folder_id) => {
                let folder = self
                    .folders
                    .find_by_id(folder_id)
                    .await?
                    .ok_or_else(|| AppError::not_found("Folder not found"))?;
                require_owner(ctx.user_id, &folder)?;
                folder.child_path()
            }
            None => "/".to_string(),
        };

        let mime_type = if req.mime_type.trim().is_empty() {
            "application/octet-stream".to_string()
        } else {
            req.mime_type.clone()
        };

        self.files
            .create(&CreateFile {
                name: name.to_string(),
                original_name: name.to_string(),
                size_bytes,
                mime_type,
                storage_id: storage_id.to_string(),
                folder_id: req.folder_id,
                owner_id: ctx.user_id,
                path,
                tags: Vec::new(),
            })
            .await
    }

    /// Downloads a file's content.
    ///
    /// Allowed for the owner, or for anyone when the file is flagged shared
    /// (the coarse in-app gate; per-token checks live in the share layer).
    /// A record whose blob has vanished is tombstoned and surfaces
    /// `NotFound`.
    pub async fn download(&self, ctx: &RequestContext, file_id: Uuid) -> AppResult<(File, Bytes)> {
        let file = self
            .files
            .find_by_id(file_id)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))?;

        if let Err(denied) = require_owner(ctx.user_id, &file) {
            if !file.is_shared {
                return Err(denied);
            }
        }

        let data = self.blobs.get(&file.storage_id).await.map_err(|e| {
            if e.kind == ErrorKind::NotFound {
                AppError::not_found("File content is no longer available")
            } else {
                e
            }
        })?;

        self.recorder
            .record(CreateActivity::new(
                ctx.user_id,
                ActivityAction::Download,
                file.id,
                &file.name,
                ResourceType::File,
            ))
            .await;

        Ok((file, data))
    }

    /// Renames a file. Only `name` changes; `original_name` and the
    /// materialized path stay as they were.
    pub async fn rename(
        &self,
        ctx: &RequestContext,
        file_id: Uuid,
        new_name: &str,
    ) -> AppResult<File> {
        let new_name = new_name.trim();
        if new_name.is_empty() {
            return Err(AppError::validation("New name is required"));
        }

        let file = self.get_file(ctx, file_id).await?;
        let old_name = file.name.clone();

        let renamed = self.files.rename(file_id, new_name).await?;

        self.recorder
            .record(
                CreateActivity::new(
                    ctx.user_id,
                    ActivityAction::Rename,
                    renamed.id,
                    &renamed.name,
                    ResourceType::File,
                )
                .with_details(format!("{old_name} → {new_name}")),
            )
            .await;

        info!(
            user_id = %ctx.user_id,
            file_id = %file_id,
            new_name = %new_name,
            "File renamed"
        );

        Ok(renamed)
    }

    /// Moves a file into a different folder (or to root with `None`),
    /// re-deriving its materialized path from the destination.
    pub async fn move_file(
        &self,
        ctx: &RequestContext,
        file_id: Uuid,
        new_folder_id: Option<Uuid>,
    ) -> AppResult<File> {
        let file = self.get_file(ctx, file_id).await?;

        let path = match new_folder_id {
            Some(folder_id) => {
                let folder = self
                    .folders
                    .find_by_id(folder_id)
                    .await?
                    .ok_or_else(|| AppError::not_found("Target folder not found"))?;
                require_owner(ctx.user_id, &folder)?;
                folder.child_path()
            }
            None => "/".to_string(),
        };

        let old_path = file.path.clone();
        let moved = self.files.move_to(file_id, new_folder_id, &path).await?;

        self.recorder
            .record(
                CreateActivity::new(
                    ctx.user_id,
                    ActivityAction::Move,
                    moved.id,
                    &moved.name,
                    ResourceType::File,
                )
                .with_details(format!("{old_path} → {path}")),
            )
            .await;

        info!(
            user_id = %ctx.user_id,
            file_id = %file_id,
            path = %path,
            "File moved"
        );

        Ok(moved)
    }

    /// Deletes a file: blob first, then the record.
    ///
    /// A missing blob is tolerated (the record was already tombstoned); any
    /// other blob failure aborts with the record intact.
    pub async fn delete(&self, ctx: &RequestContext, file_id: Uuid) -> AppResult<()> {
        let file = self.get_file(ctx, file_id).await?;

        self.blobs.delete(&file.storage_id).await?;

        if !self.files.delete(file_id).await? {
            return Err(AppError::not_found("File not found"));
        }

        self.recorder
            .record(CreateActivity::new(
                ctx.user_id,
                ActivityAction::Delete,
                file.id,
                &file.name,
                ResourceType::File,
            ))
            .await;

        info!(
            user_id = %ctx.user_id,
            file_id = %file_id,
            "File deleted"
        );

        Ok(())
    }
}
