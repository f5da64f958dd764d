//! Folder endpoints.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use cumulus_core::error::AppError;
use cumulus_service::hierarchy::folder::CreateFolderRequest as SvcCreateFolder;

use crate::dto::request::{CreateFolderRequest, RenameRequest};
use crate::dto::response::{message, ok};
use crate::error::ApiError;
use crate::extractors::{AuthUser, RangeQuery};
use crate::state::AppState;

/// Query parameters for `GET /api/folders`.
#[derive(Debug, Deserialize)]
pub struct ListFoldersQuery {
    /// Parent folder to list (absent = roots).
    pub parent_id: Option<Uuid>,
    /// Window limit.
    pub limit: Option<u32>,
    /// Window offset.
    pub offset: Option<u32>,
}

/// GET /api/folders
pub async fn list_folders(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<ListFoldersQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let range = RangeQuery {
        limit: params.limit,
        offset: params.offset,
    }
    .resolve();

    let page = state
        .folder_service
        .list_folders(&auth, params.parent_id, range)
        .await?;

    Ok(ok(page))
}

/// GET /api/folders/{id}
pub async fn get_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let folder = state.folder_service.get_folder(&auth, id).await?;
    Ok(ok(folder))
}

/// POST /api/folders
pub async fn create_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateFolderRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    req.validate()
        .map_err(|e| ApiError(AppError::validation(e.to_string())))?;

    let folder = state
        .folder_service
        .create_folder(
            &auth,
            SvcCreateFolder {
                name: req.name,
                parent_id: req.parent_id,
            },
        )
        .await?;

    Ok(ok(folder))
}

/// PATCH /api/folders/{id}/rename
pub async fn rename_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<RenameRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    req.validate()
        .map_err(|e| ApiError(AppError::validation(e.to_string())))?;

    let folder = state
        .folder_service
        .rename_folder(&auth, id, &req.new_name)
        .await?;

    Ok(ok(folder))
}

/// DELETE /api/folders/{id}
pub async fn delete_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.folder_service.delete_folder(&auth, id).await?;
    Ok(message("Folder deleted successfully"))
}

/// GET /api/folders/{id}/path
pub async fn folder_path(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let trail = state.folder_service.folder_path(&auth, id).await?;
    Ok(ok(trail))
}
