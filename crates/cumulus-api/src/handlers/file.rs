//! File endpoints, including multipart upload and raw download.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use bytes::Bytes;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use cumulus_core::error::AppError;
use cumulus_service::hierarchy::file::UploadRequest;

use crate::dto::request::{MoveFileRequest, RenameRequest};
use crate::dto::response::{message, ok};
use crate::error::ApiError;
use crate::extractors::{AuthUser, RangeQuery};
use crate::state::AppState;

/// Query parameters for `GET /api/files`.
#[derive(Debug, Deserialize)]
pub struct ListFilesQuery {
    /// Folder to list (absent = root-level files).
    pub folder_id: Option<Uuid>,
    /// Window limit.
    pub limit: Option<u32>,
    /// Window offset.
    pub offset: Option<u32>,
}

/// GET /api/files
pub async fn list_files(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<ListFilesQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let range = RangeQuery {
        limit: params.limit,
        offset: params.offset,
    }
    .resolve();

    let page = state
        .file_service
        .list_files(&auth, params.folder_id, range)
        .await?;

    Ok(ok(page))
}

/// GET /api/files/{id}
pub async fn get_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let file = state.file_service.get_file(&auth, id).await?;
    Ok(ok(file))
}

/// POST /api/files/upload (multipart: `file` part plus optional
/// `folder_id` text field)
pub async fn upload_file(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut folder_id: Option<Uuid> = None;
    let mut file_part: Option<(String, String, Bytes)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError(AppError::validation(format!("Malformed multipart body: {e}"))))?
    {
        let field_name = field.name().map(str::to_string);
        match field_name.as_deref() {
            Some("file") => {
                let name = field
                    .file_name()
                    .map(str::to_string)
                    .unwrap_or_default();
                let mime_type = field
                    .content_type()
                    .map(str::to_string)
                    .unwrap_or_default();
                let data = field.bytes().await.map_err(|e| {
                    ApiError(AppError::validation(format!("Failed to read file part: {e}")))
                })?;
                file_part = Some((name, mime_type, data));
            }
            Some("folder_id") => {
                let text = field.text().await.map_err(|e| {
                    ApiError(AppError::validation(format!("Failed to read folder_id: {e}")))
                })?;
                if !text.trim().is_empty() {
                    folder_id = Some(text.trim().parse().map_err(|_| {
                        ApiError(AppError::validation("Invalid folder_id"))
                    })?);
                }
            }
            _ => {}
        }
    }

    let (name, mime_type, data) =
        file_part.ok_or_else(|| ApiError(AppError::validation("No file provided")))?;

    let file = state
        .file_service
        .upload(
            &auth,
            UploadRequest {
                name,
                mime_type,
                folder_id,
            },
            data,
        )
        .await?;

    Ok(ok(file))
}

/// GET /api/files/{id}/download
pub async fn download_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    let (file, data) = state.file_service.download(&auth, id).await?;

    let headers = [
        (header::CONTENT_TYPE, file.mime_type.clone()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file.name.replace('"', "")),
        ),
    ];

    Ok((headers, data).into_response())
}

/// PATCH /api/files/{id}/rename
pub async fn rename_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<RenameRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    req.validate()
        .map_err(|e| ApiError(AppError::validation(e.to_string())))?;

    let file = state.file_service.rename(&auth, id, &req.new_name).await?;
    Ok(ok(file))
}

/// PATCH /api/files/{id}/move
pub async fn move_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<MoveFileRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let file = state
        .file_service
        .move_file(&auth, id, req.folder_id)
        .await?;
    Ok(ok(file))
}

/// DELETE /api/files/{id}
pub async fn delete_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.file_service.delete(&auth, id).await?;
    Ok(message("File deleted successfully"))
}
