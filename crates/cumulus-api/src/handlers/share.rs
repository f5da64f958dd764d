//! Share endpoints, including the unauthenticated token landing.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use cumulus_entity::share::ShareUpdate;
use cumulus_service::share::CreateShareRequest as SvcCreateShare;

use crate::dto::request::CreateShareRequest;
use crate::dto::response::{message, ok};
use crate::error::ApiError;
use crate::extractors::{AuthUser, RangeQuery};
use crate::state::AppState;

/// Query parameters for `GET /api/sharing`.
#[derive(Debug, Deserialize)]
pub struct ListSharesQuery {
    /// Window limit.
    pub limit: Option<u32>,
    /// Window offset.
    pub offset: Option<u32>,
}

/// POST /api/sharing
pub async fn create_share(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateShareRequest>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let created = state
        .share_service
        .create_share(
            &auth,
            SvcCreateShare {
                resource_id: req.resource_id,
                resource_type: req.resource_type,
                permissions: req.permissions,
                expires_at: req.expires_at,
                is_public: req.is_public,
                shared_with_email: req.shared_with_email,
            },
        )
        .await?;

    Ok(ok(created))
}

/// GET /api/sharing
pub async fn list_shares(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<ListSharesQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let range = RangeQuery {
        limit: params.limit,
        offset: params.offset,
    }
    .resolve();

    let page = state.share_service.list_shares(&auth, range).await?;
    Ok(ok(page))
}

/// GET /api/sharing/{token} — the public share-link landing; no
/// authentication on purpose.
pub async fn resolve_share(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let resolved = state.share_service.resolve_share(&token).await?;
    Ok(ok(resolved))
}

/// PATCH /api/sharing/{id}
pub async fn update_share(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(update): Json<ShareUpdate>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let share = state.share_service.update_share(&auth, id, update).await?;
    Ok(ok(share))
}

/// DELETE /api/sharing/{id}
pub async fn revoke_share(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, ApiError> {
    state.share_service.revoke_share(&auth, id).await?;
    Ok(message("Share deleted successfully"))
}
