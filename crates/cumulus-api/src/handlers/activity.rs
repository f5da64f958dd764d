//! Activity history endpoint.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::dto::response::ok;
use crate::error::ApiError;
use crate::extractors::{AuthUser, RangeQuery};
use crate::state::AppState;

/// Query parameters for `GET /api/activity`.
#[derive(Debug, Deserialize)]
pub struct ListActivityQuery {
    /// Window limit.
    pub limit: Option<u32>,
    /// Window offset.
    pub offset: Option<u32>,
}

/// GET /api/activity
pub async fn list_activity(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<ListActivityQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let range = RangeQuery {
        limit: params.limit,
        offset: params.offset,
    }
    .resolve();

    let page = state.activity_service.list(&auth, range).await?;
    Ok(ok(page))
}
