//! Search endpoint.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use cumulus_core::error::AppError;
use cumulus_service::hierarchy::search::SearchFilter;

use crate::dto::response::ok;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// Query parameters for `GET /api/search`.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// The search query.
    pub q: Option<String>,
    /// Which collections to cover: `files`, `folders`, or `all`.
    #[serde(rename = "type")]
    pub type_filter: Option<String>,
    /// Maximum hits per collection.
    pub limit: Option<u32>,
}

/// GET /api/search
pub async fn search(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<SearchQuery>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let query = params
        .q
        .as_deref()
        .ok_or_else(|| ApiError(AppError::validation("Search query is required")))?;

    let filter = match params.type_filter.as_deref() {
        Some(value) => SearchFilter::parse(value)
            .ok_or_else(|| ApiError(AppError::validation("Unknown search type")))?,
        None => SearchFilter::All,
    };

    let results = state
        .search_service
        .search(&auth, query, filter, params.limit.unwrap_or(20))
        .await?;

    Ok(ok(results))
}
