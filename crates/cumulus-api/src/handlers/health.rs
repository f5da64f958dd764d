//! Health check endpoint (no auth required).

use axum::extract::State;
use axum::Json;
use serde_json::json;

use cumulus_core::traits::blob::BlobStore;

use crate::dto::response::ok;
use crate::state::AppState;

/// GET /api/health
pub async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    let blobs_healthy = state.blobs.health_check().await.unwrap_or(false);

    ok(json!({
        "status": if blobs_healthy { "ok" } else { "degraded" },
        "blob_store": {
            "provider": state.blobs.provider_type(),
            "healthy": blobs_healthy,
        },
    }))
}
