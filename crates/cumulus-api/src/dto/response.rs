//! The JSON response envelope.

use axum::Json;
use serde::Serialize;
use serde_json::json;

/// Wrap payload data in the `{ "success": true, "data": … }` envelope.
pub fn ok<T: Serialize>(data: T) -> Json<serde_json::Value> {
    Json(json!({ "success": true, "data": data }))
}

/// Success envelope with a message instead of data.
pub fn message(text: &str) -> Json<serde_json::Value> {
    Json(json!({ "success": true, "message": text }))
}
