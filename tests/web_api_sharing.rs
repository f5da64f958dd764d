//! HTTP API tests for share endpoints.

mod common;

use axum::http::StatusCode;
use common::{TestApp, TOKEN_A, TOKEN_B};

async fn create_share(app: &TestApp, file_id: &str, expires_at: Option<&str>) -> serde_json::Value {
    let mut body = serde_json::json!({
        "resource_id": file_id,
        "resource_type": "file",
        "permissions": ["read"],
        "is_public": true,
    });
    if let Some(expires_at) = expires_at {
        body["expires_at"] = serde_json::Value::String(expires_at.to_string());
    }

    let response = app
        .request("POST", "/api/sharing", Some(body), Some(TOKEN_A))
        .await;
    assert_eq!(
        response.status,
        StatusCode::OK,
        "Share creation failed: {:?}",
        response.body
    );
    response.body["data"].clone()
}

#[tokio::test]
async fn test_create_share_and_resolve_without_auth() {
    let app = TestApp::new();
    let file_id = app.upload_file(TOKEN_A, "shared.txt", b"payload").await;

    let created = create_share(&app, &file_id, None).await;
    let token = created["share"]["token"].as_str().unwrap();
    assert_eq!(token.len(), 64);
    assert!(created["share_url"].as_str().unwrap().ends_with(token));

    // The landing endpoint needs no Authorization header.
    let response = app
        .request("GET", &format!("/api/sharing/{token}"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["resource"]["id"], file_id.as_str());
    assert_eq!(response.body["data"]["resource"]["type"], "file");
}

#[tokio::test]
async fn test_sharing_foreign_resource_is_forbidden() {
    let app = TestApp::new();
    let file_id = app.upload_file(TOKEN_A, "mine.txt", b"x").await;

    let response = app
        .request(
            "POST",
            "/api/sharing",
            Some(serde_json::json!({
                "resource_id": file_id,
                "resource_type": "file",
            })),
            Some(TOKEN_B),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_expired_share_is_gone() {
    let app = TestApp::new();
    let file_id = app.upload_file(TOKEN_A, "old.txt", b"x").await;

    let created = create_share(&app, &file_id, Some("2020-01-01T00:00:00Z")).await;
    let token = created["share"]["token"].as_str().unwrap();

    let response = app
        .request("GET", &format!("/api/sharing/{token}"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::GONE);
}

#[tokio::test]
async fn test_unknown_token_is_not_found() {
    let app = TestApp::new();
    let response = app
        .request("GET", "/api/sharing/deadbeef", None, None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_revoked_share_stops_resolving() {
    let app = TestApp::new();
    let file_id = app.upload_file(TOKEN_A, "a.txt", b"x").await;
    let created = create_share(&app, &file_id, None).await;
    let share_id = created["share"]["id"].as_str().unwrap();
    let token = created["share"]["token"].as_str().unwrap();

    let response = app
        .request(
            "DELETE",
            &format!("/api/sharing/{share_id}"),
            None,
            Some(TOKEN_A),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request("GET", &format!("/api/sharing/{token}"), None, None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    // The denormalized flag was cleared on the file.
    let response = app
        .request("GET", &format!("/api/files/{file_id}"), None, Some(TOKEN_A))
        .await;
    assert_eq!(response.body["data"]["is_shared"], false);
}

#[tokio::test]
async fn test_revoke_by_non_owner_is_forbidden() {
    let app = TestApp::new();
    let file_id = app.upload_file(TOKEN_A, "a.txt", b"x").await;
    let created = create_share(&app, &file_id, None).await;
    let share_id = created["share"]["id"].as_str().unwrap();

    let response = app
        .request(
            "DELETE",
            &format!("/api/sharing/{share_id}"),
            None,
            Some(TOKEN_B),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_update_share_is_partial() {
    let app = TestApp::new();
    let file_id = app.upload_file(TOKEN_A, "a.txt", b"x").await;
    let created = create_share(&app, &file_id, None).await;
    let share_id = created["share"]["id"].as_str().unwrap();

    let response = app
        .request(
            "PATCH",
            &format!("/api/sharing/{share_id}"),
            Some(serde_json::json!({ "is_public": false })),
            Some(TOKEN_A),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["is_public"], false);
    // Untouched fields survive.
    assert_eq!(response.body["data"]["permissions"][0], "read");
}

#[tokio::test]
async fn test_list_shares_joins_resource_and_url() {
    let app = TestApp::new();
    let file_id = app.upload_file(TOKEN_A, "a.txt", b"x").await;
    create_share(&app, &file_id, None).await;

    let response = app.request("GET", "/api/sharing", None, Some(TOKEN_A)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["total"], 1);
    let item = &response.body["data"]["items"][0];
    assert_eq!(item["resource"]["id"], file_id.as_str());
    assert!(item["share_url"].as_str().unwrap().contains("/shared/"));
}

#[tokio::test]
async fn test_shared_file_becomes_downloadable_by_others() {
    let app = TestApp::new();
    let file_id = app.upload_file(TOKEN_A, "a.txt", b"now public").await;

    // Before sharing, a stranger is refused.
    let raw = app
        .request_raw(
            "GET",
            &format!("/api/files/{file_id}/download"),
            Some(TOKEN_B),
        )
        .await;
    assert_eq!(raw.status, StatusCode::FORBIDDEN);

    create_share(&app, &file_id, None).await;

    let raw = app
        .request_raw(
            "GET",
            &format!("/api/files/{file_id}/download"),
            Some(TOKEN_B),
        )
        .await;
    assert_eq!(raw.status, StatusCode::OK);
    assert_eq!(raw.bytes.as_ref(), b"now public");
}
