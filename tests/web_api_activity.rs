//! HTTP API tests for the activity history, search, and health endpoints.

mod common;

use axum::http::StatusCode;
use common::{TestApp, TOKEN_A, TOKEN_B};

#[tokio::test]
async fn test_activity_lists_mutations_newest_first() {
    let app = TestApp::new();
    let folder = app.create_folder(TOKEN_A, "Docs", None).await;
    let file = app.upload_file(TOKEN_A, "a.txt", b"x").await;
    app.request(
        "PATCH",
        &format!("/api/files/{file}/rename"),
        Some(serde_json::json!({ "new_name": "b.txt" })),
        Some(TOKEN_A),
    )
    .await;

    let response = app.request("GET", "/api/activity", None, Some(TOKEN_A)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["total"], 3);

    let items = response.body["data"]["items"].as_array().unwrap();
    assert_eq!(items[0]["action"], "rename");
    assert_eq!(items[0]["details"], "a.txt → b.txt");
    assert_eq!(items[1]["action"], "upload");
    assert_eq!(items[2]["action"], "create_folder");
    assert_eq!(items[2]["target_id"], folder.as_str());
}

#[tokio::test]
async fn test_activity_is_scoped_to_the_caller() {
    let app = TestApp::new();
    app.create_folder(TOKEN_A, "Mine", None).await;

    let response = app.request("GET", "/api/activity", None, Some(TOKEN_B)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["total"], 0);
}

#[tokio::test]
async fn test_activity_window_params() {
    let app = TestApp::new();
    app.create_folder(TOKEN_A, "One", None).await;
    app.create_folder(TOKEN_A, "Two", None).await;

    let response = app
        .request("GET", "/api/activity?limit=1&offset=1", None, Some(TOKEN_A))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["total"], 2);
    let items = response.body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["target_name"], "One");
}

#[tokio::test]
async fn test_search_spans_files_and_folders() {
    let app = TestApp::new();
    app.create_folder(TOKEN_A, "Tax Reports", None).await;
    app.upload_file(TOKEN_A, "report-2024.pdf", b"pdf").await;
    app.upload_file(TOKEN_B, "their-report.pdf", b"pdf").await;

    let response = app
        .request("GET", "/api/search?q=report", None, Some(TOKEN_A))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["files"][0]["name"], "report-2024.pdf");
    assert_eq!(response.body["data"]["folders"][0]["name"], "Tax Reports");
    assert_eq!(response.body["data"]["files"].as_array().unwrap().len(), 1);

    let response = app
        .request("GET", "/api/search?q=report&type=files", None, Some(TOKEN_A))
        .await;
    assert!(response.body["data"]["folders"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_search_requires_query() {
    let app = TestApp::new();
    let response = app.request("GET", "/api/search", None, Some(TOKEN_A)).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health_needs_no_auth() {
    let app = TestApp::new();
    let response = app.request("GET", "/api/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["status"], "ok");
    assert_eq!(response.body["data"]["blob_store"]["provider"], "memory");
}
