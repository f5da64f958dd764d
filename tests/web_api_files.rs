//! HTTP API tests for file endpoints.

mod common;

use axum::http::StatusCode;
use common::{TestApp, TOKEN_A, TOKEN_B};

#[tokio::test]
async fn test_upload_then_download_round_trip() {
    let app = TestApp::new();
    let content = b"hello cumulus";

    let response = app.upload(TOKEN_A, "hello.txt", content, None).await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["data"]["name"], "hello.txt");
    assert_eq!(response.body["data"]["size_bytes"], content.len());
    assert_eq!(response.body["data"]["mime_type"], "text/plain");
    assert_eq!(response.body["data"]["path"], "/");

    let id = response.body["data"]["id"].as_str().unwrap().to_string();
    let raw = app
        .request_raw("GET", &format!("/api/files/{id}/download"), Some(TOKEN_A))
        .await;
    assert_eq!(raw.status, StatusCode::OK);
    assert_eq!(raw.bytes.as_ref(), content);
    assert_eq!(raw.headers["content-type"], "text/plain");
    assert!(raw.headers["content-disposition"]
        .to_str()
        .unwrap()
        .contains("hello.txt"));
}

#[tokio::test]
async fn test_upload_without_file_part_is_rejected() {
    let app = TestApp::new();

    // Send a JSON body instead of multipart.
    let response = app
        .request(
            "POST",
            "/api/files/upload",
            Some(serde_json::json!({})),
            Some(TOKEN_A),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_upload_into_folder_materializes_path() {
    let app = TestApp::new();
    let docs = app.create_folder(TOKEN_A, "Docs", None).await;

    let response = app
        .upload(TOKEN_A, "report.txt", b"contents", Some(&docs))
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["data"]["folder_id"], docs.as_str());
    assert_eq!(response.body["data"]["path"], "/Docs/");
}

#[tokio::test]
async fn test_upload_into_foreign_folder_is_forbidden() {
    let app = TestApp::new();
    let docs = app.create_folder(TOKEN_A, "Docs", None).await;

    let response = app.upload(TOKEN_B, "sneak.txt", b"x", Some(&docs)).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_rename_file() {
    let app = TestApp::new();
    let id = app.upload_file(TOKEN_A, "draft.txt", b"x").await;

    let response = app
        .request(
            "PATCH",
            &format!("/api/files/{id}/rename"),
            Some(serde_json::json!({ "new_name": "final.txt" })),
            Some(TOKEN_A),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["name"], "final.txt");
    assert_eq!(response.body["data"]["original_name"], "draft.txt");
}

#[tokio::test]
async fn test_move_file_between_folders() {
    let app = TestApp::new();
    let docs = app.create_folder(TOKEN_A, "Docs", None).await;
    let id = app.upload_file(TOKEN_A, "a.txt", b"x").await;

    let response = app
        .request(
            "PATCH",
            &format!("/api/files/{id}/move"),
            Some(serde_json::json!({ "folder_id": docs })),
            Some(TOKEN_A),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["path"], "/Docs/");

    // Back to root with an explicit null.
    let response = app
        .request(
            "PATCH",
            &format!("/api/files/{id}/move"),
            Some(serde_json::json!({ "folder_id": null })),
            Some(TOKEN_A),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["path"], "/");
}

#[tokio::test]
async fn test_foreign_file_delete_is_forbidden_and_file_survives() {
    let app = TestApp::new();
    let id = app.upload_file(TOKEN_A, "a.txt", b"keep me").await;

    let response = app
        .request("DELETE", &format!("/api/files/{id}"), None, Some(TOKEN_B))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let raw = app
        .request_raw("GET", &format!("/api/files/{id}/download"), Some(TOKEN_A))
        .await;
    assert_eq!(raw.status, StatusCode::OK);
    assert_eq!(raw.bytes.as_ref(), b"keep me");
}

#[tokio::test]
async fn test_delete_file() {
    let app = TestApp::new();
    let id = app.upload_file(TOKEN_A, "a.txt", b"x").await;

    let response = app
        .request("DELETE", &format!("/api/files/{id}"), None, Some(TOKEN_A))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request("GET", &format!("/api/files/{id}"), None, Some(TOKEN_A))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_files_scoped_to_folder() {
    let app = TestApp::new();
    let docs = app.create_folder(TOKEN_A, "Docs", None).await;
    app.upload(TOKEN_A, "in-docs.txt", b"x", Some(&docs)).await;
    app.upload_file(TOKEN_A, "at-root.txt", b"x").await;

    let response = app
        .request(
            "GET",
            &format!("/api/files?folder_id={docs}"),
            None,
            Some(TOKEN_A),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["total"], 1);
    assert_eq!(response.body["data"]["items"][0]["name"], "in-docs.txt");

    let response = app.request("GET", "/api/files", None, Some(TOKEN_A)).await;
    assert_eq!(response.body["data"]["total"], 1);
    assert_eq!(response.body["data"]["items"][0]["name"], "at-root.txt");
}
