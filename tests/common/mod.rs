//! Shared test helpers for the HTTP API tests.
//!
//! The app is assembled over in-memory stores, an in-memory blob store,
//! and a static session verifier, so the full router can be driven without
//! any external services.
#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use cumulus_api::AppState;
use cumulus_auth::verifier::StaticSessionVerifier;
use cumulus_auth::IdentityGate;
use cumulus_core::config::AppConfig;
use cumulus_database::Stores;
use cumulus_service::share::ShareService;
use cumulus_service::{
    ActivityRecorder, ActivityService, FileService, FolderService, SearchService,
};
use cumulus_storage::providers::MemoryBlobStore;
use cumulus_storage::BlobGateway;

/// Session token accepted for the first test user.
pub const TOKEN_A: &str = "token-alice";
/// Session token accepted for the second test user.
pub const TOKEN_B: &str = "token-bob";

/// Multipart boundary used by the upload helper.
const BOUNDARY: &str = "cumulus-test-boundary";

/// Test application context.
pub struct TestApp {
    /// The Axum router for making test requests.
    pub router: Router,
    /// First test user.
    pub user_a: Uuid,
    /// Second test user.
    pub user_b: Uuid,
}

/// Response from a test request.
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Parsed JSON body (Null when the body is not JSON).
    pub body: Value,
}

/// Raw response from a test request (for downloads).
#[derive(Debug)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Raw body bytes.
    pub bytes: bytes::Bytes,
}

impl TestApp {
    /// Create a new test application.
    pub fn new() -> Self {
        let user_a = Uuid::new_v4();
        let user_b = Uuid::new_v4();

        let config = AppConfig::default();
        let stores = Stores::memory();
        let blobs = BlobGateway::from_provider(Arc::new(MemoryBlobStore::default()));
        let identity_gate = IdentityGate::from_verifier(Arc::new(
            StaticSessionVerifier::with_tokens([
                (TOKEN_A.to_string(), user_a),
                (TOKEN_B.to_string(), user_b),
            ]),
        ));

        let recorder = ActivityRecorder::new(stores.activities.clone());
        let folder_service = Arc::new(FolderService::new(
            stores.folders.clone(),
            recorder.clone(),
        ));
        let file_service = Arc::new(FileService::new(
            stores.files.clone(),
            stores.folders.clone(),
            blobs.clone(),
            recorder.clone(),
        ));
        let search_service = Arc::new(SearchService::new(
            stores.files.clone(),
            stores.folders.clone(),
        ));
        let share_service = Arc::new(ShareService::new(
            stores.shares.clone(),
            stores.files.clone(),
            stores.folders.clone(),
            recorder,
            config.sharing.public_base_url.clone(),
        ));
        let activity_service = Arc::new(ActivityService::new(
            stores.activities.clone(),
            config.worker.prune_batch_size,
        ));

        let state = AppState {
            config: Arc::new(config),
            identity_gate,
            blobs,
            folder_service,
            file_service,
            search_service,
            share_service,
            activity_service,
        };

        Self {
            router: cumulus_api::build_router(state),
            user_a,
            user_b,
        }
    }

    /// Make a JSON request to the test app.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let raw = self.send(method, path, body, token).await;
        let body: Value = serde_json::from_slice(&raw.bytes).unwrap_or(Value::Null);
        TestResponse {
            status: raw.status,
            body,
        }
    }

    /// Make a request and keep the raw body (for downloads).
    pub async fn request_raw(
        &self,
        method: &str,
        path: &str,
        token: Option<&str>,
    ) -> RawResponse {
        self.send(method, path, None, token).await
    }

    async fn send(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> RawResponse {
        let mut req = Request::builder().method(method).uri(path);

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = if let Some(body) = body {
            req.header("Content-Type", "application/json")
                .body(Body::from(serde_json::to_string(&body).unwrap()))
        } else {
            req.body(Body::empty())
        }
        .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), 16 * 1024 * 1024)
            .await
            .expect("Failed to read body");

        RawResponse {
            status,
            headers,
            bytes,
        }
    }

    /// Upload a file through the multipart endpoint.
    pub async fn upload(
        &self,
        token: &str,
        filename: &str,
        content: &[u8],
        folder_id: Option<&str>,
    ) -> TestResponse {
        let mut body = Vec::new();

        if let Some(folder_id) = folder_id {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"folder_id\"\r\n\r\n{folder_id}\r\n"
                )
                .as_bytes(),
            );
        }

        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: text/plain\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        let req = Request::builder()
            .method("POST")
            .uri("/api/files/upload")
            .header("Authorization", format!("Bearer {token}"))
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .expect("Failed to build upload request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send upload");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), 16 * 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// Create a folder and return its id.
    pub async fn create_folder(&self, token: &str, name: &str, parent_id: Option<&str>) -> String {
        let mut body = serde_json::json!({ "name": name });
        if let Some(parent_id) = parent_id {
            body["parent_id"] = Value::String(parent_id.to_string());
        }

        let response = self
            .request("POST", "/api/folders", Some(body), Some(token))
            .await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "Folder creation failed: {:?}",
            response.body
        );
        response.body["data"]["id"]
            .as_str()
            .expect("No folder id in response")
            .to_string()
    }

    /// Upload a file and return its id.
    pub async fn upload_file(&self, token: &str, name: &str, content: &[u8]) -> String {
        let response = self.upload(token, name, content, None).await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "Upload failed: {:?}",
            response.body
        );
        response.body["data"]["id"]
            .as_str()
            .expect("No file id in response")
            .to_string()
    }
}
