//! Application state shared across all handlers.

use std::sync::Arc;

use cumulus_auth::IdentityGate;
use cumulus_core::config::AppConfig;
use cumulus_service::share::ShareService;
use cumulus_service::{ActivityService, FileService, FolderService, SearchService};
use cumulus_storage::BlobGateway;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`. All fields are
/// `Arc`-wrapped or internally reference-counted for cheap cloning across
/// tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Session token gate.
    pub identity_gate: IdentityGate,
    /// Blob gateway (exposed for health checks).
    pub blobs: BlobGateway,
    /// Folder service.
    pub folder_service: Arc<FolderService>,
    /// File service.
    pub file_service: Arc<FileService>,
    /// Search service.
    pub search_service: Arc<SearchService>,
    /// Share service.
    pub share_service: Arc<ShareService>,
    /// Activity service.
    pub activity_service: Arc<ActivityService>,
}
