//! Shared fixtures for service tests: memory-backed stores, blob gateway,
//! and fully wired services for two distinct users.

use std::sync::Arc;

use uuid::Uuid;

use cumulus_database::Stores;
use cumulus_storage::providers::MemoryBlobStore;
use cumulus_storage::BlobGateway;

use crate::activity::{ActivityRecorder, ActivityService};
use crate::context::RequestContext;
use crate::hierarchy::{FileService, FolderService, SearchService};
use crate::share::ShareService;

/// A complete in-memory service stack.
pub struct TestEnv {
    pub stores: Stores,
    pub blobs: BlobGateway,
    pub folders: FolderService,
    pub files: FileService,
    pub search: SearchService,
    pub shares: ShareService,
    pub activity: ActivityService,
    pub user_a: Uuid,
    pub user_b: Uuid,
}

impl TestEnv {
    pub fn new() -> Self {
        let stores = Stores::memory();
        let blobs = BlobGateway::from_provider(Arc::new(MemoryBlobStore::default()));
        let recorder = ActivityRecorder::new(stores.activities.clone());

        let folders = FolderService::new(stores.folders.clone(), recorder.clone());
        let files = FileService::new(
            stores.files.clone(),
            stores.folders.clone(),
            blobs.clone(),
            recorder.clone(),
        );
        let search = SearchService::new(stores.files.clone(), stores.folders.clone());
        let shares = ShareService::new(
            stores.shares.clone(),
            stores.files.clone(),
            stores.folders.clone(),
            recorder,
            "http://localhost:5173".to_string(),
        );
        let activity = ActivityService::new(stores.activities.clone(), 500);

        Self {
            stores,
            blobs,
            folders,
            files,
            search,
            shares,
            activity,
            user_a: Uuid::new_v4(),
            user_b: Uuid::new_v4(),
        }
    }

    pub fn ctx_a(&self) -> RequestContext {
        RequestContext::new(self.user_a)
    }

    pub fn ctx_b(&self) -> RequestContext {
        RequestContext::new(self.user_b)
    }
}
