//! The share lifecycle: create, resolve, list, update, revoke.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use cumulus_auth::ownership::require_owner;
use cumulus_core::error::AppError;
use cumulus_core::result::AppResult;
use cumulus_core::types::{ListRange, Page};
use cumulus_database::{FileStore, FolderStore, ShareStore};
use cumulus_entity::activity::{ActivityAction, CreateActivity};
use cumulus_entity::resource::{Resource, ResourceType};
use cumulus_entity::share::{CreateShare, Share, SharePermission, ShareUpdate};

use crate::activity::ActivityRecorder;
use crate::context::RequestContext;
use crate::share::token::ShareTokenGenerator;

/// Manages share records and the denormalized share flags on resources.
#[derive(Debug, Clone)]
pub struct ShareService {
    /// Share collection.
    shares: Arc<dyn ShareStore>,
    /// File collection, for resource loading and flag denormalization.
    files: Arc<dyn FileStore>,
    /// Folder collection, same.
    folders: Arc<dyn FolderStore>,
    /// Best-effort audit channel.
    recorder: ActivityRecorder,
    /// Token generator.
    tokens: ShareTokenGenerator,
    /// Base URL for public share links.
    public_base_url: String,
}

/// Request to create a new share.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CreateShareRequest {
    /// The resource being shared.
    pub resource_id: Uuid,
    /// Its type.
    pub resource_type: ResourceType,
    /// Granted permissions (non-empty, each `read` or `write`).
    pub permissions: Vec<String>,
    /// Expiry (None = never).
    pub expires_at: Option<DateTime<Utc>>,
    /// Whether the link is public.
    pub is_public: bool,
    /// Email the share is addressed to (informational).
    pub shared_with_email: Option<String>,
}

/// A freshly created share with its public URL.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ShareCreated {
    /// The share record.
    pub share: Share,
    /// The public link.
    pub share_url: String,
}

/// A share resolved from its token, with the resource it grants.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ResolvedShare {
    /// The share record.
    pub share: Share,
    /// The shared resource.
    pub resource: Resource,
}

/// A listed share with its resource joined in (when it still exists).
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ShareWithResource {
    /// The share record.
    pub share: Share,
    /// The shared resource, if it still exists.
    pub resource: Option<Resource>,
    /// The public link.
    pub share_url: String,
}

impl ShareService {
    /// Creates a new share service.
    pub fn new(
        shares: Arc<dyn ShareStore>,
        files: Arc<dyn FileStore>,
        folders: Arc<dyn FolderStore>,
        recorder: ActivityRecorder,
        public_base_url: String,
    ) -> Self {
        Self {
            shares,
            files,
            folders,
            recorder,
            tokens: ShareTokenGenerator::new(),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    fn share_url(&self, token: &str) -> String {
        format!("{}/shared/{}", self.public_base_url, token)
    }

    async fn load_resource(
        &self,
        resource_type: ResourceType,
        resource_id: Uuid,
    ) -> AppResult<Resource> {
        let resource = match resource_type {
            ResourceType::File => self
                .files
                .find_by_id(resource_id)
                .await?
                .map(Resource::File),
            ResourceType::Folder => self
                .folders
                .find_by_id(resource_id)
                .await?
                .map(Resource::Folder),
        };
        resource.ok_or_else(|| AppError::not_found("Resource not found"))
    }

    async fn set_resource_share_state(
        &self,
        resource_type: ResourceType,
        resource_id: Uuid,
        is_shared: bool,
        token: Option<&str>,
        expiry: Option<DateTime<Utc>>,
    ) -> AppResult<()> {
        match resource_type {
            ResourceType::File => {
                self.files
                    .set_share_state(resource_id, is_shared, token, expiry)
                    .await
            }
            ResourceType::Folder => {
                self.folders
                    .set_share_state(resource_id, is_shared, token, expiry)
                    .await
            }
        }
    }

    fn validate_permissions(permissions: &[String]) -> AppResult<()> {
        if permissions.is_empty() {
            return Err(AppError::validation(
                "At least one permission is required",
            ));
        }
        for p in permissions {
            if SharePermission::parse(p).is_none() {
                return Err(AppError::validation(format!("Unknown permission '{p}'")));
            }
        }
        Ok(())
    }

    /// Creates a share for a resource owned by the caller.
    ///
    /// The new share's token and expiry are denormalized onto the resource,
    /// superseding (but not revoking) any earlier share of the same
    /// resource.
    pub async fn create_share(
        &self,
        ctx: &RequestContext,
        req: CreateShareRequest,
    ) -> AppResult<ShareCreated> {
        Self::validate_permissions(&req.permissions)?;

        let resource = self
            .load_resource(req.resource_type, req.resource_id)
            .await?;
        require_owner(ctx.user_id, &resource)?;

        let token = self.tokens.generate();

        let share = self
            .shares
            .create(&CreateShare {
                resource_id: req.resource_id,
                resource_type: req.resource_type,
                owner_id: ctx.user_id,
                shared_with_email: req.shared_with_email,
                permissions: req.permissions,
                token: token.clone(),
                expires_at: req.expires_at,
                is_public: req.is_public,
            })
            .await?;

        self.set_resource_share_state(
            req.resource_type,
            req.resource_id,
            true,
            Some(&token),
            req.expires_at,
        )
        .await?;

        let action = match req.resource_type {
            ResourceType::File => ActivityAction::Share,
            ResourceType::Folder => ActivityAction::ShareFolder,
        };
        self.recorder
            .record(CreateActivity::new(
                ctx.user_id,
                action,
                req.resource_id,
                resource.name(),
                req.resource_type,
            ))
            .await;

        info!(
            user_id = %ctx.user_id,
            share_id = %share.id,
            resource_id = %req.resource_id,
            "Share created"
        );

        Ok(ShareCreated {
            share_url: self.share_url(&token),
            share,
        })
    }

    /// Resolves a share token to its share and resource.
    ///
    /// Intentionally unauthenticated: this is the public share-link
    /// landing. Unknown tokens are `NotFound`; expired shares are `Gone`.
    pub async fn resolve_share(&self, token: &str) -> AppResult<ResolvedShare> {
        let share = self
            .shares
            .find_by_token(token)
            .await?
            .ok_or_else(|| AppError::not_found("Share not found"))?;

        if share.is_expired() {
            return Err(AppError::gone("Share link has expired"));
        }

        let resource = self
            .load_resource(share.resource_type, share.resource_id)
            .await?;

        Ok(ResolvedShare { share, resource })
    }

    /// Lists the caller's shares, newest-first, with resources joined in.
    /// A share whose resource has vanished is returned without it.
    pub async fn list_shares(
        &self,
        ctx: &RequestContext,
        range: ListRange,
    ) -> AppResult<Page<ShareWithResource>> {
        let page = self.shares.list_by_owner(ctx.user_id, &range).await?;

        let mut items = Vec::with_capacity(page.items.len());
        for share in page.items {
            let resource = match self
                .load_resource(share.resource_type, share.resource_id)
                .await
            {
                Ok(resource) => Some(resource),
                Err(e) => {
                    warn!(
                        share_id = %share.id,
                        resource_id = %share.resource_id,
                        error = %e,
                        "Share references a missing resource"
                    );
                    None
                }
            };
            items.push(ShareWithResource {
                share_url: self.share_url(&share.token),
                share,
                resource,
            });
        }

        Ok(Page {
            items,
            total: page.total,
            limit: page.limit,
            offset: page.offset,
        })
    }

    /// Gets a share by ID, enforcing ownership.
    pub async fn get_share(&self, ctx: &RequestContext, share_id: Uuid) -> AppResult<Share> {
        let share = self
            .shares
            .find_by_id(share_id)
            .await?
            .ok_or_else(|| AppError::not_found("Share not found"))?;

        require_owner(ctx.user_id, &share)?;
        Ok(share)
    }

    /// Applies a partial update to a share. Only the provided fields
    /// change; the denormalized copy on the resource is left as it was.
    pub async fn update_share(
        &self,
        ctx: &RequestContext,
        share_id: Uuid,
        update: ShareUpdate,
    ) -> AppResult<Share> {
        let mut share = self.get_share(ctx, share_id).await?;

        if let Some(permissions) = update.permissions {
            Self::validate_permissions(&permissions)?;
            share.permissions = permissions;
        }
        if let Some(expires_at) = update.expires_at {
            share.expires_at = expires_at;
        }
        if let Some(is_public) = update.is_public {
            share.is_public = is_public;
        }

        let updated = self.shares.update(&share).await?;

        info!(
            user_id = %ctx.user_id,
            share_id = %share_id,
            "Share updated"
        );

        Ok(updated)
    }

    /// Revokes a share.
    ///
    /// The denormalized flags are cleared on the resource first, then the
    /// share record is deleted, so a concurrent resolve never observes a
    /// flagged resource after the record is gone.
    pub async fn revoke_share(&self, ctx: &RequestContext, share_id: Uuid) -> AppResult<()> {
        let share = self.get_share(ctx, share_id).await?;

        let resource = self
            .load_resource(share.resource_type, share.resource_id)
            .await
            .ok();

        self.set_resource_share_state(share.resource_type, share.resource_id, false, None, None)
            .await?;

        if !self.shares.delete(share_id).await? {
            return Err(AppError::not_found("Share not found"));
        }

        let action = match share.resource_type {
            ResourceType::File => ActivityAction::Unshare,
            ResourceType::Folder => ActivityAction::UnshareFolder,
        };
        let target_name = resource
            .as_ref()
            .map(|r| r.name().to_string())
            .unwrap_or_else(|| "(deleted)".to_string());
        self.recorder
            .record(CreateActivity::new(
                ctx.user_id,
                action,
                share.resource_id,
                target_name,
                share.resource_type,
            ))
            .await;

        info!(
            user_id = %ctx.user_id,
            share_id = %share_id,
            "Share revoked"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::file::UploadRequest;
    use crate::hierarchy::folder::CreateFolderRequest;
    use crate::testkit::TestEnv;
    use bytes::Bytes;
    use chrono::Duration;
    use cumulus_core::error::ErrorKind;
    use cumulus_entity::file::File;

    async fn upload(env: &TestEnv, name: &str) -> File {
        env.files
            .upload(
                &env.ctx_a(),
                UploadRequest {
                    name: name.to_string(),
                    mime_type: "text/plain".to_string(),
                    folder_id: None,
                },
                Bytes::from_static(b"content"),
            )
            .await
            .unwrap()
    }

    fn share_req(file: &File) -> CreateShareRequest {
        CreateShareRequest {
            resource_id: file.id,
            resource_type: ResourceType::File,
            permissions: vec!["read".to_string()],
            expires_at: None,
            is_public: true,
            shared_with_email: None,
        }
    }

    #[tokio::test]
    async fn test_share_round_trip() {
        let env = TestEnv::new();
        let file = upload(&env, "a.txt").await;

        let created = env
            .shares
            .create_share(&env.ctx_a(), share_req(&file))
            .await
            .unwrap();
        assert_eq!(created.share.token.len(), 64);
        assert!(created.share_url.ends_with(&created.share.token));

        // The denormalized flags landed on the resource.
        let flagged = env.files.get_file(&env.ctx_a(), file.id).await.unwrap();
        assert!(flagged.is_shared);
        assert_eq!(flagged.share_token.as_deref(), Some(created.share.token.as_str()));

        // Unauthenticated resolution returns the same resource.
        let resolved = env
            .shares
            .resolve_share(&created.share.token)
            .await
            .unwrap();
        assert_eq!(resolved.resource.id(), file.id);
        assert_eq!(resolved.share.id, created.share.id);
    }

    #[tokio::test]
    async fn test_sharing_foreign_resource_is_forbidden() {
        let env = TestEnv::new();
        let file = upload(&env, "a.txt").await;

        let err = env
            .shares
            .create_share(&env.ctx_b(), share_req(&file))
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);

        let untouched = env.files.get_file(&env.ctx_a(), file.id).await.unwrap();
        assert!(!untouched.is_shared);
    }

    #[tokio::test]
    async fn test_empty_or_unknown_permissions_are_rejected() {
        let env = TestEnv::new();
        let file = upload(&env, "a.txt").await;

        let mut req = share_req(&file);
        req.permissions = Vec::new();
        let err = env
            .shares
            .create_share(&env.ctx_a(), req)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let mut req = share_req(&file);
        req.permissions = vec!["admin".to_string()];
        let err = env
            .shares
            .create_share(&env.ctx_a(), req)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_expired_share_resolves_to_gone() {
        let env = TestEnv::new();
        let file = upload(&env, "a.txt").await;

        let mut req = share_req(&file);
        req.expires_at = Some(Utc::now() - Duration::minutes(1));
        let created = env
            .shares
            .create_share(&env.ctx_a(), req)
            .await
            .unwrap();

        let err = env
            .shares
            .resolve_share(&created.share.token)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Gone);
    }

    #[tokio::test]
    async fn test_future_expiry_resolves_until_it_passes() {
        let env = TestEnv::new();
        let file = upload(&env, "a.txt").await;

        let mut req = share_req(&file);
        req.expires_at = Some(Utc::now() + Duration::hours(1));
        let created = env
            .shares
            .create_share(&env.ctx_a(), req)
            .await
            .unwrap();

        assert!(env.shares.resolve_share(&created.share.token).await.is_ok());
    }

    #[tokio::test]
    async fn test_unknown_token_is_not_found() {
        let env = TestEnv::new();
        let err = env.shares.resolve_share("deadbeef").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_revoke_clears_flags_and_deletes_record() {
        let env = TestEnv::new();
        let file = upload(&env, "a.txt").await;
        let created = env
            .shares
            .create_share(&env.ctx_a(), share_req(&file))
            .await
            .unwrap();

        env.shares
            .revoke_share(&env.ctx_a(), created.share.id)
            .await
            .unwrap();

        let after = env.files.get_file(&env.ctx_a(), file.id).await.unwrap();
        assert!(!after.is_shared);
        assert_eq!(after.share_token, None);

        let err = env
            .shares
            .resolve_share(&created.share.token)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_revoke_by_non_owner_is_forbidden() {
        let env = TestEnv::new();
        let file = upload(&env, "a.txt").await;
        let created = env
            .shares
            .create_share(&env.ctx_a(), share_req(&file))
            .await
            .unwrap();

        let err = env
            .shares
            .revoke_share(&env.ctx_b(), created.share.id)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Forbidden);

        assert!(env.shares.resolve_share(&created.share.token).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_is_partial() {
        let env = TestEnv::new();
        let file = upload(&env, "a.txt").await;
        let created = env
            .shares
            .create_share(&env.ctx_a(), share_req(&file))
            .await
            .unwrap();

        let updated = env
            .shares
            .update_share(
                &env.ctx_a(),
                created.share.id,
                ShareUpdate {
                    permissions: Some(vec!["read".to_string(), "write".to_string()]),
                    expires_at: None,
                    is_public: Some(false),
                },
            )
            .await
            .unwrap();

        assert!(updated.grants(SharePermission::Write));
        assert!(!updated.is_public);
        assert_eq!(updated.expires_at, None);

        // Explicit null clears the expiry.
        let cleared = env
            .shares
            .update_share(
                &env.ctx_a(),
                created.share.id,
                ShareUpdate {
                    permissions: None,
                    expires_at: Some(None),
                    is_public: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(cleared.expires_at, None);
    }

    #[tokio::test]
    async fn test_newer_share_supersedes_denormalized_pointer() {
        let env = TestEnv::new();
        let file = upload(&env, "a.txt").await;

        let first = env
            .shares
            .create_share(&env.ctx_a(), share_req(&file))
            .await
            .unwrap();
        let second = env
            .shares
            .create_share(&env.ctx_a(), share_req(&file))
            .await
            .unwrap();

        let flagged = env.files.get_file(&env.ctx_a(), file.id).await.unwrap();
        assert_eq!(
            flagged.share_token.as_deref(),
            Some(second.share.token.as_str())
        );

        // The first share record is superseded, not revoked.
        assert!(env.shares.resolve_share(&first.share.token).await.is_ok());
    }

    #[tokio::test]
    async fn test_list_shares_joins_resources() {
        let env = TestEnv::new();
        let file = upload(&env, "a.txt").await;
        let folder = env
            .folders
            .create_folder(
                &env.ctx_a(),
                CreateFolderRequest {
                    name: "Docs".to_string(),
                    parent_id: None,
                },
            )
            .await
            .unwrap();

        env.shares
            .create_share(&env.ctx_a(), share_req(&file))
            .await
            .unwrap();
        env.shares
            .create_share(
                &env.ctx_a(),
                CreateShareRequest {
                    resource_id: folder.id,
                    resource_type: ResourceType::Folder,
                    permissions: vec!["read".to_string()],
                    expires_at: None,
                    is_public: true,
                    shared_with_email: Some("friend@example.com".to_string()),
                },
            )
            .await
            .unwrap();

        let page = env
            .shares
            .list_shares(&env.ctx_a(), ListRange::default())
            .await
            .unwrap();
        assert_eq!(page.total, 2);
        // Newest-first: the folder share comes first.
        assert_eq!(page.items[0].resource.as_ref().unwrap().id(), folder.id);
        assert_eq!(page.items[1].resource.as_ref().unwrap().id(), file.id);
    }

    #[tokio::test]
    async fn test_share_and_revoke_are_recorded() {
        let env = TestEnv::new();
        let file = upload(&env, "a.txt").await;
        let created = env
            .shares
            .create_share(&env.ctx_a(), share_req(&file))
            .await
            .unwrap();
        env.shares
            .revoke_share(&env.ctx_a(), created.share.id)
            .await
            .unwrap();

        let page = env
            .activity
            .list(&env.ctx_a(), ListRange::default())
            .await
            .unwrap();
        let actions: Vec<_> = page.items.iter().map(|r| r.action).collect();
        assert_eq!(
            actions,
            vec![
                ActivityAction::Unshare,
                ActivityAction::Share,
                ActivityAction::Upload,
            ]
        );
    }
}
