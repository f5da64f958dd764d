//! Session verifier backed by the external session provider.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use uuid::Uuid;

use cumulus_core::config::auth::AuthConfig;
use cumulus_core::error::AppError;
use cumulus_core::result::AppResult;

use super::{SessionVerifier, VerifiedSession};

/// Verifies tokens against the configured session provider over HTTP.
#[derive(Debug, Clone)]
pub struct RemoteSessionVerifier {
    client: reqwest::Client,
    base_url: String,
}

/// Session payload returned by the provider.
#[derive(Debug, serde::Deserialize)]
struct SessionResponse {
    user_id: Uuid,
}

impl RemoteSessionVerifier {
    /// Create a new remote verifier from configuration.
    pub fn new(config: &AuthConfig) -> AppResult<Self> {
        if config.provider_url.is_empty() {
            return Err(AppError::configuration(
                "auth.provider_url is required for the remote session verifier",
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::configuration(format!("Failed to build session provider client: {e}"))
            })?;

        Ok(Self {
            client,
            base_url: config.provider_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl SessionVerifier for RemoteSessionVerifier {
    async fn verify(&self, token: &str) -> AppResult<Option<VerifiedSession>> {
        let url = format!("{}/v1/sessions/current", self.base_url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    cumulus_core::error::ErrorKind::ServiceUnavailable,
                    "Session provider unreachable",
                    e,
                )
            })?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN | StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let session: SessionResponse = response.json().await.map_err(|e| {
                    AppError::with_source(
                        cumulus_core::error::ErrorKind::ServiceUnavailable,
                        "Malformed session provider response",
                        e,
                    )
                })?;
                Ok(Some(VerifiedSession {
                    user_id: session.user_id,
                }))
            }
            status => Err(AppError::service_unavailable(format!(
                "Session provider returned {status}"
            ))),
        }
    }
}
