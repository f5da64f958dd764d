//! Fixed-token session verifier for tests and local development.

use std::collections::HashMap;

use async_trait::async_trait;
use uuid::Uuid;

use cumulus_core::config::auth::AuthConfig;
use cumulus_core::result::AppResult;

use super::{SessionVerifier, VerifiedSession};

/// Verifies tokens against a fixed in-memory map.
#[derive(Debug, Clone, Default)]
pub struct StaticSessionVerifier {
    tokens: HashMap<String, Uuid>,
}

impl StaticSessionVerifier {
    /// Create a verifier from the configured static token list.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            tokens: config
                .static_tokens
                .iter()
                .map(|t| (t.token.clone(), t.user_id))
                .collect(),
        }
    }

    /// Create a verifier from explicit token/user pairs.
    pub fn with_tokens(pairs: impl IntoIterator<Item = (String, Uuid)>) -> Self {
        Self {
            tokens: pairs.into_iter().collect(),
        }
    }
}

#[async_trait]
impl SessionVerifier for StaticSessionVerifier {
    async fn verify(&self, token: &str) -> AppResult<Option<VerifiedSession>> {
        Ok(self
            .tokens
            .get(token)
            .map(|user_id| VerifiedSession { user_id: *user_id }))
    }
}
