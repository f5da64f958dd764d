//! The identity gate: opaque token in, stable user id out.

use std::sync::Arc;

use tracing::debug;

use cumulus_core::config::auth::AuthConfig;
use cumulus_core::error::AppError;
use cumulus_core::result::AppResult;

use crate::verifier::{
    RemoteSessionVerifier, SessionVerifier, StaticSessionVerifier, VerifiedSession,
};

/// Resolves session tokens to user ids.
///
/// Everything downstream trusts the returned user id implicitly; no other
/// component re-validates it.
#[derive(Debug, Clone)]
pub struct IdentityGate {
    verifier: Arc<dyn SessionVerifier>,
}

impl IdentityGate {
    /// Create a gate with the verifier selected by configuration.
    pub fn new(config: &AuthConfig) -> AppResult<Self> {
        let verifier: Arc<dyn SessionVerifier> = match config.provider.as_str() {
            "remote" => Arc::new(RemoteSessionVerifier::new(config)?),
            "static" => Arc::new(StaticSessionVerifier::new(config)),
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown session provider: '{other}'. Supported: remote, static"
                )));
            }
        };
        Ok(Self { verifier })
    }

    /// Create a gate from an existing verifier (for testing).
    pub fn from_verifier(verifier: Arc<dyn SessionVerifier>) -> Self {
        Self { verifier }
    }

    /// Resolve a session token to its user.
    ///
    /// Fails with `Unauthenticated` when the token is missing or the oracle
    /// reports it invalid/expired. Oracle outages propagate as
    /// `ServiceUnavailable`.
    pub async fn resolve(&self, token: &str) -> AppResult<VerifiedSession> {
        let token = token.trim();
        if token.is_empty() {
            return Err(AppError::unauthenticated("Missing session token"));
        }

        match self.verifier.verify(token).await? {
            Some(session) => {
                debug!(user_id = %session.user_id, "Session resolved");
                Ok(session)
            }
            None => Err(AppError::unauthenticated("Invalid or expired session")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cumulus_core::error::ErrorKind;
    use uuid::Uuid;

    fn gate_with(token: &str, user_id: Uuid) -> IdentityGate {
        IdentityGate::from_verifier(Arc::new(StaticSessionVerifier::with_tokens([(
            token.to_string(),
            user_id,
        )])))
    }

    #[tokio::test]
    async fn test_resolves_known_token() {
        let user_id = Uuid::new_v4();
        let gate = gate_with("tok-1", user_id);

        let session = gate.resolve("tok-1").await.unwrap();
        assert_eq!(session.user_id, user_id);
    }

    #[tokio::test]
    async fn test_blank_token_is_unauthenticated() {
        let gate = gate_with("tok-1", Uuid::new_v4());

        let err = gate.resolve("   ").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthenticated);
    }

    #[tokio::test]
    async fn test_unknown_token_is_unauthenticated() {
        let gate = gate_with("tok-1", Uuid::new_v4());

        let err = gate.resolve("tok-2").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unauthenticated);
    }
}
