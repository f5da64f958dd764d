//! Session verifier backends.

pub mod remote;
pub mod static_tokens;

use async_trait::async_trait;
use uuid::Uuid;

use cumulus_core::result::AppResult;

pub use remote::RemoteSessionVerifier;
pub use static_tokens::StaticSessionVerifier;

/// A successfully verified session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct VerifiedSession {
    /// The stable identifier of the authenticated user.
    pub user_id: Uuid,
}

/// The opaque "token → user" oracle.
///
/// `Ok(None)` means the token is unknown, malformed upstream, or expired;
/// `Err` is reserved for the oracle itself being unreachable.
#[async_trait]
pub trait SessionVerifier: Send + Sync + std::fmt::Debug + 'static {
    /// Verify a session token.
    async fn verify(&self, token: &str) -> AppResult<Option<VerifiedSession>>;
}
