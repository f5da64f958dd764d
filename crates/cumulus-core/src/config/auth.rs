//! Session provider configuration.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Session verification configuration.
///
/// Cumulus does not mint or store credentials itself; session tokens are
/// verified against an external provider. The `static` provider exists for
/// local development and tests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Verifier backend: `"remote"` or `"static"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Base URL of the remote session provider.
    #[serde(default)]
    pub provider_url: String,
    /// Timeout for session verification calls, in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    /// Fixed token-to-user mappings for the `static` provider.
    #[serde(default)]
    pub static_tokens: Vec<StaticToken>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            provider_url: String::new(),
            request_timeout_seconds: default_request_timeout(),
            static_tokens: Vec::new(),
        }
    }
}

/// A fixed token accepted by the static verifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticToken {
    /// The bearer token value.
    pub token: String,
    /// The user the token authenticates as.
    pub user_id: Uuid,
}

fn default_provider() -> String {
    "remote".to_string()
}

fn default_request_timeout() -> u64 {
    5
}
