//! Share entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::resource::{Owned, ResourceType};

/// A permission a share grants to its bearer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SharePermission {
    /// Read access to the shared resource.
    Read,
    /// Write access to the shared resource.
    Write,
}

impl SharePermission {
    /// The canonical string stored in the permissions array.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
        }
    }

    /// Parse a stored permission string.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "read" => Some(Self::Read),
            "write" => Some(Self::Write),
            _ => None,
        }
    }
}

/// A share granting scoped, possibly time-limited access to one resource.
///
/// The token is the bearer credential; whoever holds it may resolve the
/// share without authenticating. `shared_with_email` is informational only
/// and never matched against the caller's identity.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Share {
    /// Unique share identifier.
    pub id: Uuid,
    /// ID of the shared resource.
    pub resource_id: Uuid,
    /// Type of the shared resource.
    pub resource_type: ResourceType,
    /// The user who created the share (owner of the resource at creation).
    pub owner_id: Uuid,
    /// Email address the share was addressed to, if any.
    pub shared_with_email: Option<String>,
    /// Granted permissions; non-empty, each ∈ {`read`, `write`}.
    pub permissions: Vec<String>,
    /// Unguessable bearer token (64 hex characters).
    pub token: String,
    /// When the share stops resolving (None = never).
    pub expires_at: Option<DateTime<Utc>>,
    /// Whether the link is public or addressed to a specific recipient.
    pub is_public: bool,
    /// When the share was created.
    pub created_at: DateTime<Utc>,
}

impl Share {
    /// Whether the share's expiry has passed. Expiry is lazy: expired
    /// shares stay in the store and are rejected at resolution time.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| at <= Utc::now())
    }

    /// Whether the share grants the given permission.
    pub fn grants(&self, permission: SharePermission) -> bool {
        self.permissions.iter().any(|p| p == permission.as_str())
    }
}

impl Owned for Share {
    fn owner_id(&self) -> Uuid {
        self.owner_id
    }
}

/// Data required to create a new share.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateShare {
    /// ID of the resource being shared.
    pub resource_id: Uuid,
    /// Type of the resource.
    pub resource_type: ResourceType,
    /// The sharing user.
    pub owner_id: Uuid,
    /// Email address the share is addressed to.
    pub shared_with_email: Option<String>,
    /// Granted permissions.
    pub permissions: Vec<String>,
    /// Bearer token.
    pub token: String,
    /// Expiry time (None = never).
    pub expires_at: Option<DateTime<Utc>>,
    /// Whether the link is public.
    pub is_public: bool,
}

/// Partial update of an existing share; only present fields are applied.
///
/// `expires_at` distinguishes "leave unchanged" (absent) from "clear"
/// (explicit null) via the nested `Option`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShareUpdate {
    /// Replace the granted permissions.
    #[serde(default)]
    pub permissions: Option<Vec<String>>,
    /// Replace or clear the expiry.
    #[serde(default, deserialize_with = "double_option")]
    pub expires_at: Option<Option<DateTime<Utc>>>,
    /// Replace the public flag.
    #[serde(default)]
    pub is_public: Option<bool>,
}

/// An explicit `null` deserializes to `Some(None)`; an absent field falls
/// back to the `None` default.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn share(expires_at: Option<DateTime<Utc>>) -> Share {
        Share {
            id: Uuid::new_v4(),
            resource_id: Uuid::new_v4(),
            resource_type: ResourceType::File,
            owner_id: Uuid::new_v4(),
            shared_with_email: None,
            permissions: vec!["read".to_string()],
            token: "t".repeat(64),
            expires_at,
            is_public: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_expiry_is_lazy_and_inclusive() {
        assert!(!share(None).is_expired());
        assert!(!share(Some(Utc::now() + Duration::hours(1))).is_expired());
        assert!(share(Some(Utc::now() - Duration::seconds(1))).is_expired());
    }

    #[test]
    fn test_grants() {
        let s = share(None);
        assert!(s.grants(SharePermission::Read));
        assert!(!s.grants(SharePermission::Write));
    }

    #[test]
    fn test_update_distinguishes_absent_from_null_expiry() {
        let absent: ShareUpdate = serde_json::from_str(r#"{"is_public": false}"#).unwrap();
        assert_eq!(absent.expires_at, None);
        assert_eq!(absent.is_public, Some(false));

        let cleared: ShareUpdate = serde_json::from_str(r#"{"expires_at": null}"#).unwrap();
        assert_eq!(cleared.expires_at, Some(None));
    }

    #[test]
    fn test_permission_round_trip() {
        assert_eq!(SharePermission::parse("read"), Some(SharePermission::Read));
        assert_eq!(
            SharePermission::parse("write"),
            Some(SharePermission::Write)
        );
        assert_eq!(SharePermission::parse("admin"), None);
    }
}
