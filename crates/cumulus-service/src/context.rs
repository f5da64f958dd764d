//! Request context carrying the authenticated caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who is acting in the current request.
///
/// Built by the transport layer once the identity gate has resolved the
/// session token; services trust the user id in here implicitly and never
/// re-validate it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RequestContext {
    /// The resolved caller.
    pub user_id: Uuid,
    /// Arrival time of the request.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Context for a request arriving now.
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            request_time: Utc::now(),
        }
    }
}
