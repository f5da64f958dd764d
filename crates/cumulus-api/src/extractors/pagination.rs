//! Limit/offset extraction for list endpoints.

use serde::Deserialize;

use cumulus_core::types::ListRange;

/// Query-string form of a list window; both fields optional.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct RangeQuery {
    /// Maximum number of items to return.
    pub limit: Option<u32>,
    /// Number of items to skip.
    pub offset: Option<u32>,
}

impl RangeQuery {
    /// Resolve against defaults and the global maximum.
    pub fn resolve(&self) -> ListRange {
        let defaults = ListRange::default();
        ListRange::new(
            self.limit.unwrap_or(defaults.limit),
            self.offset.unwrap_or(defaults.offset),
        )
    }
}
