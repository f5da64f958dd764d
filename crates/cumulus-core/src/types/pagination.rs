//! Pagination types for list endpoints.

use serde::{Deserialize, Serialize};

/// Default number of items returned by list endpoints.
const DEFAULT_LIMIT: u32 = 50;
/// Maximum number of items returned by list endpoints.
const MAX_LIMIT: u32 = 200;

/// Limit/offset window for paginated queries, newest-first.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ListRange {
    /// Maximum number of items to return.
    #[serde(default = "default_limit")]
    pub limit: u32,
    /// Number of items to skip.
    #[serde(default)]
    pub offset: u32,
}

impl ListRange {
    /// Create a new range, clamping the limit to the allowed maximum.
    pub fn new(limit: u32, offset: u32) -> Self {
        Self {
            limit: limit.clamp(1, MAX_LIMIT),
            offset,
        }
    }

    /// The SQL `LIMIT` value.
    pub fn limit(&self) -> i64 {
        i64::from(self.limit.clamp(1, MAX_LIMIT))
    }

    /// The SQL `OFFSET` value.
    pub fn offset(&self) -> i64 {
        i64::from(self.offset)
    }
}

impl Default for ListRange {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

/// Windowed response wrapper for list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// The items in this window.
    pub items: Vec<T>,
    /// Total number of matching items.
    pub total: u64,
    /// The limit that was applied.
    pub limit: u32,
    /// The offset that was applied.
    pub offset: u32,
}

impl<T> Page<T> {
    /// Create a new page from a result window.
    pub fn new(items: Vec<T>, total: u64, range: &ListRange) -> Self {
        Self {
            items,
            total,
            limit: range.limit,
            offset: range.offset,
        }
    }
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_is_clamped() {
        let range = ListRange::new(10_000, 0);
        assert_eq!(range.limit, MAX_LIMIT);
        assert_eq!(ListRange::new(0, 0).limit, 1);
    }

    #[test]
    fn test_defaults() {
        let range = ListRange::default();
        assert_eq!(range.limit, DEFAULT_LIMIT);
        assert_eq!(range.offset, 0);
    }
}
