//! Offset pagination helpers for list endpoints.

use serde::Deserialize;

/// Default page size when the client does not send `limit`.
pub const DEFAULT_LIMIT: i64 = 50;

/// Hard upper bound on page size.
pub const MAX_LIMIT: i64 = 500;

/// Query parameters for offset-paginated list endpoints.
#[derive(Debug, Clone, Copy, Deserialize, Default)]
pub struct PageParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PageParams {
    /// Effective limit, clamped to `1..=MAX_LIMIT`.
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    /// Effective offset, never negative.
    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}
