//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Default page size for listings.
pub const DEFAULT_LIMIT: i64 = 25;

/// Maximum page size for listings.
pub const MAX_LIMIT: i64 = 100;

/// Generic pagination parameters (`?limit=&offset=`).
///
/// Used by every handler that supports paginated listing.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PaginationParams {
    /// Resolve the effective `(limit, offset)`, clamping the limit to
    /// `1..=MAX_LIMIT` and the offset to non-negative.
    pub fn limit_offset(&self) -> (i64, i64) {
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let offset = self.offset.unwrap_or(0).max(0);
        (limit, offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_applied() {
        let params = PaginationParams::default();
        assert_eq!(params.limit_offset(), (DEFAULT_LIMIT, 0));
    }

    #[test]
    fn limit_clamped_to_max() {
        let params = PaginationParams {
            limit: Some(10_000),
            offset: Some(-5),
        };
        assert_eq!(params.limit_offset(), (MAX_LIMIT, 0));
    }

    #[test]
    fn zero_limit_raised_to_one() {
        let params = PaginationParams {
            limit: Some(0),
            offset: None,
        };
        assert_eq!(params.limit_offset(), (1, 0));
    }
}
