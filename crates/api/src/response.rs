//! Shared response envelope types for API handlers.
//!
//! Every response body carries the `{ "success": true, "data": ... }`
//! envelope; paginated listings add a `pagination` object. Use these types
//! instead of ad-hoc `serde_json::json!` so the shape stays consistent.

use serde::Serialize;

/// Standard `{ "success": true, "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Wrap a payload in the success envelope.
    pub fn new(data: T) -> Self {
        ApiResponse {
            success: true,
            data,
        }
    }
}

/// Paginated listing envelope: `{ "success", "data", "pagination" }`.
#[derive(Debug, Serialize)]
pub struct Paginated<T: Serialize> {
    pub success: bool,
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T: Serialize> Paginated<T> {
    /// Wrap a page of items with metadata derived from the total count.
    pub fn new(items: Vec<T>, total: i64, limit: i64, offset: i64) -> Self {
        Paginated {
            success: true,
            data: items,
            pagination: PaginationMeta::new(total, limit, offset),
        }
    }
}

/// Pagination metadata derived from a COUNT query.
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    pub pages: i64,
    pub has_more: bool,
}

impl PaginationMeta {
    /// Derive page count and `has_more` from the raw numbers.
    ///
    /// `has_more == (offset + limit < total)`; `pages == ceil(total / limit)`.
    pub fn new(total: i64, limit: i64, offset: i64) -> Self {
        let pages = if limit > 0 {
            (total + limit - 1) / limit
        } else {
            0
        };
        PaginationMeta {
            total,
            limit,
            offset,
            pages,
            has_more: offset + limit < total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_more_arithmetic() {
        let meta = PaginationMeta::new(10, 5, 0);
        assert!(meta.has_more);

        let meta = PaginationMeta::new(10, 5, 5);
        assert!(!meta.has_more);

        let meta = PaginationMeta::new(11, 5, 5);
        assert!(meta.has_more);
    }

    #[test]
    fn pages_round_up() {
        assert_eq!(PaginationMeta::new(10, 5, 0).pages, 2);
        assert_eq!(PaginationMeta::new(11, 5, 0).pages, 3);
        assert_eq!(PaginationMeta::new(0, 5, 0).pages, 0);
    }

    #[test]
    fn empty_result_has_no_more() {
        let meta = PaginationMeta::new(0, 25, 0);
        assert!(!meta.has_more);
        assert_eq!(meta.total, 0);
    }
}
