//! Offset pagination utilities.
//!
//! Every list endpoint takes the same `page`/`limit` pair and returns the
//! same pagination envelope. The count query and the slice query must run
//! against the identical filter so that `total_pages` stays consistent with
//! the returned slice.

use serde::{Deserialize, Serialize};

/// Default page when the caller omits it.
pub const DEFAULT_PAGE: u32 = 1;
/// Default page size when the caller omits it.
pub const DEFAULT_LIMIT: u32 = 10;
/// Upper bound on caller-supplied page sizes.
pub const MAX_LIMIT: u32 = 100;

/// Caller-supplied pagination parameters.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageParams {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_page() -> u32 {
    DEFAULT_PAGE
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageParams {
    /// Clamp to `page >= 1` and `1 <= limit <= MAX_LIMIT`.
    pub fn normalized(self) -> Self {
        Self {
            page: self.page.max(1),
            limit: self.limit.clamp(1, MAX_LIMIT),
        }
    }

    /// Rows to skip: `(page - 1) * limit`.
    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.limit)
    }

    /// Page size as the i64 sqlx binds expect.
    pub fn limit(&self) -> i64 {
        i64::from(self.limit)
    }
}

/// Pagination envelope returned alongside every list slice.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    pub total: i64,
    pub total_pages: i64,
    pub current_page: u32,
    pub limit: u32,
}

impl Pagination {
    /// Build the envelope from a total row count and the normalized params.
    pub fn new(total: i64, params: PageParams) -> Self {
        let limit = i64::from(params.limit);
        Self {
            total,
            total_pages: (total + limit - 1) / limit,
            current_page: params.page,
            limit: params.limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_applied_when_fields_missing() {
        let params: PageParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.page, 1);
        assert_eq!(params.limit, 10);
    }

    #[test]
    fn offset_is_page_minus_one_times_limit() {
        let params = PageParams { page: 3, limit: 10 }.normalized();
        assert_eq!(params.offset(), 20);

        let params = PageParams { page: 1, limit: 25 }.normalized();
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn normalized_clamps_out_of_range_values() {
        let params = PageParams { page: 0, limit: 0 }.normalized();
        assert_eq!(params.page, 1);
        assert_eq!(params.limit, 1);

        let params = PageParams {
            page: 1,
            limit: 10_000,
        }
        .normalized();
        assert_eq!(params.limit, MAX_LIMIT);
    }

    #[test]
    fn total_pages_is_ceiling_division() {
        let params = PageParams { page: 1, limit: 10 };
        assert_eq!(Pagination::new(0, params).total_pages, 0);
        assert_eq!(Pagination::new(1, params).total_pages, 1);
        assert_eq!(Pagination::new(10, params).total_pages, 1);
        assert_eq!(Pagination::new(11, params).total_pages, 2);
        assert_eq!(Pagination::new(95, params).total_pages, 10);
    }

    #[test]
    fn pagination_serializes_expected_shape() {
        let p = Pagination::new(21, PageParams { page: 2, limit: 10 });
        let json = serde_json::to_string(&p).unwrap();
        assert!(json.contains("\"total\":21"));
        assert!(json.contains("\"total_pages\":3"));
        assert!(json.contains("\"current_page\":2"));
        assert!(json.contains("\"limit\":10"));
    }
}
