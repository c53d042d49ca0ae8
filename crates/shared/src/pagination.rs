//! Page/offset pagination utilities for list endpoints.

use serde::{Deserialize, Serialize};

/// Default page size for list endpoints.
pub const DEFAULT_PER_PAGE: u32 = 50;

/// Maximum page size a caller may request.
pub const MAX_PER_PAGE: u32 = 200;

/// Query parameters for paginated list endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl PageQuery {
    /// Resolved 1-based page number.
    pub fn page(&self) -> u32 {
        self.page.filter(|p| *p >= 1).unwrap_or(1)
    }

    /// Resolved page size, clamped to `MAX_PER_PAGE`.
    pub fn per_page(&self) -> u32 {
        self.per_page
            .filter(|p| *p >= 1)
            .unwrap_or(DEFAULT_PER_PAGE)
            .min(MAX_PER_PAGE)
    }

    /// SQL offset for the resolved page.
    pub fn offset(&self) -> i64 {
        (self.page() as i64 - 1) * self.per_page() as i64
    }

    /// SQL limit for the resolved page.
    pub fn limit(&self) -> i64 {
        self.per_page() as i64
    }
}

/// Pagination metadata returned alongside list data.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PageInfo {
    pub page: u32,
    pub per_page: u32,
    pub total: i64,
}

impl PageInfo {
    pub fn new(query: &PageQuery, total: i64) -> Self {
        Self {
            page: query.page(),
            per_page: query.per_page(),
            total,
        }
    }
}
