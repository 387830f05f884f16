//! Pagination types for list endpoints.
//!
//! List endpoints use a fixed page size of [`LIST_PAGE_SIZE`]; callers choose only
//! the page number.

use serde::{Deserialize, Serialize};

/// Number of rows returned per page by every list endpoint.
pub const LIST_PAGE_SIZE: u32 = 10;

/// Request parameters for paginated queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-indexed).
    #[serde(rename = "pageNo", default = "default_page")]
    pub page: u32,
}

fn default_page() -> u32 {
    1
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: default_page(),
        }
    }
}

impl PageRequest {
    /// Creates a request for `page`. Page 0 is treated as page 1.
    #[must_use]
    pub const fn new(page: u32) -> Self {
        Self {
            page: if page == 0 { 1 } else { page },
        }
    }

    /// Page number, never below 1.
    #[must_use]
    pub const fn page(&self) -> u32 {
        if self.page == 0 { 1 } else { self.page }
    }

    /// Calculates the offset for database queries.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page() as u64 - 1) * LIST_PAGE_SIZE as u64
    }

    /// Returns the limit for database queries.
    #[must_use]
    pub const fn limit(&self) -> u64 {
        LIST_PAGE_SIZE as u64
    }
}

/// Response wrapper for paginated data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageResponse<T> {
    /// The items in the current page.
    pub data: Vec<T>,
    /// Pagination metadata.
    pub meta: PageMeta,
}

/// Pagination metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageMeta {
    /// Current page number.
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
    /// Total number of items across all pages.
    pub total: u64,
    /// Total number of pages.
    pub total_pages: u64,
}

impl<T> PageResponse<T> {
    /// Creates a new paginated response.
    #[must_use]
    pub fn new(data: Vec<T>, request: PageRequest, total: u64) -> Self {
        let total_pages = if total == 0 {
            1
        } else {
            total.div_ceil(u64::from(LIST_PAGE_SIZE))
        };

        Self {
            data,
            meta: PageMeta {
                page: request.page(),
                per_page: LIST_PAGE_SIZE,
                total,
                total_pages,
            },
        }
    }

    /// Maps every item, keeping the metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageResponse<U> {
        PageResponse {
            data: self.data.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }

    /// Returns true if the page holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
