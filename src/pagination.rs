//! This modules defines the common functionality for paging data.

use serde::{Deserialize, Serialize};

use crate::query_params::empty_as_none;

/// The config for pagination
#[derive(Debug, Clone)]
pub struct PaginationConfig {
    /// The page number to default to when not specified in a request.
    pub default_page: u64,
    /// The number of items per page when not specified in a request.
    pub default_page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: 0,
            default_page_size: 20,
        }
    }
}

/// The raw paging parameters from a query string, e.g. `?page=2&size=10`.
///
/// Empty values, e.g. `?page=`, count as missing.
#[derive(Debug, Default, Clone, Copy, Deserialize)]
pub struct PageQuery {
    /// The zero-based page index.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub page: Option<u64>,
    /// The maximum number of rows on a page.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub size: Option<u64>,
}

impl PageQuery {
    /// Fill in missing parameters from `config`.
    pub fn resolve(self, config: &PaginationConfig) -> PageRequest {
        PageRequest::new(
            self.page.unwrap_or(config.default_page),
            self.size.unwrap_or(config.default_page_size),
        )
    }
}

/// A request for one page of results.
///
/// Pages are zero-indexed. A size of zero is honored and yields empty pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// The zero-based page index.
    pub page: u64,
    /// The maximum number of rows on a page.
    pub size: u64,
}

impl PageRequest {
    /// Request page `page` with at most `size` rows.
    pub fn new(page: u64, size: u64) -> Self {
        Self { page, size }
    }

    /// The index of the first row on this page.
    pub fn offset(&self) -> u64 {
        self.page.saturating_mul(self.size)
    }

    /// The maximum number of rows on this page.
    pub fn limit(&self) -> u64 {
        self.size
    }
}

/// One page of a larger result set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// The rows on this page.
    pub content: Vec<T>,
    /// The zero-based page index.
    pub number: u64,
    /// The requested page size.
    pub size: u64,
    /// The number of rows matching the query across all pages.
    pub total_elements: u64,
    /// The number of pages needed to show every matching row.
    pub total_pages: u64,
    /// The number of rows on this page.
    pub number_of_elements: usize,
    /// Whether this is the first page.
    pub first: bool,
    /// Whether this is the last page.
    pub last: bool,
}

impl<T> Page<T> {
    /// Assemble a page from the rows of `request` and the total row count.
    ///
    /// `total_elements` must be counted without pagination.
    pub fn new(content: Vec<T>, request: PageRequest, total_elements: u64) -> Self {
        let total_pages = if request.size == 0 {
            1
        } else {
            total_elements.div_ceil(request.size)
        };

        Self {
            number_of_elements: content.len(),
            content,
            number: request.page,
            size: request.size,
            total_elements,
            total_pages,
            first: request.page == 0,
            last: request.page.saturating_add(1) >= total_pages,
        }
    }
}
