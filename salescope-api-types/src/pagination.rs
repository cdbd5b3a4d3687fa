//! Page window arithmetic and the response envelope

use serde::{Deserialize, Serialize};

use crate::enums::SortDirection;
use crate::fields::SaleField;
use crate::query::{QueryBuilderRequest, QueryFilter};

/// Page size used when a request asks for a non-positive size
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Largest page size accepted at the HTTP boundary
pub const MAX_PAGE_SIZE: u64 = 100;

/// SQL `OFFSET` is bound as a signed 64-bit integer
const MAX_OFFSET: u64 = i64::MAX as u64;

/// Effective zero-based page and page size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: u64,
    pub size: u64,
}

impl PageWindow {
    /// Coerce raw request values: `size <= 0` becomes the default, `page < 0` becomes 0
    pub fn from_request(current_page: i64, page_size: i64) -> Self {
        let size = if page_size > 0 { page_size as u64 } else { DEFAULT_PAGE_SIZE };
        let page = current_page.max(0) as u64;
        Self { page, size }
    }

    /// Number of rows skipped before this page, clamped to what SQL can bind
    pub fn offset(&self) -> u64 {
        self.page.saturating_mul(self.size).min(MAX_OFFSET)
    }

    pub fn limit(&self) -> u64 {
        self.size
    }

    /// `ceil(total / size)`, zero for an empty result
    pub fn total_pages(&self, total_elements: u64) -> u64 {
        total_elements.div_ceil(self.size)
    }
}

/// Page of results plus the echoed request parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryBuilderResponse<T> {
    pub current_page: u64,
    pub page_size: u64,
    pub total_elements: u64,
    pub total_pages: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SaleField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_dir: Option<SortDirection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_phrase: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_on: Option<Vec<SaleField>>,
    #[serde(default)]
    pub filters: Vec<QueryFilter>,
    pub data: Vec<T>,
}

impl<T> QueryBuilderResponse<T> {
    pub fn new(request: &QueryBuilderRequest, data: Vec<T>, total_elements: u64) -> Self {
        let window = request.window();
        let search_phrase = request.effective_search_phrase().map(str::to_string);
        let search_on = search_phrase
            .as_ref()
            .filter(|_| !request.search_on.is_empty())
            .map(|_| request.search_on.clone());

        Self {
            current_page: window.page,
            page_size: window.size,
            total_elements,
            total_pages: window.total_pages(total_elements),
            sort_by: request.sort_by,
            sort_dir: request.sort_by.map(|_| request.sort_dir),
            search_phrase,
            search_on,
            filters: request.filters.iter().map(QueryFilter::from).collect(),
            data,
        }
    }

    /// Convert the page items while keeping the envelope
    pub fn map<U, F>(self, f: F) -> QueryBuilderResponse<U>
    where
        F: FnMut(T) -> U,
    {
        QueryBuilderResponse {
            current_page: self.current_page,
            page_size: self.page_size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            sort_by: self.sort_by,
            sort_dir: self.sort_dir,
            search_phrase: self.search_phrase,
            search_on: self.search_on,
            filters: self.filters,
            data: self.data.into_iter().map(f).collect(),
        }
    }
}
