//! Pagination types and traits
//!
//! Defines the core pagination abstractions used by all strategies.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Default page size when the caller does not supply one
pub const DEFAULT_PAGE_SIZE: u64 = 50;

/// Pagination convention used by a list endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaginationStrategy {
    /// offset + limit query parameters
    #[default]
    Offset,
    /// page + per_page query parameters
    Page,
    /// boolean has-more flag in the response, server-tracked position
    HasMore,
}

/// Configuration for walking a paginated list endpoint
///
/// Field names cover the common conventions but every one can be overridden
/// for APIs that spell them differently. `max_pages` and `max_items` default
/// to unbounded; set them to cap a walk against an endpoint whose metadata
/// you do not trust.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// Which pagination convention the endpoint uses
    pub strategy: PaginationStrategy,
    /// Query parameter carrying the page size (offset strategy)
    pub limit_field: String,
    /// Query parameter carrying the offset
    pub offset_field: String,
    /// Query parameter carrying the page number
    pub page_field: String,
    /// Query parameter carrying the per-page size
    pub per_page_field: String,
    /// Response field carrying the has-more flag
    pub has_more_field: String,
    /// Response field carrying the total record count
    pub total_count_field: String,
    /// Response field carrying the total page count
    pub total_pages_field: String,
    /// Response field (dot-path) carrying the items array
    pub records_field: String,
    /// Stop after this many requests; `None` means unbounded
    pub max_pages: Option<u32>,
    /// Stop once this many items are accumulated; `None` means unbounded
    pub max_items: Option<usize>,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            strategy: PaginationStrategy::Offset,
            limit_field: "limit".to_string(),
            offset_field: "offset".to_string(),
            page_field: "page".to_string(),
            per_page_field: "per_page".to_string(),
            has_more_field: "has_more".to_string(),
            total_count_field: "total_count".to_string(),
            total_pages_field: "total_pages".to_string(),
            records_field: "data".to_string(),
            max_pages: None,
            max_items: None,
        }
    }
}

impl PaginationConfig {
    /// Offset/limit pagination with default field names
    pub fn offset() -> Self {
        Self {
            strategy: PaginationStrategy::Offset,
            ..Self::default()
        }
    }

    /// Page/per-page pagination with default field names
    pub fn page() -> Self {
        Self {
            strategy: PaginationStrategy::Page,
            ..Self::default()
        }
    }

    /// Has-more-flag pagination with default field names
    pub fn has_more() -> Self {
        Self {
            strategy: PaginationStrategy::HasMore,
            ..Self::default()
        }
    }

    /// Override the limit field name
    #[must_use]
    pub fn with_limit_field(mut self, name: impl Into<String>) -> Self {
        self.limit_field = name.into();
        self
    }

    /// Override the offset field name
    #[must_use]
    pub fn with_offset_field(mut self, name: impl Into<String>) -> Self {
        self.offset_field = name.into();
        self
    }

    /// Override the page field name
    #[must_use]
    pub fn with_page_field(mut self, name: impl Into<String>) -> Self {
        self.page_field = name.into();
        self
    }

    /// Override the per-page field name
    #[must_use]
    pub fn with_per_page_field(mut self, name: impl Into<String>) -> Self {
        self.per_page_field = name.into();
        self
    }

    /// Override the has-more field name
    #[must_use]
    pub fn with_has_more_field(mut self, name: impl Into<String>) -> Self {
        self.has_more_field = name.into();
        self
    }

    /// Override the response field (dot-path) holding the items array
    #[must_use]
    pub fn with_records_field(mut self, name: impl Into<String>) -> Self {
        self.records_field = name.into();
        self
    }

    /// Cap the number of requests issued
    #[must_use]
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = Some(max_pages);
        self
    }

    /// Cap the number of items accumulated
    #[must_use]
    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = Some(max_items);
        self
    }
}

/// Result of the next page computation
#[derive(Debug, Clone)]
pub enum NextPage {
    /// More pages available with these parameters
    Continue {
        /// Query parameters to add/replace for the next request
        query_params: HashMap<String, String>,
    },
    /// No more pages
    Done,
}

impl NextPage {
    /// Create a continuation with a single parameter
    pub fn with_param(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut params = HashMap::new();
        params.insert(key.into(), value.into());
        Self::Continue {
            query_params: params,
        }
    }

    /// Continuation that reuses the previous parameters unchanged
    pub fn unchanged() -> Self {
        Self::Continue {
            query_params: HashMap::new(),
        }
    }

    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Check if this is a continue result
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue { .. })
    }
}

/// Tracks pagination state during iteration
#[derive(Debug, Clone)]
pub struct PaginationState {
    /// Current page number (page strategy; first page is 1)
    pub page: u64,
    /// Current offset (offset strategy)
    pub offset: u64,
    /// Requests issued so far
    pub requests: u32,
    /// Total record count captured from the first response, if reported
    pub total_count: Option<u64>,
    /// Total records fetched so far
    pub total_fetched: u64,
    /// Is pagination complete?
    pub done: bool,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self {
            page: 1,
            offset: 0,
            requests: 0,
            total_count: None,
            total_fetched: 0,
            done: false,
        }
    }
}

impl PaginationState {
    /// Create a new pagination state
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark pagination as complete
    pub fn mark_done(&mut self) {
        self.done = true;
    }

    /// Increment page number
    pub fn next_page(&mut self) {
        self.page += 1;
    }

    /// Record one issued request and its record count
    pub fn record_page(&mut self, records: usize) {
        self.requests += 1;
        self.total_fetched += records as u64;
    }
}

/// Core trait for pagination strategies
pub trait Paginator: Send + Sync {
    /// Query parameters for the first request
    fn initial_params(&self, state: &PaginationState) -> HashMap<String, String>;

    /// Process a response and determine if there's a next page
    fn process_response(
        &self,
        body: &Value,
        records_count: usize,
        state: &mut PaginationState,
    ) -> NextPage;
}

/// Extract a value from JSON using a dot-separated path
///
/// Supports paths like `"pagination.total"` or a plain top-level key.
pub fn json_field<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = value;
    for part in path.split('.') {
        current = current.as_object()?.get(part)?;
    }
    Some(current)
}

/// Extract the items array under a dot-path field; absent means an empty page
pub fn extract_records(body: &Value, records_field: &str) -> Vec<Value> {
    json_field(body, records_field)
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}
