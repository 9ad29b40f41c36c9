//! Pagination strategy implementations
//!
//! Each strategy handles one pagination convention. Strategies only compute
//! the next request's parameters and the termination decision; fetching and
//! accumulation belong to the engine loop in [`ApiClient::get_all`].
//!
//! [`ApiClient::get_all`]: crate::ApiClient::get_all

use super::types::{
    json_field, NextPage, PaginationConfig, PaginationState, PaginationStrategy, Paginator,
    DEFAULT_PAGE_SIZE,
};
use serde_json::Value;
use std::collections::HashMap;

impl PaginationConfig {
    /// Build the paginator for this config
    ///
    /// `params` are the caller's query parameters; the offset strategy reads
    /// its page size from them (under `limit_field`, default 50).
    pub fn paginator(&self, params: &HashMap<String, String>) -> Box<dyn Paginator> {
        match self.strategy {
            PaginationStrategy::Offset => {
                let limit = params
                    .get(&self.limit_field)
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_PAGE_SIZE);
                Box::new(OffsetPaginator {
                    offset_field: self.offset_field.clone(),
                    total_count_field: self.total_count_field.clone(),
                    limit,
                })
            }
            PaginationStrategy::Page => Box::new(PageNumberPaginator {
                page_field: self.page_field.clone(),
                total_pages_field: self.total_pages_field.clone(),
            }),
            PaginationStrategy::HasMore => Box::new(HasMorePaginator {
                has_more_field: self.has_more_field.clone(),
            }),
        }
    }
}

// ============================================================================
// Offset Pagination
// ============================================================================

/// Offset-based pagination (e.g., SQL-style pagination)
///
/// Injects the offset parameter each request and advances it by the page
/// size. Captures the reported total from the first response only; stops
/// when the next offset reaches it or a page comes back empty. A partial
/// page by itself does not stop the walk, since some APIs return short
/// pages mid-stream.
#[derive(Debug, Clone)]
pub struct OffsetPaginator {
    /// Query parameter name for offset
    pub offset_field: String,
    /// Response field holding the total record count
    pub total_count_field: String,
    /// Page size, from the caller's limit parameter
    pub limit: u64,
}

impl Paginator for OffsetPaginator {
    fn initial_params(&self, state: &PaginationState) -> HashMap<String, String> {
        let mut params = HashMap::new();
        params.insert(self.offset_field.clone(), state.offset.to_string());
        params
    }

    fn process_response(
        &self,
        body: &Value,
        records_count: usize,
        state: &mut PaginationState,
    ) -> NextPage {
        state.record_page(records_count);

        // Total is captured from the first response only
        if state.requests == 1 {
            state.total_count = json_field(body, &self.total_count_field).and_then(Value::as_u64);
        }

        if records_count == 0 {
            state.mark_done();
            return NextPage::Done;
        }

        state.offset += self.limit;

        if let Some(total) = state.total_count {
            if state.offset >= total {
                state.mark_done();
                return NextPage::Done;
            }
        }

        NextPage::with_param(&self.offset_field, state.offset.to_string())
    }
}

// ============================================================================
// Page Number Pagination
// ============================================================================

/// Page number pagination (e.g., traditional web pagination)
///
/// Injects the page parameter starting at 1. Stops when the response reports
/// a total page count the walk has reached, or, with no total reported, when
/// a page comes back empty.
#[derive(Debug, Clone)]
pub struct PageNumberPaginator {
    /// Query parameter name for page number
    pub page_field: String,
    /// Response field holding the total page count
    pub total_pages_field: String,
}

impl Paginator for PageNumberPaginator {
    fn initial_params(&self, state: &PaginationState) -> HashMap<String, String> {
        let mut params = HashMap::new();
        params.insert(self.page_field.clone(), state.page.to_string());
        params
    }

    fn process_response(
        &self,
        body: &Value,
        records_count: usize,
        state: &mut PaginationState,
    ) -> NextPage {
        state.record_page(records_count);

        let total_pages = json_field(body, &self.total_pages_field).and_then(Value::as_u64);

        match total_pages {
            Some(total) if state.page >= total => {
                state.mark_done();
                return NextPage::Done;
            }
            None if records_count == 0 => {
                state.mark_done();
                return NextPage::Done;
            }
            _ => {}
        }

        state.next_page();
        NextPage::with_param(&self.page_field, state.page.to_string())
    }
}

// ============================================================================
// Has-More Flag Pagination
// ============================================================================

/// Has-more-flag pagination
///
/// Issues the same parameters every round; the server tracks its own cursor.
/// Stops when the response's flag is false or absent.
#[derive(Debug, Clone)]
pub struct HasMorePaginator {
    /// Response field holding the boolean flag
    pub has_more_field: String,
}

impl Paginator for HasMorePaginator {
    fn initial_params(&self, _state: &PaginationState) -> HashMap<String, String> {
        HashMap::new()
    }

    fn process_response(
        &self,
        body: &Value,
        records_count: usize,
        state: &mut PaginationState,
    ) -> NextPage {
        state.record_page(records_count);

        let has_more = json_field(body, &self.has_more_field)
            .and_then(Value::as_bool)
            .unwrap_or(false);

        if has_more {
            NextPage::unchanged()
        } else {
            state.mark_done();
            NextPage::Done
        }
    }
}
