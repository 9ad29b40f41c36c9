//! Pagination module
//!
//! Supports: offset/limit, page/per-page, and has-more-flag conventions.
//!
//! # Overview
//!
//! Each strategy implements [`Paginator`]: it contributes the first request's
//! parameters and, given a response, either yields the parameter mutation for
//! the next page or declares the walk complete. The drive loop lives in
//! [`ApiClient::get_all`](crate::ApiClient::get_all), which also enforces the
//! caller-set `max_pages`/`max_items` ceilings.

mod strategies;
mod types;

pub use strategies::{HasMorePaginator, OffsetPaginator, PageNumberPaginator};
pub use types::{
    extract_records, json_field, NextPage, PaginationConfig, PaginationState, PaginationStrategy,
    Paginator, DEFAULT_PAGE_SIZE,
};

#[cfg(test)]
mod tests;
