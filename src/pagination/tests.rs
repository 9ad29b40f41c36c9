//! Tests for pagination module

use super::*;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::collections::HashMap;

fn offset_paginator(limit: u64) -> OffsetPaginator {
    OffsetPaginator {
        offset_field: "offset".to_string(),
        total_count_field: "total_count".to_string(),
        limit,
    }
}

fn page_paginator() -> PageNumberPaginator {
    PageNumberPaginator {
        page_field: "page".to_string(),
        total_pages_field: "total_pages".to_string(),
    }
}

// ============================================================================
// NextPage Tests
// ============================================================================

#[test]
fn test_next_page_with_param() {
    let next = NextPage::with_param("page", "2");
    assert!(next.is_continue());
    assert!(!next.is_done());

    if let NextPage::Continue { query_params } = next {
        assert_eq!(query_params.get("page"), Some(&"2".to_string()));
    } else {
        panic!("Expected Continue");
    }
}

#[test]
fn test_next_page_done() {
    let next = NextPage::Done;
    assert!(next.is_done());
    assert!(!next.is_continue());
}

// ============================================================================
// PaginationState Tests
// ============================================================================

#[test]
fn test_pagination_state_default() {
    let state = PaginationState::new();
    assert_eq!(state.page, 1);
    assert_eq!(state.offset, 0);
    assert_eq!(state.requests, 0);
    assert_eq!(state.total_fetched, 0);
    assert!(state.total_count.is_none());
    assert!(!state.done);
}

#[test]
fn test_pagination_state_record_page() {
    let mut state = PaginationState::new();

    state.record_page(50);
    state.record_page(25);
    assert_eq!(state.requests, 2);
    assert_eq!(state.total_fetched, 75);

    state.next_page();
    assert_eq!(state.page, 2);

    state.mark_done();
    assert!(state.done);
}

// ============================================================================
// Offset Paginator Tests
// ============================================================================

#[test]
fn test_offset_paginator_initial_params() {
    let paginator = offset_paginator(50);
    let state = PaginationState::new();

    let params = paginator.initial_params(&state);
    assert_eq!(params.get("offset"), Some(&"0".to_string()));
}

#[test]
fn test_offset_paginator_advances() {
    let paginator = offset_paginator(10);
    let body = json!({"data": []});
    let mut state = PaginationState::new();

    let next = paginator.process_response(&body, 10, &mut state);

    assert!(next.is_continue());
    assert_eq!(state.offset, 10);
    assert_eq!(state.total_fetched, 10);

    if let NextPage::Continue { query_params } = next {
        assert_eq!(query_params.get("offset"), Some(&"10".to_string()));
    }
}

#[test]
fn test_offset_paginator_partial_page_continues() {
    // A short page is not termination on its own; only an empty page is
    let paginator = offset_paginator(10);
    let body = json!({"data": []});
    let mut state = PaginationState::new();

    let next = paginator.process_response(&body, 5, &mut state);
    assert!(next.is_continue());
}

#[test]
fn test_offset_paginator_stops_on_empty_page() {
    let paginator = offset_paginator(10);
    let body = json!({"data": []});
    let mut state = PaginationState::new();

    let next = paginator.process_response(&body, 0, &mut state);
    assert!(next.is_done());
    assert!(state.done);
}

#[test]
fn test_offset_paginator_stops_on_total_count() {
    let paginator = offset_paginator(10);
    let body = json!({"data": [], "total_count": 15});
    let mut state = PaginationState::new();

    // First page: total captured, 10 < 15, continue
    let next = paginator.process_response(&body, 10, &mut state);
    assert!(next.is_continue());
    assert_eq!(state.total_count, Some(15));

    // Second page: offset 20 >= 15, done
    let next = paginator.process_response(&body, 5, &mut state);
    assert!(next.is_done());
}

#[test]
fn test_offset_paginator_total_from_first_response_only() {
    let paginator = offset_paginator(10);
    let mut state = PaginationState::new();

    let first = json!({"data": [], "total_count": 100});
    let _ = paginator.process_response(&first, 10, &mut state);
    assert_eq!(state.total_count, Some(100));

    // A different total on a later page is ignored
    let later = json!({"data": [], "total_count": 5});
    let next = paginator.process_response(&later, 10, &mut state);
    assert!(next.is_continue());
    assert_eq!(state.total_count, Some(100));
}

// ============================================================================
// Page Number Paginator Tests
// ============================================================================

#[test]
fn test_page_paginator_initial_params() {
    let paginator = page_paginator();
    let state = PaginationState::new();

    let params = paginator.initial_params(&state);
    assert_eq!(params.get("page"), Some(&"1".to_string()));
}

#[test]
fn test_page_paginator_increments() {
    let paginator = page_paginator();
    let body = json!({"data": [], "total_pages": 3});
    let mut state = PaginationState::new();

    let next = paginator.process_response(&body, 10, &mut state);

    assert!(next.is_continue());
    assert_eq!(state.page, 2);

    if let NextPage::Continue { query_params } = next {
        assert_eq!(query_params.get("page"), Some(&"2".to_string()));
    }
}

#[test]
fn test_page_paginator_stops_at_total_pages() {
    let paginator = page_paginator();
    let body = json!({"data": [], "total_pages": 2});
    let mut state = PaginationState::new();
    state.page = 2;

    let next = paginator.process_response(&body, 10, &mut state);
    assert!(next.is_done());
}

#[test]
fn test_page_paginator_stops_on_empty_without_total() {
    let paginator = page_paginator();
    let body = json!({"data": []});
    let mut state = PaginationState::new();

    let next = paginator.process_response(&body, 0, &mut state);
    assert!(next.is_done());
}

#[test]
fn test_page_paginator_empty_page_with_total_continues() {
    // When the server reports total_pages, emptiness alone does not stop the walk
    let paginator = page_paginator();
    let body = json!({"data": [], "total_pages": 5});
    let mut state = PaginationState::new();

    let next = paginator.process_response(&body, 0, &mut state);
    assert!(next.is_continue());
    assert_eq!(state.page, 2);
}

// ============================================================================
// Has-More Paginator Tests
// ============================================================================

#[test]
fn test_has_more_paginator_injects_nothing() {
    let paginator = HasMorePaginator {
        has_more_field: "has_more".to_string(),
    };
    let state = PaginationState::new();
    assert!(paginator.initial_params(&state).is_empty());
}

#[test]
fn test_has_more_paginator_flag_sequence() {
    let paginator = HasMorePaginator {
        has_more_field: "has_more".to_string(),
    };
    let mut state = PaginationState::new();

    let next = paginator.process_response(&json!({"has_more": true}), 10, &mut state);
    assert!(next.is_continue());

    let next = paginator.process_response(&json!({"has_more": true}), 10, &mut state);
    assert!(next.is_continue());

    let next = paginator.process_response(&json!({"has_more": false}), 3, &mut state);
    assert!(next.is_done());
    assert_eq!(state.requests, 3);
    assert_eq!(state.total_fetched, 23);
}

#[test]
fn test_has_more_paginator_missing_flag_stops() {
    let paginator = HasMorePaginator {
        has_more_field: "has_more".to_string(),
    };
    let mut state = PaginationState::new();

    let next = paginator.process_response(&json!({"data": []}), 10, &mut state);
    assert!(next.is_done());
}

// ============================================================================
// Config and helpers
// ============================================================================

#[test]
fn test_pagination_config_defaults() {
    let config = PaginationConfig::default();
    assert_eq!(config.strategy, PaginationStrategy::Offset);
    assert_eq!(config.limit_field, "limit");
    assert_eq!(config.offset_field, "offset");
    assert_eq!(config.page_field, "page");
    assert_eq!(config.has_more_field, "has_more");
    assert_eq!(config.records_field, "data");
    assert!(config.max_pages.is_none());
    assert!(config.max_items.is_none());
}

#[test]
fn test_pagination_config_builders() {
    let config = PaginationConfig::page()
        .with_page_field("p")
        .with_records_field("orders")
        .with_max_pages(3);

    assert_eq!(config.strategy, PaginationStrategy::Page);
    assert_eq!(config.page_field, "p");
    assert_eq!(config.records_field, "orders");
    assert_eq!(config.max_pages, Some(3));
}

#[test]
fn test_paginator_reads_limit_from_caller_params() {
    let config = PaginationConfig::offset().with_limit_field("max");
    let mut params = HashMap::new();
    params.insert("max".to_string(), "5".to_string());

    let paginator = config.paginator(&params);
    let body = json!({"data": []});
    let mut state = PaginationState::new();

    let _ = paginator.process_response(&body, 5, &mut state);
    assert_eq!(state.offset, 5);
}

#[test]
fn test_unknown_strategy_tag_rejected() {
    let result: Result<PaginationStrategy, _> = serde_json::from_value(json!("zigzag"));
    assert!(result.is_err());
}

#[test]
fn test_json_field_dot_path() {
    let body = json!({"pagination": {"total": 42}});
    assert_eq!(
        json_field(&body, "pagination.total").and_then(serde_json::Value::as_u64),
        Some(42)
    );
    assert!(json_field(&body, "pagination.missing").is_none());
}

#[test]
fn test_extract_records() {
    let body = json!({"orders": [{"id": 1}, {"id": 2}]});
    let records = extract_records(&body, "orders");
    assert_eq!(records.len(), 2);

    // Missing field reads as an empty page
    assert!(extract_records(&body, "items").is_empty());
}
