//! Client façade
//!
//! [`ApiClient`] composes the auth strategy, the HTTP request primitive, and
//! the pagination drive loop behind a small surface: `get`, `post`, `get_all`.

use crate::auth::AuthConfig;
use crate::error::Result;
use crate::http::{HttpClient, HttpClientConfig};
use crate::pagination::{extract_records, NextPage, PaginationConfig, PaginationState};
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

/// Universal API client
///
/// Bound to one base URL and one auth configuration for its lifetime.
///
/// ```rust,ignore
/// let client = ApiClient::new("https://api.example.com", auth);
/// let pagination = PaginationConfig::offset().with_records_field("orders");
/// let orders = client.get_all("/orders", &Default::default(), &pagination).await?;
/// ```
pub struct ApiClient {
    http: HttpClient,
}

impl ApiClient {
    /// Create a client with default HTTP configuration
    ///
    /// The base URL is normalized (trailing slash stripped). An invalid auth
    /// configuration never reaches this point: `AuthConfig` is a closed enum
    /// and unknown tags fail at deserialization.
    pub fn new(base_url: impl Into<String>, auth_config: AuthConfig) -> Self {
        Self {
            http: HttpClient::new(base_url, auth_config),
        }
    }

    /// Create a client with custom HTTP configuration
    pub fn with_config(
        base_url: impl Into<String>,
        auth_config: AuthConfig,
        config: HttpClientConfig,
    ) -> Self {
        Self {
            http: HttpClient::with_config(base_url, auth_config, config),
        }
    }

    /// The underlying HTTP client
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// GET an endpoint and parse the JSON response
    pub async fn get(&self, endpoint: &str, params: &HashMap<String, String>) -> Result<Value> {
        self.http.get(endpoint, params).await
    }

    /// POST a JSON body to an endpoint and parse the JSON response
    pub async fn post(&self, endpoint: &str, body: Value) -> Result<Value> {
        self.http.post(endpoint, body).await
    }

    /// Fetch every page of a list endpoint and return the accumulated items
    ///
    /// The strategy in `pagination` decides how parameters mutate between
    /// requests and when the walk terminates; `max_pages`/`max_items` bound
    /// it regardless of strategy. Any request error aborts the walk and
    /// discards accumulated items.
    pub async fn get_all(
        &self,
        endpoint: &str,
        params: &HashMap<String, String>,
        pagination: &PaginationConfig,
    ) -> Result<Vec<Value>> {
        let mut results = Vec::new();
        let mut params = params.clone();
        let mut state = PaginationState::new();

        let paginator = pagination.paginator(&params);
        params.extend(paginator.initial_params(&state));

        loop {
            if let Some(max_pages) = pagination.max_pages {
                if state.requests >= max_pages {
                    debug!(endpoint, max_pages, "page limit reached, stopping");
                    break;
                }
            }

            let body = self.http.get(endpoint, &params).await?;

            let records = extract_records(&body, &pagination.records_field);
            let records_count = records.len();
            results.extend(records);

            let next = paginator.process_response(&body, records_count, &mut state);

            debug!(
                endpoint,
                page = state.requests,
                fetched = records_count,
                total = results.len(),
                "fetched page"
            );

            if let Some(max_items) = pagination.max_items {
                if results.len() >= max_items {
                    results.truncate(max_items);
                    debug!(endpoint, max_items, "item limit reached, stopping");
                    break;
                }
            }

            match next {
                NextPage::Continue { query_params } => params.extend(query_params),
                NextPage::Done => break,
            }
        }

        Ok(results)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("http", &self.http)
            .finish()
    }
}
