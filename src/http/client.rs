//! Authenticated HTTP request execution
//!
//! Wraps a reqwest client with:
//! - Base URL + endpoint joining
//! - Per-request auth header/query injection from an [`AuthStrategy`]
//! - A single transparent reauthentication retry on 401
//! - Error classification of non-2xx responses

use crate::auth::{build_strategy, AuthConfig, AuthStrategy};
use crate::error::{Error, Result};
use reqwest::{Client, Method, Response, StatusCode};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Request timeout
    pub timeout: Duration,
    /// Default headers for all requests
    pub default_headers: HashMap<String, String>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            default_headers: HashMap::new(),
            user_agent: format!("universal-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// Configuration for a single request
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    /// Query parameters
    pub query: HashMap<String, String>,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// Request body (JSON)
    pub body: Option<Value>,
}

impl RequestConfig {
    /// Create a new request config
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set JSON body
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// HTTP client bound to one base URL and one auth strategy
pub struct HttpClient {
    client: Client,
    base_url: String,
    auth: Box<dyn AuthStrategy>,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a new client with default configuration
    pub fn new(base_url: impl Into<String>, auth_config: AuthConfig) -> Self {
        Self::with_config(base_url, auth_config, HttpClientConfig::default())
    }

    /// Create a new client with custom configuration
    ///
    /// The same underlying reqwest client serves both API calls and token
    /// endpoint calls.
    pub fn with_config(
        base_url: impl Into<String>,
        auth_config: AuthConfig,
        config: HttpClientConfig,
    ) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()
            .expect("Failed to build HTTP client");

        let auth = build_strategy(auth_config, client.clone());

        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth,
            config,
        }
    }

    /// The normalized base URL (trailing slash stripped)
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Make an authenticated request
    ///
    /// Caller query parameters are overlaid with auth-derived parameters
    /// (auth wins on key collision). If the response is 401 and the active
    /// strategy supports refresh, the token is refreshed and the identical
    /// request is reissued exactly once; the second response is final.
    pub async fn request(
        &self,
        method: Method,
        endpoint: &str,
        config: RequestConfig,
    ) -> Result<Response> {
        let url = self.build_url(endpoint);

        let auth_data = self.auth.auth_data().await?;

        let mut final_params = config.query.clone();
        final_params.extend(auth_data.query_params);

        let mut response = self
            .send(
                method.clone(),
                &url,
                &config.headers,
                &auth_data.headers,
                &final_params,
                config.body.as_ref(),
            )
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED && self.auth.force_refresh().await? {
            warn!(%url, "received 401, retrying once with refreshed token");
            let auth_data = self.auth.auth_data().await?;
            response = self
                .send(
                    method,
                    &url,
                    &config.headers,
                    &auth_data.headers,
                    &final_params,
                    config.body.as_ref(),
                )
                .await?;
        }

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::http_status(status.as_u16(), body));
        }

        debug!(%url, status = status.as_u16(), "request succeeded");
        Ok(response)
    }

    /// Make a GET request and parse the JSON body
    pub async fn get(&self, endpoint: &str, params: &HashMap<String, String>) -> Result<Value> {
        let config = RequestConfig {
            query: params.clone(),
            ..RequestConfig::default()
        };
        let response = self.request(Method::GET, endpoint, config).await?;
        response.json().await.map_err(Error::Http)
    }

    /// Make a POST request with a JSON body and parse the JSON response
    pub async fn post(&self, endpoint: &str, body: Value) -> Result<Value> {
        let response = self
            .request(Method::POST, endpoint, RequestConfig::new().json(body))
            .await?;
        response.json().await.map_err(Error::Http)
    }

    /// Build and send one request
    async fn send(
        &self,
        method: Method,
        url: &str,
        headers: &HashMap<String, String>,
        auth_headers: &HashMap<String, String>,
        params: &HashMap<String, String>,
        body: Option<&Value>,
    ) -> Result<Response> {
        let mut req = self.client.request(method, url);

        for (key, value) in &self.config.default_headers {
            req = req.header(key.as_str(), value.as_str());
        }
        for (key, value) in headers {
            req = req.header(key.as_str(), value.as_str());
        }
        // Auth headers applied last so they win over caller headers
        for (key, value) in auth_headers {
            req = req.header(key.as_str(), value.as_str());
        }

        if !params.is_empty() {
            req = req.query(params);
        }

        if let Some(body) = body {
            req = req.json(body);
        }

        req.send().await.map_err(Error::Http)
    }

    /// Join base URL and endpoint with exactly one separating slash
    fn build_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
