//! Authentication strategy implementations
//!
//! Each strategy computes the per-request [`AuthData`] bundle. The client
//! credentials strategy additionally manages a lazily fetched, cached bearer
//! token and supports forced refresh for the 401 retry path.

use super::types::{AuthConfig, AuthData, CachedToken, Location};
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

/// Default token lifetime when the token endpoint omits `expires_in`
const DEFAULT_EXPIRES_IN: i64 = 3600;

/// Pluggable authentication capability
///
/// Implementations return a fresh [`AuthData`] per request. Strategies that
/// hold a refreshable credential also implement [`force_refresh`], which the
/// request layer invokes exactly once after a 401 response.
///
/// [`force_refresh`]: AuthStrategy::force_refresh
#[async_trait]
pub trait AuthStrategy: Send + Sync {
    /// Compute headers and query parameters for an outgoing request
    ///
    /// May perform a token fetch as a side effect.
    async fn auth_data(&self) -> Result<AuthData>;

    /// Drop any cached credential and re-authenticate
    ///
    /// Returns `true` if a refresh happened. The default is `false`:
    /// refreshing is meaningless for static credentials, and the request
    /// layer uses the return value to decide whether a 401 retry is worth
    /// issuing.
    async fn force_refresh(&self) -> Result<bool> {
        Ok(false)
    }
}

/// Build the strategy matching an [`AuthConfig`]
///
/// Dispatch is exhaustive over the config enum; unrecognized auth types
/// never reach this point because they fail at deserialization.
pub fn build_strategy(config: AuthConfig, http_client: Client) -> Box<dyn AuthStrategy> {
    match config {
        AuthConfig::ApiKey {
            key,
            location,
            param_name,
            extra_headers,
        } => Box::new(ApiKeyAuth {
            key,
            location,
            param_name,
            extra_headers,
        }),
        AuthConfig::ClientCredentials {
            token_url,
            client_id,
            client_secret,
        } => Box::new(ClientCredentialsAuth::with_client(
            token_url,
            client_id,
            client_secret,
            http_client,
        )),
    }
}

// ============================================================================
// API Key
// ============================================================================

/// Static API key placed in a header or query parameter
#[derive(Debug, Clone)]
pub struct ApiKeyAuth {
    key: String,
    location: Location,
    param_name: String,
    extra_headers: HashMap<String, String>,
}

impl ApiKeyAuth {
    /// Create a new API key strategy
    pub fn new(
        key: impl Into<String>,
        location: Location,
        param_name: impl Into<String>,
        extra_headers: HashMap<String, String>,
    ) -> Self {
        Self {
            key: key.into(),
            location,
            param_name: param_name.into(),
            extra_headers,
        }
    }
}

#[async_trait]
impl AuthStrategy for ApiKeyAuth {
    async fn auth_data(&self) -> Result<AuthData> {
        match self.location {
            Location::Header => {
                let mut headers = HashMap::new();
                headers.insert(self.param_name.clone(), self.key.clone());
                headers.extend(self.extra_headers.clone());
                Ok(AuthData {
                    headers,
                    query_params: HashMap::new(),
                })
            }
            Location::Query => {
                let mut query_params = HashMap::new();
                query_params.insert(self.param_name.clone(), self.key.clone());
                Ok(AuthData {
                    headers: self.extra_headers.clone(),
                    query_params,
                })
            }
        }
    }
}

// ============================================================================
// OAuth2 Client Credentials
// ============================================================================

/// OAuth2 client credentials flow with token caching
///
/// The token is fetched lazily on first use and re-fetched once the cached
/// copy expires. Concurrent callers racing on an expired token are serialized
/// behind a write lock with a double-check, so at most one fetch is in flight.
pub struct ClientCredentialsAuth {
    token_url: String,
    client_id: String,
    client_secret: String,
    cached_token: RwLock<Option<CachedToken>>,
    http_client: Client,
}

impl ClientCredentialsAuth {
    /// Create a new client credentials strategy
    pub fn new(
        token_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self::with_client(token_url, client_id, client_secret, Client::new())
    }

    /// Create a strategy that reuses an existing HTTP client for token requests
    pub fn with_client(
        token_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        http_client: Client,
    ) -> Self {
        Self {
            token_url: token_url.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            cached_token: RwLock::new(None),
            http_client,
        }
    }

    /// Get a valid token, fetching one if necessary
    async fn get_or_fetch_token(&self) -> Result<String> {
        // Fast path: valid cached token
        {
            let cached = self.cached_token.read().await;
            if let Some(token) = cached.as_ref() {
                if !token.is_expired() {
                    return Ok(token.token.clone());
                }
            }
        }

        let mut cached = self.cached_token.write().await;

        // Double-check after acquiring write lock (another task might have refreshed)
        if let Some(token) = cached.as_ref() {
            if !token.is_expired() {
                return Ok(token.token.clone());
            }
        }

        let new_token = self.authenticate().await?;
        let token_str = new_token.token.clone();
        *cached = Some(new_token);

        Ok(token_str)
    }

    /// Fetch a new token from the token endpoint
    ///
    /// POSTs `grant_type=client_credentials` with HTTP Basic credentials.
    async fn authenticate(&self) -> Result<CachedToken> {
        debug!(token_url = %self.token_url, "fetching new access token");

        let response = self
            .http_client
            .post(&self.token_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(Error::Http)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::auth(format!(
                "Token request failed with status {}: {body}",
                status.as_u16()
            )));
        }

        let token_data: Value = response.json().await.map_err(Error::Http)?;

        let access_token = token_data
            .get("access_token")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::auth("Token response missing access_token"))?;
        let expires_in = token_data
            .get("expires_in")
            .and_then(Value::as_i64)
            .unwrap_or(DEFAULT_EXPIRES_IN);

        Ok(CachedToken::expires_in(access_token.to_string(), expires_in))
    }
}

#[async_trait]
impl AuthStrategy for ClientCredentialsAuth {
    async fn auth_data(&self) -> Result<AuthData> {
        let token = self.get_or_fetch_token().await?;
        Ok(AuthData::bearer(&token))
    }

    async fn force_refresh(&self) -> Result<bool> {
        debug!("forcing token refresh");

        let mut cached = self.cached_token.write().await;
        *cached = None;

        let new_token = match self.authenticate().await {
            Ok(token) => token,
            Err(Error::Auth { message }) => return Err(Error::token_refresh(message)),
            Err(e) => return Err(e),
        };
        *cached = Some(new_token);

        Ok(true)
    }
}

impl std::fmt::Debug for ClientCredentialsAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientCredentialsAuth")
            .field("token_url", &self.token_url)
            .field("client_id", &self.client_id)
            .finish_non_exhaustive()
    }
}
