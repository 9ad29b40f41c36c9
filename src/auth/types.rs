//! Auth configuration types
//!
//! `AuthConfig` is a tagged union keyed on `auth_type`, so an unrecognized
//! auth type is rejected when the configuration is deserialized, not when
//! the first request goes out.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Location for API key placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    /// Place in HTTP header
    #[default]
    Header,
    /// Place in query parameter
    Query,
}

fn default_param_name() -> String {
    "x-api-key".to_string()
}

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "auth_type", rename_all = "snake_case")]
pub enum AuthConfig {
    /// API key authentication (header or query)
    ApiKey {
        /// The API key value
        key: String,
        /// Where to place the API key
        #[serde(default)]
        location: Location,
        /// Header name or query parameter name carrying the key
        #[serde(default = "default_param_name")]
        param_name: String,
        /// Additional headers to include in every request
        #[serde(default)]
        extra_headers: HashMap<String, String>,
    },

    /// OAuth2 client credentials flow
    ClientCredentials {
        /// Token endpoint URL
        token_url: String,
        /// Client ID
        client_id: String,
        /// Client secret
        client_secret: String,
    },
}

impl AuthConfig {
    /// Parse an auth configuration from a JSON mapping
    ///
    /// An unrecognized `auth_type`, an invalid `location`, or a missing
    /// required field is a configuration error here, before any request
    /// goes out.
    pub fn from_json(value: serde_json::Value) -> crate::error::Result<Self> {
        serde_json::from_value(value)
            .map_err(|e| crate::error::Error::config(format!("Invalid auth configuration: {e}")))
    }
}

/// Ephemeral per-request auth material
///
/// Produced fresh by [`AuthStrategy::auth_data`](super::AuthStrategy::auth_data)
/// for every outgoing request and merged into it; never stored.
#[derive(Debug, Clone, Default)]
pub struct AuthData {
    /// Headers to add to the request
    pub headers: HashMap<String, String>,
    /// Query parameters to add to the request
    pub query_params: HashMap<String, String>,
}

impl AuthData {
    /// Auth data carrying a single bearer token header
    pub fn bearer(token: &str) -> Self {
        let mut headers = HashMap::new();
        headers.insert("Authorization".to_string(), format!("Bearer {token}"));
        Self {
            headers,
            query_params: HashMap::new(),
        }
    }
}

/// Cached token with expiration
#[derive(Debug, Clone)]
pub struct CachedToken {
    /// The access token
    pub token: String,
    /// When the token expires
    pub expires_at: DateTime<Utc>,
}

impl CachedToken {
    /// Create a token that expires in N seconds from now
    pub fn expires_in(token: String, seconds: i64) -> Self {
        Self {
            token,
            expires_at: Utc::now() + chrono::Duration::seconds(seconds),
        }
    }

    /// Check if the token is expired (with 30 second clock-skew buffer)
    pub fn is_expired(&self) -> bool {
        Utc::now() + chrono::Duration::seconds(30) >= self.expires_at
    }
}
