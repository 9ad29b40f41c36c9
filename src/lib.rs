//! # Universal API Client
//!
//! A generic HTTP API client for arbitrary REST APIs, with pluggable
//! authentication schemes and pluggable pagination strategies.
//!
//! ## Features
//!
//! - **Multiple Auth Types**: API key (header or query) and OAuth2 client
//!   credentials with lazy token caching and forced refresh
//! - **Smart Pagination**: offset/limit, page/per-page, and has-more-flag
//!   conventions, with configurable field names and caller-set limits
//! - **Transparent Reauthentication**: a single retry on 401 with a fresh
//!   bearer token, applied only to auth schemes where refresh is meaningful
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use universal_client::{ApiClient, AuthConfig, PaginationConfig, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let auth = AuthConfig::ClientCredentials {
//!         token_url: "https://auth.example.com/oauth/token".to_string(),
//!         client_id: "my-client".to_string(),
//!         client_secret: "my-secret".to_string(),
//!     };
//!
//!     let client = ApiClient::new("https://api.example.com", auth);
//!
//!     // Single request
//!     let order = client.get("/orders/42", &Default::default()).await?;
//!
//!     // Walk every page of a list endpoint
//!     let pagination = PaginationConfig::offset().with_records_field("orders");
//!     let orders = client.get_all("/orders", &Default::default(), &pagination).await?;
//!     println!("fetched {} orders", orders.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                       ApiClient                         │
//! │        get() → Value    post() → Value                  │
//! │        get_all(pagination) → Vec<Value>                 │
//! └─────────────────────────────────────────────────────────┘
//!                            │
//! ┌──────────────┬───────────┴────────────┬─────────────────┐
//! │     Auth     │         HTTP           │    Paginate     │
//! ├──────────────┼────────────────────────┼─────────────────┤
//! │ API Key      │ GET/POST               │ Offset/Limit    │
//! │ OAuth2 CC    │ 401 reauth retry       │ Page/PerPage    │
//! │ Token cache  │ Param/header merging   │ HasMore flag    │
//! └──────────────┴────────────────────────┴─────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

/// Error types for the client
pub mod error;

/// Authentication strategies
pub mod auth;

/// HTTP request execution
pub mod http;

/// Pagination strategies
pub mod pagination;

mod client;

pub use auth::{AuthConfig, AuthData, AuthStrategy, Location};
pub use client::ApiClient;
pub use error::{Error, Result};
pub use http::{HttpClient, HttpClientConfig, RequestConfig};
pub use pagination::{PaginationConfig, PaginationStrategy};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
