//! Authentication module
//!
//! Supports: API Key (header or query) and OAuth2 client credentials.
//!
//! Each [`AuthStrategy`] produces a per-request bundle of headers and query
//! parameters. The client credentials strategy lazily fetches and caches a
//! bearer token, and can be force-refreshed by the request layer when the
//! remote API answers 401.

mod strategies;
mod types;

pub use strategies::{build_strategy, ApiKeyAuth, AuthStrategy, ClientCredentialsAuth};
pub use types::{AuthConfig, AuthData, CachedToken, Location};
