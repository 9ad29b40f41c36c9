//! HTTP client module
//!
//! Provides the authenticated request primitive underlying the client façade.
//!
//! # Features
//!
//! - **URL Joining**: base URL and endpoint merged with exactly one slash
//! - **Auth Injection**: headers and query params from the active strategy
//! - **401 Retry**: one reauthentication retry for refreshable auth schemes

mod client;

pub use client::{HttpClient, HttpClientConfig, RequestConfig};
