//! # sfutils-client
//!
//! Core HTTP client infrastructure for the Salesforce REST and Bulk APIs.
//!
//! This crate provides:
//! - A thin transport wrapper over `reqwest` (timeouts, compression, tracing)
//! - Pure URL builders for every endpoint the higher-level crates call
//! - `SalesforceClient`, which attaches the current bearer token to every request
//!
//! Every call is exactly one HTTP round trip. There is no retry, rate
//! limiting or caching; failures propagate to the caller unchanged.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Application Layer                        │
//! │  (sfutils-rest, sfutils-bulk)                               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   SalesforceClient                          │
//! │  - Holds base URL, API version + an AccessTokenSource       │
//! │  - Provides typed JSON methods (get_json, post_json, etc.)  │
//! │  - Attaches `Authorization: Bearer ...` on every request    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    SfHttpClient                             │
//! │  - One request, one response                                │
//! │  - Request building, status checks, response tracing        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use sfutils_client::{SalesforceClient, StaticToken};
//!
//! let client = SalesforceClient::new(
//!     "https://myorg.my.salesforce.com",
//!     StaticToken::shared("access_token"),
//! )?;
//!
//! let limits: serde_json::Value = client.get_json(&client.urls().limits()).await?;
//! ```

mod client;
mod config;
mod error;
mod request;
mod response;
mod salesforce_client;
mod token;
pub mod urls;

pub use client::SfHttpClient;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{Error, ErrorKind, Result};
pub use request::{RequestBuilder, RequestMethod};
pub use response::Response;
pub use salesforce_client::{QueryResult, SalesforceClient};
pub use token::{AccessTokenSource, StaticToken};
pub use urls::UrlBuilder;

/// Default Salesforce API version
pub const DEFAULT_API_VERSION: &str = "55.0";

/// User-Agent string for the client
pub const USER_AGENT: &str = concat!("sfutils-rs/", env!("CARGO_PKG_VERSION"));
