//! High-level Salesforce client with typed HTTP methods.
//!
//! This module provides `SalesforceClient`, which combines a token source with
//! an HTTP client and provides typed JSON methods for API interactions.
//!
//! ## Security
//!
//! - Access tokens are never stored on the client and never appear in Debug output
//! - Request bodies are skipped in tracing spans

use std::sync::Arc;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::instrument;

use crate::client::SfHttpClient;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::request::{RequestBuilder, RequestMethod};
use crate::response::Response;
use crate::token::AccessTokenSource;
use crate::urls::UrlBuilder;
use crate::DEFAULT_API_VERSION;

/// High-level Salesforce API client.
///
/// Every request built through this client carries
/// `Authorization: Bearer {token}` with the token read from its
/// [`AccessTokenSource`] at build time. When the source has no token yet the
/// header is left off. It's designed to be used by the API-specific crates
/// (sfutils-rest, sfutils-bulk).
///
/// # Example
///
/// ```rust,ignore
/// use sfutils_client::{SalesforceClient, StaticToken};
///
/// let client = SalesforceClient::new("https://myorg.my.salesforce.com", StaticToken::shared(token))?
///     .with_api_version("62.0");
///
/// let limits: serde_json::Value = client.get_json(&client.urls().limits()).await?;
/// ```
#[derive(Clone)]
pub struct SalesforceClient {
    http: SfHttpClient,
    urls: UrlBuilder,
    token: Arc<dyn AccessTokenSource>,
}

impl std::fmt::Debug for SalesforceClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SalesforceClient")
            .field("base_url", &self.urls.base_url())
            .field("api_version", &self.urls.api_version())
            .field("access_token", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl SalesforceClient {
    /// Create a new Salesforce client for `base_url` using the default API version.
    pub fn new(base_url: impl Into<String>, token: Arc<dyn AccessTokenSource>) -> Result<Self> {
        Self::with_config(base_url, token, ClientConfig::default())
    }

    /// Create a new Salesforce client with custom transport configuration.
    ///
    /// Fails with [`ErrorKind::InvalidUrl`](crate::ErrorKind::InvalidUrl) when
    /// `base_url` does not parse.
    pub fn with_config(
        base_url: impl Into<String>,
        token: Arc<dyn AccessTokenSource>,
        config: ClientConfig,
    ) -> Result<Self> {
        let base_url = base_url.into();
        url::Url::parse(&base_url)?;

        let http = SfHttpClient::new(config)?;
        Ok(Self::from_parts(
            http,
            UrlBuilder::new(base_url, DEFAULT_API_VERSION),
            token,
        ))
    }

    /// Assemble a client from an existing transport, URL builder and token source.
    pub fn from_parts(http: SfHttpClient, urls: UrlBuilder, token: Arc<dyn AccessTokenSource>) -> Self {
        Self { http, urls, token }
    }

    /// Set the API version (e.g., "62.0").
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.urls = UrlBuilder::new(self.urls.base_url(), version);
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        self.urls.base_url()
    }

    /// Get the API version.
    pub fn api_version(&self) -> &str {
        self.urls.api_version()
    }

    /// Endpoint URL builder for this org and API version.
    pub fn urls(&self) -> &UrlBuilder {
        &self.urls
    }

    /// Returns true if the token source currently holds a token.
    pub fn has_token(&self) -> bool {
        self.token.access_token().is_some()
    }

    // =========================================================================
    // Base HTTP Methods (with authentication)
    // =========================================================================

    /// Create a request builder carrying the current bearer token.
    pub fn request(&self, method: RequestMethod, url: &str) -> RequestBuilder {
        let request = RequestBuilder::new(method, url);
        match self.token.access_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Create a GET request builder with authentication.
    pub fn get(&self, url: &str) -> RequestBuilder {
        self.request(RequestMethod::Get, url)
    }

    /// Create a POST request builder with authentication.
    pub fn post(&self, url: &str) -> RequestBuilder {
        self.request(RequestMethod::Post, url)
    }

    /// Create a PATCH request builder with authentication.
    pub fn patch(&self, url: &str) -> RequestBuilder {
        self.request(RequestMethod::Patch, url)
    }

    /// Create a DELETE request builder with authentication.
    pub fn delete(&self, url: &str) -> RequestBuilder {
        self.request(RequestMethod::Delete, url)
    }

    /// Execute a request and return the raw response, whatever its status.
    pub async fn execute(&self, request: RequestBuilder) -> Result<Response> {
        self.http.execute(request).await
    }

    /// Execute a request and require exactly `expected` as status code.
    pub async fn execute_expect(&self, request: RequestBuilder, expected: u16) -> Result<Response> {
        self.http.execute(request).await?.expect_status(expected).await
    }

    // =========================================================================
    // Typed JSON Methods
    // =========================================================================

    /// Execute a request, require `expected`, and deserialize the JSON body.
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        expected: u16,
    ) -> Result<T> {
        self.execute_expect(request, expected).await?.json().await
    }

    /// Execute a request and require `expected`, ignoring any body.
    pub async fn send_empty(&self, request: RequestBuilder, expected: u16) -> Result<()> {
        self.execute_expect(request, expected).await?;
        Ok(())
    }

    /// GET request with JSON response deserialization; requires HTTP 200.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        self.send_json(self.get(url), 200).await
    }

    /// POST request with JSON body and response; requires `expected`.
    #[instrument(skip(self, body), fields(url = %url))]
    pub async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
        expected: u16,
    ) -> Result<T> {
        let request = self.post(url).json(body)?;
        self.send_json(request, expected).await
    }
}

/// One page of a SOQL query.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult<T> {
    /// Total number of records matching the query, across all pages.
    pub total_size: u64,
    /// True when this is the last page.
    pub done: bool,
    /// Cursor for the next page, when `done` is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_records_url: Option<String>,
    /// Records on this page.
    pub records: Vec<T>,
}
