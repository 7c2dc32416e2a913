//! Salesforce REST API client.
//!
//! This client wraps `SalesforceClient` from `sfutils-client` and provides
//! typed methods for REST API operations: CRUD, Describe, Query,
//! Collections, Composite and Limits.

use std::sync::Arc;

use sfutils_client::{AccessTokenSource, ClientConfig, SalesforceClient, UrlBuilder};

use crate::error::Result;

mod collections;
mod composite;
mod crud;
mod limits;
mod query;

/// Salesforce REST API client.
///
/// Each method issues exactly one HTTP request and checks for the one status
/// code the endpoint returns on success.
///
/// # Example
///
/// ```rust,ignore
/// use sfutils_rest::{RawRecord, SalesforceRestClient};
///
/// let client = SalesforceRestClient::new("https://myorg.my.salesforce.com", token_source)?;
///
/// let created = client
///     .create("Account", &RawRecord::from_json(r#"{"Name":"New Account"}"#)?)
///     .await?;
///
/// let page = client.query::<RawRecord>("SELECT Id, Name FROM Account").await?;
/// ```
#[derive(Debug, Clone)]
pub struct SalesforceRestClient {
    client: SalesforceClient,
}

impl SalesforceRestClient {
    /// Create a new REST client for `base_url` with the given token source.
    pub fn new(base_url: impl Into<String>, token: Arc<dyn AccessTokenSource>) -> Result<Self> {
        let client = SalesforceClient::new(base_url, token)?;
        Ok(Self { client })
    }

    /// Create a new REST client with custom HTTP configuration.
    pub fn with_config(
        base_url: impl Into<String>,
        token: Arc<dyn AccessTokenSource>,
        config: ClientConfig,
    ) -> Result<Self> {
        let client = SalesforceClient::with_config(base_url, token, config)?;
        Ok(Self { client })
    }

    /// Create a REST client from an existing SalesforceClient.
    pub fn from_client(client: SalesforceClient) -> Self {
        Self { client }
    }

    /// Get the underlying SalesforceClient.
    pub fn inner(&self) -> &SalesforceClient {
        &self.client
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    /// Get the API version.
    pub fn api_version(&self) -> &str {
        self.client.api_version()
    }

    /// Set the API version.
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.client = self.client.with_api_version(version);
        self
    }

    fn urls(&self) -> &UrlBuilder {
        self.client.urls()
    }
}
