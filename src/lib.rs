//! # sfutils
//!
//! A Salesforce REST and Bulk API client library for Rust.
//!
//! [`SalesforceUtils`] wires one validated [`SalesforceConfig`] to the
//! password-flow authenticator, a shared [`CredentialStore`], and the REST and
//! Bulk clients. Every client reads the bearer token from the store on each
//! request, so re-authenticating once updates all of them.
//!
//! ## Security
//!
//! - Sensitive data (tokens, secrets) are redacted in Debug output
//! - Tracing skips credential parameters and request bodies
//! - Error messages sanitize any credential data
//!
//! ## Crates
//!
//! - **sfutils-client** - HTTP transport, URL builder, bearer-authenticated JSON client
//! - **sfutils-auth** - Configuration, OAuth 2.0 password flow, credential store
//! - **sfutils-rest** - REST API: CRUD, Describe, Query, Collections, Composite, Limits
//! - **sfutils-bulk** - Bulk API 2.0 query jobs
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sfutils::{RawRecord, SalesforceConfig, SalesforceUtils};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SalesforceConfig::from_env()?;
//!     let sf = SalesforceUtils::new(config, true).await?;
//!
//!     let page = sf
//!         .rest()
//!         .query::<RawRecord>("SELECT Id, Name FROM Account LIMIT 10")
//!         .await?;
//!
//!     for record in &page.records {
//!         println!("{record}");
//!     }
//!
//!     Ok(())
//! }
//! ```

use std::sync::Arc;

use tracing::{info, instrument};

// Re-export all crates for convenient access
pub use sfutils_auth as auth;
#[cfg(feature = "bulk")]
pub use sfutils_bulk as bulk;
pub use sfutils_client as client;
#[cfg(feature = "rest")]
pub use sfutils_rest as rest;

// Re-export commonly used types at the top level
pub use sfutils_auth::{
    CredentialStore, PasswordAuthenticator, SalesforceConfig, SalesforceCredentials,
};
#[cfg(feature = "bulk")]
pub use sfutils_bulk::BulkApiClient;
pub use sfutils_client::{ClientConfig, SalesforceClient};
#[cfg(feature = "rest")]
pub use sfutils_rest::{RawRecord, SalesforceRestClient};

use sfutils_client::{AccessTokenSource, SfHttpClient, UrlBuilder};

/// One configured connection to an org.
///
/// All clients share a single transport and a single [`CredentialStore`].
/// Requests are routed to the configured `base_url`; the `instance_url` the
/// token endpoint returns is kept on the credentials for callers.
#[derive(Debug, Clone)]
pub struct SalesforceUtils {
    config: SalesforceConfig,
    credentials: CredentialStore,
    authenticator: PasswordAuthenticator,
    client: SalesforceClient,
    #[cfg(feature = "rest")]
    rest: SalesforceRestClient,
    #[cfg(feature = "bulk")]
    bulk: BulkApiClient,
}

impl SalesforceUtils {
    /// Build the clients for `config`, authenticating right away when
    /// `authenticate` is true.
    ///
    /// When `authenticate` is false no request is sent; call
    /// [`authenticate`](Self::authenticate) before using the clients.
    pub async fn new(config: SalesforceConfig, authenticate: bool) -> sfutils_auth::Result<Self> {
        let utils = Self::unauthenticated(config)?;
        if authenticate {
            utils.authenticate().await?;
        }
        Ok(utils)
    }

    /// Build the clients without contacting the platform.
    pub fn unauthenticated(config: SalesforceConfig) -> sfutils_auth::Result<Self> {
        let http = SfHttpClient::new(config.http().clone())?;
        let credentials = CredentialStore::new();
        let token: Arc<dyn AccessTokenSource> = Arc::new(credentials.clone());

        let client = SalesforceClient::from_parts(
            http.clone(),
            UrlBuilder::new(config.base_url(), config.api_version()),
            token,
        );

        Ok(Self {
            authenticator: PasswordAuthenticator::new(http),
            #[cfg(feature = "rest")]
            rest: SalesforceRestClient::from_client(client.clone()),
            #[cfg(feature = "bulk")]
            bulk: BulkApiClient::from_client(client.clone()),
            client,
            credentials,
            config,
        })
    }

    /// Run the password flow and replace the stored credentials.
    ///
    /// On failure the previous credentials, if any, are left in place.
    #[instrument(skip(self))]
    pub async fn authenticate(&self) -> sfutils_auth::Result<SalesforceCredentials> {
        let credentials = self
            .authenticator
            .authenticate_into(&self.config, &self.credentials)
            .await?;
        info!(instance_url = %credentials.instance_url(), "Salesforce session established");
        Ok(credentials)
    }

    /// The validated configuration.
    pub fn config(&self) -> &SalesforceConfig {
        &self.config
    }

    /// The shared credential store.
    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    /// Returns true once a token has been obtained.
    pub fn is_authenticated(&self) -> bool {
        self.credentials.is_authenticated()
    }

    /// The bearer-authenticated JSON client all API clients are built on.
    pub fn client(&self) -> &SalesforceClient {
        &self.client
    }

    /// REST API client.
    #[cfg(feature = "rest")]
    pub fn rest(&self) -> &SalesforceRestClient {
        &self.rest
    }

    /// Bulk API 2.0 client.
    #[cfg(feature = "bulk")]
    pub fn bulk(&self) -> &BulkApiClient {
        &self.bulk
    }
}
