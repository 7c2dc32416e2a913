//! Core HTTP client with compression and request tracing.

use tracing::{debug, info, instrument};

use crate::config::ClientConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::request::{RequestBuilder, RequestMethod};
use crate::response::Response;

/// HTTP client for Salesforce APIs.
///
/// Sends exactly one request per [`execute`](Self::execute) call. Status codes
/// are not interpreted here; callers check them with
/// [`Response::expect_status`].
#[derive(Debug, Clone)]
pub struct SfHttpClient {
    inner: reqwest::Client,
    config: ClientConfig,
}

impl SfHttpClient {
    /// Create a new HTTP client with the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .user_agent(&config.user_agent)
            .gzip(config.accept_compressed)
            .deflate(config.accept_compressed);

        let inner = builder
            .build()
            .map_err(|e| Error::with_source(ErrorKind::Config(e.to_string()), e))?;

        Ok(Self { inner, config })
    }

    /// Create a new HTTP client with default configuration.
    pub fn default_client() -> Result<Self> {
        Self::new(ClientConfig::default())
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Create a GET request builder.
    pub fn get(&self, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(RequestMethod::Get, url)
    }

    /// Create a POST request builder.
    pub fn post(&self, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(RequestMethod::Post, url)
    }

    /// Create a PATCH request builder.
    pub fn patch(&self, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(RequestMethod::Patch, url)
    }

    /// Create a DELETE request builder.
    pub fn delete(&self, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(RequestMethod::Delete, url)
    }

    /// Execute a request and return the response, whatever its status.
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    pub async fn execute(&self, request: RequestBuilder) -> Result<Response> {
        let mut req = self
            .inner
            .request(request.method.to_reqwest(), &request.url);

        if let Some(ref token) = request.bearer_token {
            req = req.bearer_auth(token);
        }

        for (name, value) in &request.headers {
            req = req.header(name.as_str(), value.as_str());
        }

        if !request.query_params.is_empty() {
            req = req.query(&request.query_params);
        }

        if let Some(body) = request.body {
            req = req.body(body);
        }

        if self.config.enable_tracing {
            debug!(method = %request.method, url = %request.url, "Sending request");
        }

        let response = req.send().await?;

        if self.config.enable_tracing {
            let status = response.status().as_u16();
            let content_length = response.content_length();

            if response.status().is_success() {
                debug!(status, content_length, "Response received");
            } else {
                info!(status, content_length, "Non-success response");
            }
        }

        Ok(Response::new(response))
    }
}
