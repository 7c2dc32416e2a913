//! Transport settings shared by every client built on one `SfHttpClient`.
//!
//! The library has no pooling, retry or caching policy of its own. Whatever is
//! set here is handed to `reqwest` when the transport is built, so a custom
//! `ClientConfig` is how callers swap in different timeouts or connection
//! limits for REST calls and Bulk result downloads alike.

use std::time::Duration;

use crate::error::{Error, ErrorKind, Result};

/// Settings for the underlying HTTP transport.
///
/// Defaults: 30s request timeout, 10s connect timeout, gzip/deflate accepted,
/// request logging on.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Upper bound for one whole round trip, body included.
    pub timeout: Duration,
    /// Upper bound for establishing the TCP/TLS connection.
    pub connect_timeout: Duration,
    /// How long an idle pooled connection to the org is kept.
    pub pool_idle_timeout: Duration,
    pub pool_max_idle_per_host: usize,
    /// Sent as `User-Agent` on every request, token requests included.
    pub user_agent: String,
    /// Ask the org for gzip/deflate encoded bodies.
    pub accept_compressed: bool,
    /// Emit `debug!`/`info!` events for each request and response.
    pub enable_tracing: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            pool_idle_timeout: Duration::from_secs(90),
            pool_max_idle_per_host: 10,
            user_agent: crate::USER_AGENT.to_string(),
            accept_compressed: true,
            enable_tracing: true,
        }
    }
}

impl ClientConfig {
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Reject settings `reqwest` would accept but that make every call fail.
    ///
    /// A zero timeout expires before any request can complete, and an empty
    /// user agent is refused by the org's edge.
    pub fn validate(&self) -> Result<()> {
        if self.timeout.is_zero() {
            return Err(Error::new(ErrorKind::Config("timeout must be non-zero".into())));
        }
        if self.connect_timeout.is_zero() {
            return Err(Error::new(ErrorKind::Config(
                "connect timeout must be non-zero".into(),
            )));
        }
        if self.user_agent.trim().is_empty() {
            return Err(Error::new(ErrorKind::Config("user agent must not be empty".into())));
        }
        Ok(())
    }
}

/// Fluent builder for [`ClientConfig`], starting from the defaults.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    pub fn with_pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.config.pool_idle_timeout = timeout;
        self
    }

    pub fn with_pool_max_idle(mut self, max: usize) -> Self {
        self.config.pool_max_idle_per_host = max;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Accept or refuse compressed response bodies.
    pub fn with_compression(mut self, enabled: bool) -> Self {
        self.config.accept_compressed = enabled;
        self
    }

    /// Turn per-request log events on or off.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.config.enable_tracing = enabled;
        self
    }

    pub fn build(self) -> ClientConfig {
        self.config
    }
}
