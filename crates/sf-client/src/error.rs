//! Error types for sfutils-client.

use crate::response::sanitize_error_message;

/// Result type alias for sfutils-client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for sfutils-client operations.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    /// Create an API error for an unexpected status code.
    pub fn api(status: u16, body: impl Into<String>) -> Self {
        Self::new(ErrorKind::Api {
            status,
            body: body.into(),
        })
    }

    /// Returns the HTTP status code if the platform answered.
    pub fn status(&self) -> Option<u16> {
        match &self.kind {
            ErrorKind::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the raw response body of an API error.
    pub fn body(&self) -> Option<&str> {
        match &self.kind {
            ErrorKind::Api { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Returns true if the platform rejected the bearer token (HTTP 401).
    ///
    /// The library never re-authenticates on its own; callers use this to
    /// decide when to call `authenticate` again.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Returns true if the request never completed (DNS, connect, timeout).
    pub fn is_transport(&self) -> bool {
        matches!(self.kind, ErrorKind::Transport(_) | ErrorKind::Timeout)
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// The request completed but the status code was not the expected one.
    ///
    /// `body` holds the raw response body verbatim; only the rendered message
    /// is sanitized.
    #[error("unexpected status code: {status} with body: {}", sanitize_error_message(.body))]
    Api { status: u16, body: String },

    /// The HTTP call itself failed (DNS, connection refused, TLS, ...).
    #[error("Transport error: {0}")]
    Transport(String),

    /// Request timeout.
    #[error("Request timeout")]
    Timeout,

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Other error.
    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            ErrorKind::Timeout
        } else if err.is_decode() {
            ErrorKind::Json(err.to_string())
        } else if err.is_builder() {
            ErrorKind::InvalidUrl(err.to_string())
        } else {
            ErrorKind::Transport(err.to_string())
        };

        Error::with_source(kind, err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Json(err.to_string()), err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::with_source(ErrorKind::InvalidUrl(err.to_string()), err)
    }
}
