//! Error types for sfutils-auth.
//!
//! Error messages are designed to avoid exposing sensitive credential data.

use serde::Deserialize;

/// Result type alias for sfutils-auth operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for sfutils-auth operations.
///
/// Error messages never include passwords, client secrets or tokens.
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

    /// Fields rejected by configuration validation, if this is a validation error.
    pub fn field_errors(&self) -> &[FieldError] {
        match &self.kind {
            ErrorKind::InvalidConfig(fields) => fields,
            _ => &[],
        }
    }

    /// The OAuth error carried by a failed token request, when the body holds one.
    pub fn oauth_error(&self) -> Option<OAuthError> {
        match &self.kind {
            ErrorKind::TokenRequest { body, .. } => serde_json::from_str(body).ok(),
            _ => None,
        }
    }
}

/// One configuration field that failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Configuration field name, e.g. `"client_secret"`.
    pub field: &'static str,
    /// Why the value was rejected.
    pub reason: String,
}

impl FieldError {
    pub(crate) fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.field, self.reason)
    }
}

/// OAuth error response from the token endpoint.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct OAuthError {
    pub error: String,
    #[serde(default)]
    pub error_description: String,
}

fn join_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// One or more configuration fields are missing or malformed.
    #[error("Invalid configuration: {}", join_fields(.0))]
    InvalidConfig(Vec<FieldError>),

    /// The token endpoint answered with something other than HTTP 200.
    ///
    /// `body` is the raw response body.
    #[error("Token request failed with status {status}")]
    TokenRequest { status: u16, body: String },

    /// The token request never completed (DNS, connect, timeout).
    #[error("Transport error: {0}")]
    Transport(String),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(String),

    /// HTTP client error.
    #[error("HTTP error: {0}")]
    Http(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Json(err.to_string()), err)
    }
}

impl From<sfutils_client::Error> for Error {
    fn from(err: sfutils_client::Error) -> Self {
        use sfutils_client::ErrorKind as ClientKind;

        let kind = match &err.kind {
            ClientKind::Api { status, body } => ErrorKind::TokenRequest {
                status: *status,
                body: body.clone(),
            },
            ClientKind::Transport(_) | ClientKind::Timeout => {
                ErrorKind::Transport(err.kind.to_string())
            }
            ClientKind::Json(msg) => ErrorKind::Json(msg.clone()),
            _ => ErrorKind::Http(err.kind.to_string()),
        };
        Error::with_source(kind, err)
    }
}
