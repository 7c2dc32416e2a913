//! HTTP response handling with Salesforce-specific extensions.

use std::sync::OnceLock;

use regex_lite::Regex;
use serde::de::DeserializeOwned;

use crate::error::{Error, ErrorKind, Result};

/// Wrapper around HTTP response with additional functionality.
#[derive(Debug)]
pub struct Response {
    inner: reqwest::Response,
}

impl Response {
    pub(crate) fn new(inner: reqwest::Response) -> Self {
        Self { inner }
    }

    /// Get the HTTP status code.
    pub fn status(&self) -> u16 {
        self.inner.status().as_u16()
    }

    /// Returns true if the response status is successful (2xx).
    pub fn is_success(&self) -> bool {
        self.inner.status().is_success()
    }

    /// Require an exact status code.
    ///
    /// On a mismatch the body is read and carried verbatim in
    /// [`ErrorKind::Api`](crate::ErrorKind::Api).
    pub async fn expect_status(self, expected: u16) -> Result<Self> {
        let status = self.status();
        if status == expected {
            return Ok(self);
        }

        Err(api_error(status, self.text().await))
    }

    /// Get a header value.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.inner.headers().get(name)?.to_str().ok()
    }

    /// Get the Sforce-Locator header (used for Bulk API pagination).
    pub fn sforce_locator(&self) -> Option<&str> {
        self.header("sforce-locator")
    }

    /// Get the Sforce-NumberOfRecords header as a number.
    ///
    /// Missing or non-numeric values read as `None`.
    pub fn sforce_number_of_records(&self) -> Option<u64> {
        self.header("sforce-numberofrecords")?.trim().parse().ok()
    }

    /// Get the response body as text.
    pub async fn text(self) -> Result<String> {
        self.inner.text().await.map_err(Into::into)
    }

    /// Get the response body as bytes.
    pub async fn bytes(self) -> Result<bytes::Bytes> {
        self.inner.bytes().await.map_err(Into::into)
    }

    /// Deserialize the response body as JSON.
    pub async fn json<T: DeserializeOwned>(self) -> Result<T> {
        let body = self.inner.bytes().await?;
        serde_json::from_slice(&body).map_err(Into::into)
    }
}

/// Build the error for an unexpected status from the body read result.
///
/// When the body cannot be read the error carries an empty body and the read
/// failure as its source.
fn api_error(status: u16, body: Result<String>) -> Error {
    match body {
        Ok(body) => Error::api(status, body),
        Err(read_err) => Error::with_source(
            ErrorKind::Api {
                status,
                body: String::new(),
            },
            read_err,
        ),
    }
}

fn token_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    // Access tokens: 15 or 18 char org id, "!", then the session part
    PATTERN
        .get_or_init(|| Regex::new(r"00[A-Za-z0-9]{13,}[!][A-Za-z0-9_.]+").ok())
        .as_ref()
}

fn session_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"sid=[A-Za-z0-9]{20,}").ok())
        .as_ref()
}

/// Sanitize an error message before it is rendered.
///
/// Redacts anything shaped like an access token or session id and truncates
/// to 500 characters.
pub(crate) fn sanitize_error_message(message: &str) -> String {
    const MAX_LENGTH: usize = 500;

    let mut sanitized = message.to_string();

    if let Some(pattern) = token_pattern() {
        sanitized = pattern
            .replace_all(&sanitized, "[REDACTED_TOKEN]")
            .into_owned();
    }

    if let Some(pattern) = session_pattern() {
        sanitized = pattern
            .replace_all(&sanitized, "sid=[REDACTED]")
            .into_owned();
    }

    if let Some((cut, _)) = sanitized.char_indices().nth(MAX_LENGTH) {
        sanitized.truncate(cut);
        sanitized.push_str("...[truncated]");
    }

    sanitized
}
