//! HTTP request building.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::Result;

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl RequestMethod {
    /// Convert to reqwest::Method.
    pub fn to_reqwest(&self) -> reqwest::Method {
        match self {
            RequestMethod::Get => reqwest::Method::GET,
            RequestMethod::Post => reqwest::Method::POST,
            RequestMethod::Patch => reqwest::Method::PATCH,
            RequestMethod::Delete => reqwest::Method::DELETE,
        }
    }

    /// The method name as it appears on the wire (and in composite subrequests).
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestMethod::Get => "GET",
            RequestMethod::Post => "POST",
            RequestMethod::Patch => "PATCH",
            RequestMethod::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for RequestMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builder for HTTP requests.
#[derive(Debug)]
pub struct RequestBuilder {
    pub(crate) method: RequestMethod,
    pub(crate) url: String,
    pub(crate) headers: HashMap<String, String>,
    pub(crate) query_params: Vec<(String, String)>,
    pub(crate) body: Option<String>,
    pub(crate) bearer_token: Option<String>,
}

impl RequestBuilder {
    /// Create a new request builder.
    pub fn new(method: RequestMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            query_params: Vec::new(),
            body: None,
            bearer_token: None,
        }
    }

    /// The request method.
    pub fn method(&self) -> RequestMethod {
        self.method
    }

    /// The request URL, without any query parameters added via [`Self::query`].
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Set the bearer token for authentication.
    pub fn bearer_auth(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    /// Add a header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Add a query parameter (form-encoded when sent).
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.push((name.into(), value.into()));
        self
    }

    /// Serialize `body` as the JSON request body.
    pub fn json<T: Serialize + ?Sized>(self, body: &T) -> Result<Self> {
        let text = serde_json::to_string(body)?;
        Ok(self.raw_json(text))
    }

    /// Use an already serialized JSON document as the request body.
    ///
    /// The text is sent byte for byte; it is not parsed or re-encoded.
    pub fn raw_json(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self.headers
            .insert("Content-Type".to_string(), "application/json".to_string());
        self
    }

    /// Set the Accept header.
    pub fn accept(mut self, content_type: impl Into<String>) -> Self {
        self.headers
            .insert("Accept".to_string(), content_type.into());
        self
    }
}
