//! Access token lookup for outgoing requests.

use std::sync::Arc;

/// Source of the bearer token attached to every request.
///
/// [`SalesforceClient`](crate::SalesforceClient) asks for the token each time
/// it builds a request, so a source whose token is replaced (for example after
/// re-authentication) is picked up by every client sharing it.
pub trait AccessTokenSource: Send + Sync {
    /// The current access token, or `None` before authentication.
    fn access_token(&self) -> Option<String>;
}

/// A fixed access token.
#[derive(Clone)]
pub struct StaticToken(String);

impl StaticToken {
    /// Create a token source that always returns `token`.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Create a shareable token source, ready to hand to a client.
    pub fn shared(token: impl Into<String>) -> Arc<dyn AccessTokenSource> {
        Arc::new(Self::new(token))
    }
}

impl std::fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("StaticToken").field(&"[REDACTED]").finish()
    }
}

impl AccessTokenSource for StaticToken {
    fn access_token(&self) -> Option<String> {
        Some(self.0.clone())
    }
}
