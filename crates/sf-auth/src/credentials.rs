//! Credentials returned by the token endpoint and the store that holds them.
//!
//! All credential types implement custom Debug to redact sensitive data.

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sfutils_client::AccessTokenSource;

/// Credentials issued by a successful OAuth token exchange.
///
/// `access_token` and `signature` are redacted in Debug output to prevent
/// accidental exposure in logs.
#[derive(Clone, Deserialize, Serialize)]
pub struct SalesforceCredentials {
    access_token: String,
    #[serde(default)]
    instance_url: String,
    #[serde(default)]
    id: String,
    #[serde(default)]
    token_type: String,
    #[serde(default, with = "epoch_millis")]
    issued_at: i64,
    #[serde(default)]
    signature: String,
}

impl std::fmt::Debug for SalesforceCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SalesforceCredentials")
            .field("access_token", &"[REDACTED]")
            .field("instance_url", &self.instance_url)
            .field("id", &self.id)
            .field("token_type", &self.token_type)
            .field("issued_at", &self.issued_at)
            .field("signature", &"[REDACTED]")
            .finish()
    }
}

impl SalesforceCredentials {
    /// Create credentials from an access token and instance URL.
    pub fn new(access_token: impl Into<String>, instance_url: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            instance_url: instance_url.into(),
            id: String::new(),
            token_type: "Bearer".to_string(),
            issued_at: Utc::now().timestamp_millis(),
            signature: String::new(),
        }
    }

    /// The bearer token.
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Instance URL reported by the token endpoint.
    pub fn instance_url(&self) -> &str {
        &self.instance_url
    }

    /// Identity URL of the authenticated user.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Token type, normally `"Bearer"`.
    pub fn token_type(&self) -> &str {
        &self.token_type
    }

    /// Issue time in milliseconds since the Unix epoch.
    pub fn issued_at(&self) -> i64 {
        self.issued_at
    }

    /// Issue time as a UTC timestamp.
    pub fn issued_at_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.issued_at)
    }

    /// Signature over `id` and `issued_at`.
    pub fn signature(&self) -> &str {
        &self.signature
    }
}

/// `issued_at` is a string of epoch milliseconds on the wire.
mod epoch_millis {
    use super::*;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Millis {
        Text(String),
        Number(i64),
    }

    pub fn serialize<S: Serializer>(value: &i64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        match Millis::deserialize(deserializer)? {
            Millis::Number(n) => Ok(n),
            Millis::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
        }
    }
}

/// Shared holder for the current credentials.
///
/// Cloning is cheap and every clone sees the same credentials. Writes replace
/// the whole record under a write lock, so readers never observe a partial
/// update. Staleness is not tracked: a token stays in the store until it is
/// replaced or cleared.
#[derive(Clone, Default)]
pub struct CredentialStore {
    inner: Arc<RwLock<Option<SalesforceCredentials>>>,
}

impl std::fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialStore")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

impl CredentialStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `credentials`.
    pub fn with_credentials(credentials: SalesforceCredentials) -> Self {
        let store = Self::new();
        store.replace(credentials);
        store
    }

    /// A copy of the current credentials.
    pub fn current(&self) -> Option<SalesforceCredentials> {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Replace the credentials wholesale.
    pub fn replace(&self, credentials: SalesforceCredentials) {
        *self
            .inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(credentials);
    }

    /// Drop the stored credentials.
    pub fn clear(&self) {
        *self
            .inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
    }

    /// Returns true once credentials have been stored.
    pub fn is_authenticated(&self) -> bool {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .is_some()
    }
}

impl AccessTokenSource for CredentialStore {
    fn access_token(&self) -> Option<String> {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .as_ref()
            .map(|creds| creds.access_token.clone())
    }
}
