//! # sfutils-auth
//!
//! Salesforce authentication: connection configuration, the OAuth 2.0
//! username-password flow, and the credential store shared by every client.
//!
//! ## Security
//!
//! - Passwords, client secrets and tokens are redacted in Debug output
//! - Tracing skips credential parameters
//! - Token endpoint failures keep the raw body on the error but never print it
//!
//! ## Example
//!
//! ```rust,ignore
//! use sfutils_auth::{CredentialStore, PasswordAuthenticator, SalesforceConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), sfutils_auth::Error> {
//!     // SALESFORCE_BASE_URL, SALESFORCE_CLIENT_ID, ...
//!     let config = SalesforceConfig::from_env()?;
//!
//!     let store = CredentialStore::new();
//!     PasswordAuthenticator::from_config(&config)?
//!         .authenticate_into(&config, &store)
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

mod config;
mod credentials;
mod error;
mod oauth;

pub use config::{
    SalesforceConfig, SalesforceConfigBuilder, DEFAULT_GRANT_TYPE, ENV_API_VERSION, ENV_BASE_URL,
    ENV_CLIENT_ID, ENV_CLIENT_SECRET, ENV_GRANT_TYPE, ENV_PASSWORD, ENV_USERNAME,
};
pub use credentials::{CredentialStore, SalesforceCredentials};
pub use error::{Error, ErrorKind, FieldError, OAuthError, Result};
pub use oauth::PasswordAuthenticator;
