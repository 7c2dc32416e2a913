//! Connection configuration and validation.

use sfutils_client::{ClientConfig, DEFAULT_API_VERSION};

use crate::error::{Error, ErrorKind, FieldError, Result};

/// Environment variable for the login/base URL.
pub const ENV_BASE_URL: &str = "SALESFORCE_BASE_URL";
/// Environment variable for the API version.
pub const ENV_API_VERSION: &str = "SALESFORCE_API_VERSION";
/// Environment variable for the connected app consumer key.
pub const ENV_CLIENT_ID: &str = "SALESFORCE_CLIENT_ID";
/// Environment variable for the connected app consumer secret.
pub const ENV_CLIENT_SECRET: &str = "SALESFORCE_CLIENT_SECRET";
/// Environment variable for the username.
pub const ENV_USERNAME: &str = "SALESFORCE_USERNAME";
/// Environment variable for the password (including any security token suffix).
pub const ENV_PASSWORD: &str = "SALESFORCE_PASSWORD";
/// Environment variable for the OAuth grant type.
pub const ENV_GRANT_TYPE: &str = "SALESFORCE_GRANT_TYPE";

/// Default OAuth grant type.
pub const DEFAULT_GRANT_TYPE: &str = "password";

/// Validated connection configuration.
///
/// Only constructed through [`SalesforceConfigBuilder::build`] or
/// [`SalesforceConfig::from_env`], so every instance has passed validation.
/// `client_secret` and `password` are redacted in Debug output.
#[derive(Clone)]
pub struct SalesforceConfig {
    base_url: String,
    api_version: String,
    client_id: String,
    client_secret: String,
    username: String,
    password: String,
    grant_type: String,
    http: ClientConfig,
}

impl std::fmt::Debug for SalesforceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SalesforceConfig")
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("grant_type", &self.grant_type)
            .field("http", &self.http)
            .finish()
    }
}

impl SalesforceConfig {
    /// Start building a configuration.
    pub fn builder() -> SalesforceConfigBuilder {
        SalesforceConfigBuilder::default()
    }

    /// Load the configuration from `SALESFORCE_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::builder().build()
    }

    /// Base URL, without trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// API version, e.g. `"55.0"`.
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// OAuth client id.
    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub(crate) fn client_secret(&self) -> &str {
        &self.client_secret
    }

    /// Username used for the password grant.
    pub fn username(&self) -> &str {
        &self.username
    }

    pub(crate) fn password(&self) -> &str {
        &self.password
    }

    /// OAuth grant type.
    pub fn grant_type(&self) -> &str {
        &self.grant_type
    }

    /// Transport configuration used for every client built from this config.
    pub fn http(&self) -> &ClientConfig {
        &self.http
    }
}

/// Builder for [`SalesforceConfig`].
///
/// Fields left unset are read from the environment when
/// [`build`](Self::build) runs; `api_version` and `grant_type` then fall back
/// to `"55.0"` and `"password"`.
#[derive(Default)]
pub struct SalesforceConfigBuilder {
    base_url: Option<String>,
    api_version: Option<String>,
    client_id: Option<String>,
    client_secret: Option<String>,
    username: Option<String>,
    password: Option<String>,
    grant_type: Option<String>,
    http: Option<ClientConfig>,
}

impl std::fmt::Debug for SalesforceConfigBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SalesforceConfigBuilder")
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("client_id", &self.client_id)
            .field("client_secret", &self.client_secret.as_ref().map(|_| "[REDACTED]"))
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("grant_type", &self.grant_type)
            .finish_non_exhaustive()
    }
}

impl SalesforceConfigBuilder {
    pub fn base_url(mut self, value: impl Into<String>) -> Self {
        self.base_url = Some(value.into());
        self
    }

    pub fn api_version(mut self, value: impl Into<String>) -> Self {
        self.api_version = Some(value.into());
        self
    }

    pub fn client_id(mut self, value: impl Into<String>) -> Self {
        self.client_id = Some(value.into());
        self
    }

    pub fn client_secret(mut self, value: impl Into<String>) -> Self {
        self.client_secret = Some(value.into());
        self
    }

    pub fn username(mut self, value: impl Into<String>) -> Self {
        self.username = Some(value.into());
        self
    }

    pub fn password(mut self, value: impl Into<String>) -> Self {
        self.password = Some(value.into());
        self
    }

    pub fn grant_type(mut self, value: impl Into<String>) -> Self {
        self.grant_type = Some(value.into());
        self
    }

    /// Use a custom transport configuration (timeouts, compression, user agent).
    pub fn http_config(mut self, config: ClientConfig) -> Self {
        self.http = Some(config);
        self
    }

    /// Fill unset fields from the environment and validate.
    pub fn build(self) -> Result<SalesforceConfig> {
        self.build_with(|name| std::env::var(name).ok())
    }

    /// Fill unset fields from `lookup` and validate.
    ///
    /// Validation collects every problem before failing, so the returned
    /// [`ErrorKind::InvalidConfig`] names all bad fields at once.
    fn build_with(self, lookup: impl Fn(&str) -> Option<String>) -> Result<SalesforceConfig> {
        let pick = |value: Option<String>, env: &str| value.or_else(|| lookup(env)).unwrap_or_default();

        let config = SalesforceConfig {
            base_url: pick(self.base_url, ENV_BASE_URL)
                .trim()
                .trim_end_matches('/')
                .to_string(),
            api_version: self
                .api_version
                .or_else(|| lookup(ENV_API_VERSION))
                .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
            client_id: pick(self.client_id, ENV_CLIENT_ID),
            client_secret: pick(self.client_secret, ENV_CLIENT_SECRET),
            username: pick(self.username, ENV_USERNAME),
            password: pick(self.password, ENV_PASSWORD),
            grant_type: self
                .grant_type
                .or_else(|| lookup(ENV_GRANT_TYPE))
                .unwrap_or_else(|| DEFAULT_GRANT_TYPE.to_string()),
            http: self.http.unwrap_or_default(),
        };

        let problems = validate(&config);
        if problems.is_empty() {
            Ok(config)
        } else {
            Err(Error::new(ErrorKind::InvalidConfig(problems)))
        }
    }
}

fn validate(config: &SalesforceConfig) -> Vec<FieldError> {
    let mut problems = Vec::new();

    if config.base_url.is_empty() {
        problems.push(FieldError::new("base_url", "is required"));
    } else {
        match url::Url::parse(&config.base_url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
            Ok(parsed) => problems.push(FieldError::new(
                "base_url",
                format!("must use http or https, not {}", parsed.scheme()),
            )),
            Err(e) => problems.push(FieldError::new(
                "base_url",
                format!("is not a valid URL ({e})"),
            )),
        }
    }

    let required = [
        ("api_version", &config.api_version),
        ("client_id", &config.client_id),
        ("client_secret", &config.client_secret),
        ("username", &config.username),
        ("password", &config.password),
        ("grant_type", &config.grant_type),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            problems.push(FieldError::new(field, "is required"));
        }
    }

    problems
}
