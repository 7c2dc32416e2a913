//! OAuth 2.0 username-password flow.

use sfutils_client::{SfHttpClient, UrlBuilder};
use tracing::{debug, instrument};

use crate::config::SalesforceConfig;
use crate::credentials::{CredentialStore, SalesforceCredentials};
use crate::error::Result;

/// Exchanges a username and password for an access token.
///
/// One POST per call and no retry. The credential parameters travel as query
/// parameters on `{base}/services/oauth2/token` with an empty body, and only
/// HTTP 200 is accepted.
#[derive(Debug, Clone)]
pub struct PasswordAuthenticator {
    http: SfHttpClient,
}

impl PasswordAuthenticator {
    /// Create an authenticator that sends through `http`.
    pub fn new(http: SfHttpClient) -> Self {
        Self { http }
    }

    /// Create an authenticator with its own transport built from the config.
    pub fn from_config(config: &SalesforceConfig) -> Result<Self> {
        Ok(Self::new(SfHttpClient::new(config.http().clone())?))
    }

    /// Request a token and return the issued credentials.
    ///
    /// The password and client secret are not logged.
    #[instrument(skip(self, config), fields(base_url = %config.base_url(), username = %config.username()))]
    pub async fn authenticate(&self, config: &SalesforceConfig) -> Result<SalesforceCredentials> {
        let token_url = UrlBuilder::new(config.base_url(), config.api_version()).token_endpoint();

        let request = self
            .http
            .post(token_url)
            .query("client_id", config.client_id())
            .query("client_secret", config.client_secret())
            .query("username", config.username())
            .query("password", config.password())
            .query("grant_type", config.grant_type());

        let response = self.http.execute(request).await?.expect_status(200).await?;
        let credentials: SalesforceCredentials = response.json().await?;

        debug!(instance_url = %credentials.instance_url(), "Authenticated");
        Ok(credentials)
    }

    /// Request a token and, only on success, replace the credentials in `store`.
    pub async fn authenticate_into(
        &self,
        config: &SalesforceConfig,
        store: &CredentialStore,
    ) -> Result<SalesforceCredentials> {
        let credentials = self.authenticate(config).await?;
        store.replace(credentials.clone());
        Ok(credentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use sfutils_client::AccessTokenSource;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(base_url: &str) -> SalesforceConfig {
        SalesforceConfig::builder()
            .base_url(base_url)
            .api_version("55.0")
            .client_id("my-client")
            .client_secret("my-secret")
            .username("user@example.com")
            .password("p&ss word")
            .grant_type("password")
            .build()
            .unwrap()
    }

    fn token_body() -> serde_json::Value {
        serde_json::json!({
            "access_token": "00Dxx!token",
            "instance_url": "https://na1.salesforce.com",
            "id": "https://login.salesforce.com/id/00Dxx/005xx",
            "token_type": "Bearer",
            "issued_at": "1700000000000",
            "signature": "sig"
        })
    }

    #[tokio::test]
    async fn test_password_grant_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/services/oauth2/token"))
            .and(query_param("client_id", "my-client"))
            .and(query_param("client_secret", "my-secret"))
            .and(query_param("username", "user@example.com"))
            .and(query_param("password", "p&ss word"))
            .and(query_param("grant_type", "password"))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_body()))
            .expect(1)
            .mount(&server)
            .await;

        let config = config(&server.uri());
        let auth = PasswordAuthenticator::from_config(&config).unwrap();
        let store = CredentialStore::new();

        let creds = auth.authenticate_into(&config, &store).await.unwrap();
        assert_eq!(creds.access_token(), "00Dxx!token");
        assert_eq!(creds.issued_at(), 1_700_000_000_000);
        assert_eq!(store.access_token().as_deref(), Some("00Dxx!token"));
    }

    #[tokio::test]
    async fn test_non_200_never_populates_store() {
        let server = MockServer::start().await;
        let body = r#"{"error":"invalid_grant","error_description":"authentication failure"}"#;
        Mock::given(method("POST"))
            .and(path("/services/oauth2/token"))
            .respond_with(ResponseTemplate::new(400).set_body_string(body))
            .mount(&server)
            .await;

        let config = config(&server.uri());
        let auth = PasswordAuthenticator::from_config(&config).unwrap();
        let store = CredentialStore::new();

        let err = auth.authenticate_into(&config, &store).await.unwrap_err();
        match &err.kind {
            ErrorKind::TokenRequest { status, body: raw } => {
                assert_eq!(*status, 400);
                assert_eq!(raw, body);
            }
            other => panic!("unexpected kind: {other:?}"),
        }
        assert_eq!(err.oauth_error().unwrap().error, "invalid_grant");
        assert!(!store.is_authenticated());
    }

    #[tokio::test]
    async fn test_other_success_status_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/services/oauth2/token"))
            .respond_with(ResponseTemplate::new(201).set_body_json(token_body()))
            .mount(&server)
            .await;

        let config = config(&server.uri());
        let auth = PasswordAuthenticator::from_config(&config).unwrap();
        let err = auth.authenticate(&config).await.unwrap_err();
        assert!(matches!(err.kind, ErrorKind::TokenRequest { status: 201, .. }));
    }

    #[tokio::test]
    async fn test_failed_reauth_keeps_previous_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let config = config(&server.uri());
        let auth = PasswordAuthenticator::from_config(&config).unwrap();
        let store = CredentialStore::with_credentials(SalesforceCredentials::new(
            "old-token",
            "https://na1.salesforce.com",
        ));

        assert!(auth.authenticate_into(&config, &store).await.is_err());
        assert_eq!(store.access_token().as_deref(), Some("old-token"));
    }

    #[tokio::test]
    async fn test_transport_failure() {
        let config = config("http://127.0.0.1:1");
        let auth = PasswordAuthenticator::from_config(&config).unwrap();
        let err = auth.authenticate(&config).await.unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Transport(_)), "{err:?}");
    }
}
