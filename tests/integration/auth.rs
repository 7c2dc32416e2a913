//! Configuration and authentication through the facade.

use super::common::{config, init_tracing, token_response, ACCESS_TOKEN};
use sfutils::auth::ErrorKind;
use sfutils::client::AccessTokenSource;
use sfutils::{SalesforceConfig, SalesforceUtils};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_new_with_authenticate_populates_store() {
    init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/services/oauth2/token"))
        .and(query_param("grant_type", "password"))
        .and(query_param("client_id", "3MVG9-test-client"))
        .and(query_param("client_secret", "test-secret"))
        .and(query_param("username", "integration@example.com"))
        .and(query_param("password", "hunter2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_response(
            ACCESS_TOKEN,
            "https://na1.salesforce.com",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let sf = SalesforceUtils::new(config(&server.uri()), true).await.unwrap();

    assert!(sf.is_authenticated());
    let creds = sf.credentials().current().unwrap();
    assert_eq!(creds.access_token(), ACCESS_TOKEN);
    assert_eq!(creds.instance_url(), "https://na1.salesforce.com");
    assert_eq!(creds.issued_at(), 1_278_448_101_416);
    // Requests still go to the configured base URL.
    assert_eq!(sf.client().base_url(), server.uri());
}

#[tokio::test]
async fn test_new_without_authenticate_sends_nothing() {
    init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let sf = SalesforceUtils::new(config(&server.uri()), false).await.unwrap();
    assert!(!sf.is_authenticated());
    assert!(sf.credentials().access_token().is_none());
    assert!(!sf.client().has_token());
}

#[tokio::test]
async fn test_rejected_login_leaves_store_empty() {
    init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/services/oauth2/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": "invalid_grant",
            "error_description": "authentication failure"
        })))
        .mount(&server)
        .await;

    let err = SalesforceUtils::new(config(&server.uri()), true).await.unwrap_err();
    assert!(matches!(err.kind, ErrorKind::TokenRequest { status: 400, .. }));
    assert_eq!(err.oauth_error().unwrap().error, "invalid_grant");

    let sf = SalesforceUtils::new(config(&server.uri()), false).await.unwrap();
    assert!(sf.authenticate().await.is_err());
    assert!(!sf.is_authenticated());
}

#[tokio::test]
async fn test_reauthenticate_replaces_token_for_every_client() {
    init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/services/oauth2/token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(token_response("first-token", &server.uri())),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/services/oauth2/token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(token_response("second-token", &server.uri())),
        )
        .mount(&server)
        .await;

    let sf = SalesforceUtils::new(config(&server.uri()), true).await.unwrap();
    assert_eq!(sf.credentials().access_token().as_deref(), Some("first-token"));

    Mock::given(method("GET"))
        .and(path("/services/data/v55.0/limits"))
        .and(header("Authorization", "Bearer second-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "DailyApiRequests": {"Max": 15000, "Remaining": 14000}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let rest = sf.rest().clone();
    sf.authenticate().await.unwrap();
    assert_eq!(sf.credentials().access_token().as_deref(), Some("second-token"));

    // A client cloned before re-authentication sends the new token.
    let limits = rest.limits().await.unwrap();
    assert_eq!(limits.daily_api_requests.remaining, 14000);
}

#[test]
fn test_config_validation_reports_every_field() {
    let err = SalesforceConfig::builder()
        .base_url("not a url")
        .api_version("55.0")
        .client_id("")
        .client_secret("s")
        .username("u")
        .password("p")
        .grant_type("password")
        .build()
        .unwrap_err();

    let fields: Vec<_> = err.field_errors().iter().map(|f| f.field).collect();
    assert_eq!(fields, vec!["base_url", "client_id"]);
}
