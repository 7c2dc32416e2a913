use sfutils::{SalesforceConfig, SalesforceUtils};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const ACCESS_TOKEN: &str = "00Dxx0000001gEF!AQcAQH0dMHZfz972Szmpkb58urFRkgeBGsxL";

/// Install a test-writer subscriber once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn token_response(access_token: &str, instance_url: &str) -> serde_json::Value {
    serde_json::json!({
        "access_token": access_token,
        "instance_url": instance_url,
        "id": "https://login.salesforce.com/id/00Dxx0000001gEFEAY/005xx000001SwiUAAS",
        "token_type": "Bearer",
        "issued_at": "1278448101416",
        "signature": "CMJ4l+CCaPQiKjoOEwEig9H4wqhpuLSk4J2urAe+fVg="
    })
}

pub fn config(base_url: &str) -> SalesforceConfig {
    SalesforceConfig::builder()
        .base_url(base_url)
        .api_version("55.0")
        .client_id("3MVG9-test-client")
        .client_secret("test-secret")
        .username("integration@example.com")
        .password("hunter2")
        .build()
        .expect("test config should validate")
}

/// Mount a token endpoint that always issues [`ACCESS_TOKEN`].
pub async fn mount_token_endpoint(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/services/oauth2/token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(token_response(ACCESS_TOKEN, &server.uri())),
        )
        .mount(server)
        .await;
}

/// A mock org plus an authenticated facade pointed at it.
pub async fn authenticated() -> (MockServer, SalesforceUtils) {
    init_tracing();
    let server = MockServer::start().await;
    mount_token_endpoint(&server).await;

    let sf = SalesforceUtils::new(config(&server.uri()), true)
        .await
        .expect("authentication against mock org should succeed");
    (server, sf)
}

pub fn bearer() -> String {
    format!("Bearer {ACCESS_TOKEN}")
}
