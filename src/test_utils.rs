use crate::config::GatewayConfig;
use crate::create_app;
use crate::state::AppState;
use axum::body::Body;
use axum::response::Response;
use axum::Router;
use http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use log::LevelFilter;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tower::ServiceExt;
use wiremock::MockServer;

/// Test fixture wiring the full application against a wiremock identity
/// provider. Mount provider expectations on `provider_mock`, then drive
/// the router through `get`/`post`/`send`.
pub struct TestFixture {
    /// The application router
    pub app: Router,
    /// Configuration the app was built with
    pub config: GatewayConfig,
    /// Mock server standing in for the identity provider
    pub provider_mock: MockServer,
}

impl TestFixture {
    pub async fn new() -> Self {
        let _ = env_logger::builder()
            .filter_level(LevelFilter::Debug)
            .is_test(true)
            .try_init();

        let provider_mock = MockServer::start().await;
        let config = GatewayConfig::for_test_with_mock(&provider_mock);
        let state = AppState::new(config.clone());
        let app = create_app(state).await;

        Self {
            app,
            config,
            provider_mock,
        }
    }

    /// Sends a GET request to the specified URI
    pub async fn get(&self, uri: impl AsRef<str>) -> TestResponse {
        let request = Request::builder()
            .method(Method::GET)
            .uri(uri.as_ref())
            .body(Body::empty())
            .expect("Failed to build request");
        self.send(request).await
    }

    /// Sends a bodyless POST request to the specified URI
    pub async fn post(&self, uri: impl AsRef<str>) -> TestResponse {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri.as_ref())
            .body(Body::empty())
            .expect("Failed to build request");
        self.send(request).await
    }

    /// Sends a request and collects the response into a TestResponse
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.send_raw(request).await;
        let status = response.status();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read response body")
            .to_bytes();

        // Parse as JSON, defaulting to an empty object on empty bodies
        let json = if !body.is_empty() {
            serde_json::from_slice(&body).unwrap_or_else(|_| serde_json::json!({}))
        } else {
            serde_json::json!({})
        };

        TestResponse { status, json }
    }

    /// Sends a request and returns the raw response, for tests that
    /// need to inspect headers
    pub async fn send_raw(&self, request: Request<Body>) -> Response {
        self.app
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request")
    }
}

/// Response from a test request with convenient access to status and body
pub struct TestResponse {
    pub status: StatusCode,
    pub json: Value,
}

impl TestResponse {
    /// Asserts that the response has the expected status code
    pub fn assert_status(&self, expected: StatusCode) -> &Self {
        assert_eq!(
            self.status,
            expected,
            "Expected status {} but got {} with body: {}",
            expected,
            self.status,
            serde_json::to_string_pretty(&self.json).unwrap_or_default()
        );
        self
    }

    /// Asserts that the response status is OK (200)
    pub fn assert_ok(&self) -> &Self {
        self.assert_status(StatusCode::OK)
    }

    /// Deserializes the response body into the given type
    pub fn json_as<T: DeserializeOwned>(&self) -> T {
        serde_json::from_value(self.json.clone()).expect("Failed to deserialize response JSON")
    }
}
