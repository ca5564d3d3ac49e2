//! Test application factory for integration tests.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

use loglens::models::AppConfig;
use loglens::server::{build_router, create_app_state, create_app_state_with_codec, AppState};
use loglens::services::{ImageCodec, ImageLogTransformer};

/// Test application with router and direct access to services
pub struct TestApp {
    router: axum::Router,
    pub transformer: Arc<ImageLogTransformer>,
}

impl TestApp {
    /// Create a new test application with default configuration
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// Create a test application with custom configuration
    pub fn with_config(config: AppConfig) -> Self {
        Self::from_state(create_app_state(config))
    }

    /// Create a test application around a custom codec
    pub fn with_codec(codec: Arc<dyn ImageCodec>) -> Self {
        Self::from_state(create_app_state_with_codec(AppConfig::default(), codec))
    }

    fn from_state(state: AppState) -> Self {
        // Keep references for test assertions
        let transformer = state.transformer.clone();

        // Build router using shared server module (same as production)
        let router = build_router(state);

        Self {
            router,
            transformer,
        }
    }

    /// Make a GET request to the given path
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Request::get(path).body(Body::empty()).unwrap())
            .await
    }

    /// Make a POST request with JSON body
    pub async fn post_json(&self, path: &str, body: &str) -> TestResponse {
        let request = Request::post(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.request(request).await
    }

    /// POST a transform request built from its parts
    pub async fn transform(
        &self,
        log_toggle: bool,
        previous: Option<&str>,
        current: Option<&str>,
    ) -> TestResponse {
        let body = serde_json::json!({
            "log_toggle": log_toggle,
            "previous": previous,
            "current": current,
        });
        self.post_json("/api/transform", &body.to_string()).await
    }

    /// Send a request to the router
    async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Test response with convenience methods
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parse body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    /// Get body as string
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// The `src` field of a transform response
    pub fn src(&self) -> Option<String> {
        let json: serde_json::Value = self.json();
        json["src"].as_str().map(str::to_string)
    }
}
