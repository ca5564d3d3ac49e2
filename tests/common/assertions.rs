//! Assertion helpers for tests.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use super::app::TestResponse;

/// Assert response has expected status code
pub fn assert_status(response: &TestResponse, expected: StatusCode) {
    assert_eq!(
        response.status, expected,
        "Expected status {}, got {}. Body: {}",
        expected,
        response.status,
        response.text()
    );
}

/// Assert response is OK (200)
pub fn assert_ok(response: &TestResponse) {
    assert_status(response, StatusCode::OK);
}

/// Assert a transform response echoed `expected` back untouched
pub fn assert_passthrough(response: &TestResponse, expected: Option<&str>) {
    assert_ok(response);
    let json: serde_json::Value = response.json();
    assert_eq!(json["transformed"], false, "Expected pass-through");
    assert_eq!(json["src"].as_str(), expected);
}

/// Assert a transform response carries a new PNG data URI and return it
pub fn assert_transformed(response: &TestResponse) -> String {
    assert_ok(response);
    let json: serde_json::Value = response.json();
    assert_eq!(json["transformed"], true, "Expected a transform");

    let src = json["src"]
        .as_str()
        .expect("Expected src to be a string")
        .to_string();
    assert!(
        src.starts_with("data:image/png;base64,"),
        "Expected PNG data URI, got {}",
        &src[..40.min(src.len())]
    );
    src
}

/// Assert a decode failure response that names the reference
pub fn assert_decode_error(response: &TestResponse, reference_prefix: &str) {
    assert_status(response, StatusCode::UNPROCESSABLE_ENTITY);
    let json: serde_json::Value = response.json();
    assert_eq!(json["status"], 422);
    assert!(
        json["error"]
            .as_str()
            .is_some_and(|e| e.starts_with("Failed to load image")),
        "Unexpected error message: {}",
        json["error"]
    );
    assert!(
        json["reference"]
            .as_str()
            .is_some_and(|r| r.starts_with(reference_prefix)),
        "Expected reference starting with {reference_prefix}, got {}",
        json["reference"]
    );
}
