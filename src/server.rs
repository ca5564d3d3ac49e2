//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::error::ApiError;
use crate::models::AppConfig;
use crate::services::{ImageCodec, ImageLogTransformer, DataUriCodec};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub transformer: Arc<ImageLogTransformer>,
}

/// Create application state with the default data URI codec.
pub fn create_app_state(config: AppConfig) -> AppState {
    let codec: Arc<dyn ImageCodec> = Arc::new(DataUriCodec::from_config(&config));
    create_app_state_with_codec(config, codec)
}

/// Create application state around a caller-supplied codec.
pub fn create_app_state_with_codec(config: AppConfig, codec: Arc<dyn ImageCodec>) -> AppState {
    AppState {
        config: Arc::new(config),
        transformer: Arc::new(ImageLogTransformer::new(codec)),
    }
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_reference_bytes;

    Router::new()
        .route("/api/transform", post(handle_transform))
        // Health check
        .route("/health", get(|| async { "OK" }))
        .with_state(state)
        // References travel inline as data URIs
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
}

// Wrapper handler to extract the transformer from the shared state

async fn handle_transform(
    axum::extract::State(state): axum::extract::State<AppState>,
    body: axum::Json<api::TransformRequest>,
) -> Result<axum::Json<api::TransformResponse>, ApiError> {
    api::handle_transform(axum::extract::State(state.transformer), body).await
}
