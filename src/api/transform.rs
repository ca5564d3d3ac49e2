use axum::{extract::State, response::Json, Json as JsonExtractor};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::models::ImageReference;
use crate::services::ImageLogTransformer;

/// Request body for an image transform
#[derive(Debug, Deserialize, ToSchema)]
pub struct TransformRequest {
    /// Whether the log transform toggle is on
    #[serde(default)]
    pub log_toggle: bool,
    /// Reference last seen in the caller's cached state
    #[serde(default)]
    pub previous: Option<String>,
    /// Reference to transform (image data URI, e.g. PNG or JPEG)
    #[serde(default)]
    pub current: Option<String>,
}

/// Result of an image transform
#[derive(Debug, Serialize, ToSchema)]
pub struct TransformResponse {
    /// Image to display: the input unchanged, or a new PNG data URI
    pub src: Option<String>,
    /// True when the log transform was applied
    pub transformed: bool,
}

/// Apply the log transform to an image
///
/// Mirrors the dashboard's toggle callback: the image is only transformed when
/// the toggle is on and `current` equals `previous`; otherwise `current` is
/// echoed back unchanged.
#[utoipa::path(
    post,
    path = "/api/transform",
    request_body = TransformRequest,
    responses(
        (status = 200, description = "Image returned (transformed or unchanged)", body = TransformResponse),
        (status = 400, description = "Malformed JSON body"),
        (status = 422, description = "The image could not be loaded"),
    ),
    tag = "Transform"
)]
pub async fn handle_transform(
    State(transformer): State<Arc<ImageLogTransformer>>,
    JsonExtractor(request): JsonExtractor<TransformRequest>,
) -> Result<Json<TransformResponse>, ApiError> {
    let previous = request.previous.map(ImageReference::new);
    let current = request.current.map(ImageReference::new);

    let outcome = transformer
        .transform(request.log_toggle, previous.as_ref(), current)
        .await?;
    let transformed = outcome.is_transformed();

    tracing::debug!(transformed, "Transform request handled");

    Ok(Json(TransformResponse {
        src: outcome.into_reference().map(ImageReference::into_string),
        transformed,
    }))
}
