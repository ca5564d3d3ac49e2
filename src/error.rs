use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log_remap::BufferError;
use serde_json::json;
use thiserror::Error;

use crate::models::ImageReference;

#[derive(Debug, Error)]
pub enum TransformError {
    /// The reference could not be turned into pixels. Carries the original
    /// reference so the host can log it or fall back to it.
    #[error("Failed to load image {reference}: {reason}")]
    ImageDecode {
        reference: ImageReference,
        reason: String,
    },

    #[error("Failed to allocate {width}x{height} surface")]
    SurfaceAllocation { width: u32, height: u32 },

    #[error("Image encode error: {0}")]
    Encode(String),

    #[error("Pixel buffer error: {0}")]
    Buffer(#[from] BufferError),
}

impl TransformError {
    pub fn decode(reference: &ImageReference, reason: impl Into<String>) -> Self {
        TransformError::ImageDecode {
            reference: reference.clone(),
            reason: reason.into(),
        }
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, TransformError::ImageDecode { .. })
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Failed to load image: {reason}")]
    ImageDecode { reference: String, reason: String },

    #[error("Transform error: {0}")]
    Transform(String),
}

impl From<TransformError> for ApiError {
    fn from(e: TransformError) -> Self {
        match e {
            TransformError::ImageDecode { reference, reason } => ApiError::ImageDecode {
                reference: reference.to_string(),
                reason,
            },
            other => ApiError::Transform(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::ImageDecode { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Transform(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let mut body = json!({
            "status": status.as_u16(),
            "error": self.to_string(),
        });
        if let ApiError::ImageDecode { reference, .. } = &self {
            body["reference"] = json!(reference);
        }

        (status, Json(body)).into_response()
    }
}
