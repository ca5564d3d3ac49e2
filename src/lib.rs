//! LogLens - log intensity transform for dashboard image previews
//!
//! Takes an image reference (a PNG data URI) and, when the host's toggle
//! is on, remaps every colour channel through `(255 / ln 256) * ln(1 + x)`.
//! This library exposes modules for integration testing.

pub mod api;
pub mod error;
pub mod models;
pub mod rendering;
pub mod server;
pub mod services;
