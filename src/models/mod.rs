pub mod config;
pub mod image_ref;

pub use config::AppConfig;
pub use image_ref::{DataUri, DataUriError, ImageReference};
