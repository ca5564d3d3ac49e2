//! Image decode/encode capability.
//!
//! The transformer never touches image formats itself; the host hands it an
//! [`ImageCodec`]. [`DataUriCodec`] is the default: it reads PNG, JPEG and
//! the other common raster formats from base64 data URIs and always writes
//! lossless `data:image/png;base64,...` references.

use async_trait::async_trait;
use log_remap::PixelBuffer;
use std::io::Cursor;

use crate::error::TransformError;
use crate::models::{AppConfig, ImageReference};

/// Turns references into pixels and back.
#[async_trait]
pub trait ImageCodec: Send + Sync {
    /// Decode a reference into straight-alpha RGBA8.
    ///
    /// Every failure is reported as [`TransformError::ImageDecode`].
    async fn decode(&self, reference: &ImageReference) -> Result<PixelBuffer, TransformError>;

    /// Encode pixels into a new reference.
    fn encode(&self, pixels: &PixelBuffer) -> Result<ImageReference, TransformError>;
}

/// Image data URIs in, PNG data URIs out.
#[derive(Debug, Clone)]
pub struct DataUriCodec {
    max_pixels: u64,
}

impl DataUriCodec {
    pub fn new(max_pixels: u64) -> Self {
        Self { max_pixels }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.max_pixels)
    }
}

impl Default for DataUriCodec {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

#[async_trait]
impl ImageCodec for DataUriCodec {
    /// Decoding runs on the blocking pool; large images take a while to inflate.
    async fn decode(&self, reference: &ImageReference) -> Result<PixelBuffer, TransformError> {
        let owned = reference.clone();
        let max_pixels = self.max_pixels;

        tokio::task::spawn_blocking(move || decode_data_uri(&owned, max_pixels))
            .await
            .map_err(|e| TransformError::decode(reference, format!("decode task failed: {e}")))?
    }

    fn encode(&self, pixels: &PixelBuffer) -> Result<ImageReference, TransformError> {
        let png_bytes = encode_rgba_png(pixels)?;
        Ok(ImageReference::from_bytes("image/png", &png_bytes))
    }
}

/// Decode an image data URI synchronously.
pub fn decode_data_uri(
    reference: &ImageReference,
    max_pixels: u64,
) -> Result<PixelBuffer, TransformError> {
    let bytes = reference_bytes(reference)?;
    decode_image(&bytes, max_pixels).map_err(|reason| TransformError::decode(reference, reason))
}

/// Raw payload bytes of a data URI reference.
pub fn reference_bytes(reference: &ImageReference) -> Result<Vec<u8>, TransformError> {
    reference
        .data_uri()
        .and_then(|uri| uri.decode_bytes())
        .map_err(|e| TransformError::decode(reference, e.to_string()))
}

/// Wrap image file contents as a data URI reference.
///
/// The MIME type comes from the file contents, and the bytes are checked by
/// decoding them once, so a bad file fails here rather than later in the
/// browser.
pub fn file_reference(bytes: &[u8]) -> Result<ImageReference, TransformError> {
    let mime = image::guess_format(bytes)
        .map(|format| format.to_mime_type())
        .unwrap_or("application/octet-stream");
    let reference = ImageReference::from_bytes(mime, bytes);
    decode_image(bytes, u64::MAX).map_err(|reason| TransformError::decode(&reference, reason))?;
    Ok(reference)
}

/// Decode any supported raster format (PNG, JPEG, ...) to RGBA8.
///
/// The format is sniffed from the bytes; the data URI's MIME type is not
/// trusted, the same as a browser image element.
fn decode_image(bytes: &[u8], max_pixels: u64) -> Result<PixelBuffer, String> {
    let reader = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| e.to_string())?;
    let Some(format) = reader.format() else {
        return Err("unsupported image format".to_string());
    };

    // Header only; rejects oversized images before any pixel allocation
    let (width, height) = reader.into_dimensions().map_err(|e| e.to_string())?;
    let pixels = u64::from(width) * u64::from(height);
    if pixels > max_pixels {
        return Err(format!(
            "image too large: {width}x{height} exceeds {max_pixels} pixels"
        ));
    }

    let decoded = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| e.to_string())?
        .to_rgba8();

    tracing::trace!(width, height, ?format, "Decoded image");
    PixelBuffer::new(decoded.width(), decoded.height(), decoded.into_raw())
        .map_err(|e| e.to_string())
}

/// Encode straight-alpha RGBA8 as an 8-bit RGBA PNG.
pub fn encode_rgba_png(pixels: &PixelBuffer) -> Result<Vec<u8>, TransformError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, pixels.width(), pixels.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        let mut writer = encoder
            .write_header()
            .map_err(|e| TransformError::Encode(e.to_string()))?;
        writer
            .write_image_data(pixels.data())
            .map_err(|e| TransformError::Encode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}
