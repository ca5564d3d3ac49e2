//! Test fixtures and constants.

use loglens::services::codec::{decode_data_uri, encode_rgba_png};
use loglens::models::ImageReference;
use log_remap::PixelBuffer;

/// A well-formed data URI whose payload is a truncated GIF
pub const BROKEN_IMAGE: &str = "data:image/png;base64,R0lGODlhAQABAAAAACw=";

/// A reference the codec cannot even parse
pub const NOT_A_DATA_URI: &str = "https://example.invalid/image.png";

/// The 1x1 reference pixel (0, 128, 255, 200)
pub fn reference_pixel_png() -> String {
    png_data_uri(1, 1, vec![0, 128, 255, 200])
}

/// Encode RGBA8 pixels as a PNG data URI
pub fn png_data_uri(width: u32, height: u32, rgba: Vec<u8>) -> String {
    let pixels = PixelBuffer::new(width, height, rgba).expect("valid pixel buffer");
    let png = encode_rgba_png(&pixels).expect("PNG encode");
    ImageReference::from_bytes("image/png", &png).into_string()
}

/// Opaque RGB gradient encoded as a JPEG data URI
pub fn jpeg_data_uri(width: u32, height: u32) -> String {
    let image = image::RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x * 255 / width) as u8, (y * 255 / height) as u8, 96])
    });
    let mut jpeg = Vec::new();
    image
        .write_to(&mut std::io::Cursor::new(&mut jpeg), image::ImageFormat::Jpeg)
        .expect("JPEG encode");
    ImageReference::from_bytes("image/jpeg", &jpeg).into_string()
}

/// Gradient with every channel value and varying alpha
pub fn gradient_png() -> (PixelBuffer, String) {
    let data: Vec<u8> = (0..=255u8)
        .flat_map(|v| [v, 255 - v, v.wrapping_mul(3), 255 - v / 2])
        .collect();
    let pixels = PixelBuffer::new(16, 16, data.clone()).unwrap();
    (pixels, png_data_uri(16, 16, data))
}

/// Decode an image data URI back to pixels
pub fn decode_image_uri(uri: &str) -> PixelBuffer {
    decode_data_uri(&ImageReference::new(uri), u64::MAX).expect("decodable image data URI")
}
