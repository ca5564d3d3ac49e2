//! The log(1+x) curve and its byte lookup table

// Include the generated LUT from build.rs
include!(concat!(env!("OUT_DIR"), "/log_lut.rs"));

/// Scale factor that maps `ln(1 + 255)` onto 255.
pub const LOG_SCALE: f64 = 255.0 / (8.0 * std::f64::consts::LN_2);

/// Evaluate the curve without any 8-bit coercion.
///
/// Slightly exceeds 255 at the top of the range due to float error; callers
/// that store into bytes must clamp.
#[inline]
pub fn log_curve(x: f64) -> f64 {
    LOG_SCALE * x.ln_1p()
}

/// Remap a single channel value.
///
/// Equivalent to storing `log_curve(v)` into a clamped byte: round to
/// nearest with ties to even, then clamp to `0..=255`.
#[inline]
pub fn remap_channel(v: u8) -> u8 {
    LOG_LUT[v as usize]
}

/// Remap R, G and B of every interleaved RGBA pixel in place.
///
/// Bytes past the last whole pixel are left alone.
pub fn remap_rgba_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        px[0] = remap_channel(px[0]);
        px[1] = remap_channel(px[1]);
        px[2] = remap_channel(px[2]);
    }
}
