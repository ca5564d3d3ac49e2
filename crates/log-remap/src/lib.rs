//! log-remap: logarithmic intensity remapping for RGBA8 pixels
//!
//! Every colour channel is sent through the fixed curve
//!
//! ```text
//! output = (255 / ln 256) * ln(1 + input)
//! ```
//!
//! which lifts dark values and compresses bright ones. Alpha is never
//! touched. The curve is evaluated once per possible byte at build time
//! and served from [`LOG_LUT`].
//!
//! ```
//! use log_remap::{PixelBuffer, remap_channel};
//!
//! let mut pixels = PixelBuffer::new(1, 1, vec![0, 128, 255, 200]).unwrap();
//! pixels.apply_log_remap();
//!
//! assert_eq!(pixels.data(), &[0, remap_channel(128), 255, 200]);
//! ```

pub mod buffer;
pub mod curve;
pub mod error;

pub use buffer::PixelBuffer;
pub use curve::{log_curve, remap_channel, remap_rgba_in_place, LOG_LUT, LOG_SCALE};
pub use error::BufferError;
