//! Error types for pixel buffer construction

use std::fmt;

/// Error returned when raw bytes cannot form an RGBA8 buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// `width * height * 4` does not fit in `usize`
    DimensionsOverflow {
        /// Requested width in pixels
        width: u32,
        /// Requested height in pixels
        height: u32,
    },
    /// Byte length disagrees with the dimensions
    LengthMismatch {
        /// `width * height * 4`
        expected: usize,
        /// Length actually supplied
        actual: usize,
    },
}

impl fmt::Display for BufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferError::DimensionsOverflow { width, height } => {
                write!(f, "pixel buffer dimensions overflow: {}x{}", width, height)
            }
            BufferError::LengthMismatch { expected, actual } => {
                write!(
                    f,
                    "pixel buffer length mismatch: expected {} bytes, got {}",
                    expected, actual
                )
            }
        }
    }
}

impl std::error::Error for BufferError {}
