//! RGBA8 pixel buffer

use crate::curve::remap_rgba_in_place;
use crate::error::BufferError;

/// Interleaved, straight-alpha RGBA8 pixels.
///
/// The byte length is always `width * height * 4`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap raw RGBA bytes, validating their length against the dimensions.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, BufferError> {
        let expected = Self::byte_len(width, height)?;
        if data.len() != expected {
            return Err(BufferError::LengthMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Number of bytes needed for `width x height` RGBA8 pixels.
    fn byte_len(width: u32, height: u32) -> Result<usize, BufferError> {
        (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or(BufferError::DimensionsOverflow { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// RGBA of the pixel at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Alpha samples in pixel order.
    pub fn alphas(&self) -> impl Iterator<Item = u8> + '_ {
        self.data.chunks_exact(4).map(|px| px[3])
    }

    /// Apply the log remap to every colour channel, leaving alpha as is.
    pub fn apply_log_remap(&mut self) {
        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            let row_bytes = self.width as usize * 4;
            if row_bytes == 0 {
                return;
            }
            self.data
                .par_chunks_mut(row_bytes)
                .for_each(remap_rgba_in_place);
        }

        #[cfg(not(feature = "parallel"))]
        remap_rgba_in_place(&mut self.data);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::remap_channel;

    #[test]
    fn test_new_rejects_wrong_length() {
        let err = PixelBuffer::new(2, 2, vec![0; 15]).unwrap_err();
        assert_eq!(
            err,
            BufferError::LengthMismatch {
                expected: 16,
                actual: 15
            }
        );
        assert_eq!(
            err.to_string(),
            "pixel buffer length mismatch: expected 16 bytes, got 15"
        );
    }

    #[test]
    fn test_zero_sized_buffer() {
        let mut buf = PixelBuffer::new(0, 5, Vec::new()).unwrap();
        buf.apply_log_remap();
        assert!(buf.data().is_empty());
        assert_eq!(buf.pixel(0, 0), None);
    }

    #[test]
    fn test_dimensions_overflow() {
        let err = PixelBuffer::new(u32::MAX, u32::MAX, Vec::new()).unwrap_err();
        assert_eq!(
            err,
            BufferError::DimensionsOverflow {
                width: u32::MAX,
                height: u32::MAX
            }
        );
    }

    #[test]
    fn test_pixel_lookup() {
        let data = vec![1, 2, 3, 4, 5, 6, 7, 8];
        let buf = PixelBuffer::new(2, 1, data).unwrap();
        assert_eq!(buf.pixel(1, 0), Some([5, 6, 7, 8]));
        assert_eq!(buf.pixel(2, 0), None);
    }

    #[test]
    fn test_reference_pixel() {
        let mut buf = PixelBuffer::new(1, 1, vec![0, 128, 255, 200]).unwrap();
        buf.apply_log_remap();
        assert_eq!(buf.pixel(0, 0), Some([0, 223, 255, 200]));
    }

    #[test]
    fn test_remap_matches_lut_and_keeps_alpha() {
        let (w, h) = (17u32, 9u32);
        let data: Vec<u8> = (0..w * h * 4).map(|i| (i * 7 % 256) as u8).collect();
        let original = PixelBuffer::new(w, h, data).unwrap();

        let mut remapped = original.clone();
        remapped.apply_log_remap();

        assert!(original.alphas().eq(remapped.alphas()));
        for (before, after) in original
            .data()
            .chunks_exact(4)
            .zip(remapped.data().chunks_exact(4))
        {
            for c in 0..3 {
                assert_eq!(after[c], remap_channel(before[c]));
            }
        }
    }

    /// Row-parallel and whole-buffer remaps must agree byte for byte.
    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let (w, h) = (37u32, 23u32);
        let data: Vec<u8> = (0..w * h * 4).map(|i| (i * 13 % 251) as u8).collect();
        let mut parallel = PixelBuffer::new(w, h, data.clone()).unwrap();
        parallel.apply_log_remap();

        let mut sequential = data;
        remap_rgba_in_place(&mut sequential);

        assert_eq!(parallel.data(), sequential.as_slice());
    }
}
