//! Scratch drawing surface for pixel transforms.
//!
//! Backed by a tiny-skia [`Pixmap`], which stores premultiplied RGBA like a
//! browser canvas. Pixels go in and come out as straight-alpha
//! [`PixelBuffer`]s, so colour under zero alpha is lost and partially
//! transparent colours round-trip within ±1.

use crate::error::TransformError;
use log_remap::PixelBuffer;
use tiny_skia::{ColorU8, Pixmap, PremultipliedColorU8};

pub struct Surface {
    pixmap: Pixmap,
}

impl Surface {
    /// Allocate a fully transparent surface.
    pub fn new(width: u32, height: u32) -> Result<Self, TransformError> {
        let pixmap =
            Pixmap::new(width, height).ok_or(TransformError::SurfaceAllocation { width, height })?;
        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Draw `image` once at the origin, 1:1, replacing what is underneath.
    ///
    /// Anything outside the surface is clipped.
    pub fn draw_image(&mut self, image: &PixelBuffer) {
        self.blit(image);
    }

    /// Read back every pixel as straight-alpha RGBA.
    pub fn read_pixels(&self) -> Result<PixelBuffer, TransformError> {
        let data: Vec<u8> = self
            .pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect();
        Ok(PixelBuffer::new(self.width(), self.height(), data)?)
    }

    /// Overwrite pixels from a straight-alpha buffer without blending.
    pub fn put_pixels(&mut self, pixels: &PixelBuffer) {
        self.blit(pixels);
    }

    fn blit(&mut self, src: &PixelBuffer) {
        let cols = src.width().min(self.width()) as usize;
        let rows = src.height().min(self.height()) as usize;
        let dst_stride = self.width() as usize;
        let src_stride = src.width() as usize * 4;
        let dst = self.pixmap.pixels_mut();

        for y in 0..rows {
            let src_row = &src.data()[y * src_stride..y * src_stride + cols * 4];
            let dst_row = &mut dst[y * dst_stride..y * dst_stride + cols];
            for (d, px) in dst_row.iter_mut().zip(src_row.chunks_exact(4)) {
                *d = premultiply(px);
            }
        }
    }
}

fn premultiply(px: &[u8]) -> PremultipliedColorU8 {
    ColorU8::from_rgba(px[0], px[1], px[2], px[3]).premultiply()
}
