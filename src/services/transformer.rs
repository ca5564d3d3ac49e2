//! Optional log(1+x) intensity transform for dashboard image previews.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use log_remap::PixelBuffer;

use crate::error::TransformError;
use crate::models::ImageReference;
use crate::rendering::Surface;
use crate::services::ImageCodec;

/// What a call to [`ImageLogTransformer::transform`] produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformOutcome {
    /// The input came back as given, with no decode or encode.
    Unchanged(Option<ImageReference>),
    /// A freshly encoded, log-remapped copy of the input.
    Transformed(ImageReference),
}

impl TransformOutcome {
    pub fn is_transformed(&self) -> bool {
        matches!(self, Self::Transformed(_))
    }

    /// The reference the caller should display.
    pub fn into_reference(self) -> Option<ImageReference> {
        match self {
            Self::Unchanged(reference) => reference,
            Self::Transformed(reference) => Some(reference),
        }
    }
}

/// Applies the log remap to an image reference when the host's toggle is on.
///
/// Each call owns its scratch surface and pixel buffer; nothing is shared
/// between calls except the codec and an allocation counter.
pub struct ImageLogTransformer {
    codec: Arc<dyn ImageCodec>,
    surfaces_allocated: Arc<AtomicU64>,
}

impl ImageLogTransformer {
    pub fn new(codec: Arc<dyn ImageCodec>) -> Self {
        Self {
            codec,
            surfaces_allocated: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Number of scratch surfaces allocated over this transformer's lifetime.
    pub fn surfaces_allocated(&self) -> u64 {
        self.surfaces_allocated.load(Ordering::Relaxed)
    }

    /// Return `current` unchanged, or a log-remapped copy of it.
    ///
    /// The transform only runs when `toggle` is on and `current` is a
    /// non-empty reference equal to `previous`. Otherwise the input comes
    /// back untouched without any decode or encode. This also skips the
    /// first toggle-on for a freshly swapped image whose previous reference
    /// has not caught up yet. Decode failure is the only error on the
    /// transform path.
    pub async fn transform(
        &self,
        toggle: bool,
        previous: Option<&ImageReference>,
        current: Option<ImageReference>,
    ) -> Result<TransformOutcome, TransformError> {
        let current = match current {
            Some(reference) if should_transform(toggle, previous, &reference) => reference,
            other => {
                tracing::debug!(
                    toggle,
                    has_image = other.as_ref().is_some_and(|r| !r.is_empty()),
                    "Returning image without transformation"
                );
                return Ok(TransformOutcome::Unchanged(other));
            }
        };

        let decoded = match self.codec.decode(&current).await {
            Ok(pixels) => pixels,
            Err(e) => {
                tracing::warn!(%e, "Failed to load image");
                return Err(e);
            }
        };

        let (width, height) = (decoded.width(), decoded.height());

        // Surface work and encoding are CPU-bound; keep them off the async workers
        let codec = Arc::clone(&self.codec);
        let counter = Arc::clone(&self.surfaces_allocated);
        let transformed =
            tokio::task::spawn_blocking(move || remap_on_surface(codec.as_ref(), &counter, decoded))
                .await
                .map_err(|e| TransformError::Encode(format!("transform task failed: {e}")))??;

        tracing::info!(width, height, "Applied log transform");
        Ok(TransformOutcome::Transformed(transformed))
    }
}

/// Draw, read back, remap, write back, encode.
fn remap_on_surface(
    codec: &dyn ImageCodec,
    surfaces_allocated: &AtomicU64,
    decoded: PixelBuffer,
) -> Result<ImageReference, TransformError> {
    let mut surface = Surface::new(decoded.width(), decoded.height())?;
    surfaces_allocated.fetch_add(1, Ordering::Relaxed);

    surface.draw_image(&decoded);
    drop(decoded);

    let mut pixels = surface.read_pixels()?;
    pixels.apply_log_remap();
    surface.put_pixels(&pixels);

    codec.encode(&surface.read_pixels()?)
}

fn should_transform(
    toggle: bool,
    previous: Option<&ImageReference>,
    current: &ImageReference,
) -> bool {
    toggle && !current.is_empty() && previous == Some(current)
}
