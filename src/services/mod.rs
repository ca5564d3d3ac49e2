pub mod codec;
pub mod transformer;

pub use codec::{DataUriCodec, ImageCodec};
pub use transformer::{ImageLogTransformer, TransformOutcome};
