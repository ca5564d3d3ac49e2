pub mod transform;

pub use transform::{handle_transform, TransformRequest, TransformResponse, __path_handle_transform};
