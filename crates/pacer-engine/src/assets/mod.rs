//! Asset loading.
//!
//! Decodes image files into tightly packed RGBA8 buffers that renderers can
//! upload. GPU resources are created later by the renderer that owns them.

mod error;
mod decode;

pub use error::AssetError;
pub use decode::{load_image, DecodedImage};
