pub mod circle;
pub mod image;
