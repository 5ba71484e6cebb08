pub mod creature;
pub mod image;
pub mod text;

pub use creature::*;
pub use image::*;
pub use text::*;
