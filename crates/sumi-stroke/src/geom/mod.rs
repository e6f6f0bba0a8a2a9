//! Point and curve primitives shared by the whole pipeline.

mod point;
mod vec2;

pub use point::{BrushPoint, lerp_f32, path_length};
pub use vec2::Vec2;
