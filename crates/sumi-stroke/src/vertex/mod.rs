//! Quad geometry emplacement.
//!
//! Turns a stabilized, resampled point list plus [`BrushAttributes`] into a
//! flat interleaved vertex buffer the caller can upload directly (the vertex
//! type is `Pod`, so `bytemuck::cast_slice` works both ways). Two styles:
//! stamped squares rotated to face travel direction, and stretched
//! rectangles spanning consecutive point pairs.
//!
//! [`BrushAttributes`]: crate::brush::BrushAttributes

mod emplace;
mod transform;
mod vertex;

pub use emplace::QuadEmplacer;
pub use transform::QuadTransform;
pub use vertex::{
    FLOATS_PER_QUAD, FLOATS_PER_VERTEX, StrokeVertex, VERTS_PER_QUAD, floats_for_quads,
    vertices_of,
};
