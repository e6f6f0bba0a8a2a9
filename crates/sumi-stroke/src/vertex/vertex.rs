use bytemuck::{Pod, Zeroable};

/// One interleaved stroke vertex as it sits in the upload buffer.
///
/// Layout must stay in sync with the flat-float emplacement in
/// [`QuadEmplacer`]: position, color, texture coordinate, opacity.
///
/// [`QuadEmplacer`]: super::QuadEmplacer
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct StrokeVertex {
    pub pos: [f32; 2],
    pub color: [f32; 3],
    pub tex: [f32; 2],
    pub opacity: f32,
}

pub const FLOATS_PER_VERTEX: usize = 8;

/// Two triangles, no index buffer.
pub const VERTS_PER_QUAD: usize = 6;

pub const FLOATS_PER_QUAD: usize = FLOATS_PER_VERTEX * VERTS_PER_QUAD;

/// Buffer capacity (in `f32`s) needed for `quads` quads.
#[inline]
pub const fn floats_for_quads(quads: usize) -> usize {
    quads * FLOATS_PER_QUAD
}

/// Reinterprets a filled flat buffer as typed vertices.
///
/// The slice length must be a multiple of [`FLOATS_PER_VERTEX`].
#[inline]
pub fn vertices_of(buf: &[f32]) -> &[StrokeVertex] {
    bytemuck::cast_slice(buf)
}
