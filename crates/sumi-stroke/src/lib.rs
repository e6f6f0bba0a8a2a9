//! Sumi stroke-processing crate.
//!
//! Turns raw pointer samples into GPU-ready brush geometry: stabilization,
//! arc-length resampling, capacity-aware batching, and quad emplacement.
//! Everything upstream of the vertex buffer, nothing downstream of it.

pub mod brush;
pub mod error;
pub mod geom;
pub mod interpolate;
pub mod logging;
pub mod stabilize;
pub mod stroke;
pub mod vertex;
