//! Brush configuration consumed by the geometry emplacer.
//!
//! Pure read-only configuration owned by the tool/settings layer; the
//! pipeline never mutates it.

mod attributes;

pub use attributes::{BrushAttributes, Color, TextureHandle};
