use crate::error::SettingsError;
use crate::geom::lerp_f32;

/// Straight (non-premultiplied) RGB brush color in `[0, 1]` per channel.
///
/// Opacity travels as a separate per-vertex attribute, so no alpha channel is
/// carried here.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

/// Opaque handle to a brush tip texture owned by the external asset layer.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct TextureHandle(pub u32);

/// Size, opacity, and appearance of one brush preset.
///
/// `size`/`opacity` are the base values; the `min_*`/`max_*` pairs scale them
/// into a pressure-driven range (see [`size_for_pressure`] and
/// [`opacity_for_pressure`]).
///
/// [`size_for_pressure`]: Self::size_for_pressure
/// [`opacity_for_pressure`]: Self::opacity_for_pressure
#[derive(Debug, Clone, PartialEq)]
pub struct BrushAttributes {
    pub size: f32,
    pub opacity: f32,
    pub min_size: f32,
    pub max_size: f32,
    pub min_opacity: f32,
    pub max_opacity: f32,
    pub is_eraser: bool,
    pub flow: f32,
    pub color: Color,
    pub texture: Option<TextureHandle>,
}

impl BrushAttributes {
    /// Effective stamp size at `pressure`: lerp between `size·min_size` and
    /// `size·max_size`.
    pub fn size_for_pressure(&self, pressure: f32) -> f32 {
        lerp_f32(self.size * self.min_size, self.size * self.max_size, pressure)
    }

    /// Effective opacity at `pressure`: lerp between `opacity·min_opacity`
    /// and `opacity·max_opacity`.
    pub fn opacity_for_pressure(&self, pressure: f32) -> f32 {
        lerp_f32(
            self.opacity * self.min_opacity,
            self.opacity * self.max_opacity,
            pressure,
        )
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        for (name, value) in [
            ("opacity", self.opacity),
            ("min_opacity", self.min_opacity),
            ("max_opacity", self.max_opacity),
            ("flow", self.flow),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(SettingsError::UnitRange { name, value });
            }
        }
        if self.min_size > self.max_size {
            return Err(SettingsError::InvertedRange {
                name: "size",
                min: self.min_size,
                max: self.max_size,
            });
        }
        if self.min_opacity > self.max_opacity {
            return Err(SettingsError::InvertedRange {
                name: "opacity",
                min: self.min_opacity,
                max: self.max_opacity,
            });
        }
        Ok(())
    }
}

impl Default for BrushAttributes {
    fn default() -> Self {
        Self {
            size: 0.025,
            opacity: 0.2,
            min_size: 0.3,
            max_size: 1.0,
            min_opacity: 0.0,
            max_opacity: 1.0,
            is_eraser: false,
            flow: 0.15,
            color: Color::BLACK,
            texture: None,
        }
    }
}
