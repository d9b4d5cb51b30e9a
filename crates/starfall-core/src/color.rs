//! Colour values for particle rendering.

/// An RGB colour with a straight alpha channel in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

/// Night-sky backdrop painted at the start of every frame.
pub const BACKGROUND: Rgba = Rgba::new(10, 10, 20, 1.0);

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// White at the given opacity, clamped to `[0, 1]`.
    pub fn white(alpha: f32) -> Self {
        Self::new(255, 255, 255, alpha.clamp(0.0, 1.0))
    }

    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            a: alpha.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Composite this colour over an opaque backdrop.
    pub fn blend_over(self, backdrop: Rgba) -> (u8, u8, u8) {
        let a = self.a.clamp(0.0, 1.0);
        let mix = |fg: u8, bg: u8| (fg as f32 * a + bg as f32 * (1.0 - a)).round() as u8;
        (
            mix(self.r, backdrop.r),
            mix(self.g, backdrop.g),
            mix(self.b, backdrop.b),
        )
    }
}

/// Soft halo drawn around a filled shape (shadow blur + shadow colour).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub blur: f32,
    pub color: Rgba,
}

impl Glow {
    pub const fn new(blur: f32, color: Rgba) -> Self {
        Self { blur, color }
    }
}
