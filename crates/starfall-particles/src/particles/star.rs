//! Twinkling background stars.

use std::f32::consts::TAU;

use rand::Rng;
use starfall_core::{Point, RenderSurface, Viewport};

use super::draw_glowing_dot;

/// Fraction of stars that render as large glowing sparkles.
pub const SPARKLE_CHANCE: f64 = 0.05;

/// A permanent star whose brightness oscillates on its own phase.
#[derive(Debug, Clone)]
pub struct Star {
    pub position: Point,
    radius: f32,
    twinkle_speed: f32,
    phase: f32,
    alpha: f32,
    sparkle: Option<Sparkle>,
}

/// Second, slower brightness channel for sparkle stars.
#[derive(Debug, Clone, Copy)]
struct Sparkle {
    radius: f32,
    phase: f32,
}

impl Star {
    /// A star at a random position inside the viewport.
    pub fn spawn<R: Rng + ?Sized>(viewport: Viewport, rng: &mut R) -> Self {
        let position = Point::new(
            rng.gen_range(0.0..viewport.width.max(f32::EPSILON)),
            rng.gen_range(0.0..viewport.height.max(f32::EPSILON)),
        );
        let sparkle = rng.gen_bool(SPARKLE_CHANCE).then(|| Sparkle {
            radius: rng.gen_range(2.5..4.0),
            phase: rng.gen_range(0.0..TAU),
        });

        Self {
            position,
            radius: rng.gen_range(0.5..1.8),
            twinkle_speed: rng.gen_range(0.01..0.03),
            phase: rng.gen_range(0.0..TAU),
            alpha: rng.gen_range(0.5..1.0),
            sparkle,
        }
    }

    pub fn update(&mut self) {
        self.phase += self.twinkle_speed;
        self.alpha = (0.5 + 0.5 * self.phase.sin()).clamp(0.0, 1.0);
        if let Some(sparkle) = &mut self.sparkle {
            sparkle.phase += self.twinkle_speed / 2.0;
        }
    }

    pub fn draw(&self, surface: &mut dyn RenderSurface) {
        match self.sparkle {
            Some(sparkle) => {
                let alpha = 0.3 + 0.7 * (0.5 + 0.5 * sparkle.phase.sin());
                draw_glowing_dot(surface, self.position, sparkle.radius, alpha, 15.0);
            }
            None => draw_glowing_dot(surface, self.position, self.radius, self.alpha, 6.0),
        }
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn is_sparkle(&self) -> bool {
        self.sparkle.is_some()
    }
}
