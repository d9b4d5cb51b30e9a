//! The drawing sink particles render into.

use crate::{Glow, Point, Rgba};

/// A write-only 2D drawing context in canvas pixel space.
///
/// Hosts implement this over whatever they actually paint on (a terminal
/// canvas, a recording buffer in tests). Nothing is ever read back.
pub trait RenderSurface {
    /// Fill an axis-aligned rectangle.
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgba);

    /// Fill a circle, optionally with a glow halo.
    fn fill_circle(&mut self, center: Point, radius: f32, color: Rgba, glow: Option<Glow>);

    /// Stroke a straight segment with round caps.
    fn stroke_line(&mut self, from: Point, to: Point, width: f32, color: Rgba);
}
