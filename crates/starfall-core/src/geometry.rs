//! Canvas-space geometry.

/// A position in canvas pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Largest canvas side, in pixels, the simulation will populate.
pub const MAX_CANVAS_SIDE: f32 = 1_000_000.0;

/// Size of the drawable canvas in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// A viewport with a zero, negative, non-finite or oversized side has
    /// nothing to populate.
    pub fn is_degenerate(&self) -> bool {
        let usable = |side: f32| side > 0.0 && side <= MAX_CANVAS_SIDE;
        !(usable(self.width) && usable(self.height))
    }

    /// Whether `p` lies more than `margin` pixels outside any edge.
    pub fn is_beyond(&self, p: Point, margin: f32) -> bool {
        p.x < -margin || p.x > self.width + margin || p.y < -margin || p.y > self.height + margin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        assert_eq!(Point::new(0.0, 0.0).distance(Point::new(3.0, 4.0)), 5.0);
    }

    #[test]
    fn test_degenerate_viewport() {
        assert!(Viewport::new(0.0, 600.0).is_degenerate());
        assert!(Viewport::new(800.0, -1.0).is_degenerate());
        assert!(!Viewport::new(800.0, 600.0).is_degenerate());
    }

    #[test]
    fn test_unbounded_viewport_is_degenerate() {
        assert!(Viewport::new(f32::INFINITY, 600.0).is_degenerate());
        assert!(Viewport::new(800.0, f32::NAN).is_degenerate());
        assert!(Viewport::new(1e30, 600.0).is_degenerate());
        assert!(!Viewport::new(MAX_CANVAS_SIDE, MAX_CANVAS_SIDE).is_degenerate());
    }

    #[test]
    fn test_is_beyond_margin() {
        let vp = Viewport::new(800.0, 600.0);
        assert!(!vp.is_beyond(Point::new(-50.0, 10.0), 50.0));
        assert!(vp.is_beyond(Point::new(-50.5, 10.0), 50.0));
        assert!(vp.is_beyond(Point::new(10.0, 651.0), 50.0));
        assert!(vp.is_beyond(Point::new(851.0, 10.0), 50.0));
        assert!(vp.is_beyond(Point::new(10.0, -60.0), 50.0));
    }
}
