//! A render surface that records draw calls instead of painting them.

use starfall_core::{Glow, Point, RenderSurface, Rgba};

/// One recorded drawing primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgba,
    },
    Circle {
        center: Point,
        radius: f32,
        color: Rgba,
        glow: Option<Glow>,
    },
    Line {
        from: Point,
        to: Point,
        width: f32,
        color: Rgba,
    },
}

/// Collects everything drawn into it, for headless runs and tests.
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }

    /// Recorded line segments as `(from, to, color)`.
    pub fn lines(&self) -> impl Iterator<Item = (Point, Point, Rgba)> + '_ {
        self.ops.iter().filter_map(|op| match *op {
            DrawOp::Line { from, to, color, .. } => Some((from, to, color)),
            _ => None,
        })
    }

    pub fn circle_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Circle { .. }))
            .count()
    }
}

impl RenderSurface for RecordingSurface {
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgba) {
        self.ops.push(DrawOp::Rect {
            x,
            y,
            width,
            height,
            color,
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: Rgba, glow: Option<Glow>) {
        self.ops.push(DrawOp::Circle {
            center,
            radius,
            color,
            glow,
        });
    }

    fn stroke_line(&mut self, from: Point, to: Point, width: f32, color: Rgba) {
        self.ops.push(DrawOp::Line {
            from,
            to,
            width,
            color,
        });
    }
}
