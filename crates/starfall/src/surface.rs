//! Terminal render surface built on the ratatui braille canvas.

use ratatui::{
    Frame,
    style::Color,
    symbols::Marker,
    widgets::canvas::{Canvas, Circle, Context, Line, Points},
};
use starfall_core::{BACKGROUND, Glow, Point, RenderSurface, Rgba, Viewport};

/// Share of a glow's opacity shown in its halo.
const HALO_STRENGTH: f32 = 0.3;

/// Something queued for the next canvas paint, in canvas coordinates
/// (y grows upward).
#[derive(Debug, Clone, Copy, PartialEq)]
enum Shape {
    Dot { x: f64, y: f64, color: Color },
    Ring { x: f64, y: f64, radius: f64, color: Color },
    Segment { x1: f64, y1: f64, x2: f64, y2: f64, color: Color },
}

impl Shape {
    fn paint(&self, ctx: &mut Context) {
        match *self {
            Shape::Dot { x, y, color } => ctx.draw(&Points {
                coords: &[(x, y)],
                color,
            }),
            Shape::Ring { x, y, radius, color } => ctx.draw(&Circle { x, y, radius, color }),
            Shape::Segment { x1, y1, x2, y2, color } => ctx.draw(&Line { x1, y1, x2, y2, color }),
        }
    }
}

/// Buffers one frame of drawing and paints it as a braille canvas.
///
/// Terminals have no alpha channel, so colours are blended over the
/// night-sky backdrop. Every cell is repainted each frame, which means the
/// backdrop's own opacity has no visible effect here.
#[derive(Debug)]
pub struct CanvasSurface {
    viewport: Viewport,
    backdrop: Color,
    /// Smallest radius, in canvas pixels, that spans more than one dot.
    min_ring_radius: f32,
    shapes: Vec<Shape>,
}

impl CanvasSurface {
    /// A surface for cells of the given pixel size. Braille packs 2×4 dots
    /// into a cell.
    pub fn new(cell_width_px: f32, cell_height_px: f32) -> Self {
        let dot = (cell_width_px / 2.0).max(cell_height_px / 4.0);
        Self {
            viewport: Viewport::default(),
            backdrop: to_color(BACKGROUND),
            min_ring_radius: dot * 2.0,
            shapes: Vec::new(),
        }
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    pub fn render(&self, frame: &mut Frame) {
        let canvas = Canvas::default()
            .background_color(self.backdrop)
            .marker(Marker::Braille)
            .x_bounds([0.0, f64::from(self.viewport.width.max(1.0))])
            .y_bounds([0.0, f64::from(self.viewport.height.max(1.0))])
            .paint(|ctx| {
                for shape in &self.shapes {
                    shape.paint(ctx);
                }
            });
        frame.render_widget(canvas, frame.area());
    }

    fn flip(&self, p: Point) -> (f64, f64) {
        (f64::from(p.x), f64::from(self.viewport.height - p.y))
    }

    fn push_round(&mut self, center: Point, radius: f32, color: Color) {
        let (x, y) = self.flip(center);
        if radius >= self.min_ring_radius {
            self.shapes.push(Shape::Ring {
                x,
                y,
                radius: f64::from(radius),
                color,
            });
        }
        self.shapes.push(Shape::Dot { x, y, color });
    }
}

impl RenderSurface for CanvasSurface {
    /// Sets the backdrop colour at full opacity. The position, size and alpha
    /// are ignored: the terminal repaints every cell each frame, so the only
    /// rectangle this host fills is the whole canvas.
    fn fill_rect(&mut self, _x: f32, _y: f32, _width: f32, _height: f32, color: Rgba) {
        self.backdrop = to_color(color.with_alpha(1.0));
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: Rgba, glow: Option<Glow>) {
        if let Some(glow) = glow {
            let halo = radius + glow.blur / 2.0;
            if halo >= self.min_ring_radius {
                let (x, y) = self.flip(center);
                self.shapes.push(Shape::Ring {
                    x,
                    y,
                    radius: f64::from(halo),
                    color: to_color(glow.color.with_alpha(glow.color.a * HALO_STRENGTH)),
                });
            }
        }
        self.push_round(center, radius, to_color(color));
    }

    fn stroke_line(&mut self, from: Point, to: Point, _width: f32, color: Rgba) {
        let (x1, y1) = self.flip(from);
        let (x2, y2) = self.flip(to);
        self.shapes.push(Shape::Segment {
            x1,
            y1,
            x2,
            y2,
            color: to_color(color),
        });
    }
}

fn to_color(color: Rgba) -> Color {
    let (r, g, b) = color.blend_over(BACKGROUND);
    Color::Rgb(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface() -> CanvasSurface {
        let mut surface = CanvasSurface::new(8.0, 16.0);
        surface.set_viewport(Viewport::new(800.0, 600.0));
        surface
    }

    #[test]
    fn test_small_circle_is_a_single_dot() {
        let mut surface = surface();
        surface.fill_circle(Point::new(10.0, 100.0), 1.0, Rgba::white(1.0), None);
        assert_eq!(
            surface.shapes,
            vec![Shape::Dot {
                x: 10.0,
                y: 500.0,
                color: Color::Rgb(255, 255, 255)
            }]
        );
    }

    #[test]
    fn test_wide_glow_adds_a_halo() {
        let mut surface = surface();
        let color = Rgba::white(1.0);
        surface.fill_circle(Point::new(0.0, 0.0), 3.0, color, Some(Glow::new(15.0, color)));
        assert!(matches!(surface.shapes[0], Shape::Ring { radius, .. } if radius == 10.5));
        assert!(matches!(surface.shapes[1], Shape::Dot { .. }));
    }

    #[test]
    fn test_line_is_flipped_and_blended() {
        let mut surface = surface();
        surface.stroke_line(
            Point::new(0.0, 0.0),
            Point::new(50.0, 600.0),
            0.5,
            Rgba::white(0.0),
        );
        assert_eq!(
            surface.shapes,
            vec![Shape::Segment {
                x1: 0.0,
                y1: 600.0,
                x2: 50.0,
                y2: 0.0,
                color: Color::Rgb(10, 10, 20)
            }]
        );
    }

    #[test]
    fn test_fill_rect_only_sets_an_opaque_backdrop() {
        let mut surface = surface();
        surface.fill_rect(5.0, 5.0, 10.0, 10.0, Rgba::new(40, 50, 60, 0.25));
        assert_eq!(surface.backdrop, Color::Rgb(40, 50, 60));
        assert!(surface.shapes.is_empty());
    }

    #[test]
    fn test_clear_drops_queued_shapes() {
        let mut surface = surface();
        surface.stroke_line(Point::default(), Point::new(1.0, 1.0), 1.0, Rgba::white(0.5));
        surface.clear();
        assert!(surface.shapes.is_empty());
    }
}
