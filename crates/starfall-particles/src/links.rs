//! Faint constellation lines between nearby particles.

use starfall_core::{Point, RenderSurface, Rgba};

/// Opacity of a link between two coincident points.
pub const LINK_MAX_ALPHA: f32 = 0.3;

const LINK_WIDTH: f32 = 0.5;

/// Opacity of a link spanning `distance`, or `None` when too far apart.
pub fn link_alpha(distance: f32, threshold: f32) -> Option<f32> {
    (distance < threshold).then(|| (1.0 - distance / threshold) * LINK_MAX_ALPHA)
}

/// Draw a line between every pair of points closer than `threshold`, and
/// from `pointer` to every point when given.
///
/// This is quadratic in the number of points. Star fields are sized from
/// the viewport width, so the count stays in the low hundreds.
///
/// Returns the number of links drawn.
pub fn draw_links(
    points: &[Point],
    pointer: Option<Point>,
    threshold: f32,
    surface: &mut dyn RenderSurface,
) -> usize {
    let pairs = points
        .iter()
        .enumerate()
        .flat_map(|(i, &a)| points[i + 1..].iter().map(move |&b| (a, b)));
    let pointer_pairs = pointer
        .into_iter()
        .flat_map(|p| points.iter().map(move |&b| (p, b)));

    let mut drawn = 0;
    for (a, b) in pairs.chain(pointer_pairs) {
        if let Some(alpha) = link_alpha(a.distance(b), threshold) {
            surface.stroke_line(a, b, LINK_WIDTH, Rgba::white(alpha));
            drawn += 1;
        }
    }

    drawn
}
