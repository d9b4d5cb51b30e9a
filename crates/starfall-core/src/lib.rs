//! Core types shared across the starfall crates.

mod color;
mod geometry;
mod settings;
mod surface;

pub use color::{BACKGROUND, Glow, Rgba};
pub use geometry::{MAX_CANVAS_SIDE, Point, Viewport};
pub use settings::{MAX_STARS, SimSettings};
pub use surface::RenderSurface;
