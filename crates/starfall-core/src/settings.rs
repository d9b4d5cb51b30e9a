//! Simulation tunables.

use serde::{Deserialize, Serialize};

/// Upper bound on the star field size, whatever the canvas width.
pub const MAX_STARS: usize = 10_000;

/// Tunable parameters for the particle simulation.
///
/// Every field has a default, so a config file only needs the keys it
/// wants to override.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimSettings {
    /// Per-frame probability of spawning a meteor.
    pub meteor_chance: f64,
    /// Fragments emitted when a meteor burns out.
    pub explosion_size: usize,
    /// Maximum distance, in pixels, at which two particles get linked.
    pub link_distance: f32,
    /// Horizontal pixels per star when sizing the star field.
    pub star_spacing: f32,
    /// Lower bound on the star field size.
    pub min_stars: usize,
    /// Spawn shooting stars where the pointer moves.
    pub pointer_trail: bool,
    /// Draw links between the pointer and nearby particles.
    pub pointer_links: bool,
    /// Opacity of the backdrop painted each frame; below 1 leaves trails.
    pub fade_alpha: f32,
    /// Fixed RNG seed for reproducible skies.
    pub seed: Option<u64>,
}

impl Default for SimSettings {
    fn default() -> Self {
        Self {
            meteor_chance: 0.008,
            explosion_size: 20,
            link_distance: 120.0,
            star_spacing: 15.0,
            min_stars: 100,
            pointer_trail: true,
            pointer_links: false,
            fade_alpha: 0.25,
            seed: None,
        }
    }
}

impl SimSettings {
    /// Number of stars for a canvas of the given width, at most [`MAX_STARS`].
    pub fn target_star_count(&self, width: f32) -> usize {
        let spacing = self.star_spacing.max(1.0);
        let by_width = if width > 0.0 && width.is_finite() {
            (width / spacing).floor().min(MAX_STARS as f32) as usize
        } else {
            0
        };
        by_width.max(self.min_stars).min(MAX_STARS)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), String> {
        let finite = [
            ("link_distance", self.link_distance),
            ("star_spacing", self.star_spacing),
            ("fade_alpha", self.fade_alpha),
        ];
        if !self.meteor_chance.is_finite() {
            return Err(format!("meteor_chance must be a number, got {}", self.meteor_chance));
        }
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(format!("{name} must be a number, got {value}"));
            }
        }
        Ok(())
    }
}
