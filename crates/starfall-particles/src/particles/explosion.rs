//! Debris thrown off by a burning-out meteor.

use rand::Rng;
use starfall_core::{Point, RenderSurface};

use super::{Fade, draw_glowing_dot};

/// Ticks an explosion fragment lives.
pub const FRAGMENT_LIFE: u32 = 30;

#[derive(Debug, Clone)]
pub struct ExplosionParticle {
    pub position: Point,
    vx: f32,
    vy: f32,
    radius: f32,
    fade: Fade,
}

impl ExplosionParticle {
    pub fn spawn<R: Rng + ?Sized>(at: Point, rng: &mut R) -> Self {
        Self {
            position: at,
            vx: rng.gen_range(-3.0..3.0),
            vy: rng.gen_range(-3.0..3.0),
            radius: rng.gen_range(0.5..1.2),
            fade: Fade::new(FRAGMENT_LIFE),
        }
    }

    pub fn update(&mut self) {
        self.position.x += self.vx;
        self.position.y += self.vy;
        self.fade.tick();
    }

    pub fn draw(&self, surface: &mut dyn RenderSurface) {
        if self.fade.alpha <= 0.0 {
            return;
        }
        draw_glowing_dot(surface, self.position, self.radius, self.fade.alpha, 8.0);
    }

    pub fn is_dead(&self) -> bool {
        self.fade.is_over()
    }

    pub fn alpha(&self) -> f32 {
        self.fade.alpha
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::RecordingSurface;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_dies_after_exactly_its_life() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut fragment = ExplosionParticle::spawn(Point::new(5.0, 5.0), &mut rng);

        for _ in 0..FRAGMENT_LIFE - 1 {
            fragment.update();
            assert!(!fragment.is_dead());
        }
        fragment.update();
        assert!(fragment.is_dead());
        assert!(fragment.alpha() >= 0.0);
    }

    #[test]
    fn test_faded_fragment_draws_nothing() {
        let mut rng = StdRng::seed_from_u64(22);
        let mut fragment = ExplosionParticle::spawn(Point::default(), &mut rng);
        for _ in 0..FRAGMENT_LIFE * 2 {
            fragment.update();
        }

        let mut surface = RecordingSurface::new();
        fragment.draw(&mut surface);
        assert!(surface.ops().is_empty());
    }
}
