//! Short-lived stars shed by pointer movement.

use rand::Rng;
use starfall_core::{Point, RenderSurface};

use super::{Fade, draw_glowing_dot};

/// Ticks a shooting star lives.
pub const SHOOTING_STAR_LIFE: u32 = 60;

/// A dot that flies in a straight line while fading and shrinking.
#[derive(Debug, Clone)]
pub struct ShootingStar {
    pub position: Point,
    vx: f32,
    vy: f32,
    radius: f32,
    fade: Fade,
}

impl ShootingStar {
    /// A shooting star launched from `at` in a random direction.
    pub fn spawn<R: Rng + ?Sized>(at: Point, rng: &mut R) -> Self {
        Self {
            position: at,
            vx: rng.gen_range(-3.0..3.0),
            vy: rng.gen_range(-3.0..3.0),
            radius: rng.gen_range(1.0..2.5),
            fade: Fade::new(SHOOTING_STAR_LIFE),
        }
    }

    pub fn update(&mut self) {
        self.position.x += self.vx;
        self.position.y += self.vy;
        self.fade.tick();
        // Compounds each tick: quick initial shrink, long faint tail.
        self.radius *= self.fade.alpha;
    }

    pub fn draw(&self, surface: &mut dyn RenderSurface) {
        if self.fade.alpha <= 0.0 {
            return;
        }
        draw_glowing_dot(surface, self.position, self.radius, self.fade.alpha, 12.0);
    }

    pub fn is_dead(&self) -> bool {
        self.fade.is_over()
    }

    pub fn alpha(&self) -> f32 {
        self.fade.alpha
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_dies_after_exactly_its_life() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut star = ShootingStar::spawn(Point::new(100.0, 100.0), &mut rng);

        for _ in 0..SHOOTING_STAR_LIFE - 1 {
            star.update();
        }
        assert!(!star.is_dead());
        star.update();
        assert!(star.is_dead());
    }

    #[test]
    fn test_radius_shrinks_with_alpha_and_stays_positive() {
        let mut rng = StdRng::seed_from_u64(10);
        let mut star = ShootingStar::spawn(Point::default(), &mut rng);
        let mut last = star.radius();

        for _ in 0..SHOOTING_STAR_LIFE {
            star.update();
            assert!(star.radius() <= last);
            assert!(star.radius() >= 0.0);
            assert!((0.0..=1.0).contains(&star.alpha()));
            last = star.radius();
        }
    }

    #[test]
    fn test_moves_in_a_straight_line() {
        let mut rng = StdRng::seed_from_u64(12);
        let mut star = ShootingStar::spawn(Point::new(50.0, 50.0), &mut rng);
        let (vx, vy) = (star.vx, star.vy);

        for _ in 0..10 {
            star.update();
        }
        assert!((star.position.x - (50.0 + 10.0 * vx)).abs() < 1e-3);
        assert!((star.position.y - (50.0 + 10.0 * vy)).abs() < 1e-3);
    }
}
