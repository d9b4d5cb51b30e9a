//! Particle variants and the common update/draw/death dispatch.

mod explosion;
mod meteor;
mod shooting_star;
mod star;

pub use explosion::{ExplosionParticle, FRAGMENT_LIFE};
pub use meteor::{DEATH_MARGIN, Edge, Meteor};
pub use shooting_star::{SHOOTING_STAR_LIFE, ShootingStar};
pub use star::{SPARKLE_CHANCE, Star};

use starfall_core::{Glow, Point, RenderSurface, Rgba, Viewport};

/// Every kind of entity the simulation animates.
#[derive(Debug, Clone)]
pub enum Particle {
    Star(Star),
    ShootingStar(ShootingStar),
    Meteor(Meteor),
    Explosion(ExplosionParticle),
}

/// Discriminant of a [`Particle`], used for bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParticleKind {
    Star,
    ShootingStar,
    Meteor,
    Explosion,
}

impl Particle {
    /// Advance one tick.
    ///
    /// Returns the burst origin when a meteor burns out on this tick.
    pub fn update(&mut self, viewport: Viewport) -> Option<Point> {
        match self {
            Particle::Star(star) => {
                star.update();
                None
            }
            Particle::ShootingStar(star) => {
                star.update();
                None
            }
            Particle::Meteor(meteor) => meteor.update(viewport),
            Particle::Explosion(fragment) => {
                fragment.update();
                None
            }
        }
    }

    pub fn draw(&self, surface: &mut dyn RenderSurface) {
        match self {
            Particle::Star(star) => star.draw(surface),
            Particle::ShootingStar(star) => star.draw(surface),
            Particle::Meteor(meteor) => meteor.draw(surface),
            Particle::Explosion(fragment) => fragment.draw(surface),
        }
    }

    /// Whether the particle should be removed. Stars never die.
    pub fn is_dead(&self) -> bool {
        match self {
            Particle::Star(_) => false,
            Particle::ShootingStar(star) => star.is_dead(),
            Particle::Meteor(meteor) => meteor.is_dead(),
            Particle::Explosion(fragment) => fragment.is_dead(),
        }
    }

    pub fn position(&self) -> Point {
        match self {
            Particle::Star(star) => star.position,
            Particle::ShootingStar(star) => star.position,
            Particle::Meteor(meteor) => meteor.position(),
            Particle::Explosion(fragment) => fragment.position,
        }
    }

    pub fn alpha(&self) -> f32 {
        match self {
            Particle::Star(star) => star.alpha(),
            Particle::ShootingStar(star) => star.alpha(),
            Particle::Meteor(meteor) => meteor.alpha(),
            Particle::Explosion(fragment) => fragment.alpha(),
        }
    }

    pub fn kind(&self) -> ParticleKind {
        match self {
            Particle::Star(_) => ParticleKind::Star,
            Particle::ShootingStar(_) => ParticleKind::ShootingStar,
            Particle::Meteor(_) => ParticleKind::Meteor,
            Particle::Explosion(_) => ParticleKind::Explosion,
        }
    }
}

impl From<Star> for Particle {
    fn from(star: Star) -> Self {
        Particle::Star(star)
    }
}

impl From<ShootingStar> for Particle {
    fn from(star: ShootingStar) -> Self {
        Particle::ShootingStar(star)
    }
}

impl From<Meteor> for Particle {
    fn from(meteor: Meteor) -> Self {
        Particle::Meteor(meteor)
    }
}

impl From<ExplosionParticle> for Particle {
    fn from(fragment: ExplosionParticle) -> Self {
        Particle::Explosion(fragment)
    }
}

/// Draw a white dot whose glow matches its own opacity.
fn draw_glowing_dot(surface: &mut dyn RenderSurface, center: Point, radius: f32, alpha: f32, blur: f32) {
    let color = Rgba::white(alpha);
    surface.fill_circle(center, radius, color, Some(Glow::new(blur, color)));
}

/// Linear fade shared by the short-lived particles.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Fade {
    life: u32,
    alpha: f32,
    decay: f32,
}

impl Fade {
    fn new(life: u32) -> Self {
        Self {
            life,
            alpha: 1.0,
            decay: 1.0 / life.max(1) as f32,
        }
    }

    fn tick(&mut self) {
        self.alpha = (self.alpha - self.decay).max(0.0);
        self.life = self.life.saturating_sub(1);
    }

    fn is_over(&self) -> bool {
        self.life == 0 || self.alpha <= 0.0
    }
}
