//! Single-owner collection of every live particle.

use starfall_core::{Point, RenderSurface, Viewport};

use crate::particles::{Particle, ParticleKind};

/// Owns all particles in the sky.
#[derive(Debug, Default, Clone)]
pub struct ParticleRegistry {
    particles: Vec<Particle>,
}

/// Outcome of one update pass over the registry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassCounts {
    pub drawn: usize,
    pub pruned: usize,
}

/// Per-kind population of the registry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct Census {
    pub stars: usize,
    pub shooting_stars: usize,
    pub meteors: usize,
    pub fragments: usize,
}

impl ParticleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn push(&mut self, particle: impl Into<Particle>) {
        self.particles.push(particle.into());
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    /// Update every particle once, then drop it if dead or draw it if not.
    ///
    /// Walks indices from the back so `swap_remove` only ever moves an
    /// already-visited particle into the hole. Burst origins reported by
    /// meteors are appended to `bursts`.
    pub fn update_and_draw(
        &mut self,
        viewport: Viewport,
        surface: &mut dyn RenderSurface,
        bursts: &mut Vec<Point>,
    ) -> PassCounts {
        let mut counts = PassCounts::default();

        for i in (0..self.particles.len()).rev() {
            let particle = &mut self.particles[i];
            if let Some(origin) = particle.update(viewport) {
                bursts.push(origin);
            }
            if particle.is_dead() {
                self.particles.swap_remove(i);
                counts.pruned += 1;
            } else {
                particle.draw(surface);
                counts.drawn += 1;
            }
        }

        counts
    }

    /// Copy every particle position into `out`, replacing its contents.
    pub fn positions_into(&self, out: &mut Vec<Point>) {
        out.clear();
        out.extend(self.particles.iter().map(Particle::position));
    }

    pub fn census(&self) -> Census {
        let mut census = Census::default();
        for particle in &self.particles {
            match particle.kind() {
                ParticleKind::Star => census.stars += 1,
                ParticleKind::ShootingStar => census.shooting_stars += 1,
                ParticleKind::Meteor => census.meteors += 1,
                ParticleKind::Explosion => census.fragments += 1,
            }
        }
        census
    }
}

impl Extend<Particle> for ParticleRegistry {
    fn extend<T: IntoIterator<Item = Particle>>(&mut self, iter: T) {
        self.particles.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particles::{ExplosionParticle, Meteor, Star};
    use crate::recording::RecordingSurface;
    use rand::{SeedableRng, rngs::StdRng};

    const VIEWPORT: Viewport = Viewport::new(800.0, 600.0);

    #[test]
    fn test_dead_particles_are_pruned_not_drawn() {
        let mut rng = StdRng::seed_from_u64(41);
        let mut registry = ParticleRegistry::new();
        registry.push(Star::spawn(VIEWPORT, &mut rng));
        // Burns out on its first update
        registry.push(Meteor::new(Point::new(845.0, 300.0), 10.0, 0.0, 3.0, 40));
        registry.push(Star::spawn(VIEWPORT, &mut rng));

        let mut surface = RecordingSurface::new();
        let mut bursts = Vec::new();
        let counts = registry.update_and_draw(VIEWPORT, &mut surface, &mut bursts);

        assert_eq!(counts, PassCounts { drawn: 2, pruned: 1 });
        assert_eq!(registry.len(), 2);
        assert_eq!(surface.circle_count(), 2);
        assert_eq!(bursts, vec![Point::new(855.0, 300.0)]);
        assert!(registry.iter().all(|p| p.kind() == ParticleKind::Star));
    }

    #[test]
    fn test_each_particle_visited_once_when_many_die() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut registry = ParticleRegistry::new();
        for i in 0..10 {
            if i % 2 == 0 {
                registry.push(Star::spawn(VIEWPORT, &mut rng));
            } else {
                registry.push(Meteor::new(Point::new(-45.0, 10.0), -10.0, 0.0, 3.0, 40));
            }
        }

        let mut surface = RecordingSurface::new();
        let mut bursts = Vec::new();
        let counts = registry.update_and_draw(VIEWPORT, &mut surface, &mut bursts);

        assert_eq!(counts.drawn + counts.pruned, 10);
        assert_eq!(counts.pruned, 5);
        assert_eq!(bursts.len(), 5);
        assert_eq!(registry.census().stars, 5);
    }

    #[test]
    fn test_census() {
        let mut rng = StdRng::seed_from_u64(43);
        let mut registry = ParticleRegistry::new();
        registry.push(Star::spawn(VIEWPORT, &mut rng));
        registry.push(ExplosionParticle::spawn(Point::default(), &mut rng));
        registry.push(ExplosionParticle::spawn(Point::default(), &mut rng));

        assert_eq!(
            registry.census(),
            Census {
                stars: 1,
                shooting_stars: 0,
                meteors: 0,
                fragments: 2,
            }
        );
    }
}
