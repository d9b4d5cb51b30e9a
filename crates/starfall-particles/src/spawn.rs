//! Spawners that add particles to the registry.

use rand::Rng;
use starfall_core::{Point, SimSettings, Viewport};

use crate::particles::{ExplosionParticle, Meteor, Particle, ShootingStar, Star};
use crate::registry::ParticleRegistry;

/// Shooting stars shed per pointer movement.
pub const TRAIL_PER_MOVE: usize = 2;

/// Replace everything in the registry with a fresh star field.
///
/// Returns the number of stars placed; a degenerate viewport gets none.
pub fn populate_stars<R: Rng + ?Sized>(
    registry: &mut ParticleRegistry,
    viewport: Viewport,
    settings: &SimSettings,
    rng: &mut R,
) -> usize {
    registry.clear();
    if viewport.is_degenerate() {
        return 0;
    }

    let count = settings.target_star_count(viewport.width);
    registry.extend((0..count).map(|_| Particle::from(Star::spawn(viewport, rng))));
    count
}

/// Shed a pair of shooting stars at the pointer.
pub fn spawn_pointer_trail<R: Rng + ?Sized>(registry: &mut ParticleRegistry, at: Point, rng: &mut R) {
    registry.extend((0..TRAIL_PER_MOVE).map(|_| Particle::from(ShootingStar::spawn(at, rng))));
}

/// Run one Bernoulli trial and launch a meteor on success.
///
/// A chance that is not a number never fires.
pub fn maybe_spawn_meteor<R: Rng + ?Sized>(
    registry: &mut ParticleRegistry,
    viewport: Viewport,
    chance: f64,
    rng: &mut R,
) -> bool {
    let chance = if chance.is_nan() { 0.0 } else { chance.clamp(0.0, 1.0) };
    if viewport.is_degenerate() || !rng.gen_bool(chance) {
        return false;
    }
    registry.push(Meteor::spawn(viewport, rng));
    true
}

/// Scatter `count` fragments from a burnt-out meteor's last position.
pub fn spawn_explosion<R: Rng + ?Sized>(
    registry: &mut ParticleRegistry,
    at: Point,
    count: usize,
    rng: &mut R,
) {
    registry.extend((0..count).map(|_| Particle::from(ExplosionParticle::spawn(at, rng))));
}
