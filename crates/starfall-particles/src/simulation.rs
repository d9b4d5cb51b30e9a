//! Simulation context: viewport, registry, pointer and RNG in one place.

use rand::{SeedableRng, rngs::StdRng};
use serde::Serialize;
use starfall_core::{BACKGROUND, Point, RenderSurface, SimSettings, Viewport};
use tracing::debug;

use crate::links::draw_links;
use crate::registry::{Census, ParticleRegistry};
use crate::spawn;

/// Input delivered by the host between frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    PointerMoved(Point),
    Resized(Viewport),
}

/// What happened during one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FrameStats {
    /// Frame number, starting at 1.
    pub frame: u64,
    /// Registry size after the frame.
    pub particles: usize,
    pub drawn: usize,
    pub pruned: usize,
    pub meteors_spawned: usize,
    pub bursts: usize,
    pub links: usize,
}

/// The night sky: everything the frame loop and spawners operate on.
#[derive(Debug)]
pub struct Simulation {
    settings: SimSettings,
    viewport: Viewport,
    registry: ParticleRegistry,
    /// Last known pointer position.
    pointer: Option<Point>,
    rng: StdRng,
    frame: u64,
    /// Scratch buffers reused across frames.
    positions: Vec<Point>,
    bursts: Vec<Point>,
}

impl Simulation {
    /// Create a simulation and fill it with its initial star field.
    pub fn new(settings: SimSettings, viewport: Viewport) -> Self {
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut sim = Self {
            settings,
            viewport,
            registry: ParticleRegistry::new(),
            pointer: None,
            rng,
            frame: 0,
            positions: Vec::new(),
            bursts: Vec::new(),
        };
        sim.reinitialize();
        sim
    }

    /// Adopt a new canvas size and rebuild the star field.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.reinitialize();
    }

    /// Discard every particle and lay out a fresh star field.
    pub fn reinitialize(&mut self) {
        let stars =
            spawn::populate_stars(&mut self.registry, self.viewport, &self.settings, &mut self.rng);
        debug!(
            stars,
            width = self.viewport.width,
            height = self.viewport.height,
            "star field initialized"
        );
    }

    /// Record the pointer and shed a shooting-star trail if enabled.
    pub fn pointer_moved(&mut self, at: Point) {
        self.pointer = Some(at);
        if self.settings.pointer_trail && !self.viewport.is_degenerate() {
            spawn::spawn_pointer_trail(&mut self.registry, at, &mut self.rng);
        }
    }

    pub fn handle(&mut self, event: HostEvent) {
        match event {
            HostEvent::PointerMoved(at) => self.pointer_moved(at),
            HostEvent::Resized(viewport) => self.resize(viewport),
        }
    }

    /// Run one frame: fade the backdrop, maybe launch a meteor, update and
    /// draw every particle, then draw the proximity links.
    pub fn tick(&mut self, surface: &mut dyn RenderSurface) -> FrameStats {
        self.frame += 1;
        let viewport = self.viewport;

        surface.fill_rect(
            0.0,
            0.0,
            viewport.width,
            viewport.height,
            BACKGROUND.with_alpha(self.settings.fade_alpha),
        );

        let meteor = spawn::maybe_spawn_meteor(
            &mut self.registry,
            viewport,
            self.settings.meteor_chance,
            &mut self.rng,
        );

        self.bursts.clear();
        let pass = self
            .registry
            .update_and_draw(viewport, surface, &mut self.bursts);

        for &origin in &self.bursts {
            debug!(x = origin.x, y = origin.y, "meteor burst");
            spawn::spawn_explosion(
                &mut self.registry,
                origin,
                self.settings.explosion_size,
                &mut self.rng,
            );
        }

        self.registry.positions_into(&mut self.positions);
        let pointer = self.pointer.filter(|_| self.settings.pointer_links);
        let links = draw_links(
            &self.positions,
            pointer,
            self.settings.link_distance,
            surface,
        );

        FrameStats {
            frame: self.frame,
            particles: self.registry.len(),
            drawn: pass.drawn,
            pruned: pass.pruned,
            meteors_spawned: usize::from(meteor),
            bursts: self.bursts.len(),
            links,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn settings(&self) -> &SimSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut SimSettings {
        &mut self.settings
    }

    pub fn registry(&self) -> &ParticleRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ParticleRegistry {
        &mut self.registry
    }

    pub fn census(&self) -> Census {
        self.registry.census()
    }

    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    /// Frames simulated so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Star count the current viewport calls for.
    pub fn target_star_count(&self) -> usize {
        if self.viewport.is_degenerate() {
            0
        } else {
            self.settings.target_star_count(self.viewport.width)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particles::{Meteor, Particle, ParticleKind};
    use crate::recording::{DrawOp, RecordingSurface};

    fn settings(meteor_chance: f64) -> SimSettings {
        SimSettings {
            meteor_chance,
            seed: Some(2024),
            ..SimSettings::default()
        }
    }

    #[test]
    fn test_initial_field_is_only_stars() {
        let sim = Simulation::new(settings(0.0), Viewport::new(300.0, 300.0));
        let census = sim.census();
        assert_eq!(census.stars, 100);
        assert_eq!(sim.registry().len(), 100);
    }

    #[test]
    fn test_resize_rebuilds_star_field() {
        let mut sim = Simulation::new(settings(0.0), Viewport::new(800.0, 600.0));
        assert_eq!(sim.target_star_count(), 100);
        sim.pointer_moved(Point::new(10.0, 10.0));
        sim.registry_mut()
            .push(Meteor::new(Point::new(400.0, 300.0), 1.0, 1.0, 3.0, 40));
        assert_eq!(sim.registry().len(), 103);

        sim.resize(Viewport::new(1600.0, 600.0));
        assert_eq!(sim.target_star_count(), 106);
        assert_eq!(sim.registry().len(), 106);
        assert!(sim.registry().iter().all(|p| p.kind() == ParticleKind::Star));
    }

    #[test]
    fn test_degenerate_viewport_spawns_nothing() {
        let mut sim = Simulation::new(settings(1.0), Viewport::new(0.0, 0.0));
        sim.pointer_moved(Point::new(1.0, 1.0));
        let stats = sim.tick(&mut RecordingSurface::new());
        assert_eq!(stats.particles, 0);
        assert_eq!(stats.meteors_spawned, 0);

        sim.handle(HostEvent::Resized(Viewport::new(300.0, 300.0)));
        assert_eq!(sim.registry().len(), 100);
    }

    #[test]
    fn test_unbounded_viewport_stays_empty() {
        let mut sim = Simulation::new(settings(1.0), Viewport::new(f32::INFINITY, 600.0));
        assert!(sim.registry().is_empty());
        let stats = sim.tick(&mut RecordingSurface::new());
        assert_eq!(stats.meteors_spawned, 0);
    }

    #[test]
    fn test_nan_meteor_chance_does_not_panic() {
        let mut sim = Simulation::new(settings(f64::NAN), Viewport::new(300.0, 300.0));
        let stats = sim.tick(&mut RecordingSurface::new());
        assert_eq!(stats.meteors_spawned, 0);
        assert_eq!(stats.particles, 100);
    }

    #[test]
    fn test_meteor_burst_on_exit() {
        let mut sim = Simulation::new(settings(0.0), Viewport::new(800.0, 600.0));
        sim.registry_mut()
            .push(Meteor::new(Point::new(400.0, 645.0), 0.0, 6.0, 3.0, 40));

        let stats = sim.tick(&mut RecordingSurface::new());
        assert_eq!(stats.bursts, 1);
        assert_eq!(stats.pruned, 1);

        let census = sim.census();
        assert_eq!(census.meteors, 0);
        assert_eq!(census.fragments, 20);
        assert!(
            sim.registry()
                .iter()
                .filter(|p| matches!(p, Particle::Explosion(_)))
                .all(|p| p.position() == Point::new(400.0, 651.0))
        );
    }

    #[test]
    fn test_frame_starts_with_backdrop() {
        let mut sim = Simulation::new(settings(0.0), Viewport::new(800.0, 600.0));
        let mut surface = RecordingSurface::new();
        sim.tick(&mut surface);

        match surface.ops().first() {
            Some(DrawOp::Rect {
                width,
                height,
                color,
                ..
            }) => {
                assert_eq!((*width, *height), (800.0, 600.0));
                assert_eq!(color.a, SimSettings::default().fade_alpha);
            }
            other => panic!("expected backdrop first, got {other:?}"),
        }
    }

    #[test]
    fn test_pointer_trail_toggle() {
        let mut sim = Simulation::new(settings(0.0), Viewport::new(800.0, 600.0));
        sim.settings_mut().pointer_trail = false;
        sim.pointer_moved(Point::new(5.0, 5.0));
        assert_eq!(sim.census().shooting_stars, 0);
        assert_eq!(sim.pointer(), Some(Point::new(5.0, 5.0)));

        sim.settings_mut().pointer_trail = true;
        sim.pointer_moved(Point::new(5.0, 5.0));
        assert_eq!(sim.census().shooting_stars, 2);
    }

    #[test]
    fn test_pointer_links_only_when_enabled() {
        let mut base = settings(0.0);
        base.min_stars = 0;
        base.pointer_trail = false;
        let viewport = Viewport::new(10.0, 10.0);

        let mut sim = Simulation::new(base, viewport);
        sim.registry_mut().clear();
        sim.registry_mut().push(
            crate::particles::ExplosionParticle::spawn(Point::new(5.0, 5.0), &mut StdRng::seed_from_u64(1)),
        );
        sim.pointer_moved(Point::new(6.0, 6.0));
        assert_eq!(sim.tick(&mut RecordingSurface::new()).links, 0);

        sim.settings_mut().pointer_links = true;
        assert_eq!(sim.tick(&mut RecordingSurface::new()).links, 1);
    }

    #[test]
    fn test_same_seed_same_sky() {
        let a = Simulation::new(settings(0.0), Viewport::new(800.0, 600.0));
        let b = Simulation::new(settings(0.0), Viewport::new(800.0, 600.0));
        let pa: Vec<Point> = a.registry().iter().map(Particle::position).collect();
        let pb: Vec<Point> = b.registry().iter().map(Particle::position).collect();
        assert_eq!(pa, pb);
    }
}
