//! Night-sky particle simulation for the starfall background.
//!
//! The sky is a single [`Simulation`] owning every particle: permanent
//! twinkling stars, shooting stars shed by the pointer, meteors that cross
//! the canvas and burst into fragments when they leave it. A [`FrameLoop`]
//! steps the simulation once per frame through a host-supplied
//! [`FrameDriver`], which paces frames and provides the render surface.

mod frame_loop;
mod links;
mod particles;
mod recording;
mod registry;
mod simulation;
mod spawn;

pub use frame_loop::{FixedFrames, FrameDriver, FrameLoop, LoopControl};
pub use links::{LINK_MAX_ALPHA, draw_links, link_alpha};
pub use particles::{
    DEATH_MARGIN, Edge, ExplosionParticle, FRAGMENT_LIFE, Meteor, Particle, ParticleKind,
    SHOOTING_STAR_LIFE, SPARKLE_CHANCE, ShootingStar, Star,
};
pub use recording::{DrawOp, RecordingSurface};
pub use registry::{Census, ParticleRegistry, PassCounts};
pub use simulation::{FrameStats, HostEvent, Simulation};
pub use spawn::{
    TRAIL_PER_MOVE, maybe_spawn_meteor, populate_stars, spawn_explosion, spawn_pointer_trail,
};
