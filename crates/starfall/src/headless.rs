//! Headless mode: simulate without a terminal and report what happened.

use std::time::Instant;

use serde::Serialize;
use starfall_config::Config;
use starfall_core::Viewport;
use starfall_particles::{Census, FixedFrames, FrameLoop, FrameStats, Simulation};
use tracing::info;

/// Summary printed as JSON at the end of a headless run.
#[derive(Debug, Serialize)]
pub struct Report {
    pub frames: u64,
    pub width: f32,
    pub height: f32,
    pub elapsed_ms: u128,
    pub frames_per_second: f64,
    pub peak_particles: usize,
    pub meteors: usize,
    pub bursts: usize,
    pub links: usize,
    pub census: Census,
    pub last: FrameStats,
}

/// Step the sky `frames` times as fast as possible.
pub fn simulate(config: &Config, viewport: Viewport, frames: u64) -> Report {
    let mut sim = Simulation::new(config.simulation.clone(), viewport);
    let mut driver = FixedFrames::new(frames);
    let mut frame_loop = FrameLoop::new();
    info!(
        frames,
        width = viewport.width,
        height = viewport.height,
        stars = sim.registry().len(),
        "headless run"
    );

    let mut report = Report {
        frames: 0,
        width: viewport.width,
        height: viewport.height,
        elapsed_ms: 0,
        frames_per_second: 0.0,
        peak_particles: sim.registry().len(),
        meteors: 0,
        bursts: 0,
        links: 0,
        census: sim.census(),
        last: FrameStats::default(),
    };

    let started = Instant::now();
    while let Ok(true) = frame_loop.step(&mut sim, &mut driver) {
        let stats = frame_loop.last_stats();
        report.peak_particles = report.peak_particles.max(stats.particles);
        report.meteors += stats.meteors_spawned;
        report.bursts += stats.bursts;
        report.links += stats.links;
    }
    let elapsed = started.elapsed();

    report.frames = frame_loop.frames();
    report.elapsed_ms = elapsed.as_millis();
    report.frames_per_second = report.frames as f64 / elapsed.as_secs_f64().max(f64::EPSILON);
    report.census = sim.census();
    report.last = frame_loop.last_stats();
    info!(
        frames = report.frames,
        fps = report.frames_per_second,
        "headless run finished"
    );
    report
}

/// Run headless and print the report to stdout.
pub fn run(config: &Config, viewport: Viewport, frames: u64) -> color_eyre::Result<()> {
    let report = simulate(config, viewport, frames);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_counts_frames() {
        let mut config = Config::default();
        config.simulation.seed = Some(5);
        config.simulation.meteor_chance = 0.0;

        let report = simulate(&config, Viewport::new(300.0, 300.0), 30);
        assert_eq!(report.frames, 30);
        assert_eq!(report.last.frame, 30);
        assert_eq!(report.meteors, 0);
        assert_eq!(report.census.stars, 100);
        assert_eq!(report.peak_particles, 100);
    }

    #[test]
    fn test_report_serializes() {
        let mut config = Config::default();
        config.simulation.seed = Some(6);
        let report = simulate(&config, Viewport::new(200.0, 100.0), 3);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["frames"], 3);
        assert_eq!(json["census"]["stars"], 100);
    }
}
