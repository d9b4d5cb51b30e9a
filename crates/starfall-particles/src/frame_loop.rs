//! The run loop and the host abstraction that paces it.

use std::collections::VecDeque;
use std::convert::Infallible;

use starfall_core::RenderSurface;
use tracing::trace;

use crate::recording::RecordingSurface;
use crate::simulation::{FrameStats, HostEvent, Simulation};

/// How often per-frame stats are traced.
const TRACE_EVERY: u64 = 600;

/// Handle a driver uses to end the loop that is driving it.
#[derive(Debug, Default)]
pub struct LoopControl {
    stop_requested: bool,
}

impl LoopControl {
    /// Ask the loop to finish; no further frame is produced.
    pub fn stop(&mut self) {
        self.stop_requested = true;
    }

    pub fn is_stop_requested(&self) -> bool {
        self.stop_requested
    }
}

/// A host that decides when frames happen and where they are painted.
pub trait FrameDriver {
    type Error;

    /// Wait for the next repaint slot, applying any host input to `sim`
    /// along the way. Returns `Ok(false)` once the host has gone away; call
    /// [`LoopControl::stop`] to end the loop from inside a run.
    fn wait_frame(&mut self, sim: &mut Simulation, control: &mut LoopControl) -> Result<bool, Self::Error>;

    /// Run `frame` against the host's surface and present the result.
    fn paint(&mut self, frame: &mut dyn FnMut(&mut dyn RenderSurface)) -> Result<(), Self::Error>;
}

/// Drives a [`Simulation`] frame after frame until stopped.
#[derive(Debug, Default)]
pub struct FrameLoop {
    running: bool,
    control: LoopControl,
    frames: u64,
    last_stats: FrameStats,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run until the driver reports the host is gone or a stop is requested
    /// through its [`LoopControl`]. Returns the number of frames produced by
    /// this call.
    pub fn run<D: FrameDriver>(&mut self, sim: &mut Simulation, driver: &mut D) -> Result<u64, D::Error> {
        let start = self.frames;
        self.control = LoopControl::default();
        self.running = true;
        while self.running {
            if !self.step(sim, driver)? {
                break;
            }
        }
        self.running = false;
        Ok(self.frames - start)
    }

    /// Produce a single frame. Returns `Ok(false)` if the driver had none to
    /// give or asked to stop.
    pub fn step<D: FrameDriver>(&mut self, sim: &mut Simulation, driver: &mut D) -> Result<bool, D::Error> {
        let ready = driver.wait_frame(sim, &mut self.control)?;
        if std::mem::take(&mut self.control.stop_requested) {
            self.running = false;
            return Ok(false);
        }
        if !ready {
            return Ok(false);
        }

        let mut stats = FrameStats::default();
        driver.paint(&mut |surface| stats = sim.tick(surface))?;

        self.frames += 1;
        self.last_stats = stats;
        if stats.frame % TRACE_EVERY == 0 {
            trace!(?stats, "frame");
        }
        Ok(true)
    }

    /// Stop between frames; a [`run`](Self::run) in progress ends before its
    /// next frame.
    pub fn stop(&mut self) {
        self.control.stop();
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Frames produced over the lifetime of this loop.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn last_stats(&self) -> FrameStats {
        self.last_stats
    }
}

/// A driver that hands out a fixed number of frames as fast as possible,
/// painting into a [`RecordingSurface`].
#[derive(Debug, Default)]
pub struct FixedFrames {
    remaining: u64,
    elapsed: u64,
    /// Events to deliver before the frame with the given index (0-based).
    script: VecDeque<(u64, HostEvent)>,
    surface: RecordingSurface,
}

impl FixedFrames {
    pub fn new(frames: u64) -> Self {
        Self {
            remaining: frames,
            ..Self::default()
        }
    }

    /// Deliver `event` right before frame `frame` (0-based). Events must be
    /// added in frame order.
    pub fn with_event(mut self, frame: u64, event: HostEvent) -> Self {
        self.script.push_back((frame, event));
        self
    }

    /// What the most recent frame drew.
    pub fn surface(&self) -> &RecordingSurface {
        &self.surface
    }
}

impl FrameDriver for FixedFrames {
    type Error = Infallible;

    fn wait_frame(&mut self, sim: &mut Simulation, _control: &mut LoopControl) -> Result<bool, Infallible> {
        if self.remaining == 0 {
            return Ok(false);
        }
        while let Some(&(frame, event)) = self.script.front() {
            if frame > self.elapsed {
                break;
            }
            sim.handle(event);
            self.script.pop_front();
        }
        self.remaining -= 1;
        self.elapsed += 1;
        Ok(true)
    }

    fn paint(&mut self, frame: &mut dyn FnMut(&mut dyn RenderSurface)) -> Result<(), Infallible> {
        self.surface.clear();
        frame(&mut self.surface);
        Ok(())
    }
}
