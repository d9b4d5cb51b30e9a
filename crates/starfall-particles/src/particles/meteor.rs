//! Meteors that streak across the sky and burst when they leave it.

use std::collections::VecDeque;

use rand::Rng;
use starfall_core::{Glow, Point, RenderSurface, Rgba, Viewport};

/// How far past an edge a meteor travels before it bursts.
pub const DEATH_MARGIN: f32 = 50.0;

/// Distance outside the edge at which meteors appear.
const SPAWN_OFFSET: f32 = 20.0;

/// Edge of the canvas a meteor enters from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Left,
    Right,
}

impl Edge {
    pub const ALL: [Edge; 3] = [Edge::Top, Edge::Left, Edge::Right];
}

#[derive(Debug, Clone)]
pub struct Meteor {
    position: Point,
    vx: f32,
    vy: f32,
    radius: f32,
    alpha: f32,
    tail_length: usize,
    history: VecDeque<Point>,
    dead: bool,
}

impl Meteor {
    /// A meteor with fixed motion.
    pub fn new(position: Point, vx: f32, vy: f32, radius: f32, tail_length: usize) -> Self {
        Self {
            position,
            vx,
            vy,
            radius,
            alpha: 1.0,
            tail_length,
            history: VecDeque::with_capacity(tail_length + 1),
            dead: false,
        }
    }

    /// A meteor entering from a uniformly chosen edge, aimed across the canvas.
    pub fn spawn<R: Rng + ?Sized>(viewport: Viewport, rng: &mut R) -> Self {
        let edge = Edge::ALL[rng.gen_range(0..Edge::ALL.len())];
        Self::spawn_from(edge, viewport, rng)
    }

    pub fn spawn_from<R: Rng + ?Sized>(edge: Edge, viewport: Viewport, rng: &mut R) -> Self {
        let width = viewport.width.max(f32::EPSILON);
        let height = viewport.height.max(f32::EPSILON);

        let (position, vx, vy) = match edge {
            // Falls downward with a wide horizontal spread
            Edge::Top => (
                Point::new(rng.gen_range(0.0..width), -SPAWN_OFFSET),
                rng.gen_range(-4.0..4.0),
                rng.gen_range(6.0..10.0),
            ),
            // Sideways entries stay roughly level
            Edge::Left => (
                Point::new(-SPAWN_OFFSET, rng.gen_range(0.0..height)),
                rng.gen_range(6.0..10.0),
                rng.gen_range(-2.0..2.0),
            ),
            Edge::Right => (
                Point::new(viewport.width + SPAWN_OFFSET, rng.gen_range(0.0..height)),
                rng.gen_range(-10.0..-6.0),
                rng.gen_range(-2.0..2.0),
            ),
        };

        Self::new(
            position,
            vx,
            vy,
            rng.gen_range(2.5..4.0),
            rng.gen_range(30..=60),
        )
    }

    /// Advance one tick.
    ///
    /// Returns the burst origin on the tick the meteor leaves the canvas.
    /// Once dead, further updates change nothing.
    pub fn update(&mut self, viewport: Viewport) -> Option<Point> {
        if self.dead {
            return None;
        }

        self.position.x += self.vx;
        self.position.y += self.vy;

        self.history.push_back(self.position);
        while self.history.len() > self.tail_length {
            self.history.pop_front();
        }

        if viewport.is_beyond(self.position, DEATH_MARGIN) {
            self.dead = true;
            return Some(self.position);
        }
        None
    }

    pub fn draw(&self, surface: &mut dyn RenderSurface) {
        if self.dead {
            return;
        }

        // Tail, newest segment brightest
        let len = self.history.len();
        for i in (1..len).rev() {
            let alpha = i as f32 / len as f32 * 0.5;
            surface.stroke_line(self.history[i - 1], self.history[i], 2.0, Rgba::white(alpha));
        }

        surface.fill_circle(
            self.position,
            self.radius,
            Rgba::white(self.alpha),
            Some(Glow::new(15.0, Rgba::white(1.0))),
        );
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn tail_length(&self) -> usize {
        self.tail_length
    }

    pub fn history(&self) -> &VecDeque<Point> {
        &self.history
    }
}
