//! Interactive terminal host.

use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use ratatui::DefaultTerminal;
use starfall_config::DisplayConfig;
use starfall_core::{Point, RenderSurface, SimSettings, Viewport};
use starfall_particles::{FrameDriver, FrameLoop, HostEvent, LoopControl, Simulation};
use tracing::info;

use crate::surface::CanvasSurface;

/// The main application: owns the terminal and paces frames for the sky.
pub struct App {
    terminal: DefaultTerminal,
    canvas: CanvasSurface,
    /// Canvas pixels per terminal cell.
    cell_width_px: f32,
    cell_height_px: f32,
    frame_interval: Duration,
    next_frame: Instant,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(terminal: DefaultTerminal, display: &DisplayConfig) -> Self {
        Self {
            terminal,
            canvas: CanvasSurface::new(display.cell_width_px, display.cell_height_px),
            cell_width_px: display.cell_width_px,
            cell_height_px: display.cell_height_px,
            frame_interval: display.frame_interval(),
            next_frame: Instant::now(),
        }
    }

    /// Run the sky until the user quits.
    pub fn run(mut self, settings: SimSettings) -> color_eyre::Result<()> {
        let size = self.terminal.size()?;
        let viewport = self.viewport_for(size.width, size.height);
        self.canvas.set_viewport(viewport);

        let mut sim = Simulation::new(settings, viewport);
        info!(
            cols = size.width,
            rows = size.height,
            stars = sim.registry().len(),
            "sky started"
        );

        let mut frame_loop = FrameLoop::new();
        let frames = frame_loop.run(&mut sim, &mut self)?;
        info!(frames, particles = sim.registry().len(), "sky closed");
        Ok(())
    }

    /// Canvas size covered by a terminal of the given dimensions.
    fn viewport_for(&self, cols: u16, rows: u16) -> Viewport {
        Viewport::new(
            f32::from(cols) * self.cell_width_px,
            f32::from(rows) * self.cell_height_px,
        )
    }

    /// Canvas position at the centre of a terminal cell.
    fn cell_center(&self, column: u16, row: u16) -> Point {
        Point::new(
            (f32::from(column) + 0.5) * self.cell_width_px,
            (f32::from(row) + 0.5) * self.cell_height_px,
        )
    }

    /// Translate a crossterm event into simulation input.
    fn on_crossterm_event(&mut self, event: Event, sim: &mut Simulation, control: &mut LoopControl) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => on_key_event(key, control),
            Event::Mouse(MouseEvent {
                kind: MouseEventKind::Moved | MouseEventKind::Drag(_),
                column,
                row,
                ..
            }) => sim.handle(HostEvent::PointerMoved(self.cell_center(column, row))),
            Event::Resize(cols, rows) => {
                let viewport = self.viewport_for(cols, rows);
                self.canvas.set_viewport(viewport);
                sim.handle(HostEvent::Resized(viewport));
                info!(cols, rows, stars = sim.registry().len(), "resized");
            }
            _ => {}
        }
    }

}

/// Quit keys stop the frame loop.
fn on_key_event(key: KeyEvent, control: &mut LoopControl) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Esc | KeyCode::Char('q'))
        | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => control.stop(),
        _ => {}
    }
}

impl FrameDriver for App {
    type Error = color_eyre::Report;

    /// Polls crossterm until the next frame is due, feeding input to the sky.
    fn wait_frame(&mut self, sim: &mut Simulation, control: &mut LoopControl) -> color_eyre::Result<bool> {
        loop {
            if control.is_stop_requested() {
                return Ok(false);
            }
            let now = Instant::now();
            if now >= self.next_frame {
                break;
            }
            if event::poll(self.next_frame - now)? {
                let event = event::read()?;
                self.on_crossterm_event(event, sim, control);
            }
        }

        // Missed slots are dropped, not replayed.
        self.next_frame = (self.next_frame + self.frame_interval).max(Instant::now());
        Ok(true)
    }

    fn paint(&mut self, frame: &mut dyn FnMut(&mut dyn RenderSurface)) -> color_eyre::Result<()> {
        self.canvas.clear();
        frame(&mut self.canvas);
        let canvas = &self.canvas;
        self.terminal.draw(|f| canvas.render(f))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(modifiers: KeyModifiers, code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_quit_keys_stop_the_loop() {
        let quits = [
            press(KeyModifiers::NONE, KeyCode::Char('q')),
            press(KeyModifiers::NONE, KeyCode::Esc),
            press(KeyModifiers::CONTROL, KeyCode::Char('c')),
        ];
        for key in quits {
            let mut control = LoopControl::default();
            on_key_event(key, &mut control);
            assert!(control.is_stop_requested(), "{key:?} did not quit");
        }
    }

    #[test]
    fn test_other_keys_keep_running() {
        let mut control = LoopControl::default();
        on_key_event(press(KeyModifiers::NONE, KeyCode::Char('c')), &mut control);
        on_key_event(press(KeyModifiers::NONE, KeyCode::Char('x')), &mut control);
        assert!(!control.is_stop_requested());
    }
}
