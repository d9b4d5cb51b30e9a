use std::io::stdout;
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{WrapErr, bail, eyre};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use starfall_config::Config;
use starfall_core::{MAX_CANVAS_SIDE, Viewport};

mod app;
mod headless;
mod logging;
mod surface;

use app::App;

/// An animated night sky for your terminal.
#[derive(Debug, Parser)]
#[command(name = "starfall", version, about)]
struct Cli {
    /// Config file to use instead of the default location.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Seed the sky for a reproducible run.
    #[arg(long)]
    seed: Option<u64>,

    /// Target frames per second.
    #[arg(long)]
    fps: Option<u32>,

    /// Don't shed shooting stars where the mouse moves.
    #[arg(long)]
    no_trail: bool,

    /// Link the mouse pointer to nearby particles.
    #[arg(long)]
    pointer_links: bool,

    /// Simulate without a terminal and print a JSON report.
    #[arg(long)]
    headless: bool,

    /// Frames to simulate in headless mode.
    #[arg(long, default_value_t = 600, requires = "headless")]
    frames: u64,

    /// Canvas width in pixels for headless mode.
    #[arg(long, default_value_t = 1280.0, requires = "headless", value_parser = parse_canvas_side)]
    width: f32,

    /// Canvas height in pixels for headless mode.
    #[arg(long, default_value_t = 720.0, requires = "headless", value_parser = parse_canvas_side)]
    height: f32,

    /// Write a default config file and exit.
    #[arg(long)]
    write_default_config: bool,
}

/// A canvas side in pixels: positive, finite and no larger than the engine accepts.
fn parse_canvas_side(s: &str) -> Result<f32, String> {
    let side: f32 = s.parse().map_err(|e| format!("{e}"))?;
    if side.is_finite() && side > 0.0 && side <= MAX_CANVAS_SIDE {
        Ok(side)
    } else {
        Err(format!("must be between 0 and {MAX_CANVAS_SIDE} pixels"))
    }
}

impl Cli {
    /// Command-line flags take precedence over the config file.
    fn apply(&self, config: &mut Config) {
        if let Some(seed) = self.seed {
            config.simulation.seed = Some(seed);
        }
        if let Some(fps) = self.fps {
            config.display.fps = fps;
        }
        if self.no_trail {
            config.simulation.pointer_trail = false;
        }
        if self.pointer_links {
            config.simulation.pointer_links = true;
        }
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    if cli.write_default_config {
        return write_default_config(cli.config.clone());
    }

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    cli.apply(&mut config);
    logging::init(&config.logging, cli.headless).wrap_err("failed to set up logging")?;

    if cli.headless {
        return headless::run(&config, Viewport::new(cli.width, cli.height), cli.frames);
    }

    let terminal = ratatui::init();
    let result = run_interactive(terminal, config);
    ratatui::restore();
    result
}

fn run_interactive(terminal: ratatui::DefaultTerminal, config: Config) -> color_eyre::Result<()> {
    crossterm::execute!(stdout(), EnableMouseCapture)?;
    let result = App::new(terminal, &config.display).run(config.simulation);
    crossterm::execute!(stdout(), DisableMouseCapture)?;
    result
}

fn write_default_config(path: Option<PathBuf>) -> color_eyre::Result<()> {
    let path = path
        .or_else(Config::config_path)
        .ok_or_else(|| eyre!("could not determine a config directory"))?;
    if path.exists() {
        bail!("{} already exists", path.display());
    }
    Config::default().save_to(&path)?;
    println!("wrote {}", path.display());
    Ok(())
}
