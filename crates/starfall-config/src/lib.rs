//! Configuration file handling for starfall.
//!
//! Settings live in `config.toml` under the platform config directory
//! (e.g. `~/.config/starfall/config.toml` on Linux). Every key is optional;
//! anything missing falls back to its default.

mod error;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
pub use starfall_core::SimSettings;

pub use error::ConfigError;

const CONFIG_FILE: &str = "config.toml";

/// Top-level application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub simulation: SimSettings,
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
}

/// How the sky is mapped onto the terminal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Target frames per second.
    pub fps: u32,
    /// Canvas pixels covered by one terminal cell horizontally.
    pub cell_width_px: f32,
    /// Canvas pixels covered by one terminal cell vertically.
    pub cell_height_px: f32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            fps: 60,
            cell_width_px: 8.0,
            cell_height_px: 16.0,
        }
    }
}

impl DisplayConfig {
    /// Time between frames, with the rate held to 1..=240 fps.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.fps.clamp(1, 240)
    }
}

/// Where diagnostics go.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log file for interactive runs. Nothing is logged without one, since
    /// the terminal is busy drawing the sky.
    pub file: Option<PathBuf>,
    /// Filter directive, e.g. `info` or `starfall_particles=debug`.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: None,
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Default location of the config file, if the platform has one.
    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "starfall").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Load from the default location; a missing file yields defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path().ok_or(ConfigError::NoConfigDir)?;
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load from an explicit path, which must exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate().map_err(|reason| ConfigError::Invalid {
            path: path.to_path_buf(),
            reason,
        })?;
        Ok(config)
    }

    /// Check values that parse fine but would break the sky.
    pub fn validate(&self) -> Result<(), String> {
        self.simulation.validate()?;
        let cells = [
            ("cell_width_px", self.display.cell_width_px),
            ("cell_height_px", self.display.cell_height_px),
        ];
        for (name, value) in cells {
            if !(value.is_finite() && value > 0.0) {
                return Err(format!("{name} must be a positive number, got {value}"));
            }
        }
        Ok(())
    }

    /// Write this configuration as TOML, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let text = toml::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(path, text).map_err(io_err)
    }
}
