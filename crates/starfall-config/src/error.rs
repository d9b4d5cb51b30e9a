//! Configuration errors.

use std::fmt;
use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum ConfigError {
    /// The platform offers no config directory (no home directory).
    NoConfigDir,
    /// Reading or writing the file failed.
    Io { path: PathBuf, source: io::Error },
    /// The file is not valid TOML for [`crate::Config`].
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    /// The file parsed but holds values the sky cannot run with.
    Invalid { path: PathBuf, reason: String },
    Serialize(toml::ser::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NoConfigDir => write!(f, "could not determine a config directory"),
            ConfigError::Io { path, source } => write!(f, "{}: {source}", path.display()),
            ConfigError::Parse { path, source } => {
                write!(f, "invalid config {}: {source}", path.display())
            }
            ConfigError::Invalid { path, reason } => {
                write!(f, "invalid config {}: {reason}", path.display())
            }
            ConfigError::Serialize(source) => write!(f, "could not serialize config: {source}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::NoConfigDir | ConfigError::Invalid { .. } => None,
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
            ConfigError::Serialize(source) => Some(source),
        }
    }
}
