//! Application configuration.

use std::path::{Path, PathBuf};

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tictactoe_rules::Mark;
use tracing::{debug, info, instrument};

use crate::{ConfigError, Mode};

/// File looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "tictactoe.toml";

/// Settings for a game session.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Mode the first game starts in.
    #[serde(default)]
    mode: Mode,

    /// Mark played by the computer in player-vs-computer mode.
    #[serde(default = "default_automated_mark")]
    automated_mark: Mark,

    /// Cosmetic pause before the computer moves.
    #[serde(default = "default_ai_delay_ms")]
    ai_delay_ms: u64,

    /// Fixed seed for the computer's random tie-breaks.
    #[serde(default)]
    seed: Option<u64>,

    /// Where the terminal UI writes its log.
    #[serde(default = "default_log_file")]
    log_file: PathBuf,
}

fn default_automated_mark() -> Mark {
    Mark::O
}

fn default_ai_delay_ms() -> u64 {
    500
}

fn default_log_file() -> PathBuf {
    PathBuf::from("tictactoe.log")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            automated_mark: default_automated_mark(),
            ai_delay_ms: default_ai_delay_ms(),
            seed: None,
            log_file: default_log_file(),
        }
    }
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Overrides {
    /// Starting mode.
    pub mode: Option<Mode>,
    /// Computer's mark.
    pub automated_mark: Option<Mark>,
    /// Delay in milliseconds.
    pub ai_delay_ms: Option<u64>,
    /// RNG seed.
    pub seed: Option<u64>,
}

impl AppConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        info!(mode = %config.mode, "Config loaded successfully");
        Ok(config)
    }

    /// Loads `path` if given, otherwise [`DEFAULT_CONFIG_FILE`] if present,
    /// otherwise defaults.
    #[instrument]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::from_file(DEFAULT_CONFIG_FILE),
            None => {
                debug!("No config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Applies command-line overrides.
    #[must_use]
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(mode) = overrides.mode {
            self.mode = mode;
        }
        if let Some(mark) = overrides.automated_mark {
            self.automated_mark = mark;
        }
        if let Some(ms) = overrides.ai_delay_ms {
            self.ai_delay_ms = ms;
        }
        if overrides.seed.is_some() {
            self.seed = overrides.seed;
        }
        self
    }
}
