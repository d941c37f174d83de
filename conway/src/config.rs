// config.rs - Game settings, loaded from an optional JSON file
// Every field has a default, so a partial file (or none at all) is fine:
//   { "solo": { "update_interval": 0.25 }, "versus": { "board_size": 30, "seed": 7 } }

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::patterns::{self, DEFAULT_FILL_PERCENT, Pattern};
use crate::solo::MIN_INTERVAL;

pub const MAX_INTERVAL: f32 = 3600.0;                 // Slowest configurable update, seconds
pub const MAX_BOARD_SIZE: u32 = 10_000;
pub const MAX_HISTORY_LIMIT: usize = 10_000;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub solo: SoloConfig,
    pub versus: MatchConfig,
    /// JSON pattern list replacing the built-in library.
    pub patterns: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SoloConfig {
    /// Seconds between generations.
    pub update_interval: f32,
    /// Chance, in percent, that a random fill makes a cell alive.
    pub fill_percent: u32,
}

impl Default for SoloConfig {
    fn default() -> Self {
        Self {
            update_interval: 0.5,
            fill_percent: DEFAULT_FILL_PERCENT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Board spans `[-board_size / 2, board_size / 2]` on both axes.
    pub board_size: u32,
    pub update_interval: f32,
    /// Past generations remembered for cycle detection.
    pub history_limit: usize,
    /// Fixed seed for tie-breaks; entropy when absent.
    pub seed: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            board_size: 50,
            update_interval: 0.2,
            history_limit: 10,
            seed: None,
        }
    }
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, interval) in [
            ("solo.update_interval", self.solo.update_interval),
            ("versus.update_interval", self.versus.update_interval),
        ] {
            // NaN falls outside the range too.
            if !(MIN_INTERVAL..=MAX_INTERVAL).contains(&interval) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be between {MIN_INTERVAL} and {MAX_INTERVAL}, got {interval}"
                )));
            }
        }
        if self.solo.fill_percent > 100 {
            return Err(ConfigError::Invalid(format!(
                "solo.fill_percent must be at most 100, got {}",
                self.solo.fill_percent
            )));
        }
        if !(1..=MAX_BOARD_SIZE).contains(&self.versus.board_size) {
            return Err(ConfigError::Invalid(format!(
                "versus.board_size must be between 1 and {MAX_BOARD_SIZE}, got {}",
                self.versus.board_size
            )));
        }
        if self.versus.history_limit > MAX_HISTORY_LIMIT {
            return Err(ConfigError::Invalid(format!(
                "versus.history_limit must be at most {MAX_HISTORY_LIMIT}, got {}",
                self.versus.history_limit
            )));
        }
        Ok(())
    }

    /// The configured pattern file, or the built-in library.
    pub fn pattern_library(&self) -> Result<Vec<Pattern>, ConfigError> {
        match &self.patterns {
            Some(path) => patterns::load(path),
            None => Ok(patterns::builtin()),
        }
    }
}
