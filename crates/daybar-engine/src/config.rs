//! Configuration types for the daybar engine.
//!
//! This module defines the configuration schema: the mapped time range,
//! the lunch break, the first-row policy, seed markers, and the
//! click disambiguation window.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::model::{MAX_MARKERS, MIN_MARKERS};
use crate::rows::FirstRowPolicy;
use crate::time::TimeRange;

/// Main configuration for daybar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Hours covered by the bar.
    #[serde(default)]
    pub range: TimeRange,

    /// Fixed lunch break pinned by the lunch toggle.
    #[serde(default)]
    pub lunch: LunchBreak,

    /// How the first sorted marker is turned into a row.
    #[serde(default)]
    pub first_row: FirstRowPolicy,

    /// Initial marker positions in percent.
    #[serde(default = "default_seed_positions")]
    pub seed_positions: Vec<f64>,

    /// Window in which a second click counts as a double click.
    #[serde(default = "default_click_window_ms")]
    pub click_window_ms: u64,
}

fn default_seed_positions() -> Vec<f64> {
    vec![0.0, 50.0, 100.0]
}

fn default_click_window_ms() -> u64 {
    300
}

/// The lunch break interval, in fractional hours.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LunchBreak {
    #[serde(default = "default_lunch_start")]
    pub start_hour: f64,

    #[serde(default = "default_lunch_end")]
    pub end_hour: f64,
}

fn default_lunch_start() -> f64 {
    12.0
}

fn default_lunch_end() -> f64 {
    13.0
}

impl Default for LunchBreak {
    fn default() -> Self {
        Self {
            start_hour: default_lunch_start(),
            end_hour: default_lunch_end(),
        }
    }
}

impl LunchBreak {
    /// Length of the break in whole minutes.
    pub fn minutes(&self) -> i64 {
        crate::time::minutes_between(self.start_hour, self.end_hour)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            range: TimeRange::default(),
            lunch: LunchBreak::default(),
            first_row: FirstRowPolicy::default(),
            seed_positions: default_seed_positions(),
            click_window_ms: default_click_window_ms(),
        }
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        let config: Self = serde_json::from_str(&content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }
        std::fs::write(path, content).map_err(ConfigError::Io)
    }

    /// Click disambiguation window as a [`Duration`].
    pub fn click_window(&self) -> Duration {
        Duration::from_millis(self.click_window_ms)
    }

    /// Check the configuration for values the model cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let TimeRange { min_hour, max_hour } = self.range;
        if !(min_hour.is_finite() && max_hour.is_finite()) || min_hour >= max_hour {
            return Err(ConfigError::Invalid(format!(
                "time range {min_hour}..{max_hour} is empty"
            )));
        }

        let LunchBreak {
            start_hour,
            end_hour,
        } = self.lunch;
        if start_hour >= end_hour {
            return Err(ConfigError::Invalid(format!(
                "lunch break {start_hour}..{end_hour} is empty"
            )));
        }
        if !self.range.contains(start_hour) || !self.range.contains(end_hour) {
            return Err(ConfigError::Invalid(format!(
                "lunch break {start_hour}..{end_hour} lies outside {min_hour}..{max_hour}"
            )));
        }

        let seeds = self.seed_positions.len();
        if !(MIN_MARKERS..=MAX_MARKERS).contains(&seeds) {
            return Err(ConfigError::Invalid(format!(
                "{seeds} seed markers given, expected {MIN_MARKERS} to {MAX_MARKERS}"
            )));
        }

        Ok(())
    }
}

/// Errors that can occur when working with configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading or writing config.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing config JSON.
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// Error serializing config to JSON.
    #[error("Serialize error: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Values that parse but cannot drive a timeline.
    #[error("Invalid config: {0}")]
    Invalid(String),
}
