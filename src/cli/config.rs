//! Configuration management for convergeviz
//!
//! Provides TOML-based configuration with defaults and validation.
//! Location: ~/.convergeviz/config.toml

use crate::cli::args::Verbosity;
use crate::errors::{Result, VizError};
use crate::plot::{AxisRange, Axes};
use crate::render::{TerminalOptions, MIN_PLAYBACK_SPEED};
use crate::scene::PlaybackTimings;
use crate::series::SeriesKind;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Complete configuration for convergeviz
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub timeline: TimelineConfig,
    pub axes: AxesConfig,
    pub playback: PlaybackConfig,
    pub display: DisplayConfig,
}

/// Which series to sum and how far
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    pub max_index: u64,
    pub series: SeriesKind,
}

/// Plot ranges, titles and canvas size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxesConfig {
    pub x_label: String,
    pub y_label: String,
    pub width: usize,
    pub height: usize,
    pub curve_samples: usize,
    /// Stretch the x axis so the last index stays on screen
    pub fit_to_timeline: bool,
    pub x_range: AxisRange,
    pub y_range: AxisRange,
}

/// Animation timings, in milliseconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    pub move_ms: u64,
    pub write_ms: u64,
    pub pause_ms: u64,
    pub fade_ms: u64,
    pub final_hold_ms: u64,
    pub speed: f64,
}

/// Terminal output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub default_verbosity: String,
    pub color_output: bool,
    pub clear_screen: bool,
    pub show_progress_bars: bool,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            max_index: 10,
            series: SeriesKind::Basel,
        }
    }
}

impl Default for AxesConfig {
    fn default() -> Self {
        Self {
            x_label: "n".to_string(),
            y_label: "Partial Sum".to_string(),
            width: 61,
            height: 21,
            curve_samples: 241,
            fit_to_timeline: true,
            x_range: AxisRange { min: 0.0, max: 10.0, step: 1.0 },
            y_range: AxisRange { min: 0.0, max: 2.0, step: 0.5 },
        }
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            move_ms: 1000,
            write_ms: 1000,
            pause_ms: 200,
            fade_ms: 1000,
            final_hold_ms: 2000,
            speed: 1.0,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            default_verbosity: "normal".to_string(),
            color_output: true,
            clear_screen: true,
            show_progress_bars: true,
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        if let Some(config_path) = path {
            Self::load_from_file(&Self::expand_path(&config_path.to_string_lossy()))
        } else {
            Self::load_default()
        }
    }

    /// Load configuration from specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| VizError::ConfigError(format!("Failed to read config: {}", e)))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| VizError::ConfigError(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load default configuration from standard location or use built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Some(config_path) = Self::default_path() {
            if config_path.exists() {
                return Self::load_from_file(&config_path);
            }
        }

        Ok(Config::default())
    }

    /// Standard config file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".convergeviz").join("config.toml"))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.timeline.max_index == 0 {
            return Err(VizError::ConfigError(
                "timeline.max_index must be greater than 0".to_string(),
            ));
        }

        self.timeline.series.build().map_err(|e| {
            VizError::ConfigError(format!("timeline.series is invalid: {}", e))
        })?;

        self.axes.x_range.validate()?;
        self.axes.y_range.validate()?;

        if self.axes.width < 2 || self.axes.height < 2 {
            return Err(VizError::ConfigError(
                "axes.width and axes.height must be at least 2".to_string(),
            ));
        }

        if self.axes.curve_samples < 2 {
            return Err(VizError::ConfigError(
                "axes.curve_samples must be at least 2".to_string(),
            ));
        }

        let speed = self.playback.speed;
        if !speed.is_finite() || (speed != 0.0 && speed < MIN_PLAYBACK_SPEED) {
            return Err(VizError::ConfigError(format!(
                "playback.speed must be 0 or at least {}, got {}",
                MIN_PLAYBACK_SPEED, speed
            )));
        }

        if Verbosity::from_name(&self.display.default_verbosity).is_none() {
            return Err(VizError::ConfigError(format!(
                "Invalid verbosity level: {}",
                self.display.default_verbosity
            )));
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| VizError::ConfigError(format!("Failed to serialize config: {}", e)))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| VizError::ConfigError(format!("Failed to create config dir: {}", e)))?;
        }

        std::fs::write(path, contents)
            .map_err(|e| VizError::ConfigError(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| VizError::ConfigError(format!("Failed to serialize config: {}", e)))
    }

    /// Expand tilde in paths
    pub fn expand_path(path: &str) -> PathBuf {
        if let Some(rest) = path.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
        PathBuf::from(path)
    }

    /// Axes for the configured canvas, stretched to the timeline if enabled
    pub fn axes(&self) -> Result<Axes> {
        let mut x_range = self.axes.x_range;
        let last = self.timeline.max_index as f64;
        if self.axes.fit_to_timeline && last > x_range.max {
            x_range.max = last;
            x_range.step = x_range.step.max((last / 10.0).ceil());
        }

        Ok(Axes::new(x_range, self.axes.y_range, self.axes.width, self.axes.height)?
            .with_labels(self.axes.x_label.clone(), self.axes.y_label.clone()))
    }

    /// Storyboard timings
    pub fn timings(&self) -> PlaybackTimings {
        PlaybackTimings {
            move_marker: Duration::from_millis(self.playback.move_ms),
            write_label: Duration::from_millis(self.playback.write_ms),
            pause: Duration::from_millis(self.playback.pause_ms),
            fade_out: Duration::from_millis(self.playback.fade_ms),
            final_hold: Duration::from_millis(self.playback.final_hold_ms),
        }
    }

    /// Terminal renderer settings
    pub fn terminal_options(&self) -> TerminalOptions {
        TerminalOptions {
            color: self.display.color_output,
            speed: self.playback.speed,
            clear_screen: self.display.clear_screen,
            ..Default::default()
        }
    }

    /// Verbosity from the config file, used when no flag is given
    pub fn default_verbosity(&self) -> Verbosity {
        Verbosity::from_name(&self.display.default_verbosity).unwrap_or(Verbosity::Normal)
    }
}
