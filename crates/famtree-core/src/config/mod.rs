//! Configuration management for famtree.
//!
//! Configuration is loaded from multiple sources with the following priority:
//! 1. Environment variables (highest priority)
//! 2. Project-local `famtree.toml` file
//! 3. User config `~/.config/famtree/config.toml`
//! 4. Built-in defaults (lowest priority)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

mod defaults;

pub use defaults::*;

use crate::layout::{DisplayPreset, LayoutMetrics};
use crate::viewport::ZoomSettings;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Display preset and layout/zoom overrides.
    pub display: DisplayConfig,

    /// Tree building configuration.
    pub tree: TreeConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// Searches for config in order:
    /// 1. `./famtree.toml` (project local)
    /// 2. `~/.config/famtree/config.toml` (user config)
    /// 3. Falls back to defaults
    ///
    /// Environment overrides apply in every case.
    pub fn load() -> Result<Self, ConfigError> {
        if Path::new(PROJECT_CONFIG_FILE).exists() {
            return Self::from_file(PROJECT_CONFIG_FILE);
        }

        if let Some(path) = Self::user_config_path() {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        let mut config = Self::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Path of the per-user config file, if the platform has a config dir.
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(USER_CONFIG_DIR).join(USER_CONFIG_FILE))
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(preset) = std::env::var("FAMTREE_PRESET") {
            if let Ok(preset) = preset.parse() {
                self.display.preset = preset;
            }
        }
        if let Ok(depth) = std::env::var("FAMTREE_MAX_DEPTH") {
            if let Ok(n) = depth.parse() {
                self.tree.max_depth = n;
            }
        }
        if let Ok(root) = std::env::var("FAMTREE_ROOT") {
            self.tree.root = Some(root);
        }
        if let Ok(level) = std::env::var("FAMTREE_LOG") {
            self.logging.level = level;
        }
        if let Ok(file) = std::env::var("FAMTREE_LOG_FILE") {
            self.logging.file = Some(PathBuf::from(file));
        }
    }

    /// Reject values the layout and viewport cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let metrics = self.display.metrics();
        if metrics.horizontal_spacing <= 0.0 || metrics.vertical_spacing <= 0.0 {
            return Err(ConfigError::Invalid(
                "spacing must be greater than zero".to_string(),
            ));
        }

        let zoom = self.display.zoom();
        if zoom.min_scale <= 0.0 || zoom.min_scale > zoom.max_scale {
            return Err(ConfigError::Invalid(format!(
                "zoom range {}..{} is empty or not positive",
                zoom.min_scale, zoom.max_scale
            )));
        }
        if zoom.step <= 0.0 {
            return Err(ConfigError::Invalid(
                "zoom step must be greater than zero".to_string(),
            ));
        }

        if self.tree.max_depth == 0 {
            return Err(ConfigError::Invalid(
                "tree.max_depth must be at least 1".to_string(),
            ));
        }
        if self.tree.max_depth > MAX_TREE_DEPTH_LIMIT {
            return Err(ConfigError::Invalid(format!(
                "tree.max_depth {} exceeds the limit of {}",
                self.tree.max_depth, MAX_TREE_DEPTH_LIMIT
            )));
        }

        Ok(())
    }

    /// Create a default config file content as a string.
    pub fn default_config_string() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

/// Display configuration.
///
/// The preset supplies every value; the optional fields override single
/// values of it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// "desktop" or "touch".
    pub preset: DisplayPreset,

    /// Override for the sibling spacing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizontal_spacing: Option<f64>,

    /// Override for the generation band height.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical_spacing: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_scale: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_scale: Option<f64>,

    /// Override for the zoom step.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zoom_step: Option<f64>,
}

impl DisplayConfig {
    /// Layout metrics of the preset with overrides applied.
    pub fn metrics(&self) -> LayoutMetrics {
        self.metrics_for(self.preset)
    }

    /// Layout metrics of another preset with the same overrides applied.
    pub fn metrics_for(&self, preset: DisplayPreset) -> LayoutMetrics {
        let mut metrics = preset.metrics();
        if let Some(h) = self.horizontal_spacing {
            metrics.horizontal_spacing = h;
        }
        if let Some(v) = self.vertical_spacing {
            metrics.vertical_spacing = v;
        }
        metrics
    }

    /// Zoom settings of the preset with overrides applied.
    pub fn zoom(&self) -> ZoomSettings {
        self.zoom_for(self.preset)
    }

    pub fn zoom_for(&self, preset: DisplayPreset) -> ZoomSettings {
        let mut zoom = ZoomSettings::for_preset(preset);
        if let Some(min) = self.min_scale {
            zoom.min_scale = min;
        }
        if let Some(max) = self.max_scale {
            zoom.max_scale = max;
        }
        if let Some(step) = self.zoom_step {
            zoom.step = step;
        }
        zoom.default_scale = zoom
            .default_scale
            .max(zoom.min_scale)
            .min(zoom.max_scale.max(zoom.min_scale));
        zoom
    }
}

/// Tree building configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Deepest generation expanded before the build fails.
    pub max_depth: usize,

    /// Member id to root the view at instead of the data set's root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_TREE_DEPTH,
            root: None,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Tracing filter directive, e.g. "info" or "famtree_core=debug".
    pub level: String,

    /// File to write logs to. The interactive view never logs to the
    /// terminal; without a file its logs are dropped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            file: None,
        }
    }
}
