//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use crate::chart::{Animation, ChartLayout};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub chart: ChartConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the key-value files live
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

fn default_data_dir() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("neurotrack").to_string_lossy().to_string())
        .unwrap_or_else(|| "./neurotrack_data".to_string())
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl StorageConfig {
    /// Data directory with a leading `~` expanded
    pub fn data_path(&self) -> PathBuf {
        match self.data_dir.strip_prefix("~/") {
            Some(rest) => dirs::home_dir()
                .map(|home| home.join(rest))
                .unwrap_or_else(|| PathBuf::from(&self.data_dir)),
            None => PathBuf::from(&self.data_dir),
        }
    }
}

/// Chart canvas and animation settings
#[derive(Debug, Clone, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_chart_width")]
    pub width: f64,

    #[serde(default = "default_chart_height")]
    pub height: f64,

    #[serde(default = "default_chart_padding")]
    pub padding: f64,

    #[serde(default = "default_animation_ms")]
    pub animation_ms: u64,

    #[serde(default = "default_fps")]
    pub fps: u32,
}

fn default_chart_width() -> f64 {
    600.0
}

fn default_chart_height() -> f64 {
    300.0
}

fn default_chart_padding() -> f64 {
    40.0
}

fn default_animation_ms() -> u64 {
    1000
}

fn default_fps() -> u32 {
    30
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: default_chart_width(),
            height: default_chart_height(),
            padding: default_chart_padding(),
            animation_ms: default_animation_ms(),
            fps: default_fps(),
        }
    }
}

impl ChartConfig {
    /// Canvas layout; unusable sizes fall back to the defaults
    pub fn layout(&self) -> ChartLayout {
        let layout = ChartLayout::new(self.width, self.height, self.padding);
        if layout.width != self.width || layout.height != self.height || layout.padding != self.padding {
            tracing::warn!(
                width = self.width,
                height = self.height,
                padding = self.padding,
                "Adjusted chart size to {}x{} padding {}",
                layout.width,
                layout.height,
                layout.padding
            );
        }
        layout
    }

    pub fn animation(&self) -> Animation {
        Animation::new(Duration::from_millis(self.animation_ms))
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    /// Install the global subscriber. `RUST_LOG` wins over `level`.
    pub fn init(&self) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| format!("neurotrack={}", self.level).into());
        let registry = tracing_subscriber::registry().with(filter);

        let result = if self.format.eq_ignore_ascii_case("json") {
            registry
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .try_init()
        } else {
            registry
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .try_init()
        };

        if let Err(e) = result {
            eprintln!("Logging already initialised: {}", e);
        }
    }
}

/// Anything that can answer an environment lookup
type EnvLookup<'a> = &'a dyn Fn(&str) -> Option<String>;

fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("neurotrack").join("config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(&process_env);
    }

    fn apply_overrides_from(&mut self, env: EnvLookup<'_>) {
        if let Some(data_dir) = env("NEUROTRACK_DATA_DIR") {
            self.storage.data_dir = data_dir;
        }

        if let Some(width) = env("NEUROTRACK_CHART_WIDTH") {
            match parse_size(&width) {
                Some(w) => self.chart.width = w,
                None => tracing::warn!("Ignoring NEUROTRACK_CHART_WIDTH={}", width),
            }
        }
        if let Some(height) = env("NEUROTRACK_CHART_HEIGHT") {
            match parse_size(&height) {
                Some(h) => self.chart.height = h,
                None => tracing::warn!("Ignoring NEUROTRACK_CHART_HEIGHT={}", height),
            }
        }

        if let Some(level) = env("NEUROTRACK_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = env("NEUROTRACK_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// A finite, positive pixel size
fn parse_size(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# NeuroTrack Configuration
#
# Environment variables override these settings:
# - NEUROTRACK_DATA_DIR
# - NEUROTRACK_CHART_WIDTH
# - NEUROTRACK_CHART_HEIGHT
# - NEUROTRACK_LOG_LEVEL
# - NEUROTRACK_LOG_FORMAT

[storage]
# Directory holding one JSON file per stored key
data_dir = "~/.local/share/neurotrack"

[chart]
# Canvas size in pixels
width = 600.0
height = 300.0

# Space around the plot area for axis labels
padding = 40.0

# Length of the draw-in animation (ms)
animation_ms = 1000

# Frames per second when exporting the animation
fps = 30

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
