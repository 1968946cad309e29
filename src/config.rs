use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::types::Sample;

/// Samples kept on screen per axis.
pub const DEFAULT_WINDOW_SIZE: usize = 20;
/// Tick period in milliseconds.
pub const DEFAULT_REFRESH_INTERVAL_MS: u64 = 100;
pub const DEFAULT_Y_MIN: f64 = -1000.0;
pub const DEFAULT_Y_MAX: f64 = 1000.0;
/// Substituted for a line that starts with a letter.
pub const DEFAULT_FALLBACK_SAMPLE: Sample = Sample::new(50.0, 50.0, 50.0);

pub const CONFIG_ENV_VAR: &str = "ACCEL_GRAPH_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "accel_graph.toml";

/// Top-level configuration, one table per concern.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub plot: PlotConfig,
    pub input: InputConfig,
}

/// Native window options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
    pub resizable: bool,
    pub vsync: bool,
    pub hardware_acceleration: bool,
}

/// Plot window, tick period and panel appearance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlotConfig {
    pub window_size: usize,
    pub refresh_interval_ms: u64,
    pub y_min: f64,
    pub y_max: f64,
    pub label_rotation_degrees: f32,
    pub label_align: LabelAlign,
    /// Fraction of the plot area reserved below the last panel for its labels.
    pub bottom_margin: f32,
    pub line_width: f32,
    pub colors: PlotColors,
}

/// Which end of a rotated time label sits on its tick.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LabelAlign {
    Left,
    Right,
}

/// Line colour per panel as RGB.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlotColors {
    pub x_axis: [u8; 3],
    pub y_axis: [u8; 3],
    pub z_axis: [u8; 3],
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    pub fallback_sample: [f64; 3],
    /// Lines buffered between the reader thread and the GUI.
    pub queue_capacity: usize,
    pub lines_per_tick: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 800.0,
            title: "Accelerometer".to_string(),
            resizable: true,
            vsync: true,
            hardware_acceleration: true,
        }
    }
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            refresh_interval_ms: DEFAULT_REFRESH_INTERVAL_MS,
            y_min: DEFAULT_Y_MIN,
            y_max: DEFAULT_Y_MAX,
            label_rotation_degrees: 45.0,
            label_align: LabelAlign::Right,
            bottom_margin: 0.30,
            line_width: 1.5,
            colors: PlotColors::default(),
        }
    }
}

impl Default for PlotColors {
    fn default() -> Self {
        Self {
            x_axis: [31, 119, 180],
            y_axis: [31, 119, 180],
            z_axis: [31, 119, 180],
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            fallback_sample: DEFAULT_FALLBACK_SAMPLE.into(),
            queue_capacity: 64,
            lines_per_tick: 1,
        }
    }
}

impl InputConfig {
    pub fn fallback(&self) -> Sample {
        Sample::from(self.fallback_sample)
    }
}

impl PlotConfig {
    pub fn refresh_interval(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.refresh_interval_ms)
    }
}

impl AppConfig {
    /// Reads and validates a TOML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content).map_err(ConfigError::ParseError)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(ConfigError::SerializeError)?;
        std::fs::write(path, content).map_err(ConfigError::IoError)?;
        Ok(())
    }

    /// Rejects values the plot or reader cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            return Err(ConfigError::ValidationError("Window dimensions must be positive".to_string()));
        }

        if self.plot.window_size == 0 {
            return Err(ConfigError::ValidationError("Window size must be at least 1 sample".to_string()));
        }

        if self.plot.refresh_interval_ms == 0 {
            return Err(ConfigError::ValidationError("Refresh interval must be positive".to_string()));
        }

        if !(self.plot.y_min < self.plot.y_max) {
            return Err(ConfigError::ValidationError(format!(
                "Y range is empty: {} .. {}",
                self.plot.y_min, self.plot.y_max
            )));
        }

        if !(0.0..1.0).contains(&self.plot.bottom_margin) {
            return Err(ConfigError::ValidationError("Bottom margin must be in [0, 1)".to_string()));
        }

        if self.input.queue_capacity == 0 {
            return Err(ConfigError::ValidationError("Input queue capacity must be positive".to_string()));
        }

        if self.input.lines_per_tick == 0 {
            return Err(ConfigError::ValidationError("Lines per tick must be positive".to_string()));
        }

        if !self.input.fallback().is_finite() {
            return Err(ConfigError::ValidationError("Fallback sample must be finite".to_string()));
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(std::io::Error),
    #[error("Parse error: {0}")]
    ParseError(toml::de::Error),
    #[error("Serialize error: {0}")]
    SerializeError(toml::ser::Error),
    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// The active configuration and the file it came from, if any.
pub struct ConfigManager {
    config: AppConfig,
    config_path: Option<PathBuf>,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
            config_path: None,
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config = AppConfig::load_from_file(&path)?;
        Ok(Self {
            config,
            config_path: Some(path.as_ref().to_path_buf()),
        })
    }

    /// Picks the configuration source: `$ACCEL_GRAPH_CONFIG`, then
    /// `accel_graph.toml` in the working directory, then built-in defaults.
    pub fn discover() -> Self {
        let env_path = std::env::var(CONFIG_ENV_VAR)
            .ok()
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);
        Self::discover_from(env_path, Path::new(DEFAULT_CONFIG_FILE))
    }

    /// `env_path` wins over `local`, which is only used when it exists.
    /// A broken file is reported and replaced by the defaults.
    pub fn discover_from(env_path: Option<PathBuf>, local: &Path) -> Self {
        let path = env_path.or_else(|| Some(local.to_path_buf()).filter(|p| p.exists()));

        let Some(path) = path else {
            info!("No config file, using defaults");
            return Self::new();
        };

        // a named file that does not exist yet is seeded with the defaults
        if !path.exists() {
            match AppConfig::default().save_to_file(&path) {
                Ok(()) => info!("Wrote default config to {}", path.display()),
                Err(e) => warn!("Could not write default config to {}: {}", path.display(), e),
            }
            return Self { config: AppConfig::default(), config_path: Some(path) };
        }

        match Self::load_from_file(&path) {
            Ok(manager) => {
                info!("Loaded config from {}", path.display());
                manager
            }
            Err(e) => {
                warn!("Ignoring config {}: {}", path.display(), e);
                Self::new()
            }
        }
    }

    pub fn get_config(&self) -> &AppConfig {
        &self.config
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_constants() {
        let config = AppConfig::default();
        assert_eq!(config.plot.window_size, 20);
        assert_eq!(config.plot.refresh_interval_ms, 100);
        assert_eq!(config.plot.y_min, -1000.0);
        assert_eq!(config.plot.y_max, 1000.0);
        assert_eq!(config.input.fallback(), Sample::new(50.0, 50.0, 50.0));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            [plot]
            window_size = 50

            [input]
            fallback_sample = [0.0, 0.0, 1000.0]
            "#,
        )
        .unwrap();
        assert_eq!(config.plot.window_size, 50);
        assert_eq!(config.plot.refresh_interval_ms, 100);
        assert_eq!(config.input.fallback(), Sample::new(0.0, 0.0, 1000.0));
        assert_eq!(config.window, WindowConfig::default());
    }

    #[test]
    fn empty_window_is_rejected() {
        let err = AppConfig::from_toml_str("[plot]\nwindow_size = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn inverted_y_range_is_rejected() {
        let err = AppConfig::from_toml_str("[plot]\ny_min = 10.0\ny_max = -10.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = AppConfig::from_toml_str("[plot\nwindow_size = ").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn save_then_load_preserves_values() {
        let path = std::env::temp_dir().join(format!("accel_graph_cfg_{}.toml", std::process::id()));
        let mut config = AppConfig::default();
        config.plot.window_size = 42;
        config.input.queue_capacity = 8;
        config.save_to_file(&path).unwrap();

        let manager = ConfigManager::load_from_file(&path).unwrap();
        assert_eq!(manager.get_config(), &config);
        assert_eq!(manager.config_path(), Some(path.as_path()));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn label_align_is_lowercase_in_toml() {
        let config = AppConfig::from_toml_str("[plot]\nlabel_align = \"left\"\n").unwrap();
        assert_eq!(config.plot.label_align, LabelAlign::Left);
    }

    fn scratch(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("accel_graph_{}_{}.toml", name, std::process::id()));
        std::fs::remove_file(&path).ok();
        path
    }

    #[test]
    fn env_path_wins_over_local_file() {
        let env = scratch("env_wins");
        let local = scratch("local_loses");
        std::fs::write(&env, "[plot]\nwindow_size = 7\n").unwrap();
        std::fs::write(&local, "[plot]\nwindow_size = 99\n").unwrap();

        let manager = ConfigManager::discover_from(Some(env.clone()), &local);
        assert_eq!(manager.get_config().plot.window_size, 7);
        assert_eq!(manager.config_path(), Some(env.as_path()));

        std::fs::remove_file(&env).ok();
        std::fs::remove_file(&local).ok();
    }

    #[test]
    fn local_file_is_used_without_env_path() {
        let local = scratch("local_only");
        std::fs::write(&local, "[plot]\nrefresh_interval_ms = 250\n").unwrap();

        let manager = ConfigManager::discover_from(None, &local);
        assert_eq!(manager.get_config().plot.refresh_interval_ms, 250);
        assert_eq!(manager.config_path(), Some(local.as_path()));
        std::fs::remove_file(&local).ok();
    }

    #[test]
    fn invalid_file_falls_back_to_defaults() {
        let env = scratch("invalid");
        std::fs::write(&env, "[plot]\nwindow_size = 0\n").unwrap();

        let manager = ConfigManager::discover_from(Some(env.clone()), &scratch("unused_local"));
        assert_eq!(manager.get_config(), &AppConfig::default());
        assert_eq!(manager.config_path(), None);
        std::fs::remove_file(&env).ok();
    }

    #[test]
    fn missing_env_file_is_seeded_with_defaults() {
        let env = scratch("seeded");
        assert!(!env.exists());

        let manager = ConfigManager::discover_from(Some(env.clone()), &scratch("seeded_local"));
        assert_eq!(manager.get_config(), &AppConfig::default());
        assert_eq!(manager.config_path(), Some(env.as_path()));
        assert_eq!(AppConfig::load_from_file(&env).unwrap(), AppConfig::default());
        std::fs::remove_file(&env).ok();
    }

    #[test]
    fn no_sources_gives_defaults() {
        let manager = ConfigManager::discover_from(None, &scratch("absent"));
        assert_eq!(manager.get_config(), &AppConfig::default());
        assert_eq!(manager.config_path(), None);
    }
}
