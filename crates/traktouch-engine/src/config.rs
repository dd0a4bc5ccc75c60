//! Engine configuration loaded from TOML.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub host: HostConfig,
    #[serde(default)]
    pub touch: TouchConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Which window the engine attaches to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostConfig {
    /// Exact title of the host's main window.
    #[serde(default = "default_window_title")]
    pub window_title: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            window_title: default_window_title(),
        }
    }
}

/// Touch-to-mouse settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TouchConfig {
    /// Clock ticks to withhold the synthetic button-down after a touch.
    /// Zero posts it immediately.
    #[serde(default = "default_defer_buttons")]
    pub defer_buttons: u32,
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self {
            defer_buttons: default_defer_buttons(),
        }
    }
}

/// Pan-to-scroll settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Horizontal distance of the synthetic wheel location from the window's right edge.
    #[serde(default = "default_track_list_offset_x")]
    pub track_list_offset_x: i32,
    /// Vertical distance of the synthetic wheel location from the window's bottom edge.
    #[serde(default = "default_track_list_offset_y")]
    pub track_list_offset_y: i32,
    /// Linear gain from pan pixels to wheel units.
    #[serde(default = "default_scale")]
    pub scale: i32,
    /// Pan delta (pixels) below which no acceleration applies.
    #[serde(default = "default_accel_dead_zone")]
    pub accel_dead_zone: i32,
    /// Power-law exponent applied beyond the dead zone.
    #[serde(default = "default_accel_exponent")]
    pub accel_exponent: f32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            track_list_offset_x: default_track_list_offset_x(),
            track_list_offset_y: default_track_list_offset_y(),
            scale: default_scale(),
            accel_dead_zone: default_accel_dead_zone(),
            accel_exponent: default_accel_exponent(),
        }
    }
}

/// Diagnostic logging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Config {
    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.host.window_title.is_empty() {
            return Err(EngineError::Config(
                "host.window_title must not be empty".to_string(),
            ));
        }
        let scroll = &self.scroll;
        if scroll.scale < 0 {
            return Err(EngineError::Config(format!(
                "scroll.scale must not be negative (got {})",
                scroll.scale
            )));
        }
        if scroll.accel_dead_zone < 0 {
            return Err(EngineError::Config(format!(
                "scroll.accel_dead_zone must not be negative (got {})",
                scroll.accel_dead_zone
            )));
        }
        if scroll.track_list_offset_x < 0 || scroll.track_list_offset_y < 0 {
            return Err(EngineError::Config(format!(
                "scroll.track_list_offset_x/y must not be negative (got {}, {})",
                scroll.track_list_offset_x, scroll.track_list_offset_y
            )));
        }
        if !scroll.accel_exponent.is_finite() || scroll.accel_exponent <= 0.0 {
            return Err(EngineError::Config(format!(
                "scroll.accel_exponent must be a positive number (got {})",
                scroll.accel_exponent
            )));
        }
        Ok(())
    }
}

fn default_window_title() -> String {
    "Traktor".to_string()
}

fn default_defer_buttons() -> u32 {
    2
}

fn default_track_list_offset_x() -> i32 {
    20
}

fn default_track_list_offset_y() -> i32 {
    80
}

fn default_scale() -> i32 {
    6
}

fn default_accel_dead_zone() -> i32 {
    3
}

fn default_accel_exponent() -> f32 {
    2.0
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("defer_buttons = 2"));
        assert!(toml_str.contains("window_title = \"Traktor\""));
    }

    #[test]
    fn parse_example_config() {
        let toml_str = r#"
[host]
window_title = "Traktor"

[touch]
defer_buttons = 0

[scroll]
track_list_offset_x = 30
track_list_offset_y = 100
scale = 4
accel_dead_zone = 5
accel_exponent = 1.5

[logging]
level = "debug"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.touch.defer_buttons, 0);
        assert_eq!(config.scroll.track_list_offset_x, 30);
        assert_eq!(config.scroll.track_list_offset_y, 100);
        assert_eq!(config.scroll.scale, 4);
        assert_eq!(config.scroll.accel_dead_zone, 5);
        assert!((config.scroll.accel_exponent - 1.5).abs() < f32::EPSILON);
        assert_eq!(config.logging.level, "debug");
        config.validate().unwrap();
    }

    #[test]
    fn partial_config_fills_defaults() {
        let config: Config = toml::from_str("[scroll]\nscale = 10\n").unwrap();
        assert_eq!(config.scroll.scale, 10);
        assert_eq!(config.scroll.accel_dead_zone, 3);
        assert_eq!(config.touch.defer_buttons, 2);
        assert_eq!(config.host.window_title, "Traktor");
    }

    #[test]
    fn validate_rejects_bad_exponent() {
        let mut config = Config::default();
        config.scroll.accel_exponent = 0.0;
        assert!(matches!(config.validate(), Err(EngineError::Config(_))));
        config.scroll.accel_exponent = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_negative_scale() {
        let mut config = Config::default();
        config.scroll.scale = -1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn defaults_are_valid() {
        Config::default().validate().unwrap();
    }
}
