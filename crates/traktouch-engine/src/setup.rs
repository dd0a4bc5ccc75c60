//! Config location and loading.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::Config;
use crate::error::EngineError;

/// Load configuration from the given path, or the default location.
///
/// A missing file yields the defaults; an unreadable or invalid one is an error.
pub fn load_config(path: Option<&Path>) -> Result<Config, EngineError> {
    let config_path = match path {
        Some(p) => p.to_path_buf(),
        None => default_config_path(),
    };

    if config_path.exists() {
        let content = std::fs::read_to_string(&config_path)
            .map_err(|e| EngineError::Config(format!("failed to read config: {e}")))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| EngineError::Config(format!("failed to parse config: {e}")))?;
        config.validate()?;
        info!(path = %config_path.display(), "loaded config");
        Ok(config)
    } else {
        info!(path = %config_path.display(), "no config file found, using defaults");
        Ok(Config::default())
    }
}

/// Config file that sits beside an injected module: `traktouch.dll` reads
/// `traktouch.toml` from the same directory.
pub fn config_path_for_module(module: &Path) -> PathBuf {
    module.with_extension("toml")
}

/// Log file that sits beside an injected module.
pub fn log_path_for_module(module: &Path) -> PathBuf {
    module.with_extension("log")
}

/// Get the default config directory path.
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("~/.config"))
        .join("traktouch")
}

/// Get the default config file path.
fn default_config_path() -> PathBuf {
    config_dir().join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn reads_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("traktouch.toml");
        std::fs::write(&path, "[touch]\ndefer_buttons = 5\n").unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.touch.defer_buttons, 5);
    }

    #[test]
    fn malformed_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("traktouch.toml");
        std::fs::write(&path, "[touch\n").unwrap();
        assert!(matches!(
            load_config(Some(&path)),
            Err(EngineError::Config(_))
        ));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("traktouch.toml");
        std::fs::write(&path, "[scroll]\naccel_exponent = -1.0\n").unwrap();
        assert!(load_config(Some(&path)).is_err());
    }

    #[test]
    fn module_sidecar_paths() {
        let module = Path::new("C:/Tools/traktouch/traktouch.dll");
        assert_eq!(
            config_path_for_module(module),
            PathBuf::from("C:/Tools/traktouch/traktouch.toml")
        );
        assert_eq!(
            log_path_for_module(module),
            PathBuf::from("C:/Tools/traktouch/traktouch.log")
        );
    }
}
