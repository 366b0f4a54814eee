//! Platform-specific configuration paths and settings.
//!
//! The client config is stored as YAML next to the other per-user
//! application files.

use directories::ProjectDirs;
use moodlens::ClientConfig;
use moodlens::config::API_URL_ENV;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    NoConfigDir,
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Config error: {0}")]
    ConfigError(#[from] moodlens::ConfigError),
}

fn project_dirs() -> Result<ProjectDirs, ConfigError> {
    ProjectDirs::from("com", "moodlens", "MoodLens").ok_or(ConfigError::NoConfigDir)
}

/// Get the platform-specific config directory.
/// - macOS: ~/Library/Application Support/com.moodlens.MoodLens/
/// - Linux: ~/.config/moodlens/
/// - Windows: %APPDATA%\moodlens\MoodLens\config\
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    Ok(project_dirs()?.config_dir().to_path_buf())
}

/// Get the full path to the config file.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.yaml"))
}

/// Default directory for history and preferences.
pub fn default_data_dir() -> Result<PathBuf, ConfigError> {
    Ok(project_dirs()?.data_dir().to_path_buf())
}

/// Load config from `path`, or return defaults if the file doesn't exist.
pub fn load_config_from(path: &Path) -> Result<ClientConfig, ConfigError> {
    if !path.exists() {
        debug!("No config at {}, using defaults", path.display());
        return Ok(ClientConfig::default());
    }

    let contents = std::fs::read_to_string(path)?;
    Ok(ClientConfig::from_yaml_str(&contents)?)
}

/// Load the user's config, then apply `MOODLENS_API_URL` when set.
pub fn load_config() -> Result<ClientConfig, ConfigError> {
    let config = load_config_from(&config_path()?)?;
    Ok(config.with_env_override(std::env::var(API_URL_ENV).ok())?)
}

/// Save config to `path`, creating its directory if needed.
pub fn save_config_to(config: &ClientConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, config.to_yaml_string()?)?;
    Ok(())
}

pub fn save_config(config: &ClientConfig) -> Result<PathBuf, ConfigError> {
    let path = config_path()?;
    save_config_to(config, &path)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("config.yaml")).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");

        let config = ClientConfig::default()
            .with_api_url("https://analysis.example.org/api")
            .unwrap()
            .with_timeout(12)
            .unwrap();
        save_config_to(&config, &path).unwrap();

        assert_eq!(load_config_from(&path).unwrap(), config);
    }

    #[test]
    fn test_invalid_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "timeout_secs: 0\n").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ConfigError(moodlens::ConfigError::InvalidTimeout)));
    }
}
