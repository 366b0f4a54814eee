//! Client configuration shared by the front ends.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;
use url::Url;

use crate::api::{DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};
use crate::error::ConfigError;

/// Environment variable overriding `api_url`.
pub const API_URL_ENV: &str = "MOODLENS_API_URL";

/// Client configuration loaded from YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the analysis service, including the `/api` prefix.
    pub api_url: String,

    /// Seconds before a request is abandoned.
    pub timeout_secs: u64,

    /// Where history and preferences are kept (terminal client only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// Where exports are written (terminal client only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            data_dir: None,
            output_dir: None,
        }
    }
}

impl ClientConfig {
    /// Parse and validate a YAML document. Missing keys take defaults.
    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: ClientConfig = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Apply an `api_url` from the environment, when set and non-empty.
    pub fn with_env_override(self, value: Option<String>) -> Result<Self, ConfigError> {
        match value.filter(|v| !v.trim().is_empty()) {
            Some(url) => {
                debug!("Using api_url from {}", API_URL_ENV);
                self.with_api_url(url)
            }
            None => Ok(self),
        }
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Result<Self, ConfigError> {
        self.api_url = url.into().trim().to_string();
        self.validate()?;
        Ok(self)
    }

    pub fn with_timeout(mut self, secs: u64) -> Result<Self, ConfigError> {
        self.timeout_secs = secs;
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let valid_url = Url::parse(&self.api_url)
            .map(|u| matches!(u.scheme(), "http" | "https") && u.host_str().is_some())
            .unwrap_or(false);
        if !valid_url {
            return Err(ConfigError::InvalidApiUrl(self.api_url.clone()));
        }
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.api_url, "http://localhost:8000/api");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(ClientConfig::from_yaml_str("").unwrap(), config);
    }

    #[test]
    fn test_partial_yaml() {
        let config = ClientConfig::from_yaml_str("api_url: https://nlp.example.org/api\n").unwrap();
        assert_eq!(config.api_url, "https://nlp.example.org/api");
        assert_eq!(config.timeout_secs, 30);

        let config = ClientConfig::from_yaml_str("timeout_secs: 5\noutput_dir: /tmp/out\n").unwrap();
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.output_dir, Some(PathBuf::from("/tmp/out")));
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            ClientConfig::from_yaml_str("timeout_secs: 0").unwrap_err(),
            ConfigError::InvalidTimeout
        );
        assert!(matches!(
            ClientConfig::from_yaml_str("api_url: localhost"),
            Err(ConfigError::InvalidApiUrl(_))
        ));
        assert!(matches!(
            ClientConfig::from_yaml_str("timeout_secs: [1, 2]"),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_env_override() {
        let config = ClientConfig::default()
            .with_env_override(Some("http://10.0.0.5:9000/api".to_string()))
            .unwrap();
        assert_eq!(config.api_url, "http://10.0.0.5:9000/api");

        let config = ClientConfig::default().with_env_override(Some("  ".to_string())).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);

        assert!(ClientConfig::default().with_env_override(Some("nope".to_string())).is_err());
    }

    #[test]
    fn test_yaml_roundtrip_omits_unset_dirs() {
        let yaml = ClientConfig::default().to_yaml_string().unwrap();
        assert!(yaml.contains("api_url"));
        assert!(!yaml.contains("data_dir"));
    }
}
