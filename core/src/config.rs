//! Client configuration.
//!
//! The base address is fixed once at startup and injected into `ApiClient`;
//! it can come from a TOML file, the environment, or code.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";
pub const BASE_URL_ENV: &str = "HRMS_API_BASE_URL";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ConfigError> {
        let config = Self {
            base_url: base_url.into(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Defaults, overridden by `HRMS_API_BASE_URL` when set.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(BASE_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => Self::new(url.trim()),
            _ => Ok(Self::default()),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ClientConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.starts_with("http://") || self.base_url.starts_with("https://") {
            Ok(())
        } else {
            Err(ConfigError::InvalidBaseUrl(self.base_url.clone()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_local_backend() {
        assert_eq!(ClientConfig::default().base_url, "http://localhost:8000/api");
    }

    #[test]
    fn toml_overrides_base_url() {
        let config = ClientConfig::from_toml_str(r#"base_url = "https://hr.example.com/api""#).unwrap();
        assert_eq!(config.base_url, "https://hr.example.com/api");
    }

    #[test]
    fn empty_toml_uses_default() {
        let config = ClientConfig::from_toml_str("").unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn rejects_non_http_scheme() {
        let err = ClientConfig::new("ftp://hr.example.com").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl(_)));
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = ClientConfig::from_toml_str("base_url = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    // The only test touching the process environment.
    #[test]
    fn env_var_overrides_default() {
        std::env::set_var(BASE_URL_ENV, " https://hr.example.com/api ");
        let config = ClientConfig::from_env();
        std::env::set_var(BASE_URL_ENV, "   ");
        let blank = ClientConfig::from_env();
        std::env::remove_var(BASE_URL_ENV);

        assert_eq!(config.unwrap().base_url, "https://hr.example.com/api");
        assert_eq!(blank.unwrap(), ClientConfig::default());
        assert_eq!(ClientConfig::from_env().unwrap(), ClientConfig::default());
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = ClientConfig::load(Path::new("/nonexistent/hrms.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
