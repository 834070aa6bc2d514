//! Client configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::DEFAULT_BASE_URL;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Config file not found at {0}")]
    NotFound(PathBuf),
}

/// Credentials and endpoint for the delivery client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Application code (`XXXXX-XXXXX`).
    #[serde(default)]
    pub application: Option<String>,
    /// Application group code, used when no application code is set.
    #[serde(default)]
    pub application_group: Option<String>,
    /// API access token.
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            application: None,
            application_group: None,
            access_token: None,
            base_url: default_base_url(),
        }
    }
}

impl ClientConfig {
    /// Load from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Self::config_path())
    }

    /// Load from a TOML file.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let config: ClientConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("/etc"))
            .join("pushwoosh")
            .join("config.toml")
    }

    /// Override fields from `PUSHWOOSH_*` environment variables.
    pub fn with_env(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(application) = lookup("PUSHWOOSH_APPLICATION") {
            self.application = Some(application);
        }
        if let Some(group) = lookup("PUSHWOOSH_APPLICATION_GROUP") {
            self.application_group = Some(group);
        }
        if let Some(token) = lookup("PUSHWOOSH_ACCESS_TOKEN") {
            self.access_token = Some(token);
        }
        if let Some(base_url) = lookup("PUSHWOOSH_BASE_URL") {
            self.base_url = base_url;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "application = \"ABCDE-12345\"\naccess_token = \"secret\"\n",
        )
        .unwrap();

        let config = ClientConfig::load_from(&path).unwrap();
        assert_eq!(config.application.as_deref(), Some("ABCDE-12345"));
        assert_eq!(config.access_token.as_deref(), Some("secret"));
        assert!(config.application_group.is_none());
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ClientConfig::load_from(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "application = [").unwrap();

        let err = ClientConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_overrides() {
        let config = ClientConfig {
            application: Some("FROM-FILE".into()),
            ..Default::default()
        }
        .with_overrides(|key| match key {
            "PUSHWOOSH_ACCESS_TOKEN" => Some("from-env".into()),
            "PUSHWOOSH_BASE_URL" => Some("http://localhost:9000/".into()),
            _ => None,
        });

        assert_eq!(config.application.as_deref(), Some("FROM-FILE"));
        assert_eq!(config.access_token.as_deref(), Some("from-env"));
        assert_eq!(config.base_url, "http://localhost:9000/");
    }
}
