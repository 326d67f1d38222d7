//! Application configuration.
//!
//! Configuration is read from a YAML file in the platform config
//! directory and can be overridden per-value with environment
//! variables. The remote AI service is authenticated with a static
//! bearer token taken from this configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding the remote API base URL
const ENV_API_URL: &str = "STORYPAL_API_URL";
/// Environment variable overriding the bearer token
const ENV_API_KEY: &str = "STORYPAL_API_KEY";
/// Environment variable overriding the local data directory
const ENV_DATA_DIR: &str = "STORYPAL_DATA_DIR";

/// Static application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the remote AI service
    pub api_base_url: String,
    /// Bearer token sent with every remote request
    pub api_key: String,
    /// Directory holding the local cache database
    pub data_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.storypal.app".to_string(),
            api_key: String::new(),
            data_dir: default_data_dir(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default config file location,
    /// then apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = match config_file_path() {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a specific YAML file. A missing file
    /// yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: AppConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    /// Apply environment variable overrides on top of the loaded values
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var(ENV_API_URL) {
            self.api_base_url = url;
        }
        if let Ok(key) = std::env::var(ENV_API_KEY) {
            self.api_key = key;
        }
        if let Ok(dir) = std::env::var(ENV_DATA_DIR) {
            self.data_dir = PathBuf::from(dir);
        }
    }
}

/// Default location of the config file: `<config_dir>/storypal/config.yaml`
fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("storypal").join("config.yaml"))
}

/// Default location of the local database: `<data_dir>/storypal`
fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("storypal"))
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = AppConfig::load_from(Path::new("/nonexistent/config.yaml"))
            .expect("Missing file should not error");
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_from_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(
            &path,
            "api_base_url: https://staging.storypal.app\napi_key: test-token\ndata_dir: /tmp/storypal-test\n",
        )
        .unwrap();

        let config = AppConfig::load_from(&path).expect("Failed to load config");
        assert_eq!(config.api_base_url, "https://staging.storypal.app");
        assert_eq!(config.api_key, "test-token");
        assert_eq!(config.data_dir, PathBuf::from("/tmp/storypal-test"));
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "api_base_url: [not, a, string").unwrap();

        assert!(AppConfig::load_from(&path).is_err());
    }

    #[test]
    fn test_env_overrides_take_precedence() {
        let mut config = AppConfig {
            api_base_url: "https://file.example".to_string(),
            api_key: "file-key".to_string(),
            data_dir: PathBuf::from("/from-file"),
        };

        std::env::set_var(ENV_API_URL, "https://env.example");
        std::env::set_var(ENV_API_KEY, "env-key");
        config.apply_env_overrides();
        std::env::remove_var(ENV_API_URL);
        std::env::remove_var(ENV_API_KEY);

        assert_eq!(config.api_base_url, "https://env.example");
        assert_eq!(config.api_key, "env-key");
        // Not set in the environment, so the file value survives
        assert_eq!(config.data_dir, PathBuf::from("/from-file"));
    }
}
