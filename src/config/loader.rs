//! Configuration Loader
//!
//! Builds a [`ClientConfig`] from built-in defaults, optional JSON config
//! files and the environment, in that order.

use crate::config::settings::{ApiKey, ClientConfig, FileConfig, BASE_URL_ENV};
use crate::error::{ResendError, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable pointing at an explicit config file
pub const CONFIG_PATH_ENV: &str = "RESEND_MCP_CONFIG";

/// Configuration loader with support for multiple sources
pub struct ConfigLoader {
    file: FileConfig,
}

impl ConfigLoader {
    /// Create a new loader and read config files from default locations
    pub fn new() -> Result<Self> {
        let mut loader = Self {
            file: FileConfig::default(),
        };

        for path in Self::get_config_paths() {
            if path.exists() {
                loader.load_from_file(&path)?;
            }
        }

        Ok(loader)
    }

    /// Create a loader with a specific config file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let mut loader = Self {
            file: FileConfig::default(),
        };

        loader.load_from_file(path)?;

        Ok(loader)
    }

    /// Get list of config paths to check
    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. Current directory
        paths.push(PathBuf::from("resend-mcp.json"));

        // 2. User config directory
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("resend-mcp").join("config.json"));
        }

        // 3. Home directory
        if let Some(home_dir) = dirs::home_dir() {
            paths.push(home_dir.join(".resend-mcp").join("config.json"));
        }

        // 4. Environment variable (highest precedence, loaded last)
        if let Ok(custom_path) = std::env::var(CONFIG_PATH_ENV) {
            paths.push(PathBuf::from(custom_path));
        }

        paths
    }

    /// Load configuration from a specific file
    fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ResendError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let file: FileConfig = serde_json::from_str(&content).map_err(|e| {
            ResendError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })?;

        debug!(path = %path.display(), "loaded config file");
        self.file.merge(file);
        Ok(())
    }

    /// Get the merged file settings
    pub fn file_config(&self) -> &FileConfig {
        &self.file
    }

    /// Resolve the final config from the process environment
    pub fn into_config(self) -> Result<ClientConfig> {
        self.into_config_with(|name| std::env::var(name).ok())
    }

    /// Resolve the final config with a custom environment lookup
    ///
    /// Fails when the API key variable is unset or empty.
    pub fn into_config_with<F>(self, env: F) -> Result<ClientConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let key_env = self.file.api_key_env();
        let raw_key = env(key_env).filter(|k| !k.trim().is_empty()).ok_or_else(|| {
            ResendError::Config(format!(
                "{} environment variable is not set. Get your API key from https://resend.com/api-keys",
                key_env
            ))
        })?;

        let mut config = self.file.apply(ClientConfig::new(ApiKey::new(raw_key)?));

        if let Some(base_url) = env(BASE_URL_ENV).filter(|u| !u.is_empty()) {
            config = config.with_base_url(base_url);
        }

        config.validate()?;
        Ok(config)
    }
}
