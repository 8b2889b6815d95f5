use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::constants::{cache, http};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub backend: BackendConfig,

    pub identity: IdentityConfig,

    pub catalog: CatalogConfig,

    pub session: SessionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// `SQLite` URL of the local record store.
    pub database_path: String,

    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_path: "sqlite:data/pokedex.db".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Where accounts and catalog records live.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendMode {
    /// Seed assets plus the local `SQLite` store.
    #[default]
    Local,
    /// Remote record API fronted by the identity provider.
    Remote,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub mode: BackendMode,

    pub base_url: String,

    pub connect_timeout_seconds: u64,

    pub read_timeout_seconds: u64,

    /// Whole-request budget, covering the write side as well.
    pub request_timeout_seconds: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            mode: BackendMode::Local,
            base_url: http::DEFAULT_BASE_URL.to_string(),
            connect_timeout_seconds: http::TIMEOUT_SECONDS,
            read_timeout_seconds: http::TIMEOUT_SECONDS,
            request_timeout_seconds: http::TIMEOUT_SECONDS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    pub base_url: String,

    pub api_key: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            base_url: http::DEFAULT_IDENTITY_URL.to_string(),
            api_key: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Non-forced reloads within this window reuse the last list.
    pub cache_ttl_seconds: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            cache_ttl_seconds: cache::CATALOG_TTL_SECONDS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Keep the signed-in user across restarts. On by default since each CLI
    /// command runs in its own process.
    pub persist: bool,

    pub path: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            persist: true,
            path: "data/session.json".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let paths = Self::config_paths();

        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(path);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        paths.push(PathBuf::from("config.toml"));

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("pokedex").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".pokedex").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.backend.mode == BackendMode::Remote {
            if self.backend.base_url.is_empty() {
                anyhow::bail!("Backend base URL cannot be empty in remote mode");
            }
            url::Url::parse(&self.backend.base_url)
                .with_context(|| format!("Invalid backend base URL: {}", self.backend.base_url))?;

            if self.identity.api_key.is_empty() {
                anyhow::bail!("Identity API key must be set in remote mode");
            }
        }

        if self.backend.request_timeout_seconds == 0 {
            anyhow::bail!("Request timeout must be > 0");
        }

        Ok(())
    }

    #[must_use]
    pub fn is_remote(&self) -> bool {
        self.backend.mode == BackendMode::Remote
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.backend.mode, BackendMode::Local);
        assert_eq!(config.catalog.cache_ttl_seconds, 60);
        assert_eq!(config.backend.connect_timeout_seconds, 30);
        assert_eq!(config.backend.read_timeout_seconds, 30);
        assert!(config.session.persist);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[backend]"));
        assert!(toml_str.contains("mode = \"local\""));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            [general]
            log_level = "debug"

            [backend]
            mode = "remote"
            base_url = "http://localhost:3000/"

            [identity]
            api_key = "test-key"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert!(config.is_remote());
        assert_eq!(config.catalog.cache_ttl_seconds, 60);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_remote_without_key_is_rejected() {
        let mut config = Config::default();
        config.backend.mode = BackendMode::Remote;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let mut config = Config::default();
        config.backend.request_timeout_seconds = 0;
        assert!(config.validate().is_err());
    }
}
