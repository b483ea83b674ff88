//! Application configuration management.
//!
//! Configuration is stored at `<config_dir>/votecache/config.json` and
//! holds the endpoint URL plus an optional cache-file override. The
//! `VOTECACHE_ENDPOINT` environment variable takes precedence over the
//! file, which keeps deployments and tests out of each other's way.

use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Application name used for config/cache directory paths
const APP_NAME: &str = "votecache";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Cache file name
const CACHE_FILE: &str = "cache.json";

/// Environment variable overriding the configured endpoint
pub const ENDPOINT_ENV: &str = "VOTECACHE_ENDPOINT";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// URL of the spreadsheet web endpoint.
    pub endpoint: String,
    /// Explicit cache file location; defaults under the user cache dir.
    pub cache_file: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            serde_json::from_str(&contents)?
        } else {
            Self::default()
        };

        if let Ok(endpoint) = std::env::var(ENDPOINT_ENV) {
            if !endpoint.is_empty() {
                config.endpoint = endpoint;
            }
        }

        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Resolved location of the durable cache file.
    pub fn cache_file(&self) -> Result<PathBuf> {
        if let Some(ref path) = self.cache_file {
            return Ok(path.clone());
        }
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME).join(CACHE_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_cache_file_wins() {
        let config = Config {
            endpoint: "https://example.invalid/exec".to_string(),
            cache_file: Some(PathBuf::from("/tmp/votecache-explicit.json")),
        };

        assert_eq!(
            config.cache_file().expect("resolve"),
            PathBuf::from("/tmp/votecache-explicit.json")
        );
    }
}
