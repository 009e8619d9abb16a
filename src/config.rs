//! Configuration management for mediafind
//!
//! Config is optional and read-only, stored at ~/.config/mediafind/config.toml.
//! CLI flags override the file. No environment variables are consulted.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::api::{DEFAULT_BASE_URL, DEFAULT_LIMIT};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Search API endpoint
    pub base_url: Option<String>,
    /// Default number of results per search
    pub limit: Option<u32>,
    /// Command used to open preview links instead of the platform default
    pub browser: Option<String>,
}

impl Config {
    /// Get config file path (~/.config/mediafind/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("mediafind").join("config.toml"))
    }

    /// Load config for this run.
    ///
    /// An explicit path must exist and parse. The default location is
    /// best effort: missing or broken files fall back to defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config = match explicit {
            Some(path) => Self::load_from(path)?,
            None => Self::path()
                .filter(|p| p.exists())
                .and_then(|p| match Self::load_from(&p) {
                    Ok(config) => Some(config),
                    Err(e) => {
                        warn!("ignoring config file: {:#}", e);
                        None
                    }
                })
                .unwrap_or_default(),
        };
        Ok(config)
    }

    /// Read and parse a TOML config file
    pub fn load_from(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&text)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Search endpoint, falling back to the public API
    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    /// Result limit: CLI flag first, then config, then the built-in default
    pub fn limit(&self, flag: Option<u32>) -> u32 {
        flag.or(self.limit).unwrap_or(DEFAULT_LIMIT)
    }
}
