//! Configuration management for Vertica
//!
//! Handles config file loading and credential resolution.
//! Config is stored at ~/.config/vertica/config.toml
//!
//! The file and the environment are read once at startup and resolved into
//! [`Settings`], which is then passed to everything that needs it.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::api::cache::{DEFAULT_CAPACITY, DEFAULT_TTL};
use crate::api::tmdb::{Credentials, DEFAULT_BASE_URL};

pub const ENV_API_KEY: &str = "TMDB_API_KEY";
pub const ENV_ACCESS_TOKEN: &str = "TMDB_ACCESS_TOKEN";

pub const DEFAULT_BIND: &str = "127.0.0.1:3000";
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Maximum number of results the search box keeps
pub const SEARCH_RESULT_LIMIT: usize = 8;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// On-disk configuration; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// TMDB v3 API key
    pub api_key: Option<String>,
    /// TMDB v4 read access token (preferred over the key)
    pub access_token: Option<String>,
    /// TMDB API base URL
    pub base_url: Option<String>,
    /// Response cache lifetime
    pub cache_ttl_secs: Option<u64>,
    /// Response cache size in entries
    pub cache_capacity: Option<usize>,
    /// Search box quiet period
    pub search_debounce_ms: Option<u64>,
    /// Running Vertica server to search through instead of TMDB directly
    pub search_endpoint: Option<String>,
    /// Listen address for `vertica serve`
    pub bind: Option<String>,
}

impl Config {
    /// Get config file path (~/.config/vertica/config.toml)
    pub fn path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("vertica").join("config.toml"))
    }

    /// Load config from `path` (or the default location)
    ///
    /// A missing file yields the defaults; an unreadable or malformed one is an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::path() {
                Some(p) => p,
                None => return Ok(Self::default()),
            },
        };
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Resolved runtime settings, built once at process start
#[derive(Debug, Clone)]
pub struct Settings {
    pub credentials: Credentials,
    pub base_url: String,
    pub cache_ttl: Duration,
    pub cache_capacity: usize,
    pub search_debounce: Duration,
    pub search_limit: usize,
    pub search_endpoint: Option<String>,
    pub bind: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self::resolve(&Config::default(), |_| None)
    }
}

impl Settings {
    /// Resolve against the process environment
    pub fn from_env(config: &Config) -> Self {
        Self::resolve(config, |name| std::env::var(name).ok())
    }

    /// Merge config with an environment lookup
    ///
    /// Non-blank environment credentials override the file.
    pub fn resolve<F>(config: &Config, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let pick = |name: &str, fallback: &Option<String>| {
            env(name)
                .filter(|v| !v.trim().is_empty())
                .or_else(|| fallback.clone())
        };

        Self {
            credentials: Credentials::new(
                pick(ENV_API_KEY, &config.api_key),
                pick(ENV_ACCESS_TOKEN, &config.access_token),
            ),
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            cache_ttl: config
                .cache_ttl_secs
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_TTL),
            cache_capacity: config.cache_capacity.unwrap_or(DEFAULT_CAPACITY),
            search_debounce: config
                .search_debounce_ms
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_DEBOUNCE),
            search_limit: SEARCH_RESULT_LIMIT,
            search_endpoint: config
                .search_endpoint
                .clone()
                .filter(|s| !s.trim().is_empty()),
            bind: config.bind.clone().unwrap_or_else(|| DEFAULT_BIND.to_string()),
        }
    }
}
