//! Add-on configuration.
//!
//! Everything the pipeline needs is resolved once in `main` and handed to
//! the cache, fetcher and router at construction.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Page scraped when no `base_url` setting is present.
pub const DEFAULT_BASE_URL: &str = "https://www.robertofreijo.com/acestream-ids/";

/// Substring that marks an anchor target as a stream link.
pub const ACESTREAM_SCHEME: &str = "acestream://";

/// How long a cached link list is served without refetching.
pub const CACHE_DURATION: Duration = Duration::from_secs(30 * 60);

/// Upper bound for the single page request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub const CACHE_FILE_NAME: &str = "cache.txt";
pub const SETTINGS_FILE_NAME: &str = "settings.toml";

const DATA_DIR_NAME: &str = "acestream-links";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no per-user data directory available on this platform")]
    NoDataDir,
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// User settings stored next to the cache.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub base_url: Option<String>,
}

impl Settings {
    /// Load `settings.toml` from `data_dir`.
    ///
    /// A missing file yields defaults; an unreadable or invalid one is an error.
    pub fn load(data_dir: &Path) -> Result<Self, ConfigError> {
        let path = data_dir.join(SETTINGS_FILE_NAME);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse { path, source })
    }

    /// Configured page URL, ignoring blank values.
    pub fn base_url(&self) -> Option<&str> {
        self.base_url
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Resolved runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Page to scrape for stream links.
    pub base_url: String,
    /// Plugin URL the host invoked us with; used to build `play` entries.
    pub plugin_url: String,
    /// Per-install directory holding the cache and settings.
    pub data_dir: PathBuf,
    pub link_scheme: String,
}

impl Config {
    pub fn new(plugin_url: impl Into<String>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            plugin_url: plugin_url.into(),
            data_dir: data_dir.into(),
            link_scheme: ACESTREAM_SCHEME.to_string(),
        }
    }

    /// Build the configuration for one invocation.
    ///
    /// `base_url` precedence: explicit override, then `settings.toml`, then
    /// [`DEFAULT_BASE_URL`]. A settings file that cannot be read or parsed is
    /// logged and treated as absent.
    pub fn resolve(
        plugin_url: impl Into<String>,
        data_dir: Option<PathBuf>,
        base_url: Option<String>,
    ) -> Result<Self, ConfigError> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => default_data_dir()?,
        };
        let settings = Settings::load(&data_dir).unwrap_or_else(|e| {
            log::warn!("Ignoring unusable settings: {}", e);
            Settings::default()
        });

        let mut config = Self::new(plugin_url, data_dir);
        if let Some(url) = base_url
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .or_else(|| settings.base_url())
        {
            config.base_url = url.to_string();
        }
        Ok(config)
    }

    pub fn cache_path(&self) -> PathBuf {
        self.data_dir.join(CACHE_FILE_NAME)
    }
}

pub fn default_data_dir() -> Result<PathBuf, ConfigError> {
    dirs::data_dir()
        .map(|dir| dir.join(DATA_DIR_NAME))
        .ok_or(ConfigError::NoDataDir)
}
