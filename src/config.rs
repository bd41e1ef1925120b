//! Shortcut configuration.
//!
//! Loaded from `~/.shortcut/config.toml`. Every key is optional and a
//! missing file means defaults; a file that exists but does not parse is an
//! error.
//!
//! Enrichment switches resolve through a chain:
//!
//! 1. CLI flag (`--youtube-data-api`)
//! 2. `SHORTCUT_ENABLE_YOUTUBE_DATA_API=true` / `YOUTUBE_API_KEY` env vars
//! 3. `[enrich]` in the config file

use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{env, fs, io};

use serde::{Deserialize, Serialize};

use crate::content::DEFAULT_CONTENT_PATH;

/// Env var that switches on the video data API lookup.
pub const ENABLE_DATA_API_VAR: &str = "SHORTCUT_ENABLE_YOUTUBE_DATA_API";

/// Env var holding the video data API key.
pub const API_KEY_VAR: &str = "YOUTUBE_API_KEY";

/// Shortcut configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Where the site content lives. Relative paths resolve against the
    /// working directory.
    pub content_path: Option<PathBuf>,

    /// Refuse to start on invalid content instead of falling back.
    pub strict_content: bool,

    pub reveal: RevealConfig,
    pub enrich: EnrichConfig,
}

/// Console typing animation timings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RevealConfig {
    pub line_delay_ms: u64,
    pub thinking_delay_ms: u64,
    pub boot_interval_ms: u64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            line_delay_ms: 160,
            thinking_delay_ms: 280,
            boot_interval_ms: 150,
        }
    }
}

impl RevealConfig {
    pub fn line_delay(&self) -> Duration {
        Duration::from_millis(self.line_delay_ms)
    }

    pub fn thinking_delay(&self) -> Duration {
        Duration::from_millis(self.thinking_delay_ms)
    }

    pub fn boot_interval(&self) -> Duration {
        Duration::from_millis(self.boot_interval_ms)
    }
}

/// Mix metadata enrichment settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct EnrichConfig {
    /// Query the video data API for descriptions. Needs an API key.
    pub youtube_data_api: bool,

    /// The API key. Usually supplied through `YOUTUBE_API_KEY` instead.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// How long fetched metadata stays fresh.
    pub cache_ttl_secs: u64,
}

impl Default for EnrichConfig {
    fn default() -> Self {
        Self {
            youtube_data_api: false,
            api_key: None,
            cache_ttl_secs: 3600,
        }
    }
}

impl EnrichConfig {
    /// Applies the env var layer on top of the file settings.
    pub fn with_env(mut self) -> Self {
        if let Ok(flag) = env::var(ENABLE_DATA_API_VAR)
            && !flag.is_empty()
        {
            self.youtube_data_api = flag == "true";
        }
        if let Ok(key) = env::var(API_KEY_VAR)
            && !key.is_empty()
        {
            self.api_key = Some(key);
        }
        self
    }

    /// The data API key, if the data API is both enabled and credentialed.
    pub fn data_api_key(&self) -> Option<&str> {
        if !self.youtube_data_api {
            return None;
        }
        self.api_key.as_deref().filter(|k| !k.is_empty())
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

impl Config {
    /// Load config from `~/.shortcut/config.toml`, or defaults when absent.
    pub fn load() -> Result<Self, String> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load config from a specific file, or defaults when it doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        let contents = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(format!("failed to read {}: {e}", path.display())),
        };

        toml::from_str(&contents).map_err(|e| format!("invalid config at {}: {e}", path.display()))
    }

    /// The config file path: `~/.shortcut/config.toml`.
    pub fn path() -> Option<PathBuf> {
        Self::home_dir().map(|h| h.join("config.toml"))
    }

    /// Shortcut's home directory: `~/.shortcut/`.
    pub fn home_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".shortcut"))
    }

    /// The content file to load: explicit override, then config, then default.
    pub fn content_path(&self, explicit: Option<&Path>) -> PathBuf {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| self.content_path.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONTENT_PATH))
    }
}
