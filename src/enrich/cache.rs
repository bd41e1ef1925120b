//! On-disk cache for fetched mix metadata.
//!
//! One JSON file per request under the cache root:
//!
//! ```text
//! <root>/<sha256(key)>.json   # { "fetchedAt": ..., "value": ... }
//! ```
//!
//! Entries older than the TTL are treated as missing. Empty results are
//! cached too, so a video without metadata is not refetched every run.

use std::path::PathBuf;
use std::time::Duration;
use std::{fs, io};

use jiff::Timestamp;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::{EnrichError, Result};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Entry<T> {
    fetched_at: Timestamp,
    value: Option<T>,
}

/// File-backed metadata cache with a fixed time-to-live.
pub struct MetadataCache {
    root: PathBuf,
    ttl: Duration,
}

impl MetadataCache {
    /// Creates a cache rooted at the given directory.
    ///
    /// The directory is created if it doesn't exist.
    pub fn new(root: impl Into<PathBuf>, ttl: Duration) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(EnrichError::Cache)?;
        Ok(Self { root, ttl })
    }

    /// Returns the default cache root: `~/.shortcut/cache/metadata/`.
    pub fn default_root() -> Option<PathBuf> {
        crate::config::Config::home_dir().map(|h| h.join("cache").join("metadata"))
    }

    /// Looks up a fresh entry. The outer `Option` is the cache hit; the inner
    /// one is the cached result, which may itself be empty.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<Option<T>> {
        self.get_at(key, Timestamp::now())
    }

    fn get_at<T: DeserializeOwned>(&self, key: &str, now: Timestamp) -> Option<Option<T>> {
        let json = match fs::read_to_string(self.path(key)) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(key, error = %e, "unreadable cache entry");
                return None;
            }
        };

        let entry: Entry<T> = match serde_json::from_str(&json) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(key, error = %e, "corrupt cache entry");
                return None;
            }
        };

        let age = now.as_second() - entry.fetched_at.as_second();
        let fresh = u64::try_from(age).is_ok_and(|age| age < self.ttl.as_secs());
        if !fresh {
            tracing::debug!(key, age, "cache entry expired");
            return None;
        }

        tracing::debug!(key, "cache hit");
        Some(entry.value)
    }

    /// Stores a result, stamped with the current time.
    pub fn put<T: Serialize>(&self, key: &str, value: Option<&T>) -> Result<()> {
        self.put_at(key, value, Timestamp::now())
    }

    fn put_at<T: Serialize>(&self, key: &str, value: Option<&T>, now: Timestamp) -> Result<()> {
        let entry = Entry {
            fetched_at: now,
            value,
        };
        let json = serde_json::to_string_pretty(&entry)?;
        fs::write(self.path(key), json).map_err(EnrichError::Cache)?;
        Ok(())
    }

    fn path(&self, key: &str) -> PathBuf {
        let digest = Sha256::digest(key.as_bytes());
        self.root.join(format!("{}.json", hex::encode(digest)))
    }
}
