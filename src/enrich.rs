//! Mix metadata enrichment.
//!
//! Each mix picks how its title and description are sourced through its
//! `descriptionOption`:
//!
//! - `A` (default): the stored description, or a placeholder.
//! - `B`: the video data API, when enabled and credentialed. Falls back to
//!   `A` when the lookup yields no description.
//! - `C`: the oEmbed title; the description becomes the placeholder.
//!
//! Remote failures never surface. They are logged and the mix keeps its
//! stored data. Results are cached on disk for a fixed duration.

mod cache;
mod youtube;

use std::io;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::EnrichConfig;
use crate::model::{DescriptionOption, Mix};

pub use cache::MetadataCache;
pub use youtube::YouTube;

/// Shown when no description could be sourced.
pub const DESCRIPTION_FALLBACK: &str = "Description not loaded — see YouTube";

/// Errors from fetching or caching metadata.
#[derive(Debug, thiserror::Error)]
pub enum EnrichError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cache I/O error: {0}")]
    Cache(io::Error),
}

pub type Result<T> = core::result::Result<T, EnrichError>;

/// Title and description as reported by the video platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoSnippet {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Where video metadata comes from.
pub trait MetadataSource {
    /// Title and description for a video id, via the keyed data API.
    fn video_snippet(&self, video_id: &str, api_key: &str) -> Result<Option<VideoSnippet>>;

    /// Title for a video page URL, via the keyless embed endpoint.
    fn embed_title(&self, url: &str) -> Result<Option<String>>;
}

/// Applies each mix's description option, consulting the cache first.
pub struct Enricher<S> {
    source: S,
    cache: Option<MetadataCache>,
    config: EnrichConfig,
}

impl<S: MetadataSource> Enricher<S> {
    pub fn new(source: S, cache: Option<MetadataCache>, config: EnrichConfig) -> Self {
        Self {
            source,
            cache,
            config,
        }
    }

    /// Enriches every mix, preserving order.
    pub fn enrich_all(&self, mixes: &[Mix]) -> Vec<Mix> {
        mixes.iter().map(|mix| self.enrich(mix)).collect()
    }

    /// Returns a copy of the mix with its title and description resolved.
    pub fn enrich(&self, mix: &Mix) -> Mix {
        match mix.description_option.unwrap_or_default() {
            DescriptionOption::A => with_stored_description(mix),
            DescriptionOption::B => self.from_data_api(mix),
            DescriptionOption::C => self.from_embed(mix),
        }
    }

    fn from_data_api(&self, mix: &Mix) -> Mix {
        let Some(api_key) = self.config.data_api_key() else {
            return with_stored_description(mix);
        };
        let Some(video_id) = mix.url().and_then(video_id) else {
            return with_stored_description(mix);
        };

        let snippet = self.cached(&format!("snippet:{video_id}"), || {
            self.source.video_snippet(&video_id, api_key)
        });

        let Some(snippet) = snippet else {
            return with_stored_description(mix);
        };
        let Some(description) = non_blank(snippet.description) else {
            return with_stored_description(mix);
        };

        Mix {
            title: non_blank(snippet.title).or_else(|| mix.title.clone()),
            description: Some(description),
            ..mix.clone()
        }
    }

    fn from_embed(&self, mix: &Mix) -> Mix {
        let title = mix.url().and_then(|url| {
            self.cached(&format!("oembed:{url}"), || self.source.embed_title(url))
        });

        Mix {
            title: non_blank(title).or_else(|| mix.title.clone()),
            description: Some(DESCRIPTION_FALLBACK.to_string()),
            ..mix.clone()
        }
    }

    /// Serves from the cache when fresh, otherwise fetches and stores.
    fn cached<T, F>(&self, key: &str, fetch: F) -> Option<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Result<Option<T>>,
    {
        if let Some(hit) = self.cache.as_ref().and_then(|c| c.get::<T>(key)) {
            return hit;
        }

        match fetch() {
            Ok(value) => {
                if let Some(cache) = &self.cache
                    && let Err(e) = cache.put(key, value.as_ref())
                {
                    tracing::warn!(key, error = %e, "failed to cache metadata");
                }
                value
            }
            Err(e) => {
                tracing::warn!(key, error = %e, "metadata fetch failed, keeping stored data");
                None
            }
        }
    }
}

fn with_stored_description(mix: &Mix) -> Mix {
    Mix {
        description: Some(
            mix.description()
                .unwrap_or(DESCRIPTION_FALLBACK)
                .to_string(),
        ),
        ..mix.clone()
    }
}

/// Extracts the `v` query parameter from a video page URL.
fn video_id(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    parsed
        .query_pairs()
        .find(|(key, _)| key == "v")
        .map(|(_, value)| value.into_owned())
        .filter(|id| !id.is_empty())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
