//! Video platform metadata over HTTP.
//!
//! Two endpoints: the data API (title and description, needs a key) and
//! the oEmbed endpoint (title only, no key). Non-success statuses are
//! treated as "no metadata", not as errors.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;

use super::{MetadataSource, Result, VideoSnippet};

const DATA_API_URL: &str = "https://www.googleapis.com/youtube/v3/videos";
const OEMBED_URL: &str = "https://www.youtube.com/oembed";

/// Blocking client for the video platform's public endpoints.
pub struct YouTube {
    client: Client,
}

impl YouTube {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(concat!("shortcut/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

#[derive(Deserialize)]
struct VideoList {
    #[serde(default)]
    items: Vec<VideoItem>,
}

#[derive(Deserialize)]
struct VideoItem {
    snippet: Option<VideoSnippet>,
}

#[derive(Deserialize)]
struct OEmbed {
    title: Option<String>,
}

impl MetadataSource for YouTube {
    fn video_snippet(&self, video_id: &str, api_key: &str) -> Result<Option<VideoSnippet>> {
        let response = self
            .client
            .get(DATA_API_URL)
            .query(&[("part", "snippet"), ("id", video_id), ("key", api_key)])
            .send()?;

        if !response.status().is_success() {
            tracing::warn!(video_id, status = %response.status(), "data API request failed");
            return Ok(None);
        }

        let list: VideoList = response.json()?;
        Ok(list.items.into_iter().next().and_then(|item| item.snippet))
    }

    fn embed_title(&self, url: &str) -> Result<Option<String>> {
        let response = self
            .client
            .get(OEMBED_URL)
            .query(&[("url", url), ("format", "json")])
            .send()?;

        if !response.status().is_success() {
            tracing::warn!(url, status = %response.status(), "oEmbed request failed");
            return Ok(None);
        }

        let oembed: OEmbed = response.json()?;
        Ok(oembed.title)
    }
}
