//! Site content: everything the terminal knows about the artist.

use serde::{Deserialize, Serialize};

/// Static site content, loaded once and never mutated.
///
/// Always fully populated. Loaders substitute the fields of
/// [`SiteContent::fallback`] for anything missing or invalid, so nothing
/// downstream has to handle absent data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteContent {
    pub dj_name: String,
    pub tagline: String,
    pub bio_short: String,
    pub genres: Vec<String>,
    pub bpm_range: String,
    pub region: String,
    pub links: SocialLinks,
    pub cover_photo: String,
    pub og_image: Option<String>,
    pub sets: Vec<Mix>,
    pub gigs: Vec<Gig>,
    pub contact: String,
    pub boot_log_lines: Vec<String>,
}

impl SiteContent {
    /// The record used when the content source is missing or broken.
    pub fn fallback() -> Self {
        Self {
            dj_name: "DJ PROFILE".into(),
            tagline: "Terminal mode engaged.".into(),
            bio_short: "Artist profile currently loading.".into(),
            genres: vec!["Electronic".into()],
            bpm_range: "120-140 BPM".into(),
            region: "Unknown Region".into(),
            links: SocialLinks::default(),
            cover_photo: "/cover.jpg".into(),
            og_image: None,
            sets: Vec::new(),
            gigs: Vec::new(),
            contact: "DM for bookings.".into(),
            boot_log_lines: vec![
                "[SYS] BOOTING PROFILE...".into(),
                "[WARN] CONTENT SOURCE NOT AVAILABLE".into(),
                "[OK] SAFE MODE READY".into(),
            ],
        }
    }

    /// The genre tag at a mix's position, wrapping around the genre list.
    ///
    /// Mix order and genre order are unrelated lists; this positional
    /// coupling is kept because the follow-up suggestions depend on it.
    pub fn positional_genre(&self, mix_index: usize) -> Option<&str> {
        if self.genres.is_empty() {
            return None;
        }
        self.genres
            .get(mix_index % self.genres.len())
            .map(String::as_str)
    }
}

/// Social platform links. Each is optional; empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub soundcloud: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub youtube_channel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram: Option<String>,
}

impl SocialLinks {
    /// Non-empty links as `(platform, url)` pairs, in display order.
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        [
            ("soundcloud", &self.soundcloud),
            ("facebook", &self.facebook),
            ("youtubeChannel", &self.youtube_channel),
            ("instagram", &self.instagram),
        ]
        .into_iter()
        .filter_map(|(name, value)| non_empty(value).map(|v| (name, v)))
        .collect()
    }
}

/// A recorded DJ mix.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mix {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,

    /// How the description is sourced when mixes are enriched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_option: Option<DescriptionOption>,
}

impl Mix {
    pub fn title(&self) -> Option<&str> {
        non_empty(&self.title)
    }

    pub fn platform(&self) -> Option<&str> {
        non_empty(&self.platform)
    }

    pub fn url(&self) -> Option<&str> {
        non_empty(&self.url)
    }

    pub fn description(&self) -> Option<&str> {
        non_empty(&self.description)
    }
}

/// Where an enriched mix takes its title and description from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DescriptionOption {
    /// The description stored in the content file.
    #[default]
    A,

    /// The video platform's data API (requires an API key).
    B,

    /// The keyless embed-info endpoint: title only.
    C,
}

/// A live appearance. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}
