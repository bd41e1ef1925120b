//! Content provider: loads the site content from a local JSON file.
//!
//! Two flavours. The lenient loader never fails: any field that is missing,
//! empty, or of the wrong type is taken from [`SiteContent::fallback`], and
//! an unreadable or malformed file yields the whole fallback record. The
//! strict loader ([`strict`]) fails fast on the first invalid field instead.

pub mod strict;

use std::path::{Path, PathBuf};
use std::{fs, io};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

use crate::model::{Gig, Mix, SiteContent, SocialLinks};

/// Default location of the content file, relative to the working directory.
pub const DEFAULT_CONTENT_PATH: &str = "content/content.json";

/// Errors from loading content strictly.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("content is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid content payload: expected an object")]
    NotAnObject,

    #[error("invalid content field: {field} must be {expected}")]
    InvalidField {
        field: String,
        expected: &'static str,
    },
}

/// Loads content from `path`, falling back field by field.
pub fn load(path: &Path) -> SiteContent {
    match fs::read_to_string(path) {
        Ok(json) => parse_lenient(&json),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "content unreadable, using fallback");
            SiteContent::fallback()
        }
    }
}

/// Parses content JSON, falling back field by field.
pub fn parse_lenient(json: &str) -> SiteContent {
    let value = match serde_json::from_str::<serde_json::Value>(json) {
        Ok(value) if value.is_object() => value,
        Ok(_) => {
            tracing::warn!("content is not a JSON object, using fallback");
            return SiteContent::fallback();
        }
        Err(e) => {
            tracing::warn!(error = %e, "content is not valid JSON, using fallback");
            return SiteContent::fallback();
        }
    };

    match serde_json::from_value::<RawContent>(value) {
        Ok(raw) => raw.resolve(),
        Err(e) => {
            tracing::warn!(error = %e, "content could not be read, using fallback");
            SiteContent::fallback()
        }
    }
}

/// Content as found in the file: every field optional, wrong types dropped.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawContent {
    #[serde(default, deserialize_with = "lenient")]
    dj_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    tagline: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    bio_short: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    genres: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient")]
    bpm_range: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    region: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    links: Option<LenientLinks>,
    #[serde(default, deserialize_with = "lenient")]
    cover_photo: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    og_image: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    sets: Option<Vec<LenientMix>>,

    /// Older content files keep their mixes under this key.
    #[serde(default, deserialize_with = "lenient")]
    higher_dimensions_sets: Option<Vec<LenientMix>>,

    #[serde(default, deserialize_with = "lenient")]
    gigs: Option<Vec<LenientGig>>,
    #[serde(default, deserialize_with = "lenient")]
    contact: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    boot_log_lines: Option<Vec<String>>,
}

impl RawContent {
    fn resolve(self) -> SiteContent {
        let fallback = SiteContent::fallback();

        let cover_photo = text(self.cover_photo).unwrap_or(fallback.cover_photo);
        let og_image = text(self.og_image).unwrap_or_else(|| cover_photo.clone());

        let sets = self
            .sets
            .or(self.higher_dimensions_sets)
            .map(|sets| sets.into_iter().map(|m| m.0).collect())
            .unwrap_or(fallback.sets);

        SiteContent {
            dj_name: text(self.dj_name).unwrap_or(fallback.dj_name),
            tagline: text(self.tagline).unwrap_or(fallback.tagline),
            bio_short: text(self.bio_short).unwrap_or(fallback.bio_short),
            genres: non_empty(self.genres).unwrap_or(fallback.genres),
            bpm_range: text(self.bpm_range).unwrap_or(fallback.bpm_range),
            region: text(self.region).unwrap_or(fallback.region),
            links: self.links.map_or(fallback.links, |l| l.0),
            cover_photo,
            og_image: Some(og_image),
            sets,
            gigs: self
                .gigs
                .map(|gigs| gigs.into_iter().map(|g| g.0).collect())
                .unwrap_or(fallback.gigs),
            contact: text(self.contact).unwrap_or(fallback.contact),
            boot_log_lines: non_empty(self.boot_log_lines).unwrap_or(fallback.boot_log_lines),
        }
    }
}

/// A mix whose individual fields fall back to absent when mistyped.
#[derive(Debug)]
struct LenientMix(Mix);

impl<'de> Deserialize<'de> for LenientMix {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Fields {
            #[serde(default, deserialize_with = "lenient")]
            title: Option<String>,
            #[serde(default, deserialize_with = "lenient")]
            platform: Option<String>,
            #[serde(default, deserialize_with = "lenient")]
            url: Option<String>,
            #[serde(default, deserialize_with = "lenient")]
            description: Option<String>,
            #[serde(default, deserialize_with = "lenient")]
            duration: Option<String>,
            #[serde(default, deserialize_with = "lenient")]
            description_option: Option<crate::model::DescriptionOption>,
        }

        let value = serde_json::Value::deserialize(deserializer)?;
        let Ok(f) = serde_json::from_value::<Fields>(value) else {
            return Ok(Self(Mix::default()));
        };
        Ok(Self(Mix {
            title: f.title,
            platform: f.platform,
            url: f.url,
            description: f.description,
            duration: f.duration,
            description_option: f.description_option,
        }))
    }
}

/// A gig whose individual fields fall back to absent when mistyped.
#[derive(Debug)]
struct LenientGig(Gig);

impl<'de> Deserialize<'de> for LenientGig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        let field = |name: &str| {
            value
                .get(name)
                .and_then(serde_json::Value::as_str)
                .map(str::to_string)
        };
        Ok(Self(Gig {
            date: field("date"),
            venue: field("venue"),
            city: field("city"),
            note: field("note"),
        }))
    }
}

/// Social links read key by key, so one mistyped link keeps its siblings.
#[derive(Debug)]
struct LenientLinks(SocialLinks);

impl<'de> Deserialize<'de> for LenientLinks {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        let link = |name: &str| {
            value
                .get(name)
                .and_then(serde_json::Value::as_str)
                .map(str::to_string)
        };
        Ok(Self(SocialLinks {
            soundcloud: link("soundcloud"),
            facebook: link("facebook"),
            youtube_channel: link("youtubeChannel"),
            instagram: link("instagram"),
        }))
    }
}

/// Deserializes a field, treating a value of the wrong shape as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn text(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

fn non_empty<T>(value: Option<Vec<T>>) -> Option<Vec<T>> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    use tempfile::NamedTempFile;

    const FULL: &str = r#"{
        "djName": "DJ-Shortcut",
        "tagline": "Music for the mind.",
        "bioShort": "Electronic dance music and underground energy.",
        "genres": ["deep house", "melodic techno", "indie dance"],
        "bpmRange": "123-145 BPM",
        "region": "Brussels, BE",
        "links": {"soundcloud": "https://soundcloud.com/dj-shortcut", "instagram": "shortcutlife"},
        "coverPhoto": "/cover.jpg",
        "sets": [
            {"title": "Higher Dimensions 3", "platform": "YouTube", "url": "https://www.youtube.com/watch?v=hd3", "descriptionOption": "B"}
        ],
        "gigs": [{"date": "2026-11-14", "venue": "Fuse", "city": "Brussels"}],
        "contact": "booking@dj-shortcut.com",
        "bootLogLines": ["[SYS] INITIALIZING", "[OK] READY"]
    }"#;

    #[test]
    fn parses_complete_content() {
        let content = parse_lenient(FULL);

        assert_eq!(content.dj_name, "DJ-Shortcut");
        assert_eq!(content.genres.len(), 3);
        assert_eq!(content.links.instagram.as_deref(), Some("shortcutlife"));
        assert_eq!(content.sets[0].title(), Some("Higher Dimensions 3"));
        assert_eq!(
            content.sets[0].description_option,
            Some(crate::model::DescriptionOption::B)
        );
        assert_eq!(content.gigs[0].venue.as_deref(), Some("Fuse"));
        assert_eq!(content.boot_log_lines, ["[SYS] INITIALIZING", "[OK] READY"]);
    }

    #[test]
    fn og_image_defaults_to_cover_photo() {
        let content = parse_lenient(r#"{"coverPhoto": "/hero.png"}"#);
        assert_eq!(content.og_image.as_deref(), Some("/hero.png"));
    }

    #[test]
    fn missing_fields_fall_back_individually() {
        let content = parse_lenient(r#"{"djName": "DJ-Shortcut", "genres": []}"#);
        let fallback = SiteContent::fallback();

        assert_eq!(content.dj_name, "DJ-Shortcut");
        assert_eq!(content.tagline, fallback.tagline);
        assert_eq!(content.genres, fallback.genres);
        assert_eq!(content.boot_log_lines, fallback.boot_log_lines);
        assert!(content.sets.is_empty());
    }

    #[test]
    fn wrong_types_fall_back() {
        let content = parse_lenient(
            r#"{"djName": 42, "genres": "house", "links": [], "sets": {"title": "x"}, "region": ""}"#,
        );
        let fallback = SiteContent::fallback();

        assert_eq!(content.dj_name, fallback.dj_name);
        assert_eq!(content.genres, fallback.genres);
        assert_eq!(content.links, SocialLinks::default());
        assert!(content.sets.is_empty());
        assert_eq!(content.region, fallback.region);
    }

    #[test]
    fn mistyped_mix_fields_are_dropped() {
        let content =
            parse_lenient(r#"{"sets": [{"title": "Keep", "url": 7}, "junk", {"platform": "YouTube"}]}"#);

        assert_eq!(content.sets.len(), 3);
        assert_eq!(content.sets[0].title(), Some("Keep"));
        assert_eq!(content.sets[0].url(), None);
        assert_eq!(content.sets[1], Mix::default());
        assert_eq!(content.sets[2].platform(), Some("YouTube"));
    }

    #[test]
    fn mistyped_link_keeps_its_siblings() {
        let content =
            parse_lenient(r#"{"links": {"soundcloud": 5, "instagram": "shortcutlife"}}"#);

        assert_eq!(content.links.soundcloud, None);
        assert_eq!(content.links.instagram.as_deref(), Some("shortcutlife"));
        assert_eq!(content.links.entries(), [("instagram", "shortcutlife")]);
    }

    #[test]
    fn legacy_sets_key() {
        let content = parse_lenient(r#"{"higherDimensionsSets": [{"title": "Higher Dimensions 1"}]}"#);
        assert_eq!(content.sets[0].title(), Some("Higher Dimensions 1"));
    }

    #[test]
    fn invalid_json_yields_fallback() {
        assert_eq!(parse_lenient("{not json"), SiteContent::fallback());
        assert_eq!(parse_lenient("[1, 2]"), SiteContent::fallback());
    }

    #[test]
    fn load_reads_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(FULL.as_bytes()).unwrap();

        let content = load(file.path());
        assert_eq!(content.region, "Brussels, BE");
    }

    #[test]
    fn load_missing_file_yields_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let content = load(&dir.path().join("content.json"));

        assert_eq!(content, SiteContent::fallback());
    }
}
