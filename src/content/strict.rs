//! Strict content parsing: fail fast on the first invalid field.
//!
//! Use this when content integrity has to be enforced at load time, for
//! example in CI before publishing. The error names the offending field
//! path (`sets[1].url`) and the type that was expected there.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};

use crate::model::{DescriptionOption, Gig, Mix, SiteContent, SocialLinks};

use super::ContentError;

const NON_EMPTY_STRING: &str = "a non-empty string";
const STRING: &str = "a string";
const ARRAY: &str = "an array";
const OBJECT: &str = "an object";
const DESCRIPTION_OPTION: &str = "one of \"A\", \"B\", \"C\"";

/// Reads and strictly parses the content file at `path`.
pub fn load(path: &Path) -> Result<SiteContent, ContentError> {
    let json = fs::read_to_string(path).map_err(|source| ContentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&json)
}

/// Strictly parses content JSON.
pub fn parse(json: &str) -> Result<SiteContent, ContentError> {
    let raw: Value = serde_json::from_str(json)?;
    let root = raw.as_object().ok_or(ContentError::NotAnObject)?;

    let dj_name = required_string(root, "djName", "djName")?;
    let tagline = required_string(root, "tagline", "tagline")?;
    let bio_short = required_string(root, "bioShort", "bioShort")?;
    let genres = string_array(root, "genres")?;
    let bpm_range = required_string(root, "bpmRange", "bpmRange")?;
    let region = required_string(root, "region", "region")?;
    let links = links(root)?;
    let cover_photo = required_string(root, "coverPhoto", "coverPhoto")?;
    let og_image = optional_string(root, "ogImage", "ogImage")?;
    let sets: Vec<Mix> = array(root, "sets")?
        .iter()
        .enumerate()
        .map(|(i, value)| mix(value, &format!("sets[{i}]")))
        .collect::<Result<_, _>>()?;
    let gigs: Vec<Gig> = array(root, "gigs")?
        .iter()
        .enumerate()
        .map(|(i, value)| gig(value, &format!("gigs[{i}]")))
        .collect::<Result<_, _>>()?;
    let contact = required_string(root, "contact", "contact")?;
    let boot_log_lines = string_array(root, "bootLogLines")?;

    Ok(SiteContent {
        dj_name,
        tagline,
        bio_short,
        genres,
        bpm_range,
        region,
        links,
        og_image: og_image.or_else(|| Some(cover_photo.clone())),
        cover_photo,
        sets,
        gigs,
        contact,
        boot_log_lines,
    })
}

fn invalid(field: impl Into<String>, expected: &'static str) -> ContentError {
    ContentError::InvalidField {
        field: field.into(),
        expected,
    }
}

fn required_string(obj: &Map<String, Value>, key: &str, path: &str) -> Result<String, ContentError> {
    match obj.get(key).and_then(Value::as_str) {
        Some(s) if !s.trim().is_empty() => Ok(s.to_string()),
        _ => Err(invalid(path, NON_EMPTY_STRING)),
    }
}

fn optional_string(
    obj: &Map<String, Value>,
    key: &str,
    path: &str,
) -> Result<Option<String>, ContentError> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(invalid(path, STRING)),
    }
}

fn array<'a>(obj: &'a Map<String, Value>, key: &str) -> Result<&'a Vec<Value>, ContentError> {
    obj.get(key)
        .and_then(Value::as_array)
        .ok_or_else(|| invalid(key, ARRAY))
}

fn object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>, ContentError> {
    value.as_object().ok_or_else(|| invalid(path, OBJECT))
}

fn string_array(obj: &Map<String, Value>, key: &str) -> Result<Vec<String>, ContentError> {
    array(obj, key)?
        .iter()
        .enumerate()
        .map(|(i, value)| match value.as_str() {
            Some(s) if !s.trim().is_empty() => Ok(s.to_string()),
            _ => Err(invalid(format!("{key}[{i}]"), NON_EMPTY_STRING)),
        })
        .collect()
}

fn links(root: &Map<String, Value>) -> Result<SocialLinks, ContentError> {
    let obj = object(root.get("links").unwrap_or(&Value::Null), "links")?;
    let link = |key: &str| optional_string(obj, key, &format!("links.{key}"));

    Ok(SocialLinks {
        soundcloud: link("soundcloud")?,
        facebook: link("facebook")?,
        youtube_channel: link("youtubeChannel")?,
        instagram: link("instagram")?,
    })
}

fn mix(value: &Value, path: &str) -> Result<Mix, ContentError> {
    let obj = object(value, path)?;
    let field = |key: &str| format!("{path}.{key}");

    let description_option = match obj.get("descriptionOption") {
        None | Some(Value::Null) => None,
        Some(v) => Some(
            serde_json::from_value::<DescriptionOption>(v.clone())
                .map_err(|_| invalid(field("descriptionOption"), DESCRIPTION_OPTION))?,
        ),
    };

    Ok(Mix {
        title: Some(required_string(obj, "title", &field("title"))?),
        platform: Some(required_string(obj, "platform", &field("platform"))?),
        url: Some(required_string(obj, "url", &field("url"))?),
        description: optional_string(obj, "description", &field("description"))?,
        duration: optional_string(obj, "duration", &field("duration"))?,
        description_option,
    })
}

fn gig(value: &Value, path: &str) -> Result<Gig, ContentError> {
    let obj = object(value, path)?;
    let field = |key: &str| optional_string(obj, key, &format!("{path}.{key}"));

    Ok(Gig {
        date: field("date")?,
        venue: field("venue")?,
        city: field("city")?,
        note: field("note")?,
    })
}
