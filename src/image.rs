//! Image URL resolution for cover photos and share images.
//!
//! Accepts root-relative paths and direct links to image files on external
//! hosts. Hosts known to serve expiring or hotlink-protected URLs are
//! rejected even when the extension looks right. Anything else resolves to
//! the bundled fallback image.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

/// The bundled cover image.
pub const FALLBACK_IMAGE: &str = "/cover.jpg";

static EXTERNAL_IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    case_insensitive(r"^https?://\S+\.(?:jpg|jpeg|png|webp|gif)(?:\?.*)?$")
});

static DENIED_HOST: LazyLock<Regex> = LazyLock::new(|| {
    case_insensitive(
        r"^https?://(?:[^/?#\s]*\.)?(?:facebook\.com|fbcdn\.net|fbsbx\.com|instagram\.com|cdninstagram\.com)(?:[:/?#]|$)",
    )
});

fn case_insensitive(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .unwrap_or_else(|e| unreachable!("invalid image pattern: {e}"))
}

/// Resolves an optional image reference to something safe to render.
///
/// Never fails: unrecognized input yields [`FALLBACK_IMAGE`].
pub fn resolve_image_url(value: Option<&str>) -> String {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return FALLBACK_IMAGE.to_string();
    };

    if value.starts_with('/') && !value.starts_with("//") {
        return value.to_string();
    }

    if EXTERNAL_IMAGE.is_match(value) && !DENIED_HOST.is_match(value) {
        return value.to_string();
    }

    tracing::debug!(image = value, "image rejected, using fallback");
    FALLBACK_IMAGE.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn external_image_with_query_is_kept() {
        let url = "https://cdn.example.com/photo.png?w=800";
        assert_eq!(resolve_image_url(Some(url)), url);
    }

    #[test]
    fn extensions_are_case_insensitive() {
        let url = "http://images.example.org/press/Shortcut.JPEG";
        assert_eq!(resolve_image_url(Some(url)), url);
    }

    #[test]
    fn denied_hosts_fall_back() {
        for url in [
            "https://facebook.com/photo.jpg",
            "https://www.facebook.com/photos/cover.png",
            "https://scontent.xx.fbcdn.net/v/t1/cover.jpg?oh=abc",
            "https://instagram.com/p/abc.webp",
        ] {
            assert_eq!(resolve_image_url(Some(url)), FALLBACK_IMAGE, "{url}");
        }
    }

    #[test]
    fn lookalike_hosts_are_not_denied() {
        let url = "https://notfacebook.com.example.net/cover.jpg";
        assert_eq!(resolve_image_url(Some(url)), url);
    }

    #[test]
    fn root_relative_paths_are_kept() {
        assert_eq!(resolve_image_url(Some("/images/hero.webp")), "/images/hero.webp");
    }

    #[test]
    fn protocol_relative_urls_fall_back() {
        assert_eq!(
            resolve_image_url(Some("//cdn.example.com/a.png")),
            FALLBACK_IMAGE
        );
    }

    #[test]
    fn missing_or_unrecognized_input_falls_back() {
        assert_eq!(resolve_image_url(None), FALLBACK_IMAGE);
        assert_eq!(resolve_image_url(Some("")), FALLBACK_IMAGE);
        assert_eq!(
            resolve_image_url(Some("https://example.com/page.html")),
            FALLBACK_IMAGE
        );
        assert_eq!(resolve_image_url(Some("cover.jpg")), FALLBACK_IMAGE);
        assert_eq!(
            resolve_image_url(Some("ftp://example.com/cover.jpg")),
            FALLBACK_IMAGE
        );
    }
}
