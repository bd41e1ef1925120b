//! Output formatting for CLI display.

use std::fmt::Write;

use crate::image::resolve_image_url;
use crate::model::{Gig, Mix, SiteContent};

const NO_GIGS: &str = "No gigs announced yet — check back soon.";

/// Text rendering of the site's landing page sections.
pub(super) fn format_page(content: &SiteContent) -> String {
    let mut out = String::new();

    // Hero.
    let _ = writeln!(out, "{}.exe // LIVE", content.dj_name.to_uppercase());
    let _ = writeln!(out, "{}", content.dj_name);
    let _ = writeln!(out, "{} {}", content.tagline, content.bio_short);
    let _ = writeln!(
        out,
        "Cover: {}",
        resolve_image_url(Some(content.cover_photo.as_str()))
    );
    let _ = writeln!(out, "> PLAY_LATEST  > DATES  > BOOKING");

    let _ = writeln!(out, "\nMixes");
    let _ = writeln!(out, "Latest sessions and recorded journeys.");
    if content.sets.is_empty() {
        let _ = writeln!(out, "  - No mixes yet.");
    }
    for (i, mix) in content.sets.iter().enumerate() {
        let _ = writeln!(out, "  - {}", mix_title(mix, i));
    }

    let _ = writeln!(out, "\nGigs");
    let _ = writeln!(out, "Upcoming dates and live appearances.");
    let gigs: Vec<String> = content.gigs.iter().filter_map(format_gig).collect();
    if gigs.is_empty() {
        let _ = writeln!(out, "  - {NO_GIGS}");
    }
    for gig in gigs {
        let _ = writeln!(out, "  - {gig}");
    }

    let _ = writeln!(out, "\nContact");
    let _ = writeln!(out, "For bookings and collaborations:");
    let _ = writeln!(out, "  {}", content.contact);

    let links = content.links.entries();
    if !links.is_empty() {
        let _ = writeln!(out, "\nLinks");
        for (name, url) in links {
            let _ = writeln!(out, "  {name:<16}{url}");
        }
    }

    out
}

/// Numbered mix listing with links and descriptions.
pub(super) fn format_mixes(mixes: &[Mix]) -> String {
    if mixes.is_empty() {
        return "No mixes\n".to_string();
    }

    let mut out = String::new();
    for (i, mix) in mixes.iter().enumerate() {
        let platform = mix.platform().unwrap_or("Platform N/A");
        let _ = writeln!(out, "{}. {} ({platform})", i + 1, mix_title(mix, i));
        if let Some(url) = mix.url() {
            let _ = writeln!(out, "   {url}");
        }
        if let Some(description) = mix.description() {
            let _ = writeln!(out, "   {description}");
        }
    }
    out
}

fn mix_title(mix: &Mix, index: usize) -> String {
    mix.title()
        .map_or_else(|| format!("Mix {}", index + 1), str::to_string)
}

/// One line per gig: date first, then where, then any note. Empty gigs are skipped.
fn format_gig(gig: &Gig) -> Option<String> {
    let place: Vec<&str> = [gig.venue.as_deref(), gig.city.as_deref()]
        .into_iter()
        .filter_map(non_blank)
        .collect();

    let mut parts = Vec::new();
    if let Some(date) = non_blank(gig.date.as_deref()) {
        parts.push(date.to_string());
    }
    if !place.is_empty() {
        parts.push(place.join(", "));
    }
    if let Some(note) = non_blank(gig.note.as_deref()) {
        parts.push(format!("({note})"));
    }

    (!parts.is_empty()).then(|| parts.join("  "))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::script::fixtures::sample_content;

    #[test]
    fn page_has_every_section() {
        let page = format_page(&sample_content());

        assert!(page.starts_with("DJ-SHORTCUT.exe // LIVE\nDJ-Shortcut\n"));
        assert!(page.contains("Cover: /cover.jpg"));
        assert!(page.contains("  - Higher Dimensions 3\n"));
        assert!(page.contains("  - 2026-11-14  Fuse, Brussels\n"));
        assert!(page.contains("Contact\nFor bookings and collaborations:\n  booking@dj-shortcut.com\n"));
        assert!(page.contains("soundcloud"));
        assert!(!page.contains("facebook"));
    }

    #[test]
    fn page_without_gigs_says_so() {
        let content = SiteContent {
            gigs: vec![Gig::default()],
            ..sample_content()
        };

        assert!(format_page(&content).contains(NO_GIGS));
    }

    #[test]
    fn page_cover_goes_through_the_image_resolver() {
        let content = SiteContent {
            cover_photo: "https://scontent.fbcdn.net/cover.jpg".into(),
            ..sample_content()
        };

        assert!(format_page(&content).contains("Cover: /cover.jpg"));
    }

    #[test]
    fn mixes_are_numbered_with_placeholders() {
        let listing = format_mixes(&sample_content().sets);

        assert!(listing.starts_with(
            "1. Higher Dimensions 3 (YouTube)\n   https://www.youtube.com/watch?v=hd3\n"
        ));
        assert!(listing.ends_with("3. Higher Dimensions 1 (SoundCloud)\n"));
    }

    #[test]
    fn gig_with_note_only() {
        let gig = Gig {
            note: Some("Secret location".into()),
            ..Gig::default()
        };

        assert_eq!(format_gig(&gig).as_deref(), Some("(Secret location)"));
    }
}
