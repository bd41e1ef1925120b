//! Shared content fixtures for tests.

use crate::model::{Gig, Mix, SiteContent, SocialLinks};

/// A realistic content record with three mixes.
pub fn sample_content() -> SiteContent {
    SiteContent {
        dj_name: "DJ-Shortcut".into(),
        tagline: "Music for the mind.".into(),
        bio_short: "Electronic dance music and underground energy.".into(),
        genres: vec![
            "deep house".into(),
            "melodic techno".into(),
            "indie dance".into(),
        ],
        bpm_range: "123-145 BPM".into(),
        region: "Brussels, BE".into(),
        links: SocialLinks {
            soundcloud: Some("https://soundcloud.com/dj-shortcut".into()),
            facebook: Some(String::new()),
            youtube_channel: None,
            instagram: Some("shortcutlife".into()),
        },
        cover_photo: "/cover.jpg".into(),
        og_image: Some("/cover.jpg".into()),
        sets: vec![
            Mix {
                title: Some("Higher Dimensions 3".into()),
                platform: Some("YouTube".into()),
                url: Some("https://www.youtube.com/watch?v=hd3".into()),
                description: Some("Two hours of melodic techno from the rooftop.".into()),
                ..Mix::default()
            },
            Mix {
                title: Some("Higher Dimensions 2".into()),
                platform: Some("YouTube".into()),
                url: Some("https://www.youtube.com/watch?v=hd2".into()),
                description: Some("Warm-up set, deep and rolling.".into()),
                ..Mix::default()
            },
            Mix {
                title: Some("Higher Dimensions 1".into()),
                platform: Some("SoundCloud".into()),
                url: None,
                description: None,
                ..Mix::default()
            },
        ],
        gigs: vec![Gig {
            date: Some("2026-11-14".into()),
            venue: Some("Fuse".into()),
            city: Some("Brussels".into()),
            note: None,
        }],
        contact: "booking@dj-shortcut.com".into(),
        boot_log_lines: vec![
            "[SYS] INITIALIZING DJ-SHORTCUT PROFILE...".into(),
            "[OK] SYNCING RANGE -> 123-145 BPM".into(),
            "[OK] READY".into(),
        ],
    }
}

/// Two mixes, the first melodic techno, the second not.
///
/// A single genre keeps the positional genre lookup neutral.
pub fn two_mix_content() -> SiteContent {
    SiteContent {
        genres: vec!["deep house".into()],
        sets: vec![
            Mix {
                title: Some("Melodic Techno Vol.1".into()),
                platform: Some("YouTube".into()),
                url: Some("https://www.youtube.com/watch?v=mt1".into()),
                description: Some("Late night journey.".into()),
                ..Mix::default()
            },
            Mix {
                title: Some("Indie Dance Set".into()),
                platform: Some("SoundCloud".into()),
                url: Some("https://soundcloud.com/dj-shortcut/indie".into()),
                description: Some("Guitars meet drum machines.".into()),
                ..Mix::default()
            },
        ],
        ..sample_content()
    }
}
