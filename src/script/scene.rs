//! Scene table: what each scene says and which chips it offers.

use crate::model::{
    Action, ActionChip, MELODIC_TECHNO, Mix, SceneId, SceneOutput, SiteContent, TerminalState,
};

/// Placeholder shown as the booking target when no Instagram handle is configured.
pub const DM_TARGET_MISSING: &str = "Instagram handle missing in content.json";

pub(super) const SUGGEST_AFTER_PICK: &str = "Since you picked melodic techno, try indie dance next.";
pub(super) const SUGGEST_FROM_INTEREST: &str =
    "You might also enjoy indie dance textures in the next set.";
pub(super) const SUGGEST_GENERIC: &str = "Want another direction? Try the next mix from the list.";

/// Computes the output for a scene. Pure: same inputs, same output.
pub fn scene_output(scene: SceneId, state: &TerminalState, content: &SiteContent) -> SceneOutput {
    match scene {
        SceneId::Intro => intro(content),
        SceneId::Help => help(state),
        SceneId::Play => play(state, content),
        SceneId::Mixes => mixes(state, content),
        SceneId::MixDetail => mix_detail(state, content),
        SceneId::Booking => booking(state, content),
        SceneId::Links => links(state, content),
        SceneId::About => about(state, content),
    }
}

/// The booking contact: the Instagram handle, always with a leading `@`.
pub fn dm_target(content: &SiteContent) -> String {
    match content.links.instagram.as_deref().map(str::trim) {
        Some(handle) if !handle.is_empty() => {
            if handle.starts_with('@') {
                handle.to_string()
            } else {
                format!("@{handle}")
            }
        }
        _ => DM_TARGET_MISSING.to_string(),
    }
}

/// The six chips every scene offers.
pub(super) fn base_actions() -> Vec<ActionChip> {
    vec![
        ActionChip::goto("Help", SceneId::Help),
        ActionChip::goto("Mixes", SceneId::Mixes),
        ActionChip::goto("Latest", SceneId::Play),
        ActionChip::goto("Book", SceneId::Booking),
        ActionChip::goto("Links", SceneId::Links),
        ActionChip::goto("About", SceneId::About),
    ]
}

/// Prepends a Back chip when there is somewhere to go back to.
pub(super) fn with_back(actions: Vec<ActionChip>, state: &TerminalState) -> Vec<ActionChip> {
    if state.history.is_empty() {
        return actions;
    }
    let mut chips = Vec::with_capacity(actions.len() + 1);
    chips.push(ActionChip::new("Back", Action::Back));
    chips.extend(actions);
    chips
}

/// Whether the text mentions melodic techno, ignoring case.
pub(super) fn mentions_melodic_techno(text: &str) -> bool {
    text.to_lowercase().contains(MELODIC_TECHNO)
}

fn intro(content: &SiteContent) -> SceneOutput {
    SceneOutput {
        lines: vec![
            format!("> Booting {} terminal guide...", content.dj_name),
            "This is a scripted assistant experience (no live AI API).".into(),
            content.tagline.clone(),
            format!("Region: {} | Tempo: {}", content.region, content.bpm_range),
            "Tap any action chip below or type \"help\".".into(),
        ],
        actions: base_actions(),
        ..SceneOutput::default()
    }
}

fn help(state: &TerminalState) -> SceneOutput {
    SceneOutput {
        lines: vec![
            "Commands: help, mixes, mix <n>, play/latest, book, links, about, open, back, clear."
                .into(),
            "Mobile-first tip: everything works through action chips too.".into(),
        ],
        actions: with_back(base_actions(), state),
        ..SceneOutput::default()
    }
}

fn play(state: &TerminalState, content: &SiteContent) -> SceneOutput {
    let latest = content.sets.first().filter(|mix| mix.url().is_some());

    let (lines, lead) = match latest {
        Some(mix) => (
            vec![
                format!(
                    "Now loading latest mix: {}.",
                    mix.title().unwrap_or("Untitled Mix")
                ),
                mix.description()
                    .unwrap_or("No description available.")
                    .to_string(),
            ],
            ActionChip::new("Open Latest", Action::MixSelect { index: 0 }),
        ),
        None => (
            vec!["No mixes available yet in content/content.json.".into()],
            ActionChip::goto("Mixes", SceneId::Mixes),
        ),
    };

    let mut actions = vec![lead];
    actions.extend(base_actions());

    SceneOutput {
        lines,
        actions: with_back(actions, state),
        show_thinking: true,
        ..SceneOutput::default()
    }
}

fn mixes(state: &TerminalState, content: &SiteContent) -> SceneOutput {
    let lines = if content.sets.is_empty() {
        vec!["No mixes found in content/content.json.".into()]
    } else {
        let mut lines = vec!["Available mixes:".to_string()];
        lines.extend(content.sets.iter().enumerate().map(|(i, mix)| {
            let n = i + 1;
            let title = mix.title().map_or_else(|| format!("Mix {n}"), str::to_string);
            let platform = mix.platform().unwrap_or("Platform N/A");
            format!("{n}. {title} ({platform})")
        }));
        lines
    };

    let mut actions: Vec<ActionChip> = (0..content.sets.len().min(6))
        .map(|index| ActionChip::new(format!("Mix {}", index + 1), Action::MixSelect { index }))
        .collect();
    actions.extend(base_actions());

    SceneOutput {
        lines,
        actions: with_back(actions, state),
        show_thinking: true,
        ..SceneOutput::default()
    }
}

fn mix_detail(state: &TerminalState, content: &SiteContent) -> SceneOutput {
    let selected = state
        .selected_mix_index
        .and_then(|index| content.sets.get(index).map(|mix| (index, mix)));

    let Some((index, mix)) = selected else {
        return SceneOutput {
            lines: vec![
                "No mix selected. Use \"mixes\" and choose one with chips or \"mix <n>\".".into(),
            ],
            actions: with_back(base_actions(), state),
            ..SceneOutput::default()
        };
    };

    let mut actions = vec![
        ActionChip::new("Open Mix", Action::OpenCurrent),
        ActionChip::goto("Mixes", SceneId::Mixes),
    ];
    actions.extend(base_actions());

    SceneOutput {
        lines: vec![
            format!(
                "Selected mix {}: {}",
                index + 1,
                mix.title().unwrap_or("Untitled")
            ),
            mix.description()
                .unwrap_or("No description available for this mix.")
                .to_string(),
            mix.url().map_or_else(
                || "No URL saved for this mix.".to_string(),
                |url| format!("Link ready: {url}"),
            ),
            suggestion(index, mix, state, content).to_string(),
        ],
        actions: with_back(actions, state),
        show_thinking: true,
        ..SceneOutput::default()
    }
}

/// Picks the follow-up line for a selected mix.
fn suggestion(
    index: usize,
    mix: &Mix,
    state: &TerminalState,
    content: &SiteContent,
) -> &'static str {
    let picked_melodic = [mix.title(), mix.description(), content.positional_genre(index)]
        .into_iter()
        .flatten()
        .any(mentions_melodic_techno);

    if picked_melodic {
        SUGGEST_AFTER_PICK
    } else if state.has_interest(MELODIC_TECHNO) {
        SUGGEST_FROM_INTEREST
    } else {
        SUGGEST_GENERIC
    }
}

fn booking(state: &TerminalState, content: &SiteContent) -> SceneOutput {
    let target = dm_target(content);

    let mut actions = vec![ActionChip::new("Copy DM Handle", Action::CopyBooking)];
    actions.extend(base_actions());

    SceneOutput {
        lines: vec![
            "Booking flow:".into(),
            format!("DM on Instagram: {target}"),
            "Preferred message: \"Hi, I want to book you for a set in [city/date].\"".into(),
        ],
        actions: with_back(actions, state),
        copy_value: Some(target),
        ..SceneOutput::default()
    }
}

fn links(state: &TerminalState, content: &SiteContent) -> SceneOutput {
    let entries = content.links.entries();
    let lines = if entries.is_empty() {
        vec!["No links found in content/content.json.".into()]
    } else {
        let mut lines = vec!["Official links:".to_string()];
        lines.extend(
            entries
                .into_iter()
                .map(|(name, url)| format!("- {name}: {url}")),
        );
        lines
    };

    SceneOutput {
        lines,
        actions: with_back(base_actions(), state),
        ..SceneOutput::default()
    }
}

fn about(state: &TerminalState, content: &SiteContent) -> SceneOutput {
    SceneOutput {
        lines: vec![
            format!("{} — {}", content.dj_name, content.bio_short),
            format!("Genres: {}", content.genres.join(", ")),
        ],
        actions: with_back(base_actions(), state),
        ..SceneOutput::default()
    }
}
