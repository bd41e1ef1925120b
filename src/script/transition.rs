//! Transitions: applying an action to the dialogue state.

use serde::Deserialize;

use crate::model::{
    Action, MELODIC_TECHNO, SceneId, SceneOutput, SiteContent, TerminalState, Transition,
};

use super::scene::{base_actions, dm_target, mentions_melodic_techno, scene_output, with_back};

/// The opening transition: a fresh state on the intro scene.
pub fn initial_state(content: &SiteContent) -> Transition {
    let state = TerminalState::default();
    let output = scene_output(SceneId::Intro, &state, content);
    Transition { state, output }
}

/// Runs an action against the current state.
///
/// Takes the state by value and returns its replacement alongside the
/// output to show. Never fails: missing data degrades to placeholder lines.
pub fn run_action(action: Action, state: TerminalState, content: &SiteContent) -> Transition {
    match action {
        Action::Goto { scene } => {
            let state = enter(state, scene);
            let output = scene_output(scene, &state, content);
            Transition { state, output }
        }
        Action::Back => {
            let mut state = state;
            state.last_scene = state.history.pop().unwrap_or(SceneId::Intro);
            let output = scene_output(state.last_scene, &state, content);
            Transition { state, output }
        }
        Action::MixSelect { index } => select_mix(index, state, content),
        Action::OpenCurrent => open_current(state, content),
        Action::CopyBooking => {
            let target = dm_target(content);
            let output = SceneOutput {
                lines: vec![format!("Copied booking handle: {target}")],
                actions: with_back(base_actions(), &state),
                copy_value: Some(target),
                ..SceneOutput::default()
            };
            Transition { state, output }
        }
        Action::Clear => {
            let output = SceneOutput {
                clear_output: true,
                ..scene_output(state.last_scene, &state, content)
            };
            Transition { state, output }
        }
    }
}

/// Runs an action given in its loosely-typed wire form.
///
/// Anything that does not decode to a known action (an unknown id, or a
/// known id missing its arguments) shows the help scene and leaves the
/// state untouched. Actions without arguments ignore any `args` they carry.
pub fn run_wire_action(
    raw: &serde_json::Value,
    state: TerminalState,
    content: &SiteContent,
) -> Transition {
    match decode_wire(raw) {
        Ok(action) => run_action(action, state, content),
        Err(e) => {
            tracing::warn!(error = %e, action = %raw, "unrecognized action, showing help");
            let output = scene_output(SceneId::Help, &state, content);
            Transition { state, output }
        }
    }
}

fn decode_wire(raw: &serde_json::Value) -> Result<Action, serde_json::Error> {
    let unit = match raw.get("actionId").and_then(serde_json::Value::as_str) {
        Some("open.current") => Some(Action::OpenCurrent),
        Some("back") => Some(Action::Back),
        Some("clear") => Some(Action::Clear),
        Some("copy.booking") => Some(Action::CopyBooking),
        _ => None,
    };
    match unit {
        Some(action) => Ok(action),
        None => Action::deserialize(raw),
    }
}

/// Moves to `scene`, recording the current scene in history unless it is a self-loop.
fn enter(mut state: TerminalState, scene: SceneId) -> TerminalState {
    if state.last_scene != scene {
        state.history.push(state.last_scene);
    }
    state.last_scene = scene;
    state
}

fn select_mix(index: usize, mut state: TerminalState, content: &SiteContent) -> Transition {
    let mix = content.sets.get(index);

    let blob = mix.map_or_else(String::new, |m| {
        format!(
            "{} {}",
            m.title.as_deref().unwrap_or_default(),
            m.description.as_deref().unwrap_or_default()
        )
    });
    let genre_match = content
        .positional_genre(index)
        .is_some_and(mentions_melodic_techno);

    if mentions_melodic_techno(&blob) || genre_match {
        state.user_interest.insert(MELODIC_TECHNO.to_string());
    }

    state.selected_mix_index = Some(index);
    if let Some(url) = mix.and_then(|m| m.url()) {
        state.last_opened = Some(url.to_string());
    }

    let state = enter(state, SceneId::MixDetail);
    let output = scene_output(SceneId::MixDetail, &state, content);
    Transition { state, output }
}

fn open_current(state: TerminalState, content: &SiteContent) -> Transition {
    let url = state
        .selected_mix_index
        .and_then(|index| content.sets.get(index))
        .and_then(|mix| mix.url())
        .map(str::to_string)
        .or_else(|| state.last_opened.clone());

    let line = match &url {
        Some(url) => format!("Opening link: {url}"),
        None => "No current mix link available. Select a mix first.".to_string(),
    };

    let output = SceneOutput {
        lines: vec![line],
        actions: with_back(base_actions(), &state),
        open_url: url,
        ..SceneOutput::default()
    };
    Transition { state, output }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::script::fixtures::{sample_content, two_mix_content};
    use crate::script::scene::{SUGGEST_AFTER_PICK, SUGGEST_FROM_INTEREST};

    fn goto(scene: SceneId) -> Action {
        Action::Goto { scene }
    }

    fn run_all(actions: &[Action], content: &SiteContent) -> Transition {
        let mut state = TerminalState::default();
        let mut last = None;
        for action in actions {
            let transition = run_action(*action, state, content);
            state = transition.state.clone();
            last = Some(transition);
        }
        last.expect("at least one action")
    }

    #[test]
    fn initial_state_shows_intro() {
        let content = sample_content();
        let transition = initial_state(&content);

        assert_eq!(transition.state, TerminalState::default());
        assert_eq!(
            transition.output.lines[0],
            "> Booting DJ-Shortcut terminal guide..."
        );
        assert_eq!(transition.output.actions.len(), 6);
    }

    #[test]
    fn goto_then_back_restores_scene_and_history() {
        let content = sample_content();
        let start = run_action(goto(SceneId::Mixes), TerminalState::default(), &content).state;
        assert_eq!(start.history, [SceneId::Intro]);

        let there = run_action(goto(SceneId::About), start.clone(), &content).state;
        assert_eq!(there.last_scene, SceneId::About);
        assert_eq!(there.history.len(), start.history.len() + 1);

        let back = run_action(Action::Back, there, &content).state;
        assert_eq!(back.last_scene, start.last_scene);
        assert_eq!(back.history.len(), start.history.len());
    }

    #[test]
    fn goto_current_scene_does_not_grow_history() {
        let content = sample_content();
        let state = run_action(goto(SceneId::Links), TerminalState::default(), &content).state;
        let again = run_action(goto(SceneId::Links), state.clone(), &content).state;

        assert_eq!(again.history, state.history);
        assert_eq!(again.last_scene, SceneId::Links);
    }

    #[test]
    fn back_with_empty_history_lands_on_intro() {
        let content = sample_content();
        let state = TerminalState {
            last_scene: SceneId::Links,
            ..TerminalState::default()
        };
        let transition = run_action(Action::Back, state, &content);

        assert_eq!(transition.state.last_scene, SceneId::Intro);
        assert!(transition.state.history.is_empty());
        assert!(transition.output.lines[0].starts_with("> Booting"));
    }

    #[test]
    fn select_then_open_uses_the_mix_url() {
        let content = sample_content();
        for (index, mix) in content.sets.iter().enumerate() {
            let selected =
                run_action(Action::MixSelect { index }, TerminalState::default(), &content);
            let opened = run_action(Action::OpenCurrent, selected.state, &content);

            match mix.url() {
                Some(url) => {
                    assert_eq!(opened.output.open_url.as_deref(), Some(url));
                    assert_eq!(opened.output.lines, [format!("Opening link: {url}")]);
                }
                None => {
                    assert_eq!(opened.output.open_url, None);
                    assert_eq!(
                        opened.output.lines,
                        ["No current mix link available. Select a mix first."]
                    );
                }
            }
        }
    }

    #[test]
    fn open_falls_back_to_last_opened() {
        let content = sample_content();
        // Mix 3 has no link; the link from mix 1 is still remembered.
        let transition = run_all(
            &[
                Action::MixSelect { index: 0 },
                Action::MixSelect { index: 2 },
                Action::OpenCurrent,
            ],
            &content,
        );

        assert_eq!(
            transition.output.open_url.as_deref(),
            Some("https://www.youtube.com/watch?v=hd3")
        );
    }

    #[test]
    fn open_does_not_move() {
        let content = sample_content();
        let selected = run_action(
            Action::MixSelect { index: 1 },
            TerminalState::default(),
            &content,
        );
        let opened = run_action(Action::OpenCurrent, selected.state.clone(), &content);

        assert_eq!(opened.state, selected.state);
    }

    #[test]
    fn select_records_selection_and_history() {
        let content = sample_content();
        let transition = run_action(
            Action::MixSelect { index: 1 },
            TerminalState::default(),
            &content,
        );

        assert_eq!(transition.state.selected_mix_index, Some(1));
        assert_eq!(transition.state.last_scene, SceneId::MixDetail);
        assert_eq!(transition.state.history, [SceneId::Intro]);
        assert_eq!(
            transition.state.last_opened.as_deref(),
            Some("https://www.youtube.com/watch?v=hd2")
        );
        assert!(transition.output.show_thinking);
    }

    #[test]
    fn melodic_pick_carries_over_to_other_mixes() {
        let content = two_mix_content();
        let first = run_action(
            Action::MixSelect { index: 0 },
            TerminalState::default(),
            &content,
        );
        assert!(first.state.has_interest(MELODIC_TECHNO));

        for index in 0..content.sets.len() {
            let detail = run_action(Action::MixSelect { index }, first.state.clone(), &content);
            let last = detail.output.lines.last().unwrap();
            assert!(
                last == SUGGEST_AFTER_PICK || last == SUGGEST_FROM_INTEREST,
                "unexpected follow-up for mix {index}: {last}"
            );
        }
    }

    #[test]
    fn melodic_techno_then_indie_dance_scenario() {
        let content = two_mix_content();
        let transition = run_all(
            &[
                goto(SceneId::Mixes),
                Action::MixSelect { index: 0 },
                Action::Back,
                Action::MixSelect { index: 1 },
            ],
            &content,
        );

        assert_eq!(
            transition.output.lines.last().map(String::as_str),
            Some(SUGGEST_FROM_INTEREST)
        );
        assert_eq!(transition.state.history, [SceneId::Intro, SceneId::Mixes]);
    }

    #[test]
    fn interest_is_never_removed() {
        let content = two_mix_content();
        let transition = run_all(
            &[
                Action::MixSelect { index: 0 },
                Action::MixSelect { index: 1 },
                goto(SceneId::About),
                Action::Clear,
            ],
            &content,
        );

        assert!(transition.state.has_interest(MELODIC_TECHNO));
    }

    #[test]
    fn select_out_of_range_degrades() {
        let content = sample_content();
        let transition = run_action(
            Action::MixSelect { index: 9 },
            TerminalState::default(),
            &content,
        );

        assert_eq!(transition.state.selected_mix_index, Some(9));
        assert_eq!(transition.state.last_opened, None);
        assert!(transition.output.lines[0].starts_with("No mix selected."));
    }

    #[test]
    fn copy_booking_declares_handle() {
        let content = sample_content();
        let state = TerminalState::default();
        let transition = run_action(Action::CopyBooking, state.clone(), &content);

        assert_eq!(transition.state, state);
        assert_eq!(transition.output.copy_value.as_deref(), Some("@shortcutlife"));
        assert_eq!(
            transition.output.lines,
            ["Copied booking handle: @shortcutlife"]
        );
    }

    #[test]
    fn clear_repeats_current_scene() {
        let content = sample_content();
        let state = run_action(goto(SceneId::About), TerminalState::default(), &content).state;
        let transition = run_action(Action::Clear, state.clone(), &content);

        assert!(transition.output.clear_output);
        assert_eq!(transition.state, state);
        assert_eq!(
            transition.output.lines,
            scene_output(SceneId::About, &state, &content).lines
        );
    }

    #[test]
    fn unknown_wire_action_shows_help() {
        let content = sample_content();
        let state = TerminalState {
            last_scene: SceneId::Links,
            history: vec![SceneId::Intro],
            ..TerminalState::default()
        };

        for raw in [
            serde_json::json!({"actionId": "dance"}),
            serde_json::json!({"actionId": "goto"}),
            serde_json::json!({"actionId": "mix.select", "args": {}}),
        ] {
            let transition = run_wire_action(&raw, state.clone(), &content);
            assert_eq!(transition.state, state);
            assert_eq!(
                transition.output,
                scene_output(SceneId::Help, &state, &content)
            );
        }
    }

    #[test]
    fn unit_wire_actions_ignore_args() {
        let content = sample_content();
        let state = TerminalState {
            last_scene: SceneId::Links,
            history: vec![SceneId::Intro],
            ..TerminalState::default()
        };

        let raw = serde_json::json!({"actionId": "back", "args": {}});
        let transition = run_wire_action(&raw, state.clone(), &content);
        assert_eq!(transition.state.last_scene, SceneId::Intro);
        assert!(transition.state.history.is_empty());

        let raw = serde_json::json!({"actionId": "copy.booking", "args": {"mixIndex": 3}});
        let transition = run_wire_action(&raw, state.clone(), &content);
        assert_eq!(transition.output.copy_value.as_deref(), Some("@shortcutlife"));

        let raw = serde_json::json!({"actionId": "clear", "args": "ignored"});
        let transition = run_wire_action(&raw, state, &content);
        assert!(transition.output.clear_output);
    }

    #[test]
    fn known_wire_action_runs() {
        let content = sample_content();
        let raw = serde_json::json!({"actionId": "mix.select", "args": {"mixIndex": 1}});
        let transition = run_wire_action(&raw, TerminalState::default(), &content);

        assert_eq!(transition.state.selected_mix_index, Some(1));
    }
}
