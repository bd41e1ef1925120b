//! Typed command parsing.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::{Action, ActionChip, SceneId};

static MIX_COMMAND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^mix\s+(\d+)$").unwrap_or_else(|e| unreachable!("invalid mix pattern: {e}"))
});

/// Maps a typed command to the chip it stands for.
///
/// Case-insensitive and trimmed. `mix <n>` takes a 1-based position.
/// Returns `None` for anything unrecognized; reporting that to the user
/// is the caller's job.
pub fn command_to_action(raw: &str) -> Option<ActionChip> {
    let normalized = raw.trim().to_lowercase();

    let chip = match normalized.as_str() {
        "" => return None,
        "help" => ActionChip::goto("Help", SceneId::Help),
        "mixes" => ActionChip::goto("Mixes", SceneId::Mixes),
        "book" => ActionChip::goto("Book", SceneId::Booking),
        "links" => ActionChip::goto("Links", SceneId::Links),
        "about" => ActionChip::goto("About", SceneId::About),
        "play" | "latest" => ActionChip::goto("Latest", SceneId::Play),
        "open" => ActionChip::new("Open Current", Action::OpenCurrent),
        "back" => ActionChip::new("Back", Action::Back),
        "clear" => ActionChip::new("Clear", Action::Clear),
        other => {
            let caps = MIX_COMMAND.captures(other)?;
            let n: usize = caps[1].parse().ok()?;
            let index = n.checked_sub(1)?;
            ActionChip::new(format!("Mix {n}"), Action::MixSelect { index })
        }
    };

    Some(chip)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action(raw: &str) -> Option<Action> {
        command_to_action(raw).map(|chip| chip.action)
    }

    #[test]
    fn scene_commands() {
        assert_eq!(
            action("help"),
            Some(Action::Goto {
                scene: SceneId::Help
            })
        );
        assert_eq!(
            action("book"),
            Some(Action::Goto {
                scene: SceneId::Booking
            })
        );
        assert_eq!(action("latest"), action("play"));
        assert_eq!(
            action("play"),
            Some(Action::Goto {
                scene: SceneId::Play
            })
        );
    }

    #[test]
    fn commands_are_trimmed_and_case_insensitive() {
        assert_eq!(
            action("  Mixes \n"),
            Some(Action::Goto {
                scene: SceneId::Mixes
            })
        );
        assert_eq!(action("OPEN"), Some(Action::OpenCurrent));
        assert_eq!(action("Back"), Some(Action::Back));
        assert_eq!(action("clear"), Some(Action::Clear));
    }

    #[test]
    fn mix_command_is_one_based() {
        let chip = command_to_action("MIX 3").unwrap();
        assert_eq!(chip.action, Action::MixSelect { index: 2 });
        assert_eq!(chip.label, "Mix 3");

        assert_eq!(action("mix   1"), Some(Action::MixSelect { index: 0 }));
    }

    #[test]
    fn mix_command_rejects_bad_numbers() {
        assert_eq!(action("mix 0"), None);
        assert_eq!(action("mix -1"), None);
        assert_eq!(action("mix two"), None);
        assert_eq!(action("mix"), None);
        assert_eq!(action("mix 99999999999999999999999999"), None);
        assert_eq!(action("mix 2 now"), None);
    }

    #[test]
    fn unknown_commands() {
        assert_eq!(action(""), None);
        assert_eq!(action("   "), None);
        assert_eq!(action("dance"), None);
        assert_eq!(action("helpme"), None);
    }
}
