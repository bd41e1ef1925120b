//! Dialogue types: scenes, actions, state, and what a transition produces.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Interest tag inferred when the user picks a melodic techno mix.
pub const MELODIC_TECHNO: &str = "melodic techno";

/// A named screen of the terminal dialogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneId {
    Intro,
    Help,
    Play,
    Mixes,
    MixDetail,
    Booking,
    Links,
    About,
}

impl SceneId {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Intro => "intro",
            Self::Help => "help",
            Self::Play => "play",
            Self::Mixes => "mixes",
            Self::MixDetail => "mix_detail",
            Self::Booking => "booking",
            Self::Links => "links",
            Self::About => "about",
        }
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Something the user can do: one valid transition.
///
/// Serialized in the chip wire form, `{"actionId": "mix.select", "args": {"mixIndex": 2}}`.
/// Each variant carries only the arguments it needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "actionId", content = "args")]
pub enum Action {
    /// Move to a scene, remembering where we came from.
    #[serde(rename = "goto")]
    Goto { scene: SceneId },

    /// Select a mix by zero-based position and show its details.
    #[serde(rename = "mix.select")]
    MixSelect {
        #[serde(rename = "mixIndex")]
        index: usize,
    },

    /// Open the selected (or last opened) mix link.
    #[serde(rename = "open.current")]
    OpenCurrent,

    /// Return to the previous scene.
    #[serde(rename = "back")]
    Back,

    /// Redraw the current scene on an empty screen.
    #[serde(rename = "clear")]
    Clear,

    /// Copy the booking handle.
    #[serde(rename = "copy.booking")]
    CopyBooking,
}

/// A clickable shortcut for one action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionChip {
    pub label: String,
    pub action: Action,
}

impl ActionChip {
    pub fn new(label: impl Into<String>, action: Action) -> Self {
        Self {
            label: label.into(),
            action,
        }
    }

    pub fn goto(label: impl Into<String>, scene: SceneId) -> Self {
        Self::new(label, Action::Goto { scene })
    }
}

/// Dialogue state, owned by the console and replaced on every transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TerminalState {
    pub last_scene: SceneId,
    pub selected_mix_index: Option<usize>,
    pub last_opened: Option<String>,

    /// Inferred interest tags. Only ever grows within a session.
    pub user_interest: BTreeSet<String>,

    /// Previously visited scenes, most recent last.
    pub history: Vec<SceneId>,
}

impl Default for TerminalState {
    fn default() -> Self {
        Self {
            last_scene: SceneId::Intro,
            selected_mix_index: None,
            last_opened: None,
            user_interest: BTreeSet::new(),
            history: Vec::new(),
        }
    }
}

impl TerminalState {
    pub fn has_interest(&self, tag: &str) -> bool {
        self.user_interest.contains(tag)
    }
}

/// What the console should show and do after a transition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneOutput {
    pub lines: Vec<String>,
    pub actions: Vec<ActionChip>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copy_value: Option<String>,

    /// Discard previously visible lines before revealing these.
    #[serde(default)]
    pub clear_output: bool,

    /// Show a transient placeholder before the first line appears.
    #[serde(default)]
    pub show_thinking: bool,
}

/// The result of running an action: the next state and its output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub state: TerminalState,
    pub output: SceneOutput,
}
