//! The console: one interactive dialogue session.
//!
//! Wraps the pure scene engine with everything it leaves out: the visible
//! transcript, the reveal animation, the chip row, the command input and
//! side effects. Time is passed in explicitly so the whole thing can be
//! driven without a clock.

use std::time::Instant;

use uuid::Uuid;

use crate::config::RevealConfig;
use crate::model::{Action, ActionChip, SceneOutput, SiteContent, TerminalState, Transition};
use crate::script::{command_to_action, initial_state, run_action, run_wire_action};

use super::effects::Effects;
use super::reveal::{Reveal, RevealQueue, THINKING_LINE};

pub const UNKNOWN_COMMAND: &str = "Unknown command. Type \"help\" for options.";
pub const CLIPBOARD_UNAVAILABLE: &str = "Clipboard unavailable in this terminal session.";

/// A dialogue session and its on-screen state.
pub struct Console {
    content: SiteContent,
    state: TerminalState,
    output: Vec<String>,
    thinking: bool,
    chips: Vec<ActionChip>,
    queue: RevealQueue,
    input: String,
    input_visible: bool,
    span: tracing::Span,
}

impl Console {
    /// Starts a session on the intro scene.
    pub fn new(content: SiteContent, timing: RevealConfig, now: Instant) -> Self {
        let session = Uuid::new_v4();
        let span = tracing::info_span!("console", %session);
        span.in_scope(|| tracing::info!(dj = %content.dj_name, "console session started"));

        let Transition { state, output } = initial_state(&content);
        let mut console = Self {
            content,
            state,
            output: Vec::new(),
            thinking: false,
            chips: output.actions,
            queue: RevealQueue::new(timing),
            input: String::new(),
            input_visible: false,
            span,
        };
        console
            .queue
            .schedule(output.lines, output.show_thinking, now);
        console.tick(now);
        console
    }

    pub fn content(&self) -> &SiteContent {
        &self.content
    }

    pub fn state(&self) -> &TerminalState {
        &self.state
    }

    /// The visible transcript, including the thinking placeholder when up.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.output
            .iter()
            .map(String::as_str)
            .chain(self.thinking.then_some(THINKING_LINE))
    }

    /// The current scene's chips, followed by the ever-present Clear chip.
    pub fn chips(&self) -> Vec<ActionChip> {
        let mut chips = self.chips.clone();
        chips.push(ActionChip::new("Clear", Action::Clear));
        chips
    }

    /// Runs a chip's action.
    pub fn run_chip(
        &mut self,
        action: Action,
        now: Instant,
        effects: &mut dyn Effects,
    ) -> SceneOutput {
        let transition = run_action(action, self.state.clone(), &self.content);
        self.apply(transition, now, effects)
    }

    /// Runs an action given in its loosely-typed wire form.
    pub fn run_wire(
        &mut self,
        raw: &serde_json::Value,
        now: Instant,
        effects: &mut dyn Effects,
    ) -> SceneOutput {
        let transition = run_wire_action(raw, self.state.clone(), &self.content);
        self.apply(transition, now, effects)
    }

    /// Runs a typed command, echoing it into the transcript.
    ///
    /// Returns `None` for blank input (ignored) and unrecognized commands
    /// (answered with a hint line).
    pub fn submit_command(
        &mut self,
        raw: &str,
        now: Instant,
        effects: &mut dyn Effects,
    ) -> Option<SceneOutput> {
        let command = raw.trim();
        if command.is_empty() {
            return None;
        }

        self.commit_pending();
        self.output.push(format!("> {command}"));

        match command_to_action(command) {
            Some(chip) => Some(self.run_chip(chip.action, now, effects)),
            None => {
                self.span
                    .in_scope(|| tracing::debug!(command, "unknown command"));
                self.output.push(UNKNOWN_COMMAND.to_string());
                None
            }
        }
    }

    /// Advances the reveal to `now`. Returns whether anything changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let due = self.queue.take_due(now);
        if due.is_empty() {
            return false;
        }
        for step in due {
            match step {
                Reveal::Thinking => self.thinking = true,
                Reveal::Line(line) => {
                    self.thinking = false;
                    self.output.push(line);
                }
            }
        }
        true
    }

    /// Reveals everything still pending at once.
    pub fn settle(&mut self) {
        self.commit_pending();
    }

    /// When the reveal next has something to show.
    pub fn next_reveal(&self) -> Option<Instant> {
        self.queue.next_due()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn input_visible(&self) -> bool {
        self.input_visible
    }

    pub fn toggle_input(&mut self) {
        self.input_visible = !self.input_visible;
    }

    pub fn hide_input(&mut self) {
        self.input_visible = false;
    }

    pub fn push_input(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn pop_input(&mut self) {
        self.input.pop();
    }

    /// Submits the input buffer and empties it.
    pub fn submit_input(&mut self, now: Instant, effects: &mut dyn Effects) -> Option<SceneOutput> {
        let raw = std::mem::take(&mut self.input);
        self.submit_command(&raw, now, effects)
    }

    fn commit_pending(&mut self) {
        let pending = self.queue.flush();
        self.output.extend(pending);
        self.thinking = false;
    }

    fn apply(
        &mut self,
        transition: Transition,
        now: Instant,
        effects: &mut dyn Effects,
    ) -> SceneOutput {
        let span = self.span.clone();
        let _guard = span.enter();
        let Transition { state, output } = transition;
        tracing::debug!(
            scene = %state.last_scene,
            lines = output.lines.len(),
            clear = output.clear_output,
            "transition"
        );

        if output.clear_output {
            self.queue.clear();
            self.output.clear();
            self.thinking = false;
        } else {
            self.commit_pending();
        }

        self.state = state;
        self.chips = output.actions.clone();
        self.queue
            .schedule(output.lines.clone(), output.show_thinking, now);

        if let Some(url) = &output.open_url
            && let Err(e) = effects.open_url(url)
        {
            tracing::warn!(url = %url, error = %e, "failed to open link");
        }

        if let Some(value) = &output.copy_value
            && let Err(e) = effects.copy_to_clipboard(value)
        {
            tracing::warn!(error = %e, "clipboard write failed");
            self.queue.push_after(CLIPBOARD_UNAVAILABLE.to_string(), now);
        }

        self.tick(now);
        output
    }
}
