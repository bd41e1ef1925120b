//! Timed line reveal: the console's "typing" animation.
//!
//! A transition's lines are scheduled at a fixed interval, optionally after
//! a transient thinking placeholder. Scheduling a new batch while an older
//! one is still pending is the caller's decision: [`RevealQueue::flush`]
//! hands back what is left so it can be committed before the next batch.

use std::collections::VecDeque;
use std::time::Instant;

use crate::config::RevealConfig;

/// Placeholder shown while the console "thinks".
pub const THINKING_LINE: &str = "...thinking";

/// One step of a reveal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reveal {
    /// Show the thinking placeholder.
    Thinking,

    /// Show a line, replacing the placeholder if it is up.
    Line(String),
}

#[derive(Debug)]
struct Pending {
    due: Instant,
    step: Reveal,
}

/// Pending reveal steps in due order.
#[derive(Debug)]
pub struct RevealQueue {
    timing: RevealConfig,
    pending: VecDeque<Pending>,
}

impl RevealQueue {
    pub fn new(timing: RevealConfig) -> Self {
        Self {
            timing,
            pending: VecDeque::new(),
        }
    }

    /// Schedules a batch of lines starting at `now`.
    pub fn schedule(&mut self, lines: Vec<String>, show_thinking: bool, now: Instant) {
        let mut due = now;
        if show_thinking {
            self.pending.push_back(Pending {
                due,
                step: Reveal::Thinking,
            });
            due += self.timing.thinking_delay();
        }
        for line in lines {
            self.pending.push_back(Pending {
                due,
                step: Reveal::Line(line),
            });
            due += self.timing.line_delay();
        }
    }

    /// Schedules one more line after everything already pending.
    pub fn push_after(&mut self, line: String, now: Instant) {
        let due = self
            .pending
            .back()
            .map_or(now, |last| last.due + self.timing.line_delay());
        self.pending.push_back(Pending {
            due,
            step: Reveal::Line(line),
        });
    }

    /// Removes and returns every step due at `now`.
    pub fn take_due(&mut self, now: Instant) -> Vec<Reveal> {
        let mut due = Vec::new();
        while self.pending.front().is_some_and(|p| p.due <= now) {
            if let Some(p) = self.pending.pop_front() {
                due.push(p.step);
            }
        }
        due
    }

    /// Removes and returns every pending line, skipping placeholders.
    pub fn flush(&mut self) -> Vec<String> {
        self.pending
            .drain(..)
            .filter_map(|p| match p.step {
                Reveal::Line(line) => Some(line),
                Reveal::Thinking => None,
            })
            .collect()
    }

    /// Drops everything pending.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    /// When the next step is due, if any.
    pub fn next_due(&self) -> Option<Instant> {
        self.pending.front().map(|p| p.due)
    }
}
