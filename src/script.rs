//! The scripted terminal dialogue.
//!
//! A small scene graph: each scene maps to canned output and a set of
//! chips, and each action maps the current state to the next one. Every
//! function here is pure. Side effects such as opening a link or copying
//! the booking handle are declared in [`SceneOutput`](crate::model::SceneOutput)
//! and carried out by the console.

mod command;
#[cfg(test)]
pub(crate) mod fixtures;
mod scene;
mod transition;

pub use command::command_to_action;
pub use transition::{initial_state, run_action, run_wire_action};
