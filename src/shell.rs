//! The presentation shell around the scene engine.
//!
//! Owns everything with timing or side effects: the boot log, the line
//! reveal, the visible transcript and the effects the scenes ask for.

mod boot;
mod console;
mod effects;
mod reveal;

pub use boot::BootLog;
pub use console::Console;
pub use effects::{DryRun, Effects, SystemEffects};
pub use reveal::THINKING_LINE;
