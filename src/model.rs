//! Core data model for the terminal.
//!
//! Two halves: the site content the terminal talks about (artist, mixes,
//! gigs, links) and the dialogue types the scene engine trades in
//! (scenes, actions, state, output).

mod content;
mod terminal;

pub use content::{DescriptionOption, Gig, Mix, SiteContent, SocialLinks};
pub use terminal::{
    Action, ActionChip, MELODIC_TECHNO, SceneId, SceneOutput, TerminalState, Transition,
};
