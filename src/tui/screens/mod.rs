//! Screen rendering and input handling.

mod boot;
mod console;

pub use boot::BootScreen;
pub use console::ConsoleScreen;
