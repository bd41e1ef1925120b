//! Interactive terminal: the boot log, then the console.

mod app;
mod screens;

pub use app::run;
