mod cli;
mod config;
mod content;
mod enrich;
mod image;
mod model;
mod script;
mod shell;
mod tui;

use std::fs::{self, OpenOptions};
use std::process;
use std::sync::Mutex;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use config::Config;

/// Env var holding the log filter, e.g. `SHORTCUT_LOG=shortcut=debug`.
const LOG_VAR: &str = "SHORTCUT_LOG";

fn main() {
    let cli = Cli::parse();
    init_logging(cli.is_interactive());

    let config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = cli::run(cli, &config) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Logs to stderr, or to `~/.shortcut/shortcut.log` while the TUI owns the screen.
fn init_logging(interactive: bool) {
    let filter = EnvFilter::try_from_env(LOG_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));

    if !interactive {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
        return;
    }

    let log_file = Config::home_dir().and_then(|home| {
        fs::create_dir_all(&home).ok()?;
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(home.join("shortcut.log"))
            .ok()
    });

    match log_file {
        Some(file) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init(),
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::sink)
            .init(),
    }
}
