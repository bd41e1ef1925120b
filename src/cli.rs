//! CLI interface for Shortcut.
//!
//! With no subcommand, starts the interactive terminal. Every other
//! subcommand is non-interactive: arguments in, text or JSON out.
//!
//! The content file comes from `--content`, then the config file, then
//! `content/content.json`. `--strict` refuses invalid content instead of
//! falling back field by field.

mod format;

use std::path::{Path, PathBuf};
use std::thread;
use std::time::Instant;

use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::config::{API_KEY_VAR, Config, EnrichConfig};
use crate::content;
use crate::enrich::{Enricher, MetadataCache, YouTube};
use crate::image::resolve_image_url;
use crate::model::{Mix, SceneId, SceneOutput, SiteContent};
use crate::shell::{BootLog, Console, DryRun};

use format::{format_mixes, format_page};

/// Shortcut — a scripted terminal guide to an artist's profile.
#[derive(Debug, Parser)]
#[command(name = "shortcut", version, after_long_help = EXAMPLES_HELP)]
pub struct Cli {
    /// Content file to load.
    #[arg(long, global = true)]
    content: Option<PathBuf>,

    /// Fail on invalid content instead of falling back to defaults.
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

const EXAMPLES_HELP: &str = r#"Examples:
  shortcut                                  # interactive terminal
  shortcut run mixes "mix 1" open           # scripted session transcript
  shortcut run '{"actionId":"mix.select","args":{"mixIndex":0}}' --json
  shortcut content check --strict
  shortcut mixes --enrich"#;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactive terminal: boot log, then the console.
    Tui,

    /// Feed inputs through a console session and print the transcript.
    ///
    /// Each input is a typed command (`help`, `mix 2`, ...) or, when it is a
    /// JSON object, a chip action in wire form. Links and clipboard writes are
    /// reported instead of performed.
    Run {
        /// Commands or wire actions, in order.
        inputs: Vec<String>,

        /// Print each input's scene output as JSON instead of the transcript.
        #[arg(long)]
        json: bool,
    },

    /// Inspect the content file.
    Content {
        #[command(subcommand)]
        command: ContentCommand,
    },

    /// Text rendering of the landing page sections.
    Page,

    /// List mixes.
    Mixes {
        /// Resolve titles and descriptions through each mix's description option.
        #[arg(long)]
        enrich: bool,

        /// Allow video data API lookups. Needs `YOUTUBE_API_KEY`. Implies `--enrich`.
        #[arg(long)]
        youtube_data_api: bool,
    },

    /// Print the resolved URL for an image value.
    Image {
        /// The configured value. Omit to see the fallback.
        value: Option<String>,
    },

    /// Print the boot log.
    Boot {
        /// Print every line at once instead of at the reveal interval.
        #[arg(long)]
        instant: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum ContentCommand {
    /// Validate the content file.
    Check,

    /// Print the resolved content as JSON.
    Show,
}

impl Cli {
    /// Whether this invocation takes over the terminal.
    pub fn is_interactive(&self) -> bool {
        matches!(self.command, None | Some(Command::Tui))
    }
}

/// Run the CLI, returning an error message on failure.
pub fn run(cli: Cli, config: &Config) -> Result<(), String> {
    let strict = cli.strict || config.strict_content;
    let path = config.content_path(cli.content.as_deref());

    match cli.command.unwrap_or(Command::Tui) {
        Command::Tui => {
            let content = load_content(&path, strict)?;
            crate::tui::run(content, config.reveal).map_err(|e| format!("terminal error: {e}"))
        }
        Command::Run { inputs, json } => {
            let content = load_content(&path, strict)?;
            cmd_run(content, config, &inputs, json)
        }
        Command::Content { command } => match command {
            ContentCommand::Check => cmd_check(&path, strict),
            ContentCommand::Show => {
                let content = load_content(&path, strict)?;
                print_json(&content)
            }
        },
        Command::Page => {
            let content = load_content(&path, strict)?;
            print!("{}", format_page(&content));
            Ok(())
        }
        Command::Mixes {
            enrich,
            youtube_data_api,
        } => {
            let content = load_content(&path, strict)?;
            let mut settings = config.enrich.clone().with_env();
            if youtube_data_api {
                settings.youtube_data_api = true;
            }
            let mixes = if enrich || youtube_data_api {
                enrich_mixes(&content.sets, settings)?
            } else {
                content.sets
            };
            print!("{}", format_mixes(&mixes));
            Ok(())
        }
        Command::Image { value } => {
            println!("{}", resolve_image_url(value.as_deref()));
            Ok(())
        }
        Command::Boot { instant } => {
            let content = load_content(&path, strict)?;
            cmd_boot(content.boot_log_lines, config, instant);
            Ok(())
        }
    }
}

fn load_content(path: &Path, strict: bool) -> Result<SiteContent, String> {
    if strict {
        content::strict::load(path).map_err(|e| e.to_string())
    } else {
        Ok(content::load(path))
    }
}

/// One step of a scripted session, as printed by `run --json`.
#[derive(Serialize)]
struct RunStep<'a> {
    input: &'a str,
    scene: SceneId,
    output: Option<SceneOutput>,
}

fn cmd_run(
    content: SiteContent,
    config: &Config,
    inputs: &[String],
    json: bool,
) -> Result<(), String> {
    let now = Instant::now();
    let mut console = Console::new(content, config.reveal, now);
    let mut effects = DryRun::default();
    let mut steps = Vec::with_capacity(inputs.len());

    for input in inputs {
        let output = match wire_action(input)? {
            Some(raw) => Some(console.run_wire(&raw, now, &mut effects)),
            None => console.submit_command(input, now, &mut effects),
        };
        steps.push(RunStep {
            input,
            scene: console.state().last_scene,
            output,
        });
    }
    console.settle();

    if json {
        return print_json(&steps);
    }

    for line in console.lines() {
        println!("{line}");
    }
    for url in &effects.opened {
        println!("[open] {url}");
    }
    for value in &effects.copied {
        println!("[copy] {value}");
    }
    Ok(())
}

/// Decodes an input as a wire action when it looks like a JSON object.
fn wire_action(input: &str) -> Result<Option<serde_json::Value>, String> {
    if !input.trim_start().starts_with('{') {
        return Ok(None);
    }
    serde_json::from_str(input)
        .map(Some)
        .map_err(|e| format!("invalid action JSON {input:?}: {e}"))
}

fn cmd_check(path: &Path, strict: bool) -> Result<(), String> {
    match content::strict::load(path) {
        Ok(content) => {
            println!(
                "{}: ok ({} mixes, {} gigs)",
                path.display(),
                content.sets.len(),
                content.gigs.len()
            );
            Ok(())
        }
        Err(e) if strict => Err(e.to_string()),
        Err(e) => {
            println!("{}: {e}", path.display());
            println!("Invalid fields fall back to defaults. Use --strict to fail instead.");
            Ok(())
        }
    }
}

fn enrich_mixes(mixes: &[Mix], settings: EnrichConfig) -> Result<Vec<Mix>, String> {
    if settings.youtube_data_api && settings.data_api_key().is_none() {
        eprintln!("Data API enabled but {API_KEY_VAR} is not set; using stored descriptions.");
    }

    let source = YouTube::new().map_err(|e| format!("failed to build HTTP client: {e}"))?;
    let cache = MetadataCache::default_root().and_then(|root| {
        MetadataCache::new(root, settings.cache_ttl())
            .inspect_err(|e| tracing::warn!(error = %e, "metadata cache unavailable"))
            .ok()
    });

    Ok(Enricher::new(source, cache, settings).enrich_all(mixes))
}

fn cmd_boot(lines: Vec<String>, config: &Config, instant: bool) {
    let interval = config.reveal.boot_interval();
    let mut log = BootLog::new(lines, interval, Instant::now());
    if instant {
        log.skip();
    }

    let mut printed = 0;
    loop {
        log.tick(Instant::now());
        for line in &log.visible()[printed..] {
            println!("{line}");
        }
        printed = log.visible().len();
        if log.is_done() {
            return;
        }
        thread::sleep(interval);
    }
}

fn print_json(value: &impl Serialize) -> Result<(), String> {
    let json =
        serde_json::to_string_pretty(value).map_err(|e| format!("failed to serialize: {e}"))?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_invocation_as_interactive() {
        let cli = Cli::try_parse_from(["shortcut"]).unwrap();
        assert!(cli.is_interactive());

        let cli = Cli::try_parse_from(["shortcut", "--content", "site.json", "tui"]).unwrap();
        assert!(cli.is_interactive());
        assert_eq!(cli.content.as_deref(), Some(Path::new("site.json")));
    }

    #[test]
    fn global_flags_follow_subcommands() {
        let cli = Cli::try_parse_from(["shortcut", "content", "check", "--strict"]).unwrap();

        assert!(cli.strict);
        assert!(!cli.is_interactive());
        assert!(matches!(
            cli.command,
            Some(Command::Content {
                command: ContentCommand::Check
            })
        ));
    }

    #[test]
    fn run_keeps_inputs_in_order() {
        let cli = Cli::try_parse_from(["shortcut", "run", "mixes", "mix 2", "open", "--json"])
            .unwrap();

        let Some(Command::Run { inputs, json }) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(inputs, ["mixes", "mix 2", "open"]);
        assert!(json);
    }

    #[test]
    fn wire_action_detection() {
        assert_eq!(wire_action("mix 1").unwrap(), None);

        let raw = wire_action(r#" {"actionId":"back"}"#).unwrap().unwrap();
        assert_eq!(raw["actionId"], "back");

        let err = wire_action("{oops").unwrap_err();
        assert!(err.starts_with("invalid action JSON"));
    }
}
