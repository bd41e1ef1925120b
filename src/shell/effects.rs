//! Side effects the console performs on behalf of the scene engine.
//!
//! Opening links and writing to the clipboard are delegated to the
//! platform's own tools. Both are fire-and-forget: a failure is reported
//! back to the console, which decides how to surface it.

use std::io::{self, Write};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};

/// The console's window onto the outside world.
pub trait Effects {
    /// Opens a link in the user's browser.
    fn open_url(&mut self, url: &str) -> io::Result<()>;

    /// Puts text on the system clipboard.
    fn copy_to_clipboard(&mut self, text: &str) -> io::Result<()>;
}

/// Effects backed by the platform's opener and clipboard tools.
pub struct SystemEffects;

impl Effects for SystemEffects {
    fn open_url(&mut self, url: &str) -> io::Result<()> {
        let (program, args): (&str, &[&str]) = if cfg!(target_os = "macos") {
            ("open", &[])
        } else if cfg!(windows) {
            ("cmd", &["/C", "start", ""])
        } else {
            ("xdg-open", &[])
        };

        let child = Command::new(program)
            .args(args)
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;
        reap(child);
        Ok(())
    }

    fn copy_to_clipboard(&mut self, text: &str) -> io::Result<()> {
        let candidates: &[(&str, &[&str])] = if cfg!(target_os = "macos") {
            &[("pbcopy", &[])]
        } else if cfg!(windows) {
            &[("clip", &[])]
        } else {
            &[
                ("wl-copy", &[]),
                ("xclip", &["-selection", "clipboard"]),
                ("xsel", &["--clipboard", "--input"]),
            ]
        };

        let mut last_error = io::Error::new(io::ErrorKind::NotFound, "no clipboard tool found");
        for (program, args) in candidates {
            match pipe_to(program, args, text) {
                Ok(()) => return Ok(()),
                Err(e) => {
                    tracing::debug!(program, error = %e, "clipboard tool failed");
                    last_error = e;
                }
            }
        }
        Err(last_error)
    }
}

/// Runs a program with `text` on stdin and waits for it to succeed.
fn pipe_to(program: &str, args: &[&str], text: &str) -> io::Result<()> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    if let Some(mut stdin) = child.stdin.take()
        && let Err(e) = stdin.write_all(text.as_bytes())
    {
        drop(stdin);
        let _ = child.wait();
        return Err(e);
    }

    let status = child.wait()?;
    if status.success() {
        Ok(())
    } else {
        Err(io::Error::other(format!("{program} exited with {status}")))
    }
}

/// Waits for `child` on a background thread so it does not linger as a zombie.
fn reap(mut child: Child) -> JoinHandle<io::Result<ExitStatus>> {
    thread::spawn(move || {
        let status = child.wait();
        if let Err(e) = &status {
            tracing::debug!(error = %e, "opener could not be reaped");
        }
        status
    })
}

/// Effects that only record what would have happened.
///
/// Used for non-interactive runs, where opening a browser would be a surprise.
#[derive(Debug, Default)]
pub struct DryRun {
    pub opened: Vec<String>,
    pub copied: Vec<String>,
}

impl Effects for DryRun {
    fn open_url(&mut self, url: &str) -> io::Result<()> {
        self.opened.push(url.to_string());
        Ok(())
    }

    fn copy_to_clipboard(&mut self, text: &str) -> io::Result<()> {
        self.copied.push(text.to_string());
        Ok(())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn spawned_opener_is_waited_on() {
        let child = Command::new("true").spawn().unwrap();

        let status = reap(child).join().unwrap().unwrap();
        assert!(status.success());
    }

    #[test]
    fn clipboard_tool_failure_is_reported() {
        assert!(pipe_to("false", &[], "@shortcutlife").is_err());
    }

    #[test]
    fn clipboard_tool_that_ignores_stdin_is_still_reaped() {
        // Larger than a pipe buffer, so the write fails once `true` exits.
        let text = "x".repeat(1 << 20);
        assert!(pipe_to("true", &[], &text).is_err());
    }
}
