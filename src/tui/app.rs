//! Application loop and screen routing.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::DefaultTerminal;

use crate::config::RevealConfig;
use crate::model::SiteContent;
use crate::shell::SystemEffects;

use super::screens::{BootScreen, ConsoleScreen};

/// Longest wait for input before the reveal is advanced again.
const FRAME: Duration = Duration::from_millis(40);

/// Which screen is currently displayed.
enum Screen {
    Boot(BootScreen),
    Console(ConsoleScreen),
}

/// Runs the TUI event loop until the user quits.
pub fn run(content: SiteContent, timing: RevealConfig) -> io::Result<()> {
    let mut terminal = ratatui::init();
    let result = event_loop(&mut terminal, content, timing);
    ratatui::restore();
    result
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    content: SiteContent,
    timing: RevealConfig,
) -> io::Result<()> {
    let mut effects = SystemEffects;
    let mut screen = Screen::Boot(BootScreen::new(content, &timing, Instant::now()));

    loop {
        let now = Instant::now();
        let handoff = match &mut screen {
            Screen::Boot(boot) => {
                boot.tick(now);
                boot.is_finished(now, &timing)
            }
            Screen::Console(console) => {
                console.tick(now);
                false
            }
        };
        if handoff {
            screen = match screen {
                Screen::Boot(boot) => Screen::Console(boot.into_console(timing, now)),
                console => console,
            };
        }

        terminal.draw(|frame| match &screen {
            Screen::Boot(s) => s.render(frame),
            Screen::Console(s) => s.render(frame),
        })?;

        let timeout = match &screen {
            Screen::Console(console) => console
                .next_reveal()
                .map_or(FRAME, |due| due.saturating_duration_since(now).min(FRAME)),
            Screen::Boot(_) => FRAME,
        };
        if !event::poll(timeout)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(());
        }

        let now = Instant::now();
        match &mut screen {
            Screen::Boot(boot) => boot.skip(),
            Screen::Console(console) if console.input_visible() => match key.code {
                KeyCode::Esc => console.console_mut().hide_input(),
                KeyCode::Enter => console.submit_input(now, &mut effects),
                KeyCode::Backspace => console.console_mut().pop_input(),
                KeyCode::Char(c) => console.console_mut().push_input(c),
                _ => {}
            },
            Screen::Console(console) => match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Char('/') => console.console_mut().toggle_input(),
                KeyCode::Left | KeyCode::Char('h') => console.select_prev(),
                KeyCode::Right | KeyCode::Char('l') => console.select_next(),
                KeyCode::Enter => console.run_selected(now, &mut effects),
                KeyCode::Char(c @ '1'..='9') => {
                    if let Some(n) = c.to_digit(10).and_then(|n| usize::try_from(n).ok()) {
                        console.run_chip(n - 1, now, &mut effects);
                    }
                }
                _ => {}
            },
        }
    }
}
