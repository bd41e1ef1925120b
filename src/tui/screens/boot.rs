//! Boot screen: the content's boot log, one line at a time.

use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Padding, Paragraph};

use crate::config::RevealConfig;
use crate::model::SiteContent;
use crate::shell::{BootLog, Console};

use super::ConsoleScreen;

pub struct BootScreen {
    content: SiteContent,
    log: BootLog,
    skipped: bool,
}

impl BootScreen {
    pub fn new(content: SiteContent, timing: &RevealConfig, now: Instant) -> Self {
        let log = BootLog::new(content.boot_log_lines.clone(), timing.boot_interval(), now);
        Self {
            content,
            log,
            skipped: false,
        }
    }

    pub fn tick(&mut self, now: Instant) -> bool {
        self.log.tick(now)
    }

    /// Any key skips straight to the console.
    pub fn skip(&mut self) {
        self.log.skip();
        self.skipped = true;
    }

    /// Whether the console should take over: one interval after the last
    /// line, or right away when skipped.
    pub fn is_finished(&self, now: Instant, timing: &RevealConfig) -> bool {
        self.skipped
            || (self.log.is_done() && now >= self.log.finishes_at() + timing.boot_interval())
    }

    pub fn into_console(self, timing: RevealConfig, now: Instant) -> ConsoleScreen {
        ConsoleScreen::new(Console::new(self.content, timing, now))
    }

    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::vertical([
            Constraint::Length(3), // title
            Constraint::Min(0),    // log
            Constraint::Length(1), // help
        ])
        .split(area);

        let muted = Style::default().fg(Color::DarkGray);
        let normal = Style::default().fg(Color::Gray);
        let highlight = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);

        let title = Paragraph::new(Line::from(vec![Span::styled(
            self.content.dj_name.as_str(),
            highlight,
        )]))
        .block(Block::default().padding(Padding::new(2, 0, 1, 0)));
        frame.render_widget(title, chunks[0]);

        let visible = self.log.visible();
        let lines: Vec<Line> = visible
            .iter()
            .enumerate()
            .map(|(i, line)| {
                let style = if i + 1 == visible.len() {
                    highlight
                } else {
                    normal
                };
                Line::from(Span::styled(line.as_str(), style))
            })
            .collect();
        let log = Paragraph::new(lines).block(Block::default().padding(Padding::new(2, 2, 0, 0)));
        frame.render_widget(log, chunks[1]);

        let help = Paragraph::new(Line::from(vec![Span::styled(
            " any key to skip",
            muted,
        )]));
        frame.render_widget(help, chunks[2]);
    }
}
