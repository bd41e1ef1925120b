//! Console screen: transcript, chip row and command input.

use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Padding, Paragraph};

use crate::shell::{Console, Effects, THINKING_LINE};

pub struct ConsoleScreen {
    console: Console,
    selected: usize,
}

impl ConsoleScreen {
    pub fn new(console: Console) -> Self {
        Self {
            console,
            selected: 0,
        }
    }

    pub fn console_mut(&mut self) -> &mut Console {
        &mut self.console
    }

    pub fn input_visible(&self) -> bool {
        self.console.input_visible()
    }

    pub fn tick(&mut self, now: Instant) -> bool {
        self.console.tick(now)
    }

    pub fn next_reveal(&self) -> Option<Instant> {
        self.console.next_reveal()
    }

    pub fn select_prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.console.chips().len() {
            self.selected += 1;
        }
    }

    pub fn run_selected(&mut self, now: Instant, effects: &mut dyn Effects) {
        self.run_chip(self.selected, now, effects);
    }

    /// Runs the chip at `index`, if there is one. The selection resets
    /// since the chip row changes with every scene.
    pub fn run_chip(&mut self, index: usize, now: Instant, effects: &mut dyn Effects) {
        let Some(chip) = self.console.chips().into_iter().nth(index) else {
            return;
        };
        self.console.run_chip(chip.action, now, effects);
        self.selected = 0;
    }

    pub fn submit_input(&mut self, now: Instant, effects: &mut dyn Effects) {
        if self.console.submit_input(now, effects).is_some() {
            self.selected = 0;
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let muted = Style::default().fg(Color::DarkGray);
        let normal = Style::default().fg(Color::Gray);
        let highlight = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);

        let chips = self.console.chips();
        let labels: Vec<String> = chips
            .iter()
            .enumerate()
            .map(|(i, chip)| {
                let pointer = if i == self.selected { "›" } else { " " };
                if i < 9 {
                    format!("{pointer}{} {}  ", i + 1, chip.label)
                } else {
                    format!("{pointer}{}  ", chip.label)
                }
            })
            .collect();
        let rows = chip_rows(&labels, usize::from(area.width.saturating_sub(2)));
        let chip_height = rows.len().clamp(1, usize::from(area.height / 3).max(1));

        let chunks = Layout::vertical([
            Constraint::Length(3), // header
            Constraint::Min(0),    // transcript
            Constraint::Length(u16::try_from(chip_height).unwrap_or(u16::MAX)),
            Constraint::Length(1), // input or help
        ])
        .split(area);

        // Header.
        let toggle = if self.console.input_visible() {
            "esc hide input"
        } else {
            "/ type command"
        };
        let header = Paragraph::new(Line::from(vec![
            Span::styled(format!("{}_TERMINAL", self.console.content().dj_name), highlight),
            Span::styled(format!("  {toggle}"), muted),
        ]))
        .block(Block::default().padding(Padding::new(2, 0, 1, 0)));
        frame.render_widget(header, chunks[0]);

        // Transcript, wrapped and pinned to the bottom.
        let padding = Block::default().padding(Padding::new(2, 2, 0, 0));
        let inner = padding.inner(chunks[1]);
        let mut wrapped = Vec::new();
        for line in self.console.lines() {
            let style = if line == THINKING_LINE {
                muted
            } else if line.starts_with("> ") {
                highlight
            } else {
                normal
            };
            for row in wrap_line(line, usize::from(inner.width)) {
                wrapped.push(Line::from(Span::styled(row, style)));
            }
        }
        let start = wrapped.len().saturating_sub(usize::from(inner.height));
        let lines = wrapped.split_off(start);
        frame.render_widget(Paragraph::new(lines).block(padding), chunks[1]);

        // Chip row, scrolled so the selected chip stays on screen.
        let selected_row = rows
            .iter()
            .position(|row| row.contains(&self.selected))
            .unwrap_or(0);
        let first_row = (selected_row + 1).saturating_sub(chip_height);
        let chip_lines: Vec<Line> = rows[first_row..]
            .iter()
            .take(chip_height)
            .map(|row| {
                let spans: Vec<Span> = row
                    .iter()
                    .map(|&i| {
                        let style = if i == self.selected { highlight } else { normal };
                        Span::styled(labels[i].as_str(), style)
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();
        let chip_row =
            Paragraph::new(chip_lines).block(Block::default().padding(Padding::new(1, 1, 0, 0)));
        frame.render_widget(chip_row, chunks[2]);

        // Input line / help line.
        if self.console.input_visible() {
            let prompt = Paragraph::new(Line::from(vec![
                Span::styled(" › ", highlight),
                Span::styled(self.console.input(), Style::default().fg(Color::White)),
                Span::styled("█", muted),
            ]));
            frame.render_widget(prompt, chunks[3]);
        } else {
            let help = Paragraph::new(Line::from(vec![Span::styled(
                " ←→ select  ⏎ run  1-9 run  / type  q quit",
                muted,
            )]));
            frame.render_widget(help, chunks[3]);
        }
    }
}

/// Splits a transcript line into rows of at most `width` characters,
/// breaking at spaces where possible.
fn wrap_line(line: &str, width: usize) -> Vec<String> {
    if width == 0 || line.chars().count() <= width {
        return vec![line.to_string()];
    }

    let mut rows = Vec::new();
    let mut row = String::new();
    let mut row_len = 0;
    for word in line.split(' ') {
        let mut word: Vec<char> = word.chars().collect();
        if row_len > 0 && row_len + 1 + word.len() > width {
            rows.push(std::mem::take(&mut row));
            row_len = 0;
        }
        if row_len > 0 {
            row.push(' ');
            row_len += 1;
        }
        // Words longer than a row are split.
        while row_len + word.len() > width {
            let rest = word.split_off(width - row_len);
            row.extend(word);
            rows.push(std::mem::take(&mut row));
            row_len = 0;
            word = rest;
        }
        row_len += word.len();
        row.extend(word);
    }
    rows.push(row);
    rows
}

/// Packs chip labels into rows no wider than `width`, as label indices.
/// A label wider than a row gets a row of its own.
fn chip_rows(labels: &[String], width: usize) -> Vec<Vec<usize>> {
    let mut rows: Vec<Vec<usize>> = Vec::new();
    let mut used = 0;
    for (i, label) in labels.iter().enumerate() {
        let len = label.chars().count();
        match rows.last_mut() {
            Some(row) if used + len <= width => {
                row.push(i);
                used += len;
            }
            _ => {
                rows.push(vec![i]);
                used = len;
            }
        }
    }
    rows
}
