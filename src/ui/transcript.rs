//! Transcript panel: renders the turn history and the reveal-in-progress
//! cursor.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

use crate::events::{Phase, Role, Turn};

/// Borrowing view over the controller's transcript, rebuilt each frame.
pub struct TranscriptView<'a> {
    turns: &'a [Turn],
    phase: Phase,
    expanded: bool,
}

impl<'a> TranscriptView<'a> {
    pub fn new(turns: &'a [Turn], phase: Phase, expanded: bool) -> Self {
        Self {
            turns,
            phase,
            expanded,
        }
    }

    fn render_turn(&self, turn: &Turn, width: u16) -> Vec<Line<'static>> {
        let mut lines = Vec::new();

        let role_icon = match turn.role {
            Role::User => "👤",
            Role::Bot => "🤖",
        };
        let timestamp = turn.timestamp.format("%H:%M:%S").to_string();
        let header = format!("{} {} {}", role_icon, timestamp, "─".repeat(20));
        lines.push(Line::from(vec![Span::styled(
            header,
            Style::default().fg(Color::DarkGray),
        )]));

        let style = match turn.role {
            Role::User => Style::default().fg(Color::Blue),
            Role::Bot => Style::default().fg(Color::Green),
        };
        for content_line in wrap_text(&turn.text, width.saturating_sub(2) as usize) {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(content_line, style),
            ]));
        }

        lines
    }
}

impl Widget for TranscriptView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("💬 Scheme Advisor");

        let inner_area = block.inner(area);
        block.render(area, buf);

        if !self.expanded {
            let welcome_lines = vec![
                Line::from(vec![Span::styled(
                    "Navigate the world of schemes",
                    Style::default().fg(Color::Green),
                )]),
                Line::from(vec![Span::raw("")]),
                Line::from(vec![Span::styled(
                    "Discover and select from a variety of schemes tailored for you.",
                    Style::default().fg(Color::Gray),
                )]),
                Line::from(vec![Span::raw("")]),
                Line::from(vec![Span::styled(
                    "Press Enter to send · /help for commands · Esc to quit",
                    Style::default().fg(Color::DarkGray),
                )]),
            ];

            for (i, line) in welcome_lines.iter().enumerate() {
                if i < inner_area.height as usize {
                    buf.set_line(inner_area.x, inner_area.y + i as u16, line, inner_area.width);
                }
            }
            return;
        }

        let mut all_lines: Vec<Line> = Vec::new();
        for turn in self.turns {
            all_lines.append(&mut self.render_turn(turn, inner_area.width));
            all_lines.push(Line::from(vec![Span::raw("")]));
        }

        match self.phase {
            Phase::Waiting => {
                let dots = thinking_dots();
                all_lines.push(Line::from(vec![
                    Span::styled("🤖 thinking", Style::default().fg(Color::Green)),
                    Span::styled(dots, Style::default().fg(Color::Yellow)),
                ]));
            }
            Phase::Revealing => {
                // Typing cursor on the line after the partially revealed turn.
                if let Some(last) = all_lines.iter_mut().rev().find(|l| l.width() > 0) {
                    last.spans
                        .push(Span::styled("▋", Style::default().fg(Color::Yellow)));
                }
            }
            _ => {}
        }

        // Keep the newest lines visible, anchored to the bottom.
        let height = inner_area.height as usize;
        let total = all_lines.len();
        let start = total.saturating_sub(height);
        for (i, line) in all_lines[start..].iter().enumerate() {
            buf.set_line(inner_area.x, inner_area.y + i as u16, line, inner_area.width);
        }
    }
}

fn thinking_dots() -> &'static str {
    let step = (std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
        / 300)
        % 4;
    match step {
        0 => ".",
        1 => "..",
        2 => "...",
        _ => "   ",
    }
}

/// Word-wrap to the given width, preserving explicit newlines.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current_line = String::new();
        for word in paragraph.split_whitespace() {
            if current_line.len() + word.len() + 1 <= width {
                if !current_line.is_empty() {
                    current_line.push(' ');
                }
                current_line.push_str(word);
            } else {
                if !current_line.is_empty() {
                    lines.push(current_line);
                    current_line = String::new();
                }
                current_line.push_str(word);
            }
        }
        lines.push(current_line);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}
