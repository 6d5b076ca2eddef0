use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

use crate::ui::commands::{parse_slash_command, SlashCommand};

/// Result of feeding a key event to the composer.
#[derive(Debug, PartialEq, Eq)]
pub enum ComposerResult {
    /// The user committed the draft with Enter.
    Submitted(String),
    /// The draft was a slash command.
    Command(SlashCommand),
    None,
}

/// Input composer holding the uncommitted draft.
///
/// The cursor is tracked as a char index so multibyte input cannot split a
/// UTF-8 boundary.
pub struct ChatComposer {
    content: String,
    cursor: usize,
    placeholder: String,
    show_placeholder: bool,
    has_focus: bool,
}

impl ChatComposer {
    pub fn new(placeholder: String) -> Self {
        Self {
            content: String::new(),
            cursor: 0,
            placeholder,
            show_placeholder: true,
            has_focus: false,
        }
    }

    /// Handle key input. Enter commits the draft (clearing it), Shift+Enter
    /// inserts a newline, everything else edits in place.
    pub fn handle_key(&mut self, key: KeyEvent) -> ComposerResult {
        if key.kind != KeyEventKind::Press {
            return ComposerResult::None;
        }

        match key.code {
            KeyCode::Enter => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    self.insert_char('\n');
                } else if !self.content.trim().is_empty() {
                    let content = std::mem::take(&mut self.content);
                    self.cursor = 0;
                    if let Some(command) = parse_slash_command(content.trim()) {
                        return ComposerResult::Command(command);
                    }
                    return ComposerResult::Submitted(content);
                }
            }
            KeyCode::Char(c) => self.insert_char(c),
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    let byte = self.byte_offset(self.cursor);
                    self.content.remove(byte);
                }
            }
            KeyCode::Delete => {
                if self.cursor < self.char_count() {
                    let byte = self.byte_offset(self.cursor);
                    self.content.remove(byte);
                }
            }
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(self.char_count()),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.char_count(),
            _ => {}
        }

        ComposerResult::None
    }

    pub fn set_focus(&mut self, has_focus: bool) {
        self.has_focus = has_focus;
    }

    /// The placeholder is only shown before the conversation has started;
    /// the app mirrors the controller's expanded flag here.
    pub fn set_placeholder_visible(&mut self, visible: bool) {
        self.show_placeholder = visible;
    }

    #[allow(dead_code)]
    pub fn content(&self) -> &str {
        &self.content
    }

    fn insert_char(&mut self, c: char) {
        let byte = self.byte_offset(self.cursor);
        self.content.insert(byte, c);
        self.cursor += 1;
    }

    fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    fn byte_offset(&self, char_index: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_index)
            .map(|(byte, _)| byte)
            .unwrap_or(self.content.len())
    }
}

impl Widget for &ChatComposer {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("✉ Message")
            .style(if self.has_focus {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::Gray)
            });

        let inner_area = block.inner(area);
        block.render(area, buf);

        if self.content.is_empty() {
            if self.show_placeholder {
                let placeholder_line = Line::from(vec![Span::styled(
                    self.placeholder.as_str(),
                    Style::default().fg(Color::DarkGray),
                )]);
                buf.set_line(inner_area.x, inner_area.y, &placeholder_line, inner_area.width);
            } else if self.has_focus {
                let cursor_line = Line::from(vec![Span::raw("▌")]);
                buf.set_line(inner_area.x, inner_area.y, &cursor_line, inner_area.width);
            }
        } else {
            let mut content = self.content.clone();
            if self.has_focus {
                let byte = self.byte_offset(self.cursor);
                content.insert(byte, '▌');
            }

            for (i, line_text) in content.split('\n').enumerate() {
                if i < inner_area.height as usize {
                    let line = Line::from(vec![Span::raw(line_text)]);
                    buf.set_line(inner_area.x, inner_area.y + i as u16, &line, inner_area.width);
                }
            }
        }
    }
}
