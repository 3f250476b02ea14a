//! Query input component
//!
//! Single-line text box bound to `QueryState::input`. The component owns the
//! cursor; the text itself lives in the query state and is edited through
//! the helpers below.

use crate::action::Action;
use crate::component::Component;
use crate::components::presenter::{InputView, INPUT_PLACEHOLDER};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Text input with a cursor
#[derive(Default)]
pub struct QueryInputComponent {
    /// Cursor position in chars
    cursor: usize,
    view: InputView,
}

/// Byte offset of the `char_index`-th char (or the end of the string)
fn byte_offset(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

impl QueryInputComponent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replace the view drawn on the next frame
    pub fn set_view(&mut self, view: InputView) {
        self.clamp_cursor(&view.text);
        self.view = view;
    }

    /// Keep the cursor inside `text` (the input is emptied after a success)
    pub fn clamp_cursor(&mut self, text: &str) {
        self.cursor = self.cursor.min(text.chars().count());
    }

    pub fn insert_char(&mut self, text: &mut String, c: char) {
        self.clamp_cursor(text);
        text.insert(byte_offset(text, self.cursor), c);
        self.cursor += 1;
    }

    /// Insert pasted text; line breaks become spaces
    pub fn insert_str(&mut self, text: &mut String, pasted: &str) {
        self.clamp_cursor(text);
        let cleaned: String = pasted
            .chars()
            .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
            .collect();
        text.insert_str(byte_offset(text, self.cursor), &cleaned);
        self.cursor += cleaned.chars().count();
    }

    pub fn backspace(&mut self, text: &mut String) {
        self.clamp_cursor(text);
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        text.remove(byte_offset(text, self.cursor));
    }

    pub fn delete(&mut self, text: &mut String) {
        self.clamp_cursor(text);
        if self.cursor < text.chars().count() {
            text.remove(byte_offset(text, self.cursor));
        }
    }

    pub fn clear(&mut self, text: &mut String) {
        text.clear();
        self.cursor = 0;
    }
}

impl Component for QueryInputComponent {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        let len = self.view.text.chars().count();
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        let action = match key.code {
            KeyCode::Enter if self.view.submit_enabled => Some(Action::SubmitQuery),
            KeyCode::Enter => None,
            KeyCode::Char('u') if ctrl => Some(Action::ClearInput),
            KeyCode::Char(_) if ctrl => None,
            KeyCode::Char(c) => Some(Action::InputChar(c)),
            KeyCode::Backspace => Some(Action::InputBackspace),
            KeyCode::Delete => Some(Action::InputDelete),
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                None
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(len);
                None
            }
            KeyCode::Home => {
                self.cursor = 0;
                None
            }
            KeyCode::End => {
                self.cursor = len;
                None
            }
            _ => None,
        };
        Ok(action)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        let border_color = if self.view.submit_enabled {
            Color::Magenta
        } else {
            Color::DarkGray
        };
        let hint_style = if self.view.submit_enabled {
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(" Ask ")
            .title_style(Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD))
            .title_bottom(Line::from(Span::styled(" Enter Submit ", hint_style)).right_aligned());

        let inner = block.inner(area);

        let content = if self.view.text.is_empty() {
            Line::from(Span::styled(
                INPUT_PLACEHOLDER,
                Style::default().fg(Color::DarkGray),
            ))
        } else {
            Line::from(self.view.text.clone())
        };

        // Scroll horizontally so the cursor stays visible
        let before_cursor: String = self.view.text.chars().take(self.cursor).collect();
        let cursor_x = u16::try_from(before_cursor.width()).unwrap_or(u16::MAX);
        let offset = cursor_x.saturating_sub(inner.width.saturating_sub(1));

        let paragraph = Paragraph::new(content).block(block).scroll((0, offset));
        frame.render_widget(paragraph, area);

        if inner.width > 0 && inner.height > 0 {
            frame.set_cursor_position(Position::new(inner.x.saturating_add(cursor_x - offset), inner.y));
        }

        Ok(())
    }
}
