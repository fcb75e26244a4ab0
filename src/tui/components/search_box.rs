//! # SearchBox Component
//!
//! Single-line text input for the name search.
//!
//! ## State Management
//!
//! The buffer and the cursor (a byte offset on a char boundary) are internal
//! state. `focused` is a prop set by the parent form.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// High-level events emitted by the SearchBox
#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent {
    /// Enter pressed
    Submit(String),
    ContentChanged,
}

pub struct SearchBox {
    pub buffer: String,
    /// Whether keystrokes currently go here (Prop)
    pub focused: bool,
    cursor: usize,
}

impl SearchBox {
    pub fn new(initial: &str) -> Self {
        Self {
            buffer: initial.to_string(),
            focused: false,
            cursor: initial.len(),
        }
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    /// Trimmed text, or `None` when blank.
    pub fn value(&self) -> Option<String> {
        let trimmed = self.buffer.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }

    fn prev_boundary(&self) -> usize {
        self.buffer[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(&self) -> usize {
        self.buffer[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
            .unwrap_or(self.buffer.len())
    }
}

impl Component for SearchBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border = if self.focused { Color::Cyan } else { Color::DarkGray };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border))
            .title(" Search by name ");

        let inner_width = area.width.saturating_sub(2) as usize;
        let before_cursor = self.buffer[..self.cursor].width();
        // Scroll horizontally so the cursor stays visible
        let scroll = before_cursor.saturating_sub(inner_width.saturating_sub(1));
        let input = Paragraph::new(self.buffer.as_str())
            .block(block)
            .scroll((0, scroll as u16))
            .style(Style::default().fg(Color::Green));
        frame.render_widget(input, area);

        if self.focused {
            let x = area.x + 1 + (before_cursor - scroll) as u16;
            frame.set_cursor_position((x, area.y + 1));
        }
    }
}

impl EventHandler for SearchBox {
    type Event = SearchEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                Some(SearchEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                // Single line: pasted newlines become spaces
                let text = text.replace(['\r', '\n'], " ");
                self.buffer.insert_str(self.cursor, &text);
                self.cursor += text.len();
                Some(SearchEvent::ContentChanged)
            }
            TuiEvent::Backspace if self.cursor > 0 => {
                let prev = self.prev_boundary();
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                Some(SearchEvent::ContentChanged)
            }
            TuiEvent::Delete if self.cursor < self.buffer.len() => {
                let next = self.next_boundary();
                self.buffer.drain(self.cursor..next);
                Some(SearchEvent::ContentChanged)
            }
            TuiEvent::CursorLeft => {
                self.cursor = self.prev_boundary();
                None
            }
            TuiEvent::CursorRight => {
                self.cursor = self.next_boundary();
                None
            }
            TuiEvent::Home => {
                self.cursor = 0;
                None
            }
            TuiEvent::End => {
                self.cursor = self.buffer.len();
                None
            }
            TuiEvent::Submit => Some(SearchEvent::Submit(self.buffer.clone())),
            _ => None,
        }
    }
}
