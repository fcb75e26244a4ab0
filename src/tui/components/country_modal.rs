//! # Country Modal Component
//!
//! Details overlay for the selected row, with four tabs of fields.
//! Opened with Enter on a list, dismissed with Esc.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `CountryModalState` lives in `TuiState` while open
//! - `CountryModal` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Tabs, Wrap};

use crate::api::Country;
use crate::core::format::{DetailTab, details};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::centered_rect;
use crate::tui::event::TuiEvent;

/// Events emitted by the modal.
#[derive(Debug, Clone, PartialEq)]
pub enum ModalEvent {
    ToggleFavorite(String),
    OpenPage(String),
    Dismiss,
}

/// Persistent state for the details overlay.
pub struct CountryModalState {
    pub country: Country,
    pub tab: DetailTab,
}

impl CountryModalState {
    pub fn new(country: Country) -> Self {
        Self {
            country,
            tab: DetailTab::General,
        }
    }

    fn step_tab(&mut self, delta: isize) {
        let len = DetailTab::ALL.len() as isize;
        let idx = DetailTab::ALL.iter().position(|t| *t == self.tab).unwrap_or(0) as isize;
        self.tab = DetailTab::ALL[(idx + delta).rem_euclid(len) as usize];
    }
}

impl EventHandler for CountryModalState {
    type Event = ModalEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<ModalEvent> {
        match event {
            TuiEvent::Escape | TuiEvent::InputChar('q') => Some(ModalEvent::Dismiss),
            TuiEvent::CursorRight | TuiEvent::NextTab => {
                self.step_tab(1);
                None
            }
            TuiEvent::CursorLeft | TuiEvent::PrevTab => {
                self.step_tab(-1);
                None
            }
            TuiEvent::InputChar(c @ '1'..='4') => {
                let idx = (*c as u8 - b'1') as usize;
                self.tab = DetailTab::ALL[idx];
                None
            }
            TuiEvent::InputChar('f') => Some(ModalEvent::ToggleFavorite(self.country.cca3.clone())),
            TuiEvent::InputChar('p') | TuiEvent::Submit => {
                Some(ModalEvent::OpenPage(self.country.cca3.clone()))
            }
            _ => None,
        }
    }
}

/// Label/value rows as aligned lines.
pub fn detail_lines(rows: Vec<(&'static str, String)>) -> Vec<Line<'static>> {
    let label_width = rows.iter().map(|(l, _)| l.len()).max().unwrap_or(0);
    rows.into_iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(
                    format!("{label:<label_width$}  "),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(value),
            ])
        })
        .collect()
}

/// Transient render wrapper for the details overlay.
pub struct CountryModal<'a> {
    state: &'a CountryModalState,
    is_favorite: bool,
}

impl<'a> CountryModal<'a> {
    pub fn new(state: &'a CountryModalState, is_favorite: bool) -> Self {
        Self { state, is_favorite }
    }
}

impl Component for CountryModal<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(80, 80, area);
        frame.render_widget(Clear, overlay);

        let country = &self.state.country;
        let star = if self.is_favorite { " ★" } else { "" };
        let help_text = if self.is_favorite {
            " ←/→ Tab  f Unfavorite  p Page  Esc Back "
        } else {
            " ←/→ Tab  f Favorite  p Page  Esc Back "
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" {}{star} ", country.name.common))
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(help_text).centered())
            .padding(Padding::horizontal(1));
        let inner = block.inner(overlay);
        frame.render_widget(block, overlay);

        let [tabs_area, _, body_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(inner);

        let selected = DetailTab::ALL
            .iter()
            .position(|t| *t == self.state.tab)
            .unwrap_or(0);
        let tabs = Tabs::new(DetailTab::ALL.iter().map(|t| t.title()))
            .select(selected)
            .style(Style::default().fg(Color::Gray))
            .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
        frame.render_widget(tabs, tabs_area);

        let body = Paragraph::new(detail_lines(details(country, self.state.tab)))
            .wrap(Wrap { trim: false });
        frame.render_widget(body, body_area);
    }
}
