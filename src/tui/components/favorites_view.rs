//! # Favorites View Component
//!
//! The favorites tab: resolved favorite countries in insertion order.
//! `c` asks to clear the whole list and needs a second `c` to confirm, the
//! same way a destructive delete does elsewhere.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `FavoritesViewState` lives in `TuiState`
//! - `FavoritesView` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, List, ListItem, Padding, Paragraph};

use crate::api::Country;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::country_list::{CountryListState, ListEvent, country_row};
use crate::tui::event::TuiEvent;

/// Events emitted by the favorites view.
#[derive(Debug, Clone, PartialEq)]
pub enum FavoritesEvent {
    Open(String),
    OpenPage(String),
    Remove(String),
    Clear,
}

#[derive(Default)]
pub struct FavoritesViewState {
    pub list: CountryListState,
    pub confirm_clear: bool,
}

impl FavoritesViewState {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EventHandler for FavoritesViewState {
    type Event = FavoritesEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<FavoritesEvent> {
        // Reset clear confirmation on any other key
        if !matches!(event, TuiEvent::InputChar('c')) {
            self.confirm_clear = false;
        }
        if let TuiEvent::InputChar('c') = event {
            if self.list.selected_code().is_none() {
                return None;
            }
            if self.confirm_clear {
                self.confirm_clear = false;
                return Some(FavoritesEvent::Clear);
            }
            self.confirm_clear = true;
            return None;
        }
        match self.list.handle_event(event)? {
            ListEvent::Open(code) => Some(FavoritesEvent::Open(code)),
            ListEvent::OpenPage(code) => Some(FavoritesEvent::OpenPage(code)),
            ListEvent::ToggleFavorite(code) => Some(FavoritesEvent::Remove(code)),
        }
    }
}

/// Transient render wrapper for the favorites tab.
pub struct FavoritesView<'a> {
    state: &'a mut FavoritesViewState,
    countries: &'a [Country],
    loading: bool,
}

impl<'a> FavoritesView<'a> {
    pub fn new(state: &'a mut FavoritesViewState, countries: &'a [Country], loading: bool) -> Self {
        Self {
            state,
            countries,
            loading,
        }
    }
}

impl Component for FavoritesView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.list.sync(self.countries);

        let help_text = if self.state.confirm_clear {
            " Press c again to clear all favorites | any other key cancels "
        } else {
            " Enter Details  p Page  f Remove  c Clear all "
        };
        let border = if self.state.confirm_clear { Color::Red } else { Color::DarkGray };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(format!(" Favorites ({}) ", self.countries.len()))
            .title_bottom(Line::from(help_text).centered())
            .padding(Padding::horizontal(1));

        if self.loading || self.countries.is_empty() {
            let message = if self.loading {
                "Loading favorites..."
            } else {
                "No favorites yet. Press f on a country to add it."
            };
            let empty = Paragraph::new(message)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let inner_width = area.width.saturating_sub(4) as usize;
        let items: Vec<ListItem> = self
            .countries
            .iter()
            .map(|c| ListItem::new(country_row(c, true, inner_width)))
            .collect();
        let list = List::new(items).block(block).highlight_style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        );
        frame.render_stateful_widget(list, area, &mut self.state.list.list_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_countries;
    use crate::tui::components::buffer_text;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn synced(countries: &[Country]) -> FavoritesViewState {
        let mut state = FavoritesViewState::new();
        state.list.sync(countries);
        state
    }

    #[test]
    fn test_clear_needs_confirmation() {
        let countries = sample_countries();
        let mut state = synced(&countries);
        assert_eq!(state.handle_event(&TuiEvent::InputChar('c')), None);
        assert!(state.confirm_clear);
        assert_eq!(
            state.handle_event(&TuiEvent::InputChar('c')),
            Some(FavoritesEvent::Clear)
        );
        assert!(!state.confirm_clear);
    }

    #[test]
    fn test_other_key_cancels_clear() {
        let countries = sample_countries();
        let mut state = synced(&countries);
        state.handle_event(&TuiEvent::InputChar('c'));
        state.handle_event(&TuiEvent::CursorDown);
        assert!(!state.confirm_clear);
        assert_eq!(state.handle_event(&TuiEvent::InputChar('c')), None);
    }

    #[test]
    fn test_remove_and_open() {
        let countries = sample_countries();
        let mut state = synced(&countries);
        assert_eq!(
            state.handle_event(&TuiEvent::InputChar('f')),
            Some(FavoritesEvent::Remove("BRA".to_string()))
        );
        assert_eq!(
            state.handle_event(&TuiEvent::InputChar('p')),
            Some(FavoritesEvent::OpenPage("BRA".to_string()))
        );
    }

    #[test]
    fn test_clear_on_empty_list_is_noop() {
        let mut state = synced(&[]);
        assert_eq!(state.handle_event(&TuiEvent::InputChar('c')), None);
        assert!(!state.confirm_clear);
    }

    #[test]
    fn test_render_states() {
        let countries = sample_countries();
        let mut state = FavoritesViewState::new();
        let backend = TestBackend::new(80, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| FavoritesView::new(&mut state, &[], false).render(f, f.area()))
            .unwrap();
        assert!(buffer_text(&terminal).contains("No favorites yet."));
        terminal
            .draw(|f| FavoritesView::new(&mut state, &countries, false).render(f, f.area()))
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Favorites (3)"));
        assert!(text.contains("★ Chad"));
    }
}
