//! # Country List Component
//!
//! The main tab: the computed view, one row per country, with a star on
//! favorites. Loading, empty and no-results states each get their own
//! placeholder so a failed fetch never looks like a filter with no matches.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph};

use crate::api::Country;
use crate::core::filter::ViewState;
use crate::core::format::group_thousands;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::{step_selection, truncate_str};
use crate::tui::event::TuiEvent;

const PAGE: isize = 10;

/// Events emitted by a country list.
#[derive(Debug, Clone, PartialEq)]
pub enum ListEvent {
    /// Enter: details overlay
    Open(String),
    /// `p`: dedicated page
    OpenPage(String),
    /// `f`: toggle favorite
    ToggleFavorite(String),
}

/// Persistent selection for a list of countries.
#[derive(Default)]
pub struct CountryListState {
    pub selected: usize,
    pub list_state: ListState,
    /// Codes in display order, refreshed by the owner whenever the list changes.
    codes: Vec<String>,
}

impl CountryListState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Syncs with the countries being shown, clamping the selection.
    pub fn sync(&mut self, countries: &[Country]) {
        self.codes = countries.iter().map(|c| c.cca3.clone()).collect();
        self.selected = step_selection(self.selected, 0, self.codes.len());
        self.list_state
            .select((!self.codes.is_empty()).then_some(self.selected));
    }

    pub fn selected_code(&self) -> Option<&str> {
        self.codes.get(self.selected).map(String::as_str)
    }

    fn step(&mut self, delta: isize) {
        self.selected = step_selection(self.selected, delta, self.codes.len());
        self.list_state
            .select((!self.codes.is_empty()).then_some(self.selected));
    }
}

impl EventHandler for CountryListState {
    type Event = ListEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<ListEvent> {
        match event {
            TuiEvent::CursorUp => self.step(-1),
            TuiEvent::CursorDown => self.step(1),
            TuiEvent::PageUp => self.step(-PAGE),
            TuiEvent::PageDown => self.step(PAGE),
            TuiEvent::Home => self.step(isize::MIN),
            TuiEvent::End => self.step(isize::MAX),
            TuiEvent::Submit => {
                return self.selected_code().map(|c| ListEvent::Open(c.to_string()));
            }
            TuiEvent::InputChar('p') => {
                return self.selected_code().map(|c| ListEvent::OpenPage(c.to_string()));
            }
            TuiEvent::InputChar('f') => {
                return self
                    .selected_code()
                    .map(|c| ListEvent::ToggleFavorite(c.to_string()));
            }
            _ => {}
        }
        None
    }
}

/// One list row: `★ Name  Region  Population`.
pub fn country_row(country: &Country, favorite: bool, width: usize) -> Line<'static> {
    let star = if favorite { "★ " } else { "  " };
    let population = group_thousands(country.population);
    let region = truncate_str(&country.region, 10);
    let name_width = width.saturating_sub(2 + 12 + population.len() + 2);
    let name = truncate_str(&country.name.common, name_width);
    Line::from(vec![
        Span::styled(star, Style::default().fg(Color::Yellow)),
        Span::raw(format!("{name:<name_width$}")),
        Span::styled(format!("  {region:<10}"), Style::default().fg(Color::DarkGray)),
        Span::styled(format!("  {population}"), Style::default().fg(Color::Cyan)),
    ])
}

/// Transient render wrapper for the country list.
pub struct CountryList<'a> {
    state: &'a mut CountryListState,
    countries: &'a [Country],
    favorites: &'a [String],
    view_state: ViewState,
    title: String,
}

impl<'a> CountryList<'a> {
    pub fn new(
        state: &'a mut CountryListState,
        countries: &'a [Country],
        favorites: &'a [String],
        view_state: ViewState,
    ) -> Self {
        Self {
            state,
            countries,
            favorites,
            view_state,
            title: " Countries ".to_string(),
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    fn placeholder(&self) -> Option<&'static str> {
        match self.view_state {
            ViewState::Loading => Some("Loading countries..."),
            ViewState::Empty => Some("No countries available. Check atlas.log for details."),
            ViewState::NoResults => Some("No countries match these filters. Press / to change them."),
            ViewState::Results(_) => None,
        }
    }
}

impl Component for CountryList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.sync(self.countries);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(self.title.as_str())
            .padding(Padding::horizontal(1));

        if let Some(message) = self.placeholder() {
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
            .map(|c| {
                let favorite = self.favorites.iter().any(|f| f.eq_ignore_ascii_case(&c.cca3));
                ListItem::new(country_row(c, favorite, inner_width))
            })
            .collect();

        let list = List::new(items).block(block).highlight_style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        );
        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_countries;
    use crate::tui::components::buffer_text;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_navigation_and_events() {
        let countries = sample_countries();
        let mut state = CountryListState::new();
        state.sync(&countries);
        assert_eq!(state.selected_code(), Some("BRA"));
        state.handle_event(&TuiEvent::CursorDown);
        assert_eq!(
            state.handle_event(&TuiEvent::Submit),
            Some(ListEvent::Open("FRA".to_string()))
        );
        state.handle_event(&TuiEvent::End);
        assert_eq!(
            state.handle_event(&TuiEvent::InputChar('f')),
            Some(ListEvent::ToggleFavorite("TCD".to_string()))
        );
        state.handle_event(&TuiEvent::Home);
        assert_eq!(state.selected_code(), Some("BRA"));
    }

    #[test]
    fn test_sync_clamps_after_view_shrinks() {
        let countries = sample_countries();
        let mut state = CountryListState::new();
        state.sync(&countries);
        state.handle_event(&TuiEvent::End);
        state.sync(&countries[..1]);
        assert_eq!(state.selected_code(), Some("BRA"));
        state.sync(&[]);
        assert_eq!(state.selected_code(), None);
        assert_eq!(state.handle_event(&TuiEvent::Submit), None);
    }

    #[test]
    fn test_render_rows_with_star() {
        let countries = sample_countries();
        let favorites = vec!["FRA".to_string()];
        let mut state = CountryListState::new();
        let backend = TestBackend::new(80, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                CountryList::new(&mut state, &countries, &favorites, ViewState::Results(3))
                    .render(f, f.area())
            })
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Brazil"));
        assert!(text.contains("★ France"));
        assert!(text.contains("Europe"));
    }

    #[test]
    fn test_render_placeholders_are_distinct() {
        let mut state = CountryListState::new();
        let backend = TestBackend::new(80, 5);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| CountryList::new(&mut state, &[], &[], ViewState::NoResults).render(f, f.area()))
            .unwrap();
        assert!(buffer_text(&terminal).contains("No countries match"));
        terminal
            .draw(|f| CountryList::new(&mut state, &[], &[], ViewState::Empty).render(f, f.area()))
            .unwrap();
        assert!(buffer_text(&terminal).contains("No countries available"));
    }
}
