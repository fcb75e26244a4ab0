//! # Filter Form Component
//!
//! Overlay for editing the filter criteria: a name search plus region,
//! language and sort pickers. Opened with `/`, applied with Enter, reset with
//! Ctrl+R, dismissed with Esc.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `FilterFormState` lives in `TuiState` while the form is open
//! - `FilterForm` is created each frame with borrowed state
//!
//! Nothing changes in `App` until the form emits `FilterEvent::Apply`, so the
//! view is recomputed once per submission, not once per keystroke.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};

use crate::core::filter::{FilterCriteria, SortKey};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::{SearchBox, SearchEvent, centered_rect};
use crate::tui::event::TuiEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Search,
    Region,
    Language,
    Sort,
}

impl Field {
    const ORDER: [Field; 4] = [Field::Search, Field::Region, Field::Language, Field::Sort];

    fn step(self, delta: isize) -> Field {
        let len = Self::ORDER.len() as isize;
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0) as isize;
        Self::ORDER[(idx + delta).rem_euclid(len) as usize]
    }
}

/// Events emitted by the filter form.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterEvent {
    Apply(FilterCriteria),
    Reset,
    Dismiss,
}

/// A picker over "All" followed by `options`. Index 0 means no constraint.
struct Picker {
    options: Vec<String>,
    index: usize,
}

impl Picker {
    fn new(options: Vec<String>, current: Option<&str>) -> Self {
        let index = current
            .and_then(|c| options.iter().position(|o| o == c))
            .map(|i| i + 1)
            .unwrap_or(0);
        Self { options, index }
    }

    fn cycle(&mut self, delta: isize) {
        let len = self.options.len() as isize + 1;
        self.index = (self.index as isize + delta).rem_euclid(len) as usize;
    }

    fn value(&self) -> Option<String> {
        self.index.checked_sub(1).and_then(|i| self.options.get(i).cloned())
    }

    fn label(&self) -> &str {
        self.index
            .checked_sub(1)
            .and_then(|i| self.options.get(i))
            .map(String::as_str)
            .unwrap_or("All")
    }
}

/// Persistent state for the filter form overlay.
pub struct FilterFormState {
    pub search: SearchBox,
    region: Picker,
    language: Picker,
    /// Index into `[None] ++ SortKey::CYCLE`
    sort_index: usize,
    pub focus: Field,
}

impl FilterFormState {
    /// Pre-fills every field from the currently applied criteria.
    pub fn new(criteria: &FilterCriteria, regions: Vec<String>, languages: Vec<String>) -> Self {
        let mut search = SearchBox::new(criteria.search.as_deref().unwrap_or(""));
        search.focused = true;
        let sort_index = criteria
            .sort
            .and_then(|s| SortKey::CYCLE.iter().position(|k| *k == s))
            .map(|i| i + 1)
            .unwrap_or(0);
        Self {
            search,
            region: Picker::new(regions, criteria.region.as_deref()),
            language: Picker::new(languages, criteria.language.as_deref()),
            sort_index,
            focus: Field::Search,
        }
    }

    pub fn sort(&self) -> Option<SortKey> {
        self.sort_index
            .checked_sub(1)
            .and_then(|i| SortKey::CYCLE.get(i).copied())
    }

    /// The criteria the form currently describes.
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            search: self.search.value(),
            region: self.region.value(),
            language: self.language.value(),
            sort: self.sort(),
        }
    }

    fn reset(&mut self) {
        self.search.clear();
        self.region.index = 0;
        self.language.index = 0;
        self.sort_index = 0;
    }

    fn move_focus(&mut self, delta: isize) {
        self.focus = self.focus.step(delta);
        self.search.focused = self.focus == Field::Search;
    }

    fn cycle_focused(&mut self, delta: isize) {
        match self.focus {
            Field::Search => {}
            Field::Region => self.region.cycle(delta),
            Field::Language => self.language.cycle(delta),
            Field::Sort => {
                let len = SortKey::CYCLE.len() as isize + 1;
                self.sort_index = (self.sort_index as isize + delta).rem_euclid(len) as usize;
            }
        }
    }
}

impl EventHandler for FilterFormState {
    type Event = FilterEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<FilterEvent> {
        match event {
            TuiEvent::Escape => Some(FilterEvent::Dismiss),
            TuiEvent::Reset => {
                self.reset();
                Some(FilterEvent::Reset)
            }
            TuiEvent::Submit => Some(FilterEvent::Apply(self.criteria())),
            TuiEvent::NextTab | TuiEvent::CursorDown => {
                self.move_focus(1);
                None
            }
            TuiEvent::PrevTab | TuiEvent::CursorUp => {
                self.move_focus(-1);
                None
            }
            _ if self.focus == Field::Search => {
                // Submit is handled above, so only edits reach the box
                if let Some(SearchEvent::Submit(_)) = self.search.handle_event(event) {
                    return Some(FilterEvent::Apply(self.criteria()));
                }
                None
            }
            TuiEvent::CursorLeft => {
                self.cycle_focused(-1);
                None
            }
            TuiEvent::CursorRight | TuiEvent::InputChar(' ') => {
                self.cycle_focused(1);
                None
            }
            _ => None,
        }
    }
}

/// Transient render wrapper for the filter form overlay.
pub struct FilterForm<'a> {
    state: &'a mut FilterFormState,
}

impl<'a> FilterForm<'a> {
    pub fn new(state: &'a mut FilterFormState) -> Self {
        Self { state }
    }

    fn picker_line(&self, field: Field, label: &str, value: &str) -> Line<'static> {
        let focused = self.state.focus == field;
        let value_style = if focused {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(Color::Gray)
        };
        Line::from(vec![
            Span::styled(format!("{label:<10}"), Style::default().fg(Color::DarkGray)),
            Span::styled(format!(" ◀ {value} ▶ "), value_style),
        ])
    }
}

impl Component for FilterForm<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(60, 50, area);
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Filters ")
            .title_alignment(Alignment::Left)
            .title_bottom(
                Line::from(" Enter Apply  ^R Reset  Tab Next field  ←/→ Change  Esc Back ")
                    .centered(),
            )
            .padding(Padding::horizontal(1));
        let inner = block.inner(overlay);
        frame.render_widget(block, overlay);

        let [search_area, _, pickers_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(inner);

        self.state.search.render(frame, search_area);

        let sort_label = self.state.sort().map(SortKey::label).unwrap_or("Default");
        let lines = vec![
            self.picker_line(Field::Region, "Region", self.state.region.label()),
            Line::default(),
            self.picker_line(Field::Language, "Language", self.state.language.label()),
            Line::default(),
            self.picker_line(Field::Sort, "Sort", sort_label),
        ];
        frame.render_widget(Paragraph::new(lines), pickers_area);
    }
}
