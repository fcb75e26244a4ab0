//! # Country Page Component
//!
//! Full-screen page for one country, loaded by code. Bordering countries are
//! listed on the right and can be followed with Enter; Backspace walks back
//! through the visited pages.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph, Wrap};

use crate::api::Country;
use crate::core::format::{DetailTab, details};
use crate::core::state::{CountryPage, PageState};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::country_modal::detail_lines;
use crate::tui::components::step_selection;
use crate::tui::event::TuiEvent;

/// Events emitted by the country page.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    FollowBorder(String),
    ToggleFavorite(String),
    Back,
    Close,
}

/// Persistent border selection for the page.
#[derive(Default)]
pub struct CountryPageState {
    pub selected: usize,
    pub list_state: ListState,
    /// The page's border codes and own code, refreshed on render.
    borders: Vec<String>,
    code: Option<String>,
    found: bool,
}

impl CountryPageState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Syncs with the page being shown. A different country resets the selection.
    pub fn sync(&mut self, page: &CountryPage) {
        if self.code.as_deref() != Some(page.code.as_str()) {
            self.selected = 0;
            self.code = Some(page.code.clone());
        }
        self.found = matches!(page.state, PageState::Found(_));
        self.borders = match &page.state {
            PageState::Found(country) => country.borders.clone(),
            _ => Vec::new(),
        };
        self.selected = step_selection(self.selected, 0, self.borders.len());
        self.list_state
            .select((!self.borders.is_empty()).then_some(self.selected));
    }
}

impl EventHandler for CountryPageState {
    type Event = PageEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<PageEvent> {
        match event {
            TuiEvent::CursorUp => {
                self.selected = step_selection(self.selected, -1, self.borders.len());
                self.list_state.select(Some(self.selected));
                None
            }
            TuiEvent::CursorDown => {
                self.selected = step_selection(self.selected, 1, self.borders.len());
                self.list_state.select(Some(self.selected));
                None
            }
            TuiEvent::Submit => self
                .borders
                .get(self.selected)
                .map(|code| PageEvent::FollowBorder(code.clone())),
            TuiEvent::InputChar('f') if self.found => self
                .code
                .as_ref()
                .map(|code| PageEvent::ToggleFavorite(code.clone())),
            TuiEvent::Backspace => Some(PageEvent::Back),
            TuiEvent::Escape | TuiEvent::InputChar('q') => Some(PageEvent::Close),
            _ => None,
        }
    }
}

/// Transient render wrapper for the country page.
pub struct CountryPageView<'a> {
    state: &'a mut CountryPageState,
    page: &'a CountryPage,
    /// Loaded collection, used to name border codes
    known: &'a [Country],
    is_favorite: bool,
}

impl<'a> CountryPageView<'a> {
    pub fn new(
        state: &'a mut CountryPageState,
        page: &'a CountryPage,
        known: &'a [Country],
        is_favorite: bool,
    ) -> Self {
        Self {
            state,
            page,
            known,
            is_favorite,
        }
    }

    fn border_name(&self, code: &str) -> String {
        self.known
            .iter()
            .find(|c| c.cca3 == code)
            .map(|c| format!("{} ({code})", c.name.common))
            .unwrap_or_else(|| code.to_string())
    }

    fn render_message(&self, frame: &mut Frame, area: Rect, block: Block, message: String) {
        let paragraph = Paragraph::new(message)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(paragraph, area);
    }
}

impl Component for CountryPageView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.sync(self.page);
        let back_hint = if self.page.history.is_empty() { "" } else { "  ⌫ Back" };
        let help = format!(" ↑/↓ Borders  Enter Visit  f Favorite{back_hint}  Esc Close ");
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title_bottom(Line::from(help).centered())
            .padding(Padding::horizontal(1));

        let country = match &self.page.state {
            PageState::Loading => {
                let block = block.title(format!(" {} ", self.page.code));
                let message = format!("Loading {}...", self.page.code);
                return self.render_message(frame, area, block, message);
            }
            PageState::NotFound => {
                let block = block.title(" Not found ");
                let message = format!(
                    "No country matches the code \"{}\".\nCheck the code or go back.",
                    self.page.code
                );
                return self.render_message(frame, area, block, message);
            }
            PageState::Found(country) => country,
        };

        let star = if self.is_favorite { " ★" } else { "" };
        let block = block.title(Line::from(vec![Span::styled(
            format!(" {}{star} ", country.name.common),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )]));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [details_area, borders_area] =
            Layout::horizontal([Constraint::Percentage(65), Constraint::Percentage(35)])
                .areas(inner);

        let mut rows = details(country, DetailTab::General);
        rows.extend(
            details(country, DetailTab::Geography)
                .into_iter()
                .filter(|(label, _)| *label != "Borders"),
        );
        if let Some(alt) = &country.flags.alt {
            rows.push(("Flag", alt.clone()));
        }
        frame.render_widget(
            Paragraph::new(detail_lines(rows)).wrap(Wrap { trim: false }),
            details_area,
        );

        let borders_block = Block::default()
            .borders(Borders::LEFT)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Borders ")
            .padding(Padding::horizontal(1));
        if country.borders.is_empty() {
            let none = Paragraph::new("No land borders")
                .style(Style::default().fg(Color::DarkGray))
                .block(borders_block);
            frame.render_widget(none, borders_area);
            return;
        }
        let items: Vec<ListItem> = country
            .borders
            .iter()
            .map(|code| ListItem::new(self.border_name(code)))
            .collect();
        let list = List::new(items).block(borders_block).highlight_style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        );
        frame.render_stateful_widget(list, borders_area, &mut self.state.list_state);
    }
}
