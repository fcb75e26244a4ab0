//! # TitleBar Component
//!
//! Top bar showing the tabs, the favorites count and the status message.
//!
//! Purely presentational: every field is a prop, so the bar renders whatever
//! it is given and is trivial to test with `TestBackend`.
//!
//! ```text
//! Atlas │ Countries │ Ranking │ Curiosities │ Favorites (2)     250 countries
//! ```

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Tabs};

use crate::core::state::Tab;
use crate::tui::component::Component;

pub struct TitleBar {
    pub active: Tab,
    pub favorites_count: usize,
    pub status_message: String,
}

impl TitleBar {
    pub fn new(active: Tab, favorites_count: usize, status_message: String) -> Self {
        Self {
            active,
            favorites_count,
            status_message,
        }
    }

    fn tab_title(&self, tab: Tab) -> String {
        match tab {
            Tab::Favorites if self.favorites_count > 0 => {
                format!("{} ({})", tab.title(), self.favorites_count)
            }
            _ => tab.title().to_string(),
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let status_width = (self.status_message.chars().count() as u16 + 1).min(area.width / 2);
        let [tabs_area, status_area] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(status_width)]).areas(area);

        let titles: Vec<Line> = Tab::ALL
            .iter()
            .map(|tab| Line::from(self.tab_title(*tab)))
            .collect();
        let tabs = Tabs::new(titles)
            .select(self.active.index())
            .style(Style::default().fg(Color::Gray))
            .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .divider("│");

        let [brand_area, tabs_area] =
            Layout::horizontal([Constraint::Length(6), Constraint::Min(0)]).areas(tabs_area);
        frame.render_widget(
            Span::styled("Atlas", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            brand_area,
        );
        frame.render_widget(tabs, tabs_area);
        frame.render_widget(
            Paragraph::new(self.status_message.as_str())
                .style(Style::default().fg(Color::DarkGray))
                .right_aligned(),
            status_area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::components::buffer_text;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(title_bar: &mut TitleBar) -> String {
        let backend = TestBackend::new(100, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| title_bar.render(f, f.area())).unwrap();
        buffer_text(&terminal)
    }

    #[test]
    fn test_title_bar_shows_tabs_and_status() {
        let mut title_bar = TitleBar::new(Tab::Countries, 0, "250 countries".to_string());
        let text = render(&mut title_bar);
        assert!(text.contains("Atlas"));
        assert!(text.contains("Countries"));
        assert!(text.contains("Curiosities"));
        assert!(text.contains("250 countries"));
        assert!(!text.contains("Favorites ("));
    }

    #[test]
    fn test_title_bar_favorites_count() {
        let mut title_bar = TitleBar::new(Tab::Favorites, 2, String::new());
        assert!(render(&mut title_bar).contains("Favorites (2)"));
    }
}
