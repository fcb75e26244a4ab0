//! # Curiosity Card Component
//!
//! A random country and one fact about it. `r` rolls again, Enter opens the
//! country's page. The pick itself happens in the event loop.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Wrap};

use crate::core::state::Curiosity;
use crate::tui::component::Component;

pub struct CuriosityCard<'a> {
    pub curiosity: Option<&'a Curiosity>,
}

impl<'a> CuriosityCard<'a> {
    pub fn new(curiosity: Option<&'a Curiosity>) -> Self {
        Self { curiosity }
    }
}

impl Component for CuriosityCard<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [card_area] = Layout::vertical([Constraint::Length(9)])
            .flex(Flex::Center)
            .areas(area);
        let [card_area] = Layout::horizontal([Constraint::Max(70)])
            .flex(Flex::Center)
            .areas(card_area);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Did you know? ")
            .title_bottom(Line::from(" r Another one  Enter Open page ").centered());

        let lines = match self.curiosity {
            Some(curiosity) => vec![
                Line::from(Span::styled(
                    curiosity.country.name.common.clone(),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    curiosity.country.name.official.clone(),
                    Style::default().fg(Color::DarkGray),
                )),
                Line::default(),
                Line::from(curiosity.fact.clone()),
            ],
            None => vec![Line::from(Span::styled(
                "Nothing to tell yet.",
                Style::default().fg(Color::DarkGray),
            ))],
        };

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(paragraph, card_area);
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
    fn test_render_curiosity() {
        let curiosity = Curiosity {
            country: sample_countries()[2].clone(),
            fact: "Chad does not border any country.".to_string(),
        };
        let backend = TestBackend::new(80, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| CuriosityCard::new(Some(&curiosity)).render(f, f.area()))
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Did you know?"));
        assert!(text.contains("Republic of Chad"));
        assert!(text.contains("Chad does not border any country."));
    }

    #[test]
    fn test_render_without_pick() {
        let backend = TestBackend::new(80, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| CuriosityCard::new(None).render(f, f.area()))
            .unwrap();
        assert!(buffer_text(&terminal).contains("Nothing to tell yet."));
    }
}
