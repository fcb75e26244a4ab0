//! # Ranking Chart Component
//!
//! Horizontal bar chart of the most populous countries. Stateless: the
//! ranking itself is computed in core when the collection arrives.

use ratatui::Frame;
use ratatui::layout::{Alignment, Direction, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Padding, Paragraph};

use crate::api::Country;
use crate::core::format::format_population;
use crate::tui::component::Component;
use crate::tui::components::truncate_str;

const LABEL_WIDTH: usize = 16;

pub struct RankingChart<'a> {
    pub ranking: &'a [Country],
}

impl<'a> RankingChart<'a> {
    pub fn new(ranking: &'a [Country]) -> Self {
        Self { ranking }
    }
}

impl Component for RankingChart<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" Top {} by population ", self.ranking.len()))
            .padding(Padding::uniform(1));

        if self.ranking.is_empty() {
            let empty = Paragraph::new("No ranking yet.")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        let bars: Vec<Bar> = self
            .ranking
            .iter()
            .map(|c| {
                Bar::default()
                    .value(c.population)
                    .label(Line::from(truncate_str(&c.name.common, LABEL_WIDTH)))
                    .text_value(format_population(c.population))
                    .style(Style::default().fg(Color::Cyan))
                    .value_style(Style::default().fg(Color::Black).bg(Color::Cyan))
            })
            .collect();

        let chart = BarChart::default()
            .block(block)
            .direction(Direction::Horizontal)
            .bar_width(1)
            .bar_gap(1)
            .data(BarGroup::default().bars(&bars));
        frame.render_widget(chart, area);
    }
}
