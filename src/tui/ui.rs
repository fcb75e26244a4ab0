use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::core::state::{App, Tab};
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{
    CountryList, CountryModal, CountryPageView, CuriosityCard, FavoritesView, FilterForm,
    RankingChart, TitleBar,
};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Length(1), Min(0), Length(1)]);
    let [title_area, filter_area, main_area, help_area] = layout.areas(frame.area());

    TitleBar::new(app.tab, app.favorite_codes.len(), app.status_message.clone())
        .render(frame, title_area);
    draw_filter_summary(frame, filter_area, app);

    if let Some(page) = &app.page {
        let is_favorite = app.is_favorite(&page.code);
        CountryPageView::new(&mut tui.page, page, &app.countries, is_favorite)
            .render(frame, main_area);
    } else {
        match app.tab {
            Tab::Countries => {
                let title = format!(" Countries ({} of {}) ", app.view.len(), app.countries.len());
                CountryList::new(
                    &mut tui.countries,
                    &app.view,
                    &app.favorite_codes,
                    app.view_state(),
                )
                .title(title)
                .render(frame, main_area);
            }
            Tab::Ranking => RankingChart::new(&app.ranking).render(frame, main_area),
            Tab::Curiosity => CuriosityCard::new(app.curiosity.as_ref()).render(frame, main_area),
            Tab::Favorites => {
                FavoritesView::new(
                    &mut tui.favorites,
                    &app.favorite_countries,
                    app.favorites_loading,
                )
                .render(frame, main_area);
            }
        }
    }

    frame.render_widget(
        Paragraph::new(help_text(app, tui)).style(Style::default().fg(Color::DarkGray)),
        help_area,
    );

    // Overlays render last so they sit on top
    if let Some(modal) = &tui.modal {
        let is_favorite = app.is_favorite(&modal.country.cca3);
        CountryModal::new(modal, is_favorite).render(frame, main_area);
    }
    if let Some(form) = tui.filter_form.as_mut() {
        FilterForm::new(form).render(frame, frame.area());
    }
}

/// The applied criteria in query-string form, so a view can be reproduced with `--query`.
fn draw_filter_summary(frame: &mut Frame, area: Rect, app: &App) {
    let query = app.criteria.to_query();
    let line = if query.is_empty() {
        Line::from(Span::styled("No filters", Style::default().fg(Color::DarkGray)))
    } else {
        Line::from(vec![
            Span::styled("Filters: ", Style::default().fg(Color::DarkGray)),
            Span::styled(format!("?{query}"), Style::default().fg(Color::Green)),
        ])
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn help_text(app: &App, tui: &TuiState) -> &'static str {
    if tui.filter_form.is_some() || tui.modal.is_some() || app.page.is_some() {
        return "";
    }
    match app.tab {
        Tab::Countries => " ↑/↓ Move  Enter Details  p Page  f Favorite  / Filter  Tab Next tab  q Quit",
        Tab::Ranking => " Tab Next tab  / Filter  q Quit",
        Tab::Curiosity => " r Another one  Enter Open page  Tab Next tab  q Quit",
        Tab::Favorites => " ↑/↓ Move  Enter Details  p Page  f Remove  c Clear  Tab Next tab  q Quit",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::core::filter::FilterCriteria;
    use crate::core::state::{CountryPage, PageState};
    use crate::test_support::sample_countries;
    use crate::tui::components::{CountryModalState, FilterFormState, buffer_text};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn loaded_app() -> App {
        let mut app = App::new(FilterCriteria::default(), vec!["FRA".to_string()], 10);
        update(&mut app, Action::CountriesLoaded(sample_countries()));
        app
    }

    fn draw(app: &App, tui: &mut TuiState) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw_ui(f, app, tui)).unwrap();
        buffer_text(&terminal)
    }

    #[test]
    fn test_draw_ui_loading() {
        let app = App::new(FilterCriteria::default(), Vec::new(), 10);
        let mut tui = TuiState::new();
        let text = draw(&app, &mut tui);
        assert!(text.contains("Loading countries..."));
        assert!(text.contains("No filters"));
    }

    #[test]
    fn test_draw_ui_countries_with_query() {
        let mut app = loaded_app();
        update(
            &mut app,
            Action::ApplyFilters(FilterCriteria::from_query("region=Europe")),
        );
        let mut tui = TuiState::new();
        let text = draw(&app, &mut tui);
        assert!(text.contains("?region=Europe"));
        assert!(text.contains("Countries (1 of 3)"));
        assert!(text.contains("★ France"));
        assert!(!text.contains("Brazil"));
    }

    #[test]
    fn test_draw_ui_every_tab() {
        let mut app = loaded_app();
        let mut tui = TuiState::new();
        for tab in Tab::ALL {
            app.tab = tab;
            draw(&app, &mut tui);
        }
        app.tab = Tab::Ranking;
        assert!(draw(&app, &mut tui).contains("Top 3 by population"));
    }

    #[test]
    fn test_draw_ui_overlays_and_page() {
        let mut app = loaded_app();
        let mut tui = TuiState::new();
        tui.modal = Some(CountryModalState::new(sample_countries()[1].clone()));
        assert!(draw(&app, &mut tui).contains("French Republic"));

        tui.modal = None;
        tui.filter_form = Some(FilterFormState::new(
            &app.criteria,
            app.regions.clone(),
            app.languages.clone(),
        ));
        assert!(draw(&app, &mut tui).contains("Search by name"));

        tui.filter_form = None;
        app.page = Some(CountryPage {
            code: "XYZ".to_string(),
            state: PageState::NotFound,
            history: Vec::new(),
        });
        assert!(draw(&app, &mut tui).contains("No country matches the code"));
    }
}
