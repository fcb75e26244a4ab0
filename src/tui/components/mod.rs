//! # TUI Components
//!
//! This module contains all UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! Components in this directory follow two patterns:
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Simple display components that receive all data as parameters:
//! - `TitleBar`: Top bar with tabs, counts and the status message
//! - `RankingChart`: Population bar chart
//! - `CuriosityCard`: The random country fact
//!
//! ### Stateful Components (Persistent State + Transient Wrapper)
//!
//! The state struct lives in `TuiState`; the wrapper is built each frame with
//! borrowed state and props:
//! - `CountryListState` / `CountryList`: The filtered, sorted view
//! - `FilterFormState` / `FilterForm`: Search box plus pickers overlay
//! - `CountryModalState` / `CountryModal`: Four-tab details overlay
//! - `CountryPageState` / `CountryPageView`: Dedicated page with borders
//! - `FavoritesViewState` / `FavoritesView`: Resolved favorites
//!
//! ### Props-Based Data Flow
//!
//! Components receive external data as "props", not by reaching into `App`.
//!
//! ```rust,ignore
//! // Good: Dependencies are explicit
//! CountryList::new(&mut tui.countries, &app.view, &app.favorite_codes, app.view_state())
//!     .render(frame, area);
//!
//! // Bad: Hidden dependency on global state
//! country_list.render(frame, area); // reads from global App
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs            (this file, shared layout helpers)
//! ├── title_bar.rs      (Tabs and status)
//! ├── search_box.rs     (Single-line text input)
//! ├── filter_form.rs    (Search + region/language/sort pickers)
//! ├── country_list.rs   (Main list)
//! ├── country_modal.rs  (Details overlay)
//! ├── country_page.rs   (Dedicated country page)
//! ├── ranking.rs        (Population ranking chart)
//! ├── curiosity.rs      (Random fact card)
//! └── favorites_view.rs (Favorites tab)
//! ```

use ratatui::layout::{Constraint, Layout, Rect};
use unicode_width::UnicodeWidthChar;

pub mod country_list;
pub mod country_modal;
pub mod country_page;
pub mod curiosity;
pub mod favorites_view;
pub mod filter_form;
pub mod ranking;
pub mod search_box;
mod title_bar;

pub use country_list::{CountryList, CountryListState, ListEvent};
pub use country_modal::{CountryModal, CountryModalState, ModalEvent};
pub use country_page::{CountryPageState, CountryPageView, PageEvent};
pub use curiosity::CuriosityCard;
pub use favorites_view::{FavoritesEvent, FavoritesView, FavoritesViewState};
pub use filter_form::{FilterEvent, FilterForm, FilterFormState};
pub use ranking::RankingChart;
pub use search_box::{SearchBox, SearchEvent};
pub use title_bar::TitleBar;

/// Truncate a string to fit within `max_width` display columns, adding "..." if needed.
pub fn truncate_str(s: &str, max_width: usize) -> String {
    let width: usize = s.chars().map(|c| c.width().unwrap_or(0)).sum();
    if width <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width - 3 {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push_str("...");
    out
}

/// Compute a centered rect using percentage of the outer rect.
pub fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}

/// Moves a selection index by `delta`, clamped to `[0, len)`.
pub fn step_selection(selected: usize, delta: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    selected.saturating_add_signed(delta).min(len - 1)
}

#[cfg(test)]
pub(crate) fn buffer_text(terminal: &ratatui::Terminal<ratatui::backend::TestBackend>) -> String {
    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|c| c.symbol())
        .collect::<String>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_str_multibyte() {
        assert_eq!(truncate_str("Åland Islands", 20), "Åland Islands");
        assert_eq!(truncate_str("Åland Islands", 8), "Åland...");
        assert_eq!(truncate_str("São Tomé", 2), "..");
    }

    #[test]
    fn test_centered_rect_is_inside() {
        let outer = Rect::new(0, 0, 100, 50);
        let inner = centered_rect(80, 60, outer);
        assert_eq!(inner.width, 80);
        assert_eq!(inner.height, 30);
        assert_eq!(inner.x, 10);
    }

    #[test]
    fn test_step_selection_clamps() {
        assert_eq!(step_selection(0, -1, 5), 0);
        assert_eq!(step_selection(3, 10, 5), 4);
        assert_eq!(step_selection(2, 1, 0), 0);
    }
}
