//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Data Flow
//!
//! ```text
//!  keyboard ──► TuiEvent ──► component event ──► Action ──► update() ──► Effect
//!                                                   ▲                       │
//!                                                   │     tokio task        │
//!                                                   └──── mpsc::Sender ◄────┘
//! ```
//!
//! Effects that touch the network are spawned on the tokio runtime; their
//! results come back as `Action`s on an mpsc channel and are applied on the
//! loop thread. Favorites persistence is a small local write and runs inline.
//!
//! ## Redraw Strategy
//!
//! The loop only draws when something changed. While a fetch is outstanding
//! it polls every ~100ms so results show up promptly; otherwise it sleeps up to
//! 250ms between polls.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::api::{self, CountrySource};
use crate::core::action::{Action, Effect, update};
use crate::core::favorites::FavoritesStore;
use crate::core::filter::FilterCriteria;
use crate::core::insights::random_curiosity;
use crate::core::state::{App, Curiosity, PageState, Tab};
use crate::tui::component::EventHandler;
use crate::tui::components::{
    CountryListState, CountryModalState, CountryPageState, FavoritesEvent, FavoritesViewState,
    FilterEvent, FilterFormState, ListEvent, ModalEvent, PageEvent,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    // Persistent component states
    pub countries: CountryListState,
    pub favorites: FavoritesViewState,
    pub page: CountryPageState,
    // Overlays (None = hidden)
    pub filter_form: Option<FilterFormState>,
    pub modal: Option<CountryModalState>,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            countries: CountryListState::new(),
            favorites: FavoritesViewState::new(),
            page: CountryPageState::new(),
            filter_form: None,
            modal: None,
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol is harmlessly ignored by terminals without it
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste
        );
    }
}

// ============================================================================
// Effect execution
// ============================================================================

/// Everything the loop needs to carry out effects.
#[derive(Clone)]
pub struct Host {
    source: Arc<dyn CountrySource>,
    favorites: FavoritesStore,
    tx: mpsc::Sender<Action>,
}

impl Host {
    pub fn new(
        source: Arc<dyn CountrySource>,
        favorites: FavoritesStore,
        tx: mpsc::Sender<Action>,
    ) -> Self {
        Self {
            source,
            favorites,
            tx,
        }
    }

    /// Applies an action and carries out the resulting effect.
    /// Returns `true` when the app should quit.
    pub fn dispatch(&self, app: &mut App, action: Action) -> bool {
        let effect = update(app, action);
        self.execute(app, effect)
    }

    fn execute(&self, app: &mut App, effect: Effect) -> bool {
        match effect {
            Effect::None => false,
            Effect::Quit => true,
            Effect::FetchCountry(code) => {
                self.spawn_fetch_country(code);
                false
            }
            Effect::ResolveFavorites(codes) => {
                self.spawn_resolve_favorites(codes);
                false
            }
            Effect::PersistToggle(code) => {
                let follow_up = match self.favorites.toggle_favorite(&code) {
                    Ok(favorite) => Action::FavoriteToggled {
                        code: code.trim().to_ascii_uppercase(),
                        favorite,
                    },
                    Err(e) => {
                        warn!("Failed to toggle favorite {}: {}", code, e);
                        Action::StorageFailed(e.to_string())
                    }
                };
                self.dispatch(app, follow_up)
            }
            Effect::PersistClear => {
                let follow_up = match self.favorites.clear_favorites() {
                    Ok(()) => Action::FavoritesCleared,
                    Err(e) => {
                        warn!("Failed to clear favorites: {}", e);
                        Action::StorageFailed(e.to_string())
                    }
                };
                self.dispatch(app, follow_up)
            }
            Effect::PickCuriosity => {
                let pick = random_curiosity(&app.countries, &mut rand::thread_rng()).map(
                    |(country, fact)| Curiosity {
                        country: country.clone(),
                        fact,
                    },
                );
                self.dispatch(app, Action::CuriosityPicked(pick))
            }
        }
    }

    pub fn spawn_load_all(&self) {
        info!("Spawning full collection fetch from {}", self.source.name());
        let source = self.source.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let countries = api::fetch_all(source.as_ref()).await;
            if tx.send(Action::CountriesLoaded(countries)).is_err() {
                warn!("Failed to send CountriesLoaded: receiver dropped");
            }
        });
    }

    fn spawn_fetch_country(&self, code: String) {
        debug!("Spawning fetch for {}", code);
        let source = self.source.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let country = api::fetch_one(source.as_ref(), &code).await;
            if tx.send(Action::CountryLoaded { code, country }).is_err() {
                warn!("Failed to send CountryLoaded: receiver dropped");
            }
        });
    }

    fn spawn_resolve_favorites(&self, codes: Vec<String>) {
        debug!("Spawning favorites resolution for {} codes", codes.len());
        let source = self.source.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let countries = api::resolve_favorites(source.as_ref(), &codes).await;
            if tx.send(Action::FavoritesResolved(countries)).is_err() {
                warn!("Failed to send FavoritesResolved: receiver dropped");
            }
        });
    }
}

// ============================================================================
// Event routing
// ============================================================================

/// Routes one terminal event through overlays, the page, then the active tab.
/// Returns `true` when the app should quit.
pub fn handle_event(app: &mut App, tui: &mut TuiState, host: &Host, event: TuiEvent) -> bool {
    match event {
        TuiEvent::ForceQuit => return host.dispatch(app, Action::Quit),
        TuiEvent::Resize => return false,
        _ => {}
    }

    // Filter form captures everything while open
    if let Some(form) = tui.filter_form.as_mut() {
        match form.handle_event(&event) {
            Some(FilterEvent::Apply(criteria)) => {
                tui.filter_form = None;
                return host.dispatch(app, Action::ApplyFilters(criteria));
            }
            Some(FilterEvent::Reset) => {
                tui.filter_form = None;
                return host.dispatch(app, Action::ResetFilters);
            }
            Some(FilterEvent::Dismiss) => tui.filter_form = None,
            None => {}
        }
        return false;
    }

    if let Some(modal) = tui.modal.as_mut() {
        match modal.handle_event(&event) {
            Some(ModalEvent::ToggleFavorite(code)) => {
                return host.dispatch(app, Action::ToggleFavorite(code));
            }
            Some(ModalEvent::OpenPage(code)) => {
                tui.modal = None;
                return host.dispatch(app, Action::OpenCountry(code));
            }
            Some(ModalEvent::Dismiss) => tui.modal = None,
            None => {}
        }
        return false;
    }

    if let Some(page) = &app.page {
        // Keep the border list in step with the page before routing keys
        tui.page.sync(page);
        return match tui.page.handle_event(&event) {
            Some(PageEvent::FollowBorder(code)) => host.dispatch(app, Action::OpenCountry(code)),
            Some(PageEvent::ToggleFavorite(code)) => {
                host.dispatch(app, Action::ToggleFavorite(code))
            }
            Some(PageEvent::Back) => host.dispatch(app, Action::BackFromCountry),
            Some(PageEvent::Close) => host.dispatch(app, Action::CloseCountry),
            None => false,
        };
    }

    // Global keys
    match event {
        TuiEvent::InputChar('q') => return host.dispatch(app, Action::Quit),
        TuiEvent::NextTab => return host.dispatch(app, Action::ShowTab(app.tab.next())),
        TuiEvent::PrevTab => return host.dispatch(app, Action::ShowTab(app.tab.prev())),
        TuiEvent::InputChar(c @ '1'..='4') => {
            let tab = Tab::ALL[(c as u8 - b'1') as usize];
            return host.dispatch(app, Action::ShowTab(tab));
        }
        TuiEvent::InputChar('/') => {
            tui.filter_form = Some(FilterFormState::new(
                &app.criteria,
                app.regions.clone(),
                app.languages.clone(),
            ));
            if app.tab != Tab::Countries {
                return host.dispatch(app, Action::ShowTab(Tab::Countries));
            }
            return false;
        }
        _ => {}
    }

    match app.tab {
        Tab::Countries => {
            tui.countries.sync(&app.view);
            match tui.countries.handle_event(&event) {
                Some(ListEvent::Open(code)) => {
                    open_modal(tui, &app.view, &code);
                    false
                }
                Some(ListEvent::OpenPage(code)) => host.dispatch(app, Action::OpenCountry(code)),
                Some(ListEvent::ToggleFavorite(code)) => {
                    host.dispatch(app, Action::ToggleFavorite(code))
                }
                None => false,
            }
        }
        Tab::Ranking => false,
        Tab::Curiosity => match event {
            TuiEvent::InputChar('r') => host.dispatch(app, Action::RollCuriosity),
            TuiEvent::Submit => match app.curiosity.as_ref() {
                Some(c) => {
                    let code = c.country.cca3.clone();
                    host.dispatch(app, Action::OpenCountry(code))
                }
                None => false,
            },
            _ => false,
        },
        Tab::Favorites => {
            tui.favorites.list.sync(&app.favorite_countries);
            match tui.favorites.handle_event(&event) {
                Some(FavoritesEvent::Open(code)) => {
                    open_modal(tui, &app.favorite_countries, &code);
                    false
                }
                Some(FavoritesEvent::OpenPage(code)) => {
                    host.dispatch(app, Action::OpenCountry(code))
                }
                Some(FavoritesEvent::Remove(code)) => {
                    host.dispatch(app, Action::ToggleFavorite(code))
                }
                Some(FavoritesEvent::Clear) => host.dispatch(app, Action::ClearFavorites),
                None => false,
            }
        }
    }
}

fn open_modal(tui: &mut TuiState, countries: &[crate::api::Country], code: &str) {
    if let Some(country) = countries.iter().find(|c| c.cca3 == code) {
        tui.modal = Some(CountryModalState::new(country.clone()));
    }
}

/// Whether a fetch is outstanding, so the loop should poll faster.
fn waiting(app: &App) -> bool {
    !app.loaded
        || app.favorites_loading
        || app
            .page
            .as_ref()
            .is_some_and(|p| p.state == PageState::Loading)
}

// ============================================================================
// Event loop
// ============================================================================

pub fn run(
    source: Arc<dyn CountrySource>,
    favorites: FavoritesStore,
    criteria: FilterCriteria,
    ranking_size: usize,
    open_country: Option<String>,
) -> std::io::Result<()> {
    let mut app = App::new(criteria, favorites.list_favorites(), ranking_size);
    let mut tui = TuiState::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    let host = Host::new(source, favorites, tx);
    host.spawn_load_all();
    if let Some(code) = open_country {
        host.dispatch(&mut app, Action::OpenCountry(code));
    }

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();
    let mut needs_redraw = true; // Force first frame

    'main: loop {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let timeout = if waiting(&app) {
            Duration::from_millis(100)
        } else {
            Duration::from_millis(250)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if handle_event(&mut app, &mut tui, &host, event) {
                break 'main;
            }
        }

        // Handle background task results
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            if host.dispatch(&mut app, action) {
                break 'main;
            }
        }
    }

    info!("Atlas shutting down");
    ratatui::restore();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{StubSource, sample_countries};

    fn setup() -> (App, TuiState, Host, mpsc::Receiver<Action>) {
        let (tx, rx) = mpsc::channel();
        let host = Host::new(
            Arc::new(StubSource::new(sample_countries())),
            FavoritesStore::in_memory(),
            tx,
        );
        let mut app = App::new(FilterCriteria::default(), Vec::new(), 10);
        host.dispatch(&mut app, Action::CountriesLoaded(sample_countries()));
        (app, TuiState::new(), host, rx)
    }

    fn recv(rx: &mpsc::Receiver<Action>) -> Action {
        rx.recv_timeout(Duration::from_secs(5))
            .expect("background task should report back")
    }

    #[tokio::test]
    async fn test_toggle_persists_without_navigation() {
        let (mut app, mut tui, host, _rx) = setup();
        handle_event(&mut app, &mut tui, &host, TuiEvent::InputChar('f'));
        assert_eq!(app.favorite_codes, vec!["BRA"]);
        assert_eq!(app.tab, Tab::Countries);
        assert_eq!(host.favorites.list_favorites(), vec!["BRA"]);
        handle_event(&mut app, &mut tui, &host, TuiEvent::InputChar('f'));
        assert!(app.favorite_codes.is_empty());
        assert!(host.favorites.list_favorites().is_empty());
    }

    #[tokio::test]
    async fn test_curiosity_is_picked_after_load() {
        let (app, _tui, _host, _rx) = setup();
        let curiosity = app.curiosity.expect("a pick from a non-empty collection");
        assert!(sample_countries().iter().any(|c| c.cca3 == curiosity.country.cca3));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_open_page_fetches_and_applies() {
        let (mut app, mut tui, host, rx) = setup();
        handle_event(&mut app, &mut tui, &host, TuiEvent::InputChar('p'));
        assert_eq!(app.page.as_ref().unwrap().state, PageState::Loading);
        let action = recv(&rx);
        host.dispatch(&mut app, action);
        let page = app.page.as_ref().unwrap();
        assert!(matches!(&page.state, PageState::Found(c) if c.cca3 == "BRA"));

        // Backspace with no history closes the page
        handle_event(&mut app, &mut tui, &host, TuiEvent::Backspace);
        assert!(app.page.is_none());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_favorites_tab_resolves_in_order() {
        let (mut app, mut tui, host, rx) = setup();
        host.favorites.toggle_favorite("TCD").unwrap();
        host.favorites.toggle_favorite("BRA").unwrap();
        app.favorite_codes = host.favorites.list_favorites();
        handle_event(&mut app, &mut tui, &host, TuiEvent::InputChar('4'));
        assert_eq!(app.tab, Tab::Favorites);
        let action = recv(&rx);
        host.dispatch(&mut app, action);
        let codes: Vec<&str> = app.favorite_countries.iter().map(|c| c.cca3.as_str()).collect();
        assert_eq!(codes, vec!["TCD", "BRA"]);

        // c twice clears
        handle_event(&mut app, &mut tui, &host, TuiEvent::InputChar('c'));
        handle_event(&mut app, &mut tui, &host, TuiEvent::InputChar('c'));
        assert!(app.favorite_countries.is_empty());
        assert!(host.favorites.list_favorites().is_empty());
    }

    #[tokio::test]
    async fn test_filter_form_apply_and_reset() {
        let (mut app, mut tui, host, _rx) = setup();
        handle_event(&mut app, &mut tui, &host, TuiEvent::InputChar('/'));
        assert!(tui.filter_form.is_some());
        for c in "fra".chars() {
            handle_event(&mut app, &mut tui, &host, TuiEvent::InputChar(c));
        }
        handle_event(&mut app, &mut tui, &host, TuiEvent::Submit);
        assert!(tui.filter_form.is_none());
        let names: Vec<&str> = app.view.iter().map(|c| c.name.common.as_str()).collect();
        assert_eq!(names, vec!["France"]);

        handle_event(&mut app, &mut tui, &host, TuiEvent::InputChar('/'));
        handle_event(&mut app, &mut tui, &host, TuiEvent::Reset);
        assert!(app.criteria.is_empty());
        assert_eq!(app.view.len(), 3);
    }

    #[tokio::test]
    async fn test_modal_opens_and_closes() {
        let (mut app, mut tui, host, _rx) = setup();
        handle_event(&mut app, &mut tui, &host, TuiEvent::CursorDown);
        handle_event(&mut app, &mut tui, &host, TuiEvent::Submit);
        assert_eq!(tui.modal.as_ref().unwrap().country.cca3, "FRA");
        // 'q' inside the modal closes it instead of quitting
        assert!(!handle_event(&mut app, &mut tui, &host, TuiEvent::InputChar('q')));
        assert!(tui.modal.is_none());
        assert!(handle_event(&mut app, &mut tui, &host, TuiEvent::InputChar('q')));
    }
}
