//! # Actions
//!
//! Everything that can happen in Atlas becomes an `Action`.
//! User applies filters? That's `Action::ApplyFilters(criteria)`.
//! The API responds? That's `Action::CountriesLoaded(countries)`.
//!
//! The `update()` function takes the current state and an action, mutates the
//! state, and returns an `Effect` describing any I/O the host must perform.
//! No side effects here: fetching and persisting happen in the adapter.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Toggling a favorite and navigating to the favorites tab are separate
//! actions; one never implies the other.

use log::debug;

use crate::api::Country;
use crate::core::filter::FilterCriteria;
use crate::core::state::{App, CountryPage, Curiosity, PageState, Tab};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The full collection arrived (empty on failure).
    CountriesLoaded(Vec<Country>),
    ApplyFilters(FilterCriteria),
    ResetFilters,
    ShowTab(Tab),
    /// Request a favorite flip for a code.
    ToggleFavorite(String),
    /// The store persisted a flip.
    FavoriteToggled { code: String, favorite: bool },
    ClearFavorites,
    FavoritesCleared,
    FavoritesResolved(Vec<Country>),
    /// Persisting favorites failed; message for the status bar.
    StorageFailed(String),
    /// Open the dedicated page for a code (also used to follow a border).
    OpenCountry(String),
    /// Step back through border-hopping history, or close the page.
    BackFromCountry,
    CloseCountry,
    CountryLoaded { code: String, country: Option<Country> },
    RollCuriosity,
    CuriosityPicked(Option<Curiosity>),
    Quit,
}

/// I/O the host performs after an update.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    Quit,
    FetchCountry(String),
    ResolveFavorites(Vec<String>),
    PersistToggle(String),
    PersistClear,
    PickCuriosity,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", ActionName(&action));
    match action {
        Action::CountriesLoaded(countries) => {
            app.set_collection(countries);
            app.status_message = if app.countries.is_empty() {
                "No countries available".to_string()
            } else {
                format!("{} countries", app.countries.len())
            };
            Effect::PickCuriosity
        }
        Action::ApplyFilters(criteria) => {
            app.criteria = criteria;
            app.recompute();
            app.status_message = format!("{} of {} countries", app.view.len(), app.countries.len());
            Effect::None
        }
        Action::ResetFilters => {
            app.criteria = FilterCriteria::default();
            app.recompute();
            app.status_message = "Filters cleared".to_string();
            Effect::None
        }
        Action::ShowTab(tab) => {
            app.tab = tab;
            if tab == Tab::Favorites {
                app.favorites_loading = true;
                Effect::ResolveFavorites(app.favorite_codes.clone())
            } else {
                Effect::None
            }
        }
        Action::ToggleFavorite(code) => Effect::PersistToggle(code),
        Action::FavoriteToggled { code, favorite } => {
            if favorite {
                if !app.is_favorite(&code) {
                    app.favorite_codes.push(code.clone());
                }
                app.status_message = format!("Added {code} to favorites");
                if app.tab == Tab::Favorites {
                    app.favorites_loading = true;
                    return Effect::ResolveFavorites(app.favorite_codes.clone());
                }
            } else {
                app.favorite_codes.retain(|c| !c.eq_ignore_ascii_case(&code));
                app.favorite_countries.retain(|c| !c.cca3.eq_ignore_ascii_case(&code));
                app.status_message = format!("Removed {code} from favorites");
            }
            Effect::None
        }
        Action::ClearFavorites => Effect::PersistClear,
        Action::FavoritesCleared => {
            app.favorite_codes.clear();
            app.favorite_countries.clear();
            app.status_message = "Favorites cleared".to_string();
            Effect::None
        }
        Action::FavoritesResolved(mut countries) => {
            // Removals made while the lookups were in flight still apply
            countries.retain(|c| app.is_favorite(&c.cca3));
            app.favorite_countries = countries;
            app.favorites_loading = false;
            Effect::None
        }
        Action::StorageFailed(message) => {
            app.status_message = format!("Could not save favorites: {message}");
            Effect::None
        }
        Action::OpenCountry(code) => {
            let code = code.trim().to_ascii_uppercase();
            let history = match app.page.take() {
                Some(mut previous) => {
                    previous.history.push(previous.code);
                    previous.history
                }
                None => Vec::new(),
            };
            app.page = Some(CountryPage {
                code: code.clone(),
                state: PageState::Loading,
                history,
            });
            Effect::FetchCountry(code)
        }
        Action::BackFromCountry => {
            let Some(mut page) = app.page.take() else {
                return Effect::None;
            };
            match page.history.pop() {
                Some(previous) => {
                    app.page = Some(CountryPage {
                        code: previous.clone(),
                        state: PageState::Loading,
                        history: page.history,
                    });
                    Effect::FetchCountry(previous)
                }
                None => Effect::None,
            }
        }
        Action::CloseCountry => {
            app.page = None;
            Effect::None
        }
        Action::CountryLoaded { code, country } => {
            match app.page.as_mut() {
                Some(page) if page.code == code => {
                    page.state = match country {
                        Some(c) => PageState::Found(Box::new(c)),
                        None => PageState::NotFound,
                    };
                }
                _ => debug!("Dropping stale country result for {}", code),
            }
            Effect::None
        }
        Action::RollCuriosity => Effect::PickCuriosity,
        Action::CuriosityPicked(curiosity) => {
            app.curiosity = curiosity;
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

/// Logs the variant without dumping whole collections.
struct ActionName<'a>(&'a Action);

impl std::fmt::Debug for ActionName<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Action::CountriesLoaded(c) => write!(f, "CountriesLoaded({} records)", c.len()),
            Action::FavoritesResolved(c) => write!(f, "FavoritesResolved({} records)", c.len()),
            Action::CountryLoaded { code, country } => {
                write!(f, "CountryLoaded({code}, found={})", country.is_some())
            }
            Action::CuriosityPicked(c) => write!(f, "CuriosityPicked({})", c.is_some()),
            other => write!(f, "{other:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::filter::{SortKey, ViewState};
    use crate::test_support::sample_countries;

    fn loaded_app() -> App {
        let mut app = App::new(FilterCriteria::default(), Vec::new(), 10);
        update(&mut app, Action::CountriesLoaded(sample_countries()));
        app
    }

    #[test]
    fn test_countries_loaded_requests_curiosity() {
        let mut app = App::new(FilterCriteria::default(), Vec::new(), 10);
        let effect = update(&mut app, Action::CountriesLoaded(sample_countries()));
        assert_eq!(effect, Effect::PickCuriosity);
        assert_eq!(app.view.len(), 3);
        assert_eq!(app.status_message, "3 countries");
    }

    #[test]
    fn test_failed_load_is_empty_state() {
        let mut app = App::new(FilterCriteria::default(), Vec::new(), 10);
        update(&mut app, Action::CountriesLoaded(Vec::new()));
        assert_eq!(app.view_state(), ViewState::Empty);
    }

    #[test]
    fn test_apply_filters_recomputes_from_scratch() {
        let mut app = loaded_app();
        update(
            &mut app,
            Action::ApplyFilters(FilterCriteria {
                search: Some("zzz".to_string()),
                ..Default::default()
            }),
        );
        assert_eq!(app.view_state(), ViewState::NoResults);
        update(
            &mut app,
            Action::ApplyFilters(FilterCriteria {
                sort: Some(SortKey::PopulationAsc),
                ..Default::default()
            }),
        );
        let codes: Vec<&str> = app.view.iter().map(|c| c.cca3.as_str()).collect();
        assert_eq!(codes, vec!["TCD", "FRA", "BRA"]);
        update(&mut app, Action::ResetFilters);
        assert_eq!(app.view, app.countries);
    }

    #[test]
    fn test_toggle_does_not_navigate() {
        let mut app = loaded_app();
        let effect = update(&mut app, Action::ToggleFavorite("BRA".to_string()));
        assert_eq!(effect, Effect::PersistToggle("BRA".to_string()));
        assert_eq!(app.tab, Tab::Countries);
        update(
            &mut app,
            Action::FavoriteToggled {
                code: "BRA".to_string(),
                favorite: true,
            },
        );
        assert!(app.is_favorite("BRA"));
        assert_eq!(app.tab, Tab::Countries);
    }

    #[test]
    fn test_show_favorites_tab_resolves() {
        let mut app = App::new(FilterCriteria::default(), vec!["FRA".to_string()], 10);
        let effect = update(&mut app, Action::ShowTab(Tab::Favorites));
        assert_eq!(effect, Effect::ResolveFavorites(vec!["FRA".to_string()]));
        assert!(app.favorites_loading);
        update(&mut app, Action::FavoritesResolved(vec![sample_countries()[1].clone()]));
        assert!(!app.favorites_loading);
        assert_eq!(app.favorite_countries.len(), 1);
    }

    #[test]
    fn test_unfavorite_removes_from_resolved_list() {
        let mut app = App::new(FilterCriteria::default(), vec!["FRA".to_string()], 10);
        app.favorite_countries = vec![sample_countries()[1].clone()];
        update(
            &mut app,
            Action::FavoriteToggled {
                code: "FRA".to_string(),
                favorite: false,
            },
        );
        assert!(app.favorite_codes.is_empty());
        assert!(app.favorite_countries.is_empty());
    }

    #[test]
    fn test_late_resolution_skips_country_removed_meanwhile() {
        let codes = vec!["BRA".to_string(), "FRA".to_string()];
        let mut app = App::new(FilterCriteria::default(), codes.clone(), 10);
        let effect = update(&mut app, Action::ShowTab(Tab::Favorites));
        assert_eq!(effect, Effect::ResolveFavorites(codes));

        update(
            &mut app,
            Action::FavoriteToggled {
                code: "FRA".to_string(),
                favorite: false,
            },
        );
        let samples = sample_countries();
        update(
            &mut app,
            Action::FavoritesResolved(vec![samples[0].clone(), samples[1].clone()]),
        );

        assert_eq!(app.favorite_codes, vec!["BRA"]);
        let shown: Vec<&str> = app.favorite_countries.iter().map(|c| c.cca3.as_str()).collect();
        assert_eq!(shown, vec!["BRA"]);
        assert!(!app.favorites_loading);
    }

    #[test]
    fn test_clear_favorites_round_trip() {
        let mut app = App::new(FilterCriteria::default(), vec!["FRA".to_string()], 10);
        assert_eq!(update(&mut app, Action::ClearFavorites), Effect::PersistClear);
        assert!(!app.favorite_codes.is_empty());
        update(&mut app, Action::FavoritesCleared);
        assert!(app.favorite_codes.is_empty());
    }

    #[test]
    fn test_country_page_lifecycle_and_stale_results() {
        let mut app = loaded_app();
        assert_eq!(
            update(&mut app, Action::OpenCountry("bra".to_string())),
            Effect::FetchCountry("BRA".to_string())
        );
        update(&mut app, Action::OpenCountry("ARG".to_string()));
        // Brazil's answer arrives after the user moved on to Argentina
        update(
            &mut app,
            Action::CountryLoaded {
                code: "BRA".to_string(),
                country: Some(sample_countries()[0].clone()),
            },
        );
        let page = app.page.as_ref().unwrap();
        assert_eq!(page.code, "ARG");
        assert_eq!(page.state, PageState::Loading);
        assert_eq!(page.history, vec!["BRA"]);

        update(
            &mut app,
            Action::CountryLoaded {
                code: "ARG".to_string(),
                country: None,
            },
        );
        assert_eq!(app.page.as_ref().unwrap().state, PageState::NotFound);

        assert_eq!(
            update(&mut app, Action::BackFromCountry),
            Effect::FetchCountry("BRA".to_string())
        );
        assert!(app.page.as_ref().unwrap().history.is_empty());
        assert_eq!(update(&mut app, Action::BackFromCountry), Effect::None);
        assert!(app.page.is_none());
    }

    #[test]
    fn test_quit() {
        let mut app = loaded_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
