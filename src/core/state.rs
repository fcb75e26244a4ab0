//! # Application State
//!
//! Core business state for Atlas. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── countries: Vec<Country>        // full collection, as fetched
//! ├── loaded: bool                   // collection fetch finished
//! ├── criteria: FilterCriteria       // applied filters (query-string form)
//! ├── view: Vec<Country>             // compute_view(countries, criteria)
//! ├── regions / languages            // filter facets
//! ├── ranking: Vec<Country>          // population top N
//! ├── curiosity: Option<Curiosity>   // random country + fact
//! ├── favorite_codes: Vec<String>    // mirror of the persisted favorites
//! ├── favorite_countries             // resolved favorites (favorites tab)
//! ├── page: Option<CountryPage>      // dedicated country page
//! ├── tab: Tab                       // active tab
//! └── status_message: String         // status bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use crate::api::Country;
use crate::core::filter::{
    FilterCriteria, ViewState, compute_view, distinct_languages, distinct_regions,
};
use crate::core::insights::top_by_population;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Countries,
    Ranking,
    Curiosity,
    Favorites,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Countries, Tab::Ranking, Tab::Curiosity, Tab::Favorites];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Countries => "Countries",
            Tab::Ranking => "Ranking",
            Tab::Curiosity => "Curiosities",
            Tab::Favorites => "Favorites",
        }
    }

    pub fn index(self) -> usize {
        Tab::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    pub fn next(self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    pub fn prev(self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Curiosity {
    pub country: Country,
    pub fact: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageState {
    Loading,
    Found(Box<Country>),
    NotFound,
}

/// The dedicated page for one country, addressed by code.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryPage {
    pub code: String,
    pub state: PageState,
    /// Codes visited before this one (border-hopping), most recent last.
    pub history: Vec<String>,
}

pub struct App {
    pub countries: Vec<Country>,
    pub loaded: bool,
    pub criteria: FilterCriteria,
    pub view: Vec<Country>,
    pub regions: Vec<String>,
    pub languages: Vec<String>,
    pub ranking: Vec<Country>,
    pub ranking_size: usize,
    pub curiosity: Option<Curiosity>,
    pub favorite_codes: Vec<String>,
    pub favorite_countries: Vec<Country>,
    pub favorites_loading: bool,
    pub page: Option<CountryPage>,
    pub tab: Tab,
    pub status_message: String,
}

impl App {
    pub fn new(criteria: FilterCriteria, favorite_codes: Vec<String>, ranking_size: usize) -> Self {
        Self {
            countries: Vec::new(),
            loaded: false,
            criteria,
            view: Vec::new(),
            regions: Vec::new(),
            languages: Vec::new(),
            ranking: Vec::new(),
            ranking_size,
            curiosity: None,
            favorite_codes,
            favorite_countries: Vec::new(),
            favorites_loading: false,
            page: None,
            tab: Tab::default(),
            status_message: String::from("Loading countries..."),
        }
    }

    /// Recomputes every value derived from the collection and criteria.
    pub fn recompute(&mut self) {
        self.view = compute_view(&self.countries, &self.criteria);
    }

    pub fn set_collection(&mut self, countries: Vec<Country>) {
        self.countries = countries;
        self.loaded = true;
        self.regions = distinct_regions(&self.countries);
        self.languages = distinct_languages(&self.countries);
        self.ranking = top_by_population(&self.countries, self.ranking_size);
        self.recompute();
    }

    pub fn view_state(&self) -> ViewState {
        ViewState::classify(self.loaded, self.countries.len(), self.view.len())
    }

    pub fn is_favorite(&self, code: &str) -> bool {
        self.favorite_codes.iter().any(|c| c.eq_ignore_ascii_case(code))
    }
}
