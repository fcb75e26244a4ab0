//! # Filter/Sort Engine
//!
//! The visible list is always `compute_view(collection, criteria)`: a full
//! re-filter and re-sort from the loaded collection. Nothing edits a view in
//! place. The host calls it again whenever the collection or any criterion
//! changes.
//!
//! ```text
//! collection ──▶ search ──▶ region ──▶ language ──▶ stable sort ──▶ view
//! ```
//!
//! Criteria round-trip through a query string (`search`, `region`,
//! `language`, `sort`), which is the only persisted form of "current view".

use std::collections::BTreeSet;
use std::fmt;

use clap::ValueEnum;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::api::Country;
use crate::core::collate::{compare_names, contains_ignore_case};

/// Region/language value meaning "no constraint".
pub const ALL: &str = "all";

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    NameAsc,
    NameDesc,
    PopulationAsc,
    PopulationDesc,
}

impl SortKey {
    pub const CYCLE: [SortKey; 4] = [
        SortKey::NameAsc,
        SortKey::NameDesc,
        SortKey::PopulationDesc,
        SortKey::PopulationAsc,
    ];

    /// Query-string value. Unknown values (the UI's "default" included) mean no sort.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "name-asc" => Some(SortKey::NameAsc),
            "name-desc" => Some(SortKey::NameDesc),
            "population-asc" => Some(SortKey::PopulationAsc),
            "population-desc" => Some(SortKey::PopulationDesc),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::NameAsc => "name-asc",
            SortKey::NameDesc => "name-desc",
            SortKey::PopulationAsc => "population-asc",
            SortKey::PopulationDesc => "population-desc",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::NameAsc => "Name (A-Z)",
            SortKey::NameDesc => "Name (Z-A)",
            SortKey::PopulationAsc => "Population (low-high)",
            SortKey::PopulationDesc => "Population (high-low)",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The (search, region, language, sort) tuple that defines the current view.
/// `None` means no constraint on that dimension.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub search: Option<String>,
    pub region: Option<String>,
    pub language: Option<String>,
    pub sort: Option<SortKey>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        *self == FilterCriteria::default()
    }

    /// Parses `search=..&region=..&language=..&sort=..` (leading `?` allowed).
    /// Empty values and unknown keys are ignored; `+` decodes to a space.
    pub fn from_query(query: &str) -> Self {
        let mut criteria = FilterCriteria::default();
        let query = query.strip_prefix('?').unwrap_or(query);
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, raw) = pair.split_once('=').unwrap_or((pair, ""));
            let value = decode_component(raw);
            if value.is_empty() {
                continue;
            }
            match key {
                "search" => criteria.search = Some(value),
                "region" => criteria.region = Some(value),
                "language" => criteria.language = Some(value),
                "sort" => criteria.sort = SortKey::parse(&value),
                other => debug!("Ignoring unknown query parameter: {}", other),
            }
        }
        criteria
    }

    /// Encodes the criteria in the fixed parameter order. Absent or empty
    /// values are omitted, so default criteria encode to an empty string.
    pub fn to_query(&self) -> String {
        let pairs = [
            ("search", self.search.as_deref()),
            ("region", self.region.as_deref()),
            ("language", self.language.as_deref()),
            ("sort", self.sort.map(SortKey::as_str)),
        ];
        pairs
            .into_iter()
            .filter_map(|(key, value)| {
                value
                    .filter(|v| !v.is_empty())
                    .map(|v| format!("{key}={}", urlencoding::encode(v)))
            })
            .collect::<Vec<_>>()
            .join("&")
    }

    fn active_search(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.is_empty())
    }

    fn active_region(&self) -> Option<&str> {
        self.region.as_deref().filter(|r| !r.is_empty() && *r != ALL)
    }

    fn active_language(&self) -> Option<&str> {
        self.language.as_deref().filter(|l| !l.is_empty() && *l != ALL)
    }

    /// True when `country` passes every active predicate.
    pub fn matches(&self, country: &Country) -> bool {
        if let Some(search) = self.active_search()
            && !contains_ignore_case(&country.name.common, search)
            && !contains_ignore_case(&country.name.official, search)
        {
            return false;
        }
        if let Some(region) = self.active_region()
            && country.region != region
        {
            return false;
        }
        if let Some(language) = self.active_language()
            && !country
                .language_names()
                .any(|name| contains_ignore_case(name, language))
        {
            return false;
        }
        true
    }
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}

/// Derives the visible, ordered subset of `collection`.
///
/// Sorting is stable: population ties and equal names keep collection order.
/// Without a sort key the collection order is kept as-is.
pub fn compute_view(collection: &[Country], criteria: &FilterCriteria) -> Vec<Country> {
    let mut view: Vec<Country> = collection
        .iter()
        .filter(|c| criteria.matches(c))
        .cloned()
        .collect();

    match criteria.sort {
        Some(SortKey::NameAsc) => view.sort_by(|a, b| compare_names(&a.name.common, &b.name.common)),
        Some(SortKey::NameDesc) => view.sort_by(|a, b| compare_names(&b.name.common, &a.name.common)),
        Some(SortKey::PopulationAsc) => view.sort_by_key(|c| c.population),
        Some(SortKey::PopulationDesc) => view.sort_by(|a, b| b.population.cmp(&a.population)),
        None => {}
    }

    debug!(
        "compute_view: {} of {} records ({})",
        view.len(),
        collection.len(),
        criteria.to_query()
    );
    view
}

/// What the list area should show.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewState {
    /// The collection has not arrived yet.
    Loading,
    /// The collection arrived empty (or the fetch failed).
    Empty,
    /// Records exist but none pass the criteria.
    NoResults,
    /// `n` records to show.
    Results(usize),
}

impl ViewState {
    pub fn classify(loaded: bool, collection_len: usize, view_len: usize) -> Self {
        match (loaded, collection_len, view_len) {
            (false, _, _) => ViewState::Loading,
            (true, 0, _) => ViewState::Empty,
            (true, _, 0) => ViewState::NoResults,
            (true, _, n) => ViewState::Results(n),
        }
    }
}

/// Sorted, de-duplicated non-empty regions.
pub fn distinct_regions(collection: &[Country]) -> Vec<String> {
    collection
        .iter()
        .map(|c| c.region.as_str())
        .filter(|r| !r.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Sorted, de-duplicated language names across every record.
pub fn distinct_languages(collection: &[Country]) -> Vec<String> {
    collection
        .iter()
        .flat_map(Country::language_names)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
