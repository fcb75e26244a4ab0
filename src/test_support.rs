//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::api::{ApiError, Country, CountryName, CountrySource, OrderedMap};

/// In-memory country source. Counts calls so tests can assert one request per lookup.
pub struct StubSource {
    countries: Vec<Country>,
    fail: bool,
    calls: AtomicUsize,
}

impl StubSource {
    pub fn new(countries: Vec<Country>) -> Self {
        Self {
            countries,
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    /// A source whose every call fails with a network error.
    pub fn failing() -> Self {
        Self {
            countries: Vec::new(),
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) -> Result<(), ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            Err(ApiError::Network("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CountrySource for StubSource {
    fn name(&self) -> &str {
        "stub"
    }

    async fn all(&self) -> Result<Vec<Country>, ApiError> {
        self.hit()?;
        Ok(self.countries.clone())
    }

    async fn by_code(&self, code: &str) -> Result<Country, ApiError> {
        self.hit()?;
        self.countries
            .iter()
            .find(|c| c.cca3.eq_ignore_ascii_case(code))
            .cloned()
            .ok_or_else(|| ApiError::NotFound(code.to_string()))
    }

    async fn by_region(&self, region: &str) -> Result<Vec<Country>, ApiError> {
        self.hit()?;
        Ok(self
            .countries
            .iter()
            .filter(|c| c.region == region)
            .cloned()
            .collect())
    }
}

/// Builds a country with the fields the filter engine reads.
pub fn country(code: &str, common: &str, region: &str, population: u64, languages: &[&str]) -> Country {
    let languages = if languages.is_empty() {
        None
    } else {
        Some(
            languages
                .iter()
                .enumerate()
                .map(|(i, name)| (format!("l{i}"), name.to_string()))
                .collect::<OrderedMap<_>>(),
        )
    };
    Country {
        name: CountryName {
            common: common.to_string(),
            official: format!("Official {common}"),
        },
        cca3: code.to_string(),
        region: region.to_string(),
        population,
        languages,
        ..Default::default()
    }
}

/// Brazil, France, Chad: in that order.
pub fn sample_countries() -> Vec<Country> {
    let mut brazil = country("BRA", "Brazil", "Americas", 213_000_000, &["Portuguese"]);
    brazil.name.official = "Federative Republic of Brazil".to_string();
    brazil.borders = vec!["ARG".to_string(), "BOL".to_string()];
    brazil.capital = vec!["Brasília".to_string()];
    let mut france = country("FRA", "France", "Europe", 67_000_000, &["French"]);
    france.name.official = "French Republic".to_string();
    france.capital = vec!["Paris".to_string()];
    let mut chad = country("TCD", "Chad", "Africa", 17_000_000, &["Arabic", "French"]);
    chad.name.official = "Republic of Chad".to_string();
    vec![brazil, france, chad]
}
