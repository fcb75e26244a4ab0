//! # Data Access
//!
//! Infallible wrappers over a [`CountrySource`]. Every failure (network,
//! status, decode, not-found) is logged and turned into an empty list or
//! `None`; callers never see an error value.
//!
//! ```text
//! fetch_all ──────────┐
//! fetch_one ──────────┼──▶ CountrySource ──▶ one HTTP request
//! fetch_by_region ────┘
//!
//! resolve_favorites ──▶ join_all([fetch_one; N]) ──▶ drop None, keep order
//! ```

use futures::future::join_all;
use log::{debug, error, info};

use super::source::{ApiError, CountrySource};
use super::types::Country;

fn report(operation: &str, source: &dyn CountrySource, err: &ApiError) {
    error!("{} via {} failed: {}", operation, source.name(), err);
}

/// All countries, or an empty list if anything goes wrong.
pub async fn fetch_all(source: &dyn CountrySource) -> Vec<Country> {
    match source.all().await {
        Ok(countries) => countries,
        Err(e) => {
            report("fetch_all", source, &e);
            Vec::new()
        }
    }
}

/// One country by three-letter code, or `None` if absent or unreachable.
pub async fn fetch_one(source: &dyn CountrySource, code: &str) -> Option<Country> {
    match source.by_code(code).await {
        Ok(country) => Some(country),
        Err(e) => {
            report(&format!("fetch_one({code})"), source, &e);
            None
        }
    }
}

/// Countries in `region`, or an empty list if anything goes wrong.
pub async fn fetch_by_region(source: &dyn CountrySource, region: &str) -> Vec<Country> {
    match source.by_region(region).await {
        Ok(countries) => countries,
        Err(e) => {
            report(&format!("fetch_by_region({region})"), source, &e);
            Vec::new()
        }
    }
}

/// Looks up every identifier concurrently and waits for all of them.
///
/// Lookups that come back absent are dropped; the rest keep the order of
/// `codes` regardless of which request finished first.
pub async fn resolve_favorites(source: &dyn CountrySource, codes: &[String]) -> Vec<Country> {
    debug!("Resolving {} favorites", codes.len());
    let lookups = codes.iter().map(|code| fetch_one(source, code));
    let resolved: Vec<Country> = join_all(lookups).await.into_iter().flatten().collect();
    if resolved.len() < codes.len() {
        info!(
            "Resolved {} of {} favorites; the rest were not found",
            resolved.len(),
            codes.len()
        );
    }
    resolved
}
