//! Population ranking and the "curiosity" random pick.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::api::Country;
use crate::core::format::{format_languages, format_population};

pub const DEFAULT_RANKING_SIZE: usize = 10;

/// The `n` most populous records, largest first. Ties keep collection order.
pub fn top_by_population(collection: &[Country], n: usize) -> Vec<Country> {
    let mut ranked: Vec<&Country> = collection.iter().collect();
    ranked.sort_by(|a, b| b.population.cmp(&a.population));
    ranked.into_iter().take(n).cloned().collect()
}

/// Short sentences about a country, for the curiosity card.
pub fn facts(country: &Country) -> Vec<String> {
    let name = &country.name.common;
    let mut facts = vec![
        format!("{name} has a population of {}.", format_population(country.population)),
        format!(
            "The capital of {name} is {}.",
            country.first_capital().unwrap_or("not defined")
        ),
    ];
    match country.subregion.as_deref() {
        Some(sub) if !sub.is_empty() => {
            facts.push(format!("{name} is located in {}, {sub}.", country.region))
        }
        _ => facts.push(format!("{name} is located in {}.", country.region)),
    }
    if country.languages.as_ref().is_some_and(|l| !l.is_empty()) {
        facts.push(format!("In {name}, people speak {}.", format_languages(country)));
    }
    if country.borders.is_empty() {
        facts.push(format!("{name} does not border any country."));
    } else {
        facts.push(format!("{name} borders {} countries.", country.borders.len()));
    }
    facts
}

/// A random record and one random fact about it.
pub fn random_curiosity<'a, R: Rng + ?Sized>(
    collection: &'a [Country],
    rng: &mut R,
) -> Option<(&'a Country, String)> {
    let country = collection.choose(rng)?;
    let fact = facts(country).choose(rng).cloned()?;
    Some((country, fact))
}
