//! # Command Line Surface
//!
//! Non-interactive subcommands. Each one runs a single Data Access call (or a
//! favorites operation) and prints plain text, so views can be scripted and
//! shared as query strings.
//!
//! Output goes to any `io::Write`; `main` passes stdout and tests pass a `Vec<u8>`.

use std::io::{self, Write};

use clap::Subcommand;
use log::info;

use crate::api::{self, Country, CountrySource};
use crate::core::favorites::FavoritesStore;
use crate::core::filter::{FilterCriteria, SortKey, ViewState, compute_view};
use crate::core::format::{DetailTab, details, format_population, group_thousands};
use crate::core::insights::top_by_population;

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Print the filtered, sorted list and its query string
    List {
        /// Overrides the sort in --query
        #[arg(long, value_enum)]
        sort: Option<SortKey>,
    },
    /// Print every detail of one country
    Show { code: String },
    /// Toggle a country in the favorites list
    Favorite { code: String },
    /// Print the favorite countries
    Favorites,
    /// Empty the favorites list
    ClearFavorites,
    /// Print the countries of one region
    Region { name: String },
    /// Print the most populous countries
    Ranking {
        #[arg(short = 'n', long)]
        size: Option<usize>,
    },
}

/// What a command needs besides its own arguments.
pub struct Context<'a> {
    pub source: &'a dyn CountrySource,
    pub favorites: &'a FavoritesStore,
    pub criteria: FilterCriteria,
    pub ranking_size: usize,
}

/// Outcome of a command: `NotFound` maps to a non-zero exit status.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Done,
    NotFound,
}

pub async fn execute<W: Write>(
    command: Command,
    ctx: Context<'_>,
    out: &mut W,
) -> io::Result<Outcome> {
    info!("Running command {:?}", command);
    match command {
        Command::List { sort } => {
            let mut criteria = ctx.criteria;
            if sort.is_some() {
                criteria.sort = sort;
            }
            let collection = api::fetch_all(ctx.source).await;
            let view = compute_view(&collection, &criteria);
            match ViewState::classify(true, collection.len(), view.len()) {
                ViewState::Empty => writeln!(out, "No countries available (see atlas.log).")?,
                ViewState::NoResults => writeln!(out, "No countries match these filters.")?,
                _ => write_rows(out, &view, ctx.favorites)?,
            }
            let query = criteria.to_query();
            writeln!(out)?;
            writeln!(out, "{} of {} countries", view.len(), collection.len())?;
            if !query.is_empty() {
                writeln!(out, "query: ?{query}")?;
            }
            Ok(Outcome::Done)
        }
        Command::Show { code } => match api::fetch_one(ctx.source, &code).await {
            Some(country) => {
                write_details(out, &country, ctx.favorites.is_favorite(&country.cca3))?;
                Ok(Outcome::Done)
            }
            None => {
                writeln!(out, "No country matches the code \"{code}\".")?;
                Ok(Outcome::NotFound)
            }
        },
        Command::Favorite { code } => {
            let favorite = ctx.favorites.toggle_favorite(&code).map_err(io::Error::other)?;
            let code = code.trim().to_ascii_uppercase();
            if favorite {
                writeln!(out, "{code} added to favorites")?;
            } else {
                writeln!(out, "{code} removed from favorites")?;
            }
            Ok(Outcome::Done)
        }
        Command::Favorites => {
            let codes = ctx.favorites.list_favorites();
            if codes.is_empty() {
                writeln!(out, "No favorites yet.")?;
                return Ok(Outcome::Done);
            }
            let countries = api::resolve_favorites(ctx.source, &codes).await;
            write_rows(out, &countries, ctx.favorites)?;
            if countries.len() < codes.len() {
                writeln!(
                    out,
                    "({} of {} favorites could not be resolved)",
                    codes.len() - countries.len(),
                    codes.len()
                )?;
            }
            Ok(Outcome::Done)
        }
        Command::ClearFavorites => {
            ctx.favorites.clear_favorites().map_err(io::Error::other)?;
            writeln!(out, "Favorites cleared")?;
            Ok(Outcome::Done)
        }
        Command::Region { name } => {
            let countries = api::fetch_by_region(ctx.source, &name).await;
            if countries.is_empty() {
                writeln!(out, "No countries found in region \"{name}\".")?;
                return Ok(Outcome::NotFound);
            }
            write_rows(out, &countries, ctx.favorites)?;
            Ok(Outcome::Done)
        }
        Command::Ranking { size } => {
            let size = size.filter(|n| *n > 0).unwrap_or(ctx.ranking_size);
            let collection = api::fetch_all(ctx.source).await;
            for (rank, country) in top_by_population(&collection, size).iter().enumerate() {
                writeln!(
                    out,
                    "{:>3}. {:<32} {}",
                    rank + 1,
                    country.name.common,
                    format_population(country.population)
                )?;
            }
            Ok(Outcome::Done)
        }
    }
}

fn write_rows<W: Write>(out: &mut W, countries: &[Country], favorites: &FavoritesStore) -> io::Result<()> {
    let codes = favorites.list_favorites();
    for c in countries {
        let star = if codes.contains(&c.cca3) { "★" } else { " " };
        writeln!(
            out,
            "{star} {:<4}{:<40}{:<10}{:>15}",
            c.cca3,
            c.name.common,
            c.region,
            group_thousands(c.population)
        )?;
    }
    Ok(())
}

fn write_details<W: Write>(out: &mut W, country: &Country, favorite: bool) -> io::Result<()> {
    let star = if favorite { " ★" } else { "" };
    writeln!(out, "{}{star}", country.name.common)?;
    for tab in DetailTab::ALL {
        writeln!(out)?;
        writeln!(out, "[{}]", tab.title())?;
        let rows = details(country, tab);
        let width = rows.iter().map(|(l, _)| l.len()).max().unwrap_or(0);
        for (label, value) in rows {
            writeln!(out, "  {label:<width$}  {value}")?;
        }
    }
    Ok(())
}
