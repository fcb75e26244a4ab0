pub mod access;
pub mod client;
pub mod source;
pub mod types;

pub use access::{fetch_all, fetch_by_region, fetch_one, resolve_favorites};
pub use client::RestCountriesClient;
pub use source::{ApiError, CountrySource};
pub use types::{Country, CountryName, Currency, OrderedMap};
