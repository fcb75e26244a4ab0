//! REST Countries v3.1 client.
//!
//! Endpoints used:
//! - `GET {base}/all?fields=...` (the public API requires a field selection, max ten)
//! - `GET {base}/alpha/{code}` (returns an array; first element wins)
//! - `GET {base}/region/{region}`

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::de::DeserializeOwned;

use super::source::{ApiError, CountrySource};
use super::types::Country;

pub const DEFAULT_BASE_URL: &str = "https://restcountries.com/v3.1";

/// Fields requested from `/all`. Kept to what the list, ranking and curiosity
/// views read; the modal and country page fetch the full record by code.
pub const LIST_FIELDS: &str =
    "name,cca3,region,subregion,population,languages,currencies,capital,borders,flags";

pub struct RestCountriesClient {
    base_url: String,
    client: reqwest::Client,
}

impl RestCountriesClient {
    pub fn new(base_url: Option<String>) -> Self {
        let base_url = base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    #[cfg(test)]
    fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issues one GET and decodes the JSON body.
    /// A 404 becomes `NotFound(what)` so callers can tell it apart from outages.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: String,
        what: &str,
    ) -> Result<T, ApiError> {
        debug!("GET {}", url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(what.to_string()));
        }
        if !status.is_success() {
            warn!("REST Countries returned {} for {}", status, url);
            return Err(ApiError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl CountrySource for RestCountriesClient {
    fn name(&self) -> &str {
        "restcountries"
    }

    async fn all(&self) -> Result<Vec<Country>, ApiError> {
        let url = format!("{}/all?fields={}", self.base_url, LIST_FIELDS);
        let countries: Vec<Country> = self.get_json(url, "all countries").await?;
        info!("Fetched {} countries", countries.len());
        Ok(countries)
    }

    async fn by_code(&self, code: &str) -> Result<Country, ApiError> {
        let url = format!("{}/alpha/{}", self.base_url, urlencoding::encode(code));
        let mut matches: Vec<Country> = self.get_json(url, code).await?;
        if matches.is_empty() {
            return Err(ApiError::NotFound(code.to_string()));
        }
        Ok(matches.swap_remove(0))
    }

    async fn by_region(&self, region: &str) -> Result<Vec<Country>, ApiError> {
        let url = format!("{}/region/{}", self.base_url, urlencoding::encode(region));
        let countries: Vec<Country> = self.get_json(url, region).await?;
        info!("Fetched {} countries in region {}", countries.len(), region);
        Ok(countries)
    }
}
