use std::fmt;

use async_trait::async_trait;

use super::types::Country;

/// Errors a country source can report.
/// Data access collapses all of these into empty/absent results.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The request never got a response (DNS, connection refused, TLS).
    Network(String),
    /// The API answered with a non-success status.
    Status { status: u16, url: String },
    /// The body was not the JSON shape we expect.
    Decode(String),
    /// The identifier or region has no match.
    NotFound(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Status { status, url } => write!(f, "HTTP {status} from {url}"),
            ApiError::Decode(msg) => write!(f, "decode error: {msg}"),
            ApiError::NotFound(what) => write!(f, "not found: {what}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Anything that can answer the three country lookups.
///
/// Each call maps to exactly one upstream request. Implementations must not
/// retry or cache.
#[async_trait]
pub trait CountrySource: Send + Sync {
    /// Returns the name of the source, for logs.
    fn name(&self) -> &str;

    /// Every known country.
    async fn all(&self) -> Result<Vec<Country>, ApiError>;

    /// A single country by its three-letter code.
    async fn by_code(&self, code: &str) -> Result<Country, ApiError>;

    /// Every country whose region equals `region`.
    async fn by_region(&self, region: &str) -> Result<Vec<Country>, ApiError>;
}
