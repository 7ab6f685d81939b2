use async_trait::async_trait;
use reqwest::{Client, redirect};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::config::OmdbConfig;

/// Raw search record as returned by the catalog.
#[derive(Debug, Clone, Deserialize)]
pub struct OmdbMovie {
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Title", default)]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: String,
    #[serde(rename = "Poster", default)]
    pub poster: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OmdbSearchResponse {
    #[serde(rename = "Response", default)]
    pub response: String,
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
    #[serde(rename = "Search", default)]
    pub search: Option<Vec<OmdbMovie>>,
}

impl OmdbSearchResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        !self.response.eq_ignore_ascii_case("false")
    }
}

/// Transport-level failures talking to the catalog.
#[derive(Debug, Error)]
pub enum OmdbError {
    /// The catalog answered with a non-2xx status.
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// Connect failure or timeout; nothing came back.
    #[error("No response from service: {0}")]
    NoResponse(String),

    #[error("Invalid response body: {0}")]
    Decode(String),

    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for OmdbError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() || err.is_request() {
            Self::NoResponse(err.to_string())
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Other(err.to_string())
        }
    }
}

/// Seam between the search service and the catalog, so the cache logic can be
/// exercised without a network.
#[async_trait]
pub trait CatalogSearch: Send + Sync {
    async fn search(&self, query: &str) -> Result<OmdbSearchResponse, OmdbError>;
}

#[derive(Clone)]
pub struct OmdbClient {
    client: Client,
    api_url: String,
    api_key: String,
}

impl OmdbClient {
    pub fn new(config: &OmdbConfig) -> Result<Self, OmdbError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .redirect(redirect::Policy::limited(config.max_redirects))
            .user_agent(concat!("screen-search/", env!("CARGO_PKG_VERSION")))
            .pool_max_idle_per_host(10)
            .build()
            .map_err(|e| OmdbError::Other(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self::with_shared_client(
            client,
            config.api_url.clone(),
            config.api_key.clone(),
        ))
    }

    #[must_use]
    pub const fn with_shared_client(client: Client, api_url: String, api_key: String) -> Self {
        Self {
            client,
            api_url,
            api_key,
        }
    }

    fn search_url(&self, query: &str) -> Result<Url, OmdbError> {
        let mut url = Url::parse(&self.api_url)
            .map_err(|e| OmdbError::Other(format!("Invalid OMDb API URL: {e}")))?;

        url.query_pairs_mut()
            .append_pair("apikey", &self.api_key)
            .append_pair("s", query);

        Ok(url)
    }

    /// Pulls the catalog's own message out of an error body.
    fn error_message(body: &str) -> String {
        serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| {
                v.get("Error")
                    .or_else(|| v.get("message"))
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| "Unknown error".to_string())
    }
}

#[async_trait]
impl CatalogSearch for OmdbClient {
    async fn search(&self, query: &str) -> Result<OmdbSearchResponse, OmdbError> {
        let url = self.search_url(query)?;

        debug!("Searching OMDb for: {}", query);

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(OmdbError::Status {
                status,
                message: Self::error_message(&body),
            });
        }

        let body: OmdbSearchResponse = response.json().await?;
        Ok(body)
    }
}
