//! OMDb API client wrapper with the search and lookup-by-id calls

use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use serde::Deserialize;
use thiserror::Error;

use crate::config::AppConfig;
use super::types::{ItemDetail, SearchResult};

/// Sentinel OMDb uses for missing values such as posters
const NOT_AVAILABLE: &str = "N/A";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The API answered with `Response: "False"` where a record was required
    #[error("API rejected the request: {0}")]
    Rejected(String),
}

/// Result of a search call that reached the API and got a well-formed answer
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(Vec<SearchResult>),
    /// `Response: "False"` or an empty page, with the API's `Error` text if any
    Rejected(Option<String>),
}

/// The two calls the application makes against the movie API
pub trait MovieApi: Send + Sync {
    fn search<'a>(&'a self, term: &'a str, page: u32) -> BoxFuture<'a, Result<SearchOutcome, ApiError>>;

    fn details<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<ItemDetail, ApiError>>;
}

pub type SharedApi = Arc<dyn MovieApi>;

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Search", default)]
    search: Vec<WireMovie>,
    #[serde(rename = "Error")]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireMovie {
    #[serde(rename = "imdbID")]
    imdb_id: String,
    #[serde(rename = "Title", default)]
    title: String,
    #[serde(rename = "Year", default)]
    year: String,
}

#[derive(Debug, Deserialize)]
struct DetailEnvelope {
    #[serde(rename = "Response", default)]
    response: Option<String>,
    #[serde(rename = "Error")]
    error: Option<String>,
    #[serde(rename = "imdbID", default)]
    imdb_id: String,
    #[serde(rename = "Title", default)]
    title: String,
    #[serde(rename = "Poster")]
    poster: Option<String>,
    #[serde(rename = "Genre", default)]
    genre: String,
    #[serde(rename = "Director", default)]
    director: String,
    #[serde(rename = "Plot", default)]
    plot: String,
}

pub fn parse_search_body(body: &str) -> Result<SearchOutcome, ApiError> {
    let envelope: SearchEnvelope = serde_json::from_str(body)?;

    if envelope.response != "True" || envelope.search.is_empty() {
        return Ok(SearchOutcome::Rejected(envelope.error));
    }

    let results = envelope
        .search
        .into_iter()
        .map(|m| SearchResult {
            id: m.imdb_id,
            title: m.title,
            year: m.year,
        })
        .collect();

    Ok(SearchOutcome::Found(results))
}

/// Parse a lookup response; `requested_id` fills in a missing `imdbID`
pub fn parse_detail_body(body: &str, requested_id: &str) -> Result<ItemDetail, ApiError> {
    let envelope: DetailEnvelope = serde_json::from_str(body)?;

    if envelope.response.as_deref() == Some("False") {
        return Err(ApiError::Rejected(
            envelope.error.unwrap_or_else(|| "no details".to_string()),
        ));
    }

    let poster = envelope
        .poster
        .filter(|p| !p.is_empty() && p != NOT_AVAILABLE);

    Ok(ItemDetail {
        id: if envelope.imdb_id.is_empty() {
            requested_id.to_string()
        } else {
            envelope.imdb_id
        },
        title: envelope.title,
        poster,
        genre: envelope.genre,
        director: envelope.director,
        plot: envelope.plot,
    })
}

/// reqwest-backed client for the OMDb HTTP API
#[derive(Clone)]
pub struct OmdbClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl OmdbClient {
    pub fn new(config: &AppConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    async fn get_body(&self, params: &[(&str, &str)]) -> Result<String, ApiError> {
        let response = self
            .http
            .get(&self.api_url)
            .query(&[("apikey", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status.as_u16()));
        }

        Ok(response.text().await?)
    }
}

impl MovieApi for OmdbClient {
    fn search<'a>(&'a self, term: &'a str, page: u32) -> BoxFuture<'a, Result<SearchOutcome, ApiError>> {
        Box::pin(async move {
            let page = page.to_string();
            let body = self.get_body(&[("s", term), ("page", page.as_str())]).await?;
            parse_search_body(&body)
        })
    }

    fn details<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<ItemDetail, ApiError>> {
        Box::pin(async move {
            let body = self.get_body(&[("i", id)]).await?;
            parse_detail_body(&body, id)
        })
    }
}
