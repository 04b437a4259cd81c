//! TMDB (The Movie Database) API client
//!
//! Typed access to the TV endpoints Vertica uses: trending, top rated,
//! airing today, show details, season details and search.
//! API docs: https://developer.themoviedb.org/docs

use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument, warn};

use crate::api::cache::ResponseCache;
use crate::config::Settings;
use crate::models::{Episode, Genre, SeasonDetail, ShowDetail, ShowSummary};

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Response language sent with every request
pub const LANGUAGE: &str = "en-US";

/// TMDB API error types
#[derive(Error, Debug)]
pub enum TmdbError {
    #[error("TMDB credential missing. Add TMDB_API_KEY (v3) or TMDB_ACCESS_TOKEN (v4)")]
    MissingCredential,

    #[error("TMDB {status}")]
    Status { status: u16 },

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl TmdbError {
    /// Upstream HTTP status, when the failure was a non-success response
    pub fn status(&self) -> Option<u16> {
        match self {
            TmdbError::Status { status } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

// =============================================================================
// Credentials
// =============================================================================

/// TMDB credentials: a v3 API key and/or a v4 read access token
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    api_key: Option<String>,
    access_token: Option<String>,
}

/// How a single request is authorized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authorization<'a> {
    Bearer(&'a str),
    ApiKey(&'a str),
}

impl Credentials {
    /// Blank values are treated as unset
    pub fn new(api_key: Option<String>, access_token: Option<String>) -> Self {
        fn present(value: Option<String>) -> Option<String> {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        }

        Self {
            api_key: present(api_key),
            access_token: present(access_token),
        }
    }

    pub fn api_key(key: impl Into<String>) -> Self {
        Self::new(Some(key.into()), None)
    }

    pub fn access_token(token: impl Into<String>) -> Self {
        Self::new(None, Some(token.into()))
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some() || self.access_token.is_some()
    }

    /// Bearer token wins over the API key
    pub fn authorization(&self) -> Result<Authorization<'_>, TmdbError> {
        match (&self.access_token, &self.api_key) {
            (Some(token), _) => Ok(Authorization::Bearer(token)),
            (None, Some(key)) => Ok(Authorization::ApiKey(key)),
            (None, None) => Err(TmdbError::MissingCredential),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

// =============================================================================
// Client
// =============================================================================

/// TMDB API client with a shared response cache
#[derive(Debug)]
pub struct TmdbClient {
    credentials: Credentials,
    base_url: String,
    client: reqwest::Client,
    cache: ResponseCache,
}

impl TmdbClient {
    /// Create a client against the public TMDB API
    pub fn new(credentials: Credentials) -> Self {
        Self::with_base_url(credentials, DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL (for testing)
    pub fn with_base_url(credentials: Credentials, base_url: impl Into<String>) -> Self {
        Self::with_cache(credentials, base_url, ResponseCache::default())
    }

    pub fn with_cache(
        credentials: Credentials,
        base_url: impl Into<String>,
        cache: ResponseCache,
    ) -> Self {
        Self {
            credentials,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            cache,
        }
    }

    /// Build a client from resolved settings
    pub fn from_settings(settings: &Settings) -> Self {
        Self::with_cache(
            settings.credentials.clone(),
            settings.base_url.clone(),
            ResponseCache::new(settings.cache_ttl, settings.cache_capacity),
        )
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }

    /// Request URL without credentials; doubles as the cache key
    fn build_url(&self, endpoint: &str) -> Result<Url, TmdbError> {
        let raw = format!("{}{}", self.base_url, endpoint);
        let mut url = Url::parse(&raw).map_err(|e| TmdbError::InvalidUrl(format!("{}: {}", raw, e)))?;
        url.query_pairs_mut().append_pair("language", LANGUAGE);
        Ok(url)
    }

    /// GET an endpoint and return the decoded JSON body
    ///
    /// Credentials are checked before the cache or the network is touched.
    #[instrument(skip(self))]
    pub async fn fetch_json(&self, endpoint: &str) -> Result<Value, TmdbError> {
        let auth = self.credentials.authorization()?;
        let url = self.build_url(endpoint)?;
        let cache_key = url.to_string();

        if let Some(hit) = self.cache.get(&cache_key) {
            debug!(url = %cache_key, "TMDB cache hit");
            return Ok(hit);
        }

        let mut request_url = url;
        let request = match auth {
            Authorization::Bearer(token) => self.client.get(request_url).bearer_auth(token),
            Authorization::ApiKey(key) => {
                request_url.query_pairs_mut().append_pair("api_key", key);
                self.client.get(request_url)
            }
        };

        debug!(url = %cache_key, "TMDB request");
        let response = request.header("Accept", "application/json").send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), url = %cache_key, "TMDB request failed");
            if status.as_u16() == 401 {
                warn!("Check that the TMDB key/token is correct and matches the auth method (v3 key vs v4 token)");
            }
            return Err(TmdbError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let value: Value = serde_json::from_str(&body)
            .map_err(|e| TmdbError::InvalidResponse(format!("JSON parse error: {}", e)))?;

        self.cache.insert(cache_key, value.clone());
        Ok(value)
    }

    async fn fetch<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, TmdbError> {
        let value = self.fetch_json(endpoint).await?;
        serde_json::from_value(value)
            .map_err(|e| TmdbError::InvalidResponse(format!("{}: {}", endpoint, e)))
    }

    /// Trending TV shows this week
    pub async fn trending_shows(&self) -> Result<Vec<ShowSummary>, TmdbError> {
        let response: ListResponse = self.fetch("/trending/tv/week").await?;
        Ok(response.into_shows())
    }

    pub async fn top_rated_shows(&self) -> Result<Vec<ShowSummary>, TmdbError> {
        let response: ListResponse = self.fetch("/tv/top_rated").await?;
        Ok(response.into_shows())
    }

    pub async fn airing_today_shows(&self) -> Result<Vec<ShowSummary>, TmdbError> {
        let response: ListResponse = self.fetch("/tv/airing_today").await?;
        Ok(response.into_shows())
    }

    /// Get TV show details by ID
    pub async fn show_details(&self, id: u64) -> Result<ShowDetail, TmdbError> {
        let response: TvResponse = self.fetch(&format!("/tv/{}", id)).await?;
        Ok(response.into_detail())
    }

    /// Get episodes for a TV season
    pub async fn season_details(&self, id: u64, season: u32) -> Result<SeasonDetail, TmdbError> {
        let endpoint = format!("/tv/{}/season/{}", id, season);
        let response: SeasonResponse = self.fetch(&endpoint).await?;
        Ok(response.into_season(season))
    }

    /// Search TV shows, returning the upstream body as-is
    ///
    /// A blank query yields `{"results": []}` without a request.
    pub async fn search_shows_raw(&self, query: &str) -> Result<Value, TmdbError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(json!({ "results": [] }));
        }

        let endpoint = format!("/search/tv?query={}", urlencoding::encode(query));
        self.fetch_json(&endpoint).await
    }

    /// Search TV shows by name
    pub async fn search_shows(&self, query: &str) -> Result<Vec<ShowSummary>, TmdbError> {
        let value = self.search_shows_raw(query).await?;
        shows_from_value(value)
    }
}

// =============================================================================
// Response Structures (internal deserialization)
// =============================================================================

#[derive(Debug, Deserialize)]
struct ListResponse {
    #[serde(default)]
    results: Vec<ShowRaw>,
}

impl ListResponse {
    fn into_shows(self) -> Vec<ShowSummary> {
        self.results.into_iter().map(ShowRaw::into_summary).collect()
    }
}

/// Parse a `{results: [...]}` body into show summaries
pub fn shows_from_value(value: Value) -> Result<Vec<ShowSummary>, TmdbError> {
    let response: ListResponse = serde_json::from_value(value)
        .map_err(|e| TmdbError::InvalidResponse(format!("results: {}", e)))?;
    Ok(response.into_shows())
}

#[derive(Debug, Deserialize)]
struct ShowRaw {
    id: u64,
    name: Option<String>,
    original_name: Option<String>,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
    overview: Option<String>,
    vote_average: Option<f32>,
    first_air_date: Option<String>,
}

impl ShowRaw {
    fn into_summary(self) -> ShowSummary {
        ShowSummary {
            id: self.id,
            name: self.name.or(self.original_name).unwrap_or_default(),
            poster_path: self.poster_path,
            backdrop_path: self.backdrop_path,
            overview: self.overview.unwrap_or_default(),
            vote_average: self.vote_average.unwrap_or(0.0),
            first_air_date: non_empty(self.first_air_date),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TvResponse {
    id: u64,
    name: Option<String>,
    poster_path: Option<String>,
    backdrop_path: Option<String>,
    overview: Option<String>,
    vote_average: Option<f32>,
    first_air_date: Option<String>,
    #[serde(default)]
    genres: Vec<GenreRaw>,
    number_of_seasons: Option<u32>,
    number_of_episodes: Option<u32>,
    #[serde(default)]
    episode_run_time: Vec<u32>,
    status: Option<String>,
}

impl TvResponse {
    fn into_detail(self) -> ShowDetail {
        ShowDetail {
            id: self.id,
            name: self.name.unwrap_or_default(),
            poster_path: self.poster_path,
            backdrop_path: self.backdrop_path,
            overview: self.overview.unwrap_or_default(),
            vote_average: self.vote_average.unwrap_or(0.0),
            first_air_date: non_empty(self.first_air_date),
            genres: self
                .genres
                .into_iter()
                .map(|g| Genre {
                    id: g.id,
                    name: g.name,
                })
                .collect(),
            number_of_seasons: self.number_of_seasons.unwrap_or(0),
            number_of_episodes: self.number_of_episodes.unwrap_or(0),
            episode_run_time: self.episode_run_time,
            status: self.status.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenreRaw {
    id: u64,
    name: String,
}

#[derive(Debug, Deserialize)]
struct SeasonResponse {
    season_number: Option<u32>,
    #[serde(default)]
    episodes: Vec<EpisodeRaw>,
}

impl SeasonResponse {
    fn into_season(self, requested: u32) -> SeasonDetail {
        let season_number = self.season_number.unwrap_or(requested);
        SeasonDetail {
            season_number,
            episodes: self
                .episodes
                .into_iter()
                .map(|e| e.into_episode(season_number))
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct EpisodeRaw {
    id: u64,
    name: Option<String>,
    overview: Option<String>,
    still_path: Option<String>,
    episode_number: u32,
    season_number: Option<u32>,
    runtime: Option<u32>,
    air_date: Option<String>,
    vote_average: Option<f32>,
}

impl EpisodeRaw {
    fn into_episode(self, season: u32) -> Episode {
        Episode {
            id: self.id,
            name: self.name.unwrap_or_default(),
            overview: self.overview.unwrap_or_default(),
            still_path: self.still_path,
            episode_number: self.episode_number,
            season_number: self.season_number.unwrap_or(season),
            runtime: self.runtime,
            air_date: non_empty(self.air_date),
            vote_average: self.vote_average.unwrap_or(0.0),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
