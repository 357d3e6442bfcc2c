//! TMDB (The Movie Database) API client
//!
//! Trending, genre discovery, multi-search, genre listing and trailer lookup.
//! API docs: https://developer.themoviedb.org/docs

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use super::CatalogGateway;
use crate::models::{BrowseQuery, BrowseResult, CatalogItem, Fetch, Genre, MediaKind};

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// TMDB API error types
#[derive(Error, Debug)]
pub enum TmdbError {
    #[error("Resource not found (404)")]
    NotFound,

    #[error("Invalid API key (401)")]
    Unauthorized,

    #[error("Rate limited (429), retries exhausted")]
    RateLimited,

    #[error("Server error: {0}")]
    ServerError(u16),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, TmdbError>;

/// TMDB API client
pub struct TmdbClient {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
    max_retries: u32,
}

impl TmdbClient {
    /// Create a new TMDB client with the given API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL (for testing)
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            max_retries: 3,
        }
    }

    /// Make a keyed GET request with retry logic for rate limits
    async fn get<T: for<'de> Deserialize<'de>>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, endpoint);
        let mut retries = 0;

        let mut query: Vec<(&str, String)> = vec![
            ("api_key", self.api_key.clone()),
            ("language", "en-US".to_string()),
        ];
        query.extend(params.iter().cloned());

        loop {
            tracing::debug!(endpoint, "TMDB request");
            let response = self
                .client
                .get(&url)
                .query(&query)
                .header("Accept", "application/json")
                .send()
                .await?;

            match response.status() {
                StatusCode::OK => {
                    let body = response.text().await?;
                    return serde_json::from_str(&body).map_err(|e| {
                        TmdbError::InvalidResponse(format!("JSON parse error: {}", e))
                    });
                }
                StatusCode::NOT_FOUND => return Err(TmdbError::NotFound),
                StatusCode::UNAUTHORIZED => return Err(TmdbError::Unauthorized),
                StatusCode::TOO_MANY_REQUESTS => {
                    retries += 1;
                    if retries >= self.max_retries {
                        return Err(TmdbError::RateLimited);
                    }

                    // Retry-After header or exponential backoff
                    let wait_secs = response
                        .headers()
                        .get("Retry-After")
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .unwrap_or(2u64.pow(retries));

                    tracing::warn!(endpoint, wait_secs, "TMDB rate limited, backing off");
                    tokio::time::sleep(Duration::from_secs(wait_secs)).await;
                    continue;
                }
                status => return Err(TmdbError::ServerError(status.as_u16())),
            }
        }
    }

    /// Globally trending movies and series for the current week
    pub async fn trending(&self, page: u32) -> Result<BrowseResult> {
        let response: PagedResponse = self
            .get("/trending/all/week", &[("page", page.to_string())])
            .await?;
        Ok(response.into_browse_result())
    }

    /// Movies matching a genre filter
    pub async fn by_genre(&self, genre_id: u64, page: u32) -> Result<BrowseResult> {
        let response: PagedResponse = self
            .get(
                "/discover/movie",
                &[
                    ("with_genres", genre_id.to_string()),
                    ("page", page.to_string()),
                ],
            )
            .await?;
        Ok(response.into_browse_result())
    }

    /// Free-text search across movies and series.
    ///
    /// A blank query returns an empty page without calling the API.
    pub async fn search(&self, query: &str, page: u32) -> Result<BrowseResult> {
        if query.trim().is_empty() {
            return Ok(BrowseResult::empty());
        }
        let response: PagedResponse = self
            .get(
                "/search/multi",
                &[
                    ("query", query.to_string()),
                    ("page", page.to_string()),
                    ("include_adult", "false".to_string()),
                ],
            )
            .await?;
        Ok(response.into_browse_result())
    }

    /// Available movie genre filters
    pub async fn genres(&self) -> Result<Vec<Genre>> {
        let response: GenreListResponse = self.get("/genre/movie/list", &[]).await?;
        Ok(response.genres)
    }

    /// Embed URL of the first YouTube trailer or teaser for an item
    pub async fn resolve_trailer(&self, kind: MediaKind, id: u64) -> Result<Option<String>> {
        let endpoint = format!("/{}/{}/videos", kind.path_segment(), id);
        let response: VideosResponse = self.get(&endpoint, &[]).await?;
        Ok(pick_trailer(&response.results))
    }

    /// Single movie or series by id, for adding to the watchlist by id
    pub async fn details(&self, kind: MediaKind, id: u64) -> Result<CatalogItem> {
        let endpoint = format!("/{}/{}", kind.path_segment(), id);
        let mut raw: CatalogItemRaw = self.get(&endpoint, &[]).await?;
        raw.media_type = Some(kind.path_segment().to_string());
        raw.into_item()
            .ok_or_else(|| TmdbError::InvalidResponse(format!("{} {} is not a catalog item", kind, id)))
    }

    /// Run any browse query
    pub async fn browse(&self, query: &BrowseQuery, page: u32) -> Result<BrowseResult> {
        match query {
            BrowseQuery::Trending => self.trending(page).await,
            BrowseQuery::Genre(id) => self.by_genre(*id, page).await,
            BrowseQuery::Search(q) => self.search(q, page).await,
        }
    }
}

#[async_trait]
impl CatalogGateway for TmdbClient {
    async fn browse(&self, query: &BrowseQuery, page: u32) -> Fetch<BrowseResult> {
        match TmdbClient::browse(self, query, page).await {
            Ok(result) => Fetch::from_page(result),
            Err(e) => {
                tracing::warn!(query = %query, page, error = %e, "Catalog browse failed");
                Fetch::Failed(e.to_string())
            }
        }
    }

    async fn genres(&self) -> Fetch<Vec<Genre>> {
        match TmdbClient::genres(self).await {
            Ok(genres) => Fetch::from_list(genres),
            Err(e) => {
                tracing::warn!(error = %e, "Genre listing failed");
                Fetch::Failed(e.to_string())
            }
        }
    }

    async fn resolve_trailer(&self, kind: MediaKind, id: u64) -> Option<String> {
        match TmdbClient::resolve_trailer(self, kind, id).await {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!(kind = kind.path_segment(), id, error = %e, "Trailer lookup failed");
                None
            }
        }
    }
}

// =============================================================================
// Response Structures (internal deserialization)
// =============================================================================

#[derive(Debug, Deserialize)]
struct PagedResponse {
    results: Vec<CatalogItemRaw>,
    #[serde(default = "first_page")]
    page: u32,
    #[serde(default = "first_page")]
    total_pages: u32,
}

fn first_page() -> u32 {
    1
}

impl PagedResponse {
    fn into_browse_result(self) -> BrowseResult {
        BrowseResult {
            items: self
                .results
                .into_iter()
                .filter_map(CatalogItemRaw::into_item)
                .collect(),
            page: self.page.max(1),
            // Empty searches report zero pages
            total_pages: self.total_pages.max(1),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CatalogItemRaw {
    id: u64,
    media_type: Option<String>,
    // Movies use "title", TV uses "name"
    title: Option<String>,
    name: Option<String>,
    // Movies use "release_date", TV uses "first_air_date"
    release_date: Option<String>,
    first_air_date: Option<String>,
    overview: Option<String>,
    poster_path: Option<String>,
    vote_average: Option<f32>,
}

impl CatalogItemRaw {
    fn into_item(self) -> Option<CatalogItem> {
        let media_type = MediaKind::resolve(self.media_type.as_deref(), self.title.is_some())?;
        let title = self.title.or(self.name).unwrap_or_default();
        let release_date = self
            .release_date
            .or(self.first_air_date)
            .filter(|d| !d.is_empty());

        Some(CatalogItem {
            id: self.id,
            media_type,
            title,
            poster_path: self.poster_path,
            overview: self.overview.filter(|o| !o.is_empty()),
            release_date,
            vote_average: self.vote_average,
        })
    }
}

#[derive(Debug, Deserialize)]
struct GenreListResponse {
    #[serde(default)]
    genres: Vec<Genre>,
}

#[derive(Debug, Deserialize)]
struct VideosResponse {
    #[serde(default)]
    results: Vec<VideoRaw>,
}

#[derive(Debug, Deserialize)]
struct VideoRaw {
    key: String,
    site: String,
    #[serde(rename = "type")]
    kind: String,
}

/// First YouTube "Trailer" or "Teaser", as an embed URL
fn pick_trailer(videos: &[VideoRaw]) -> Option<String> {
    videos
        .iter()
        .find(|v| v.site == "YouTube" && (v.kind == "Trailer" || v.kind == "Teaser"))
        .map(|v| {
            format!(
                "https://www.youtube.com/embed/{}",
                urlencoding::encode(&v.key)
            )
        })
}
