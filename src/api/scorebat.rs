//! ScoreBat video API client
//!
//! Fetches the football highlight feed. No pagination, no filtering.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

use super::SportsGateway;
use crate::models::{Fetch, Highlight, HighlightVideo};

pub const DEFAULT_BASE_URL: &str = "https://www.scorebat.com/video-api/v3";

#[derive(Error, Debug)]
pub enum ScoreBatError {
    #[error("Feed returned HTTP {0}")]
    Status(u16),

    #[error("Invalid feed: {0}")]
    InvalidResponse(String),

    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
}

/// ScoreBat highlight feed client
pub struct ScoreBatClient {
    base_url: String,
    token: String,
    client: reqwest::Client,
}

impl ScoreBatClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_base_url(token, DEFAULT_BASE_URL)
    }

    /// Create a client with a custom base URL (for testing)
    pub fn with_base_url(token: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
        }
    }

    /// Latest match highlights, in feed order
    pub async fn fetch_highlights(&self) -> Result<Vec<Highlight>, ScoreBatError> {
        let url = format!("{}/feed/", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("token", self.token.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScoreBatError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let feed: FeedResponse = serde_json::from_str(&body)
            .map_err(|e| ScoreBatError::InvalidResponse(e.to_string()))?;

        Ok(feed
            .response
            .into_iter()
            .map(HighlightRaw::into_highlight)
            .collect())
    }
}

#[async_trait]
impl SportsGateway for ScoreBatClient {
    async fn highlights(&self) -> Fetch<Vec<Highlight>> {
        match self.fetch_highlights().await {
            Ok(list) => Fetch::from_list(list),
            Err(e) => {
                tracing::warn!(error = %e, "Sports feed fetch failed");
                Fetch::Failed(e.to_string())
            }
        }
    }
}

// =============================================================================
// Response Structures
// =============================================================================

#[derive(Debug, Deserialize)]
struct FeedResponse {
    #[serde(default)]
    response: Vec<HighlightRaw>,
}

#[derive(Debug, Deserialize)]
struct HighlightRaw {
    #[serde(default)]
    title: String,
    competition: Option<CompetitionRaw>,
    #[serde(default)]
    videos: Vec<VideoRaw>,
    #[serde(rename = "matchviewUrl", default)]
    matchview_url: String,
    thumbnail: Option<String>,
    date: Option<String>,
}

/// Older feeds nest the competition as `{ "name": ... }`, v3 sends a string
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CompetitionRaw {
    Named { name: String },
    Plain(String),
}

#[derive(Debug, Deserialize)]
struct VideoRaw {
    #[serde(default)]
    title: String,
    #[serde(default)]
    embed: String,
}

impl HighlightRaw {
    fn into_highlight(self) -> Highlight {
        let competition = self.competition.map(|c| match c {
            CompetitionRaw::Named { name } => name,
            CompetitionRaw::Plain(name) => name,
        });

        let title = if self.title.trim().is_empty() {
            "Untitled match".to_string()
        } else {
            self.title
        };

        Highlight {
            title,
            competition: competition.filter(|c| !c.is_empty()),
            videos: self
                .videos
                .into_iter()
                .filter(|v| !v.embed.is_empty())
                .map(|v| HighlightVideo {
                    title: v.title,
                    embed: v.embed,
                })
                .collect(),
            matchview_url: self.matchview_url,
            thumbnail: self.thumbnail,
            date: self.date,
        }
    }
}
