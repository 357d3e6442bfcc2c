//! Data structures shared across HeisFlix
//!
//! Organized by domain:
//! - **Catalog**: TMDB items, genres, paged browse results
//! - **Playback**: the overlay's playback target and fallback video table
//! - **Sports**: ScoreBat highlight entries
//! - **Outcomes**: the explicit `Fetch` result every gateway call returns

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Catalog Models (TMDB)
// =============================================================================

/// Media kind discriminator, resolved once when an item is ingested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaKind {
    #[serde(rename = "movie")]
    Movie,
    #[serde(rename = "tv")]
    Series,
}

impl MediaKind {
    /// Path segment used by TMDB endpoints (`/movie/{id}`, `/tv/{id}`)
    pub fn path_segment(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Series => "tv",
        }
    }

    /// Resolve the kind of a raw API record.
    ///
    /// An explicit `media_type` wins. Without one, a record carrying a `title`
    /// is a movie and anything else is a series. Other explicit kinds
    /// (e.g. `person`) yield `None`.
    pub fn resolve(media_type: Option<&str>, has_title: bool) -> Option<Self> {
        match media_type {
            Some("movie") => Some(MediaKind::Movie),
            Some("tv") => Some(MediaKind::Series),
            Some(_) => None,
            None if has_title => Some(MediaKind::Movie),
            None => Some(MediaKind::Series),
        }
    }

    /// Parse the CLI/path spelling (`movie`, `tv`, `series`)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "movie" => Some(MediaKind::Movie),
            "tv" | "series" => Some(MediaKind::Series),
            _ => None,
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Movie => write!(f, "Movie"),
            MediaKind::Series => write!(f, "TV Show"),
        }
    }
}

/// A movie or series record as shown in every list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: u64,
    pub media_type: MediaKind,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overview: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vote_average: Option<f32>,
}

/// Base URL for w500 poster images
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

impl CatalogItem {
    /// Minimal constructor, mostly for tests and the CLI
    pub fn new(id: u64, media_type: MediaKind, title: impl Into<String>) -> Self {
        Self {
            id,
            media_type,
            title: title.into(),
            poster_path: None,
            overview: None,
            release_date: None,
            vote_average: None,
        }
    }

    /// Release or first-air year, if the date is present
    pub fn year(&self) -> Option<u16> {
        self.release_date.as_deref().and_then(extract_year)
    }

    /// Absolute poster URL
    pub fn poster_url(&self) -> Option<String> {
        self.poster_path
            .as_ref()
            .map(|p| format!("{}{}", IMAGE_BASE_URL, p))
    }
}

impl fmt::Display for CatalogItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let year_str = self.year().map(|y| format!(" ({})", y)).unwrap_or_default();
        write!(f, "{}{} [{}]", self.title, year_str, self.media_type)
    }
}

/// Genre filter entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

/// One page of catalog results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrowseResult {
    pub items: Vec<CatalogItem>,
    pub page: u32,
    pub total_pages: u32,
}

impl BrowseResult {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            page: 1,
            total_pages: 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Default for BrowseResult {
    fn default() -> Self {
        Self::empty()
    }
}

/// Which catalog listing a browse request targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseQuery {
    Trending,
    Genre(u64),
    Search(String),
}

impl fmt::Display for BrowseQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BrowseQuery::Trending => write!(f, "trending"),
            BrowseQuery::Genre(id) => write!(f, "genre {}", id),
            BrowseQuery::Search(q) => write!(f, "search \"{}\"", q),
        }
    }
}

// =============================================================================
// Gateway Outcomes
// =============================================================================

/// Outcome of a gateway call
///
/// Keeps "the request failed" apart from "the request returned nothing".
#[derive(Debug, Clone, PartialEq)]
pub enum Fetch<T> {
    Loaded(T),
    Empty,
    Failed(String),
}

impl<T> Fetch<T> {
    pub fn is_failed(&self) -> bool {
        matches!(self, Fetch::Failed(_))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Fetch::Empty)
    }
}

impl Fetch<BrowseResult> {
    /// A page filtered down to nothing stays `Loaded` while later pages
    /// exist, so its paging metadata survives.
    pub fn from_page(page: BrowseResult) -> Self {
        if page.is_empty() && page.page >= page.total_pages {
            Fetch::Empty
        } else {
            Fetch::Loaded(page)
        }
    }
}

impl<T> Fetch<Vec<T>> {
    pub fn from_list(list: Vec<T>) -> Self {
        if list.is_empty() {
            Fetch::Empty
        } else {
            Fetch::Loaded(list)
        }
    }
}

// =============================================================================
// Playback Models
// =============================================================================

/// Public-domain videos played when no trailer can be resolved
pub const FALLBACK_VIDEOS: &[(&str, &str)] = &[
    (
        "Big Buck Bunny",
        "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/BigBuckBunny.mp4",
    ),
    (
        "Sintel",
        "https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/Sintel.mp4",
    ),
];

/// Look up the fallback video for a display name (exact match)
pub fn fallback_video(title: &str) -> Option<&'static str> {
    FALLBACK_VIDEOS
        .iter()
        .find(|(name, _)| *name == title)
        .map(|(_, url)| *url)
}

/// What the overlay is currently showing
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackTarget {
    pub item: CatalogItem,
    pub trailer_url: Option<String>,
    pub fallback_video_url: Option<String>,
    /// Trailer lookup still in flight
    pub resolving: bool,
}

/// Video source the overlay settles on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackSource {
    Trailer(String),
    Fallback(String),
    Unavailable,
}

impl PlaybackTarget {
    pub fn new(item: CatalogItem) -> Self {
        Self {
            item,
            trailer_url: None,
            fallback_video_url: None,
            resolving: true,
        }
    }

    /// Apply the result of trailer resolution
    pub fn resolve(&mut self, trailer_url: Option<String>) {
        self.fallback_video_url = match trailer_url {
            Some(_) => None,
            None => fallback_video(&self.item.title).map(str::to_string),
        };
        self.trailer_url = trailer_url;
        self.resolving = false;
    }

    /// Trailer first, then the fallback video, else nothing
    pub fn source(&self) -> PlaybackSource {
        if let Some(url) = &self.trailer_url {
            PlaybackSource::Trailer(url.clone())
        } else if let Some(url) = &self.fallback_video_url {
            PlaybackSource::Fallback(url.clone())
        } else {
            PlaybackSource::Unavailable
        }
    }

    /// URL handed to an external player
    pub fn playable_url(&self) -> Option<String> {
        match self.source() {
            PlaybackSource::Trailer(url) => Some(format!("{}?autoplay=1", url)),
            PlaybackSource::Fallback(url) => Some(url),
            PlaybackSource::Unavailable => None,
        }
    }
}

// =============================================================================
// Sports Models (ScoreBat)
// =============================================================================

/// Embeddable recap video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighlightVideo {
    pub title: String,
    pub embed: String,
}

impl HighlightVideo {
    /// Player URL taken from the embed's iframe `src`
    pub fn source_url(&self) -> Option<&str> {
        let start = self.embed.find("src=")? + "src=".len();
        let rest = &self.embed[start..];
        let quote = rest.chars().next().filter(|c| *c == '\'' || *c == '"')?;
        let rest = &rest[1..];
        let end = rest.find(quote)?;
        Some(&rest[..end]).filter(|url| !url.is_empty())
    }
}

/// Match highlight entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Highlight {
    pub title: String,
    pub competition: Option<String>,
    pub videos: Vec<HighlightVideo>,
    pub matchview_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl Highlight {
    /// Full match page, when the feed sent one
    pub fn matchview(&self) -> Option<&str> {
        Some(self.matchview_url.as_str()).filter(|url| !url.is_empty())
    }
}

impl fmt::Display for Highlight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.competition {
            Some(c) => write!(f, "{} ({})", self.title, c),
            None => write!(f, "{}", self.title),
        }
    }
}

/// Extract year from a date string like "2022-03-04"
pub fn extract_year(date: &str) -> Option<u16> {
    date.get(..4).and_then(|y| y.parse().ok())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_kind_resolve_explicit() {
        assert_eq!(MediaKind::resolve(Some("movie"), false), Some(MediaKind::Movie));
        assert_eq!(MediaKind::resolve(Some("tv"), true), Some(MediaKind::Series));
        assert_eq!(MediaKind::resolve(Some("person"), false), None);
    }

    #[test]
    fn test_media_kind_resolve_inferred() {
        assert_eq!(MediaKind::resolve(None, true), Some(MediaKind::Movie));
        assert_eq!(MediaKind::resolve(None, false), Some(MediaKind::Series));
    }

    #[test]
    fn test_media_kind_serde() {
        assert_eq!(serde_json::to_string(&MediaKind::Movie).unwrap(), "\"movie\"");
        assert_eq!(serde_json::to_string(&MediaKind::Series).unwrap(), "\"tv\"");
        let kind: MediaKind = serde_json::from_str("\"tv\"").unwrap();
        assert_eq!(kind, MediaKind::Series);
    }

    #[test]
    fn test_media_kind_parse() {
        assert_eq!(MediaKind::parse("Movie"), Some(MediaKind::Movie));
        assert_eq!(MediaKind::parse("series"), Some(MediaKind::Series));
        assert_eq!(MediaKind::parse("tv"), Some(MediaKind::Series));
        assert_eq!(MediaKind::parse("person"), None);
    }

    #[test]
    fn test_catalog_item_display() {
        let mut item = CatalogItem::new(1, MediaKind::Movie, "Dune");
        assert_eq!(item.to_string(), "Dune [Movie]");
        item.release_date = Some("2021-09-15".into());
        assert_eq!(item.to_string(), "Dune (2021) [Movie]");
    }

    #[test]
    fn test_catalog_item_poster_url() {
        let mut item = CatalogItem::new(1, MediaKind::Movie, "Dune");
        assert!(item.poster_url().is_none());
        item.poster_path = Some("/abc.jpg".into());
        assert_eq!(
            item.poster_url().as_deref(),
            Some("https://image.tmdb.org/t/p/w500/abc.jpg")
        );
    }

    #[test]
    fn test_catalog_item_skips_absent_fields() {
        let item = CatalogItem::new(7, MediaKind::Series, "Dark");
        let json = serde_json::to_string(&item).unwrap();
        assert_eq!(json, r#"{"id":7,"media_type":"tv","title":"Dark"}"#);
    }

    #[test]
    fn test_extract_year() {
        assert_eq!(extract_year("2022-03-04"), Some(2022));
        assert_eq!(extract_year(""), None);
        assert_eq!(extract_year("abc"), None);
    }

    #[test]
    fn test_fallback_video_lookup() {
        assert_eq!(
            fallback_video("Big Buck Bunny"),
            Some("https://commondatastorage.googleapis.com/gtv-videos-bucket/sample/BigBuckBunny.mp4")
        );
        assert!(fallback_video("big buck bunny").is_none());
        assert!(fallback_video("Dune").is_none());
    }

    #[test]
    fn test_playback_target_prefers_trailer() {
        let mut target = PlaybackTarget::new(CatalogItem::new(1, MediaKind::Movie, "Sintel"));
        assert!(target.resolving);
        target.resolve(Some("https://www.youtube.com/embed/xyz".into()));
        assert!(!target.resolving);
        assert!(target.fallback_video_url.is_none());
        assert_eq!(
            target.source(),
            PlaybackSource::Trailer("https://www.youtube.com/embed/xyz".into())
        );
        assert_eq!(
            target.playable_url().as_deref(),
            Some("https://www.youtube.com/embed/xyz?autoplay=1")
        );
    }

    #[test]
    fn test_playback_target_unavailable() {
        let mut target = PlaybackTarget::new(CatalogItem::new(1, MediaKind::Movie, "Dune"));
        target.resolve(None);
        assert_eq!(target.source(), PlaybackSource::Unavailable);
        assert!(target.playable_url().is_none());
    }

    #[test]
    fn test_fetch_from_page() {
        assert!(Fetch::from_page(BrowseResult::empty()).is_empty());
        let page = BrowseResult {
            items: vec![CatalogItem::new(1, MediaKind::Movie, "A")],
            page: 1,
            total_pages: 3,
        };
        assert_eq!(Fetch::from_page(page.clone()), Fetch::Loaded(page));
    }

    #[test]
    fn test_fetch_from_page_keeps_filtered_page() {
        let filtered = BrowseResult {
            items: vec![],
            page: 1,
            total_pages: 3,
        };
        assert_eq!(Fetch::from_page(filtered.clone()), Fetch::Loaded(filtered));

        let last = BrowseResult {
            items: vec![],
            page: 3,
            total_pages: 3,
        };
        assert!(Fetch::from_page(last).is_empty());
    }

    #[test]
    fn test_highlight_video_source_url() {
        let video = HighlightVideo {
            title: "Highlights".into(),
            embed: "<div style='width:100%'><iframe src='https://www.scorebat.com/embed/v/abc/?utm_source=api' frameborder='0'></iframe></div>".into(),
        };
        assert_eq!(
            video.source_url(),
            Some("https://www.scorebat.com/embed/v/abc/?utm_source=api")
        );

        let double = HighlightVideo {
            title: "Goal".into(),
            embed: r#"<iframe src="https://example.com/v/1"></iframe>"#.into(),
        };
        assert_eq!(double.source_url(), Some("https://example.com/v/1"));

        let bare = HighlightVideo {
            title: "Broken".into(),
            embed: "<div>no player</div>".into(),
        };
        assert_eq!(bare.source_url(), None);
    }

    #[test]
    fn test_highlight_display() {
        let h = Highlight {
            title: "Arsenal - Chelsea".into(),
            competition: Some("ENGLAND: Premier League".into()),
            videos: vec![],
            matchview_url: "https://www.scorebat.com/embed/matchview/1/".into(),
            thumbnail: None,
            date: None,
        };
        assert_eq!(h.to_string(), "Arsenal - Chelsea (ENGLAND: Premier League)");
    }
}
