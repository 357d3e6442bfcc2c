//! API clients for external services
//!
//! - TMDB: catalog trending, discovery, search, genres and trailers
//! - ScoreBat: football highlight feed
//!
//! Screens never see transport errors: they talk to the gateway traits,
//! which fold every call into a `Fetch` outcome.

use async_trait::async_trait;

use crate::models::{BrowseQuery, BrowseResult, Fetch, Genre, Highlight, MediaKind};

pub mod scorebat;
pub mod tmdb;

pub use scorebat::{ScoreBatClient, ScoreBatError};
pub use tmdb::{TmdbClient, TmdbError};

/// Catalog operations used by the browse screens and the overlay
#[async_trait]
pub trait CatalogGateway: Send + Sync {
    async fn browse(&self, query: &BrowseQuery, page: u32) -> Fetch<BrowseResult>;

    async fn genres(&self) -> Fetch<Vec<Genre>>;

    /// `None` when no trailer matches or the lookup failed
    async fn resolve_trailer(&self, kind: MediaKind, id: u64) -> Option<String>;
}

/// Sports highlight feed
#[async_trait]
pub trait SportsGateway: Send + Sync {
    async fn highlights(&self) -> Fetch<Vec<Highlight>>;
}
