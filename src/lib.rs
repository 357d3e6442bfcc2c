//! HeisFlix - terminal browser for movies, TV shows and football highlights
//!
//! Browse trending titles, discover by genre, search, watch trailers in an
//! external player, keep a watchlist and catch up on match highlights.
//!
//! # Modules
//!
//! - `models` - Catalog items, browse pages, playback targets, highlights
//! - `api` - Gateways to TMDB and ScoreBat
//! - `store` - Key-value persistence and the favorites store
//! - `screens` - Per-screen state (catalog, favorites, sports, overlay)
//! - `app` - Routing, key handling and worker messages
//! - `worker` - Runs commands against the gateways
//! - `ui` - TUI rendering
//! - `cli` / `commands` - Scriptable subcommands

pub mod api;
pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod models;
pub mod player;
pub mod screens;
pub mod store;
pub mod ui;
pub mod worker;

// Re-export commonly used types
pub use models::{
    BrowseQuery, BrowseResult, CatalogItem, Fetch, Genre, Highlight, HighlightVideo, MediaKind,
    PlaybackSource, PlaybackTarget,
};

pub use api::{CatalogGateway, ScoreBatClient, SportsGateway, TmdbClient};
pub use app::{App, AppCommand, AppMessage, Route};
pub use store::{FavoritesStore, FileStore, KeyValueStore, MemoryStore};
pub use worker::Worker;
