//! CLI Command Handlers
//!
//! Implements all CLI commands by calling the API clients and the watchlist
//! store directly. Each handler takes its args, the loaded config and the
//! Output, and returns an ExitCode.

use std::sync::Arc;

use crate::api::{ScoreBatClient, TmdbClient, TmdbError};
use crate::cli::{
    ExitCode, GenreCmd, Output, PageArgs, SearchCmd, TrailerCmd, TrailerResponse, WatchlistAction,
    WatchlistChange, WatchlistCmd,
};
use crate::config::Config;
use crate::models::{BrowseResult, CatalogItem, MediaKind, PlaybackSource, PlaybackTarget};
use crate::player::LocalPlayer;
use crate::store::{FavoritesStore, FileStore, KeyValueStore, StoreError};

// =============================================================================
// Shared Helpers
// =============================================================================

/// TMDB client from config, or the exit code to bail out with
fn tmdb_client(config: &Config, output: &Output) -> Result<TmdbClient, ExitCode> {
    match config.tmdb_api_key() {
        Some(key) => Ok(TmdbClient::with_base_url(key, config.tmdb_base_url())),
        None => Err(output.error(
            "No TMDB API key. Set TMDB_API_KEY or tmdb_api_key in config.toml",
            ExitCode::MissingApiKey,
        )),
    }
}

fn network_error(output: &Output, what: &str, e: TmdbError) -> ExitCode {
    tracing::warn!(error = %e, "{} failed", what);
    output.error(format!("{} failed: {}", what, e), ExitCode::NetworkError)
}

/// Print one browse page. An empty page still prints, with `NoResults`.
fn print_page(result: BrowseResult, output: &Output) -> ExitCode {
    let empty = result.is_empty();
    let printed = output.print(&result, |page| {
        if page.is_empty() && page.page >= page.total_pages {
            return vec!["No movies or shows found.".to_string()];
        }
        let mut lines: Vec<String> = page
            .items
            .iter()
            .map(|item| format!("{:>8}  {}", item.id, item))
            .collect();
        if lines.is_empty() {
            lines.push("No movies or shows on this page.".to_string());
        }
        lines.push(format!("Page {} of {}", page.page, page.total_pages));
        lines
    });
    if let Err(e) = printed {
        return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
    }
    if empty {
        ExitCode::NoResults
    } else {
        ExitCode::Success
    }
}

fn storage(config: &Config) -> Arc<dyn KeyValueStore> {
    Arc::new(FileStore::new(config.data_dir()))
}

fn storage_error(output: &Output, e: StoreError) -> ExitCode {
    let hint = match e {
        StoreError::Corrupt(_) => " (run `heisflix watchlist clear` to reset it)",
        _ => "",
    };
    output.error(format!("{}{}", e, hint), ExitCode::StorageError)
}

// =============================================================================
// Catalog Commands
// =============================================================================

pub async fn trending_cmd(args: PageArgs, config: &Config, output: &Output) -> ExitCode {
    let client = match tmdb_client(config, output) {
        Ok(c) => c,
        Err(code) => return code,
    };
    output.info(format!("Fetching trending (page {})...", args.page));

    match client.trending(args.page).await {
        Ok(result) => print_page(result, output),
        Err(e) => network_error(output, "Trending fetch", e),
    }
}

pub async fn genres_cmd(config: &Config, output: &Output) -> ExitCode {
    let client = match tmdb_client(config, output) {
        Ok(c) => c,
        Err(code) => return code,
    };

    match client.genres().await {
        Ok(genres) => {
            let printed = output.print(&genres, |genres| {
                genres
                    .iter()
                    .map(|g| format!("{:>6}  {}", g.id, g.name))
                    .collect()
            });
            if let Err(e) = printed {
                return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
            }
            if genres.is_empty() {
                ExitCode::NoResults
            } else {
                ExitCode::Success
            }
        }
        Err(e) => network_error(output, "Genre listing", e),
    }
}

pub async fn genre_cmd(cmd: GenreCmd, config: &Config, output: &Output) -> ExitCode {
    let client = match tmdb_client(config, output) {
        Ok(c) => c,
        Err(code) => return code,
    };
    output.info(format!("Discovering genre {} (page {})...", cmd.id, cmd.page.page));

    match client.by_genre(cmd.id, cmd.page.page).await {
        Ok(result) => print_page(result, output),
        Err(e) => network_error(output, "Genre discovery", e),
    }
}

pub async fn search_cmd(cmd: SearchCmd, config: &Config, output: &Output) -> ExitCode {
    if cmd.query.trim().is_empty() {
        return output.error("Search query is empty", ExitCode::InvalidArgs);
    }
    let client = match tmdb_client(config, output) {
        Ok(c) => c,
        Err(code) => return code,
    };
    output.info(format!("Searching for: {}", cmd.query));

    match client.search(&cmd.query, cmd.page.page).await {
        Ok(result) => print_page(result, output),
        Err(e) => network_error(output, "Search", e),
    }
}

// =============================================================================
// Trailer Command
// =============================================================================

pub async fn trailer_cmd(cmd: TrailerCmd, config: &Config, output: &Output) -> ExitCode {
    let client = match tmdb_client(config, output) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let kind = MediaKind::from(cmd.kind);

    let trailer_url = match client.resolve_trailer(kind, cmd.id).await {
        Ok(url) => url,
        Err(e) => return network_error(output, "Trailer lookup", e),
    };

    let mut target = PlaybackTarget::new(CatalogItem::new(
        cmd.id,
        kind,
        cmd.title.clone().unwrap_or_default(),
    ));
    target.resolve(trailer_url);

    let (source, url) = match target.source() {
        PlaybackSource::Trailer(url) => ("trailer", Some(url)),
        PlaybackSource::Fallback(url) => ("fallback", Some(url)),
        PlaybackSource::Unavailable => ("unavailable", None),
    };
    let response = TrailerResponse {
        kind,
        id: cmd.id,
        source: source.to_string(),
        url,
    };

    let printed = output.print(&response, |r| {
        vec![r
            .url
            .clone()
            .unwrap_or_else(|| "Trailer or video not available.".to_string())]
    });
    if let Err(e) = printed {
        return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
    }

    let Some(playable) = target.playable_url() else {
        return ExitCode::NoResults;
    };
    if cmd.play {
        let player = LocalPlayer::new(config.player());
        if let Err(e) = player.play(&playable) {
            return output.error(e.to_string(), ExitCode::Error);
        }
        output.info(format!("Opened in {}", player.player_type()));
    }
    ExitCode::Success
}

// =============================================================================
// Sports Command
// =============================================================================

pub async fn sports_cmd(config: &Config, output: &Output) -> ExitCode {
    let client = ScoreBatClient::with_base_url(config.sports_token(), config.sports_base_url());
    output.info("Loading sports highlights...");

    match client.fetch_highlights().await {
        Ok(highlights) => {
            let printed = output.print(&highlights, |list| {
                if list.is_empty() {
                    return vec!["No sports news available at this time.".to_string()];
                }
                list.iter()
                    .map(|h| format!("{}\n    {}", h, h.matchview_url))
                    .collect()
            });
            if let Err(e) = printed {
                return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
            }
            if highlights.is_empty() {
                ExitCode::NoResults
            } else {
                ExitCode::Success
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "Highlights fetch failed");
            output.error(format!("Highlights fetch failed: {}", e), ExitCode::NetworkError)
        }
    }
}

// =============================================================================
// Watchlist Command
// =============================================================================

pub async fn watchlist_cmd(cmd: WatchlistCmd, config: &Config, output: &Output) -> ExitCode {
    watchlist_with(cmd.action, storage(config), config, output).await
}

/// Watchlist actions against an explicit backend
pub async fn watchlist_with(
    action: WatchlistAction,
    backend: Arc<dyn KeyValueStore>,
    config: &Config,
    output: &Output,
) -> ExitCode {
    if let WatchlistAction::Clear = action {
        return match FavoritesStore::clear(backend) {
            Ok(store) => print_cleared(output, &store),
            Err(e) => storage_error(output, e),
        };
    }

    let mut store = match FavoritesStore::load(backend) {
        Ok(store) => store,
        Err(e) => return storage_error(output, e),
    };

    match action {
        WatchlistAction::List => {
            let printed = output.print(store.items(), |items| {
                if items.is_empty() {
                    return vec!["Your watchlist is empty.".to_string()];
                }
                let mut lines: Vec<String> = items
                    .iter()
                    .map(|item| format!("{:>8}  {}", item.id, item))
                    .collect();
                lines.push(format!("Watchlist ({})", items.len()));
                lines
            });
            match printed {
                Ok(()) => ExitCode::Success,
                Err(e) => output.error(format!("Failed to serialize: {}", e), ExitCode::Error),
            }
        }
        WatchlistAction::Remove { id } => match store.remove(id) {
            Ok(changed) => print_change(output, id, false, changed, store.len()),
            Err(e) => storage_error(output, e),
        },
        WatchlistAction::Add { kind, id } => {
            if store.contains(id) {
                return print_change(output, id, true, false, store.len());
            }
            let item = match fetch_item(config, output, kind.into(), id).await {
                Ok(item) => item,
                Err(code) => return code,
            };
            match store.add(item) {
                Ok(changed) => print_change(output, id, true, changed, store.len()),
                Err(e) => storage_error(output, e),
            }
        }
        WatchlistAction::Toggle { kind, id } => {
            if store.contains(id) {
                return match store.remove(id) {
                    Ok(changed) => print_change(output, id, false, changed, store.len()),
                    Err(e) => storage_error(output, e),
                };
            }
            let item = match fetch_item(config, output, kind.into(), id).await {
                Ok(item) => item,
                Err(code) => return code,
            };
            match store.toggle(item) {
                Ok(now) => print_change(output, id, now, true, store.len()),
                Err(e) => storage_error(output, e),
            }
        }
        WatchlistAction::Clear => ExitCode::Success,
    }
}

async fn fetch_item(
    config: &Config,
    output: &Output,
    kind: MediaKind,
    id: u64,
) -> Result<CatalogItem, ExitCode> {
    let client = tmdb_client(config, output)?;
    client.details(kind, id).await.map_err(|e| match e {
        TmdbError::NotFound => output.error(
            format!("No {} with id {}", kind, id),
            ExitCode::NoResults,
        ),
        e => network_error(output, "Details lookup", e),
    })
}

fn print_change(output: &Output, id: u64, favorited: bool, changed: bool, count: usize) -> ExitCode {
    let change = WatchlistChange {
        id,
        favorited,
        changed,
        count,
    };
    let printed = output.print(&change, |c| vec![change_summary(c)]);
    match printed {
        Ok(()) => ExitCode::Success,
        Err(e) => output.error(format!("Failed to serialize: {}", e), ExitCode::Error),
    }
}

fn change_summary(c: &WatchlistChange) -> String {
    let what = match (c.changed, c.favorited) {
        (true, true) => format!("Added {}", c.id),
        (true, false) => format!("Removed {}", c.id),
        (false, true) => format!("{} already in watchlist", c.id),
        (false, false) => format!("{} not in watchlist", c.id),
    };
    format!("{} (Watchlist ({}))", what, c.count)
}

/// `watchlist clear` prints the now-empty list
fn print_cleared(output: &Output, store: &FavoritesStore) -> ExitCode {
    let printed = output.print(store.items(), |items| {
        vec![format!("Watchlist cleared (Watchlist ({}))", items.len())]
    });
    match printed {
        Ok(()) => ExitCode::Success,
        Err(e) => output.error(format!("Failed to serialize: {}", e), ExitCode::Error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::KindArg;
    use crate::store::{MemoryStore, WATCHLIST_KEY};

    fn quiet() -> Output {
        Output {
            json: true,
            quiet: true,
        }
    }

    fn seeded() -> MemoryStore {
        let mem = MemoryStore::new();
        let mut store = FavoritesStore::load(Arc::new(mem.clone())).unwrap();
        store
            .add(CatalogItem::new(7, MediaKind::Movie, "Seven"))
            .unwrap();
        mem
    }

    #[tokio::test]
    async fn test_corrupt_watchlist_is_storage_error() {
        let mem = MemoryStore::new();
        mem.set(WATCHLIST_KEY, "not json").unwrap();
        let code = watchlist_with(
            WatchlistAction::List,
            Arc::new(mem.clone()),
            &Config::default(),
            &quiet(),
        )
        .await;
        assert_eq!(code, ExitCode::StorageError);
        assert_eq!(mem.get(WATCHLIST_KEY).unwrap().as_deref(), Some("not json"));
    }

    #[tokio::test]
    async fn test_clear_resets_corrupt_watchlist() {
        let mem = MemoryStore::new();
        mem.set(WATCHLIST_KEY, "not json").unwrap();
        let code = watchlist_with(
            WatchlistAction::Clear,
            Arc::new(mem.clone()),
            &Config::default(),
            &quiet(),
        )
        .await;
        assert_eq!(code, ExitCode::Success);
        assert!(mem.get(WATCHLIST_KEY).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_toggle_present_item_removes_without_network() {
        let mem = seeded();
        let code = watchlist_with(
            WatchlistAction::Toggle {
                kind: KindArg::Movie,
                id: 7,
            },
            Arc::new(mem.clone()),
            &Config::default(),
            &quiet(),
        )
        .await;
        assert_eq!(code, ExitCode::Success);
        assert_eq!(mem.get(WATCHLIST_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn test_remove_absent_is_noop() {
        let mem = seeded();
        let before = mem.get(WATCHLIST_KEY).unwrap();
        let code = watchlist_with(
            WatchlistAction::Remove { id: 99 },
            Arc::new(mem.clone()),
            &Config::default(),
            &quiet(),
        )
        .await;
        assert_eq!(code, ExitCode::Success);
        assert_eq!(mem.get(WATCHLIST_KEY).unwrap(), before);
    }

    #[test]
    fn test_change_summary_for_id_zero() {
        let removed_nothing = WatchlistChange {
            id: 0,
            favorited: false,
            changed: false,
            count: 1,
        };
        assert_eq!(
            change_summary(&removed_nothing),
            "0 not in watchlist (Watchlist (1))"
        );

        let added = WatchlistChange {
            id: 0,
            favorited: true,
            changed: true,
            count: 2,
        };
        assert_eq!(change_summary(&added), "Added 0 (Watchlist (2))");
    }
}
