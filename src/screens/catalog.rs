//! Catalog browser: trending, genre discovery and search over the catalog

use std::sync::Arc;

use super::{ListState, LoadState, Overlay, TextInput, Ticket, TrailerRequest};
use crate::models::{BrowseQuery, BrowseResult, CatalogItem, Fetch, Genre};
use crate::store::{FavoritesStore, KeyValueStore};

/// Browse query the app shell should run on the screen's behalf
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseRequest {
    pub ticket: Ticket,
    pub query: BrowseQuery,
    pub page: u32,
}

/// Which part of the browser receives navigation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CatalogFocus {
    #[default]
    Results,
    Genres,
    Search,
}

#[derive(Debug)]
pub struct CatalogBrowser {
    pub results: BrowseResult,
    pub state: LoadState,
    pub list: ListState,
    pub genres: Vec<Genre>,
    pub genres_state: LoadState,
    /// Cursor in the genre bar; `genres.len()` is the Trending entry
    pub genre_cursor: usize,
    pub search: TextInput,
    pub focus: CatalogFocus,
    pub overlay: Overlay,
    /// Last message worth showing in the status line
    pub notice: Option<String>,
    selected_genre: Option<u64>,
    active_search: Option<String>,
    favorites: Result<FavoritesStore, String>,
    pending: Option<BrowseRequest>,
    genres_ticket: Option<Ticket>,
}

impl CatalogBrowser {
    /// Mount the browser with its own copy of the watchlist
    pub fn mount(backend: Arc<dyn KeyValueStore>) -> Self {
        let favorites = FavoritesStore::load(backend).map_err(|e| {
            tracing::warn!(error = %e, "Watchlist unavailable in catalog");
            e.to_string()
        });
        let notice = favorites
            .as_ref()
            .err()
            .map(|e| format!("Watchlist unavailable: {}", e));

        Self {
            results: BrowseResult::empty(),
            state: LoadState::Idle,
            list: ListState::default(),
            genres: Vec::new(),
            genres_state: LoadState::Idle,
            genre_cursor: 0,
            search: TextInput::new(),
            focus: CatalogFocus::Results,
            overlay: Overlay::new(),
            notice,
            selected_genre: None,
            active_search: None,
            favorites,
            pending: None,
            genres_ticket: None,
        }
    }

    /// Initial queries: the genre list and the first trending page
    pub fn start(&mut self) -> (Ticket, BrowseRequest) {
        (self.load_genres(), self.trending())
    }

    pub fn load_genres(&mut self) -> Ticket {
        let ticket = Ticket::next();
        self.genres_ticket = Some(ticket);
        self.genres_state = LoadState::Loading;
        ticket
    }

    fn issue(&mut self, query: BrowseQuery, page: u32) -> BrowseRequest {
        let request = BrowseRequest {
            ticket: Ticket::next(),
            query,
            page,
        };
        tracing::debug!(query = %request.query, page, ticket = request.ticket.value(), "Browse issued");
        self.pending = Some(request.clone());
        self.state = LoadState::Loading;
        request
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Reset to page 1 of trending
    pub fn trending(&mut self) -> BrowseRequest {
        self.issue(BrowseQuery::Trending, 1)
    }

    pub fn select_genre(&mut self, genre_id: u64) -> BrowseRequest {
        self.issue(BrowseQuery::Genre(genre_id), 1)
    }

    /// Run the search box. Blank input issues nothing.
    pub fn submit_search(&mut self) -> Option<BrowseRequest> {
        if self.search.is_blank() {
            return None;
        }
        let query = self.search.value.trim().to_string();
        Some(self.issue(BrowseQuery::Search(query), 1))
    }

    /// Activate the genre bar entry under the cursor
    pub fn activate_genre_cursor(&mut self) -> BrowseRequest {
        match self.genres.get(self.genre_cursor) {
            Some(genre) => {
                let id = genre.id;
                self.select_genre(id)
            }
            None => self.trending(),
        }
    }

    /// Query that owns the visible results: search, then genre, then trending
    pub fn active_query(&self) -> BrowseQuery {
        if let Some(q) = &self.active_search {
            BrowseQuery::Search(q.clone())
        } else if let Some(id) = self.selected_genre {
            BrowseQuery::Genre(id)
        } else {
            BrowseQuery::Trending
        }
    }

    pub fn selected_genre(&self) -> Option<u64> {
        self.selected_genre
    }

    pub fn active_search(&self) -> Option<&str> {
        self.active_search.as_deref()
    }

    /// Jump to page `page` of the active query. Out-of-range pages issue
    /// nothing and leave the browser untouched.
    pub fn page_change(&mut self, page: u32) -> Option<BrowseRequest> {
        if page < 1 || page > self.results.total_pages {
            return None;
        }
        let query = self.active_query();
        Some(self.issue(query, page))
    }

    pub fn next_page(&mut self) -> Option<BrowseRequest> {
        self.page_change(self.results.page.saturating_add(1))
    }

    pub fn prev_page(&mut self) -> Option<BrowseRequest> {
        self.page_change(self.results.page.saturating_sub(1))
    }

    // -------------------------------------------------------------------------
    // Responses
    // -------------------------------------------------------------------------

    /// Apply a browse response. Returns `false` when it was superseded.
    pub fn apply_browse(&mut self, ticket: Ticket, outcome: Fetch<BrowseResult>) -> bool {
        let request = match self.pending.take() {
            Some(req) if req.ticket == ticket => req,
            other => {
                self.pending = other;
                tracing::debug!(ticket = ticket.value(), "Dropping stale browse result");
                return false;
            }
        };

        self.state = LoadState::settled(&outcome);
        match outcome {
            Fetch::Loaded(result) => {
                // Every row filtered out, but the query has more pages
                if result.is_empty() {
                    self.state = LoadState::Empty;
                }
                self.list.reset(result.items.len());
                self.results = result;
                self.commit_filters(request.query);
            }
            Fetch::Empty => {
                self.results = BrowseResult {
                    items: Vec::new(),
                    page: request.page,
                    total_pages: request.page.max(1),
                };
                self.list.reset(0);
                self.commit_filters(request.query);
            }
            // Previous results stay on screen under the error
            Fetch::Failed(_) => {}
        }
        true
    }

    fn commit_filters(&mut self, query: BrowseQuery) {
        match query {
            BrowseQuery::Trending => {
                self.selected_genre = None;
                self.active_search = None;
                self.search.clear();
            }
            BrowseQuery::Genre(id) => {
                self.selected_genre = Some(id);
                self.active_search = None;
                self.search.clear();
            }
            BrowseQuery::Search(q) => {
                self.selected_genre = None;
                self.active_search = Some(q);
            }
        }
    }

    pub fn apply_genres(&mut self, ticket: Ticket, outcome: Fetch<Vec<Genre>>) -> bool {
        if self.genres_ticket != Some(ticket) {
            return false;
        }
        self.genres_ticket = None;
        self.genres_state = LoadState::settled(&outcome);
        if let Fetch::Loaded(genres) = outcome {
            self.genres = genres;
            self.genre_cursor = self.genre_cursor.min(self.genres.len());
        }
        true
    }

    // -------------------------------------------------------------------------
    // Selection
    // -------------------------------------------------------------------------

    pub fn selected_item(&self) -> Option<&CatalogItem> {
        self.results.items.get(self.list.selected)
    }

    /// Open the overlay on the selected item
    pub fn open_selected(&mut self) -> Option<TrailerRequest> {
        let item = self.selected_item()?.clone();
        Some(self.overlay.open(item))
    }

    pub fn genre_left(&mut self) {
        self.genre_cursor = self.genre_cursor.saturating_sub(1);
    }

    pub fn genre_right(&mut self) {
        if self.genre_cursor < self.genres.len() {
            self.genre_cursor += 1;
        }
    }

    // -------------------------------------------------------------------------
    // Watchlist
    // -------------------------------------------------------------------------

    pub fn is_favorite(&self, id: u64) -> bool {
        self.favorites.as_ref().map(|f| f.contains(id)).unwrap_or(false)
    }

    pub fn watchlist_count(&self) -> usize {
        self.favorites.as_ref().map(|f| f.len()).unwrap_or(0)
    }

    /// Toggle the selected item in the watchlist. Returns whether it is
    /// favorited afterwards, `None` when nothing changed.
    pub fn toggle_favorite(&mut self) -> Option<bool> {
        let item = self.selected_item()?.clone();
        let title = item.title.clone();
        let store = match self.favorites.as_mut() {
            Ok(store) => store,
            Err(e) => {
                self.notice = Some(format!("Watchlist unavailable: {}", e));
                return None;
            }
        };
        match store.toggle(item) {
            Ok(now) => {
                self.notice = Some(if now {
                    format!("Added \"{}\" to watchlist", title)
                } else {
                    format!("Removed \"{}\" from watchlist", title)
                });
                Some(now)
            }
            Err(e) => {
                tracing::error!(error = %e, "Watchlist write failed");
                self.notice = Some(format!("Could not save watchlist: {}", e));
                None
            }
        }
    }
}
