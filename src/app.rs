//! App state and core application logic
//!
//! Owns the current route and the mounted screen, routes keyboard and mouse
//! input to it, and turns screen requests into `AppCommand`s. Finished work
//! comes back as `AppMessage`s through `handle_message`.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use tokio::sync::mpsc;

use crate::models::{BrowseQuery, BrowseResult, Fetch, Genre, Highlight, MediaKind};
use crate::screens::{
    BrowseRequest, CatalogBrowser, CatalogFocus, FavoritesBrowser, LoginScreen, Overlay,
    SportsBrowser, Ticket, TrailerRequest,
};
use crate::store::KeyValueStore;

// =============================================================================
// Routes
// =============================================================================

/// Addressable screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    Welcome,
    Login,
    Catalog,
    Favorites,
    Sports,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Welcome => "/",
            Route::Login => "/login",
            Route::Catalog => "/home",
            Route::Favorites => "/watchlist",
            Route::Sports => "/sports",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        match path.trim() {
            "/" | "" => Some(Route::Welcome),
            "/login" => Some(Route::Login),
            "/home" => Some(Route::Catalog),
            "/watchlist" => Some(Route::Favorites),
            "/sports" => Some(Route::Sports),
            _ => None,
        }
    }

    /// Whether the route shows the browser navigation bar
    pub fn is_browser(&self) -> bool {
        matches!(self, Route::Catalog | Route::Favorites | Route::Sports)
    }
}

// =============================================================================
// Input Mode
// =============================================================================

/// Current input mode for keyboard handling
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InputMode {
    /// Normal navigation mode
    #[default]
    Normal,
    /// Text input mode (search box focused)
    Editing,
}

// =============================================================================
// Commands & Messages
// =============================================================================

/// Work the app asks the background worker to do
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    Browse {
        ticket: Ticket,
        query: BrowseQuery,
        page: u32,
    },
    LoadGenres {
        ticket: Ticket,
    },
    ResolveTrailer {
        ticket: Ticket,
        kind: MediaKind,
        id: u64,
    },
    LoadHighlights {
        ticket: Ticket,
    },
    /// Open a URL in the external player
    Play {
        url: String,
    },
}

impl From<BrowseRequest> for AppCommand {
    fn from(req: BrowseRequest) -> Self {
        AppCommand::Browse {
            ticket: req.ticket,
            query: req.query,
            page: req.page,
        }
    }
}

impl From<TrailerRequest> for AppCommand {
    fn from(req: TrailerRequest) -> Self {
        AppCommand::ResolveTrailer {
            ticket: req.ticket,
            kind: req.kind,
            id: req.id,
        }
    }
}

/// Results of finished work
#[derive(Debug, Clone, PartialEq)]
pub enum AppMessage {
    BrowseLoaded {
        ticket: Ticket,
        outcome: Fetch<BrowseResult>,
    },
    GenresLoaded {
        ticket: Ticket,
        outcome: Fetch<Vec<Genre>>,
    },
    TrailerResolved {
        ticket: Ticket,
        url: Option<String>,
    },
    HighlightsLoaded {
        ticket: Ticket,
        outcome: Fetch<Vec<Highlight>>,
    },
    PlayerStarted(String),
    PlayerFailed(String),
}

// =============================================================================
// Screens
// =============================================================================

/// The mounted screen and its controller
#[derive(Debug)]
pub enum Screen {
    Welcome,
    Login(LoginScreen),
    Catalog(CatalogBrowser),
    Favorites(FavoritesBrowser),
    Sports(SportsBrowser),
}

impl Screen {
    /// Overlay of the mounted screen, if it has one
    pub fn overlay(&self) -> Option<&Overlay> {
        match self {
            Screen::Catalog(c) => Some(&c.overlay),
            Screen::Favorites(f) => Some(&f.overlay),
            _ => None,
        }
    }

    fn overlay_mut(&mut self) -> Option<&mut Overlay> {
        match self {
            Screen::Catalog(c) => Some(&mut c.overlay),
            Screen::Favorites(f) => Some(&mut f.overlay),
            _ => None,
        }
    }
}

// =============================================================================
// Main Application State
// =============================================================================

/// Rows moved by PageUp/PageDown
const PAGE_SIZE: usize = 10;

pub struct App {
    pub route: Route,
    pub screen: Screen,
    /// Whether the app is running
    pub running: bool,
    pub input_mode: InputMode,
    /// Transient status line message
    pub status: Option<String>,
    storage: Arc<dyn KeyValueStore>,
    cmd_tx: Option<mpsc::UnboundedSender<AppCommand>>,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("route", &self.route)
            .field("screen", &self.screen)
            .field("running", &self.running)
            .field("input_mode", &self.input_mode)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

impl App {
    /// App without a worker attached; commands are dropped
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self {
            route: Route::Welcome,
            screen: Screen::Welcome,
            running: true,
            input_mode: InputMode::Normal,
            status: None,
            storage,
            cmd_tx: None,
        }
    }

    /// App wired to a command channel
    pub fn with_channels(
        storage: Arc<dyn KeyValueStore>,
    ) -> (Self, mpsc::UnboundedReceiver<AppCommand>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut app = Self::new(storage);
        app.cmd_tx = Some(tx);
        (app, rx)
    }

    fn send(&self, cmd: impl Into<AppCommand>) {
        let cmd = cmd.into();
        match &self.cmd_tx {
            Some(tx) => {
                if tx.send(cmd).is_err() {
                    tracing::warn!("Command channel closed");
                }
            }
            None => tracing::debug!(?cmd, "No worker attached, dropping command"),
        }
    }

    /// Mount `route`, issuing whatever its screen loads on mount
    pub fn navigate(&mut self, route: Route) {
        tracing::info!(path = route.path(), "Navigate");
        self.input_mode = InputMode::Normal;
        self.screen = match route {
            Route::Welcome => Screen::Welcome,
            Route::Login => Screen::Login(LoginScreen::new()),
            Route::Catalog => {
                let mut catalog = CatalogBrowser::mount(self.storage.clone());
                let (genres, browse) = catalog.start();
                self.send(AppCommand::LoadGenres { ticket: genres });
                self.send(browse);
                Screen::Catalog(catalog)
            }
            Route::Favorites => Screen::Favorites(FavoritesBrowser::mount(self.storage.clone())),
            Route::Sports => {
                let mut sports = SportsBrowser::mount();
                let ticket = sports.load();
                self.send(AppCommand::LoadHighlights { ticket });
                Screen::Sports(sports)
            }
        };
        self.route = route;
    }

    /// Quit the application
    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn overlay_open(&self) -> bool {
        self.screen.overlay().map(Overlay::is_open).unwrap_or(false)
    }

    // -------------------------------------------------------------------------
    // Keyboard Event Handling
    // -------------------------------------------------------------------------

    /// Handle keyboard event, returns true if event was consumed
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        self.status = None;

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return true;
        }

        if self.overlay_open() {
            return self.handle_overlay_key(key);
        }

        match self.route {
            Route::Welcome => self.handle_welcome_key(key),
            Route::Login => self.handle_login_key(key),
            _ if self.input_mode == InputMode::Editing => self.handle_editing_key(key),
            _ => self.handle_browser_key(key),
        }
    }

    fn handle_welcome_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Enter | KeyCode::Char('l') => {
                self.navigate(Route::Login);
                true
            }
            KeyCode::Char('q') | KeyCode::Esc => {
                self.quit();
                true
            }
            _ => false,
        }
    }

    fn handle_login_key(&mut self, key: KeyEvent) -> bool {
        let Screen::Login(login) = &mut self.screen else {
            return false;
        };
        match key.code {
            KeyCode::Esc => self.navigate(Route::Welcome),
            // No credential check
            KeyCode::Enter => self.navigate(Route::Catalog),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => login.next_field(),
            KeyCode::Char(c) => login.focused_mut().insert(c),
            KeyCode::Backspace => login.focused_mut().backspace(),
            KeyCode::Delete => login.focused_mut().delete(),
            KeyCode::Left => login.focused_mut().left(),
            KeyCode::Right => login.focused_mut().right(),
            KeyCode::Home => login.focused_mut().home(),
            KeyCode::End => login.focused_mut().end(),
            _ => return false,
        }
        true
    }

    fn handle_overlay_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc | KeyCode::Char('x') | KeyCode::Char('q') => {
                if let Some(overlay) = self.screen.overlay_mut() {
                    overlay.close();
                }
                true
            }
            KeyCode::Enter | KeyCode::Char('o') => {
                let url = self
                    .screen
                    .overlay()
                    .and_then(Overlay::target)
                    .and_then(|t| if t.resolving { None } else { t.playable_url() });
                match url {
                    Some(url) => self.send(AppCommand::Play { url }),
                    None => self.status = Some("Trailer or video not available.".into()),
                }
                true
            }
            _ => false,
        }
    }

    /// Search box keys (catalog only)
    fn handle_editing_key(&mut self, key: KeyEvent) -> bool {
        let Screen::Catalog(catalog) = &mut self.screen else {
            self.input_mode = InputMode::Normal;
            return false;
        };
        match key.code {
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                catalog.focus = CatalogFocus::Results;
            }
            KeyCode::Enter => {
                let request = catalog.submit_search();
                self.input_mode = InputMode::Normal;
                catalog.focus = CatalogFocus::Results;
                if let Some(req) = request {
                    self.send(req);
                }
            }
            KeyCode::Char(c) => catalog.search.insert(c),
            KeyCode::Backspace => catalog.search.backspace(),
            KeyCode::Delete => catalog.search.delete(),
            KeyCode::Left => catalog.search.left(),
            KeyCode::Right => catalog.search.right(),
            KeyCode::Home => catalog.search.home(),
            KeyCode::End => catalog.search.end(),
            _ => return false,
        }
        true
    }

    /// Keys shared by the three browser screens, then the screen's own
    fn handle_browser_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('q') => {
                self.quit();
                return true;
            }
            KeyCode::Char('1') => {
                self.navigate(Route::Catalog);
                return true;
            }
            KeyCode::Char('2') => {
                self.navigate(Route::Favorites);
                return true;
            }
            KeyCode::Char('3') => {
                self.navigate(Route::Sports);
                return true;
            }
            // Log out
            KeyCode::Char('L') => {
                self.navigate(Route::Welcome);
                return true;
            }
            _ => {}
        }

        match self.route {
            Route::Catalog => self.handle_catalog_key(key),
            Route::Favorites => self.handle_favorites_key(key),
            Route::Sports => self.handle_sports_key(key),
            _ => false,
        }
    }

    fn handle_catalog_key(&mut self, key: KeyEvent) -> bool {
        let Screen::Catalog(catalog) = &mut self.screen else {
            return false;
        };

        let mut commands: Vec<AppCommand> = Vec::new();
        match (catalog.focus, key.code) {
            (_, KeyCode::Char('/')) => {
                catalog.focus = CatalogFocus::Search;
                self.input_mode = InputMode::Editing;
            }
            (_, KeyCode::Tab) => {
                catalog.focus = match catalog.focus {
                    CatalogFocus::Genres => CatalogFocus::Results,
                    _ => CatalogFocus::Genres,
                };
            }
            (_, KeyCode::Char('t')) => commands.push(catalog.trending().into()),
            (_, KeyCode::Char('n') | KeyCode::Char(']')) => {
                commands.extend(catalog.next_page().map(AppCommand::from))
            }
            (_, KeyCode::Char('p') | KeyCode::Char('[')) => {
                commands.extend(catalog.prev_page().map(AppCommand::from))
            }
            (_, KeyCode::Char('w')) => {
                catalog.toggle_favorite();
            }
            (_, KeyCode::Char('r')) if catalog.genres_state.is_failed() => {
                commands.push(AppCommand::LoadGenres {
                    ticket: catalog.load_genres(),
                });
            }

            (CatalogFocus::Genres, KeyCode::Left | KeyCode::Char('h')) => catalog.genre_left(),
            (CatalogFocus::Genres, KeyCode::Right | KeyCode::Char('l')) => catalog.genre_right(),
            (CatalogFocus::Genres, KeyCode::Enter) => {
                commands.push(catalog.activate_genre_cursor().into());
                catalog.focus = CatalogFocus::Results;
            }
            (CatalogFocus::Genres, KeyCode::Down | KeyCode::Esc) => {
                catalog.focus = CatalogFocus::Results;
            }

            (_, KeyCode::Up | KeyCode::Char('k')) => catalog.list.up(),
            (_, KeyCode::Down | KeyCode::Char('j')) => catalog.list.down(),
            (_, KeyCode::PageUp) => catalog.list.page_up(PAGE_SIZE),
            (_, KeyCode::PageDown) => catalog.list.page_down(PAGE_SIZE),
            (_, KeyCode::Home | KeyCode::Char('g')) => catalog.list.first(),
            (_, KeyCode::End | KeyCode::Char('G')) => catalog.list.last(),
            (_, KeyCode::Left) => commands.extend(catalog.prev_page().map(AppCommand::from)),
            (_, KeyCode::Right) => commands.extend(catalog.next_page().map(AppCommand::from)),
            (_, KeyCode::Enter) => commands.extend(catalog.open_selected().map(AppCommand::from)),
            _ => return false,
        }

        for cmd in commands {
            self.send(cmd);
        }
        true
    }

    fn handle_favorites_key(&mut self, key: KeyEvent) -> bool {
        let Screen::Favorites(favorites) = &mut self.screen else {
            return false;
        };
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => favorites.list.up(),
            KeyCode::Down | KeyCode::Char('j') => favorites.list.down(),
            KeyCode::PageUp => favorites.list.page_up(PAGE_SIZE),
            KeyCode::PageDown => favorites.list.page_down(PAGE_SIZE),
            KeyCode::Home | KeyCode::Char('g') => favorites.list.first(),
            KeyCode::End | KeyCode::Char('G') => favorites.list.last(),
            KeyCode::Char('d') | KeyCode::Delete => {
                favorites.remove_selected();
            }
            KeyCode::Enter => {
                if let Some(req) = favorites.open_selected() {
                    self.send(req);
                }
            }
            _ => return false,
        }
        true
    }

    fn handle_sports_key(&mut self, key: KeyEvent) -> bool {
        let Screen::Sports(sports) = &mut self.screen else {
            return false;
        };
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => sports.list.up(),
            KeyCode::Down | KeyCode::Char('j') => sports.list.down(),
            KeyCode::PageUp => sports.list.page_up(PAGE_SIZE),
            KeyCode::PageDown => sports.list.page_down(PAGE_SIZE),
            KeyCode::Home | KeyCode::Char('g') => sports.list.first(),
            KeyCode::End | KeyCode::Char('G') => sports.list.last(),
            KeyCode::Tab => sports.next_video(),
            KeyCode::Char('r') => {
                let ticket = sports.load();
                self.send(AppCommand::LoadHighlights { ticket });
            }
            KeyCode::Enter => {
                let url = sports.play_selected();
                self.play_or_report(url);
            }
            KeyCode::Char('o') => {
                let url = sports.open_matchview();
                self.play_or_report(url);
            }
            _ => return false,
        }
        true
    }

    fn play_or_report(&mut self, url: Option<String>) {
        match url {
            Some(url) => self.send(AppCommand::Play { url }),
            None => self.status = Some("Highlight video not available.".into()),
        }
    }

    // -------------------------------------------------------------------------
    // Mouse Event Handling
    // -------------------------------------------------------------------------

    /// Handle a mouse event over a frame of size `area`
    pub fn handle_mouse(&mut self, event: MouseEvent, area: Rect) -> bool {
        let pos = Position::new(event.column, event.row);
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => self
                .screen
                .overlay_mut()
                .map(|overlay| overlay.click(pos, area))
                .unwrap_or(false),
            MouseEventKind::ScrollDown if !self.overlay_open() => {
                self.scroll(true);
                true
            }
            MouseEventKind::ScrollUp if !self.overlay_open() => {
                self.scroll(false);
                true
            }
            _ => false,
        }
    }

    fn scroll(&mut self, down: bool) {
        let list = match &mut self.screen {
            Screen::Catalog(c) => &mut c.list,
            Screen::Favorites(f) => &mut f.list,
            Screen::Sports(s) => &mut s.list,
            _ => return,
        };
        if down {
            list.down();
        } else {
            list.up();
        }
    }

    // -------------------------------------------------------------------------
    // Worker Results
    // -------------------------------------------------------------------------

    /// Apply a finished command. Results for screens no longer mounted, or
    /// for superseded requests, are dropped.
    pub fn handle_message(&mut self, msg: AppMessage) {
        match (msg, &mut self.screen) {
            (AppMessage::BrowseLoaded { ticket, outcome }, Screen::Catalog(c)) => {
                c.apply_browse(ticket, outcome);
            }
            (AppMessage::GenresLoaded { ticket, outcome }, Screen::Catalog(c)) => {
                c.apply_genres(ticket, outcome);
            }
            (AppMessage::TrailerResolved { ticket, url }, screen) => {
                if let Some(overlay) = screen.overlay_mut() {
                    overlay.apply_trailer(ticket, url);
                }
            }
            (AppMessage::HighlightsLoaded { ticket, outcome }, Screen::Sports(s)) => {
                s.apply_highlights(ticket, outcome);
            }
            (AppMessage::PlayerStarted(player), _) => {
                self.status = Some(format!("Playing in {}", player));
            }
            (AppMessage::PlayerFailed(e), _) => {
                tracing::warn!(error = %e, "Player failed");
                self.status = Some(e);
            }
            (msg, _) => {
                tracing::debug!(?msg, "Dropping result for unmounted screen");
            }
        }
    }
}
