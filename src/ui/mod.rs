//! Terminal UI components
//!
//! Built with ratatui. Rendering is a pure function of `App`; every view
//! reads controller state and never mutates it.

pub mod browser;
pub mod overlay;
pub mod sports;
pub mod theme;
pub mod watchlist;
pub mod welcome;

pub use theme::Theme;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, InputMode, Route, Screen};
use crate::screens::LoadState;

/// Main render function - dispatches to view-specific renderers
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    frame.render_widget(Clear, area);
    frame.render_widget(Block::default().style(Style::default().bg(Theme::BACKGROUND)), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    render_header(frame, chunks[0], app);

    match &app.screen {
        Screen::Welcome => welcome::render_welcome(frame, chunks[1]),
        Screen::Login(login) => welcome::render_login(frame, chunks[1], login),
        Screen::Catalog(catalog) => {
            browser::render(frame, chunks[1], catalog, app.input_mode == InputMode::Editing)
        }
        Screen::Favorites(favorites) => watchlist::render(frame, chunks[1], favorites),
        Screen::Sports(sports) => sports::render(frame, chunks[1], sports),
    }

    render_status_bar(frame, chunks[2], app);

    if let Some(target) = app.screen.overlay().and_then(|o| o.target()) {
        overlay::render(frame, area, target);
    }
}

/// Logo plus the browser navigation tabs
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(" HEISFLIX ", Theme::logo())];

    if app.route.is_browser() {
        let watchlist_label = match &app.screen {
            Screen::Catalog(c) => format!("Watchlist ({})", c.watchlist_count()),
            Screen::Favorites(f) => format!("Watchlist ({})", f.len()),
            _ => "Watchlist".to_string(),
        };
        let tabs = [
            (Route::Catalog, "1", "Home".to_string()),
            (Route::Favorites, "2", watchlist_label),
            (Route::Sports, "3", "Sports".to_string()),
        ];
        spans.push(Span::raw("  "));
        for (route, key, label) in tabs {
            spans.push(Span::styled(format!(" {} ", key), Theme::keybind()));
            let style = if route == app.route {
                Theme::chip_active()
            } else {
                Theme::chip()
            };
            spans.push(Span::styled(format!(" {} ", label), style));
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(" L ", Theme::keybind()));
        spans.push(Span::styled("Log Out", Theme::dimmed()));
    }

    let header = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_type(BorderType::Plain)
            .border_style(Theme::border()),
    );
    frame.render_widget(header, area);
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mode = match app.input_mode {
        InputMode::Normal => Span::styled(
            " NORMAL ",
            Style::default().fg(Theme::TEXT).bg(Theme::SECONDARY),
        ),
        InputMode::Editing => Span::styled(
            " SEARCH ",
            Style::default().fg(Theme::BACKGROUND).bg(Theme::ACCENT),
        ),
    };

    let route = Span::styled(format!(" {} ", app.route.path()), Theme::dimmed());

    let notice = app.status.clone().or_else(|| match &app.screen {
        Screen::Catalog(c) => c.notice.clone(),
        Screen::Favorites(f) => f.notice.clone(),
        _ => None,
    });
    let message = match notice {
        Some(msg) => Span::styled(msg, Theme::accent()),
        None => Span::styled(help_text(app), Theme::dimmed()),
    };

    let line = Line::from(vec![mode, route, Span::raw("│ "), message]);
    frame.render_widget(Paragraph::new(line).style(Theme::status_bar()), area);
}

fn help_text(app: &App) -> &'static str {
    if app.screen.overlay().map(|o| o.is_open()).unwrap_or(false) {
        return "o:play  x/esc:close";
    }
    match app.route {
        Route::Welcome => "enter:login  q:quit",
        Route::Login => "tab:next field  enter:sign in  esc:back",
        Route::Catalog if app.input_mode == InputMode::Editing => "enter:search  esc:cancel",
        Route::Catalog => "/:search  tab:genres  t:trending  ←→:page  w:watchlist  enter:trailer",
        Route::Favorites => "enter:trailer  d:remove  q:quit",
        Route::Sports => "enter:play  tab:next video  o:full match  r:refresh",
    }
}

/// Centered one-line message for loading, empty and failed states
pub(crate) fn render_message(frame: &mut Frame, area: Rect, text: &str, style: Style) {
    let top = area.height.saturating_sub(1) / 2;
    let mut lines: Vec<Line> = (0..top).map(|_| Line::from("")).collect();
    lines.push(Line::from(Span::styled(text.to_string(), style)));
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

/// Message for a settled non-populated state, if any
pub(crate) fn state_message(state: &LoadState, loading: &str, empty: &str) -> Option<(String, Style)> {
    match state {
        LoadState::Loading => Some((format!("⟳ {}", loading), Theme::loading())),
        LoadState::Empty => Some((empty.to_string(), Theme::dimmed())),
        LoadState::Failed(e) => Some((format!("✗ {}", e), Theme::error())),
        LoadState::Idle | LoadState::Populated => None,
    }
}
