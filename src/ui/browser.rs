//! Catalog browser view
//!
//! Search box, genre bar, the result list with a detail pane, and the page
//! footer. Stale results stay on screen under a loading marker until the
//! next page arrives.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph, Wrap},
};

use super::{render_message, state_message, Theme};
use crate::models::CatalogItem;
use crate::screens::{CatalogBrowser, CatalogFocus, ListState, LoadState};

/// Width from which the detail pane is shown next to the list
const DETAIL_MIN_WIDTH: u16 = 100;

pub fn render(frame: &mut Frame, area: Rect, catalog: &CatalogBrowser, editing: bool) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search
            Constraint::Length(2), // Genres
            Constraint::Min(3),    // Results
            Constraint::Length(1), // Pagination
        ])
        .split(area);

    render_search_box(frame, chunks[0], catalog, editing);
    render_genre_bar(frame, chunks[1], catalog);
    render_results(frame, chunks[2], catalog);
    render_pagination(frame, chunks[3], catalog);
}

fn render_search_box(frame: &mut Frame, area: Rect, catalog: &CatalogBrowser, editing: bool) {
    let text = if editing {
        let (before, after) = catalog.search.split_at_cursor();
        format!("⌕ {}│{}", before, after)
    } else if catalog.search.value.is_empty() {
        "⌕ Press / to search movies & TV shows...".to_string()
    } else {
        format!("⌕ {}", catalog.search.value)
    };

    let border = if editing {
        Theme::border_focused()
    } else {
        Theme::border()
    };

    let search = Paragraph::new(text).style(Theme::input()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border)
            .title(Span::styled(" SEARCH ", Theme::title())),
    );
    frame.render_widget(search, area);
}

fn render_genre_bar(frame: &mut Frame, area: Rect, catalog: &CatalogBrowser) {
    let focused = catalog.focus == CatalogFocus::Genres;

    let mut spans = vec![Span::styled("Genres ", Theme::dimmed())];
    match &catalog.genres_state {
        LoadState::Loading => spans.push(Span::styled("loading...", Theme::loading())),
        LoadState::Failed(_) => {
            spans.push(Span::styled("unavailable (r to retry)", Theme::error()))
        }
        _ => {
            let active = catalog.selected_genre();
            for (i, genre) in catalog.genres.iter().enumerate() {
                spans.push(chip(
                    &genre.name,
                    active == Some(genre.id),
                    focused && catalog.genre_cursor == i,
                ));
                spans.push(Span::raw(" "));
            }
            let trending_active = active.is_none() && catalog.active_search().is_none();
            spans.push(chip(
                "Trending",
                trending_active,
                focused && catalog.genre_cursor == catalog.genres.len(),
            ));
        }
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).wrap(Wrap { trim: true }),
        area,
    );
}

fn chip(label: &str, active: bool, cursor: bool) -> Span<'static> {
    let style = if active {
        Theme::chip_active()
    } else if cursor {
        Theme::chip_cursor()
    } else {
        Theme::chip()
    };
    let style = if cursor { style.add_modifier(Modifier::UNDERLINED) } else { style };
    Span::styled(format!(" {} ", label), style)
}

fn render_results(frame: &mut Frame, area: Rect, catalog: &CatalogBrowser) {
    let mut title = match catalog.active_search() {
        Some(q) => format!(" Results for \"{}\" ", q),
        None => " Welcome to HeisFlix Movies ".to_string(),
    };
    if catalog.state.is_loading() && !catalog.results.is_empty() {
        title.push_str("⟳ ");
    }

    let focused = catalog.focus == CatalogFocus::Results;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            Theme::border_focused()
        } else {
            Theme::border()
        })
        .title(Span::styled(title, Theme::title()));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if catalog.results.is_empty() {
        if let Some((text, style)) =
            state_message(&catalog.state, "Loading...", "No movies or shows found.")
        {
            render_message(frame, inner, &text, style);
        }
        return;
    }

    let (list_area, detail_area) = if inner.width >= DETAIL_MIN_WIDTH {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(inner);
        (cols[0], Some(cols[1]))
    } else {
        (inner, None)
    };

    // A failed refresh keeps the old rows and reports above them
    let list_area = if let LoadState::Failed(e) = &catalog.state {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(1)])
            .split(list_area);
        frame.render_widget(
            Paragraph::new(Span::styled(format!("✗ {}", e), Theme::error())),
            rows[0],
        );
        rows[1]
    } else {
        list_area
    };

    render_item_list(
        frame,
        list_area,
        &catalog.results.items,
        &catalog.list,
        |item| catalog.is_favorite(item.id),
    );

    if let (Some(detail_area), Some(item)) = (detail_area, catalog.selected_item()) {
        render_item_detail(frame, detail_area, item, catalog.is_favorite(item.id));
    }
}

/// Scrolling list of catalog items; shared with the watchlist view
pub(crate) fn render_item_list(
    frame: &mut Frame,
    area: Rect,
    items: &[CatalogItem],
    list: &ListState,
    is_favorite: impl Fn(&CatalogItem) -> bool,
) {
    let mut view = list.clone();
    view.scroll_into_view(area.height as usize);

    let rows: Vec<ListItem> = items
        .iter()
        .enumerate()
        .skip(view.offset)
        .take(area.height as usize)
        .map(|(i, item)| {
            let is_selected = i == view.selected;
            let marker = if is_selected { "▸ " } else { "  " };
            let heart = if is_favorite(item) { "♥ " } else { "  " };
            let year = item.year().map(|y| format!(" ({})", y)).unwrap_or_default();

            let mut spans = vec![
                Span::styled(marker, Theme::accent()),
                Span::styled(heart, Theme::favorite()),
                Span::styled(item.title.clone(), Theme::text()),
                Span::styled(year, Theme::year()),
                Span::raw(" "),
                Span::styled(format!("[{}]", item.media_type), Theme::kind()),
            ];
            if let Some(vote) = item.vote_average {
                spans.push(Span::raw(" "));
                spans.push(Span::styled(format!("★ {:.1}", vote), Theme::rating(vote)));
            }

            let line = Line::from(spans);
            if is_selected {
                ListItem::new(line).style(Theme::highlighted())
            } else {
                ListItem::new(line)
            }
        })
        .collect();

    frame.render_widget(List::new(rows), area);
}

/// Overview pane for the selected item
pub(crate) fn render_item_detail(frame: &mut Frame, area: Rect, item: &CatalogItem, favorite: bool) {
    let mut lines = vec![
        Line::from(Span::styled(item.title.clone(), Theme::title())),
        Line::from(vec![
            Span::styled(item.media_type.to_string(), Theme::kind()),
            Span::styled(
                item.year().map(|y| format!("  {}", y)).unwrap_or_default(),
                Theme::year(),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            item.overview
                .clone()
                .filter(|o| !o.is_empty())
                .unwrap_or_else(|| "No overview available.".into()),
            Theme::text(),
        )),
        Line::from(""),
    ];
    if let Some(poster) = item.poster_url() {
        lines.push(Line::from(Span::styled(poster, Theme::dimmed())));
    }
    lines.push(Line::from(if favorite {
        Span::styled("♥ In your watchlist", Theme::favorite())
    } else {
        Span::styled("w: add to watchlist", Theme::dimmed())
    }));

    let detail = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::LEFT)
            .border_style(Theme::border())
            .padding(ratatui::widgets::Padding::horizontal(1)),
    );
    frame.render_widget(detail, area);
}

fn render_pagination(frame: &mut Frame, area: Rect, catalog: &CatalogBrowser) {
    let page = catalog.results.page;
    let total = catalog.results.total_pages;
    let prev = if page > 1 { "< Prev" } else { "      " };
    let next = if page < total { "Next >" } else { "      " };

    let line = Line::from(vec![
        Span::styled(prev, Theme::keybind()),
        Span::styled(format!("   Page {} of {}   ", page, total), Theme::text()),
        Span::styled(next, Theme::keybind()),
    ]);
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}
