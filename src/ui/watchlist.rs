//! Watchlist view

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders},
};

use super::browser::{render_item_detail, render_item_list};
use super::{render_message, state_message, Theme};
use crate::screens::FavoritesBrowser;

pub fn render(frame: &mut Frame, area: Rect, favorites: &FavoritesBrowser) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border_focused())
        .title(Span::styled(
            format!(" My Watchlist ({}) ", favorites.len()),
            Theme::title(),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if let Some((text, style)) =
        state_message(&favorites.state, "Loading...", "Your watchlist is empty.")
    {
        render_message(frame, inner, &text, style);
        return;
    }

    let (list_area, detail_area) = if inner.width >= 100 {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(inner);
        (cols[0], Some(cols[1]))
    } else {
        (inner, None)
    };

    render_item_list(frame, list_area, favorites.items(), &favorites.list, |_| true);

    if let (Some(area), Some(item)) = (detail_area, favorites.selected_item()) {
        render_item_detail(frame, area, item, true);
    }
}
