//! Trailer overlay
//!
//! Drawn over the whole frame. The content box geometry comes from
//! `screens::overlay::content_area` so mouse hit-testing and drawing agree.

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

use super::Theme;
use crate::models::{PlaybackSource, PlaybackTarget};
use crate::screens::overlay::content_area;

pub fn render(frame: &mut Frame, area: Rect, target: &PlaybackTarget) {
    let popup = content_area(area);
    frame.render_widget(Clear, popup);

    let item = &target.item;
    let mut lines = vec![
        Line::from(Span::styled(item.to_string(), Theme::title())),
        Line::from(""),
    ];

    match target.source() {
        _ if target.resolving => {
            lines.push(Line::from(Span::styled("⟳ Looking for a trailer...", Theme::loading())));
        }
        PlaybackSource::Trailer(url) => {
            lines.push(Line::from(Span::styled("▶ Trailer", Theme::success())));
            lines.push(Line::from(Span::styled(url, Theme::text())));
        }
        PlaybackSource::Fallback(url) => {
            lines.push(Line::from(Span::styled("▶ Full video", Theme::success())));
            lines.push(Line::from(Span::styled(url, Theme::text())));
        }
        PlaybackSource::Unavailable => {
            lines.push(Line::from(Span::styled(
                "Trailer or video not available.",
                Theme::error(),
            )));
        }
    }

    if let Some(overview) = item.overview.as_deref().filter(|o| !o.is_empty()) {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(overview.to_string(), Theme::dimmed())));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(" o ", Theme::keybind()),
        Span::styled("Play in external player  ", Theme::dimmed()),
        Span::styled(" x ", Theme::keybind()),
        Span::styled("Close", Theme::dimmed()),
    ]));

    let content = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Theme::border_focused())
            .title(Span::styled(" ✕ ", Theme::title()))
            .title_alignment(Alignment::Right)
            .style(Style::default().bg(Theme::BACKGROUND)),
    );
    frame.render_widget(content, popup);
}
