//! Sports highlights view

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph, Wrap},
};

use super::{render_message, state_message, Theme};
use crate::models::Highlight;
use crate::screens::SportsBrowser;

pub fn render(frame: &mut Frame, area: Rect, sports: &SportsBrowser) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border_focused())
        .title(Span::styled(" Football Highlights ", Theme::title()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if sports.highlights.is_empty() || sports.state.is_failed() {
        if let Some((text, style)) = state_message(
            &sports.state,
            "Loading sports highlights...",
            "No sports news available at this time.",
        ) {
            render_message(frame, inner, &text, style);
            return;
        }
    }

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(inner);

    let mut view = sports.list.clone();
    view.scroll_into_view(cols[0].height as usize);

    let rows: Vec<ListItem> = sports
        .highlights
        .iter()
        .enumerate()
        .skip(view.offset)
        .take(cols[0].height as usize)
        .map(|(i, h)| {
            let is_selected = i == view.selected;
            let line = Line::from(vec![
                Span::styled(if is_selected { "▸ " } else { "  " }, Theme::accent()),
                Span::styled(h.title.clone(), Theme::text()),
            ]);
            if is_selected {
                ListItem::new(line).style(Theme::highlighted())
            } else {
                ListItem::new(line)
            }
        })
        .collect();
    frame.render_widget(List::new(rows), cols[0]);

    if let Some(highlight) = sports.selected() {
        render_highlight(frame, cols[1], highlight, sports.selected_video());
    }
}

fn render_highlight(frame: &mut Frame, area: Rect, highlight: &Highlight, picked: usize) {
    let mut lines = vec![
        Line::from(Span::styled(highlight.title.clone(), Theme::title())),
        Line::from(Span::styled(
            highlight.competition.clone().unwrap_or_default(),
            Theme::dimmed(),
        )),
    ];
    if let Some(date) = &highlight.date {
        lines.push(Line::from(Span::styled(date.clone(), Theme::year())));
    }
    lines.push(Line::from(""));

    for (i, video) in highlight.videos.iter().enumerate() {
        let marker = if i == picked { "▶ " } else { "  " };
        lines.push(Line::from(vec![
            Span::styled(marker, Theme::success()),
            Span::styled(video.title.clone(), Theme::text()),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Watch Full Highlights >", Theme::accent()),
        Span::styled("  (o)", Theme::dimmed()),
    ]));
    lines.push(Line::from(Span::styled(
        highlight.matchview_url.clone(),
        Theme::dimmed(),
    )));

    let detail = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::LEFT)
            .border_style(Theme::border()),
    );
    frame.render_widget(detail, area);
}
