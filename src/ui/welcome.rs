//! Welcome and login views

use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::Theme;
use crate::screens::{LoginField, LoginScreen, TextInput};

pub fn render_welcome(frame: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled("HEISFLIX", Theme::logo())),
        Line::from(""),
        Line::from(Span::styled(
            "Unlimited movies, TV shows, and more.",
            Theme::text(),
        )),
        Line::from(Span::styled(
            "Browse trending titles, watch trailers, keep a watchlist.",
            Theme::dimmed(),
        )),
        Line::from(""),
        Line::from(""),
        Line::from(vec![
            Span::styled(" ↵ ", Theme::keybind()),
            Span::styled("Get Started  ", Theme::text()),
            Span::styled(" q ", Theme::keybind()),
            Span::styled("Quit", Theme::dimmed()),
        ]),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

pub fn render_login(frame: &mut Frame, area: Rect, login: &LoginScreen) {
    let width = 50.min(area.width);
    let height = 12.min(area.height);
    let form = Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Theme::border())
        .title(Span::styled(" Sign In ", Theme::title()));
    let inner = block.inner(form);
    frame.render_widget(block, form);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    render_field(
        frame,
        rows[0],
        "Email or username",
        &login.username,
        login.username.value.clone(),
        login.focus == LoginField::Username,
    );
    render_field(
        frame,
        rows[1],
        "Password",
        &login.password,
        login.masked_password(),
        login.focus == LoginField::Password,
    );

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(" ↵ ", Theme::keybind()),
            Span::styled("Sign In  ", Theme::text()),
            Span::styled(" esc ", Theme::keybind()),
            Span::styled("Back", Theme::dimmed()),
        ]))
        .alignment(Alignment::Center),
        rows[2],
    );
}

fn render_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    input: &TextInput,
    shown: String,
    focused: bool,
) {
    let text = if focused {
        // Caret position in displayed characters, masked or not
        let split = shown
            .char_indices()
            .nth(input.cursor)
            .map(|(i, _)| i)
            .unwrap_or(shown.len());
        let (before, after) = shown.split_at(split);
        format!("{}│{}", before, after)
    } else {
        shown
    };

    let field = Paragraph::new(text).style(Theme::input()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if focused {
                Theme::border_focused()
            } else {
                Theme::border()
            })
            .title(Span::styled(format!(" {} ", label), Theme::dimmed())),
    );
    frame.render_widget(field, area);
}
