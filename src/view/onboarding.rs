//! Three-step signup flow

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::auth::render_input;
use super::backdrop::render_backdrop;
use super::utils::centered_rect;
use crate::model::forms::{
    AVATAR_GRID_COLS, AVATARS, AvatarPicker, BasicInfoForm, GENRE_GRID_COLS, GENRES,
    GenreSelection, MAX_GENRES, SignupField, SignupFlow, SignupStep,
};

pub fn render_signup(frame: &mut Frame, phase: f32, flow: &SignupFlow) {
    render_backdrop(frame, phase);

    let area = frame.area();
    let panel = centered_rect(58, 21, area);
    frame.render_widget(Clear, panel);

    let title = format!(
        " Sign Up · Step {}/3 · {} ",
        flow.step.number(),
        flow.step.title()
    );
    let outer = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .title_style(
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )
        .border_style(Style::default().fg(Color::Magenta))
        .style(Style::default().bg(Color::Black));
    let inner = outer.inner(panel);
    frame.render_widget(outer, panel);

    match flow.step {
        SignupStep::BasicInfo => render_basic_info(frame, inner, &flow.basic),
        SignupStep::Genres => render_genre_grid(frame, inner, &flow.genres),
        SignupStep::Avatar => render_avatar_grid(frame, inner, &flow.avatar, flow.submitting),
    }
}

fn render_basic_info(frame: &mut Frame, area: Rect, form: &BasicInfoForm) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Username
            Constraint::Length(1),
            Constraint::Length(3), // Email
            Constraint::Length(1),
            Constraint::Length(3), // Password
            Constraint::Length(1),
            Constraint::Min(1), // Hints
        ])
        .split(area);

    render_input(
        frame,
        chunks[0],
        " Username ",
        &form.username,
        form.focus == SignupField::Username,
        false,
    );
    render_field_error(frame, chunks[1], form.username_error.as_deref());

    render_input(
        frame,
        chunks[2],
        " Email ",
        &form.email,
        form.focus == SignupField::Email,
        false,
    );
    render_field_error(frame, chunks[3], form.email_error.as_deref());

    render_input(
        frame,
        chunks[4],
        " Password ",
        &form.password,
        form.focus == SignupField::Password,
        !form.show_password,
    );
    render_field_error(frame, chunks[5], form.password_error.as_deref());

    let hints = Paragraph::new(Span::styled(
        "Enter continue   Tab next field   Ctrl+R show password   Esc back",
        Style::default().fg(Color::DarkGray),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(hints, chunks[6]);
}

fn render_field_error(frame: &mut Frame, area: Rect, error: Option<&str>) {
    if let Some(error) = error {
        let line = Paragraph::new(error).style(Style::default().fg(Color::Red));
        frame.render_widget(line, area);
    }
}

fn render_genre_grid(frame: &mut Frame, area: Rect, selection: &GenreSelection) {
    let mut lines = vec![
        Line::from(Span::styled(
            format!(
                "Pick up to {} genres · {} selected",
                MAX_GENRES,
                selection.selected.len()
            ),
            Style::default().fg(Color::Cyan),
        )),
        Line::from(""),
    ];

    for (row, genres) in GENRES.chunks(GENRE_GRID_COLS).enumerate() {
        let mut spans = Vec::new();
        for (col, genre) in genres.iter().enumerate() {
            let index = row * GENRE_GRID_COLS + col;
            let selected = selection.selected.contains(&genre.id);
            let at_cursor = index == selection.cursor;

            let check = if selected { "✓" } else { " " };
            let cell = format!(" {} {} {:<10}", check, genre.icon, genre.name);
            let style = if at_cursor {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            } else if selected {
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            spans.push(Span::styled(cell, style));
            spans.push(Span::raw("  "));
        }
        lines.push(Line::from(spans));
        lines.push(Line::from(""));
    }

    if let Some(error) = &selection.error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        )));
    } else {
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        "←→↑↓ move   Space toggle   Enter continue   Esc back",
        Style::default().fg(Color::DarkGray),
    )));

    let grid = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(grid, inset(area));
}

fn render_avatar_grid(frame: &mut Frame, area: Rect, picker: &AvatarPicker, submitting: bool) {
    let mut lines = vec![
        Line::from(Span::styled(
            "How should other listeners see you?",
            Style::default().fg(Color::Cyan),
        )),
        Line::from(""),
        Line::from(""),
    ];

    for (row, avatars) in AVATARS.chunks(AVATAR_GRID_COLS).enumerate() {
        let mut spans = Vec::new();
        for (col, avatar) in avatars.iter().enumerate() {
            let index = row * AVATAR_GRID_COLS + col;
            let chosen = picker.chosen == Some(avatar.id);
            let at_cursor = index == picker.cursor;

            let cell = if chosen {
                format!("  ✓{}  ", avatar.face)
            } else {
                format!("   {}  ", avatar.face)
            };
            let style = if at_cursor {
                Style::default().bg(Color::Green).add_modifier(Modifier::BOLD)
            } else if chosen {
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            spans.push(Span::styled(cell, style));
            spans.push(Span::raw(" "));
        }
        lines.push(Line::from(spans));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(""));
    let status = if submitting {
        Span::styled("Creating your account...", Style::default().fg(Color::Yellow))
    } else {
        Span::styled(
            "←→↑↓ move   Space pick   Enter create account   s skip   Esc back",
            Style::default().fg(Color::DarkGray),
        )
    };
    lines.push(Line::from(status));

    let grid = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(grid, inset(area));
}

fn inset(area: Rect) -> Rect {
    Rect {
        x: area.x + 1,
        y: area.y + 1,
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}
