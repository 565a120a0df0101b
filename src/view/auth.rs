//! Login form

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::backdrop::render_backdrop;
use super::utils::centered_rect;
use crate::model::forms::{LoginField, LoginForm};

pub fn render_login(frame: &mut Frame, phase: f32, form: &LoginForm) {
    render_backdrop(frame, phase);

    let area = frame.area();
    let panel = centered_rect(52, 14, area);
    frame.render_widget(Clear, panel);

    let outer = Block::default()
        .borders(Borders::ALL)
        .title(" Log In ")
        .title_style(
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )
        .border_style(Style::default().fg(Color::Magenta))
        .style(Style::default().bg(Color::Black));
    let inner = outer.inner(panel);
    frame.render_widget(outer, panel);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Username or email
            Constraint::Length(3), // Password
            Constraint::Length(1), // Validation error
            Constraint::Length(1),
            Constraint::Min(1), // Status / hints
        ])
        .split(inner);

    render_input(
        frame,
        chunks[0],
        " Username or email ",
        &form.identifier,
        form.focus == LoginField::Identifier,
        false,
    );
    render_input(
        frame,
        chunks[1],
        " Password ",
        &form.password,
        form.focus == LoginField::Password,
        !form.show_password,
    );

    if let Some(error) = &form.error {
        let line = Paragraph::new(error.as_str())
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center);
        frame.render_widget(line, chunks[2]);
    }

    let status = if form.submitting {
        Line::from(Span::styled(
            "Signing in...",
            Style::default().fg(Color::Yellow),
        ))
    } else {
        Line::from(Span::styled(
            "Enter submit   Tab switch   Ctrl+R show password   Esc back",
            Style::default().fg(Color::DarkGray),
        ))
    };
    frame.render_widget(
        Paragraph::new(status).alignment(Alignment::Center),
        chunks[4],
    );
}

/// One bordered text input. The focused field gets a green border and a
/// block cursor after the text.
pub(super) fn render_input(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    focused: bool,
    masked: bool,
) {
    let shown = if masked {
        "•".repeat(value.chars().count())
    } else {
        value.to_string()
    };
    let display = if focused {
        format!("{}█", shown)
    } else {
        shown
    };

    let border_style = if focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let input = Paragraph::new(display)
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(label.to_string())
                .border_style(border_style),
        );
    frame.render_widget(input, area);
}
