//! Landing screen with the main menu

use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph},
};

use super::backdrop::render_backdrop;
use super::utils::centered_rect;
use crate::model::types::WelcomeChoice;

const MENU: [WelcomeChoice; 3] = [
    WelcomeChoice::LogIn,
    WelcomeChoice::SignUp,
    WelcomeChoice::Quit,
];

pub fn render_welcome(frame: &mut Frame, phase: f32, choice: WelcomeChoice) {
    render_backdrop(frame, phase);

    let area = frame.area();
    let panel = centered_rect(46, 15, area);
    frame.render_widget(Clear, panel);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "🎵  nowNoise",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "find your next favorite song",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(""),
    ];

    for item in MENU {
        let selected = item == choice;
        let marker = if selected { "▸ " } else { "  " };
        let style = if selected {
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        lines.push(Line::from(Span::styled(
            format!("{}{}", marker, item.label()),
            style,
        )));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(
        "↑/↓ select   Enter confirm   ? help",
        Style::default().fg(Color::DarkGray),
    )));

    let menu = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta))
            .padding(Padding::horizontal(1))
            .style(Style::default().bg(Color::Black)),
    );
    frame.render_widget(menu, panel);
}
