//! Overlay rendering (notices, connect link, confirm dialog, help popup)

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::utils::centered_rect;
use crate::model::Screen;

pub fn render_error_notice(frame: &mut Frame, message: &str) {
    let area = frame.area();

    // Fixed width popup (responsive to screen size)
    let popup_width = 52.min(area.width.saturating_sub(4));
    let inner_width = popup_width.saturating_sub(4) as usize;

    // Calculate how many lines the message will take when wrapped
    let line_count = ((message.chars().count() as f32) / (inner_width as f32)).ceil() as u16;
    let popup_height = (2 + line_count.max(1)).min(area.height.saturating_sub(4));

    let popup_area = Rect {
        x: area.width.saturating_sub(popup_width) / 2,
        y: area.height.saturating_sub(popup_height) / 2,
        width: popup_width,
        height: popup_height,
    };

    frame.render_widget(Clear, popup_area);

    let notice = Paragraph::new(message.to_string())
        .style(Style::default().fg(Color::Red))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title(" Error (Esc to dismiss) ")
                .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
                .style(Style::default().bg(Color::Black)),
        );
    frame.render_widget(notice, popup_area);
}

/// Non-blocking toast near the bottom of the screen. Expires on its own.
pub fn render_info_toast(frame: &mut Frame, message: &str) {
    let area = frame.area();
    if area.height < 5 {
        return;
    }

    let width = (message.chars().count() as u16 + 4)
        .min(area.width.saturating_sub(4))
        .max(20);
    let toast_area = Rect {
        x: area.width.saturating_sub(width) / 2,
        y: area.height.saturating_sub(4),
        width,
        height: 3,
    };

    frame.render_widget(Clear, toast_area);
    let toast = Paragraph::new(message.to_string())
        .style(Style::default().fg(Color::Green))
        .alignment(ratatui::layout::Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green))
                .style(Style::default().bg(Color::Black)),
        );
    frame.render_widget(toast, toast_area);
}

pub fn render_connect_modal(frame: &mut Frame, url: &str) {
    let area = frame.area();
    let popup_area = centered_rect(64, 10, area);

    frame.render_widget(Clear, popup_area);

    let lines = vec![
        Line::from("Open this link in your browser to authorize:"),
        Line::from(""),
        Line::from(Span::styled(
            url.to_string(),
            Style::default().fg(Color::Cyan),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press r on the dashboard after approving access.",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let modal = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Connect Spotify (Esc to close) ")
                .title_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )
                .style(Style::default().bg(Color::Black)),
        );
    frame.render_widget(modal, popup_area);
}

pub fn render_confirm_disconnect(frame: &mut Frame) {
    let area = frame.area();
    let popup_area = centered_rect(44, 5, area);

    frame.render_widget(Clear, popup_area);

    let dialog = Paragraph::new(vec![
        Line::from("Disconnect Spotify from nowNoise?"),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                "y",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" yes   "),
            Span::styled(
                "n",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" no"),
        ]),
    ])
    .alignment(ratatui::layout::Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(" Disconnect ")
            .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
            .style(Style::default().bg(Color::Black)),
    );
    frame.render_widget(dialog, popup_area);
}

pub fn render_help_popup(frame: &mut Frame, screen: Screen) {
    let area = frame.area();

    let keybindings: Vec<(&str, &str)> = match screen {
        Screen::Dashboard => vec![
            ("", "── Tabs ──"),
            ("Tab / Shift+Tab", "Next / previous tab"),
            ("1-4", "Jump to a tab"),
            ("", ""),
            ("", "── Discover ──"),
            ("Mouse drag", "Swipe the top card"),
            ("← / →", "Lean the card"),
            ("Enter / Space", "Release the card"),
            ("", ""),
            ("", "── Music ──"),
            ("← / →", "Switch panel"),
            ("↑ / ↓", "Move selection"),
            ("T", "Cycle time range"),
            ("", ""),
            ("", "── Account ──"),
            ("C", "Connect Spotify"),
            ("D", "Disconnect Spotify"),
            ("R", "Refresh data"),
            ("X", "Log out (Profile tab)"),
            ("", ""),
            ("", "── General ──"),
            ("?", "Toggle this help"),
            ("Q", "Quit"),
        ],
        _ => vec![
            ("", "── Navigation ──"),
            ("↑ / ↓", "Move selection"),
            ("Enter", "Choose"),
            ("Esc", "Go back"),
            ("", ""),
            ("", "── General ──"),
            ("?", "Toggle this help"),
            ("Q", "Quit"),
        ],
    };

    let popup_width = 58;
    let popup_height = (keybindings.len() as u16 + 2).min(area.height.saturating_sub(4));

    let popup_area = Rect {
        x: area.width.saturating_sub(popup_width) / 2,
        y: area.height.saturating_sub(popup_height) / 2,
        width: popup_width.min(area.width),
        height: popup_height,
    };

    frame.render_widget(Clear, popup_area);

    let lines: Vec<Line> = keybindings
        .iter()
        .map(|(key, desc)| {
            if key.is_empty() {
                // Section header or empty line
                Line::from(Span::styled(
                    format!("{:^38}", desc),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(vec![
                    Span::styled(
                        format!("{:>18}", key),
                        Style::default()
                            .fg(Color::Green)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::styled(desc.to_string(), Style::default().fg(Color::White)),
                ])
            }
        })
        .collect();

    let help_text = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help (? or Esc to close) ")
                .title_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )
                .style(Style::default().bg(Color::Black)),
        )
        .style(Style::default().bg(Color::Black));

    frame.render_widget(help_text, popup_area);
}
