//! Post-signup walkthrough

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use super::cards::render_deck;
use crate::model::tutorial::TutorialSnapshot;

pub fn render_tutorial(frame: &mut Frame, tutorial: &TutorialSnapshot) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2), // Icon + title
            Constraint::Length(3), // Body text
            Constraint::Min(0),    // Demo deck
            Constraint::Length(1), // Caption
            Constraint::Length(1), // Progress dots
            Constraint::Length(1), // Hints
        ])
        .split(area);

    let slide = &tutorial.slide;

    let title = Paragraph::new(Line::from(vec![
        Span::raw(slide.icon),
        Span::raw("  "),
        Span::styled(
            slide.title.clone(),
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    let body = Paragraph::new(slide.body)
        .style(Style::default().fg(Color::White))
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center);
    frame.render_widget(body, chunks[1]);

    if slide.shows_cards {
        render_deck(frame, chunks[2], &tutorial.deck);
    }

    if let Some(caption) = slide.caption {
        let caption = Paragraph::new(caption)
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center);
        frame.render_widget(caption, chunks[3]);
    }

    let dots: Vec<&str> = (0..tutorial.len)
        .map(|i| if i == tutorial.index { "●" } else { "○" })
        .collect();
    let progress = Paragraph::new(dots.join(" "))
        .style(Style::default().fg(Color::Magenta))
        .alignment(Alignment::Center);
    frame.render_widget(progress, chunks[4]);

    let hints = Paragraph::new("n/→ next   p/← back   s skip   q quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(hints, chunks[5]);
}
