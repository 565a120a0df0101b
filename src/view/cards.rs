//! Swipeable card deck rendering
//!
//! The top card follows the live drag/animation pose; the next card peeks
//! out from underneath. Cards sliding past the edge are clipped instead of
//! wrapped, so an exiting card visibly leaves the screen.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::utils::{centered_rect, format_duration};
use crate::model::swipe::DeckSnapshot;
use crate::model::{CandidateCard, SwipeDirection};

pub const CARD_WIDTH: u16 = 36;
pub const CARD_HEIGHT: u16 = 11;

pub fn render_deck(frame: &mut Frame, area: Rect, deck: &DeckSnapshot) {
    let Some(top) = &deck.top else {
        render_empty(frame, area);
        return;
    };

    let base = centered_rect(CARD_WIDTH, CARD_HEIGHT, area);

    if let Some(preview) = &deck.preview {
        if let Some(behind) = offset_rect(base, 2.0, 1.0, area) {
            render_card(frame, behind, preview, Style::default().fg(Color::DarkGray), true);
        }
    }

    let border = match deck.lean {
        Some(SwipeDirection::Right) => Style::default().fg(Color::Green),
        Some(SwipeDirection::Left) => Style::default().fg(Color::Red),
        None if deck.dragging => Style::default().fg(Color::Yellow),
        None => Style::default().fg(Color::White),
    };

    if let Some(card_rect) = offset_rect(base, deck.pose.dx, deck.pose.dy, area) {
        render_card(frame, card_rect, top, border, false);
        if let Some(direction) = deck.lean {
            render_stamp(frame, card_rect, direction, deck.pose.rotation_deg);
        }
    }

    let footer = Rect {
        x: area.x,
        y: area.bottom().saturating_sub(1),
        width: area.width,
        height: 1,
    };
    let count = match deck.remaining {
        1 => "1 song in the stack".to_string(),
        n => format!("{} songs in the stack", n),
    };
    frame.render_widget(
        Paragraph::new(count)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        footer,
    );
}

/// Shift `base` by a fractional column/row offset and clip the result to
/// `bounds`. Returns None once the card has fully left the visible area.
fn offset_rect(base: Rect, dx: f32, dy: f32, bounds: Rect) -> Option<Rect> {
    let x = base.x as i32 + dx.round() as i32;
    let y = base.y as i32 + dy.round() as i32;
    let right = x + base.width as i32;
    let bottom = y + base.height as i32;

    if right <= bounds.x as i32
        || x >= bounds.right() as i32
        || bottom <= bounds.y as i32
        || y >= bounds.bottom() as i32
    {
        return None;
    }

    let clip_x = x.max(bounds.x as i32);
    let clip_y = y.max(bounds.y as i32);
    let clip_right = right.min(bounds.right() as i32);
    let clip_bottom = bottom.min(bounds.bottom() as i32);
    Some(Rect {
        x: clip_x as u16,
        y: clip_y as u16,
        width: (clip_right - clip_x) as u16,
        height: (clip_bottom - clip_y) as u16,
    })
}

fn render_card(
    frame: &mut Frame,
    area: Rect,
    card: &CandidateCard,
    border_style: Style,
    dimmed: bool,
) {
    frame.render_widget(Clear, area);

    let (title_style, artist_style, meta_style) = if dimmed {
        (
            Style::default().fg(Color::DarkGray),
            Style::default().fg(Color::DarkGray),
            Style::default().fg(Color::DarkGray),
        )
    } else {
        (
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            Style::default().fg(Color::Cyan),
            Style::default().fg(Color::DarkGray),
        )
    };

    let meta = if card.genre.is_empty() {
        format_duration(card.duration_ms)
    } else {
        format!("{} · {}", card.genre, format_duration(card.duration_ms))
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("♪", Style::default().fg(Color::Magenta))),
        Line::from(""),
        Line::from(Span::styled(card.title.clone(), title_style)),
        Line::from(Span::styled(card.artist.clone(), artist_style)),
        Line::from(Span::styled(card.album.clone(), meta_style)),
        Line::from(""),
        Line::from(Span::styled(meta, meta_style)),
    ];

    let body = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .style(Style::default().bg(Color::Black)),
    );
    frame.render_widget(body, area);
}

/// LIKE/SKIP stamp near the card's top corner, nudged sideways with the
/// current tilt.
fn render_stamp(frame: &mut Frame, card: Rect, direction: SwipeDirection, rotation_deg: f32) {
    let (text, color) = match direction {
        SwipeDirection::Right => ("LIKE", Color::Green),
        SwipeDirection::Left => ("SKIP", Color::Red),
    };
    let width = text.len() as u16 + 4;
    if card.width < width + 4 || card.height < 5 {
        return;
    }

    let nudge = (rotation_deg / 6.0).round() as i32;
    let base_x = match direction {
        SwipeDirection::Right => card.x as i32 + 2,
        SwipeDirection::Left => card.right() as i32 - width as i32 - 2,
    };
    let min_x = card.x as i32 + 1;
    let max_x = (card.right() - width - 1) as i32;
    let x = (base_x + nudge).clamp(min_x, max_x) as u16;

    let stamp_area = Rect {
        x,
        y: card.y + 1,
        width,
        height: 3,
    };
    frame.render_widget(Clear, stamp_area);
    let stamp = Paragraph::new(text)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );
    frame.render_widget(stamp, stamp_area);
}

fn render_empty(frame: &mut Frame, area: Rect) {
    let rect = centered_rect(38, 7, area);
    let msg = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            "You're all caught up!",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "No more songs right now.",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(msg, rect);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_keeps_card_inside_bounds() {
        let bounds = Rect::new(0, 0, 80, 24);
        let base = centered_rect(CARD_WIDTH, CARD_HEIGHT, bounds);

        let shifted = offset_rect(base, 10.0, 0.0, bounds).unwrap();
        assert_eq!(shifted.x, base.x + 10);
        assert_eq!(shifted.width, CARD_WIDTH);
    }

    #[test]
    fn offset_clips_at_the_edge() {
        let bounds = Rect::new(0, 0, 80, 24);
        let base = centered_rect(CARD_WIDTH, CARD_HEIGHT, bounds);

        // Push far enough right that only part of the card remains
        let shifted = offset_rect(base, 50.0, 0.0, bounds).unwrap();
        assert!(shifted.width < CARD_WIDTH);
        assert_eq!(shifted.right(), bounds.right());
    }

    #[test]
    fn offset_none_once_fully_off_screen() {
        let bounds = Rect::new(0, 0, 80, 24);
        let base = centered_rect(CARD_WIDTH, CARD_HEIGHT, bounds);

        assert!(offset_rect(base, 200.0, 0.0, bounds).is_none());
        assert!(offset_rect(base, -200.0, 0.0, bounds).is_none());
    }
}
