//! Animated backdrop behind the outer screens
//!
//! A sparse field of note glyphs drifting sideways. Placement is a hash of
//! the cell coordinates so the pattern is stable frame to frame and only
//! the drift moves.

use ratatui::{
    Frame,
    style::{Color, Style},
    text::Line,
    widgets::Paragraph,
};

const GLYPHS: [char; 4] = ['♪', '♫', '·', '✧'];

/// Roughly one glyph per this many cells.
const DENSITY: u32 = 41;

pub fn render_backdrop(frame: &mut Frame, phase: f32) {
    let area = frame.area();
    let drift = (phase * 3.0) as u32;

    let mut lines: Vec<Line> = Vec::with_capacity(area.height as usize);
    for y in 0..area.height {
        let mut row = String::with_capacity(area.width as usize);
        for x in 0..area.width {
            // Alternate rows drift in opposite directions
            let wx = if y % 2 == 0 {
                (x as u32).wrapping_add(drift)
            } else {
                (x as u32).wrapping_sub(drift)
            };
            let hash = wx
                .wrapping_mul(2_654_435_761)
                .wrapping_add((y as u32).wrapping_mul(40_503));
            if hash % DENSITY == 0 {
                row.push(GLYPHS[(hash / DENSITY) as usize % GLYPHS.len()]);
            } else {
                row.push(' ');
            }
        }
        lines.push(Line::from(row));
    }

    let field = Paragraph::new(lines).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(field, area);
}
