//! Utility functions for rendering UI components

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    widgets::{Block, List, ListItem, ListState},
};

pub fn render_scrollable_list(
    frame: &mut Frame,
    area: Rect,
    items: Vec<ListItem>,
    selected_index: usize,
    block: Block,
) {
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default()); // Highlight handled by item styles

    let mut list_state = ListState::default();
    list_state.select(Some(selected_index));

    frame.render_stateful_widget(list, area, &mut list_state);
}

pub fn format_duration(ms: u32) -> String {
    let total_seconds = ms / 1000;
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{}:{:02}", minutes, seconds)
}

pub fn format_followers(count: u64) -> String {
    if count >= 1_000_000 {
        format!("{:.1}M", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.1}K", count as f64 / 1_000.0)
    } else {
        count.to_string()
    }
}

/// Calculate width needed for index column (log10(n) + padding)
pub fn calculate_num_width(item_count: usize) -> usize {
    if item_count == 0 {
        2
    } else {
        let digits = (item_count as f64).log10().floor() as usize + 1;
        digits + 1
    }
}

pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.chars().count() > max_width {
        let truncated: String = s.chars().take(max_width.saturating_sub(3)).collect();
        format!("{:<width$}", format!("{}...", truncated), width = max_width)
    } else {
        format!("{:<width$}", s, width = max_width)
    }
}

/// Fixed-size rect centered inside `area`, shrunk to fit when needed.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect {
        x: area.x + (area.width - w) / 2,
        y: area.y + (area.height - h) / 2,
        width: w,
        height: h,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_pads_seconds() {
        assert_eq!(format_duration(203_000), "3:23");
        assert_eq!(format_duration(61_000), "1:01");
        assert_eq!(format_duration(900), "0:00");
    }

    #[test]
    fn followers_scale_units() {
        assert_eq!(format_followers(342), "342");
        assert_eq!(format_followers(34_512), "34.5K");
        assert_eq!(format_followers(1_200_000), "1.2M");
    }

    #[test]
    fn truncate_pads_and_clips() {
        assert_eq!(truncate_string("ab", 4), "ab  ");
        assert_eq!(truncate_string("abcdefgh", 6), "abc...");
    }

    #[test]
    fn centered_rect_fits_inside_small_areas() {
        let area = Rect::new(0, 0, 10, 4);
        let rect = centered_rect(40, 12, area);
        assert_eq!(rect.width, 10);
        assert_eq!(rect.height, 4);
    }
}
