//! Signed-in dashboard rendering (overview, music, discover, profile)

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};
use ratatui::widgets::ListItem;

use super::cards::render_deck;
use super::utils::{
    calculate_num_width, centered_rect, format_duration, format_followers, render_scrollable_list,
    truncate_string,
};
use crate::model::User;
use crate::model::dashboard::{
    ArtistSummary, DashboardSnapshot, DashboardTab, MusicPanel, PlaylistSummary, TrackSummary,
};

pub fn render_dashboard(frame: &mut Frame, dashboard: &DashboardSnapshot, user: Option<&User>) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(0),    // Tab content
        ])
        .split(area);

    render_tab_bar(frame, chunks[0], dashboard.tab);

    match dashboard.tab {
        DashboardTab::Overview => render_overview(frame, chunks[1], dashboard, user),
        DashboardTab::Music => render_music(frame, chunks[1], dashboard),
        DashboardTab::Discover => render_discover(frame, chunks[1], dashboard, user),
        DashboardTab::Profile => render_profile(frame, chunks[1], user),
    }
}

fn render_tab_bar(frame: &mut Frame, area: Rect, active: DashboardTab) {
    let spans: Vec<Span> = DashboardTab::ALL
        .iter()
        .enumerate()
        .flat_map(|(i, tab)| {
            let style = if *tab == active {
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            vec![
                Span::styled(format!(" {} {} ", i + 1, tab.title()), style),
                Span::raw("  "),
            ]
        })
        .collect();

    let tabs = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" 🎵 nowNoise ")
            .title_style(
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            )
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(tabs, area);
}

fn render_overview(
    frame: &mut Frame,
    area: Rect,
    dashboard: &DashboardSnapshot,
    user: Option<&User>,
) {
    let connected = user.is_some_and(|u| u.spotify_connected);
    let username = user.map_or("there", |u| u.username.as_str());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Greeting
            Constraint::Min(0),    // Panels
        ])
        .split(area);

    let status = if connected {
        Span::styled("Spotify connected ✓", Style::default().fg(Color::Green))
    } else {
        Span::styled(
            "Spotify not connected · press c to link your account",
            Style::default().fg(Color::Yellow),
        )
    };
    let greeting = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("Welcome back, {}! 👋", username),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(status),
    ]);
    frame.render_widget(greeting, chunks[0]);

    if dashboard.loading {
        let loading = Paragraph::new("Loading...")
            .style(Style::default().fg(Color::Yellow))
            .block(Block::default().borders(Borders::ALL).title(" Overview "));
        frame.render_widget(loading, chunks[1]);
        return;
    }

    if !connected {
        let cta = Paragraph::new(vec![
            Line::from(""),
            Line::from("Link your Spotify account to see your top tracks,"),
            Line::from("playlists and listening history here."),
            Line::from(""),
            Line::from(Span::styled(
                "c connect   r check link status   d disconnect",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Get started ")
                .border_style(Style::default().fg(Color::Yellow)),
        );
        frame.render_widget(cta, chunks[1]);
        return;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    let mut account_lines = Vec::new();
    if let Some(profile) = &dashboard.profile {
        account_lines.push(Line::from(Span::styled(
            profile.display_name.clone(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )));
        if let Some(email) = &profile.email {
            account_lines.push(Line::from(email.clone()));
        }
        account_lines.push(Line::from(format!(
            "Followers: {}",
            format_followers(profile.followers)
        )));
        if let Some(country) = &profile.country {
            account_lines.push(Line::from(format!("Country: {}", country)));
        }
        if let Some(product) = &profile.product {
            account_lines.push(Line::from(format!("Plan: {}", product)));
        }
    } else {
        account_lines.push(Line::from(Span::styled(
            "Press r to load your profile",
            Style::default().fg(Color::DarkGray),
        )));
    }
    let account = Paragraph::new(account_lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Spotify account ")
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(account, columns[0]);

    let stats = Paragraph::new(vec![
        Line::from(format!("Playlists: {}", dashboard.playlists.len())),
        Line::from(format!(
            "Top tracks loaded: {} ({})",
            dashboard.top_tracks.len(),
            dashboard.time_range.label()
        )),
        Line::from(format!(
            "Recently played: {}",
            dashboard.recently_played.len()
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("💚 Liked this session: {}", dashboard.liked.len()),
            Style::default().fg(Color::Green),
        )),
        Line::from(format!("Skipped this session: {}", dashboard.skipped_count)),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" This session ")
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(stats, columns[1]);
}

fn render_music(frame: &mut Frame, area: Rect, dashboard: &DashboardSnapshot) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Panel tabs
            Constraint::Min(0),    // List
        ])
        .split(area);

    let counts = [
        dashboard.top_tracks.len(),
        dashboard.recently_played.len(),
        dashboard.playlists.len(),
        dashboard.top_artists.len(),
    ];
    let spans: Vec<Span> = MusicPanel::ALL
        .iter()
        .zip(counts)
        .flat_map(|(panel, count)| {
            let style = if *panel == dashboard.music_panel {
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            vec![
                Span::styled(format!(" {} ({}) ", panel.title(), count), style),
                Span::raw("  "),
            ]
        })
        .collect();

    let tabs = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Your music (←/→ to switch) "),
    );
    frame.render_widget(tabs, chunks[0]);

    if dashboard.loading {
        let loading = Paragraph::new("Loading...")
            .style(Style::default().fg(Color::Yellow))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(loading, chunks[1]);
        return;
    }

    let content_width = chunks[1].width.saturating_sub(4) as usize;
    let title = if dashboard.music_panel.time_ranged() {
        format!(
            " {} · {} (t to change) ",
            dashboard.music_panel.title(),
            dashboard.time_range.label()
        )
    } else {
        format!(" {} ", dashboard.music_panel.title())
    };

    let items = match dashboard.music_panel {
        MusicPanel::TopTracks => track_items(
            &dashboard.top_tracks,
            dashboard.music_selected,
            content_width,
        ),
        MusicPanel::RecentlyPlayed => recently_played_items(
            &dashboard.recently_played,
            dashboard.music_selected,
            content_width,
        ),
        MusicPanel::Playlists => playlist_items(
            &dashboard.playlists,
            dashboard.music_selected,
            content_width,
        ),
        MusicPanel::TopArtists => artist_items(
            &dashboard.top_artists,
            dashboard.music_selected,
            content_width,
        ),
    };

    if items.is_empty() {
        let empty = Paragraph::new("Nothing here yet. Press r to refresh.")
            .style(Style::default().fg(Color::DarkGray))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .padding(Padding::horizontal(1)),
            );
        frame.render_widget(empty, chunks[1]);
        return;
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding::horizontal(1));
    // +1 skips the header row
    render_scrollable_list(
        frame,
        chunks[1],
        items,
        dashboard.music_selected + 1,
        block,
    );
}

fn row_style(index: usize, selected: usize) -> Style {
    if index == selected {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

fn header_style() -> Style {
    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
}

fn track_items(
    tracks: &[TrackSummary],
    selected: usize,
    content_width: usize,
) -> Vec<ListItem<'static>> {
    if tracks.is_empty() {
        return Vec::new();
    }
    let num_width = calculate_num_width(tracks.len());
    let duration_width = 8;
    let fixed = 1 + num_width + 3 + 3 + 3 + duration_width;
    let remaining = content_width.saturating_sub(fixed);
    let title_width = (remaining * 55) / 100;
    let artist_width = remaining.saturating_sub(title_width);

    let mut items = vec![
        ListItem::new(format!(
            " {:<num_width$}   {:<title_width$}   {:<artist_width$}   {}",
            "#", "Title", "Artist", "Duration",
        ))
        .style(header_style()),
    ];
    items.extend(tracks.iter().enumerate().map(|(i, track)| {
        ListItem::new(format!(
            " {:<num_width$}   {}   {}   {}",
            i + 1,
            truncate_string(&track.name, title_width),
            truncate_string(&track.artist_line(), artist_width),
            format_duration(track.duration_ms),
        ))
        .style(row_style(i, selected))
    }));
    items
}

fn recently_played_items(
    tracks: &[TrackSummary],
    selected: usize,
    content_width: usize,
) -> Vec<ListItem<'static>> {
    if tracks.is_empty() {
        return Vec::new();
    }
    let num_width = calculate_num_width(tracks.len());
    let played_width = 12;
    let fixed = 1 + num_width + 3 + 3 + 3 + played_width;
    let remaining = content_width.saturating_sub(fixed);
    let title_width = (remaining * 55) / 100;
    let artist_width = remaining.saturating_sub(title_width);

    let mut items = vec![
        ListItem::new(format!(
            " {:<num_width$}   {:<title_width$}   {:<artist_width$}   {:<played_width$}",
            "#", "Title", "Artist", "Played",
        ))
        .style(header_style()),
    ];
    items.extend(tracks.iter().enumerate().map(|(i, track)| {
        let played = track
            .played_at
            .map(|t| t.format("%b %d %H:%M").to_string())
            .unwrap_or_default();
        ListItem::new(format!(
            " {:<num_width$}   {}   {}   {:<played_width$}",
            i + 1,
            truncate_string(&track.name, title_width),
            truncate_string(&track.artist_line(), artist_width),
            played,
        ))
        .style(row_style(i, selected))
    }));
    items
}

fn playlist_items(
    playlists: &[PlaylistSummary],
    selected: usize,
    content_width: usize,
) -> Vec<ListItem<'static>> {
    if playlists.is_empty() {
        return Vec::new();
    }
    let num_width = calculate_num_width(playlists.len());
    let tracks_width = 7;
    let vis_width = 8;
    let fixed = 1 + num_width + 3 + 3 + 3 + tracks_width + 3 + vis_width;
    let remaining = content_width.saturating_sub(fixed);
    let name_width = (remaining * 60) / 100;
    let owner_width = remaining.saturating_sub(name_width);

    let mut items = vec![
        ListItem::new(format!(
            " {:<num_width$}   {:<name_width$}   {:<owner_width$}   {:>tracks_width$}   {:<vis_width$}",
            "#", "Name", "Owner", "Tracks", "Access",
        ))
        .style(header_style()),
    ];
    items.extend(playlists.iter().enumerate().map(|(i, playlist)| {
        let access = if playlist.public { "public" } else { "private" };
        ListItem::new(format!(
            " {:<num_width$}   {}   {}   {:>tracks_width$}   {:<vis_width$}",
            i + 1,
            truncate_string(&playlist.name, name_width),
            truncate_string(&playlist.owner, owner_width),
            playlist.tracks_total,
            access,
        ))
        .style(row_style(i, selected))
    }));
    items
}

fn artist_items(
    artists: &[ArtistSummary],
    selected: usize,
    content_width: usize,
) -> Vec<ListItem<'static>> {
    if artists.is_empty() {
        return Vec::new();
    }
    let num_width = calculate_num_width(artists.len());
    let followers_width = 10;
    let pop_width = 4;
    let fixed = 1 + num_width + 3 + 3 + 3 + followers_width + 3 + pop_width;
    let remaining = content_width.saturating_sub(fixed);
    let name_width = (remaining * 45) / 100;
    let genres_width = remaining.saturating_sub(name_width);

    let mut items = vec![
        ListItem::new(format!(
            " {:<num_width$}   {:<name_width$}   {:<genres_width$}   {:>followers_width$}   {:>pop_width$}",
            "#", "Artist", "Genres", "Followers", "Pop",
        ))
        .style(header_style()),
    ];
    items.extend(artists.iter().enumerate().map(|(i, artist)| {
        ListItem::new(format!(
            " {:<num_width$}   {}   {}   {:>followers_width$}   {:>pop_width$}",
            i + 1,
            truncate_string(&artist.name, name_width),
            truncate_string(&artist.genres.join(", "), genres_width),
            format_followers(artist.followers),
            artist.popularity,
        ))
        .style(row_style(i, selected))
    }));
    items
}

fn render_discover(
    frame: &mut Frame,
    area: Rect,
    dashboard: &DashboardSnapshot,
    user: Option<&User>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header + tally
            Constraint::Min(0),    // Deck
            Constraint::Length(1), // Hints
        ])
        .split(area);

    let connected = user.is_some_and(|u| u.spotify_connected);
    let source = if connected {
        "Fresh picks from your top tracks"
    } else {
        "Sample picks · connect Spotify for personal ones"
    };
    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            source,
            Style::default().fg(Color::White),
        )),
        Line::from(Span::styled(
            format!(
                "💚 {} liked   ✗ {} skipped",
                dashboard.liked.len(),
                dashboard.skipped_count
            ),
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(header, chunks[0]);

    render_deck(frame, chunks[1], &dashboard.deck);

    let hint = if dashboard.deck.locked {
        ""
    } else {
        "drag with the mouse   ←/→ lean   Enter release   r refresh"
    };
    let hints = Paragraph::new(hint)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(hints, chunks[2]);
}

fn render_profile(frame: &mut Frame, area: Rect, user: Option<&User>) {
    let panel = centered_rect(48, 14, area);

    let mut lines = Vec::new();
    if let Some(user) = user {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            user.username.clone(),
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(user.email.clone()));
        if let Some(created) = &user.created_at {
            lines.push(Line::from(Span::styled(
                format!("Member since {}", created),
                Style::default().fg(Color::DarkGray),
            )));
        }
        lines.push(Line::from(""));
        if user.genres.is_empty() {
            lines.push(Line::from(Span::styled(
                "No genres picked",
                Style::default().fg(Color::DarkGray),
            )));
        } else {
            lines.push(Line::from(Span::styled(
                format!("Genres: {}", user.genres.join(", ")),
                Style::default().fg(Color::Cyan),
            )));
        }
        let status = if user.spotify_connected {
            Span::styled("Spotify connected ✓", Style::default().fg(Color::Green))
        } else {
            Span::styled("Spotify not connected", Style::default().fg(Color::Yellow))
        };
        lines.push(Line::from(status));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "x log out",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let profile = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Your profile ")
                .border_style(Style::default().fg(Color::Magenta))
                .padding(Padding::horizontal(1)),
        );
    frame.render_widget(profile, panel);
}
