//! Dashboard state and content data structures
//!
//! The dashboard is the signed-in home: an overview tab, the Spotify
//! listening data tabs fed by the backend proxy, the interactive Discover
//! swipe deck, and the account profile. Until a Spotify account is
//! connected the Discover deck runs on the built-in sample batch.

use chrono::{DateTime, Utc};

use super::deck::{CandidateCard, SwipeDirection, SwipeOutcome};
use super::swipe::{DeckSnapshot, SwipeConfig, SwipeSession};
use super::tutorial::demo_batch;
use super::types::TimeRange;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DashboardTab {
    #[default]
    Overview,
    Music,
    Discover,
    Profile,
}

impl DashboardTab {
    pub const ALL: [DashboardTab; 4] = [
        DashboardTab::Overview,
        DashboardTab::Music,
        DashboardTab::Discover,
        DashboardTab::Profile,
    ];

    pub fn next(self) -> Self {
        match self {
            DashboardTab::Overview => DashboardTab::Music,
            DashboardTab::Music => DashboardTab::Discover,
            DashboardTab::Discover => DashboardTab::Profile,
            DashboardTab::Profile => DashboardTab::Overview,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            DashboardTab::Overview => DashboardTab::Profile,
            DashboardTab::Music => DashboardTab::Overview,
            DashboardTab::Discover => DashboardTab::Music,
            DashboardTab::Profile => DashboardTab::Discover,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            DashboardTab::Overview => "Overview",
            DashboardTab::Music => "Music",
            DashboardTab::Discover => "Discover",
            DashboardTab::Profile => "Profile",
        }
    }
}

/// Which listening-data list the Music tab is showing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MusicPanel {
    #[default]
    TopTracks,
    RecentlyPlayed,
    Playlists,
    TopArtists,
}

impl MusicPanel {
    pub const ALL: [MusicPanel; 4] = [
        MusicPanel::TopTracks,
        MusicPanel::RecentlyPlayed,
        MusicPanel::Playlists,
        MusicPanel::TopArtists,
    ];

    pub fn next(self) -> Self {
        match self {
            MusicPanel::TopTracks => MusicPanel::RecentlyPlayed,
            MusicPanel::RecentlyPlayed => MusicPanel::Playlists,
            MusicPanel::Playlists => MusicPanel::TopArtists,
            MusicPanel::TopArtists => MusicPanel::TopTracks,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            MusicPanel::TopTracks => MusicPanel::TopArtists,
            MusicPanel::RecentlyPlayed => MusicPanel::TopTracks,
            MusicPanel::Playlists => MusicPanel::RecentlyPlayed,
            MusicPanel::TopArtists => MusicPanel::Playlists,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            MusicPanel::TopTracks => "Top Tracks",
            MusicPanel::RecentlyPlayed => "Recently Played",
            MusicPanel::Playlists => "Playlists",
            MusicPanel::TopArtists => "Top Artists",
        }
    }

    /// Whether the panel's contents depend on the selected time range.
    pub fn time_ranged(self) -> bool {
        matches!(self, MusicPanel::TopTracks | MusicPanel::TopArtists)
    }
}

/// A playlist as listed by the backend proxy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlaylistSummary {
    pub id: String,
    pub name: String,
    pub owner: String,
    pub tracks_total: u32,
    pub public: bool,
}

/// A track from top-tracks or recently-played. `played_at` is only present
/// on recently-played entries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackSummary {
    pub id: String,
    pub name: String,
    pub artists: Vec<String>,
    pub album: String,
    pub duration_ms: u32,
    pub played_at: Option<DateTime<Utc>>,
}

impl TrackSummary {
    pub fn artist_line(&self) -> String {
        self.artists.join(", ")
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArtistSummary {
    pub id: String,
    pub name: String,
    pub genres: Vec<String>,
    pub followers: u64,
    pub popularity: u8,
}

/// The connected Spotify account, as proxied by the backend.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SpotifyProfile {
    pub display_name: String,
    pub email: Option<String>,
    pub followers: u64,
    pub country: Option<String>,
    pub product: Option<String>,
}

/// Build Discover cards out of loaded top tracks. The genre badge is left
/// empty since track objects carry no genre of their own.
pub fn cards_from_tracks(tracks: &[TrackSummary]) -> Vec<CandidateCard> {
    tracks
        .iter()
        .map(|t| CandidateCard {
            id: t.id.clone(),
            title: t.name.clone(),
            artist: t.artist_line(),
            album: t.album.clone(),
            genre: String::new(),
            duration_ms: t.duration_ms,
        })
        .collect()
}

/// Everything the signed-in dashboard tracks between frames.
#[derive(Debug)]
pub struct DashboardState {
    pub tab: DashboardTab,
    pub profile: Option<SpotifyProfile>,
    /// Backend-issued authorization URL, shown in a modal until dismissed.
    pub auth_url: Option<String>,
    pub confirm_disconnect: bool,
    pub loading: bool,
    pub time_range: TimeRange,
    pub playlists: Vec<PlaylistSummary>,
    pub top_tracks: Vec<TrackSummary>,
    pub recently_played: Vec<TrackSummary>,
    pub top_artists: Vec<ArtistSummary>,
    pub music_panel: MusicPanel,
    pub music_selected: usize,
    pub liked: Vec<CandidateCard>,
    pub skipped_count: usize,
    pub discover: SwipeSession,
}

impl DashboardState {
    pub fn new(config: SwipeConfig) -> Self {
        Self {
            tab: DashboardTab::Overview,
            profile: None,
            auth_url: None,
            confirm_disconnect: false,
            loading: false,
            time_range: TimeRange::default(),
            playlists: Vec::new(),
            top_tracks: Vec::new(),
            recently_played: Vec::new(),
            top_artists: Vec::new(),
            music_panel: MusicPanel::default(),
            music_selected: 0,
            liked: Vec::new(),
            skipped_count: 0,
            discover: SwipeSession::new(demo_batch(), config, true),
        }
    }

    pub fn panel_len(&self) -> usize {
        match self.music_panel {
            MusicPanel::TopTracks => self.top_tracks.len(),
            MusicPanel::RecentlyPlayed => self.recently_played.len(),
            MusicPanel::Playlists => self.playlists.len(),
            MusicPanel::TopArtists => self.top_artists.len(),
        }
    }

    pub fn switch_panel(&mut self, panel: MusicPanel) {
        if self.music_panel != panel {
            self.music_panel = panel;
            self.music_selected = 0;
        }
    }

    pub fn move_selection(&mut self, delta: isize) {
        let len = self.panel_len();
        if len == 0 {
            self.music_selected = 0;
            return;
        }
        let next = self.music_selected as isize + delta;
        self.music_selected = next.clamp(0, len as isize - 1) as usize;
    }

    /// Fold a settled Discover swipe into the session tallies.
    pub fn record_outcome(&mut self, outcome: &SwipeOutcome) {
        if let SwipeOutcome::Commit { direction, card } = outcome {
            match direction {
                SwipeDirection::Right => self.liked.push(card.clone()),
                SwipeDirection::Left => self.skipped_count += 1,
            }
        }
    }

    /// Feed freshly loaded top tracks into the Discover deck. Keeps the
    /// sample batch when the account has no listening history yet.
    pub fn reseed_discover(&mut self) -> bool {
        if self.top_tracks.is_empty() {
            return false;
        }
        self.discover.replace_batch(cards_from_tracks(&self.top_tracks))
    }

    /// Forget everything fetched through the Spotify proxy.
    pub fn clear_spotify_data(&mut self) {
        self.profile = None;
        self.playlists.clear();
        self.top_tracks.clear();
        self.recently_played.clear();
        self.top_artists.clear();
        self.music_selected = 0;
    }

    pub fn snapshot(&self, viewport_cols: f32) -> DashboardSnapshot {
        DashboardSnapshot {
            tab: self.tab,
            profile: self.profile.clone(),
            auth_url: self.auth_url.clone(),
            confirm_disconnect: self.confirm_disconnect,
            loading: self.loading,
            time_range: self.time_range,
            playlists: self.playlists.clone(),
            top_tracks: self.top_tracks.clone(),
            recently_played: self.recently_played.clone(),
            top_artists: self.top_artists.clone(),
            music_panel: self.music_panel,
            music_selected: self.music_selected,
            liked: self.liked.clone(),
            skipped_count: self.skipped_count,
            deck: self.discover.snapshot(viewport_cols),
        }
    }
}

/// Per-frame view of the dashboard for rendering.
#[derive(Clone, Debug)]
pub struct DashboardSnapshot {
    pub tab: DashboardTab,
    pub profile: Option<SpotifyProfile>,
    pub auth_url: Option<String>,
    pub confirm_disconnect: bool,
    pub loading: bool,
    pub time_range: TimeRange,
    pub playlists: Vec<PlaylistSummary>,
    pub top_tracks: Vec<TrackSummary>,
    pub recently_played: Vec<TrackSummary>,
    pub top_artists: Vec<ArtistSummary>,
    pub music_panel: MusicPanel,
    pub music_selected: usize,
    pub liked: Vec<CandidateCard>,
    pub skipped_count: usize,
    pub deck: DeckSnapshot,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(id: &str, name: &str) -> TrackSummary {
        TrackSummary {
            id: id.to_string(),
            name: name.to_string(),
            artists: vec!["A".to_string(), "B".to_string()],
            album: "Album".to_string(),
            duration_ms: 200_000,
            played_at: None,
        }
    }

    #[test]
    fn tabs_cycle_through_all_four() {
        let mut tab = DashboardTab::Overview;
        for expected in [
            DashboardTab::Music,
            DashboardTab::Discover,
            DashboardTab::Profile,
            DashboardTab::Overview,
        ] {
            tab = tab.next();
            assert_eq!(tab, expected);
        }
        assert_eq!(DashboardTab::Overview.prev(), DashboardTab::Profile);
    }

    #[test]
    fn selection_clamps_to_the_active_panel() {
        let mut dash = DashboardState::new(SwipeConfig::default());
        dash.top_tracks = vec![track("t1", "One"), track("t2", "Two")];

        dash.move_selection(5);
        assert_eq!(dash.music_selected, 1);
        dash.move_selection(-5);
        assert_eq!(dash.music_selected, 0);

        // Switching panels resets the cursor; an empty panel pins it to 0.
        dash.music_selected = 1;
        dash.switch_panel(MusicPanel::Playlists);
        assert_eq!(dash.music_selected, 0);
        dash.move_selection(1);
        assert_eq!(dash.music_selected, 0);
    }

    #[test]
    fn outcomes_split_into_likes_and_skips() {
        let mut dash = DashboardState::new(SwipeConfig::default());
        let card = CandidateCard {
            id: "t1".to_string(),
            title: "One".to_string(),
            artist: "A".to_string(),
            album: "Album".to_string(),
            genre: String::new(),
            duration_ms: 1,
        };
        dash.record_outcome(&SwipeOutcome::Commit {
            direction: SwipeDirection::Right,
            card: card.clone(),
        });
        dash.record_outcome(&SwipeOutcome::Commit {
            direction: SwipeDirection::Left,
            card,
        });
        dash.record_outcome(&SwipeOutcome::Cancelled);
        assert_eq!(dash.liked.len(), 1);
        assert_eq!(dash.skipped_count, 1);
    }

    #[test]
    fn discover_reseeds_only_with_history() {
        let mut dash = DashboardState::new(SwipeConfig::default());
        let sample_top = dash.discover.top().map(|c| c.id.clone());
        assert!(!dash.reseed_discover());
        assert_eq!(dash.discover.top().map(|c| c.id.clone()), sample_top);

        dash.top_tracks = vec![track("t1", "One"), track("t2", "Two")];
        assert!(dash.reseed_discover());
        assert_eq!(dash.discover.deck_len(), 2);
        assert_eq!(dash.discover.top().map(|c| c.id.clone()), Some("t1".to_string()));
        assert_eq!(dash.discover.top().map(|c| c.artist.clone()), Some("A, B".to_string()));
    }

    #[test]
    fn disconnect_clears_proxied_data() {
        let mut dash = DashboardState::new(SwipeConfig::default());
        dash.profile = Some(SpotifyProfile {
            display_name: "ada".to_string(),
            ..SpotifyProfile::default()
        });
        dash.playlists.push(PlaylistSummary {
            id: "p".to_string(),
            name: "P".to_string(),
            owner: "ada".to_string(),
            tracks_total: 3,
            public: true,
        });
        dash.clear_spotify_data();
        assert!(dash.profile.is_none());
        assert!(dash.playlists.is_empty());
    }
}
