//! Spotify data loading and connection management

use super::AppController;
use crate::log_api_result;

pub const LIST_LIMIT: u32 = 20;
pub const PLAYLIST_LIMIT: u32 = 50;

impl AppController {
    /// `r` on the dashboard: reload data when connected, otherwise probe
    /// whether the account got linked since we last looked.
    pub(crate) async fn refresh_or_probe(&self) {
        let model = self.model.lock().await;
        let connected = model
            .current_user()
            .await
            .is_some_and(|u| u.spotify_connected);
        drop(model);

        if connected {
            self.refresh_dashboard().await;
        } else {
            self.refresh_spotify_status().await;
        }
    }

    /// Pull every dashboard panel in one round of concurrent requests.
    /// Partial failures keep whatever loaded; the first error is surfaced.
    pub async fn refresh_dashboard(&self) {
        let model = self.model.lock().await;
        let Some(user) = model.current_user().await else {
            return;
        };
        if !user.spotify_connected {
            return;
        }
        model.set_dashboard_loading(true).await;
        let backend = model.backend.clone();
        let range = model.time_range().await;
        drop(model);

        tracing::debug!(user_id = user.id, "Refreshing dashboard data");

        let (profile, playlists, top_tracks, recent, artists) = tokio::join!(
            backend.spotify_profile(user.id),
            backend.playlists(user.id, PLAYLIST_LIMIT),
            backend.top_tracks(user.id, range, LIST_LIMIT),
            backend.recently_played(user.id, LIST_LIMIT),
            backend.top_artists(user.id, range, LIST_LIMIT),
        );
        log_api_result!("spotify/user-data", profile);
        log_api_result!("spotify/playlists", playlists);
        log_api_result!("spotify/top-tracks", top_tracks);
        log_api_result!("spotify/recently-played", recent);
        log_api_result!("spotify/top-artists", artists);

        let model = self.model.lock().await;
        let mut first_error: Option<anyhow::Error> = None;

        match profile {
            Ok(p) => model.set_profile(Some(p)).await,
            Err(e) => first_error = first_error.or(Some(e)),
        }
        match playlists {
            Ok(p) => model.set_playlists(p).await,
            Err(e) => first_error = first_error.or(Some(e)),
        }
        match top_tracks {
            Ok(t) => model.set_top_tracks(t).await,
            Err(e) => first_error = first_error.or(Some(e)),
        }
        match recent {
            Ok(t) => model.set_recently_played(t).await,
            Err(e) => first_error = first_error.or(Some(e)),
        }
        match artists {
            Ok(a) => model.set_top_artists(a).await,
            Err(e) => first_error = first_error.or(Some(e)),
        }

        model.set_dashboard_loading(false).await;
        if let Some(e) = first_error {
            model.set_error(Self::format_error(&e)).await;
        }
    }

    /// Cycle the top-tracks/top-artists window and reload just those two.
    pub async fn reload_time_ranged(&self) {
        let model = self.model.lock().await;
        let Some(user) = model.current_user().await else {
            return;
        };
        if !user.spotify_connected {
            return;
        }
        let Some(range) = model.cycle_time_range().await else {
            return;
        };
        model.set_info(format!("Showing: {}", range.label())).await;
        model.set_dashboard_loading(true).await;
        let backend = model.backend.clone();
        drop(model);

        let (tracks, artists) = tokio::join!(
            backend.top_tracks(user.id, range, LIST_LIMIT),
            backend.top_artists(user.id, range, LIST_LIMIT),
        );
        log_api_result!("spotify/top-tracks", tracks);
        log_api_result!("spotify/top-artists", artists);

        let model = self.model.lock().await;
        let mut first_error: Option<anyhow::Error> = None;
        match tracks {
            Ok(t) => model.set_top_tracks(t).await,
            Err(e) => first_error = first_error.or(Some(e)),
        }
        match artists {
            Ok(a) => model.set_top_artists(a).await,
            Err(e) => first_error = first_error.or(Some(e)),
        }
        model.set_dashboard_loading(false).await;
        if let Some(e) = first_error {
            model.set_error(Self::format_error(&e)).await;
        }
    }

    /// Fetch the OAuth URL and show it in a modal. The actual authorization
    /// happens in the user's browser.
    pub async fn connect_spotify(&self) {
        let model = self.model.lock().await;
        let Some(user_id) = model.user_id().await else {
            return;
        };
        let backend = model.backend.clone();
        drop(model);

        let result = backend.spotify_auth_url(user_id).await;
        log_api_result!("spotify/auth-url", result);

        let model = self.model.lock().await;
        match result {
            Ok(url) => model.set_auth_url(Some(url)).await,
            Err(e) => model.set_error(Self::format_error(&e)).await,
        }
    }

    pub async fn disconnect_spotify(&self) {
        let model = self.model.lock().await;
        model.set_confirm_disconnect(false).await;
        let Some(user_id) = model.user_id().await else {
            return;
        };
        let backend = model.backend.clone();
        drop(model);

        let result = backend.spotify_disconnect(user_id).await;
        log_api_result!("spotify/disconnect", result);

        let model = self.model.lock().await;
        match result {
            Ok(()) => {
                model.set_spotify_connected(false).await;
                model.clear_spotify_data().await;
                model.set_info("Spotify disconnected.").await;
            }
            Err(e) => model.set_error(Self::format_error(&e)).await,
        }
    }

    /// Probe for a freshly linked account. The OAuth round trip happens in
    /// the browser, so pressing `r` after authorizing is how the TUI finds
    /// out it worked.
    pub async fn refresh_spotify_status(&self) {
        let model = self.model.lock().await;
        let Some(user_id) = model.user_id().await else {
            return;
        };
        let backend = model.backend.clone();
        drop(model);

        match backend.spotify_profile(user_id).await {
            Ok(profile) => {
                tracing::info!(user_id, "Spotify account linked");
                let model = self.model.lock().await;
                model.set_spotify_connected(true).await;
                model.set_auth_url(None).await;
                model.set_profile(Some(profile)).await;
                model.set_info("Spotify connected!").await;
                drop(model);
                self.refresh_dashboard().await;
            }
            Err(e) => {
                tracing::debug!(user_id, error = %e, "Spotify link probe failed");
                let model = self.model.lock().await;
                model.set_error(Self::format_error(&e)).await;
            }
        }
    }
}
