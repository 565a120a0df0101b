//! Main application model with state management

use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;

use super::backend::{BackendClient, SignupRequest};
use super::dashboard::{DashboardSnapshot, DashboardState, SpotifyProfile};
use super::dashboard::{ArtistSummary, PlaylistSummary, TrackSummary};
use super::deck::SwipeOutcome;
use super::forms::{LoginForm, SignupFlow, SignupStep};
use super::swipe::SwipeConfig;
use super::tutorial::{TutorialSnapshot, TutorialState};
use super::types::{Notice, NoticeKind, Screen, TimeRange, UiState, User};

/// Notices fade out on their own after this long.
const NOTICE_TTL_SECS: u64 = 5;

/// Everything the view needs for one frame.
#[derive(Clone)]
pub struct RenderState {
    pub ui: UiState,
    pub user: Option<User>,
    pub login: LoginForm,
    pub signup: SignupFlow,
    pub tutorial: Option<TutorialSnapshot>,
    pub dashboard: Option<DashboardSnapshot>,
    /// Seconds since launch, drives the animated backdrop.
    pub phase: f32,
}

/// Main application model containing all state
pub struct AppModel {
    pub backend: BackendClient,
    swipe_config: SwipeConfig,
    started_at: Instant,
    ui_state: Arc<Mutex<UiState>>,
    login: Arc<Mutex<LoginForm>>,
    signup: Arc<Mutex<SignupFlow>>,
    session_user: Arc<Mutex<Option<User>>>,
    tutorial: Arc<Mutex<Option<TutorialState>>>,
    dashboard: Arc<Mutex<Option<DashboardState>>>,
    should_quit: Arc<Mutex<bool>>,
}

impl AppModel {
    pub fn new(backend: BackendClient, swipe_config: SwipeConfig) -> Self {
        Self {
            backend,
            swipe_config,
            started_at: Instant::now(),
            ui_state: Arc::new(Mutex::new(UiState::default())),
            login: Arc::new(Mutex::new(LoginForm::default())),
            signup: Arc::new(Mutex::new(SignupFlow::default())),
            session_user: Arc::new(Mutex::new(None)),
            tutorial: Arc::new(Mutex::new(None)),
            dashboard: Arc::new(Mutex::new(None)),
            should_quit: Arc::new(Mutex::new(false)),
        }
    }

    // ========================================================================
    // Screen routing
    // ========================================================================

    pub async fn get_screen(&self) -> Screen {
        self.ui_state.lock().await.screen
    }

    pub async fn show_welcome(&self) {
        let mut state = self.ui_state.lock().await;
        state.screen = Screen::Welcome;
    }

    pub async fn show_login(&self) {
        self.login.lock().await.reset();
        let mut state = self.ui_state.lock().await;
        state.screen = Screen::Login;
    }

    pub async fn show_signup(&self) {
        self.signup.lock().await.reset();
        let mut state = self.ui_state.lock().await;
        state.screen = Screen::Signup;
    }

    /// Fresh accounts get the walkthrough before the dashboard.
    pub async fn start_tutorial(&self, user: User, now: Instant) {
        tracing::info!(username = %user.username, "entering tutorial");
        let tutorial = TutorialState::new(&user.username, self.swipe_config, now);
        *self.session_user.lock().await = Some(user);
        *self.tutorial.lock().await = Some(tutorial);
        let mut state = self.ui_state.lock().await;
        state.screen = Screen::Tutorial;
    }

    /// Route to the dashboard, creating its state on first entry.
    pub async fn enter_dashboard(&self, user: Option<User>) {
        if let Some(user) = user {
            *self.session_user.lock().await = Some(user);
        }
        *self.tutorial.lock().await = None;
        {
            let mut dashboard = self.dashboard.lock().await;
            if dashboard.is_none() {
                *dashboard = Some(DashboardState::new(self.swipe_config));
            }
        }
        let mut state = self.ui_state.lock().await;
        state.screen = Screen::Dashboard;
    }

    pub async fn logout(&self) {
        tracing::info!("logging out");
        *self.session_user.lock().await = None;
        *self.tutorial.lock().await = None;
        *self.dashboard.lock().await = None;
        self.login.lock().await.reset();
        self.signup.lock().await.reset();
        let mut state = self.ui_state.lock().await;
        state.screen = Screen::Welcome;
        state.notice = None;
    }

    // ========================================================================
    // Welcome menu, notices, quitting
    // ========================================================================

    pub async fn welcome_next(&self) {
        let mut state = self.ui_state.lock().await;
        state.welcome_choice = state.welcome_choice.next();
    }

    pub async fn welcome_prev(&self) {
        let mut state = self.ui_state.lock().await;
        state.welcome_choice = state.welcome_choice.prev();
    }

    pub async fn welcome_choice(&self) -> super::types::WelcomeChoice {
        self.ui_state.lock().await.welcome_choice
    }

    pub async fn set_error(&self, message: impl Into<String>) {
        let mut state = self.ui_state.lock().await;
        state.notice = Some(Notice::error(message));
    }

    pub async fn set_info(&self, message: impl Into<String>) {
        let mut state = self.ui_state.lock().await;
        state.notice = Some(Notice::info(message));
    }

    pub async fn clear_notice(&self) {
        let mut state = self.ui_state.lock().await;
        state.notice = None;
    }

    /// Whether an error notice is showing. Errors block input until
    /// dismissed; info notices are toasts and expire on their own.
    pub async fn has_error(&self) -> bool {
        self.ui_state
            .lock()
            .await
            .notice
            .as_ref()
            .is_some_and(|n| n.kind == NoticeKind::Error)
    }

    pub async fn auto_clear_old_notices(&self) {
        let mut state = self.ui_state.lock().await;
        if let Some(notice) = &state.notice {
            if notice.shown_at.elapsed().as_secs() > NOTICE_TTL_SECS {
                state.notice = None;
            }
        }
    }

    pub async fn toggle_help(&self) {
        let mut state = self.ui_state.lock().await;
        state.show_help = !state.show_help;
    }

    pub async fn is_help_open(&self) -> bool {
        self.ui_state.lock().await.show_help
    }

    pub async fn hide_help(&self) {
        let mut state = self.ui_state.lock().await;
        state.show_help = false;
    }

    pub async fn should_quit(&self) -> bool {
        *self.should_quit.lock().await
    }

    pub async fn set_should_quit(&self, quit: bool) {
        *self.should_quit.lock().await = quit;
    }

    // ========================================================================
    // Session user
    // ========================================================================

    pub async fn current_user(&self) -> Option<User> {
        self.session_user.lock().await.clone()
    }

    pub async fn user_id(&self) -> Option<i64> {
        self.session_user.lock().await.as_ref().map(|u| u.id)
    }

    pub async fn set_spotify_connected(&self, connected: bool) {
        if let Some(user) = self.session_user.lock().await.as_mut() {
            user.spotify_connected = connected;
        }
    }

    // ========================================================================
    // Login form
    // ========================================================================

    pub async fn login_type(&self, c: char) {
        self.login.lock().await.type_char(c);
    }

    pub async fn login_backspace(&self) {
        self.login.lock().await.backspace();
    }

    pub async fn login_focus_next(&self) {
        let mut form = self.login.lock().await;
        form.focus = form.focus.next();
    }

    pub async fn login_toggle_password(&self) {
        let mut form = self.login.lock().await;
        form.show_password = !form.show_password;
    }

    /// Local validation before the request goes out. Returns the
    /// credentials when the form is complete.
    pub async fn login_validated(&self) -> Option<(String, String)> {
        let mut form = self.login.lock().await;
        if form.submitting || !form.validate() {
            return None;
        }
        form.submitting = true;
        Some((form.identifier.trim().to_string(), form.password.clone()))
    }

    pub async fn set_login_submitting(&self, submitting: bool) {
        self.login.lock().await.submitting = submitting;
    }

    // ========================================================================
    // Signup flow
    // ========================================================================

    pub async fn signup_type(&self, c: char) {
        let mut flow = self.signup.lock().await;
        if flow.step == SignupStep::BasicInfo {
            flow.basic.type_char(c);
        }
    }

    pub async fn signup_backspace(&self) {
        let mut flow = self.signup.lock().await;
        if flow.step == SignupStep::BasicInfo {
            flow.basic.backspace();
        }
    }

    pub async fn signup_focus_next(&self) {
        let mut flow = self.signup.lock().await;
        flow.basic.focus = flow.basic.focus.next();
    }

    pub async fn signup_focus_prev(&self) {
        let mut flow = self.signup.lock().await;
        flow.basic.focus = flow.basic.focus.prev();
    }

    pub async fn signup_toggle_password(&self) {
        let mut flow = self.signup.lock().await;
        flow.basic.show_password = !flow.basic.show_password;
    }

    /// Arrow movement, routed to whichever grid the current step shows.
    pub async fn signup_move_cursor(&self, dcol: isize, drow: isize) {
        let mut flow = self.signup.lock().await;
        match flow.step {
            SignupStep::Genres => flow.genres.move_cursor(dcol, drow),
            SignupStep::Avatar => flow.avatar.move_cursor(dcol, drow),
            SignupStep::BasicInfo => {}
        }
    }

    pub async fn signup_toggle_genre(&self) {
        let mut flow = self.signup.lock().await;
        if flow.step == SignupStep::Genres {
            flow.genres.toggle_current();
        }
    }

    pub async fn signup_choose_avatar(&self) {
        let mut flow = self.signup.lock().await;
        if flow.step == SignupStep::Avatar {
            flow.avatar.choose_current();
        }
    }

    /// Advance the flow one validated step. Returns the finished request
    /// once the final step passes, with `skip_avatar` leaving the picture
    /// unset.
    pub async fn signup_advance(&self, skip_avatar: bool) -> Option<SignupRequest> {
        let mut flow = self.signup.lock().await;
        if flow.submitting {
            return None;
        }
        if skip_avatar && flow.step == SignupStep::Avatar {
            flow.avatar.chosen = None;
        }
        if !flow.advance() {
            return None;
        }
        flow.submitting = true;
        Some(SignupRequest {
            username: flow.basic.username.trim().to_string(),
            email: flow.basic.email.trim().to_string(),
            password: flow.basic.password.clone(),
            genres: flow.genres.selected.iter().map(|s| s.to_string()).collect(),
            profile_picture: flow.avatar.chosen_url(),
        })
    }

    /// Step back inside the flow. Returns false when already on the first
    /// step, meaning the caller should leave the signup screen.
    pub async fn signup_back(&self) -> bool {
        self.signup.lock().await.back()
    }

    pub async fn signup_step(&self) -> SignupStep {
        self.signup.lock().await.step
    }

    pub async fn set_signup_submitting(&self, submitting: bool) {
        self.signup.lock().await.submitting = submitting;
    }

    // ========================================================================
    // Tutorial
    // ========================================================================

    /// Advance the walkthrough. Returns true when it just finished.
    pub async fn tutorial_next(&self, now: Instant) -> bool {
        let mut tutorial = self.tutorial.lock().await;
        match tutorial.as_mut() {
            Some(t) => t.next(now),
            None => false,
        }
    }

    pub async fn tutorial_prev(&self, now: Instant) {
        if let Some(t) = self.tutorial.lock().await.as_mut() {
            t.prev(now);
        }
    }

    pub async fn tick_tutorial(&self, viewport_cols: f32, now: Instant) {
        if let Some(t) = self.tutorial.lock().await.as_mut() {
            t.session.tick(viewport_cols, now);
            if let Some(outcome) = t.session.take_outcome() {
                if let SwipeOutcome::Commit { direction, card } = outcome {
                    tracing::debug!(?direction, card = %card.id, "tutorial demo settled");
                }
            }
        }
    }

    // ========================================================================
    // Dashboard
    // ========================================================================

    pub async fn dashboard_tab_next(&self) {
        if let Some(d) = self.dashboard.lock().await.as_mut() {
            d.tab = d.tab.next();
        }
    }

    pub async fn dashboard_tab_prev(&self) {
        if let Some(d) = self.dashboard.lock().await.as_mut() {
            d.tab = d.tab.prev();
        }
    }

    pub async fn dashboard_tab(&self) -> Option<super::dashboard::DashboardTab> {
        self.dashboard.lock().await.as_ref().map(|d| d.tab)
    }

    pub async fn set_dashboard_tab(&self, tab: super::dashboard::DashboardTab) {
        if let Some(d) = self.dashboard.lock().await.as_mut() {
            d.tab = tab;
        }
    }

    pub async fn set_dashboard_loading(&self, loading: bool) {
        if let Some(d) = self.dashboard.lock().await.as_mut() {
            d.loading = loading;
        }
    }

    pub async fn music_panel_next(&self) {
        if let Some(d) = self.dashboard.lock().await.as_mut() {
            d.switch_panel(d.music_panel.next());
        }
    }

    pub async fn music_panel_prev(&self) {
        if let Some(d) = self.dashboard.lock().await.as_mut() {
            d.switch_panel(d.music_panel.prev());
        }
    }

    pub async fn music_move_selection(&self, delta: isize) {
        if let Some(d) = self.dashboard.lock().await.as_mut() {
            d.move_selection(delta);
        }
    }

    /// Rotate to the next time range and report it for the reload.
    pub async fn cycle_time_range(&self) -> Option<TimeRange> {
        let mut dashboard = self.dashboard.lock().await;
        let d = dashboard.as_mut()?;
        d.time_range = d.time_range.next();
        Some(d.time_range)
    }

    pub async fn time_range(&self) -> TimeRange {
        self.dashboard
            .lock()
            .await
            .as_ref()
            .map(|d| d.time_range)
            .unwrap_or_default()
    }

    pub async fn set_profile(&self, profile: Option<SpotifyProfile>) {
        if let Some(d) = self.dashboard.lock().await.as_mut() {
            d.profile = profile;
        }
    }

    pub async fn set_playlists(&self, playlists: Vec<PlaylistSummary>) {
        if let Some(d) = self.dashboard.lock().await.as_mut() {
            d.playlists = playlists;
            d.move_selection(0);
        }
    }

    /// Store loaded top tracks and reseed the Discover deck from them.
    pub async fn set_top_tracks(&self, tracks: Vec<TrackSummary>) {
        if let Some(d) = self.dashboard.lock().await.as_mut() {
            d.top_tracks = tracks;
            d.move_selection(0);
            d.reseed_discover();
        }
    }

    pub async fn set_recently_played(&self, tracks: Vec<TrackSummary>) {
        if let Some(d) = self.dashboard.lock().await.as_mut() {
            d.recently_played = tracks;
            d.move_selection(0);
        }
    }

    pub async fn set_top_artists(&self, artists: Vec<ArtistSummary>) {
        if let Some(d) = self.dashboard.lock().await.as_mut() {
            d.top_artists = artists;
            d.move_selection(0);
        }
    }

    pub async fn set_auth_url(&self, url: Option<String>) {
        if let Some(d) = self.dashboard.lock().await.as_mut() {
            d.auth_url = url;
        }
    }

    pub async fn auth_url_open(&self) -> bool {
        self.dashboard
            .lock()
            .await
            .as_ref()
            .is_some_and(|d| d.auth_url.is_some())
    }

    pub async fn set_confirm_disconnect(&self, open: bool) {
        if let Some(d) = self.dashboard.lock().await.as_mut() {
            d.confirm_disconnect = open;
        }
    }

    pub async fn confirm_disconnect_open(&self) -> bool {
        self.dashboard
            .lock()
            .await
            .as_ref()
            .is_some_and(|d| d.confirm_disconnect)
    }

    pub async fn clear_spotify_data(&self) {
        if let Some(d) = self.dashboard.lock().await.as_mut() {
            d.clear_spotify_data();
        }
    }

    // ========================================================================
    // Discover deck
    // ========================================================================

    pub async fn discover_drag_start(&self) -> bool {
        match self.dashboard.lock().await.as_mut() {
            Some(d) => d.discover.drag_start(),
            None => false,
        }
    }

    pub async fn discover_drag_move(&self, dx: f32, dy: f32) {
        if let Some(d) = self.dashboard.lock().await.as_mut() {
            d.discover.drag_move(dx, dy);
        }
    }

    pub async fn discover_drag_end(&self, viewport_cols: f32, now: Instant) {
        if let Some(d) = self.dashboard.lock().await.as_mut() {
            d.discover.drag_end(viewport_cols, now);
        }
    }

    pub async fn discover_nudge(&self, dcols: f32) {
        if let Some(d) = self.dashboard.lock().await.as_mut() {
            d.discover.nudge(dcols);
        }
    }

    pub async fn discover_dragging(&self) -> bool {
        self.dashboard
            .lock()
            .await
            .as_ref()
            .is_some_and(|d| d.discover.is_dragging())
    }

    /// Advance the Discover deck and fold any settled commit into the
    /// session tallies. The outcome is returned for controller-side logging.
    pub async fn tick_discover(&self, viewport_cols: f32, now: Instant) -> Option<SwipeOutcome> {
        let mut dashboard = self.dashboard.lock().await;
        let d = dashboard.as_mut()?;
        d.discover.tick(viewport_cols, now);
        let outcome = d.discover.take_outcome()?;
        d.record_outcome(&outcome);
        Some(outcome)
    }

    // ========================================================================
    // Per-frame snapshot
    // ========================================================================

    pub async fn render_state(&self, viewport_cols: f32) -> RenderState {
        let ui = self.ui_state.lock().await.clone();
        let user = self.session_user.lock().await.clone();
        let login = self.login.lock().await.clone();
        let signup = self.signup.lock().await.clone();
        let tutorial = self
            .tutorial
            .lock()
            .await
            .as_ref()
            .map(|t| t.snapshot(viewport_cols));
        let dashboard = self
            .dashboard
            .lock()
            .await
            .as_ref()
            .map(|d| d.snapshot(viewport_cols));
        RenderState {
            ui,
            user,
            login,
            signup,
            tutorial,
            dashboard,
            phase: self.started_at.elapsed().as_secs_f32(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::types::WelcomeChoice;

    fn model() -> AppModel {
        AppModel::new(
            BackendClient::new("http://127.0.0.1:5000/api"),
            SwipeConfig::default(),
        )
    }

    fn user() -> User {
        User {
            id: 1,
            username: "ada".to_string(),
            email: "ada@example.com".to_string(),
            created_at: None,
            genres: vec!["indie".to_string()],
            profile_picture: None,
            spotify_connected: false,
        }
    }

    #[tokio::test]
    async fn signup_routes_through_tutorial_to_dashboard() {
        let m = model();
        assert_eq!(m.get_screen().await, Screen::Welcome);

        let now = Instant::now();
        m.start_tutorial(user(), now).await;
        assert_eq!(m.get_screen().await, Screen::Tutorial);

        // Walk off the end of the tutorial.
        let mut finished = false;
        for _ in 0..6 {
            if m.tutorial_next(now).await {
                finished = true;
                break;
            }
        }
        assert!(finished);

        m.enter_dashboard(None).await;
        assert_eq!(m.get_screen().await, Screen::Dashboard);
        let state = m.render_state(80.0).await;
        assert!(state.tutorial.is_none());
        assert!(state.dashboard.is_some());
        assert_eq!(state.user.map(|u| u.username), Some("ada".to_string()));
    }

    #[tokio::test]
    async fn logout_resets_everything() {
        let m = model();
        m.enter_dashboard(Some(user())).await;
        m.set_error("boom").await;
        m.logout().await;
        assert_eq!(m.get_screen().await, Screen::Welcome);
        assert!(m.current_user().await.is_none());
        let state = m.render_state(80.0).await;
        assert!(state.ui.notice.is_none());
        assert!(state.dashboard.is_none());
    }

    #[tokio::test]
    async fn login_validation_gates_submission() {
        let m = model();
        assert!(m.login_validated().await.is_none());

        for c in "ada".chars() {
            m.login_type(c).await;
        }
        m.login_focus_next().await;
        for c in "secret".chars() {
            m.login_type(c).await;
        }
        let creds = m.login_validated().await;
        assert_eq!(creds, Some(("ada".to_string(), "secret".to_string())));

        // Submitting flag blocks a double submit until cleared.
        assert!(m.login_validated().await.is_none());
        m.set_login_submitting(false).await;
        assert!(m.login_validated().await.is_some());
    }

    #[tokio::test]
    async fn signup_advance_produces_the_request_once_complete() {
        let m = model();
        m.show_signup().await;
        for c in "ada".chars() {
            m.signup_type(c).await;
        }
        m.signup_focus_next().await;
        for c in "ada@example.com".chars() {
            m.signup_type(c).await;
        }
        m.signup_focus_next().await;
        for c in "123456".chars() {
            m.signup_type(c).await;
        }
        assert!(m.signup_advance(false).await.is_none());

        m.signup_toggle_genre().await;
        assert!(m.signup_advance(false).await.is_none());

        m.signup_choose_avatar().await;
        let request = m.signup_advance(false).await.unwrap();
        assert_eq!(request.username, "ada");
        assert_eq!(request.genres, vec!["pop".to_string()]);
        assert!(request.profile_picture.is_some());
    }

    #[tokio::test]
    async fn welcome_menu_cycles() {
        let m = model();
        m.welcome_next().await;
        assert_eq!(m.welcome_choice().await, WelcomeChoice::SignUp);
        m.welcome_prev().await;
        m.welcome_prev().await;
        assert_eq!(m.welcome_choice().await, WelcomeChoice::Quit);
    }
}
