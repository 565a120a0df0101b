//! Core type definitions for the application

use std::time::Instant;

use serde::{Deserialize, Serialize};

/// Top-level screen router. One screen owns the terminal at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Welcome,
    Login,
    Signup,
    Tutorial,
    Dashboard,
}

/// Entries of the welcome screen menu.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WelcomeChoice {
    #[default]
    LogIn,
    SignUp,
    Quit,
}

impl WelcomeChoice {
    pub fn next(self) -> Self {
        match self {
            WelcomeChoice::LogIn => WelcomeChoice::SignUp,
            WelcomeChoice::SignUp => WelcomeChoice::Quit,
            WelcomeChoice::Quit => WelcomeChoice::LogIn,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            WelcomeChoice::LogIn => WelcomeChoice::Quit,
            WelcomeChoice::SignUp => WelcomeChoice::LogIn,
            WelcomeChoice::Quit => WelcomeChoice::SignUp,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WelcomeChoice::LogIn => "Log In",
            WelcomeChoice::SignUp => "Sign Up",
            WelcomeChoice::Quit => "Quit",
        }
    }
}

/// Listening-history window offered by the backend's Spotify proxy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TimeRange {
    #[default]
    MediumTerm,
    ShortTerm,
    LongTerm,
}

impl TimeRange {
    pub fn as_param(self) -> &'static str {
        match self {
            TimeRange::ShortTerm => "short_term",
            TimeRange::MediumTerm => "medium_term",
            TimeRange::LongTerm => "long_term",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeRange::ShortTerm => "Last 4 weeks",
            TimeRange::MediumTerm => "Last 6 months",
            TimeRange::LongTerm => "All time",
        }
    }

    pub fn next(self) -> Self {
        match self {
            TimeRange::ShortTerm => TimeRange::MediumTerm,
            TimeRange::MediumTerm => TimeRange::LongTerm,
            TimeRange::LongTerm => TimeRange::ShortTerm,
        }
    }
}

/// Account record returned by the backend on login and signup.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub profile_picture: Option<String>,
    #[serde(default)]
    pub spotify_connected: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// Transient banner shown over whatever screen is active.
#[derive(Clone, Debug)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    pub shown_at: Instant,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            text: text.into(),
            shown_at: Instant::now(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
            shown_at: Instant::now(),
        }
    }
}

/// Cross-screen UI state.
#[derive(Clone, Debug)]
pub struct UiState {
    pub screen: Screen,
    pub welcome_choice: WelcomeChoice,
    pub notice: Option<Notice>,
    pub show_help: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            screen: Screen::Welcome,
            welcome_choice: WelcomeChoice::LogIn,
            notice: None,
            show_help: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn welcome_menu_wraps_both_ways() {
        assert_eq!(WelcomeChoice::Quit.next(), WelcomeChoice::LogIn);
        assert_eq!(WelcomeChoice::LogIn.prev(), WelcomeChoice::Quit);
        let mut choice = WelcomeChoice::LogIn;
        for _ in 0..3 {
            choice = choice.next();
        }
        assert_eq!(choice, WelcomeChoice::LogIn);
    }

    #[test]
    fn time_range_params_match_the_api() {
        assert_eq!(TimeRange::ShortTerm.as_param(), "short_term");
        assert_eq!(TimeRange::MediumTerm.as_param(), "medium_term");
        assert_eq!(TimeRange::LongTerm.as_param(), "long_term");
        assert_eq!(TimeRange::LongTerm.next(), TimeRange::ShortTerm);
    }

    #[test]
    fn user_deserializes_with_missing_optionals() {
        let user: User = serde_json::from_value(serde_json::json!({
            "id": 7,
            "username": "ada",
            "email": "ada@example.com",
        }))
        .unwrap();
        assert_eq!(user.id, 7);
        assert!(!user.spotify_connected);
        assert!(user.genres.is_empty());
        assert!(user.profile_picture.is_none());
    }
}
