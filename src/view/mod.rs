//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by screen:
//!
//! - `utils`: Shared utility functions (formatting, centered rects)
//! - `backdrop`: Animated background behind the outer screens
//! - `welcome`: Landing screen with the main menu
//! - `auth`: Login form
//! - `onboarding`: Three-step signup flow
//! - `cards`: Swipeable card deck rendering
//! - `tutorial`: Post-signup walkthrough
//! - `dashboard`: Signed-in tabs (overview, music, discover, profile)
//! - `overlays`: Modal overlays (notices, connect link, confirm, help)

mod auth;
mod backdrop;
mod cards;
mod dashboard;
mod onboarding;
mod overlays;
mod tutorial;
mod utils;
mod welcome;

use ratatui::Frame;

use crate::model::types::NoticeKind;
use crate::model::{RenderState, Screen};

pub struct AppView;

impl AppView {
    pub fn render(frame: &mut Frame, state: &RenderState) {
        match state.ui.screen {
            Screen::Welcome => welcome::render_welcome(frame, state.phase, state.ui.welcome_choice),
            Screen::Login => auth::render_login(frame, state.phase, &state.login),
            Screen::Signup => onboarding::render_signup(frame, state.phase, &state.signup),
            Screen::Tutorial => {
                if let Some(tutorial) = &state.tutorial {
                    tutorial::render_tutorial(frame, tutorial);
                }
            }
            Screen::Dashboard => {
                if let Some(dashboard) = &state.dashboard {
                    dashboard::render_dashboard(frame, dashboard, state.user.as_ref());
                }
            }
        }

        // Dashboard modals sit above the screen content
        if let Some(dashboard) = &state.dashboard {
            if let Some(url) = &dashboard.auth_url {
                overlays::render_connect_modal(frame, url);
            }
            if dashboard.confirm_disconnect {
                overlays::render_confirm_disconnect(frame);
            }
        }

        if let Some(notice) = &state.ui.notice {
            match notice.kind {
                NoticeKind::Error => overlays::render_error_notice(frame, &notice.text),
                NoticeKind::Info => overlays::render_info_toast(frame, &notice.text),
            }
        }

        // Help popup overlay (if open)
        if state.ui.show_help {
            overlays::render_help_popup(frame, state.ui.screen);
        }
    }
}
