//! Controller module - Application logic and event handling
//!
//! This module contains the application controller that handles user input,
//! coordinates between the model and view, and talks to the nowNoise backend.
//! It is organized into submodules by responsibility:
//!
//! - `input`: Key and mouse event handling
//! - `auth`: Login and signup submission
//! - `tutorial`: Tutorial paging
//! - `dashboard`: Spotify data loading and connection management

mod auth;
mod dashboard;
mod input;
mod tutorial;

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Mutex;

use crate::model::{ApiError, AppModel, SwipeOutcome};

#[derive(Clone)]
pub struct AppController {
    pub(crate) model: Arc<Mutex<AppModel>>,
    /// Cell where the current mouse drag started, if one is in progress.
    pointer_origin: Arc<Mutex<Option<(u16, u16)>>>,
}

impl AppController {
    pub fn new(model: Arc<Mutex<AppModel>>) -> Self {
        Self {
            model,
            pointer_origin: Arc::new(Mutex::new(None)),
        }
    }

    /// Per-frame housekeeping: expire stale notices and advance whichever
    /// card deck is live on the current screen.
    pub async fn tick(&self, viewport_cols: f32, now: Instant) {
        let model = self.model.lock().await;
        model.auto_clear_old_notices().await;

        match model.get_screen().await {
            crate::model::Screen::Tutorial => {
                model.tick_tutorial(viewport_cols, now).await;
            }
            crate::model::Screen::Dashboard => {
                if let Some(outcome) = model.tick_discover(viewport_cols, now).await {
                    match outcome {
                        SwipeOutcome::Commit { direction, card } => {
                            tracing::info!(
                                track = %card.title,
                                artist = %card.artist,
                                direction = ?direction,
                                "Swipe committed"
                            );
                        }
                        SwipeOutcome::Cancelled => {
                            tracing::debug!("Swipe cancelled, card snapped back");
                        }
                    }
                }
            }
            _ => {}
        }
    }

    pub(crate) fn format_error(error: &anyhow::Error) -> String {
        if let Some(api) = error.downcast_ref::<ApiError>() {
            return match api.status {
                429 => "Rate limited. Please wait a moment.".to_string(),
                500..=599 => "Server error. Please try again later.".to_string(),
                _ => api.message.clone(),
            };
        }

        if let Some(http) = error.downcast_ref::<reqwest::Error>() {
            if http.is_connect() || http.is_timeout() {
                return "Cannot reach the nowNoise server. Is the backend running?".to_string();
            }
        }

        format!("Error: {}", error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_error_maps_rate_limit_status() {
        let err = anyhow::Error::new(ApiError {
            status: 429,
            message: "slow down".to_string(),
        });
        assert_eq!(
            AppController::format_error(&err),
            "Rate limited. Please wait a moment."
        );
    }

    #[test]
    fn format_error_masks_server_errors() {
        let err = anyhow::Error::new(ApiError {
            status: 502,
            message: "upstream exploded".to_string(),
        });
        assert_eq!(
            AppController::format_error(&err),
            "Server error. Please try again later."
        );
    }

    #[test]
    fn format_error_surfaces_backend_message() {
        let err = anyhow::Error::new(ApiError {
            status: 401,
            message: "Invalid credentials".to_string(),
        });
        assert_eq!(AppController::format_error(&err), "Invalid credentials");
    }

    #[test]
    fn format_error_falls_back_to_display() {
        let err = anyhow::anyhow!("something odd");
        assert_eq!(AppController::format_error(&err), "Error: something odd");
    }
}
