//! Model module - Application state and data types
//!
//! This module contains all the data structures and state management for the application.
//! It is organized into submodules by responsibility:
//!
//! - `types`: Core type definitions (screen router, user, notices)
//! - `gesture`: Drag tracking and the swipe decision
//! - `animator`: Time-based card transition animation
//! - `deck`: Card queue ownership and the stack state machine
//! - `swipe`: Swipe session wiring gestures, animation and the deck together
//! - `forms`: Login and signup form state with validation
//! - `tutorial`: Post-signup walkthrough with scripted demo swipes
//! - `dashboard`: Signed-in dashboard state and listening data
//! - `backend`: HTTP client for the nowNoise backend API
//! - `app_model`: Main application model with state management methods

pub mod animator;
pub mod app_model;
pub mod backend;
pub mod dashboard;
pub mod deck;
pub mod forms;
pub mod gesture;
pub mod swipe;
pub mod tutorial;
pub mod types;

// Re-export the types the controller and view touch most.
pub use app_model::{AppModel, RenderState};
pub use backend::{ApiError, BackendClient};
pub use deck::{CandidateCard, SwipeDirection, SwipeOutcome};
pub use types::{Screen, User};
