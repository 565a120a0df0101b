//! Drag tracking and the swipe decision
//!
//! Terminal mouse capture delivers press/drag/release cells; the tracker
//! turns those into a horizontal and vertical offset for the top card plus a
//! rotation derived from the horizontal component. When the drag ends, the
//! final offset is evaluated against the commit threshold.

use super::deck::SwipeDirection;

/// Degrees of card rotation per column of horizontal displacement.
pub const ROTATION_PER_COLUMN: f32 = 0.1;
/// Rotation is clamped to this magnitude in either direction.
pub const MAX_ROTATION_DEG: f32 = 30.0;

/// Live per-gesture state. Exists only between drag start and release;
/// offsets are relative to the press cell.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DragState {
    pub dx: f32,
    pub dy: f32,
    pub rotation_deg: f32,
}

/// What a finished drag means for the top card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwipeDecision {
    Commit(SwipeDirection),
    Cancel,
}

/// Evaluate a finished drag. Only displacement strictly greater than
/// `threshold` commits; the exact boundary cancels. The vertical component
/// never participates.
pub fn decide(dx: f32, threshold: f32) -> SwipeDecision {
    if dx > threshold {
        SwipeDecision::Commit(SwipeDirection::Right)
    } else if dx < -threshold {
        SwipeDecision::Commit(SwipeDirection::Left)
    } else {
        SwipeDecision::Cancel
    }
}

/// Converts a pointer-drag stream into card offsets.
///
/// While disabled (tutorial demos, or a transition in flight) every event is
/// swallowed, so a stray drag can never reach the queue.
#[derive(Debug, Default)]
pub struct GestureTracker {
    drag: Option<DragState>,
    enabled: bool,
}

impl GestureTracker {
    pub fn new(enabled: bool) -> Self {
        Self {
            drag: None,
            enabled,
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.drag = None;
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn drag(&self) -> Option<DragState> {
        self.drag
    }

    /// Begin a gesture at the press cell. Returns false (and stays inert)
    /// while disabled or while another gesture is active.
    pub fn drag_start(&mut self) -> bool {
        if !self.enabled || self.drag.is_some() {
            return false;
        }
        self.drag = Some(DragState::default());
        true
    }

    /// Update the live offset. No-op unless a gesture is active.
    pub fn drag_move(&mut self, dx: f32, dy: f32) {
        if let Some(drag) = self.drag.as_mut() {
            drag.dx = dx;
            drag.dy = dy;
            drag.rotation_deg =
                (dx * ROTATION_PER_COLUMN).clamp(-MAX_ROTATION_DEG, MAX_ROTATION_DEG);
        }
    }

    /// Finish the gesture, yielding its final state for the decision.
    pub fn drag_end(&mut self) -> Option<DragState> {
        self.drag.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decision_is_strictly_greater_than_threshold() {
        let threshold = 24.0;
        assert_eq!(decide(24.0, threshold), SwipeDecision::Cancel);
        assert_eq!(decide(-24.0, threshold), SwipeDecision::Cancel);
        assert_eq!(
            decide(24.1, threshold),
            SwipeDecision::Commit(SwipeDirection::Right)
        );
        assert_eq!(
            decide(-24.1, threshold),
            SwipeDecision::Commit(SwipeDirection::Left)
        );
        assert_eq!(decide(0.0, threshold), SwipeDecision::Cancel);
    }

    #[test]
    fn vertical_displacement_never_commits() {
        // A drag may wander far vertically; only dx is consulted.
        let threshold = 24.0;
        assert_eq!(decide(3.0, threshold), SwipeDecision::Cancel);
    }

    #[test]
    fn threshold_scales_with_the_viewport() {
        // 400 columns at the default 0.3 fraction.
        let threshold = 400.0 * 0.3;
        assert_eq!(decide(50.0, threshold), SwipeDecision::Cancel);
        assert_eq!(
            decide(150.0, threshold),
            SwipeDecision::Commit(SwipeDirection::Right)
        );
    }

    #[test]
    fn rotation_tracks_dx_and_clamps() {
        let mut tracker = GestureTracker::new(true);
        assert!(tracker.drag_start());

        tracker.drag_move(100.0, 0.0);
        let drag = tracker.drag().unwrap();
        assert!((drag.rotation_deg - 10.0).abs() < f32::EPSILON);

        tracker.drag_move(400.0, 5.0);
        assert_eq!(tracker.drag().unwrap().rotation_deg, MAX_ROTATION_DEG);

        tracker.drag_move(-400.0, 5.0);
        assert_eq!(tracker.drag().unwrap().rotation_deg, -MAX_ROTATION_DEG);
    }

    #[test]
    fn disabled_tracker_swallows_everything() {
        let mut tracker = GestureTracker::new(false);
        assert!(!tracker.drag_start());
        tracker.drag_move(50.0, 0.0);
        assert!(tracker.drag().is_none());
        assert!(tracker.drag_end().is_none());
    }

    #[test]
    fn disabling_mid_drag_discards_the_gesture() {
        let mut tracker = GestureTracker::new(true);
        tracker.drag_start();
        tracker.drag_move(12.0, 3.0);
        tracker.set_enabled(false);
        assert!(tracker.drag_end().is_none());
    }

    #[test]
    fn second_start_while_active_is_refused() {
        let mut tracker = GestureTracker::new(true);
        assert!(tracker.drag_start());
        tracker.drag_move(7.0, 1.0);
        assert!(!tracker.drag_start());
        // The live gesture survives the refused start.
        assert_eq!(tracker.drag().unwrap().dx, 7.0);
    }

    #[test]
    fn drag_end_resets_for_the_next_gesture() {
        let mut tracker = GestureTracker::new(true);
        tracker.drag_start();
        tracker.drag_move(-30.0, 2.0);
        let done = tracker.drag_end().unwrap();
        assert_eq!(done.dx, -30.0);
        assert!((done.rotation_deg + 3.0).abs() < 1e-5);
        assert!(tracker.drag().is_none());
        assert!(tracker.drag_start());
        assert_eq!(tracker.drag().unwrap(), DragState::default());
    }
}
