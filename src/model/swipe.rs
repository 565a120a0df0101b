//! Swipe session orchestration
//!
//! A `SwipeSession` wires one gesture tracker, one animator and one card
//! deck together and enforces the ordering rules between them: input only
//! while the deck is idle, one transition at a time, queue advance only
//! after the exit tween settles. The tutorial runs a non-interactive session
//! driven by scripted demo swipes; the Discover tab runs an interactive one.

use std::time::{Duration, Instant};

use super::animator::{AnimatorStatus, CardAnimator, CardPose};
use super::deck::{CandidateCard, CardDeck, DeckState, SwipeDirection, SwipeOutcome};
use super::gesture::{decide, GestureTracker, SwipeDecision};

/// Tunables for the card stack. Defaults mirror the shipped mobile feel.
#[derive(Clone, Copy, Debug)]
pub struct SwipeConfig {
    /// Commit threshold as a fraction of the viewport width.
    pub threshold_fraction: f32,
    /// Rotation the card exits with after a commit, in degrees.
    pub exit_rotation_deg: f32,
    /// Length of the exit tween.
    pub commit_duration: Duration,
    /// Pause before an armed demo swipe fires.
    pub demo_delay: Duration,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            threshold_fraction: 0.3,
            exit_rotation_deg: 30.0,
            commit_duration: Duration::from_millis(300),
            demo_delay: Duration::from_millis(1500),
        }
    }
}

/// Fires one scripted swipe after a fixed delay. Armed once per tutorial
/// slide and never fires twice.
#[derive(Debug)]
struct DemoDriver {
    direction: SwipeDirection,
    due_at: Instant,
    fired: bool,
}

/// Immutable per-frame view of a session, cloned out for rendering.
#[derive(Clone, Debug, Default)]
pub struct DeckSnapshot {
    pub top: Option<CandidateCard>,
    pub preview: Option<CandidateCard>,
    pub pose: CardPose,
    pub lean: Option<SwipeDirection>,
    pub locked: bool,
    pub dragging: bool,
    pub demo_pending: bool,
    pub remaining: usize,
}

/// One card stack with its gesture and animation plumbing.
#[derive(Debug)]
pub struct SwipeSession {
    deck: CardDeck,
    tracker: GestureTracker,
    animator: CardAnimator,
    demo: Option<DemoDriver>,
    config: SwipeConfig,
    interactive: bool,
    pose: CardPose,
    outcome: Option<SwipeOutcome>,
}

impl SwipeSession {
    pub fn new(batch: Vec<CandidateCard>, config: SwipeConfig, interactive: bool) -> Self {
        Self {
            deck: CardDeck::new(batch),
            tracker: GestureTracker::new(interactive),
            animator: CardAnimator::new(config.exit_rotation_deg, config.commit_duration),
            demo: None,
            config,
            interactive,
            pose: CardPose::ZERO,
            outcome: None,
        }
    }

    pub fn top(&self) -> Option<&CandidateCard> {
        self.deck.top()
    }

    pub fn preview(&self) -> Option<&CandidateCard> {
        self.deck.preview()
    }

    pub fn deck_state(&self) -> DeckState {
        self.deck.state()
    }

    pub fn deck_len(&self) -> usize {
        self.deck.len()
    }

    pub fn pose(&self) -> CardPose {
        self.pose
    }

    pub fn is_dragging(&self) -> bool {
        self.tracker.drag().is_some()
    }

    /// True while a transition is in flight and input is locked out.
    pub fn is_locked(&self) -> bool {
        self.deck.state() == DeckState::Animating || self.animator.is_active()
    }

    pub fn demo_pending(&self) -> bool {
        self.demo.as_ref().is_some_and(|d| !d.fired)
    }

    fn threshold(&self, viewport_cols: f32) -> f32 {
        viewport_cols * self.config.threshold_fraction
    }

    /// Which way the live drag would commit if released now. `None` while
    /// inside the cancel zone or when no drag is active.
    pub fn lean(&self, viewport_cols: f32) -> Option<SwipeDirection> {
        let drag = self.tracker.drag()?;
        match decide(drag.dx, self.threshold(viewport_cols)) {
            SwipeDecision::Commit(direction) => Some(direction),
            SwipeDecision::Cancel => None,
        }
    }

    /// Begin a pointer gesture. Refused outside interactive idle state.
    pub fn drag_start(&mut self) -> bool {
        if !self.interactive
            || self.deck.state() != DeckState::Idle
            || self.animator.is_active()
        {
            return false;
        }
        self.tracker.drag_start()
    }

    pub fn drag_move(&mut self, dx: f32, dy: f32) {
        self.tracker.drag_move(dx, dy);
        if let Some(drag) = self.tracker.drag() {
            self.pose = CardPose {
                dx: drag.dx,
                dy: drag.dy,
                rotation_deg: drag.rotation_deg,
            };
        }
    }

    /// Keyboard fallback for pointer drags: shifts the live offset by
    /// `dcols`, starting a gesture if none is active.
    pub fn nudge(&mut self, dcols: f32) {
        if self.tracker.drag().is_none() && !self.drag_start() {
            return;
        }
        let drag = self.tracker.drag().unwrap_or_default();
        self.drag_move(drag.dx + dcols, drag.dy);
    }

    /// Finish the live gesture and launch the matching transition.
    pub fn drag_end(&mut self, viewport_cols: f32, now: Instant) {
        let Some(drag) = self.tracker.drag_end() else {
            return;
        };
        let from = CardPose {
            dx: drag.dx,
            dy: drag.dy,
            rotation_deg: drag.rotation_deg,
        };
        match decide(drag.dx, self.threshold(viewport_cols)) {
            SwipeDecision::Commit(direction) => {
                tracing::debug!(dx = drag.dx, ?direction, "drag released past threshold");
                self.launch_commit(direction, from, viewport_cols, now);
            }
            SwipeDecision::Cancel => {
                tracing::debug!(dx = drag.dx, "drag released inside cancel zone");
                self.launch_cancel(from, now);
            }
        }
    }

    /// Arm a scripted swipe that fires after the configured delay.
    pub fn arm_demo(&mut self, direction: SwipeDirection, now: Instant) {
        self.demo = Some(DemoDriver {
            direction,
            due_at: now + self.config.demo_delay,
            fired: false,
        });
    }

    pub fn clear_demo(&mut self) {
        self.demo = None;
    }

    /// Advance animations and the demo timer to `now`. Call once per UI tick.
    pub fn tick(&mut self, viewport_cols: f32, now: Instant) {
        self.maybe_fire_demo(viewport_cols, now);
        match self.animator.tick(now) {
            AnimatorStatus::Idle => {}
            AnimatorStatus::Running(pose) => self.pose = pose,
            AnimatorStatus::CommitSettled { card_id, direction } => {
                self.pose = CardPose::ZERO;
                match self.deck.commit(&card_id, direction) {
                    Ok(outcome) => {
                        self.outcome = Some(outcome);
                        if self.deck.state() == DeckState::Empty {
                            self.deck.refill();
                        }
                    }
                    Err(err) => {
                        tracing::error!(error = %err, "commit settle rejected, unlocking deck");
                        self.deck.cancel();
                    }
                }
            }
            AnimatorStatus::CancelSettled => {
                self.pose = CardPose::ZERO;
                self.deck.cancel();
            }
        }
    }

    /// The outcome of the most recent settled commit, handed over once.
    pub fn take_outcome(&mut self) -> Option<SwipeOutcome> {
        self.outcome.take()
    }

    pub fn snapshot(&self, viewport_cols: f32) -> DeckSnapshot {
        DeckSnapshot {
            top: self.deck.top().cloned(),
            preview: self.deck.preview().cloned(),
            pose: self.pose,
            lean: self.lean(viewport_cols),
            locked: self.is_locked(),
            dragging: self.is_dragging(),
            demo_pending: self.demo_pending(),
            remaining: self.deck.len(),
        }
    }

    /// Restore the session to its initial card batch, dropping any live
    /// gesture, transition or armed demo. Used on tutorial slide entry.
    pub fn reset(&mut self) {
        self.deck.refill();
        self.tracker = GestureTracker::new(self.interactive);
        self.animator = CardAnimator::new(self.config.exit_rotation_deg, self.config.commit_duration);
        self.demo = None;
        self.pose = CardPose::ZERO;
        self.outcome = None;
    }

    /// Swap in a freshly provided batch. Skipped mid-transition.
    pub fn replace_batch(&mut self, batch: Vec<CandidateCard>) -> bool {
        if !self.deck.replace_batch(batch) {
            return false;
        }
        self.tracker = GestureTracker::new(self.interactive);
        self.pose = CardPose::ZERO;
        true
    }

    fn launch_commit(
        &mut self,
        direction: SwipeDirection,
        from: CardPose,
        viewport_cols: f32,
        now: Instant,
    ) {
        let Some(card_id) = self.deck.top().map(|c| c.id.clone()) else {
            tracing::warn!("commit requested with no card on deck");
            return;
        };
        if !self.deck.begin_animation() {
            return;
        }
        self.pose = from;
        self.animator
            .start_commit(card_id, direction, from, viewport_cols, now);
    }

    fn launch_cancel(&mut self, from: CardPose, now: Instant) {
        if !self.deck.begin_animation() {
            return;
        }
        self.pose = from;
        self.animator.start_cancel(from, now);
    }

    fn maybe_fire_demo(&mut self, viewport_cols: f32, now: Instant) {
        let due = self
            .demo
            .as_ref()
            .is_some_and(|d| !d.fired && now >= d.due_at);
        if !due || self.deck.state() != DeckState::Idle || self.animator.is_active() {
            return;
        }
        let Some(demo) = self.demo.as_mut() else {
            return;
        };
        demo.fired = true;
        let direction = demo.direction;
        tracing::debug!(?direction, "demo swipe firing");
        self.launch_commit(direction, CardPose::ZERO, viewport_cols, now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: f32 = 80.0;

    fn batch(n: usize) -> Vec<CandidateCard> {
        (1..=n)
            .map(|i| CandidateCard {
                id: format!("S{i}"),
                title: format!("Song {i}"),
                artist: "Artist".to_string(),
                album: "Album".to_string(),
                genre: "Indie".to_string(),
                duration_ms: 180_000,
            })
            .collect()
    }

    fn session(n: usize) -> SwipeSession {
        SwipeSession::new(batch(n), SwipeConfig::default(), true)
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn settle(session: &mut SwipeSession, from: Instant) -> Instant {
        // Well past both the exit tween and the return spring.
        let later = from + ms(3_000);
        session.tick(VIEWPORT, later);
        later
    }

    #[test]
    fn committed_swipe_advances_the_queue() {
        let mut s = session(3);
        let t0 = Instant::now();

        assert!(s.drag_start());
        s.drag_move(30.0, -2.0);
        s.drag_end(VIEWPORT, t0);

        // Transition in flight: input locked, queue untouched.
        assert!(s.is_locked());
        assert!(!s.drag_start());
        assert_eq!(s.deck_len(), 3);

        let t1 = settle(&mut s, t0);
        match s.take_outcome() {
            Some(SwipeOutcome::Commit { direction, card }) => {
                assert_eq!(direction, SwipeDirection::Right);
                assert_eq!(card.id, "S1");
            }
            other => panic!("expected commit outcome, got {other:?}"),
        }
        assert_eq!(s.top().map(|c| c.id.as_str()), Some("S2"));
        assert!(!s.is_locked());
        assert_eq!(s.pose(), CardPose::ZERO);

        // The next gesture starts cleanly after settle.
        assert!(s.drag_start());
        s.drag_move(-40.0, 0.0);
        s.drag_end(VIEWPORT, t1);
        settle(&mut s, t1);
        match s.take_outcome() {
            Some(SwipeOutcome::Commit { direction, card }) => {
                assert_eq!(direction, SwipeDirection::Left);
                assert_eq!(card.id, "S2");
            }
            other => panic!("expected commit outcome, got {other:?}"),
        }
    }

    #[test]
    fn release_at_exact_threshold_cancels() {
        let mut s = session(3);
        let t0 = Instant::now();

        s.drag_start();
        s.drag_move(VIEWPORT * 0.3, 5.0);
        s.drag_end(VIEWPORT, t0);
        assert!(s.is_locked());

        settle(&mut s, t0);
        assert!(s.take_outcome().is_none());
        assert_eq!(s.deck_len(), 3);
        assert_eq!(s.top().map(|c| c.id.as_str()), Some("S1"));
        assert!(!s.is_locked());
    }

    #[test]
    fn cancel_returns_card_to_origin() {
        let mut s = session(2);
        let t0 = Instant::now();

        s.drag_start();
        s.drag_move(-10.0, 3.0);
        s.drag_end(VIEWPORT, t0);

        s.tick(VIEWPORT, t0 + ms(60));
        let mid = s.pose();
        assert!(mid.dx.abs() < 10.0);
        assert!(mid.dx < 0.0);

        settle(&mut s, t0);
        assert_eq!(s.pose(), CardPose::ZERO);
        assert_eq!(s.deck_len(), 2);
    }

    #[test]
    fn drag_events_ignored_while_locked() {
        let mut s = session(3);
        let t0 = Instant::now();
        s.drag_start();
        s.drag_move(50.0, 0.0);
        s.drag_end(VIEWPORT, t0);

        s.tick(VIEWPORT, t0 + ms(100));
        assert!(!s.drag_start());
        let pose_before = s.pose();
        s.drag_move(5.0, 5.0);
        assert_eq!(s.pose(), pose_before);
        s.drag_end(VIEWPORT, t0 + ms(120));

        settle(&mut s, t0);
        // Only the original commit happened.
        assert!(matches!(
            s.take_outcome(),
            Some(SwipeOutcome::Commit { card, .. }) if card.id == "S1"
        ));
        assert_eq!(s.deck_len(), 2);
        assert!(s.take_outcome().is_none());
    }

    #[test]
    fn demo_fires_once_after_its_delay() {
        let mut s = SwipeSession::new(batch(3), SwipeConfig::default(), false);
        let t0 = Instant::now();
        s.arm_demo(SwipeDirection::Right, t0);

        // Interactive input is dead in demo mode.
        assert!(!s.drag_start());

        s.tick(VIEWPORT, t0 + ms(1_499));
        assert!(!s.is_locked());
        assert!(s.demo_pending());

        s.tick(VIEWPORT, t0 + ms(1_500));
        assert!(s.is_locked());
        assert!(!s.demo_pending());

        settle(&mut s, t0 + ms(1_500));
        assert!(matches!(
            s.take_outcome(),
            Some(SwipeOutcome::Commit {
                direction: SwipeDirection::Right,
                card,
            }) if card.id == "S1"
        ));

        // No second fire, no matter how long we keep ticking.
        settle(&mut s, t0 + ms(5_000));
        assert!(s.take_outcome().is_none());
        assert_eq!(s.deck_len(), 2);
    }

    #[test]
    fn committing_the_last_card_refills_the_batch() {
        let mut s = session(1);
        let t0 = Instant::now();
        s.drag_start();
        s.drag_move(60.0, 0.0);
        s.drag_end(VIEWPORT, t0);
        settle(&mut s, t0);

        assert!(matches!(
            s.take_outcome(),
            Some(SwipeOutcome::Commit { card, .. }) if card.id == "S1"
        ));
        // Cyclic provider: the original batch comes back.
        assert_eq!(s.deck_state(), DeckState::Idle);
        assert_eq!(s.top().map(|c| c.id.as_str()), Some("S1"));
    }

    #[test]
    fn nudges_accumulate_and_release_decides() {
        let mut s = session(2);
        let t0 = Instant::now();
        for _ in 0..4 {
            s.nudge(2.0);
        }
        assert_eq!(s.pose().dx, 8.0);
        assert!(s.lean(VIEWPORT).is_none());

        for _ in 0..9 {
            s.nudge(2.0);
        }
        assert_eq!(s.lean(VIEWPORT), Some(SwipeDirection::Right));

        s.drag_end(VIEWPORT, t0);
        settle(&mut s, t0);
        assert!(matches!(
            s.take_outcome(),
            Some(SwipeOutcome::Commit {
                direction: SwipeDirection::Right,
                ..
            })
        ));
    }

    #[test]
    fn reset_restores_batch_and_drops_demo() {
        let mut s = SwipeSession::new(batch(3), SwipeConfig::default(), false);
        let t0 = Instant::now();
        s.arm_demo(SwipeDirection::Left, t0);
        s.tick(VIEWPORT, t0 + ms(1_500));
        settle(&mut s, t0 + ms(1_500));
        assert_eq!(s.deck_len(), 2);

        s.reset();
        assert_eq!(s.deck_len(), 3);
        assert!(!s.demo_pending());
        assert!(!s.is_locked());
        assert_eq!(s.pose(), CardPose::ZERO);
        assert!(s.take_outcome().is_none());
    }

    #[test]
    fn replace_batch_deferred_while_animating() {
        let mut s = session(2);
        let t0 = Instant::now();
        s.drag_start();
        s.drag_move(40.0, 0.0);
        s.drag_end(VIEWPORT, t0);

        assert!(!s.replace_batch(batch(5)));
        settle(&mut s, t0);
        s.take_outcome();

        assert!(s.replace_batch(batch(5)));
        assert_eq!(s.deck_len(), 5);
    }
}
