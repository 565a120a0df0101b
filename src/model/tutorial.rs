//! Tutorial walkthrough state
//!
//! Five slides introduce the swipe mechanic after signup. The card slides
//! run a non-interactive swipe session; the like and skip slides each arm
//! one scripted demo swipe, so a new user watches the stack react before
//! ever driving it. Re-entering a slide restores the demo deck and replays
//! its demo.

use std::time::Instant;

use super::deck::{CandidateCard, SwipeDirection};
use super::swipe::{DeckSnapshot, SwipeConfig, SwipeSession};

#[derive(Clone, Debug)]
pub struct TutorialSlide {
    pub title: String,
    pub body: &'static str,
    pub icon: &'static str,
    pub shows_cards: bool,
    pub caption: Option<&'static str>,
    pub demo: Option<SwipeDirection>,
}

/// The fixed batch of sample songs the tutorial deck cycles through.
pub fn demo_batch() -> Vec<CandidateCard> {
    vec![
        CandidateCard {
            id: "demo-1".to_string(),
            title: "Midnight Dreams".to_string(),
            artist: "Luna Rose".to_string(),
            album: "Nocturne".to_string(),
            genre: "Indie Pop".to_string(),
            duration_ms: 203_000,
        },
        CandidateCard {
            id: "demo-2".to_string(),
            title: "Electric Waves".to_string(),
            artist: "Neon Collective".to_string(),
            album: "Synthesia".to_string(),
            genre: "Electronic".to_string(),
            duration_ms: 245_000,
        },
        CandidateCard {
            id: "demo-3".to_string(),
            title: "Golden Hour".to_string(),
            artist: "Sunset Avenue".to_string(),
            album: "Daybreak".to_string(),
            genre: "Pop".to_string(),
            duration_ms: 198_000,
        },
    ]
}

fn slides(username: &str) -> Vec<TutorialSlide> {
    vec![
        TutorialSlide {
            title: format!("Welcome, {username}!"),
            body: "nowNoise learns your taste one song at a time. This quick tour shows you how.",
            icon: "👋",
            shows_cards: false,
            caption: None,
            demo: None,
        },
        TutorialSlide {
            title: "Meet your song cards".to_string(),
            body: "Every card is one recommendation: title, artist, album and genre at a glance.",
            icon: "🎵",
            shows_cards: true,
            caption: None,
            demo: None,
        },
        TutorialSlide {
            title: "Swipe right to like".to_string(),
            body: "Like what you hear? A right swipe saves the song to your likes.",
            icon: "💚",
            shows_cards: true,
            caption: Some("Watch the demo swipe →"),
            demo: Some(SwipeDirection::Right),
        },
        TutorialSlide {
            title: "Swipe left to skip".to_string(),
            body: "Not your thing? A left swipe moves straight on to the next song.",
            icon: "⏭",
            shows_cards: true,
            caption: Some("← Watch the demo swipe"),
            demo: Some(SwipeDirection::Left),
        },
        TutorialSlide {
            title: "You're all set".to_string(),
            body: "Head to the Discover tab and start swiping. The more you swipe, the better the picks get.",
            icon: "🚀",
            shows_cards: false,
            caption: None,
            demo: None,
        },
    ]
}

/// Slide position plus the demo swipe session shown on the card slides.
/// Gestures are disabled for the whole walkthrough; the session only ever
/// moves under demo control.
#[derive(Debug)]
pub struct TutorialState {
    slides: Vec<TutorialSlide>,
    index: usize,
    pub session: SwipeSession,
}

impl TutorialState {
    pub fn new(username: &str, config: SwipeConfig, now: Instant) -> Self {
        let mut state = Self {
            slides: slides(username),
            index: 0,
            session: SwipeSession::new(demo_batch(), config, false),
        };
        state.enter_slide(now);
        state
    }

    pub fn slide(&self) -> &TutorialSlide {
        &self.slides[self.index.min(self.slides.len() - 1)]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 == self.slides.len()
    }

    /// Advance one slide. Returns true when the walkthrough is finished and
    /// the caller should route to the dashboard.
    pub fn next(&mut self, now: Instant) -> bool {
        if self.is_last() {
            return true;
        }
        self.index += 1;
        self.enter_slide(now);
        false
    }

    pub fn prev(&mut self, now: Instant) {
        if self.index == 0 {
            return;
        }
        self.index -= 1;
        self.enter_slide(now);
    }

    fn enter_slide(&mut self, now: Instant) {
        self.session.reset();
        if let Some(direction) = self.slide().demo {
            self.session.arm_demo(direction, now);
        }
    }

    pub fn snapshot(&self, viewport_cols: f32) -> TutorialSnapshot {
        TutorialSnapshot {
            slide: self.slide().clone(),
            index: self.index,
            len: self.slides.len(),
            deck: self.session.snapshot(viewport_cols),
        }
    }
}

/// Per-frame view of the walkthrough for rendering.
#[derive(Clone, Debug)]
pub struct TutorialSnapshot {
    pub slide: TutorialSlide,
    pub index: usize,
    pub len: usize,
    pub deck: DeckSnapshot,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::deck::{DeckState, SwipeOutcome};
    use std::time::Duration;

    const VIEWPORT: f32 = 80.0;

    fn tutorial() -> (TutorialState, Instant) {
        let now = Instant::now();
        (TutorialState::new("ada", SwipeConfig::default(), now), now)
    }

    #[test]
    fn opens_with_a_personal_greeting() {
        let (tut, _) = tutorial();
        assert_eq!(tut.len(), 5);
        assert_eq!(tut.index(), 0);
        assert_eq!(tut.slide().title, "Welcome, ada!");
        assert!(!tut.slide().shows_cards);
        assert!(!tut.session.demo_pending());
    }

    #[test]
    fn like_slide_arms_a_rightward_demo() {
        let (mut tut, t0) = tutorial();
        tut.next(t0);
        assert!(!tut.session.demo_pending());
        tut.next(t0);
        assert_eq!(tut.slide().demo, Some(SwipeDirection::Right));
        assert!(tut.session.demo_pending());

        tut.session.tick(VIEWPORT, t0 + Duration::from_millis(1_500));
        tut.session.tick(VIEWPORT, t0 + Duration::from_secs(5));
        assert!(matches!(
            tut.session.take_outcome(),
            Some(SwipeOutcome::Commit {
                direction: SwipeDirection::Right,
                card,
            }) if card.id == "demo-1"
        ));
        assert_eq!(tut.session.deck_len(), 2);
    }

    #[test]
    fn revisiting_a_slide_restores_the_deck_and_replays() {
        let (mut tut, t0) = tutorial();
        tut.next(t0);
        tut.next(t0);
        tut.session.tick(VIEWPORT, t0 + Duration::from_secs(5));
        tut.session.tick(VIEWPORT, t0 + Duration::from_secs(8));
        tut.session.take_outcome();
        assert_eq!(tut.session.deck_len(), 2);

        let t1 = t0 + Duration::from_secs(10);
        tut.next(t1);
        tut.prev(t1);
        assert_eq!(tut.session.deck_len(), 3);
        assert!(tut.session.demo_pending());
        assert_eq!(tut.session.deck_state(), DeckState::Idle);
    }

    #[test]
    fn gestures_stay_dead_for_the_whole_walkthrough() {
        let (mut tut, t0) = tutorial();
        for _ in 0..4 {
            assert!(!tut.session.drag_start());
            tut.next(t0);
        }
        assert!(!tut.session.drag_start());
    }

    #[test]
    fn finishes_only_past_the_last_slide() {
        let (mut tut, t0) = tutorial();
        for _ in 0..4 {
            assert!(!tut.next(t0));
        }
        assert!(tut.is_last());
        assert!(tut.next(t0));
    }

    #[test]
    fn prev_on_first_slide_is_a_no_op() {
        let (mut tut, t0) = tutorial();
        tut.prev(t0);
        assert_eq!(tut.index(), 0);
    }
}
