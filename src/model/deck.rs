//! Card queue ownership and the stack state machine
//!
//! The deck owns the ordered queue of candidate cards. The head of the queue
//! is the only interactive card ("top card"); the element behind it is
//! rendered as a non-interactive preview. Committing a swipe pops the head;
//! when the queue runs dry the deck refills from the originally supplied
//! batch, which gives the cyclic browsing the tutorial and the Discover tab
//! rely on.

use std::collections::VecDeque;
use std::fmt;

/// One swipeable unit: a song recommendation.
///
/// Display fields are opaque payload as far as the queue is concerned; the
/// deck never reads or mutates them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CandidateCard {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub genre: String,
    pub duration_ms: u32,
}

/// Direction of a committed swipe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwipeDirection {
    Left,
    Right,
}

impl SwipeDirection {
    /// Sign of the horizontal exit: -1 for left, +1 for right.
    pub fn sign(self) -> f32 {
        match self {
            SwipeDirection::Left => -1.0,
            SwipeDirection::Right => 1.0,
        }
    }
}

/// Result of one completed gesture, produced exactly once per gesture.
#[derive(Clone, Debug, PartialEq)]
pub enum SwipeOutcome {
    Commit {
        direction: SwipeDirection,
        card: CandidateCard,
    },
    Cancelled,
}

/// Deck phases. Input is only accepted in `Idle`; `Animating` locks the
/// queue until the in-flight transition settles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeckState {
    Idle,
    Animating,
    Empty,
}

#[derive(Debug)]
pub enum DeckError {
    /// The commit target does not match the queue head. Indicates an
    /// ordering bug upstream; the queue is left untouched.
    InvariantViolation { expected: Option<String>, got: String },
}

impl fmt::Display for DeckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeckError::InvariantViolation { expected, got } => write!(
                f,
                "commit target {:?} is not the queue head {:?}",
                got, expected
            ),
        }
    }
}

impl std::error::Error for DeckError {}

/// Ordered queue of candidate cards plus the phase machine around it.
///
/// Single writer: all mutation happens synchronously inside controller
/// callbacks, so no locking beyond the app-wide model mutex is needed.
#[derive(Debug)]
pub struct CardDeck {
    queue: VecDeque<CandidateCard>,
    batch: Vec<CandidateCard>,
    state: DeckState,
}

impl CardDeck {
    pub fn new(batch: Vec<CandidateCard>) -> Self {
        let state = if batch.is_empty() {
            DeckState::Empty
        } else {
            DeckState::Idle
        };
        Self {
            queue: batch.iter().cloned().collect(),
            batch,
            state,
        }
    }

    pub fn state(&self) -> DeckState {
        self.state
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// The sole interactive card, or `None` while the deck is empty.
    pub fn top(&self) -> Option<&CandidateCard> {
        self.queue.front()
    }

    /// The card rendered beneath the top card, never interactive.
    pub fn preview(&self) -> Option<&CandidateCard> {
        self.queue.get(1)
    }

    /// Lock input for the duration of a transition. Only valid from `Idle`.
    pub fn begin_animation(&mut self) -> bool {
        if self.state != DeckState::Idle {
            return false;
        }
        self.state = DeckState::Animating;
        true
    }

    /// Settle a commit: pop the head and unlock. `card_id` must name the
    /// current head; anything else is rejected without mutating the queue.
    pub fn commit(
        &mut self,
        card_id: &str,
        direction: SwipeDirection,
    ) -> Result<SwipeOutcome, DeckError> {
        let matches_head = self.queue.front().is_some_and(|c| c.id == card_id);
        if !matches_head {
            return Err(DeckError::InvariantViolation {
                expected: self.queue.front().map(|c| c.id.clone()),
                got: card_id.to_string(),
            });
        }
        let Some(card) = self.queue.pop_front() else {
            return Err(DeckError::InvariantViolation {
                expected: None,
                got: card_id.to_string(),
            });
        };
        self.state = if self.queue.is_empty() {
            DeckState::Empty
        } else {
            DeckState::Idle
        };
        tracing::debug!(card = %card.id, ?direction, remaining = self.queue.len(), "swipe committed");
        Ok(SwipeOutcome::Commit { direction, card })
    }

    /// Settle a cancelled gesture: unlock without touching the queue.
    pub fn cancel(&mut self) -> SwipeOutcome {
        if self.state == DeckState::Animating {
            self.state = DeckState::Idle;
        }
        SwipeOutcome::Cancelled
    }

    /// Restore the originally supplied batch. Returns the new queue length.
    pub fn refill(&mut self) -> usize {
        self.queue = self.batch.iter().cloned().collect();
        self.state = if self.queue.is_empty() {
            DeckState::Empty
        } else {
            DeckState::Idle
        };
        tracing::debug!(count = self.queue.len(), "deck refilled from batch");
        self.queue.len()
    }

    /// Swap in a new provider batch and restart from it. Ignored while a
    /// transition is in flight so an animating card is never pulled out from
    /// under the animator.
    pub fn replace_batch(&mut self, batch: Vec<CandidateCard>) -> bool {
        if self.state == DeckState::Animating {
            tracing::debug!("batch replacement skipped mid-animation");
            return false;
        }
        self.batch = batch;
        self.refill();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn batch(n: usize) -> Vec<CandidateCard> {
        (1..=n)
            .map(|i| CandidateCard {
                id: format!("S{i}"),
                title: format!("Song {i}"),
                artist: "Artist".to_string(),
                album: "Album".to_string(),
                genre: "Pop".to_string(),
                duration_ms: 200_000,
            })
            .collect()
    }

    #[test]
    fn commit_pops_exactly_the_head() {
        let mut deck = CardDeck::new(batch(3));
        assert!(deck.begin_animation());
        let outcome = deck.commit("S1", SwipeDirection::Right).unwrap();
        match outcome {
            SwipeOutcome::Commit { direction, card } => {
                assert_eq!(direction, SwipeDirection::Right);
                assert_eq!(card.id, "S1");
            }
            SwipeOutcome::Cancelled => panic!("expected commit"),
        }
        assert_eq!(deck.len(), 2);
        assert_eq!(deck.top().unwrap().id, "S2");
        assert_eq!(deck.preview().unwrap().id, "S3");
        assert_eq!(deck.state(), DeckState::Idle);
    }

    #[test]
    fn commit_against_non_head_is_rejected() {
        let mut deck = CardDeck::new(batch(3));
        deck.begin_animation();
        let err = deck.commit("S2", SwipeDirection::Left).unwrap_err();
        assert!(matches!(err, DeckError::InvariantViolation { .. }));
        // Queue untouched, still locked until the caller resolves it.
        assert_eq!(deck.len(), 3);
        assert_eq!(deck.top().unwrap().id, "S1");
    }

    #[test]
    fn cancel_never_alters_the_queue() {
        let mut deck = CardDeck::new(batch(3));
        deck.begin_animation();
        assert_eq!(deck.cancel(), SwipeOutcome::Cancelled);
        assert_eq!(deck.len(), 3);
        assert_eq!(deck.top().unwrap().id, "S1");
        assert_eq!(deck.state(), DeckState::Idle);
        // Idempotent from Idle as well.
        deck.cancel();
        assert_eq!(deck.len(), 3);
    }

    #[test]
    fn last_commit_empties_then_refill_restores() {
        let mut deck = CardDeck::new(batch(1));
        deck.begin_animation();
        deck.commit("S1", SwipeDirection::Left).unwrap();
        assert_eq!(deck.state(), DeckState::Empty);
        assert!(deck.top().is_none());
        assert!(deck.preview().is_none());

        assert_eq!(deck.refill(), 1);
        assert_eq!(deck.state(), DeckState::Idle);
        assert_eq!(deck.top().unwrap().id, "S1");
    }

    #[test]
    fn begin_animation_only_from_idle() {
        let mut deck = CardDeck::new(batch(2));
        assert!(deck.begin_animation());
        assert!(!deck.begin_animation());
        deck.commit("S1", SwipeDirection::Right).unwrap();
        assert!(deck.begin_animation());
    }

    #[test]
    fn empty_batch_starts_empty() {
        let deck = CardDeck::new(Vec::new());
        assert_eq!(deck.state(), DeckState::Empty);
        assert!(deck.top().is_none());
    }

    #[test]
    fn replace_batch_waits_for_settle() {
        let mut deck = CardDeck::new(batch(2));
        deck.begin_animation();
        assert!(!deck.replace_batch(batch(5)));
        assert_eq!(deck.len(), 2);
        deck.cancel();
        assert!(deck.replace_batch(batch(5)));
        assert_eq!(deck.len(), 5);
    }
}
