//! Time-based card transition animation
//!
//! Two transitions exist: a fixed-duration exit tween after a committed
//! swipe, and a critically damped spring back to the origin after a
//! cancelled one. Both are evaluated in closed form against the wall clock
//! on every UI tick, so the animator needs no timer task and settles exactly
//! once per transition regardless of tick jitter.

use std::time::{Duration, Instant};

use super::deck::SwipeDirection;

/// Columns past the viewport edge the exit tween overshoots to, so the card
/// fully clears the screen before it is popped.
const EXIT_OVERSHOOT_COLS: f32 = 10.0;
/// Angular frequency of the return spring, per second.
const SPRING_OMEGA: f32 = 14.0;
/// The spring is treated as settled once every component of the pose decays
/// below this amplitude.
const SPRING_SETTLE_EPS: f32 = 0.5;

/// Render pose of the top card: offset in cells plus a rotation badge angle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CardPose {
    pub dx: f32,
    pub dy: f32,
    pub rotation_deg: f32,
}

impl CardPose {
    pub const ZERO: CardPose = CardPose {
        dx: 0.0,
        dy: 0.0,
        rotation_deg: 0.0,
    };

    fn scaled(self, k: f32) -> CardPose {
        CardPose {
            dx: self.dx * k,
            dy: self.dy * k,
            rotation_deg: self.rotation_deg * k,
        }
    }

    fn peak(self) -> f32 {
        self.dx.abs().max(self.dy.abs()).max(self.rotation_deg.abs())
    }
}

#[derive(Debug)]
enum Animation {
    Commit {
        card_id: String,
        direction: SwipeDirection,
        from: CardPose,
        to: CardPose,
        started: Instant,
        duration: Duration,
    },
    Cancel {
        from: CardPose,
        started: Instant,
    },
}

/// What the animator reports on a tick. The two settled variants are each
/// produced at most once per started transition.
#[derive(Clone, Debug, PartialEq)]
pub enum AnimatorStatus {
    Idle,
    Running(CardPose),
    CommitSettled {
        card_id: String,
        direction: SwipeDirection,
    },
    CancelSettled,
}

/// Drives the top card from its release pose to either the viewport edge or
/// back to the origin.
#[derive(Debug)]
pub struct CardAnimator {
    animation: Option<Animation>,
    exit_rotation_deg: f32,
    commit_duration: Duration,
}

impl CardAnimator {
    pub fn new(exit_rotation_deg: f32, commit_duration: Duration) -> Self {
        Self {
            animation: None,
            exit_rotation_deg,
            commit_duration,
        }
    }

    pub fn is_active(&self) -> bool {
        self.animation.is_some()
    }

    /// Begin the exit tween for `card_id`. Refused while another transition
    /// is in flight; overlapping starts indicate a locking bug upstream.
    pub fn start_commit(
        &mut self,
        card_id: String,
        direction: SwipeDirection,
        from: CardPose,
        viewport_cols: f32,
        now: Instant,
    ) -> bool {
        if self.animation.is_some() {
            tracing::error!(card = %card_id, "commit animation requested while another is active");
            return false;
        }
        let to = CardPose {
            dx: direction.sign() * (viewport_cols + EXIT_OVERSHOOT_COLS),
            dy: 0.0,
            rotation_deg: direction.sign() * self.exit_rotation_deg,
        };
        self.animation = Some(Animation::Commit {
            card_id,
            direction,
            from,
            to,
            started: now,
            duration: self.commit_duration,
        });
        true
    }

    /// Begin the spring back to the origin from the release pose.
    pub fn start_cancel(&mut self, from: CardPose, now: Instant) -> bool {
        if self.animation.is_some() {
            tracing::error!("cancel animation requested while another is active");
            return false;
        }
        self.animation = Some(Animation::Cancel { from, started: now });
        true
    }

    /// Advance to `now`. Returns the pose to render, or the terminal signal
    /// when the transition just finished.
    pub fn tick(&mut self, now: Instant) -> AnimatorStatus {
        match &self.animation {
            None => AnimatorStatus::Idle,
            Some(Animation::Commit {
                from,
                to,
                started,
                duration,
                ..
            }) => {
                let elapsed = now.saturating_duration_since(*started);
                if elapsed >= *duration {
                    let Some(Animation::Commit {
                        card_id, direction, ..
                    }) = self.animation.take()
                    else {
                        return AnimatorStatus::Idle;
                    };
                    return AnimatorStatus::CommitSettled { card_id, direction };
                }
                let t = elapsed.as_secs_f32() / duration.as_secs_f32();
                let k = ease_out(t);
                AnimatorStatus::Running(CardPose {
                    dx: from.dx + (to.dx - from.dx) * k,
                    dy: from.dy + (to.dy - from.dy) * k,
                    rotation_deg: from.rotation_deg + (to.rotation_deg - from.rotation_deg) * k,
                })
            }
            Some(Animation::Cancel { from, started }) => {
                let t = now.saturating_duration_since(*started).as_secs_f32();
                // Critically damped spring released at rest: x(t) = x0 (1 + wt) e^{-wt}.
                let decay = (1.0 + SPRING_OMEGA * t) * (-SPRING_OMEGA * t).exp();
                let pose = from.scaled(decay);
                if pose.peak() < SPRING_SETTLE_EPS {
                    self.animation = None;
                    return AnimatorStatus::CancelSettled;
                }
                AnimatorStatus::Running(pose)
            }
        }
    }
}

fn ease_out(t: f32) -> f32 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn animator() -> CardAnimator {
        CardAnimator::new(30.0, Duration::from_millis(300))
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn commit_runs_then_settles_exactly_once() {
        let mut anim = animator();
        let t0 = Instant::now();
        let from = CardPose {
            dx: 25.0,
            dy: 2.0,
            rotation_deg: 2.5,
        };
        assert!(anim.start_commit("S1".into(), SwipeDirection::Right, from, 80.0, t0));

        let mid = anim.tick(t0 + ms(150));
        match mid {
            AnimatorStatus::Running(pose) => {
                assert!(pose.dx > from.dx);
                assert!(pose.dx < 90.0);
                assert!(pose.rotation_deg > from.rotation_deg);
            }
            other => panic!("expected running, got {other:?}"),
        }

        let done = anim.tick(t0 + ms(300));
        assert_eq!(
            done,
            AnimatorStatus::CommitSettled {
                card_id: "S1".to_string(),
                direction: SwipeDirection::Right,
            }
        );
        assert_eq!(anim.tick(t0 + ms(350)), AnimatorStatus::Idle);
        assert!(!anim.is_active());
    }

    #[test]
    fn commit_targets_past_the_viewport_edge() {
        let mut anim = animator();
        let t0 = Instant::now();
        anim.start_commit("S1".into(), SwipeDirection::Left, CardPose::ZERO, 80.0, t0);
        let status = anim.tick(t0 + ms(299));
        match status {
            AnimatorStatus::Running(pose) => {
                assert!(pose.dx < -80.0, "card not past the edge: {}", pose.dx);
                assert!(pose.rotation_deg < -29.0);
            }
            other => panic!("expected running, got {other:?}"),
        }
    }

    #[test]
    fn cancel_decays_to_origin_and_settles_once() {
        let mut anim = animator();
        let t0 = Instant::now();
        let from = CardPose {
            dx: 20.0,
            dy: -4.0,
            rotation_deg: 2.0,
        };
        assert!(anim.start_cancel(from, t0));

        let early = anim.tick(t0 + ms(40));
        let later = anim.tick(t0 + ms(120));
        let (a, b) = match (early, later) {
            (AnimatorStatus::Running(a), AnimatorStatus::Running(b)) => (a, b),
            other => panic!("expected two running ticks, got {other:?}"),
        };
        assert!(a.dx.abs() < from.dx.abs());
        assert!(b.dx.abs() < a.dx.abs());
        // No sign flip: critical damping never oscillates.
        assert!(b.dx > 0.0);

        assert_eq!(anim.tick(t0 + ms(2_000)), AnimatorStatus::CancelSettled);
        assert_eq!(anim.tick(t0 + ms(2_050)), AnimatorStatus::Idle);
    }

    #[test]
    fn cancel_from_origin_settles_immediately() {
        let mut anim = animator();
        let t0 = Instant::now();
        anim.start_cancel(CardPose::ZERO, t0);
        assert_eq!(anim.tick(t0), AnimatorStatus::CancelSettled);
    }

    #[test]
    fn starts_are_refused_while_active() {
        let mut anim = animator();
        let t0 = Instant::now();
        anim.start_cancel(
            CardPose {
                dx: 10.0,
                dy: 0.0,
                rotation_deg: 1.0,
            },
            t0,
        );
        assert!(!anim.start_commit("S2".into(), SwipeDirection::Right, CardPose::ZERO, 80.0, t0));
        assert!(!anim.start_cancel(CardPose::ZERO, t0));
        assert!(anim.is_active());
    }

    #[test]
    fn exit_rotation_follows_direction() {
        let t0 = Instant::now();
        for (direction, sign) in [(SwipeDirection::Left, -1.0), (SwipeDirection::Right, 1.0)] {
            let mut anim = animator();
            anim.start_commit("S1".into(), direction, CardPose::ZERO, 60.0, t0);
            if let AnimatorStatus::Running(pose) = anim.tick(t0 + ms(290)) {
                assert!(pose.rotation_deg * sign > 0.0);
                assert!(pose.dx * sign > 0.0);
            } else {
                panic!("expected running");
            }
        }
    }
}
