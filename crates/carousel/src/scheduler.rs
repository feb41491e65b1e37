//! Deferred consequences of a navigation, run as one ordered sequence.
//!
//! A transition is a cursor over [`Step::SEQUENCE`]; a step only becomes due once every step
//! before it has run, so the order never depends on the delays being well chosen. The host
//! asks for [`Scheduler::next_deadline`], sleeps until then, and pumps [`Scheduler::pop_due`].

use crate::options::Timing;
use crate::slot::Direction;
use std::collections::VecDeque;
use strum::Display as StrumDisplay;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay)]
#[strum(serialize_all = "kebab-case")]
pub enum Step {
    /// Activate the caption of the new centre item.
    RevealCaption,
    /// Disable the wrapping card's transition and move it to the opposite hidden slot.
    TeleportSnap,
    /// Re-enable the transition and slide the wrapping card onto the leading edge.
    TeleportSettle,
    /// Drop the lock and clear any caption still exiting.
    Release,
}

impl Step {
    pub const SEQUENCE: [Step; 4] = [
        Step::RevealCaption,
        Step::TeleportSnap,
        Step::TeleportSettle,
        Step::Release,
    ];

    pub fn offset(self, timing: &Timing) -> u64 {
        match self {
            Step::RevealCaption => timing.caption_delay_ms,
            Step::TeleportSnap => timing.snap_at(),
            Step::TeleportSettle => timing.settle_at(),
            Step::Release => timing.lock_ms,
        }
    }
}

/// Where a transition stands, named after what is visibly happening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay)]
#[strum(serialize_all = "kebab-case")]
pub enum Phase {
    Idle,
    /// Slots reassigned, old caption fading out, wrapping card sliding into a hidden slot.
    CaptionExiting,
    CaptionEntering,
    /// Wrapping card parked in the opposite hidden slot with its transition off.
    Teleporting,
    Settling,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub direction: Direction,
    pub started_ms: u64,
    /// Card carried through the hidden slots.
    pub wrapped: Option<usize>,
    completed: usize,
}

impl Transition {
    pub fn pending(&self) -> Option<Step> {
        Step::SEQUENCE.get(self.completed).copied()
    }

    pub fn due_at(&self, timing: &Timing) -> Option<u64> {
        self.pending()
            .map(|step| self.started_ms + step.offset(timing))
    }

    pub fn phase(&self) -> Phase {
        match self.completed.checked_sub(1).map(|i| Step::SEQUENCE[i]) {
            None => Phase::CaptionExiting,
            Some(Step::RevealCaption) => Phase::CaptionEntering,
            Some(Step::TeleportSnap) => Phase::Teleporting,
            Some(Step::TeleportSettle) => Phase::Settling,
            Some(Step::Release) => Phase::Idle,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Motion {
    #[default]
    Idle,
    Locked(Transition),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scheduler {
    timing: Timing,
    motion: Motion,
    /// Pending card reveals, in due order.
    reveals: VecDeque<(u64, usize)>,
}

impl Scheduler {
    pub fn new(timing: Timing) -> Self {
        Self {
            timing,
            motion: Motion::Idle,
            reveals: VecDeque::new(),
        }
    }

    pub fn motion(&self) -> Motion {
        self.motion
    }

    pub fn is_locked(&self) -> bool {
        matches!(self.motion, Motion::Locked(_))
    }

    pub fn phase(&self) -> Phase {
        match self.motion {
            Motion::Idle => Phase::Idle,
            Motion::Locked(t) => t.phase(),
        }
    }

    /// Takes the lock for a new transition. Returns `false`, changing nothing, if one is
    /// already running.
    pub fn begin(&mut self, direction: Direction, wrapped: Option<usize>, now_ms: u64) -> bool {
        if self.is_locked() {
            return false;
        }
        self.motion = Motion::Locked(Transition {
            direction,
            started_ms: now_ms,
            wrapped,
            completed: 0,
        });
        log::trace!("transition {direction} locked at {now_ms}ms");
        true
    }

    /// The next step of the running transition if its time has come. Releasing returns the
    /// scheduler to [`Motion::Idle`].
    pub fn pop_due(&mut self, now_ms: u64) -> Option<(Step, Transition)> {
        let Motion::Locked(transition) = &mut self.motion else {
            return None;
        };
        let step = transition.pending()?;
        if transition.due_at(&self.timing)? > now_ms {
            return None;
        }
        transition.completed += 1;
        let snapshot = *transition;
        if step == Step::Release {
            self.motion = Motion::Idle;
        }
        log::trace!("{step} ({}ms)", now_ms.saturating_sub(snapshot.started_ms));
        Some((step, snapshot))
    }

    pub fn schedule_reveals(&mut self, now_ms: u64, cards: usize) {
        self.reveals = (0..cards)
            .map(|card| {
                let due = now_ms
                    + self.timing.reveal_delay_ms
                    + card as u64 * self.timing.reveal_stagger_ms;
                (due, card)
            })
            .collect();
    }

    pub fn pop_reveal(&mut self, now_ms: u64) -> Option<usize> {
        match self.reveals.front() {
            Some(&(due, card)) if due <= now_ms => {
                self.reveals.pop_front();
                Some(card)
            }
            _ => None,
        }
    }

    /// Earliest time anything deferred becomes due.
    pub fn next_deadline(&self) -> Option<u64> {
        let step = match self.motion {
            Motion::Locked(t) => t.due_at(&self.timing),
            Motion::Idle => None,
        };
        let reveal = self.reveals.front().map(|&(due, _)| due);
        step.into_iter().chain(reveal).min()
    }

    pub fn is_quiescent(&self) -> bool {
        !self.is_locked() && self.reveals.is_empty()
    }

    /// Forgets every pending step and reveal.
    pub fn cancel(&mut self) {
        self.motion = Motion::Idle;
        self.reveals.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(s: &mut Scheduler, now_ms: u64) -> Vec<Step> {
        std::iter::from_fn(|| s.pop_due(now_ms).map(|(step, _)| step)).collect()
    }

    #[test]
    fn test_steps_fire_in_sequence_at_offsets() {
        let mut s = Scheduler::new(Timing::default());
        assert!(s.begin(Direction::Next, Some(0), 1_000));
        assert_eq!(s.phase(), Phase::CaptionExiting);
        assert_eq!(s.next_deadline(), Some(1_300));

        assert!(drain(&mut s, 1_299).is_empty());
        assert_eq!(drain(&mut s, 1_300), vec![Step::RevealCaption]);
        assert_eq!(s.phase(), Phase::CaptionEntering);
        assert_eq!(drain(&mut s, 1_350), vec![Step::TeleportSnap]);
        assert_eq!(s.phase(), Phase::Teleporting);
        assert_eq!(drain(&mut s, 1_400), vec![Step::TeleportSettle]);
        assert_eq!(s.phase(), Phase::Settling);
        assert!(s.is_locked());
        assert_eq!(drain(&mut s, 1_700), vec![Step::Release]);
        assert_eq!(s.phase(), Phase::Idle);
        assert_eq!(s.next_deadline(), None);
    }

    #[test]
    fn test_late_pump_still_runs_steps_in_order() {
        let mut s = Scheduler::new(Timing::default());
        s.begin(Direction::Prev, Some(4), 0);
        assert!(matches!(
            s.motion(),
            Motion::Locked(Transition { direction: Direction::Prev, wrapped: Some(4), .. })
        ));
        assert_eq!(drain(&mut s, 5_000), Step::SEQUENCE.to_vec());
        assert_eq!(s.motion(), Motion::Idle);
    }

    #[test]
    fn test_begin_while_locked_changes_nothing() {
        let mut s = Scheduler::new(Timing::default());
        s.begin(Direction::Next, Some(0), 0);
        let before = s.clone();
        assert!(!s.begin(Direction::Prev, Some(4), 10));
        assert_eq!(s, before);
    }

    #[test]
    fn test_reveals_are_staggered() {
        let mut s = Scheduler::new(Timing::default());
        s.schedule_reveals(0, 3);
        assert_eq!(s.next_deadline(), Some(600));
        assert_eq!(s.pop_reveal(650), Some(0));
        assert_eq!(s.pop_reveal(650), None);
        assert_eq!(s.next_deadline(), Some(700));
        assert_eq!(s.pop_reveal(900), Some(1));
        assert_eq!(s.pop_reveal(900), Some(2));
        assert!(s.is_quiescent());
    }

    #[test]
    fn test_cancel_drops_everything() {
        let mut s = Scheduler::new(Timing::default());
        s.begin(Direction::Next, Some(0), 0);
        s.schedule_reveals(0, 5);
        s.cancel();
        assert!(s.is_quiescent());
        assert_eq!(s.next_deadline(), None);
        assert!(s.pop_due(10_000).is_none());
    }
}
