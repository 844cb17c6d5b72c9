//! Deadlines for scheduled unlocks
//!
//! Timers are fire-and-forget: nothing is ever cancelled. A ticket that has
//! gone stale by the time it fires is turned away by the session.

use crate::game::UnlockTicket;
use std::time::{Duration, Instant};

#[derive(Debug, Default)]
pub struct TimerQueue {
    pending: Vec<(Instant, UnlockTicket)>,
}

impl TimerQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, ticket: UnlockTicket, after: Duration, now: Instant) {
        self.pending.push((now + after, ticket));
    }

    /// Earliest pending deadline
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.iter().map(|(deadline, _)| *deadline).min()
    }

    /// Remove and return every ticket due at `now`, earliest first
    pub fn take_due(&mut self, now: Instant) -> Vec<UnlockTicket> {
        let mut due: Vec<(Instant, UnlockTicket)> = Vec::new();
        self.pending.retain(|&(deadline, ticket)| {
            if deadline <= now {
                due.push((deadline, ticket));
                false
            } else {
                true
            }
        });
        due.sort_by_key(|(deadline, _)| *deadline);
        due.into_iter().map(|(_, ticket)| ticket).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
