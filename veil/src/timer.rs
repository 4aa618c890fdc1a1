//! Cancelable one-shot deadline.
//!
//! Nothing here sleeps. A `Timer` only remembers when it is due; the host loop
//! sleeps until the earliest deadline across all timers and then calls
//! [`Timer::fire`]. Dropping or canceling a timer guarantees it never fires.

use std::time::Duration;

use tokio::time::Instant;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timer {
    deadline: Option<Instant>,
}

impl Timer {
    pub fn idle() -> Self {
        Self::default()
    }

    /// Arm the timer to fire `after` from `from`, replacing any pending deadline.
    pub fn start(&mut self, from: Instant, after: Duration) {
        self.deadline = Some(from + after);
    }

    /// Disarm the timer. Returns true if it was pending.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// If the timer is due at `now`, disarm it and return the deadline it
    /// was armed for.
    pub fn fire(&mut self, now: Instant) -> Option<Instant> {
        match self.deadline {
            Some(deadline) if deadline <= now => self.deadline.take(),
            _ => None,
        }
    }
}
