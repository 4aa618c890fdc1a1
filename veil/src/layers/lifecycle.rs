//! Per-notification state machine.
//!
//! ```text
//! Entering --delay--> Visible --duration (auto_hide only)--> Exiting --transition--> Closed
//! ```
//!
//! One [`Timer`] at a time drives the machine. A manual close jumps from
//! `Visible` straight to `Exiting`; a notification closed while still
//! `Entering` was never shown and goes directly to `Closed`.

use std::time::Duration;

use tokio::time::Instant;

use crate::props::Props;
use crate::timer::Timer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Entering,
    Visible,
    Exiting,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub delay: Duration,
    pub duration: Duration,
    pub transition: Duration,
    pub auto_hide: bool,
}

impl Timing {
    /// Read timing from merged notification props.
    pub fn from_props(props: &Props, transition: Duration) -> Self {
        Self {
            delay: props.delay(),
            duration: props.duration(),
            transition,
            auto_hide: props.auto_hide(),
        }
    }
}

#[derive(Debug)]
pub struct Lifecycle {
    phase: Phase,
    timing: Timing,
    timer: Timer,
}

impl Lifecycle {
    /// Start in `Entering`, due to become visible after `timing.delay`.
    pub fn start(now: Instant, timing: Timing) -> Self {
        let mut timer = Timer::idle();
        timer.start(now, timing.delay);
        Self {
            phase: Phase::Entering,
            timing,
            timer,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }

    /// True while the notification should be on screen.
    pub fn is_shown(&self) -> bool {
        matches!(self.phase, Phase::Visible | Phase::Exiting)
    }

    pub fn is_closed(&self) -> bool {
        self.phase == Phase::Closed
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }

    /// Run every transition due at `now`. Returns true if the phase changed.
    ///
    /// Follow-up timers are armed from the deadline that fired rather than
    /// from `now`, so a late tick does not stretch the schedule.
    pub fn advance(&mut self, now: Instant) -> bool {
        let before = self.phase;
        while let Some(fired_at) = self.timer.fire(now) {
            match self.phase {
                Phase::Entering => {
                    self.phase = Phase::Visible;
                    if self.timing.auto_hide {
                        self.timer.start(fired_at, self.timing.duration);
                    }
                }
                Phase::Visible => {
                    self.phase = Phase::Exiting;
                    self.timer.start(fired_at, self.timing.transition);
                }
                Phase::Exiting => {
                    self.phase = Phase::Closed;
                }
                Phase::Closed => {}
            }
            log::trace!("[lifecycle] {:?} -> {:?}", before, self.phase);
        }
        self.phase != before
    }

    /// Manual close. Returns false if already exiting or closed.
    pub fn request_close(&mut self, now: Instant) -> bool {
        match self.phase {
            Phase::Entering => {
                self.timer.cancel();
                self.phase = Phase::Closed;
                true
            }
            Phase::Visible => {
                self.phase = Phase::Exiting;
                self.timer.start(now, self.timing.transition);
                true
            }
            Phase::Exiting | Phase::Closed => false,
        }
    }

    /// Disarm the pending timer. Used when the notification unmounts early.
    pub fn cancel(&mut self) {
        self.timer.cancel();
    }
}
