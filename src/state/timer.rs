//! Single-slot deadline used for the counter debounce and the controls idle timer.

use std::time::{Duration, Instant};

/// At most one pending deadline. Scheduling always replaces the previous one.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PendingTimer {
    deadline: Option<Instant>,
}

impl PendingTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels any pending deadline and arms a new one `delay` after `now`.
    pub fn schedule(&mut self, now: Instant, delay: Duration) {
        self.deadline = Some(now + delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Fires the timer if its deadline has passed. Returns `true` exactly once per schedule.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}
