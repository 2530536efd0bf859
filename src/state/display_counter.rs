//! Debounced copy of the current index used for the on-screen counter.

use crate::config::COUNTER_DEBOUNCE;
use crate::state::timer::PendingTimer;
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct DisplayCounter {
    display_index: usize,
    target_index: usize,
    pending: PendingTimer,
}

impl DisplayCounter {
    pub fn new(index: usize) -> Self {
        Self {
            display_index: index,
            target_index: index,
            pending: PendingTimer::new(),
        }
    }

    pub fn display_index(&self) -> usize {
        self.display_index
    }

    /// Rapid changes show at once; others follow after the debounce delay.
    pub fn index_changed(&mut self, index: usize, rapid: bool, now: Instant) {
        self.target_index = index;
        if rapid {
            self.pending.cancel();
            self.display_index = index;
        } else {
            self.pending.schedule(now, COUNTER_DEBOUNCE);
        }
    }

    /// Shows `index` immediately, dropping any pending update.
    pub fn snap_to(&mut self, index: usize) {
        self.pending.cancel();
        self.target_index = index;
        self.display_index = index;
    }

    /// Applies a due update. Returns whether the displayed index changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.pending.fire_if_due(now) && self.display_index != self.target_index {
            self.display_index = self.target_index;
            return true;
        }
        false
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.deadline()
    }

    pub fn cancel(&mut self) {
        self.pending.cancel();
    }
}
