//! Position state for the artwork viewer.
//!
//! `PositionController` is the only writer of the current index. Committed
//! transitions are returned as `IndexChanged` events for listeners to consume;
//! out-of-range requests are dropped without touching state.

use crate::config::RAPID_NAVIGATION_THRESHOLD;
use log::debug;
use std::num::NonZeroUsize;
use std::time::Instant;

/// Direction of the last committed navigation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
    #[default]
    None,
}

impl Direction {
    /// Sign used by the presenter to pick the slide side.
    pub fn sign(self) -> i32 {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
            Direction::None => 0,
        }
    }
}

/// Emitted for every committed `request_navigate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexChanged {
    pub index: usize,
    pub direction: Direction,
    /// The previous committed navigation happened less than the rapid threshold ago.
    pub rapid: bool,
}

/// Receives committed index changes. Silent external syncs are never delivered.
pub trait IndexListener {
    fn index_committed(&mut self, change: &IndexChanged);
}

/// Owns the current index of a non-empty artwork list.
#[derive(Debug, Clone)]
pub struct PositionController {
    len: NonZeroUsize,
    current_index: usize,
    direction: Direction,
    last_navigation: Option<Instant>,
    rapid: bool,
}

impl PositionController {
    /// Creates a controller; an out-of-range initial index starts at 0.
    pub fn new(len: NonZeroUsize, initial_index: usize) -> Self {
        let current_index = if initial_index < len.get() {
            initial_index
        } else {
            0
        };
        Self {
            len,
            current_index,
            direction: Direction::None,
            last_navigation: None,
            rapid: false,
        }
    }

    pub fn len(&self) -> usize {
        self.len.get()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Whether the last committed navigation was rapid.
    pub fn is_rapid(&self) -> bool {
        self.rapid
    }

    pub fn is_first(&self) -> bool {
        self.current_index == 0
    }

    pub fn is_last(&self) -> bool {
        self.current_index + 1 == self.len.get()
    }

    /// Moves to `target_index` if it is in bounds; otherwise nothing happens.
    pub fn request_navigate(
        &mut self,
        target_index: i64,
        direction: Direction,
        now: Instant,
    ) -> Option<IndexChanged> {
        let index = usize::try_from(target_index)
            .ok()
            .filter(|index| *index < self.len.get())?;

        let rapid = self
            .last_navigation
            .map(|previous| now.saturating_duration_since(previous) < RAPID_NAVIGATION_THRESHOLD)
            .unwrap_or(false);

        self.direction = direction;
        self.current_index = index;
        self.last_navigation = Some(now);
        self.rapid = rapid;

        debug!("Navigated to {} ({:?}, rapid: {})", index, direction, rapid);
        Some(IndexChanged {
            index,
            direction,
            rapid,
        })
    }

    pub fn go_to_previous(&mut self, now: Instant) -> Option<IndexChanged> {
        let target = self.current_index as i64 - 1;
        self.request_navigate(target, Direction::Backward, now)
    }

    pub fn go_to_next(&mut self, now: Instant) -> Option<IndexChanged> {
        let target = self.current_index as i64 + 1;
        self.request_navigate(target, Direction::Forward, now)
    }

    /// Adopts an index that changed outside the viewer (history, deep link).
    ///
    /// Leaves direction, timestamp and rapid flag alone and emits no event.
    /// Returns whether the index changed.
    pub fn sync_from_external_index(&mut self, new_index: usize) -> bool {
        if new_index == self.current_index || new_index >= self.len.get() {
            return false;
        }
        debug!("External sync {} -> {}", self.current_index, new_index);
        self.current_index = new_index;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn controller(len: usize, initial: usize) -> PositionController {
        PositionController::new(NonZeroUsize::new(len).unwrap(), initial)
    }

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn initial_index_out_of_range_starts_at_zero() {
        assert_eq!(controller(4, 3).current_index(), 3);
        assert_eq!(controller(4, 4).current_index(), 0);
    }

    #[test]
    fn previous_at_first_is_a_no_op() {
        let t0 = Instant::now();
        let mut nav = controller(3, 0);
        assert_eq!(nav.go_to_previous(t0), None);
        assert_eq!(nav.current_index(), 0);
        assert_eq!(nav.direction(), Direction::None);
    }

    #[test]
    fn next_at_last_is_a_no_op() {
        let t0 = Instant::now();
        let mut nav = controller(3, 2);
        assert_eq!(nav.go_to_next(t0), None);
        assert_eq!(nav.current_index(), 2);
        assert_eq!(nav.direction(), Direction::None);
    }

    #[test]
    fn out_of_range_requests_are_dropped() {
        let t0 = Instant::now();
        let mut nav = controller(5, 2);
        assert_eq!(nav.request_navigate(-1, Direction::Backward, t0), None);
        assert_eq!(nav.request_navigate(5, Direction::Forward, t0), None);
        assert_eq!(nav.current_index(), 2);
    }

    #[test]
    fn direction_follows_the_request() {
        let t0 = Instant::now();
        let mut nav = controller(5, 2);
        nav.go_to_next(t0);
        assert_eq!(nav.direction(), Direction::Forward);
        nav.go_to_previous(t0 + ms(500));
        assert_eq!(nav.direction(), Direction::Backward);
        assert_eq!(nav.current_index(), 2);
    }

    #[test]
    fn rapid_flag_depends_on_spacing() {
        let t0 = Instant::now();
        let mut nav = controller(10, 0);

        let first = nav.request_navigate(1, Direction::Forward, t0).unwrap();
        assert!(!first.rapid);

        let second = nav.request_navigate(2, Direction::Forward, t0 + ms(99)).unwrap();
        assert!(second.rapid);

        let third = nav
            .request_navigate(3, Direction::Forward, t0 + ms(199))
            .unwrap();
        assert!(!third.rapid);
        assert!(!nav.is_rapid());
    }

    #[test]
    fn dropped_request_does_not_refresh_the_timestamp() {
        let t0 = Instant::now();
        let mut nav = controller(3, 0);
        nav.go_to_next(t0);
        nav.request_navigate(9, Direction::Forward, t0 + ms(90));
        let change = nav.go_to_next(t0 + ms(150)).unwrap();
        assert!(!change.rapid);
    }

    #[test]
    fn sequential_next_clicks_stop_at_the_end() {
        let t0 = Instant::now();
        let mut nav = controller(3, 0);

        let first = nav.go_to_next(t0).unwrap();
        let second = nav.go_to_next(t0 + ms(20)).unwrap();
        let third = nav.go_to_next(t0 + ms(40));

        assert!(!first.rapid);
        assert!(second.rapid);
        assert_eq!(third, None);
        assert!(nav.is_rapid());
        assert_eq!(nav.current_index(), 2);
        assert!(nav.is_last());
    }

    #[test]
    fn external_sync_is_silent() {
        let t0 = Instant::now();
        let mut nav = controller(6, 0);
        nav.go_to_next(t0);

        assert!(nav.sync_from_external_index(4));
        assert_eq!(nav.current_index(), 4);
        assert_eq!(nav.direction(), Direction::Forward);

        assert!(!nav.sync_from_external_index(4));
        assert!(!nav.sync_from_external_index(6));
        assert_eq!(nav.current_index(), 4);

        // The silent sync must not count as a navigation for the rapid check.
        let change = nav.go_to_previous(t0 + ms(150)).unwrap();
        assert!(!change.rapid);
        assert_eq!(change.index, 3);
    }

    #[test]
    fn index_stays_in_bounds_for_any_sequence() {
        let t0 = Instant::now();
        let mut nav = controller(4, 1);
        let targets = [-3_i64, 0, 7, 3, 4, 2, -1, 1, 100];
        for (step, target) in targets.iter().enumerate() {
            let now = t0 + ms(step as u64 * 37);
            nav.request_navigate(*target, Direction::Forward, now);
            nav.go_to_next(now);
            nav.go_to_previous(now);
            nav.sync_from_external_index(*target as usize);
            assert!(nav.current_index() < nav.len());
        }
    }
}
