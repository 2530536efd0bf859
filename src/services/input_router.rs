//! Normalizes keyboard, touch, wheel and pointer input into navigation intents.
//!
//! Also owns the "controls visible" flag, which pointer activity raises and
//! a single-shot idle timer lowers again.

use crate::config::{CONTROLS_IDLE_TIMEOUT, SWIPE_THRESHOLD_PX};
use crate::state::PendingTimer;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowKey {
    Left,
    Up,
    Right,
    Down,
}

/// Raw input delivered by the window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Key(ArrowKey),
    TouchStart { x: f32 },
    TouchMove { x: f32 },
    TouchEnd,
    /// Vertical wheel delta; positive scrolls down.
    Wheel { delta_y: f32 },
    ClickPrevious,
    ClickNext,
    /// Mouse movement or a click anywhere in the viewer.
    PointerActivity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationIntent {
    Previous,
    Next,
}

#[derive(Debug, Clone)]
pub struct InputRouter {
    touch_start: Option<f32>,
    touch_end: Option<f32>,
    controls_visible: bool,
    idle: PendingTimer,
}

impl InputRouter {
    /// Starts with the controls visible and the idle timer armed.
    pub fn new(now: Instant) -> Self {
        let mut router = Self {
            touch_start: None,
            touch_end: None,
            controls_visible: false,
            idle: PendingTimer::new(),
        };
        router.pointer_activity(now);
        router
    }

    pub fn route(&mut self, event: InputEvent, now: Instant) -> Option<NavigationIntent> {
        match event {
            InputEvent::Key(ArrowKey::Left | ArrowKey::Up) => Some(NavigationIntent::Previous),
            InputEvent::Key(ArrowKey::Right | ArrowKey::Down) => Some(NavigationIntent::Next),
            InputEvent::TouchStart { x } => {
                self.touch_end = None;
                self.touch_start = Some(x);
                None
            }
            InputEvent::TouchMove { x } => {
                self.touch_end = Some(x);
                None
            }
            InputEvent::TouchEnd => self.finish_swipe(),
            InputEvent::Wheel { delta_y } => wheel_intent(delta_y),
            InputEvent::ClickPrevious => {
                self.pointer_activity(now);
                Some(NavigationIntent::Previous)
            }
            InputEvent::ClickNext => {
                self.pointer_activity(now);
                Some(NavigationIntent::Next)
            }
            InputEvent::PointerActivity => {
                self.pointer_activity(now);
                None
            }
        }
    }

    fn finish_swipe(&mut self) -> Option<NavigationIntent> {
        let start = self.touch_start.take()?;
        let end = self.touch_end.take()?;
        let distance = start - end;
        if distance > SWIPE_THRESHOLD_PX {
            Some(NavigationIntent::Next)
        } else if distance < -SWIPE_THRESHOLD_PX {
            Some(NavigationIntent::Previous)
        } else {
            None
        }
    }

    fn pointer_activity(&mut self, now: Instant) {
        self.controls_visible = true;
        self.idle.schedule(now, CONTROLS_IDLE_TIMEOUT);
    }

    pub fn controls_visible(&self) -> bool {
        self.controls_visible
    }

    /// Hides the controls once the idle deadline passes. Returns whether visibility changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.idle.fire_if_due(now) && self.controls_visible {
            self.controls_visible = false;
            return true;
        }
        false
    }

    pub fn idle_deadline(&self) -> Option<Instant> {
        self.idle.deadline()
    }

    pub fn cancel_timers(&mut self) {
        self.idle.cancel();
    }
}

fn wheel_intent(delta_y: f32) -> Option<NavigationIntent> {
    if delta_y > 0.0 {
        Some(NavigationIntent::Next)
    } else if delta_y < 0.0 {
        Some(NavigationIntent::Previous)
    } else {
        None
    }
}
