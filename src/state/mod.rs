//! State management for the gallery application.

use crate::image_cache::ImageCache;
use crate::services::{GalleryApp, ImageSource};
use std::rc::Rc;
use std::sync::{Arc, Mutex};

pub mod display_counter;
pub mod navigation;
pub mod timer;

pub use display_counter::DisplayCounter;
pub use navigation::{Direction, IndexChanged, IndexListener, PositionController};
pub use timer::PendingTimer;

/// Application-wide state container.
pub struct AppState {
    /// Router, history and the mounted viewer.
    pub gallery: Arc<Mutex<GalleryApp>>,
    /// LRU cache for decoded images, shared with preload workers.
    pub image_cache: Arc<Mutex<ImageCache>>,
    /// Loader for the displayed image and thumbnails.
    pub image_source: Arc<dyn ImageSource>,
    /// Fires the counter debounce deadline.
    pub counter_timer: Rc<slint::Timer>,
    /// Fires the controls idle deadline.
    pub idle_timer: Rc<slint::Timer>,
}

impl AppState {
    pub fn new(
        gallery: GalleryApp,
        image_cache: Arc<Mutex<ImageCache>>,
        image_source: Arc<dyn ImageSource>,
    ) -> Self {
        Self {
            gallery: Arc::new(Mutex::new(gallery)),
            image_cache,
            image_source,
            counter_timer: Rc::new(slint::Timer::default()),
            idle_timer: Rc::new(slint::Timer::default()),
        }
    }
}
