//! Viewer session for one mounted category.
//!
//! Routes input through `InputRouter` into `PositionController` and fans every
//! committed change out to the URL sync and the preloader. External index
//! changes take the silent path and never publish back to the location.

use crate::catalog::{ArtworkItem, Category};
use crate::error::{AppError, Result};
use crate::image_cache::ImageCache;
use crate::services::input_router::{InputEvent, InputRouter, NavigationIntent};
use crate::services::preload_service::{ImageSource, PreloadCache};
use crate::services::url_sync::{History, UrlSync};
use crate::state::{Direction, DisplayCounter, IndexChanged, IndexListener, PositionController};
use log::info;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};
use std::time::Instant;

/// How the presenter moves onto the current image.
///
/// `seq` advances on every index change, whether or not the image is already cached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Transition {
    pub seq: u32,
    pub direction: Direction,
    pub animate: bool,
}

impl Transition {
    fn next(self, direction: Direction, animate: bool) -> Self {
        Self {
            seq: self.seq.wrapping_add(1),
            direction,
            animate,
        }
    }
}

/// Everything the presenter needs to draw the viewer.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerSnapshot {
    pub category_name: String,
    pub slug: String,
    pub index: usize,
    pub len: usize,
    pub transition: Transition,
    pub counter_text: String,
    pub image_url: String,
    pub alt: String,
    pub show_previous: bool,
    pub show_next: bool,
    pub controls_visible: bool,
}

pub struct ViewerSession {
    category: Arc<Category>,
    root: String,
    position: PositionController,
    counter: DisplayCounter,
    transition: Transition,
    input: InputRouter,
    url_sync: UrlSync,
    preload: PreloadCache,
}

impl ViewerSession {
    /// Mounts a viewer at `initial_index` and starts the warm-up and first window preload.
    pub fn mount(
        category: Arc<Category>,
        root: &str,
        initial_index: usize,
        history: Arc<Mutex<History>>,
        source: Arc<dyn ImageSource>,
        cache: Arc<Mutex<ImageCache>>,
        now: Instant,
    ) -> Result<Self> {
        let len = NonZeroUsize::new(category.len())
            .ok_or_else(|| AppError::EmptyCategory(category.slug.clone()))?;
        let position = PositionController::new(len, initial_index);
        let index = position.current_index();

        let mut preload = PreloadCache::new(root, category.clone(), source, cache);
        preload.warm_up();
        preload.preload_around(index);

        info!(
            "Mounted viewer for {} at {}/{}",
            category.slug,
            index + 1,
            len
        );

        Ok(Self {
            url_sync: UrlSync::new(&category.slug, history),
            root: root.to_string(),
            counter: DisplayCounter::new(index),
            transition: Transition::default(),
            input: InputRouter::new(now),
            position,
            preload,
            category,
        })
    }

    pub fn slug(&self) -> &str {
        &self.category.slug
    }

    pub fn category(&self) -> &Arc<Category> {
        &self.category
    }

    pub fn current_index(&self) -> usize {
        self.position.current_index()
    }

    pub fn current_artwork(&self) -> &ArtworkItem {
        &self.category.artworks[self.position.current_index()]
    }

    pub fn handle_input(&mut self, event: InputEvent, now: Instant) -> Option<IndexChanged> {
        match self.input.route(event, now)? {
            NavigationIntent::Previous => self.go_to_previous(now),
            NavigationIntent::Next => self.go_to_next(now),
        }
    }

    pub fn go_to_previous(&mut self, now: Instant) -> Option<IndexChanged> {
        let change = self.position.go_to_previous(now)?;
        self.commit(change, now);
        Some(change)
    }

    pub fn go_to_next(&mut self, now: Instant) -> Option<IndexChanged> {
        let change = self.position.go_to_next(now)?;
        self.commit(change, now);
        Some(change)
    }

    pub fn request_navigate(
        &mut self,
        target_index: i64,
        direction: Direction,
        now: Instant,
    ) -> Option<IndexChanged> {
        let change = self.position.request_navigate(target_index, direction, now)?;
        self.commit(change, now);
        Some(change)
    }

    fn commit(&mut self, change: IndexChanged, now: Instant) {
        self.counter.index_changed(change.index, change.rapid, now);
        self.transition = self.transition.next(change.direction, !change.rapid);
        let listeners: [&mut dyn IndexListener; 2] = [&mut self.url_sync, &mut self.preload];
        for listener in listeners {
            listener.index_committed(&change);
        }
    }

    /// Follows a location change made outside the viewer without publishing it back.
    pub fn sync_from_external_index(&mut self, index: usize) -> bool {
        if !self.position.sync_from_external_index(index) {
            return false;
        }
        self.counter.snap_to(index);
        self.transition = self.transition.next(Direction::None, false);
        self.preload.preload_around(index);
        true
    }

    /// Applies due timers. Returns whether anything visible changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let counter_changed = self.counter.tick(now);
        let controls_changed = self.input.tick(now);
        counter_changed || controls_changed
    }

    pub fn counter_deadline(&self) -> Option<Instant> {
        self.counter.deadline()
    }

    pub fn idle_deadline(&self) -> Option<Instant> {
        self.input.idle_deadline()
    }

    /// Clears pending timers before the session is dropped.
    pub fn unmount(&mut self) {
        info!("Unmounting viewer for {}", self.category.slug);
        self.counter.cancel();
        self.input.cancel_timers();
    }

    pub fn snapshot(&self) -> ViewerSnapshot {
        let index = self.position.current_index();
        let artwork = self.current_artwork();
        ViewerSnapshot {
            category_name: self.category.name.clone(),
            slug: self.category.slug.clone(),
            index,
            len: self.position.len(),
            transition: self.transition,
            counter_text: format!(
                "{} / {}",
                self.counter.display_index() + 1,
                self.position.len()
            ),
            image_url: artwork.image_url(&self.root),
            alt: artwork.alt.clone(),
            show_previous: !self.position.is_first(),
            show_next: !self.position.is_last(),
            controls_visible: self.input.controls_visible(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::COUNTER_DEBOUNCE;
    use crate::image_cache::CachedImage;
    use crate::services::input_router::ArrowKey;
    use crate::services::url_sync::{GalleryLocation, derive_initial_index};
    use std::time::Duration;

    struct NullSource;

    impl ImageSource for NullSource {
        fn fetch(&self, url: &str) -> Result<CachedImage> {
            Err(AppError::ImageLoad(format!("offline: {}", url)))
        }
    }

    fn category(len: usize) -> Arc<Category> {
        let artworks = (0..len)
            .map(|i| ArtworkItem {
                id: format!("weather-report-{}", i + 1),
                category: "3. Weather Report".to_string(),
                filename: format!("{:03}.png", i),
                alt: format!("Artwork from the Weather Report series, number {}", i + 1),
            })
            .collect();
        Arc::new(Category {
            label: "3. Weather Report".to_string(),
            name: "Weather Report".to_string(),
            slug: "weather-report".to_string(),
            artworks,
        })
    }

    fn mount_from(location: &str, len: usize, now: Instant) -> (ViewerSession, Arc<Mutex<History>>) {
        let location = GalleryLocation::parse(location);
        let initial = derive_initial_index(location.query(), len);
        let history = Arc::new(Mutex::new(History::new(location)));
        let session = ViewerSession::mount(
            category(len),
            "/artwork",
            initial,
            history.clone(),
            Arc::new(NullSource),
            Arc::new(Mutex::new(ImageCache::new(4))),
            now,
        )
        .unwrap();
        (session, history)
    }

    fn current_location(history: &Arc<Mutex<History>>) -> String {
        history.lock().unwrap().current().to_string()
    }

    #[test]
    fn fresh_load_starts_at_url_index() {
        let (session, history) = mount_from("/gallery/weather-report/?image=5", 12, Instant::now());
        let snapshot = session.snapshot();

        assert_eq!(snapshot.index, 4);
        assert_eq!(snapshot.counter_text, "5 / 12");
        assert_eq!(snapshot.image_url, "/artwork/3. Weather Report/004.png");
        // Mounting alone never rewrites the location.
        assert_eq!(current_location(&history), "/gallery/weather-report/?image=5");
    }

    #[test]
    fn sequential_next_clicks_publish_the_final_position() {
        let t0 = Instant::now();
        let (mut session, history) = mount_from("/gallery/weather-report/", 3, t0);

        let first = session.handle_input(InputEvent::ClickNext, t0).unwrap();
        let second = session
            .handle_input(InputEvent::ClickNext, t0 + Duration::from_millis(30))
            .unwrap();
        let third = session.handle_input(InputEvent::ClickNext, t0 + Duration::from_millis(60));

        assert!(!first.rapid);
        assert!(second.rapid);
        assert_eq!(third, None);
        assert_eq!(session.current_index(), 2);
        assert_eq!(current_location(&history), "/gallery/weather-report/?image=3");
        assert_eq!(history.lock().unwrap().len(), 1);

        let snapshot = session.snapshot();
        assert!(!snapshot.transition.animate);
        assert_eq!(snapshot.counter_text, "3 / 3");
        assert!(snapshot.show_previous);
        assert!(!snapshot.show_next);
    }

    #[test]
    fn counter_lags_slow_navigation_by_the_debounce() {
        let t0 = Instant::now();
        let (mut session, _history) = mount_from("/gallery/weather-report/", 5, t0);

        session.go_to_next(t0);
        assert_eq!(session.snapshot().counter_text, "1 / 5");
        assert_eq!(session.counter_deadline(), Some(t0 + COUNTER_DEBOUNCE));

        assert!(session.tick(t0 + COUNTER_DEBOUNCE));
        assert_eq!(session.snapshot().counter_text, "2 / 5");
    }

    #[test]
    fn cached_neighbour_still_gets_a_slide() {
        let t0 = Instant::now();
        let cache = Arc::new(Mutex::new(ImageCache::new(4)));
        cache.lock().unwrap().put(
            "/artwork/3. Weather Report/001.png".to_string(),
            CachedImage::new(vec![0, 0, 0], 1, 1),
        );
        let mut session = ViewerSession::mount(
            category(3),
            "/artwork",
            0,
            Arc::new(Mutex::new(History::new(GalleryLocation::gallery("weather-report")))),
            Arc::new(NullSource),
            cache.clone(),
            t0,
        )
        .unwrap();
        let before = session.snapshot().transition;

        session.go_to_next(t0);
        let snapshot = session.snapshot();

        assert!(cache.lock().unwrap().contains(&snapshot.image_url));
        assert_ne!(snapshot.transition.seq, before.seq);
        assert_eq!(snapshot.transition.direction, Direction::Forward);
        assert!(snapshot.transition.animate);
    }

    #[test]
    fn rapid_navigation_snaps() {
        let t0 = Instant::now();
        let (mut session, _history) = mount_from("/gallery/weather-report/", 5, t0);

        session.go_to_next(t0);
        session.go_to_previous(t0 + Duration::from_millis(40));
        let transition = session.snapshot().transition;

        assert_eq!(transition.seq, 2);
        assert_eq!(transition.direction, Direction::Backward);
        assert!(!transition.animate);
    }

    #[test]
    fn external_sync_after_navigation_snaps_without_direction() {
        let t0 = Instant::now();
        let (mut session, history) = mount_from("/gallery/weather-report/", 6, t0);
        session.go_to_next(t0);
        session.go_to_next(t0 + Duration::from_secs(1));
        let after_clicks = session.snapshot().transition;
        assert_eq!(after_clicks.direction, Direction::Forward);
        assert!(after_clicks.animate);

        history
            .lock()
            .unwrap()
            .replace(GalleryLocation::gallery_image("weather-report", 1));
        assert!(session.sync_from_external_index(1));
        let transition = session.snapshot().transition;

        assert_ne!(transition.seq, after_clicks.seq);
        assert_eq!(transition.direction, Direction::None);
        assert!(!transition.animate);

        // The next click still measures from the last real navigation.
        let change = session.go_to_next(t0 + Duration::from_millis(1050)).unwrap();
        assert!(change.rapid);
    }

    #[test]
    fn external_sync_does_not_write_the_location() {
        let t0 = Instant::now();
        let (mut session, history) = mount_from("/gallery/weather-report/?image=2", 6, t0);
        history
            .lock()
            .unwrap()
            .replace(GalleryLocation::gallery_image("weather-report", 4));

        assert!(session.sync_from_external_index(4));
        let snapshot = session.snapshot();
        assert_eq!(snapshot.index, 4);
        assert_eq!(snapshot.counter_text, "5 / 6");
        assert_eq!(snapshot.transition.direction, Direction::None);
        assert_eq!(current_location(&history), "/gallery/weather-report/?image=5");
        assert_eq!(history.lock().unwrap().len(), 1);
    }

    #[test]
    fn keyboard_at_the_edges_is_inert() {
        let t0 = Instant::now();
        let (mut session, history) = mount_from("/gallery/weather-report/", 2, t0);
        let snapshot = session.snapshot();
        assert!(!snapshot.show_previous);
        assert!(snapshot.show_next);

        assert_eq!(session.handle_input(InputEvent::Key(ArrowKey::Up), t0), None);
        assert_eq!(current_location(&history), "/gallery/weather-report/");
    }

    #[test]
    fn jump_to_publishes_and_out_of_range_is_ignored() {
        let t0 = Instant::now();
        let (mut session, history) = mount_from("/gallery/weather-report/", 8, t0);

        let change = session.request_navigate(6, Direction::Forward, t0).unwrap();
        assert_eq!(change.index, 6);
        assert_eq!(current_location(&history), "/gallery/weather-report/?image=7");

        assert_eq!(session.request_navigate(8, Direction::Forward, t0), None);
        assert_eq!(session.request_navigate(-1, Direction::Backward, t0), None);
        assert_eq!(session.current_index(), 6);
        assert_eq!(current_location(&history), "/gallery/weather-report/?image=7");
    }

    #[test]
    fn unmount_clears_pending_timers() {
        let t0 = Instant::now();
        let (mut session, _history) = mount_from("/gallery/weather-report/", 4, t0);
        session.go_to_next(t0);
        assert!(session.idle_deadline().is_some());
        assert!(session.counter_deadline().is_some());

        session.unmount();
        assert_eq!(session.idle_deadline(), None);
        assert_eq!(session.counter_deadline(), None);
    }

    #[test]
    fn empty_category_cannot_mount() {
        let result = ViewerSession::mount(
            category(0),
            "/artwork",
            0,
            Arc::new(Mutex::new(History::new(GalleryLocation::home()))),
            Arc::new(NullSource),
            Arc::new(Mutex::new(ImageCache::new(4))),
            Instant::now(),
        );
        assert!(matches!(result, Err(AppError::EmptyCategory(_))));
    }
}
