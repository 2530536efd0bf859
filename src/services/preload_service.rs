//! Best-effort image preloading around the current artwork.
//!
//! Each batch is fire-and-forget: it runs on the rayon pool, fetches every
//! image independently and settles all of them before logging a summary.
//! Failures are logged and dropped; they never reach the viewer.

use crate::catalog::Category;
use crate::config::{PRELOAD_RADIUS, WARMUP_COUNT};
use crate::error::Result;
use crate::image_cache::{CachedImage, ImageCache};
use crate::image_loader;
use crate::state::{IndexChanged, IndexListener};
use log::{debug, warn};
use rayon::prelude::*;
use std::ops::Range;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Fetches and decodes an image address.
pub trait ImageSource: Send + Sync {
    fn fetch(&self, url: &str) -> Result<CachedImage>;
}

/// Treats image addresses as paths on the local file system.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiskImageSource;

impl ImageSource for DiskImageSource {
    fn fetch(&self, url: &str) -> Result<CachedImage> {
        image_loader::load_image_blocking(Path::new(url))
    }
}

/// Indices to preload around a position, nearest first on each side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreloadWindow {
    pub behind: Vec<usize>,
    pub ahead: Vec<usize>,
}

impl PreloadWindow {
    /// Up to `radius` indices on each side of `current`, clamped to `0..len`.
    pub fn around(current: usize, len: usize, radius: usize) -> Self {
        let behind = (1..=radius)
            .map_while(|offset| current.checked_sub(offset))
            .collect();
        let ahead = (1..=radius)
            .map(|offset| current + offset)
            .take_while(|index| *index < len)
            .collect();
        Self { behind, ahead }
    }

    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.behind.iter().chain(self.ahead.iter()).copied()
    }
}

/// Indices warmed once when a viewer mounts.
pub fn warmup_range(len: usize, count: usize) -> Range<usize> {
    0..count.min(len)
}

/// Settled outcome of one batch.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PreloadReport {
    pub requested: usize,
    pub loaded: usize,
    pub already_cached: usize,
    pub failed: usize,
}

enum FetchOutcome {
    Loaded,
    AlreadyCached,
    Failed,
}

/// Fetches every address into the cache, waiting for all of them regardless of failures.
pub fn run_batch(
    source: &dyn ImageSource,
    cache: &Mutex<ImageCache>,
    urls: &[String],
) -> PreloadReport {
    let outcomes: Vec<FetchOutcome> = urls
        .par_iter()
        .map(|url| {
            let cached = cache.lock().map(|c| c.contains(url)).unwrap_or(false);
            if cached {
                return FetchOutcome::AlreadyCached;
            }
            match source.fetch(url) {
                Ok(image) => {
                    if let Ok(mut cache) = cache.lock() {
                        cache.put(url.clone(), image);
                    }
                    FetchOutcome::Loaded
                }
                Err(e) => {
                    warn!("Preload failed for {}: {}", url, e);
                    FetchOutcome::Failed
                }
            }
        })
        .collect();

    outcomes.iter().fold(
        PreloadReport {
            requested: urls.len(),
            ..PreloadReport::default()
        },
        |mut report, outcome| {
            match outcome {
                FetchOutcome::Loaded => report.loaded += 1,
                FetchOutcome::AlreadyCached => report.already_cached += 1,
                FetchOutcome::Failed => report.failed += 1,
            }
            report
        },
    )
}

/// Schedules preload batches for one mounted category.
pub struct PreloadCache {
    root: String,
    category: Arc<Category>,
    source: Arc<dyn ImageSource>,
    cache: Arc<Mutex<ImageCache>>,
    warmed: bool,
}

impl PreloadCache {
    pub fn new(
        root: &str,
        category: Arc<Category>,
        source: Arc<dyn ImageSource>,
        cache: Arc<Mutex<ImageCache>>,
    ) -> Self {
        Self {
            root: root.to_string(),
            category,
            source,
            cache,
            warmed: false,
        }
    }

    fn urls(&self, indices: impl Iterator<Item = usize>) -> Vec<String> {
        indices
            .filter_map(|index| self.category.artworks.get(index))
            .map(|artwork| artwork.image_url(&self.root))
            .collect()
    }

    /// Addresses of the sliding window around `index`.
    pub fn window_urls(&self, index: usize) -> Vec<String> {
        let window = PreloadWindow::around(index, self.category.len(), PRELOAD_RADIUS);
        self.urls(window.indices())
    }

    /// Addresses of the mount-time warm-up batch.
    pub fn warmup_urls(&self) -> Vec<String> {
        self.urls(warmup_range(self.category.len(), WARMUP_COUNT))
    }

    /// Warms the first artworks of the category. Only the first call per mount does work.
    pub fn warm_up(&mut self) {
        if self.warmed {
            return;
        }
        self.warmed = true;
        self.spawn_batch("warm-up", self.warmup_urls());
    }

    pub fn preload_around(&self, index: usize) {
        self.spawn_batch("window", self.window_urls(index));
    }

    fn spawn_batch(&self, label: &'static str, urls: Vec<String>) {
        if urls.is_empty() {
            return;
        }
        let source = self.source.clone();
        let cache = self.cache.clone();
        let slug = self.category.slug.clone();
        rayon::spawn(move || {
            let report = run_batch(source.as_ref(), &cache, &urls);
            debug!(
                "Preload {} for {}: {} requested, {} loaded, {} cached, {} failed",
                label, slug, report.requested, report.loaded, report.already_cached, report.failed
            );
        });
    }
}

impl IndexListener for PreloadCache {
    fn index_committed(&mut self, change: &IndexChanged) {
        self.preload_around(change.index);
    }
}
