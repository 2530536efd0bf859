//! Image cache shared by the viewer and the preloader.
//!
//! Caches decoded RGB8 image data keyed by image URL using an LRU policy.
//! Preloads only ever add entries; eviction is left to the LRU bound.

use lru::LruCache;
use std::num::NonZeroUsize;

/// Cached image data as RGB8 pixels.
#[derive(Clone)]
pub struct CachedImage {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl CachedImage {
    /// Creates a CachedImage from raw image data.
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            data,
            width,
            height,
        }
    }
}

/// LRU cache for storing decoded images.
pub struct ImageCache {
    cache: LruCache<String, CachedImage>,
}

impl ImageCache {
    /// Creates a new image cache; a zero capacity is raised to one.
    pub fn new(capacity: usize) -> Self {
        Self {
            cache: LruCache::new(NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN)),
        }
    }

    /// Retrieves an image from the cache if it exists.
    pub fn get(&mut self, url: &str) -> Option<CachedImage> {
        let result = self.cache.get(url).cloned();
        if result.is_some() {
            log::debug!("Cache HIT: {}", url);
        } else {
            log::debug!("Cache MISS: {}", url);
        }
        result
    }

    /// Stores an image in the cache.
    pub fn put(&mut self, url: String, cached_image: CachedImage) {
        log::debug!(
            "Cache PUT: {} ({}x{})",
            url,
            cached_image.width,
            cached_image.height
        );
        self.cache.put(url, cached_image);
    }

    /// Checks if an image is in the cache without touching its recency.
    pub fn contains(&self, url: &str) -> bool {
        self.cache.contains(url)
    }
}
