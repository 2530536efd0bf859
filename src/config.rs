//! Application configuration: behavioral constants and the optional `gallery.toml`.

use crate::error::{AppError, Result};
use log::{info, warn};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Supported image file extensions for scanning category directories.
pub const SUPPORTED_IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];

/// Number of artworks preloaded on each side of the current one.
pub const PRELOAD_RADIUS: usize = 5;

/// Number of artworks warmed into the cache when a viewer mounts.
pub const WARMUP_COUNT: usize = 8;

/// Two committed navigations closer than this are "rapid" and skip the transition.
pub const RAPID_NAVIGATION_THRESHOLD: Duration = Duration::from_millis(100);

/// Delay before the on-screen counter follows a non-rapid navigation.
pub const COUNTER_DEBOUNCE: Duration = Duration::from_millis(30);

/// Inactivity period after which the navigation controls hide.
pub const CONTROLS_IDLE_TIMEOUT: Duration = Duration::from_secs(1);

/// Minimum horizontal travel, in logical pixels, for a touch to count as a swipe.
pub const SWIPE_THRESHOLD_PX: f32 = 50.0;

/// Environment variable that overrides the configuration file location.
pub const CONFIG_PATH_ENV: &str = "GALLERY_CONFIG";

const DEFAULT_CONFIG_FILE: &str = "gallery.toml";

fn default_artwork_root() -> PathBuf {
    PathBuf::from("public/artwork")
}

fn default_categories() -> Vec<String> {
    vec![
        "1. Artist Monologues".to_string(),
        "2. Quest for Infinity".to_string(),
        "3. Weather Report".to_string(),
        "4. Bubble Moon".to_string(),
    ]
}

fn default_cache_capacity() -> usize {
    // Preload window on both sides, the current image and the warm-up batch.
    2 * PRELOAD_RADIUS + 1 + WARMUP_COUNT + 4
}

fn default_artist_name() -> String {
    "MAYA LAMA".to_string()
}

/// User-tunable settings loaded from TOML.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    /// Directory holding one sub-directory per category label.
    pub artwork_root: PathBuf,
    /// Ordered category labels, e.g. `"1. Artist Monologues"`.
    pub categories: Vec<String>,
    /// Maximum number of decoded images kept in memory.
    pub cache_capacity: usize,
    /// Heading shown on the home page.
    pub artist_name: String,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            artwork_root: default_artwork_root(),
            categories: default_categories(),
            cache_capacity: default_cache_capacity(),
            artist_name: default_artist_name(),
        }
    }
}

impl GalleryConfig {
    /// Parses a TOML document, replacing invalid values with defaults.
    pub fn parse(source: &str) -> Result<Self> {
        let config: GalleryConfig =
            toml::from_str(source).map_err(|e| AppError::Config(e.to_string()))?;
        Ok(config.sanitized())
    }

    fn sanitized(mut self) -> Self {
        if self.cache_capacity == 0 {
            warn!(
                "cache_capacity must be non-zero, using {}",
                default_cache_capacity()
            );
            self.cache_capacity = default_cache_capacity();
        }
        if self.categories.is_empty() {
            warn!("No categories configured, using the default category list");
            self.categories = default_categories();
        }
        self
    }
}

/// Resolves the configuration file path from `GALLERY_CONFIG` or the working directory.
pub fn config_path() -> PathBuf {
    std::env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

/// Loads the configuration, falling back to defaults when the file is missing or invalid.
pub fn load_config(path: &Path) -> GalleryConfig {
    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            info!("No config at {} ({}), using defaults", path.display(), e);
            return GalleryConfig::default();
        }
    };

    match GalleryConfig::parse(&source) {
        Ok(config) => {
            info!("Loaded config from {}", path.display());
            config
        }
        Err(e) => {
            warn!("{}; using defaults", e);
            GalleryConfig::default()
        }
    }
}
