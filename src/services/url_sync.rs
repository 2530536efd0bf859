//! Location handling: routes, the `image` query parameter and the history stack.
//!
//! The viewer publishes its position as a 1-based `image` parameter with
//! replace semantics, so stepping through a category never adds history entries.

use crate::state::{IndexChanged, IndexListener};
use log::debug;
use std::fmt;
use std::sync::{Arc, Mutex};
use url::form_urlencoded;

/// Query parameter carrying the 1-based artwork position.
pub const IMAGE_PARAM: &str = "image";

const GALLERY_SEGMENT: &str = "gallery";

/// Page a location resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Gallery { slug: String },
    NotFound,
}

/// An in-app URL: path plus optional query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryLocation {
    path: String,
    query: String,
}

impl GalleryLocation {
    /// Parses `path[?query][#fragment]`; the fragment is dropped.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        let without_fragment = input.split('#').next().unwrap_or_default();
        let (path, query) = without_fragment
            .split_once('?')
            .unwrap_or((without_fragment, ""));
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        };
        Self {
            path,
            query: query.to_string(),
        }
    }

    pub fn home() -> Self {
        Self::parse("/")
    }

    /// `/gallery/{slug}/` without a position.
    pub fn gallery(slug: &str) -> Self {
        Self {
            path: format!("/{}/{}/", GALLERY_SEGMENT, slug),
            query: String::new(),
        }
    }

    /// `/gallery/{slug}/?image={index + 1}`.
    pub fn gallery_image(slug: &str, index: usize) -> Self {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair(IMAGE_PARAM, &(index + 1).to_string())
            .finish();
        Self {
            query,
            ..Self::gallery(slug)
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn route(&self) -> Route {
        let segments: Vec<&str> = self.path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] => Route::Home,
            [GALLERY_SEGMENT, slug] => Route::Gallery {
                slug: (*slug).to_string(),
            },
            _ => Route::NotFound,
        }
    }
}

impl fmt::Display for GalleryLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.query.is_empty() {
            write!(f, "{}", self.path)
        } else {
            write!(f, "{}?{}", self.path, self.query)
        }
    }
}

/// Parses a 1-based position value. Anything but a positive integer is `None`.
pub fn parse_image_param(value: &str) -> Option<usize> {
    value.trim().parse::<usize>().ok().filter(|n| *n > 0)
}

/// Initial 0-based index from a query string; missing, malformed or out-of-range values give 0.
pub fn derive_initial_index(query: &str, list_len: usize) -> usize {
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == IMAGE_PARAM)
        .and_then(|(_, value)| parse_image_param(&value))
        .map(|position| position - 1)
        .filter(|index| *index < list_len)
        .unwrap_or(0)
}

/// Back-navigable list of visited locations.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<GalleryLocation>,
    cursor: usize,
}

impl History {
    pub fn new(initial: GalleryLocation) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
        }
    }

    pub fn current(&self) -> &GalleryLocation {
        &self.entries[self.cursor]
    }

    /// Adds an entry after the current one, discarding forward entries.
    pub fn push(&mut self, location: GalleryLocation) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(location);
        self.cursor = self.entries.len() - 1;
    }

    /// Overwrites the current entry.
    pub fn replace(&mut self, location: GalleryLocation) {
        self.entries[self.cursor] = location;
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    /// Steps back one entry and returns it.
    pub fn back(&mut self) -> Option<GalleryLocation> {
        if !self.can_go_back() {
            return None;
        }
        self.cursor -= 1;
        Some(self.current().clone())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Writes the viewer position of one category into the shared history.
pub struct UrlSync {
    slug: String,
    history: Arc<Mutex<History>>,
}

impl UrlSync {
    pub fn new(slug: &str, history: Arc<Mutex<History>>) -> Self {
        Self {
            slug: slug.to_string(),
            history,
        }
    }

    /// Replaces the current history entry with `/gallery/{slug}/?image={index + 1}`.
    pub fn publish_index(&mut self, index: usize) {
        let location = GalleryLocation::gallery_image(&self.slug, index);
        debug!("Publishing {}", location);
        if let Ok(mut history) = self.history.lock() {
            history.replace(location);
        }
    }
}

impl IndexListener for UrlSync {
    fn index_committed(&mut self, change: &IndexChanged) {
        self.publish_index(change.index);
    }
}
