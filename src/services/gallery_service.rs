//! Page routing on top of the location history.
//!
//! Resolves the current location to the home page, a mounted viewer or the
//! not-found page. Empty or unknown categories never reach the viewer.

use crate::catalog::{ArtworkCatalog, CategoryMenu, MenuEntry};
use crate::config::GalleryConfig;
use crate::image_cache::ImageCache;
use crate::services::navigation_service::ViewerSession;
use crate::services::preload_service::ImageSource;
use crate::services::url_sync::{GalleryLocation, History, Route, derive_initial_index};
use log::{debug, info, warn};
use std::sync::{Arc, Mutex};
use std::time::Instant;

pub enum Page {
    Home,
    Viewer(ViewerSession),
    NotFound,
}

/// One category tile on the home page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeTile {
    pub name: String,
    pub slug: String,
    pub thumbnail_url: Option<String>,
    pub thumbnail_alt: String,
}

pub struct GalleryApp {
    config: GalleryConfig,
    catalog: ArtworkCatalog,
    menu: CategoryMenu,
    history: Arc<Mutex<History>>,
    source: Arc<dyn ImageSource>,
    cache: Arc<Mutex<ImageCache>>,
    page: Page,
}

impl GalleryApp {
    pub fn new(
        config: GalleryConfig,
        catalog: ArtworkCatalog,
        source: Arc<dyn ImageSource>,
        cache: Arc<Mutex<ImageCache>>,
    ) -> Self {
        let menu = CategoryMenu::from_labels(&config.categories);
        Self {
            config,
            catalog,
            menu,
            history: Arc::new(Mutex::new(History::new(GalleryLocation::home()))),
            source,
            cache,
            page: Page::Home,
        }
    }

    /// Navigates to `location`, adding a history entry.
    pub fn open(&mut self, location: GalleryLocation, now: Instant) {
        info!("Opening {}", location);
        if let Ok(mut history) = self.history.lock() {
            history.push(location);
            debug!("History depth {}", history.len());
        }
        self.route(now);
    }

    /// Steps back in history. Returns `false` at the first entry.
    pub fn back(&mut self, now: Instant) -> bool {
        let previous = self.history.lock().ok().and_then(|mut history| history.back());
        match previous {
            Some(location) => {
                info!("Back to {}", location);
                self.route(now);
                true
            }
            None => false,
        }
    }

    pub fn can_go_back(&self) -> bool {
        self.history
            .lock()
            .map(|history| history.can_go_back())
            .unwrap_or(false)
    }

    pub fn current_location(&self) -> GalleryLocation {
        self.history
            .lock()
            .map(|history| history.current().clone())
            .unwrap_or_else(|_| GalleryLocation::home())
    }

    fn route(&mut self, now: Instant) {
        let location = self.current_location();
        match location.route() {
            Route::Home => self.set_page(Page::Home),
            Route::Gallery { slug } => self.route_gallery(&slug, &location, now),
            Route::NotFound => {
                warn!("No page for {}", location);
                self.set_page(Page::NotFound);
            }
        }
    }

    fn route_gallery(&mut self, slug: &str, location: &GalleryLocation, now: Instant) {
        if let Page::Viewer(session) = &mut self.page {
            if session.slug() == slug {
                let index = derive_initial_index(location.query(), session.category().len());
                debug!("Syncing {} from {} to {}", slug, session.current_index(), index);
                session.sync_from_external_index(index);
                return;
            }
        }

        let category = match self.catalog.viewer_category(slug) {
            Ok(category) => category,
            Err(e) => {
                warn!("{}", e);
                self.set_page(Page::NotFound);
                return;
            }
        };

        let initial_index = derive_initial_index(location.query(), category.len());
        match ViewerSession::mount(
            category,
            self.catalog.root(),
            initial_index,
            self.history.clone(),
            self.source.clone(),
            self.cache.clone(),
            now,
        ) {
            Ok(session) => self.set_page(Page::Viewer(session)),
            Err(e) => {
                warn!("{}", e);
                self.set_page(Page::NotFound);
            }
        }
    }

    fn set_page(&mut self, page: Page) {
        if let Page::Viewer(session) = &mut self.page {
            session.unmount();
        }
        self.page = page;
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn viewer(&self) -> Option<&ViewerSession> {
        match &self.page {
            Page::Viewer(session) => Some(session),
            _ => None,
        }
    }

    pub fn viewer_mut(&mut self) -> Option<&mut ViewerSession> {
        match &mut self.page {
            Page::Viewer(session) => Some(session),
            _ => None,
        }
    }

    pub fn artist_name(&self) -> &str {
        &self.config.artist_name
    }

    pub fn home_tiles(&self) -> Vec<HomeTile> {
        self.catalog
            .categories()
            .iter()
            .map(|category| HomeTile {
                name: category.name.clone(),
                slug: category.slug.clone(),
                thumbnail_url: category
                    .artworks
                    .first()
                    .map(|artwork| artwork.image_url(self.catalog.root())),
                thumbnail_alt: format!("{} collection thumbnail", category.name),
            })
            .collect()
    }

    /// Cross-category links for the mounted viewer.
    pub fn menu_entries(&self) -> Vec<MenuEntry> {
        match self.viewer() {
            Some(session) => self.menu.others(session.slug()),
            None => self.menu.entries().to_vec(),
        }
    }
}
