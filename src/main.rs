// Prevent console window in addition to Slint window in Windows release builds when, e.g., starting the app via file manager. Ignored on other platforms.
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

slint::include_modules!();

mod catalog;
mod config;
mod error;
mod file_utils;
mod image_cache;
mod image_loader;
mod services;
mod startup;
mod state;
mod ui;

use crate::catalog::ArtworkCatalog;
use crate::image_cache::ImageCache;
use crate::services::{DiskImageSource, GalleryApp, ImageSource};
use std::rc::Rc;
use std::sync::{Arc, Mutex};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let default_level = if cfg!(debug_assertions) { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let config = config::load_config(&config::config_path());
    let catalog = ArtworkCatalog::scan(&config.artwork_root, &config.categories);
    let image_cache = Arc::new(Mutex::new(ImageCache::new(config.cache_capacity)));
    let image_source: Arc<dyn ImageSource> = Arc::new(DiskImageSource);
    let gallery = GalleryApp::new(config, catalog, image_source.clone(), image_cache.clone());

    let app = AppWindow::new()?;
    let app_state = Rc::new(state::AppState::new(gallery, image_cache, image_source));

    // Setup all UI event handlers
    ui::setup_handlers(&app, app_state.clone());
    startup::configure_startup_opening(&app, &app_state);

    app.run()?;

    Ok(())
}
