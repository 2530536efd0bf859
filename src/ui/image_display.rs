//! Image loading and display logic.
//!
//! Uses `rayon::spawn` for image decoding, then `slint::invoke_from_event_loop`
//! to update the UI from the background thread.

use crate::image_cache::{CachedImage, ImageCache};
use crate::image_loader;
use crate::services::ImageSource;
use log::error;
use slint::{ComponentHandle, Model};
use std::sync::{Arc, Mutex};

/// Shows a decoded image if it is still the one the viewer wants.
fn show_if_current(ui: &crate::AppWindow, url: &str, cached: &CachedImage) {
    let view = ui.global::<crate::ViewState>();
    if view.get_current_url() != url {
        return;
    }
    view.set_current_image(image_loader::create_slint_image(cached));
    view.set_image_loading(false);
    view.set_image_failed(false);
}

fn show_failure_if_current(ui: &crate::AppWindow, url: &str, error: String) {
    let view = ui.global::<crate::ViewState>();
    error!("Failed to load {}: {}", url, error);
    if view.get_current_url() != url {
        return;
    }
    view.set_image_loading(false);
    view.set_image_failed(true);
}

/// Displays the image at `url` in the viewer.
///
/// This function:
/// 1. Marks `url` as the wanted image so late results for other images are dropped
/// 2. Checks the cache first for instant display
/// 3. If cache miss, spawns a rayon task to decode the image
/// 4. Uses invoke_from_event_loop to return to the UI thread
pub fn load_and_display_image(
    ui: &crate::AppWindow,
    url: String,
    cache: Arc<Mutex<ImageCache>>,
    source: Arc<dyn ImageSource>,
) {
    let view = ui.global::<crate::ViewState>();
    view.set_current_url(url.clone().into());
    view.set_image_failed(false);

    let cached = cache.lock().ok().and_then(|mut c| c.get(&url));
    if let Some(cached_image) = cached {
        show_if_current(ui, &url, &cached_image);
        return;
    }

    view.set_image_loading(true);
    let ui_handle = ui.as_weak();
    rayon::spawn(move || {
        let result = source.fetch(&url);
        if let Ok(image) = &result {
            if let Ok(mut cache) = cache.lock() {
                cache.put(url.clone(), image.clone());
            }
        }

        let _ = slint::invoke_from_event_loop(move || {
            if let Some(ui) = ui_handle.upgrade() {
                match result {
                    Ok(image) => show_if_current(&ui, &url, &image),
                    Err(e) => show_failure_if_current(&ui, &url, e.to_string()),
                }
            }
        });
    });
}

/// Loads home page thumbnails in the background and fills them in as they arrive.
pub fn load_thumbnails(
    ui: &crate::AppWindow,
    urls: Vec<(usize, String)>,
    cache: Arc<Mutex<ImageCache>>,
    source: Arc<dyn ImageSource>,
) {
    for (row, url) in urls {
        let ui_handle = ui.as_weak();
        let cache = cache.clone();
        let source = source.clone();
        rayon::spawn(move || {
            let cached = cache.lock().ok().and_then(|mut c| c.get(&url));
            let result = match cached {
                Some(image) => Ok(image),
                None => source.fetch(&url),
            };

            let image = match result {
                Ok(image) => image,
                Err(e) => {
                    log::warn!("Thumbnail unavailable for {}: {}", url, e);
                    return;
                }
            };

            let _ = slint::invoke_from_event_loop(move || {
                let Some(ui) = ui_handle.upgrade() else {
                    return;
                };
                let tiles = ui.global::<crate::ViewState>().get_tiles();
                if let Some(mut tile) = tiles.row_data(row) {
                    tile.thumbnail = image_loader::create_slint_image(&image);
                    tile.has_thumbnail = true;
                    tiles.set_row_data(row, tile);
                }
            });
        });
    }
}
