use crate::services::GalleryLocation;
use crate::state::AppState;
use crate::ui::image_display::load_thumbnails;
use std::rc::Rc;
use std::time::Instant;

/// First non-flag argument, read as a location such as `/gallery/bubble-moon/?image=3`.
fn startup_location_from_args() -> Option<GalleryLocation> {
    std::env::args()
        .skip(1)
        .find(|arg| !arg.starts_with('-'))
        .map(|arg| GalleryLocation::parse(&arg))
}

/// Fills the home page and opens the start location.
pub fn configure_startup_opening(app: &crate::AppWindow, app_state: &Rc<AppState>) {
    let tiles = match app_state.gallery.lock() {
        Ok(mut gallery) => {
            let tiles = gallery.home_tiles();
            crate::ui::set_home_tiles(app, gallery.artist_name(), &tiles);

            if let Some(location) = startup_location_from_args() {
                log::info!("Start location: {}", location);
                gallery.open(location, Instant::now());
            }
            tiles
        }
        Err(e) => {
            crate::ui::set_error_with_prefix(app, "Failed to start gallery", e.to_string());
            return;
        }
    };

    let thumbnails = tiles
        .into_iter()
        .enumerate()
        .filter_map(|(row, tile)| tile.thumbnail_url.map(|url| (row, url)))
        .collect();
    load_thumbnails(
        app,
        thumbnails,
        app_state.image_cache.clone(),
        app_state.image_source.clone(),
    );

    crate::ui::render(app, app_state);
}
