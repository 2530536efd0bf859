//! Helper functions to set groups of ViewState properties at once.

use crate::catalog::MenuEntry;
use crate::services::{HomeTile, ViewerSnapshot};
use log::error;
use slint::{ComponentHandle, Model, ModelRc, VecModel};

/// Sets the page identifier and the location bar.
///
/// Groups: page, location, can-go-back
pub fn set_page_info(ui: &crate::AppWindow, page: &str, location: &str, can_go_back: bool) {
    let view = ui.global::<crate::ViewState>();
    view.set_page(page.into());
    view.set_location(location.into());
    view.set_can_go_back(can_go_back);
}

/// Fills the home page tiles without thumbnails.
pub fn set_home_tiles(ui: &crate::AppWindow, artist_name: &str, tiles: &[HomeTile]) {
    let view = ui.global::<crate::ViewState>();
    view.set_artist_name(artist_name.into());
    let rows: Vec<crate::CategoryTile> = tiles
        .iter()
        .map(|tile| crate::CategoryTile {
            name: tile.name.as_str().into(),
            slug: tile.slug.as_str().into(),
            thumbnail: slint::Image::default(),
            has_thumbnail: false,
            alt: tile.thumbnail_alt.as_str().into(),
        })
        .collect();
    view.set_tiles(ModelRc::new(VecModel::from(rows)));
}

/// Whether `links` already shows exactly `menu`.
fn menu_matches(links: &ModelRc<crate::MenuLink>, menu: &[MenuEntry]) -> bool {
    links.row_count() == menu.len()
        && links
            .iter()
            .zip(menu)
            .all(|(link, entry)| link.slug == entry.slug && link.name == entry.name)
}

/// Sets everything the viewer chrome shows except the image itself.
///
/// The menu model is only replaced when its entries change, so pointer-driven
/// renders leave the menu items alive.
///
/// Groups: category-name, menu, counter-text, alt-text, show-previous, show-next,
/// controls-visible, direction, animate, transition-seq
pub fn set_viewer_info(ui: &crate::AppWindow, snapshot: &ViewerSnapshot, menu: &[MenuEntry]) {
    let view = ui.global::<crate::ViewState>();
    view.set_category_name(snapshot.category_name.as_str().into());
    if !menu_matches(&view.get_menu(), menu) {
        let links: Vec<crate::MenuLink> = menu
            .iter()
            .map(|entry| crate::MenuLink {
                name: entry.name.as_str().into(),
                slug: entry.slug.as_str().into(),
            })
            .collect();
        view.set_menu(ModelRc::new(VecModel::from(links)));
    }
    view.set_counter_text(snapshot.counter_text.as_str().into());
    view.set_alt_text(snapshot.alt.as_str().into());
    view.set_show_previous(snapshot.show_previous);
    view.set_show_next(snapshot.show_next);
    view.set_controls_visible(snapshot.controls_visible);
    let transition = snapshot.transition;
    view.set_direction(transition.direction.sign());
    view.set_animate(transition.animate);
    // Slint ints are i32; wrapping keeps every step a change.
    view.set_transition_seq(transition.seq as i32);
}

/// Sets an error message in the UI with a prefix.
///
/// Logs the error and updates the ViewState error-message property.
pub fn set_error_with_prefix(ui: &crate::AppWindow, prefix: &str, error: String) {
    let error_message = format!("{}: {}", prefix, error);
    error!("{}", error_message);
    ui.global::<crate::ViewState>()
        .set_error_message(error_message.into());
}
