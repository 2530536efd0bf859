//! UI module for handling user interactions and UI updates.
//!
//! Threading model:
//! - Slint callbacks and timers: all gallery state changes, on the event loop
//! - `rayon::spawn`: image decoding for the viewer, preloads and thumbnails
//! - `slint::invoke_from_event_loop`: returning decoded images to the UI thread

pub mod handlers;
pub mod image_display;
mod state_helpers;

pub use handlers::setup_handlers;
pub use state_helpers::*;

use crate::services::{GalleryApp, Page};
use crate::state::AppState;
use slint::{ComponentHandle, TimerMode};
use std::rc::Rc;
use std::time::Instant;

/// Pushes the current gallery state into the UI and re-arms the viewer timers.
pub fn render(ui: &crate::AppWindow, state: &Rc<AppState>) {
    let Ok(gallery) = state.gallery.lock() else {
        return;
    };
    let location = gallery.current_location().to_string();
    let can_go_back = gallery.can_go_back();

    let wanted_image = match gallery.page() {
        Page::Home => {
            set_page_info(ui, "home", &location, can_go_back);
            None
        }
        Page::NotFound => {
            set_page_info(ui, "not-found", &location, can_go_back);
            None
        }
        Page::Viewer(session) => {
            set_page_info(ui, "viewer", &location, can_go_back);
            let snapshot = session.snapshot();
            set_viewer_info(ui, &snapshot, &gallery.menu_entries());
            Some(snapshot.image_url)
        }
    };
    let deadlines = viewer_deadlines(&gallery);
    drop(gallery);

    if let Some(url) = wanted_image {
        if ui.global::<crate::ViewState>().get_current_url() != url.as_str() {
            image_display::load_and_display_image(
                ui,
                url,
                state.image_cache.clone(),
                state.image_source.clone(),
            );
        }
    }

    sync_timers(ui, state, deadlines);
}

fn viewer_deadlines(gallery: &GalleryApp) -> (Option<Instant>, Option<Instant>) {
    match gallery.viewer() {
        Some(session) => (session.counter_deadline(), session.idle_deadline()),
        None => (None, None),
    }
}

/// Restarts each slint timer for its pending deadline, or stops it when none is pending.
fn sync_timers(
    ui: &crate::AppWindow,
    state: &Rc<AppState>,
    (counter, idle): (Option<Instant>, Option<Instant>),
) {
    for (timer, deadline) in [(&state.counter_timer, counter), (&state.idle_timer, idle)] {
        match deadline {
            Some(deadline) => {
                let ui_handle = ui.as_weak();
                let state = state.clone();
                timer.start(
                    TimerMode::SingleShot,
                    deadline.saturating_duration_since(Instant::now()),
                    move || on_timer(&ui_handle, &state),
                );
            }
            None => timer.stop(),
        }
    }
}

fn on_timer(ui_handle: &slint::Weak<crate::AppWindow>, state: &Rc<AppState>) {
    let Some(ui) = ui_handle.upgrade() else {
        return;
    };
    if let Ok(mut gallery) = state.gallery.lock() {
        if let Some(session) = gallery.viewer_mut() {
            session.tick(Instant::now());
        }
    }
    render(&ui, state);
}
