//! Event handlers for UI callbacks.
//!
//! Every callback runs on the event loop, mutates `GalleryApp` under its lock,
//! releases the lock and then re-renders from a fresh snapshot.

use crate::services::{ArrowKey, GalleryApp, GalleryLocation, InputEvent};
use crate::state::AppState;
use crate::ui::{render, set_error_with_prefix};
use slint::ComponentHandle;
use slint::platform::Key;
use std::rc::Rc;
use std::time::Instant;

/// Maps the text of a key event to an arrow key.
fn arrow_key(text: &str) -> Option<ArrowKey> {
    let is = |key: Key| slint::SharedString::from(key).as_str() == text;
    if is(Key::LeftArrow) {
        Some(ArrowKey::Left)
    } else if is(Key::UpArrow) {
        Some(ArrowKey::Up)
    } else if is(Key::RightArrow) {
        Some(ArrowKey::Right)
    } else if is(Key::DownArrow) {
        Some(ArrowKey::Down)
    } else {
        None
    }
}

/// Runs `action` against the gallery, then re-renders.
fn update_gallery(
    ui_handle: &slint::Weak<crate::AppWindow>,
    state: &Rc<AppState>,
    action: impl FnOnce(&mut GalleryApp, Instant),
) {
    let Some(ui) = ui_handle.upgrade() else {
        return;
    };
    match state.gallery.lock() {
        Ok(mut gallery) => action(&mut gallery, Instant::now()),
        Err(e) => {
            set_error_with_prefix(&ui, "Gallery state unavailable", e.to_string());
            return;
        }
    }
    render(&ui, state);
}

/// Feeds an input event to the mounted viewer, if any.
fn viewer_input(ui_handle: &slint::Weak<crate::AppWindow>, state: &Rc<AppState>, event: InputEvent) {
    update_gallery(ui_handle, state, |gallery, now| {
        if let Some(session) = gallery.viewer_mut() {
            session.handle_input(event, now);
        }
    });
}

/// Sets up all UI event handlers for the application.
pub fn setup_handlers(ui: &crate::AppWindow, state: Rc<AppState>) {
    let logic = ui.global::<crate::Logic>();

    logic.on_open_location({
        let ui_handle = ui.as_weak();
        let state = state.clone();
        move |text| {
            let location = GalleryLocation::parse(&text);
            update_gallery(&ui_handle, &state, |gallery, now| gallery.open(location, now));
        }
    });

    logic.on_open_category({
        let ui_handle = ui.as_weak();
        let state = state.clone();
        move |slug| {
            let location = GalleryLocation::gallery(&slug);
            update_gallery(&ui_handle, &state, |gallery, now| gallery.open(location, now));
        }
    });

    logic.on_go_home({
        let ui_handle = ui.as_weak();
        let state = state.clone();
        move || {
            update_gallery(&ui_handle, &state, |gallery, now| {
                gallery.open(GalleryLocation::home(), now)
            });
        }
    });

    logic.on_go_back({
        let ui_handle = ui.as_weak();
        let state = state.clone();
        move || {
            update_gallery(&ui_handle, &state, |gallery, now| {
                gallery.back(now);
            });
        }
    });

    logic.on_previous_clicked({
        let ui_handle = ui.as_weak();
        let state = state.clone();
        move || viewer_input(&ui_handle, &state, InputEvent::ClickPrevious)
    });

    logic.on_next_clicked({
        let ui_handle = ui.as_weak();
        let state = state.clone();
        move || viewer_input(&ui_handle, &state, InputEvent::ClickNext)
    });

    // Arrow keys are consumed so they never scroll anything else.
    logic.on_key_pressed({
        let ui_handle = ui.as_weak();
        let state = state.clone();
        move |text| match arrow_key(&text) {
            Some(key) => {
                viewer_input(&ui_handle, &state, InputEvent::Key(key));
                true
            }
            None => false,
        }
    });

    logic.on_touch_start({
        let ui_handle = ui.as_weak();
        let state = state.clone();
        move |x| viewer_input(&ui_handle, &state, InputEvent::TouchStart { x })
    });

    logic.on_touch_move({
        let ui_handle = ui.as_weak();
        let state = state.clone();
        move |x| viewer_input(&ui_handle, &state, InputEvent::TouchMove { x })
    });

    logic.on_touch_end({
        let ui_handle = ui.as_weak();
        let state = state.clone();
        move || viewer_input(&ui_handle, &state, InputEvent::TouchEnd)
    });

    logic.on_wheel({
        let ui_handle = ui.as_weak();
        let state = state.clone();
        move |delta_y| viewer_input(&ui_handle, &state, InputEvent::Wheel { delta_y })
    });

    logic.on_pointer_activity({
        let ui_handle = ui.as_weak();
        move || viewer_input(&ui_handle, &state, InputEvent::PointerActivity)
    });
}
