//! Service layer for gallery logic.
//!
//! Separates routing, navigation, input and preloading from the UI handlers
//! so they can be driven and tested without a window.

pub mod gallery_service;
pub mod input_router;
pub mod navigation_service;
pub mod preload_service;
pub mod url_sync;

pub use gallery_service::{GalleryApp, HomeTile, Page};
pub use input_router::{ArrowKey, InputEvent};
pub use navigation_service::ViewerSnapshot;
pub use preload_service::{DiskImageSource, ImageSource};
pub use url_sync::GalleryLocation;
