use crate::error::{AppError, Result};
use crate::image_cache::CachedImage;
use slint::{Image, Rgb8Pixel, SharedPixelBuffer};
use std::path::Path;

/// Decodes an image file into RGB8 pixels. Blocking; call from a rayon worker.
pub fn load_image_blocking(path: &Path) -> Result<CachedImage> {
    let image = image::ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| AppError::ImageLoad(format!("{}: {}", path.display(), e)))?
        .decode()?;

    let rgb = image.to_rgb8();
    let (width, height) = rgb.dimensions();
    Ok(CachedImage::new(rgb.into_raw(), width, height))
}

/// Wraps decoded RGB8 pixels in a Slint image. Must run on the UI thread.
pub fn create_slint_image(cached: &CachedImage) -> Image {
    let buffer =
        SharedPixelBuffer::<Rgb8Pixel>::clone_from_slice(&cached.data, cached.width, cached.height);
    Image::from_rgb8(buffer)
}
