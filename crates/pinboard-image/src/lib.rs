//! Image decoding for pinboard.
//!
//! Turns encoded image data (PNG or JPEG) into a [`Bitmap`] ready to be bound
//! to a tile. Failures map onto [`InvalidImageError`] so that hosts can pass
//! them straight through to the renderer's fallback path.

use std::path::Path;

use image::ImageReader;
use pinboard_core::{Bitmap, InvalidImageError};

/// Decode an in-memory PNG or JPEG into an RGBA bitmap.
pub fn decode(bytes: &[u8]) -> Result<Bitmap, InvalidImageError> {
    if bytes.is_empty() {
        return Err(InvalidImageError::Empty);
    }
    let img = image::load_from_memory(bytes)
        .map_err(|e| InvalidImageError::Decode(e.to_string()))?
        .into_rgba8();
    let (w, h) = img.dimensions();
    log::debug!("decoded {}x{} image ({} bytes encoded)", w, h, bytes.len());
    let bmp = Bitmap::from_rgba(w, h, img.into_raw());
    bmp.validate()?;
    Ok(bmp)
}

/// Read and decode the image file at `path`. The format is guessed from the
/// file contents, not its extension.
pub fn open(path: impl AsRef<Path>) -> Result<Bitmap, InvalidImageError> {
    let path = path.as_ref();
    let reader = ImageReader::open(path)
        .and_then(|r| r.with_guessed_format())
        .map_err(|e| InvalidImageError::Unreadable(format!("{}: {e}", path.display())))?;
    let img = reader
        .decode()
        .map_err(|e| InvalidImageError::Decode(format!("{}: {e}", path.display())))?
        .into_rgba8();
    let (w, h) = img.dimensions();
    log::debug!("decoded {} ({}x{})", path.display(), w, h);
    let bmp = Bitmap::from_rgba(w, h, img.into_raw());
    bmp.validate()?;
    Ok(bmp)
}
