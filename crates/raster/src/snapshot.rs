//! PNG output of a [`Pixmap`].
//!
//! Feature-gated behind `png` (default on) so that consumers that only need
//! the pixmap surface do not pull in the `image` crate.

use particle_field_core::color::Srgb;
use particle_field_core::error::FieldError;
use std::path::Path;

use crate::pixmap::Pixmap;

/// Writes the pixmap as a PNG.
///
/// With a `background` the image is flattened to opaque RGBA; without one the
/// transparent canvas is written as-is. Returns `FieldError::InvalidDimensions`
/// if the dimensions overflow `u32`, or `FieldError::Io` on write failure.
pub fn write_png(pixmap: &Pixmap, background: Option<Srgb>, path: &Path) -> Result<(), FieldError> {
    let rgba = match background {
        Some(bg) => pixmap.flatten(bg),
        None => pixmap.data().to_vec(),
    };
    let w = u32::try_from(pixmap.width()).map_err(|_| FieldError::InvalidDimensions)?;
    let h = u32::try_from(pixmap.height()).map_err(|_| FieldError::InvalidDimensions)?;
    let img = image::RgbaImage::from_raw(w, h, rgba)
        .ok_or_else(|| FieldError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| FieldError::Io(e.to_string()))?;
    log::info!("wrote {}x{} snapshot to {}", w, h, path.display());
    Ok(())
}
