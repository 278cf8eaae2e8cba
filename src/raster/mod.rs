//! Shape rasterizers
//!
//! Every draw call follows the same cycle: take one working copy of the bitmap's
//! pixels, edit it locally, commit it back with one bulk write.

mod circle;
mod composite;
mod polygon;

pub use circle::{draw_circle, Circle};
pub use composite::composite;
pub use polygon::{draw_polygon, polyline_mask};

use crate::bitmap::RawBitmap;

/// Read the bitmap's pixels for editing.
///
/// Returns None for empty bitmaps and for bitmaps whose buffer length does not
/// match their reported size; callers treat that as a no-op.
fn checkout<B: RawBitmap + ?Sized>(bitmap: &B) -> Option<Vec<u32>> {
    let (width, height) = (bitmap.width(), bitmap.height());
    if width == 0 || height == 0 {
        log::trace!("skipping draw on empty {}x{} bitmap", width, height);
        return None;
    }

    let pixels = bitmap.raw_pixels();
    let expected = width as usize * height as usize;
    if pixels.len() != expected {
        log::warn!(
            "bitmap reports {}x{} but holds {} pixels, skipping draw",
            width,
            height,
            pixels.len()
        );
        return None;
    }
    Some(pixels)
}
