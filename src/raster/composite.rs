use super::checkout;
use crate::bitmap::RawBitmap;
use crate::color::{blend, pack, unpack, Color};
use crate::mask::CoverageMask;

/// Blend `color` over every pixel marked in `mask`.
///
/// Reads the bitmap once, blends the marked pixels in a working copy and writes
/// that copy back in one piece, so each pixel is blended against its value from
/// before the call exactly once. Only the overlap of mask and bitmap is visited.
/// An empty mask skips the read and write entirely.
///
/// Returns the number of pixels blended.
pub fn composite<B: RawBitmap + ?Sized>(
    bitmap: &mut B,
    mask: &CoverageMask,
    color: Color,
) -> usize {
    if mask.is_empty() {
        log::trace!("empty coverage mask, nothing to composite");
        return 0;
    }
    let Some(mut pixels) = checkout(&*bitmap) else {
        return 0;
    };

    let width = bitmap.width() as usize;
    let cols = mask.width().min(bitmap.width());
    let rows = mask.height().min(bitmap.height());

    let mut blended = 0;
    for y in 0..rows {
        let row = y as usize * width;
        for x in 0..cols {
            if mask.is_marked(x as i32, y as i32) {
                let pos = row + x as usize;
                pixels[pos] = pack(blend(color, unpack(pixels[pos])));
                blended += 1;
            }
        }
    }

    bitmap.set_raw_pixels(pixels);
    blended
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmap::Bitmap;
    use crate::raster::testing::CountingBitmap;

    #[test]
    fn test_blends_only_marked_pixels() {
        let mut bmp = Bitmap::filled(4, 3, Color::rgb(0, 0, 200));
        let mut mask = CoverageMask::new(4, 3);
        mask.mark(3, 2);
        mask.mark(0, 1);

        let red = Color::new(255, 0, 0, 255);
        assert_eq!(composite(&mut bmp, &mask, red), 2);
        assert_eq!(bmp.pixel(3, 2), Some(red));
        assert_eq!(bmp.pixel(0, 1), Some(red));
        assert_eq!(bmp.pixel(1, 1), Some(Color::rgb(0, 0, 200)));
    }

    #[test]
    fn test_last_row_and_column_reachable() {
        let mut bmp = Bitmap::new(5, 7);
        let mut mask = CoverageMask::new(5, 7);
        mask.mark(4, 6);
        composite(&mut bmp, &mask, Color::WHITE);
        assert_eq!(bmp.pixel(4, 6), Some(Color::WHITE));
        assert_eq!(bmp.pixels()[6 * 5 + 4], Color::WHITE.pack());
    }

    #[test]
    fn test_translucent_color_blends_against_existing_pixels() {
        let mut bmp = Bitmap::filled(2, 1, Color::BLACK);
        bmp.set_pixel(1, 0, Color::WHITE);
        let mut mask = CoverageMask::new(2, 1);
        mask.mark(0, 0);
        mask.mark(1, 0);

        let tint = Color::new(255, 0, 0, 128);
        composite(&mut bmp, &mask, tint);
        assert_eq!(bmp.pixel(0, 0), Some(tint.over(Color::BLACK)));
        assert_eq!(bmp.pixel(1, 0), Some(tint.over(Color::WHITE)));
        assert_eq!(bmp.pixel(0, 0), Some(Color::new(128, 0, 0, 255)));
    }

    #[test]
    fn test_mask_larger_than_bitmap() {
        let mut bmp = CountingBitmap::new(Bitmap::new(3, 3));
        let mut mask = CoverageMask::new(8, 8);
        mask.stamp(2, 2, 5);
        assert_eq!(composite(&mut bmp, &mask, Color::WHITE), 9);
        assert_eq!(bmp.inner.pixels().len(), 9);
        assert_eq!(bmp.writes, 1);
    }

    #[test]
    fn test_empty_mask_skips_buffer() {
        let mut bmp = CountingBitmap::new(Bitmap::new(3, 3));
        let mask = CoverageMask::new(3, 3);
        assert_eq!(composite(&mut bmp, &mask, Color::WHITE), 0);
        assert_eq!(bmp.reads.get(), 0);
        assert_eq!(bmp.writes, 0);
    }

    /// Bitmap whose reported size disagrees with its buffer
    struct Inconsistent {
        pixels: Vec<u32>,
        committed: bool,
    }

    impl RawBitmap for Inconsistent {
        fn width(&self) -> u32 {
            4
        }

        fn height(&self) -> u32 {
            4
        }

        fn raw_pixels(&self) -> Vec<u32> {
            self.pixels.clone()
        }

        fn set_raw_pixels(&mut self, pixels: Vec<u32>) {
            self.committed = true;
            self.pixels = pixels;
        }
    }

    #[test]
    fn test_inconsistent_bitmap_is_left_alone() {
        let mut bmp = Inconsistent {
            pixels: vec![0; 5],
            committed: false,
        };
        let mut mask = CoverageMask::new(4, 4);
        mask.mark(3, 3);
        assert_eq!(composite(&mut bmp, &mask, Color::WHITE), 0);
        assert!(!bmp.committed);
        assert_eq!(bmp.pixels.len(), 5);
    }
}
