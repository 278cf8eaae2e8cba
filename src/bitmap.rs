use crate::color::Color;

// ============================================================================
// RawBitmap
// ============================================================================

/// A bitmap that exposes its pixels as one flat array of packed `0xAARRGGBB`
/// values, row-major, `width * height` long.
///
/// Drawing functions read the whole buffer once with [`RawBitmap::raw_pixels`],
/// edit that working copy, and commit it with a single
/// [`RawBitmap::set_raw_pixels`].
pub trait RawBitmap {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Copy of the current pixels
    fn raw_pixels(&self) -> Vec<u32>;

    /// Replace the pixels wholesale. `pixels` has the same length as
    /// [`RawBitmap::raw_pixels`] returned.
    fn set_raw_pixels(&mut self, pixels: Vec<u32>);
}

// ============================================================================
// Bitmap
// ============================================================================

/// In-memory ARGB8888 bitmap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    pixels: Vec<u32>,
    width: u32,
    height: u32,
}

impl Bitmap {
    /// Create a transparent bitmap
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Color::TRANSPARENT)
    }

    /// Create a bitmap cleared to `color`
    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        Self {
            pixels: vec![color.pack(); width as usize * height as usize],
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Check if coordinates are within bounds
    #[inline]
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && (x as i64) < self.width as i64 && y >= 0 && (y as i64) < self.height as i64
    }

    #[inline]
    fn pixel_index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Clear to a solid color
    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color.pack());
    }

    /// Read a pixel, None if out of bounds
    #[inline]
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        if self.in_bounds(x, y) {
            Some(Color::unpack(self.pixels[self.pixel_index(x as u32, y as u32)]))
        } else {
            None
        }
    }

    /// Overwrite a single pixel (bounds checked, no blending)
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if self.in_bounds(x, y) {
            let idx = self.pixel_index(x as u32, y as u32);
            self.pixels[idx] = color.pack();
        }
    }

    /// Packed pixels, row-major
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Pixels as R, G, B, A bytes (for image encoders)
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|&p| Color::unpack(p).to_rgba_bytes())
            .collect()
    }
}

impl RawBitmap for Bitmap {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn raw_pixels(&self) -> Vec<u32> {
        self.pixels.clone()
    }

    fn set_raw_pixels(&mut self, pixels: Vec<u32>) {
        if pixels.len() != self.pixels.len() {
            log::warn!(
                "ignoring pixel commit of {} values into a {}x{} bitmap",
                pixels.len(),
                self.width,
                self.height
            );
            return;
        }
        self.pixels = pixels;
    }
}

impl Default for Bitmap {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_transparent() {
        let bmp = Bitmap::new(3, 2);
        assert_eq!(bmp.pixels().len(), 6);
        assert!(bmp.pixels().iter().all(|&p| p == 0));
    }

    #[test]
    fn test_set_and_get_pixel() {
        let mut bmp = Bitmap::new(4, 3);
        let c = Color::new(1, 2, 3, 4);
        bmp.set_pixel(3, 1, c);
        assert_eq!(bmp.pixel(3, 1), Some(c));
        // Row-major: index = y * width + x
        assert_eq!(bmp.pixels()[4 + 3], c.pack());

        bmp.set_pixel(4, 0, c);
        bmp.set_pixel(-1, 0, c);
        assert_eq!(bmp.pixel(4, 0), None);
        assert_eq!(bmp.pixel(0, -1), None);
    }

    #[test]
    fn test_set_raw_pixels_rejects_wrong_length() {
        let mut bmp = Bitmap::filled(2, 2, Color::BLACK);
        bmp.set_raw_pixels(vec![0; 3]);
        assert_eq!(bmp.raw_pixels(), vec![Color::BLACK.pack(); 4]);

        bmp.set_raw_pixels(vec![Color::WHITE.pack(); 4]);
        assert_eq!(bmp.pixel(1, 1), Some(Color::WHITE));
    }

    #[test]
    fn test_clear() {
        let mut bmp = Bitmap::new(2, 2);
        bmp.clear(Color::rgb(9, 8, 7));
        assert!(bmp.pixels().iter().all(|&p| p == Color::rgb(9, 8, 7).pack()));
    }

    #[test]
    fn test_rgba_bytes_order() {
        let bmp = Bitmap::filled(1, 1, Color::new(10, 20, 30, 40));
        assert_eq!(bmp.to_rgba_bytes(), vec![10, 20, 30, 40]);
    }
}
