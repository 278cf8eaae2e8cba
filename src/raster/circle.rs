use super::checkout;
use crate::bitmap::RawBitmap;
use crate::color::Color;
use crate::geometry::Point;

/// Parameters for [`draw_circle`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Circle {
    pub color: Color,
    pub radius: i32,
    pub center: Point,
    /// Outline only: two pixels per column instead of the full span
    pub hollow: bool,
}

impl Circle {
    /// Filled opaque white circle centered on a `width` x `height` bitmap,
    /// with radius `width / 2`
    pub fn for_bitmap(width: u32, height: u32) -> Self {
        Self {
            color: Color::WHITE,
            radius: (width / 2).min(i32::MAX as u32) as i32,
            center: Point::new(
                (width / 2).min(i32::MAX as u32) as i32,
                (height / 2).min(i32::MAX as u32) as i32,
            ),
            hollow: false,
        }
    }

    pub fn new(center: Point, radius: i32, color: Color) -> Self {
        Self {
            color,
            radius,
            center,
            hollow: false,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_radius(mut self, radius: i32) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_center(mut self, center: Point) -> Self {
        self.center = center;
        self
    }

    pub fn hollow(mut self, hollow: bool) -> Self {
        self.hollow = hollow;
        self
    }
}

/// Largest `s` with `s * s <= f`, for `f >= 0`
#[inline]
fn floor_sqrt(f: i64) -> i64 {
    let mut s = (f as f64).sqrt() as i64;
    // f64 sqrt can land one off for large inputs
    while s > 0 && s * s > f {
        s -= 1;
    }
    while (s + 1) * (s + 1) <= f {
        s += 1;
    }
    s
}

/// Draw a circle by solving `(x - cx)² + (y - cy)² = r²` for each column.
///
/// Every column `x` of the bitmap with a real solution gets its two boundary
/// rows `cy ± floor(sqrt(r² - (x - cx)²))`; hollow circles write only those,
/// filled circles write the whole span between them. Rows outside the bitmap
/// are dropped. Pixels are stored directly, without blending.
pub fn draw_circle<B: RawBitmap + ?Sized>(bitmap: &mut B, circle: &Circle) {
    if circle.radius < 0 {
        log::trace!("negative radius {}, nothing to draw", circle.radius);
        return;
    }
    let Some(mut pixels) = checkout(&*bitmap) else {
        return;
    };

    let width = bitmap.width() as i64;
    let height = bitmap.height() as i64;
    let cx = circle.center.x as i64;
    let cy = circle.center.y as i64;
    let r_sq = circle.radius as i64 * circle.radius as i64;
    let packed = circle.color.pack();

    let mut written = 0usize;
    let mut store = |x: i64, y: i64| {
        if y >= 0 && y < height {
            pixels[(y * width + x) as usize] = packed;
            written += 1;
        }
    };

    for x in 0..width {
        let dx = x - cx;
        let f = r_sq - dx * dx;
        if f < 0 {
            continue;
        }
        let s = floor_sqrt(f);
        let y1 = cy - s;
        let y2 = cy + s;

        if circle.hollow {
            store(x, y1);
            if y2 != y1 {
                store(x, y2);
            }
        } else {
            for y in y1.max(0)..=y2.min(height - 1) {
                store(x, y);
            }
        }
    }

    log::debug!(
        "circle r={} at ({}, {}) hollow={}: {} pixels written",
        circle.radius,
        circle.center.x,
        circle.center.y,
        circle.hollow,
        written
    );
    bitmap.set_raw_pixels(pixels);
}
