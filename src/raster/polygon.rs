use super::composite;
use crate::bitmap::RawBitmap;
use crate::color::Color;
use crate::geometry::Point;
use crate::mask::CoverageMask;

/// Stroke a polyline through `points` and alpha-blend it onto the bitmap.
///
/// Consecutive points are joined by straight segments; the last point is not
/// joined back to the first. A single point draws one brush stamp. Every pixel
/// under the stroke is blended once, however many segments cross it.
/// `stroke_width < 1` or an empty point list leaves the bitmap untouched.
pub fn draw_polygon<B: RawBitmap + ?Sized>(
    bitmap: &mut B,
    points: &[Point],
    color: Color,
    stroke_width: i32,
) {
    if stroke_width < 1 || points.is_empty() {
        log::trace!(
            "skipping polyline: {} points, stroke width {}",
            points.len(),
            stroke_width
        );
        return;
    }

    let mask = polyline_mask(bitmap.width(), bitmap.height(), points, stroke_width);
    let blended = composite(bitmap, &mask, color);
    log::debug!(
        "polyline of {} points, stroke width {}: {} pixels blended",
        points.len(),
        stroke_width,
        blended
    );
}

/// Coverage of a stroked polyline on a `width` x `height` grid
pub fn polyline_mask(width: u32, height: u32, points: &[Point], stroke_width: i32) -> CoverageMask {
    let mut mask = CoverageMask::new(width, height);
    if stroke_width < 1 {
        return mask;
    }

    for pair in points.windows(2) {
        stamp_segment(&mut mask, pair[0], pair[1], stroke_width);
    }
    // Segments stop one step short of their end point; close the final one here
    if let Some(last) = points.last() {
        mask.stamp(last.x, last.y, stroke_width);
    }
    mask
}

/// DDA walk from `start` toward `end`, excluding `end`.
///
/// Steps one unit per iteration along the axis with the larger delta and
/// interpolates the other axis as `round(delta * i / steps)`.
fn stamp_segment(mask: &mut CoverageMask, start: Point, end: Point, stroke_width: i32) {
    let dx = end.x as i64 - start.x as i64;
    let dy = end.y as i64 - start.y as i64;
    let horizontal = dx.abs() >= dy.abs();
    let steps = dx.abs().max(dy.abs());
    if steps == 0 {
        return;
    }

    let (major_start, major_dir, minor_start, minor_delta, extent) = if horizontal {
        (start.x as i64, dx.signum(), start.y as i64, dy, mask.width())
    } else {
        (start.y as i64, dy.signum(), start.x as i64, dx, mask.height())
    };

    // Only walk the steps whose brush can reach the grid along the major axis
    let pad = stroke_width as i64;
    let lo = -pad;
    let hi = extent as i64 + pad;
    let (first, last) = if major_dir > 0 {
        (lo - major_start, hi - major_start)
    } else {
        (major_start - hi, major_start - lo)
    };
    let first = first.max(0);
    let last = last.min(steps - 1);

    for i in first..=last {
        let major = major_start + i * major_dir;
        let minor = minor_start + (minor_delta as f64 * i as f64 / steps as f64).round() as i64;
        let (x, y) = if horizontal {
            (major, minor)
        } else {
            (minor, major)
        };
        mask.stamp(clamp_coord(x), clamp_coord(y), stroke_width);
    }
}

#[inline]
fn clamp_coord(v: i64) -> i32 {
    v.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}
