//! Software rasterizer for packed ARGB pixel buffers.
//!
//! Draws filled or hollow circles and stroked polylines into any bitmap that
//! implements [`RawBitmap`]. Polylines are alpha-composited over the existing
//! pixels through a [`CoverageMask`], so pixels shared by several segments are
//! blended once per call. Every draw call reads the buffer once and writes it
//! back once.
//!
//! ```
//! use rawdraw::{draw_circle, draw_polygon, Bitmap, Circle, Color, Point};
//!
//! let mut bitmap = Bitmap::filled(32, 32, Color::BLACK);
//! draw_circle(&mut bitmap, &Circle::new(Point::new(16, 16), 8, Color::WHITE).hollow(true));
//! draw_polygon(
//!     &mut bitmap,
//!     &[Point::new(0, 0), Point::new(31, 31)],
//!     Color::new(255, 0, 0, 128),
//!     2,
//! );
//! assert_eq!(bitmap.pixel(16, 8), Some(Color::WHITE));
//! ```

pub mod bitmap;
pub mod color;
pub mod export;
pub mod geometry;
pub mod mask;
pub mod raster;
pub mod scene;

pub use bitmap::{Bitmap, RawBitmap};
pub use color::{blend, pack, unpack, Color};
pub use geometry::Point;
pub use mask::CoverageMask;
pub use raster::{composite, draw_circle, draw_polygon, polyline_mask, Circle};
pub use scene::{Scene, Shape};
