//! Packed ARGB colors and source-over alpha blending
//!
//! Pixels are stored as `u32` with alpha in the top byte, then red, green
//! and blue: `0xAARRGGBB`.

use serde::{Deserialize, Serialize};

const ALPHA_SHIFT: u32 = 24;
const RED_SHIFT: u32 = 16;
const GREEN_SHIFT: u32 = 8;
const CHANNEL_MASK: u32 = 0xFF;

// ============================================================================
// Color
// ============================================================================

/// Four-channel color, 8 bits per channel
///
/// `alpha` may be omitted in serialized form and defaults to fully opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    #[serde(default = "default_alpha")]
    pub alpha: u8,
}

fn default_alpha() -> u8 {
    u8::MAX
}

impl Color {
    /// Opaque white
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Opaque black
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// Transparent black, the packed value `0`
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    #[inline]
    pub const fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Opaque color (alpha = 255)
    #[inline]
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self::new(red, green, blue, 255)
    }

    /// Build a color from floating point intermediates.
    /// Each channel is rounded to nearest and clamped to [0, 255]; NaN becomes 0.
    pub fn from_f64(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self::new(
            channel_from_f64(red),
            channel_from_f64(green),
            channel_from_f64(blue),
            channel_from_f64(alpha),
        )
    }

    #[inline]
    pub fn is_opaque(&self) -> bool {
        self.alpha == u8::MAX
    }

    #[inline]
    pub fn is_transparent(&self) -> bool {
        self.alpha == 0
    }

    /// Packed `0xAARRGGBB` value
    #[inline]
    pub fn pack(self) -> u32 {
        pack(self)
    }

    /// Inverse of [`Color::pack`]
    #[inline]
    pub fn unpack(value: u32) -> Self {
        unpack(value)
    }

    /// Composite `self` over `background`, see [`blend`]
    #[inline]
    pub fn over(self, background: Self) -> Self {
        blend(self, background)
    }

    /// Channels in R, G, B, A byte order (for image export)
    #[inline]
    pub fn to_rgba_bytes(self) -> [u8; 4] {
        [self.red, self.green, self.blue, self.alpha]
    }
}

impl From<u32> for Color {
    fn from(value: u32) -> Self {
        unpack(value)
    }
}

impl From<Color> for u32 {
    fn from(color: Color) -> Self {
        pack(color)
    }
}

#[inline]
fn channel_from_f64(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 255.0) as u8
}

// ============================================================================
// Packing
// ============================================================================

/// Pack a color into `0xAARRGGBB`
#[inline]
pub fn pack(color: Color) -> u32 {
    (color.alpha as u32) << ALPHA_SHIFT
        | (color.red as u32) << RED_SHIFT
        | (color.green as u32) << GREEN_SHIFT
        | color.blue as u32
}

/// Unpack a `0xAARRGGBB` value
#[inline]
pub fn unpack(value: u32) -> Color {
    Color {
        alpha: ((value >> ALPHA_SHIFT) & CHANNEL_MASK) as u8,
        red: ((value >> RED_SHIFT) & CHANNEL_MASK) as u8,
        green: ((value >> GREEN_SHIFT) & CHANNEL_MASK) as u8,
        blue: (value & CHANNEL_MASK) as u8,
    }
}

// ============================================================================
// Blending
// ============================================================================

/// Source-over compositing of `fg` onto `bg`.
///
/// Both colors are premultiplied by their alpha, combined as
/// `fg + bg * (1 - a_fg)`, and divided back by the union coverage
/// `a_out = a_bg + a_fg - a_bg * a_fg`. When both inputs are fully
/// transparent `a_out` is zero and `bg` is returned as is.
pub fn blend(fg: Color, bg: Color) -> Color {
    let alpha_fg = fg.alpha as f64 / 255.0;
    let alpha_bg = bg.alpha as f64 / 255.0;
    let alpha_out = alpha_bg + alpha_fg - alpha_bg * alpha_fg;

    if alpha_out <= 0.0 {
        return bg;
    }

    let channel = |f: u8, b: u8| {
        let premultiplied = f as f64 * alpha_fg + b as f64 * alpha_bg * (1.0 - alpha_fg);
        premultiplied / alpha_out
    };

    Color::from_f64(
        channel(fg.red, bg.red),
        channel(fg.green, bg.green),
        channel(fg.blue, bg.blue),
        alpha_out * 255.0,
    )
}
