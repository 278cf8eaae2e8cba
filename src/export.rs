//! PNG output

use std::path::Path;

use anyhow::Context;
use image::RgbaImage;

use crate::bitmap::Bitmap;

/// Convert a bitmap to an `image` buffer (R, G, B, A byte order)
pub fn to_rgba_image(bitmap: &Bitmap) -> anyhow::Result<RgbaImage> {
    RgbaImage::from_raw(bitmap.width(), bitmap.height(), bitmap.to_rgba_bytes())
        .context("pixel buffer does not match bitmap dimensions")
}

/// Write a bitmap as a PNG file
pub fn save_png(bitmap: &Bitmap, path: impl AsRef<Path>) -> anyhow::Result<()> {
    let path = path.as_ref();
    if bitmap.width() == 0 || bitmap.height() == 0 {
        anyhow::bail!(
            "cannot write empty {}x{} bitmap to {}",
            bitmap.width(),
            bitmap.height(),
            path.display()
        );
    }
    let img = to_rgba_image(bitmap)?;
    img.save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("failed to write {}", path.display()))?;
    log::info!("wrote {}x{} PNG to {}", bitmap.width(), bitmap.height(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    #[test]
    fn test_to_rgba_image() {
        let mut bmp = Bitmap::new(3, 2);
        bmp.set_pixel(2, 1, Color::new(10, 20, 30, 40));
        let img = to_rgba_image(&bmp).unwrap();
        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(img.get_pixel(2, 1).0, [10, 20, 30, 40]);
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 0]);
    }

    #[test]
    fn test_save_png_round_trip() {
        let bmp = Bitmap::filled(4, 4, Color::rgb(200, 100, 50));
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        save_png(&bmp, &path).unwrap();

        let decoded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (4, 4));
        assert_eq!(decoded.get_pixel(3, 3).0, [200, 100, 50, 255]);
    }

    #[test]
    fn test_empty_bitmap_rejected() {
        let err = save_png(&Bitmap::new(0, 3), "unused.png").unwrap_err();
        assert!(err.to_string().contains("empty"));
    }
}
