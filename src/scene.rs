//! Scene files: a canvas size plus an ordered list of draw calls
//!
//! Scenes are plain JSON and are rasterized in one go; nothing is kept once the
//! bitmap has been produced.

use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::bitmap::{Bitmap, RawBitmap};
use crate::color::Color;
use crate::geometry::Point;
use crate::raster::{draw_circle, draw_polygon, Circle};

/// Largest canvas a scene may ask for, in pixels (16384 x 16384)
pub const MAX_CANVAS_PIXELS: usize = 1 << 28;

/// Fail unless a `width` x `height` canvas stays within [`MAX_CANVAS_PIXELS`]
pub fn check_canvas(width: u32, height: u32) -> anyhow::Result<()> {
    match (width as usize).checked_mul(height as usize) {
        Some(pixels) if pixels <= MAX_CANVAS_PIXELS => Ok(()),
        _ => anyhow::bail!(
            "canvas {}x{} exceeds the limit of {} pixels",
            width,
            height,
            MAX_CANVAS_PIXELS
        ),
    }
}

fn transparent() -> Color {
    Color::TRANSPARENT
}

fn white() -> Color {
    Color::WHITE
}

fn default_stroke_width() -> i32 {
    1
}

/// One draw call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Shape {
    /// Missing fields fall back to [`Circle::for_bitmap`]
    Circle {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<Color>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        radius: Option<i32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        center: Option<Point>,
        #[serde(default)]
        hollow: bool,
    },
    /// Open polyline, see [`draw_polygon`]
    Polygon {
        points: Vec<Point>,
        #[serde(default = "white")]
        color: Color,
        #[serde(default = "default_stroke_width")]
        width: i32,
    },
}

impl Shape {
    /// Rasterize onto `bitmap`
    pub fn draw<B: RawBitmap + ?Sized>(&self, bitmap: &mut B) {
        match self {
            Shape::Circle {
                color,
                radius,
                center,
                hollow,
            } => {
                let mut circle =
                    Circle::for_bitmap(bitmap.width(), bitmap.height()).hollow(*hollow);
                if let Some(color) = color {
                    circle = circle.with_color(*color);
                }
                if let Some(radius) = radius {
                    circle = circle.with_radius(*radius);
                }
                if let Some(center) = center {
                    circle = circle.with_center(*center);
                }
                draw_circle(bitmap, &circle);
            },
            Shape::Polygon {
                points,
                color,
                width,
            } => draw_polygon(bitmap, points, *color, *width),
        }
    }
}

/// A canvas and the shapes drawn on it, in order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    pub name: String,
    pub width: u32,
    pub height: u32,
    #[serde(default = "transparent")]
    pub background: Color,
    #[serde(default)]
    pub shapes: Vec<Shape>,
}

impl Scene {
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            background: Color::TRANSPARENT,
            shapes: Vec::new(),
        }
    }

    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    pub fn add_shape(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// Override the canvas size. Oversized canvases are rejected and leave the
    /// scene unchanged.
    pub fn resize(&mut self, width: u32, height: u32) -> anyhow::Result<()> {
        check_canvas(width, height)?;
        self.width = width;
        self.height = height;
        Ok(())
    }

    /// Draw every shape onto an existing bitmap, without clearing it
    pub fn render_into<B: RawBitmap + ?Sized>(&self, bitmap: &mut B) {
        for shape in &self.shapes {
            shape.draw(bitmap);
        }
    }

    /// Draw the scene onto a fresh bitmap filled with the background color
    pub fn render(&self) -> anyhow::Result<Bitmap> {
        check_canvas(self.width, self.height)
            .with_context(|| format!("cannot render scene '{}'", self.name))?;
        let mut bitmap = Bitmap::filled(self.width, self.height, self.background);
        self.render_into(&mut bitmap);
        log::info!(
            "rendered scene '{}' ({}x{}, {} shapes)",
            self.name,
            self.width,
            self.height,
            self.shapes.len()
        );
        Ok(bitmap)
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let scene: Self = serde_json::from_str(json).context("invalid scene JSON")?;
        check_canvas(scene.width, scene.height)?;
        Ok(scene)
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize scene")
    }

    /// Save scene to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        let json = self.to_json()?;
        fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
    }

    /// Load scene from a JSON file
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_json(&json).with_context(|| format!("failed to load {}", path.display()))
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new("untitled", 0, 0)
    }
}
