//! Procedural glyph rendering
//!
//! Draws the checkmark, cross and info glyphs on a 36x36 logical canvas.
//! The canvas is rasterized at the caller's pixel density and every stroke
//! is anti-aliased from its exact distance to the pixel center, so the
//! glyphs stay sharp on high density displays.

pub mod cache;

pub use cache::GlyphCache;

use egui::Color32;
use image::{Rgba, RgbaImage};
use serde::Serialize;
use std::path::Path;
use thiserror::Error;

use crate::overlay::ContentKind;

/// Logical side of the glyph canvas
pub const CANVAS_SIZE: f32 = 36.0;

/// Highest pixel density glyphs are rendered at
pub const MAX_SCALE: f32 = 8.0;

/// Stroke width in logical units
const LINE_WIDTH: f32 = 1.0;

const RING_CENTER: Point = (18.0, 18.0);
const RING_RADIUS: f32 = 17.5;

const CHECKMARK: [Point; 3] = [(10.0, 18.0), (16.0, 24.0), (27.0, 13.0)];
const CROSS: [(Point, Point); 2] = [((10.0, 10.0), (26.0, 26.0)), ((10.0, 26.0), (26.0, 10.0))];
const INFO_STEM: (Point, Point) = ((18.0, 6.0), (18.0, 22.0));
const INFO_DOT_CENTER: Point = (18.0, 27.0);
const INFO_DOT_RADIUS: f32 = 1.0;

type Point = (f32, f32);

/// Glyph drawn in place of the spinner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GlyphKind {
    Success,
    Error,
    Info,
}

impl GlyphKind {
    pub const ALL: [GlyphKind; 3] = [GlyphKind::Success, GlyphKind::Error, GlyphKind::Info];

    /// Glyph for a content kind; loading and empty content have none
    pub fn for_content(content: ContentKind) -> Option<Self> {
        match content {
            ContentKind::Success => Some(GlyphKind::Success),
            ContentKind::Error => Some(GlyphKind::Error),
            ContentKind::Info => Some(GlyphKind::Info),
            ContentKind::Loading | ContentKind::None => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            GlyphKind::Success => "success",
            GlyphKind::Error => "error",
            GlyphKind::Info => "info",
        }
    }
}

/// Icon export error types
#[derive(Debug, Error)]
pub enum IconError {
    #[error("Failed to write glyph image: {0}")]
    Write(#[from] image::ImageError),
}

/// Primitive shapes making up a glyph
#[derive(Debug, Clone, Copy)]
enum Shape {
    /// Stroked circle outline
    Ring { center: Point, radius: f32 },
    /// Stroked line segment
    Segment { from: Point, to: Point },
    /// Filled disc
    Dot { center: Point, radius: f32 },
}

impl Shape {
    /// Fraction of the pixel at `p` (logical units) covered by the shape
    fn coverage(&self, p: Point, scale: f32) -> f32 {
        let half = LINE_WIDTH / 2.0;
        let signed = match *self {
            Shape::Ring { center, radius } => (distance(p, center) - radius).abs() - half,
            Shape::Segment { from, to } => distance_to_segment(p, from, to) - half,
            Shape::Dot { center, radius } => distance(p, center) - radius,
        };
        // Signed distance converted to device pixels, one pixel of falloff
        (0.5 - signed * scale).clamp(0.0, 1.0)
    }
}

fn distance(a: Point, b: Point) -> f32 {
    ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
}

fn distance_to_segment(p: Point, a: Point, b: Point) -> f32 {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return distance(p, a);
    }
    let t = (((p.0 - a.0) * dx + (p.1 - a.1) * dy) / len_sq).clamp(0.0, 1.0);
    distance(p, (a.0 + t * dx, a.1 + t * dy))
}

fn shapes(kind: GlyphKind) -> Vec<Shape> {
    let mut shapes = vec![Shape::Ring {
        center: RING_CENTER,
        radius: RING_RADIUS,
    }];

    match kind {
        GlyphKind::Success => {
            shapes.extend(CHECKMARK.windows(2).map(|pair| Shape::Segment {
                from: pair[0],
                to: pair[1],
            }));
        }
        GlyphKind::Error => {
            shapes.extend(CROSS.iter().map(|&(from, to)| Shape::Segment { from, to }));
        }
        GlyphKind::Info => {
            shapes.push(Shape::Segment {
                from: INFO_STEM.0,
                to: INFO_STEM.1,
            });
            shapes.push(Shape::Dot {
                center: INFO_DOT_CENTER,
                radius: INFO_DOT_RADIUS,
            });
        }
    }

    shapes
}

/// Pixel side of the canvas at `scale`
pub fn canvas_pixels(scale: f32) -> u32 {
    (CANVAS_SIZE * sanitize_scale(scale)).ceil().max(1.0) as u32
}

fn sanitize_scale(scale: f32) -> f32 {
    if scale.is_finite() && scale > 0.0 {
        scale.min(MAX_SCALE)
    } else {
        1.0
    }
}

/// Render a glyph in `color` at `scale` device pixels per logical unit
///
/// Pure function of its arguments: the same input always yields the same bitmap.
pub fn render_glyph(kind: GlyphKind, color: Color32, scale: f32) -> RgbaImage {
    let scale = sanitize_scale(scale);
    let size = canvas_pixels(scale);
    let shapes = shapes(kind);
    let [r, g, b, a] = color.to_srgba_unmultiplied();

    RgbaImage::from_fn(size, size, |x, y| {
        let p = ((x as f32 + 0.5) / scale, (y as f32 + 0.5) / scale);
        let coverage = shapes
            .iter()
            .map(|shape| shape.coverage(p, scale))
            .fold(0.0f32, f32::max);
        Rgba([r, g, b, (a as f32 * coverage).round() as u8])
    })
}

/// Write a rendered glyph as PNG
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<(), IconError> {
    image.save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alpha(image: &RgbaImage, x: u32, y: u32) -> u8 {
        image.get_pixel(x, y).0[3]
    }

    #[test]
    fn test_canvas_scales_with_density() {
        assert_eq!(canvas_pixels(1.0), 36);
        assert_eq!(canvas_pixels(2.0), 72);
        assert_eq!(canvas_pixels(3.0), 108);
        assert_eq!(canvas_pixels(1.5), 54);
        assert_eq!(canvas_pixels(0.0), 36);
        assert_eq!(canvas_pixels(f32::NAN), 36);
        assert_eq!(canvas_pixels(1.0e9), 288);
    }

    #[test]
    fn test_glyph_for_content() {
        assert_eq!(GlyphKind::for_content(ContentKind::Success), Some(GlyphKind::Success));
        assert_eq!(GlyphKind::for_content(ContentKind::Error), Some(GlyphKind::Error));
        assert_eq!(GlyphKind::for_content(ContentKind::Info), Some(GlyphKind::Info));
        assert_eq!(GlyphKind::for_content(ContentKind::Loading), None);
        assert_eq!(GlyphKind::for_content(ContentKind::None), None);
    }

    #[test]
    fn test_ring_drawn_for_every_glyph() {
        for kind in GlyphKind::ALL {
            let image = render_glyph(kind, Color32::WHITE, 1.0);
            // Rightmost column on the horizontal center line sits on the ring
            assert!(alpha(&image, 35, 17) > 200, "{:?} ring missing", kind);
            // Corners are outside the ring
            assert_eq!(alpha(&image, 0, 0), 0);
            assert_eq!(alpha(&image, 35, 35), 0);
        }
    }

    #[test]
    fn test_success_checkmark() {
        let image = render_glyph(GlyphKind::Success, Color32::WHITE, 2.0);
        // Checkmark vertex at (16, 24)
        assert_eq!(alpha(&image, 31, 47), 255);
        // Ring center is not on the checkmark
        assert_eq!(alpha(&image, 35, 35), 0);
    }

    #[test]
    fn test_error_cross_meets_in_center() {
        let error = render_glyph(GlyphKind::Error, Color32::WHITE, 1.0);
        assert_eq!(alpha(&error, 17, 17), 255);
        // Both diagonals end at the corners of the 10..26 box
        assert!(alpha(&error, 25, 10) > 0);
        assert!(alpha(&error, 10, 25) > 0);

        let checkmark = render_glyph(GlyphKind::Success, Color32::WHITE, 1.0);
        assert_eq!(alpha(&checkmark, 17, 17), 0);
    }

    #[test]
    fn test_info_stem_and_dot() {
        let image = render_glyph(GlyphKind::Info, Color32::BLACK, 2.0);
        // Stem at x = 18 between y = 6 and y = 22
        assert_eq!(alpha(&image, 35, 28), 255);
        // Dot centered at (18, 27)
        assert_eq!(alpha(&image, 35, 53), 255);
        // Gap between stem and dot
        assert_eq!(alpha(&image, 35, 48), 0);
        assert_eq!(image.get_pixel(35, 28).0[..3], [0, 0, 0]);
    }

    #[test]
    fn test_render_is_deterministic() {
        let a = render_glyph(GlyphKind::Info, Color32::WHITE, 3.0);
        let b = render_glyph(GlyphKind::Info, Color32::WHITE, 3.0);
        assert_eq!(a, b);
    }

    #[test]
    fn test_color_is_baked_in() {
        let light = render_glyph(GlyphKind::Success, Color32::BLACK, 1.0);
        let dark = render_glyph(GlyphKind::Success, Color32::WHITE, 1.0);
        assert_ne!(light, dark);
    }

    #[test]
    fn test_strokes_stay_crisp_at_high_density() {
        // At 3x the 1pt stem spans device x 52.5..55.5
        let image = render_glyph(GlyphKind::Info, Color32::WHITE, 3.0);
        let row = 14 * 3;
        assert_eq!(alpha(&image, 53, row), 255);
        assert_eq!(alpha(&image, 54, row), 255);
        assert!((120..=135).contains(&alpha(&image, 52, row)));
        assert!((120..=135).contains(&alpha(&image, 55, row)));
        assert_eq!(alpha(&image, 50, row), 0);
    }

    #[test]
    fn test_save_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("success.png");
        let image = render_glyph(GlyphKind::Success, Color32::WHITE, 2.0);

        save_png(&image, &path).unwrap();

        let loaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(loaded, image);
    }
}
