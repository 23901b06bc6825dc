//! Preview image of a shape document
//!
//! Renders the visible shapes and drilling holes with tiny-skia, fitted to
//! the image with a margin, for attaching to an order.

use crate::geometry::{self, BoundingBox};
use crate::model::ShapeDocument;
use image::{ImageFormat, Rgb, RgbImage};
use std::io::Cursor;
use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, Stroke, Transform};

/// Default preview size in pixels
pub const PREVIEW_SIZE: (u32, u32) = (800, 600);

const MARGIN: f32 = 24.0;

fn bg_color() -> Color {
    Color::from_rgba8(255, 255, 255, 255)
}
fn plate_color() -> Color {
    Color::from_rgba8(189, 195, 199, 255)
}
fn outline_color() -> Color {
    Color::from_rgba8(44, 62, 80, 255)
}
fn hole_color() -> Color {
    Color::from_rgba8(231, 76, 60, 255)
}

fn document_bounds(document: &ShapeDocument) -> Option<BoundingBox> {
    let mut points: Vec<_> = document
        .shapes
        .iter()
        .filter(|s| s.visible)
        .flat_map(|s| s.points())
        .collect();
    points.extend(document.holes.iter().map(|h| h.position()));
    geometry::bounding_box(&points)
}

/// Render the document to an RGB image.
pub fn render_preview(document: &ShapeDocument, width: u32, height: u32) -> RgbImage {
    let Some(mut pixmap) = Pixmap::new(width, height) else {
        return RgbImage::new(width, height);
    };
    pixmap.fill(bg_color());

    if let Some(bounds) = document_bounds(document) {
        // Fit world -> screen, keeping aspect ratio, centred.
        let avail_w = (width as f32 - 2.0 * MARGIN).max(1.0);
        let avail_h = (height as f32 - 2.0 * MARGIN).max(1.0);
        let bw = bounds.width().max(1.0) as f32;
        let bh = bounds.height().max(1.0) as f32;
        let scale = (avail_w / bw).min(avail_h / bh);
        let offset_x = (width as f32 - bw * scale) / 2.0 - bounds.min_x as f32 * scale;
        let offset_y = (height as f32 - bh * scale) / 2.0 - bounds.min_y as f32 * scale;
        let transform = Transform::from_scale(scale, scale).post_translate(offset_x, offset_y);

        let mut fill = Paint::default();
        fill.set_color(plate_color());
        fill.anti_alias = true;
        let mut outline = Paint::default();
        outline.set_color(outline_color());
        outline.anti_alias = true;
        let stroke = Stroke {
            width: 2.0 / scale,
            ..Default::default()
        };

        for shape in document.shapes.iter().filter(|s| s.visible) {
            let mut pb = PathBuilder::new();
            for (i, p) in shape.points().iter().enumerate() {
                if i == 0 {
                    pb.move_to(p.x as f32, p.y as f32);
                } else {
                    pb.line_to(p.x as f32, p.y as f32);
                }
            }
            if shape.closed {
                pb.close();
            }
            if let Some(path) = pb.finish() {
                if shape.closed {
                    pixmap.fill_path(&path, &fill, FillRule::EvenOdd, transform, None);
                }
                pixmap.stroke_path(&path, &outline, &stroke, transform, None);
            }
        }

        let mut hole_paint = Paint::default();
        hole_paint.set_color(hole_color());
        hole_paint.anti_alias = true;
        for hole in &document.holes {
            let radius = (hole.diameter / 2.0) as f32;
            if let Some(path) = PathBuilder::from_circle(hole.x as f32, hole.y as f32, radius) {
                pixmap.fill_path(&path, &hole_paint, FillRule::Winding, transform, None);
            }
        }
    }

    // Convert Pixmap to RgbImage
    let data = pixmap.data();
    RgbImage::from_fn(width, height, |x, y| {
        let idx = ((y * width + x) * 4) as usize;
        Rgb([data[idx], data[idx + 1], data[idx + 2]])
    })
}

/// Render the document and encode it as PNG.
pub fn render_preview_png(
    document: &ShapeDocument,
    width: u32,
    height: u32,
) -> Result<Vec<u8>, image::ImageError> {
    let image = render_preview(document, width, height);
    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
    Ok(bytes)
}
