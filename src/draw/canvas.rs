//! Raster primitives on RGBA canvases.
//!
//! Everything composites with straight-alpha "source over" and silently clips
//! to the canvas, so layout code can draw partially off-canvas shapes.

use image::{Rgba, RgbaImage, imageops};

use crate::resources::Face;
use crate::style::Color;
use crate::text::visual_order;

/// Blend `color` at `coverage` (0.0..=1.0) onto one pixel.
#[inline]
pub fn blend_pixel(img: &mut RgbaImage, x: i32, y: i32, color: Color, coverage: f32) {
    if x < 0 || y < 0 || x >= img.width() as i32 || y >= img.height() as i32 {
        return;
    }
    let a = color.0[3] as f32 / 255.0 * coverage.clamp(0.0, 1.0);
    if a <= 0.0 {
        return;
    }
    let dst = img.get_pixel_mut(x as u32, y as u32);
    let da = dst[3] as f32 / 255.0;
    let out_a = a + da * (1.0 - a);
    if out_a <= 0.0 {
        return;
    }
    for i in 0..3 {
        let s = color.0[i] as f32;
        let d = dst[i] as f32;
        dst[i] = ((s * a + d * da * (1.0 - a)) / out_a).round() as u8;
    }
    dst[3] = (out_a * 255.0).round() as u8;
}

/// Fill an axis-aligned rectangle.
pub fn fill_rect(img: &mut RgbaImage, x: i32, y: i32, w: u32, h: u32, color: Color) {
    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + w as i32).min(img.width() as i32);
    let y1 = (y + h as i32).min(img.height() as i32);
    for py in y0..y1 {
        for px in x0..x1 {
            blend_pixel(img, px, py, color, 1.0);
        }
    }
}

/// Rectangle outline drawn inside the given bounds.
pub fn stroke_rect(img: &mut RgbaImage, x: i32, y: i32, w: u32, h: u32, thickness: u32, color: Color) {
    let t = thickness.min(w / 2).min(h / 2).max(1);
    fill_rect(img, x, y, w, t, color);
    fill_rect(img, x, y + h as i32 - t as i32, w, t, color);
    fill_rect(img, x, y + t as i32, t, h.saturating_sub(2 * t), color);
    fill_rect(img, x + w as i32 - t as i32, y + t as i32, t, h.saturating_sub(2 * t), color);
}

/// Anti-aliased line segment of the given thickness.
pub fn draw_line(img: &mut RgbaImage, from: (f32, f32), to: (f32, f32), thickness: f32, color: Color) {
    let half = (thickness / 2.0).max(0.5);
    let (x0, y0) = from;
    let (x1, y1) = to;
    let min_x = (x0.min(x1) - half - 1.0).floor() as i32;
    let max_x = (x0.max(x1) + half + 1.0).ceil() as i32;
    let min_y = (y0.min(y1) - half - 1.0).floor() as i32;
    let max_y = (y0.max(y1) + half + 1.0).ceil() as i32;

    let (dx, dy) = (x1 - x0, y1 - y0);
    let len_sq = dx * dx + dy * dy;

    for py in min_y.max(0)..=max_y.min(img.height() as i32 - 1) {
        for px in min_x.max(0)..=max_x.min(img.width() as i32 - 1) {
            let (cx, cy) = (px as f32 + 0.5, py as f32 + 0.5);
            let t = if len_sq > 0.0 {
                (((cx - x0) * dx + (cy - y0) * dy) / len_sq).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let (nx, ny) = (x0 + t * dx, y0 + t * dy);
            let dist = ((cx - nx).powi(2) + (cy - ny).powi(2)).sqrt();
            let coverage = (half + 0.5 - dist).clamp(0.0, 1.0);
            if coverage > 0.0 {
                blend_pixel(img, px, py, color, coverage);
            }
        }
    }
}

/// Fill a polygon (even-odd rule), sampling 4 sub-rows per pixel row.
pub fn fill_polygon(img: &mut RgbaImage, points: &[(f32, f32)], color: Color) {
    if points.len() < 3 {
        return;
    }
    const SUB: usize = 4;
    let min_y = points.iter().map(|p| p.1).fold(f32::INFINITY, f32::min).floor().max(0.0) as i32;
    let max_y = points
        .iter()
        .map(|p| p.1)
        .fold(f32::NEG_INFINITY, f32::max)
        .ceil()
        .min(img.height() as f32) as i32;
    let width = img.width() as usize;
    let mut coverage = vec![0.0f32; width];
    let mut crossings = Vec::with_capacity(points.len());

    for py in min_y..max_y {
        coverage.iter_mut().for_each(|c| *c = 0.0);
        for s in 0..SUB {
            let sy = py as f32 + (s as f32 + 0.5) / SUB as f32;
            crossings.clear();
            for (i, &(ax, ay)) in points.iter().enumerate() {
                let (bx, by) = points[(i + 1) % points.len()];
                if (ay <= sy && by > sy) || (by <= sy && ay > sy) {
                    crossings.push(ax + (sy - ay) / (by - ay) * (bx - ax));
                }
            }
            crossings.sort_by(f32::total_cmp);
            for pair in crossings.chunks_exact(2) {
                let (l, r) = (pair[0].max(0.0), pair[1].min(width as f32));
                if r <= l {
                    continue;
                }
                let start = l.floor() as usize;
                let end = (r.ceil() as usize).min(width);
                for (px, cov) in coverage.iter_mut().enumerate().take(end).skip(start) {
                    let cell_l = (px as f32).max(l);
                    let cell_r = (px as f32 + 1.0).min(r);
                    if cell_r > cell_l {
                        *cov += (cell_r - cell_l) / SUB as f32;
                    }
                }
            }
        }
        for (px, &c) in coverage.iter().enumerate() {
            if c > 0.0 {
                blend_pixel(img, px as i32, py, color, c);
            }
        }
    }
}

/// Filled circle.
pub fn fill_circle(img: &mut RgbaImage, center: (f32, f32), radius: f32, color: Color) {
    let (cx, cy) = center;
    let min_x = (cx - radius - 1.0).floor().max(0.0) as i32;
    let max_x = (cx + radius + 1.0).ceil().min(img.width() as f32 - 1.0) as i32;
    let min_y = (cy - radius - 1.0).floor().max(0.0) as i32;
    let max_y = (cy + radius + 1.0).ceil().min(img.height() as f32 - 1.0) as i32;
    for py in min_y..=max_y {
        for px in min_x..=max_x {
            let d = ((px as f32 + 0.5 - cx).powi(2) + (py as f32 + 0.5 - cy).powi(2)).sqrt();
            let coverage = (radius + 0.5 - d).clamp(0.0, 1.0);
            if coverage > 0.0 {
                blend_pixel(img, px, py, color, coverage);
            }
        }
    }
}

/// Draw one line of text with its line box's top-left at `(x, y)`.
///
/// Right-to-left runs are reordered for display first. Returns the advance width.
pub fn draw_text(img: &mut RgbaImage, face: &Face, size: f32, x: f32, y: f32, text: &str, color: Color) -> f32 {
    let line = visual_order(text);
    let (ox, oy) = (x.round() as i32, y.round() as i32);
    face.rasterize(&line, size, |px, py, coverage| {
        blend_pixel(img, ox + px, oy + py, color, coverage);
    });
    face.text_width(&line, size)
}

/// Draw one line horizontally centered on `center_x`.
pub fn draw_text_centered(
    img: &mut RgbaImage,
    face: &Face,
    size: f32,
    center_x: f32,
    y: f32,
    text: &str,
    color: Color,
) -> f32 {
    let width = face.text_width(text, size);
    draw_text(img, face, size, center_x - width / 2.0, y, text, color)
}

/// Alpha-composite `layer` onto `dst` with its top-left at `(x, y)`.
pub fn composite(dst: &mut RgbaImage, layer: &RgbaImage, x: i64, y: i64) {
    imageops::overlay(dst, layer, x, y);
}

/// Rotate a layer about its center by `degrees` (counter-clockwise on
/// screen), keeping its canvas size. Bilinear sampling, transparent outside.
pub fn rotate_layer(layer: &RgbaImage, degrees: f32) -> RgbaImage {
    let (w, h) = layer.dimensions();
    let mut out = RgbaImage::new(w, h);
    // Screen y points down, so a visual counter-clockwise turn is a
    // clockwise turn in math coordinates.
    let angle = -degrees.to_radians();
    let (sin, cos) = angle.sin_cos();
    let (cx, cy) = (w as f32 / 2.0, h as f32 / 2.0);

    for (x, y, px) in out.enumerate_pixels_mut() {
        let dx = x as f32 + 0.5 - cx;
        let dy = y as f32 + 0.5 - cy;
        // Inverse rotation maps destination back into the source.
        let sx = dx * cos + dy * sin + cx - 0.5;
        let sy = -dx * sin + dy * cos + cy - 0.5;
        *px = sample_bilinear(layer, sx, sy);
    }
    out
}

fn sample_bilinear(img: &RgbaImage, x: f32, y: f32) -> Rgba<u8> {
    let (w, h) = (img.width() as i32, img.height() as i32);
    let x0 = x.floor() as i32;
    let y0 = y.floor() as i32;
    let fx = x - x0 as f32;
    let fy = y - y0 as f32;

    let fetch = |px: i32, py: i32| -> [f32; 4] {
        if px < 0 || py < 0 || px >= w || py >= h {
            return [0.0; 4];
        }
        let p = img.get_pixel(px as u32, py as u32).0;
        let a = p[3] as f32 / 255.0;
        // Premultiply so transparent neighbours do not bleed black.
        [p[0] as f32 * a, p[1] as f32 * a, p[2] as f32 * a, p[3] as f32]
    };

    let taps = [
        (fetch(x0, y0), (1.0 - fx) * (1.0 - fy)),
        (fetch(x0 + 1, y0), fx * (1.0 - fy)),
        (fetch(x0, y0 + 1), (1.0 - fx) * fy),
        (fetch(x0 + 1, y0 + 1), fx * fy),
    ];
    let mut acc = [0.0f32; 4];
    for (p, weight) in taps {
        for i in 0..4 {
            acc[i] += p[i] * weight;
        }
    }
    if acc[3] <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }
    let a = acc[3] / 255.0;
    Rgba([
        (acc[0] / a).round().clamp(0.0, 255.0) as u8,
        (acc[1] / a).round().clamp(0.0, 255.0) as u8,
        (acc[2] / a).round().clamp(0.0, 255.0) as u8,
        acc[3].round().clamp(0.0, 255.0) as u8,
    ])
}

/// Rotate a finished tag a quarter turn clockwise (for rotated sheet cells).
pub fn rotate_quarter(img: &RgbaImage) -> RgbaImage {
    imageops::rotate90(img)
}
