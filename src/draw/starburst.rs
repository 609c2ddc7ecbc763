//! # Sale Starburst
//!
//! A 12-point star with a short label ("SALE", "SPECIAL") across it, drawn
//! on its own transparent layer, tilted, then composited so the tilt never
//! touches the rest of the tag.

use image::RgbaImage;
use std::f32::consts::{PI, TAU};

use super::canvas::{composite, draw_text_centered, rotate_layer};
use crate::resources::FontSet;
use crate::style::Color;
use crate::text::fit_wrapped;

/// Number of outer points.
pub const STAR_POINTS: usize = 12;

/// Outer radius at scale 1.0, in pixels.
pub const BASE_OUTER_RADIUS: f32 = 80.0;

/// Inner valley radius as a fraction of the outer radius.
pub const INNER_RATIO: f32 = 0.7;

/// Tilt applied to the star layer, in degrees (negative turns clockwise).
pub const TILT_DEGREES: f32 = -25.0;

/// Whether a point relative to the star center lies inside it.
///
/// The edge radius is interpolated linearly between the outer tip and the
/// inner valley across each sector; the first tip points straight up.
pub fn is_inside_star(dx: f32, dy: f32, outer_r: f32, inner_r: f32, points: usize) -> bool {
    let dist = (dx * dx + dy * dy).sqrt();
    if dist > outer_r {
        return false;
    }
    if dist <= inner_r {
        return true;
    }

    let sector = TAU / points.max(2) as f32;
    let half = sector / 2.0;
    let adjusted = (dy.atan2(dx) + PI / 2.0).rem_euclid(TAU);
    let local = adjusted.rem_euclid(sector);

    let edge = if local < half {
        let t = local / half;
        outer_r * (1.0 - t) + inner_r * t
    } else {
        let t = (local - half) / half;
        inner_r * (1.0 - t) + outer_r * t
    };
    dist <= edge
}

/// Paint a star into a transparent square layer, 2x2 supersampled.
fn star_layer(outer_r: f32, fill: Color) -> RgbaImage {
    let size = (outer_r * 2.0).ceil() as u32 + 4;
    let mut layer = RgbaImage::new(size, size);
    let c = size as f32 / 2.0;
    let inner_r = outer_r * INNER_RATIO;
    let offsets = [0.25f32, 0.75];

    for (x, y, px) in layer.enumerate_pixels_mut() {
        let hits = offsets
            .iter()
            .flat_map(|ox| offsets.iter().map(move |oy| (*ox, *oy)))
            .filter(|(ox, oy)| {
                is_inside_star(x as f32 + ox - c, y as f32 + oy - c, outer_r, inner_r, STAR_POINTS)
            })
            .count();
        if hits > 0 {
            let alpha = (fill.0[3] as f32 * hits as f32 / 4.0).round() as u8;
            *px = fill.with_alpha(alpha).into();
        }
    }
    layer
}

/// Draw a tilted starburst centered at `center`.
pub fn draw_starburst(
    canvas: &mut RgbaImage,
    fonts: &FontSet,
    center: (f32, f32),
    scale: f32,
    fill: Color,
    label: &str,
    label_color: Color,
) {
    let outer_r = (BASE_OUTER_RADIUS * scale).max(8.0);
    let mut layer = star_layer(outer_r, fill);

    // Label fits the inscribed circle of the valleys.
    let face = fonts.face_for(label, true);
    let max_w = outer_r * INNER_RATIO * 1.6;
    let fitted = fit_wrapped(label, face, outer_r * 0.45, outer_r * 0.15, max_w, 2);
    let c = layer.width() as f32 / 2.0;
    let mut y = c - fitted.height() / 2.0;
    for line in &fitted.lines {
        draw_text_centered(&mut layer, face, fitted.size, c, y, line, label_color);
        y += fitted.line_height;
    }

    let tilted = rotate_layer(&layer, TILT_DEGREES);
    let x = (center.0 - c).round() as i64;
    let y = (center.1 - c).round() as i64;
    composite(canvas, &tilted, x, y);
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_star_center_and_tips() {
        assert!(is_inside_star(0.0, 0.0, 80.0, 56.0, 12));
        // First tip points up.
        assert!(is_inside_star(0.0, -79.0, 80.0, 56.0, 12));
        // Half a sector over is a valley: beyond the inner radius is outside.
        let valley = -PI / 2.0 + TAU / 24.0;
        assert!(!is_inside_star(70.0 * valley.cos(), 70.0 * valley.sin(), 80.0, 56.0, 12));
        assert!(!is_inside_star(81.0, 0.0, 80.0, 56.0, 12));
    }

    #[test]
    fn test_star_layer_coverage() {
        let layer = star_layer(40.0, Color::rgb(200, 0, 0));
        let filled = layer.pixels().filter(|p| p[3] > 0).count() as f32;
        let total = (layer.width() * layer.height()) as f32;
        // Between the inner disc and the outer disc.
        let inner = PI * 28.0 * 28.0;
        let outer = PI * 40.0 * 40.0;
        assert!(filled > inner && filled < outer, "{} of {}", filled, total);
    }

    #[test]
    fn test_draw_starburst_paints_around_center() {
        let mut canvas = RgbaImage::from_pixel(300, 300, Rgba([255, 255, 255, 255]));
        draw_starburst(
            &mut canvas,
            &FontSet::builtin(),
            (150.0, 150.0),
            1.0,
            Color::rgb(214, 40, 40),
            "SALE",
            Color::WHITE,
        );
        // Inside the inner disc but away from the label stays star-colored.
        assert_eq!(canvas.get_pixel(150, 105).0, [214, 40, 40, 255]);
        assert_eq!(canvas.get_pixel(2, 2).0, [255, 255, 255, 255]);
    }
}
