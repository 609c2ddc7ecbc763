//! # Thematic Backgrounds
//!
//! Decorative layers drawn under the tag content: a graph-paper grid, snow
//! flakes, and school doodles. Random placement is seeded from the SKU, so
//! the same item always gets the same background and can be memoized in a
//! [`BackgroundCache`] across the languages of one batch.

use image::RgbaImage;
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::f32::consts::PI;
use std::sync::{Arc, PoisonError, RwLock};

use super::canvas::{draw_line, fill_polygon, fill_rect, stroke_rect};
use crate::style::{Color, StyleConfig};

/// Stable 64-bit seed for a SKU.
pub fn sku_seed(sku: &str) -> u64 {
    sku.bytes().fold(0x9e37_79b9_7f4a_7c15u64, |h, b| {
        let mut x = h ^ b as u64;
        x = x.wrapping_mul(0x0000_0100_0000_01b3);
        x ^= x >> 29;
        x
    })
}

/// Render every enabled background layer onto a transparent canvas.
pub fn render_background(style: &StyleConfig, width: u32, height: u32, sku: &str, scale: f32) -> RgbaImage {
    let mut layer = RgbaImage::new(width, height);
    if width == 0 || height == 0 {
        return layer;
    }
    let accent = style.palette.accent;
    let seed = sku_seed(sku);

    if style.background_grid {
        draw_grid(&mut layer, accent.tint(0.8), scale);
    }
    if style.background_snow {
        draw_snow(&mut layer, accent.tint(0.6).with_alpha(150), scale, seed);
    }
    if style.draw_school_icons {
        draw_school_doodles(&mut layer, accent.tint(0.5).with_alpha(170), scale, seed ^ 0x5c0_01);
    }
    layer
}

fn draw_grid(layer: &mut RgbaImage, color: Color, scale: f32) {
    let step = (40.0 * scale).max(8.0) as u32;
    let line = (2.0 * scale).round().max(1.0) as u32;
    let (w, h) = layer.dimensions();
    for x in (step..w).step_by(step as usize) {
        fill_rect(layer, x as i32, 0, line, h, color);
    }
    for y in (step..h).step_by(step as usize) {
        fill_rect(layer, 0, y as i32, w, line, color);
    }
}

fn draw_snow(layer: &mut RgbaImage, color: Color, scale: f32, seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let (w, h) = layer.dimensions();
    let count = ((w as u64 * h as u64) / 12_000).clamp(8, 600);

    for _ in 0..count {
        let cx = rng.random_range(0.0..w as f32);
        let cy = rng.random_range(0.0..h as f32);
        let r = rng.random_range(4.0..14.0) * scale;
        let turn = rng.random_range(0.0..PI / 3.0);
        // Three crossing strokes make a six-armed flake.
        for arm in 0..3 {
            let a = turn + arm as f32 * PI / 3.0;
            let (dx, dy) = (a.cos() * r, a.sin() * r);
            draw_line(layer, (cx - dx, cy - dy), (cx + dx, cy + dy), (r / 5.0).max(1.0), color);
        }
    }
}

fn draw_school_doodles(layer: &mut RgbaImage, color: Color, scale: f32, seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    let (w, h) = layer.dimensions();
    let count = rng.random_range(6..=10);
    let unit = 30.0 * scale;
    let stroke = (3.0 * scale).max(1.0);

    for _ in 0..count {
        let x = rng.random_range(0.0..w as f32);
        let y = rng.random_range(0.0..h as f32);
        match rng.random_range(0..3) {
            0 => {
                // Pencil: shaft plus tip.
                let angle = rng.random_range(0.0..PI);
                let (dx, dy) = (angle.cos() * unit * 1.5, angle.sin() * unit * 1.5);
                draw_line(layer, (x - dx, y - dy), (x + dx, y + dy), unit * 0.35, color);
                let (nx, ny) = (-angle.sin() * unit * 0.2, angle.cos() * unit * 0.2);
                let tip = (x + dx * 1.35, y + dy * 1.35);
                fill_polygon(layer, &[(x + dx + nx, y + dy + ny), tip, (x + dx - nx, y + dy - ny)], color);
            }
            1 => {
                // Book: cover outline with a spine.
                let bw = (unit * 1.6) as u32;
                let bh = (unit * 2.0) as u32;
                stroke_rect(layer, x as i32, y as i32, bw, bh, stroke as u32, color);
                let spine = x + unit * 0.3;
                draw_line(layer, (spine, y), (spine, y + bh as f32), stroke, color);
            }
            _ => {
                // Ruler with tick marks.
                let rw = (unit * 3.0) as u32;
                let rh = (unit * 0.6) as u32;
                stroke_rect(layer, x as i32, y as i32, rw, rh, stroke as u32, color);
                for i in 1..8 {
                    let tx = x + i as f32 * rw as f32 / 8.0;
                    let len = (if i % 2 == 0 { 0.5 } else { 0.3 }) * rh as f32;
                    draw_line(layer, (tx, y), (tx, y + len), stroke * 0.6, color);
                }
            }
        }
    }
}

/// SKU-keyed memo of rendered background layers.
///
/// Shared by reference across the batch workers. Two workers racing on the
/// same SKU both render and the later insert wins; the layers are identical.
/// An entry whose dimensions differ from the request is re-rendered.
#[derive(Debug, Default)]
pub struct BackgroundCache {
    layers: RwLock<HashMap<String, Arc<RgbaImage>>>,
}

impl BackgroundCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached layer for `sku` at `(width, height)`, rendering it on a miss.
    pub fn get_or_render(
        &self,
        sku: &str,
        (width, height): (u32, u32),
        render: impl FnOnce() -> RgbaImage,
    ) -> Arc<RgbaImage> {
        if let Some(layer) = self
            .layers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(sku)
            .filter(|l| l.dimensions() == (width, height))
        {
            debug!("Background cache hit for {}", sku);
            return Arc::clone(layer);
        }

        let layer = Arc::new(render());
        self.layers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(sku.to_string(), Arc::clone(&layer));
        layer
    }

    pub fn len(&self) -> usize {
        self.layers.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.layers.write().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::ThemeConfig;

    fn snowy() -> StyleConfig {
        StyleConfig {
            background_snow: true,
            ..StyleConfig::from_theme(&ThemeConfig::baseline())
        }
    }

    #[test]
    fn test_background_is_deterministic_per_sku() {
        let a = render_background(&snowy(), 200, 300, "SKU-1", 0.5);
        let b = render_background(&snowy(), 200, 300, "SKU-1", 0.5);
        let c = render_background(&snowy(), 200, 300, "SKU-2", 0.5);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.pixels().any(|p| p[3] > 0));
    }

    #[test]
    fn test_no_flags_means_empty_layer() {
        let layer = render_background(&StyleConfig::default(), 50, 50, "x", 1.0);
        assert!(layer.pixels().all(|p| p[3] == 0));
    }

    #[test]
    fn test_empty_canvas_draws_nothing() {
        let style = StyleConfig {
            background_grid: true,
            background_snow: true,
            draw_school_icons: true,
            ..StyleConfig::default()
        };
        assert_eq!(render_background(&style, 0, 300, "S", 1.0).dimensions(), (0, 300));
        assert_eq!(render_background(&style, 300, 0, "S", 1.0).dimensions(), (300, 0));
    }

    #[test]
    fn test_grid_and_doodles_draw() {
        let style = StyleConfig {
            background_grid: true,
            draw_school_icons: true,
            ..StyleConfig::default()
        };
        let layer = render_background(&style, 300, 300, "S", 1.0);
        // Grid line at x = 40.
        assert!(layer.get_pixel(40, 5)[3] > 0);
    }

    #[test]
    fn test_cache_hits_and_dimension_mismatch() {
        let cache = BackgroundCache::new();
        let mut renders = 0;
        let mut get = |dims: (u32, u32)| {
            cache.get_or_render("A", dims, || {
                renders += 1;
                RgbaImage::new(dims.0, dims.1)
            })
        };
        get((10, 10));
        get((10, 10));
        get((20, 10));
        assert_eq!(renders, 2);
        assert_eq!(cache.len(), 1);
    }
}
