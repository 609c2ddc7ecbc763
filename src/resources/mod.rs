//! # Resource Loading
//!
//! Fonts, icons and logos, resolved relative to a resource root.
//!
//! Nothing here fails a render: a missing font falls back to the built-in
//! bitmap face, a missing icon to the generic info icon (and from there to a
//! drawn placeholder), and a missing logo is simply left out.
//!
//! ## Modules
//!
//! - [`font`]: outline/bitmap faces and per-script font sets
//! - [`svg`]: SVG icon rasterization and recoloring

pub mod font;
pub mod svg;

pub use font::{Face, FontPair, FontSet, FontSpec};

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use log::{debug, warn};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use crate::error::{Result, TagError};
use crate::specs::GENERIC_ICON;
use crate::style::Color;

type IconKey = (String, u32, Option<Color>);

/// Fonts plus an icon cache, shared by every render of a run.
#[derive(Debug)]
pub struct Resources {
    root: PathBuf,
    fonts: FontSet,
    icons: RwLock<HashMap<IconKey, RgbaImage>>,
}

impl Default for Resources {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Resources {
    pub fn new(root: impl Into<PathBuf>, fonts: FontSet) -> Self {
        Self {
            root: root.into(),
            fonts,
            icons: RwLock::new(HashMap::new()),
        }
    }

    /// Built-in font only, resources resolved from the working directory.
    pub fn builtin() -> Self {
        Self::new(".", FontSet::builtin())
    }

    /// Load fonts from `spec` under `root`.
    pub fn load(root: impl Into<PathBuf>, spec: &FontSpec) -> Self {
        let root = root.into();
        let fonts = FontSet::load(&root, spec);
        Self::new(root, fonts)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn fonts(&self) -> &FontSet {
        &self.fonts
    }

    /// A square icon of `size` pixels. Never fails.
    ///
    /// Tries the asset itself, then an `.svg` sibling, then the generic
    /// icon, then a drawn placeholder circle.
    pub fn load_icon(&self, path: &str, size: u32, tint: Option<Color>) -> RgbaImage {
        let size = size.max(1);
        let key = (path.to_string(), size, tint);
        if let Some(icon) = self
            .icons
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return icon.clone();
        }

        let icon = self
            .resolve_image(path, size, size, tint)
            .or_else(|| {
                if path != GENERIC_ICON {
                    debug!("Icon {} missing, using generic icon", path);
                    self.resolve_image(GENERIC_ICON, size, size, tint)
                } else {
                    None
                }
            })
            .map(|img| center_on_square(&img, size))
            .unwrap_or_else(|| {
                warn!("No icon assets for {}, drawing placeholder", path);
                placeholder_icon(size, tint.unwrap_or(Color::BLACK))
            });

        self.icons
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, icon.clone());
        icon
    }

    /// A logo scaled to fit `max_w` x `max_h`, or `None` with a warning.
    pub fn load_logo(&self, path: &str, max_w: u32, max_h: u32) -> Option<RgbaImage> {
        let logo = self.resolve_image(path, max_w.max(1), max_h.max(1), None);
        if logo.is_none() {
            warn!("Logo {} not found, omitting it", path);
        }
        logo
    }

    fn resolve_image(&self, path: &str, max_w: u32, max_h: u32, tint: Option<Color>) -> Option<RgbaImage> {
        let full = self.root.join(path);
        let svg_sibling = full.with_extension("svg");
        [full, svg_sibling]
            .iter()
            .filter(|p| p.is_file())
            .find_map(|p| match load_file(p, max_w, max_h, tint) {
                Ok(img) => Some(img),
                Err(e) => {
                    warn!("Cannot load {}: {}", p.display(), e);
                    None
                }
            })
    }
}

fn load_file(path: &Path, max_w: u32, max_h: u32, tint: Option<Color>) -> Result<RgbaImage> {
    let is_svg = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));
    if is_svg {
        let source = std::fs::read_to_string(path)?;
        return svg::rasterize(&source, max_w, max_h, tint);
    }

    let decoded = image::open(path)?.to_rgba8();
    if decoded.width() == 0 || decoded.height() == 0 {
        return Err(TagError::Image(format!("{} is empty", path.display())));
    }
    let mut fitted = fit_within(&decoded, max_w, max_h);
    if let Some(color) = tint {
        tint_raster(&mut fitted, color);
    }
    Ok(fitted)
}

/// Resize preserving aspect ratio so the image fits inside the box.
pub fn fit_within(img: &RgbaImage, max_w: u32, max_h: u32) -> RgbaImage {
    let (w, h) = img.dimensions();
    let scale = (max_w as f32 / w as f32).min(max_h as f32 / h as f32);
    let nw = ((w as f32 * scale).round() as u32).clamp(1, max_w.max(1));
    let nh = ((h as f32 * scale).round() as u32).clamp(1, max_h.max(1));
    if (nw, nh) == (w, h) {
        return img.clone();
    }
    imageops::resize(img, nw, nh, FilterType::Triangle)
}

/// Repaint a raster in one color. Dark pixels keep their opacity, light
/// ones fade out, so black-on-white and black-on-transparent icons both work.
pub fn tint_raster(img: &mut RgbaImage, color: Color) {
    for px in img.pixels_mut() {
        let [r, g, b, a] = px.0;
        let luma = (r as f32 * 0.299 + g as f32 * 0.587 + b as f32 * 0.114) / 255.0;
        let alpha = (a as f32 * (1.0 - luma)).round() as u8;
        *px = Rgba([color.0[0], color.0[1], color.0[2], alpha]);
    }
}

fn center_on_square(img: &RgbaImage, size: u32) -> RgbaImage {
    if img.dimensions() == (size, size) {
        return img.clone();
    }
    let mut square = RgbaImage::new(size, size);
    let x = (size.saturating_sub(img.width()) / 2) as i64;
    let y = (size.saturating_sub(img.height()) / 2) as i64;
    imageops::overlay(&mut square, img, x, y);
    square
}

/// Ring with a dot, drawn when not even the generic icon exists.
fn placeholder_icon(size: u32, color: Color) -> RgbaImage {
    let mut img = RgbaImage::new(size, size);
    let c = (size as f32 - 1.0) / 2.0;
    let outer = size as f32 / 2.0;
    let ring = (size as f32 / 10.0).max(1.0);
    let dot = size as f32 / 8.0;
    for (x, y, px) in img.enumerate_pixels_mut() {
        let d = ((x as f32 - c).powi(2) + (y as f32 - c).powi(2)).sqrt();
        if (d <= outer && d >= outer - ring) || d <= dot {
            *px = color.into();
        }
    }
    img
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_icon_draws_placeholder() {
        let res = Resources::new("/definitely/not/here", FontSet::builtin());
        let icon = res.load_icon("icons/cpu.png", 32, None);
        assert_eq!(icon.dimensions(), (32, 32));
        // Center dot is painted, the corner is transparent.
        assert_eq!(icon.get_pixel(16, 16)[3], 255);
        assert_eq!(icon.get_pixel(0, 0)[3], 0);
    }

    #[test]
    fn test_icon_cache_returns_same_image() {
        let res = Resources::builtin();
        let a = res.load_icon("icons/nope.png", 24, Some(Color::rgb(1, 2, 3)));
        let b = res.load_icon("icons/nope.png", 24, Some(Color::rgb(1, 2, 3)));
        assert_eq!(a, b);
        assert_eq!(res.icons.read().unwrap().len(), 1);
    }

    #[test]
    fn test_missing_logo_is_none() {
        let res = Resources::new("/definitely/not/here", FontSet::builtin());
        assert!(res.load_logo("logos/logo_en.png", 100, 50).is_none());
    }

    #[test]
    fn test_fit_within_keeps_aspect() {
        let img = RgbaImage::new(200, 100);
        assert_eq!(fit_within(&img, 50, 50).dimensions(), (50, 25));
    }

    #[test]
    fn test_tint_raster() {
        let mut img = RgbaImage::from_pixel(2, 1, Rgba([0, 0, 0, 255]));
        img.put_pixel(1, 0, Rgba([255, 255, 255, 255]));
        tint_raster(&mut img, Color::rgb(200, 0, 0));
        assert_eq!(img.get_pixel(0, 0).0, [200, 0, 0, 255]);
        assert_eq!(img.get_pixel(1, 0)[3], 0);
    }

    #[test]
    fn test_svg_icon_from_disk() {
        let dir = std::env::temp_dir().join(format!("pricetag-icons-{}", std::process::id()));
        std::fs::create_dir_all(dir.join("icons")).unwrap();
        std::fs::write(
            dir.join("icons/ram.svg"),
            r##"<svg xmlns="http://www.w3.org/2000/svg" width="8" height="8"><rect width="8" height="8" fill="#000"/></svg>"##,
        )
        .unwrap();

        let res = Resources::new(dir.clone(), FontSet::builtin());
        // The .png is absent, its .svg sibling is used.
        let icon = res.load_icon("icons/ram.png", 16, Some(Color::rgb(0, 0, 255)));
        assert_eq!(icon.dimensions(), (16, 16));
        assert_eq!(icon.get_pixel(8, 8).0, [0, 0, 255, 255]);

        std::fs::remove_dir_all(&dir).ok();
    }
}
