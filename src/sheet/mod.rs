//! # Sheet Packing
//!
//! Tiles finished tags onto print sheets.
//!
//! ```text
//! fit_count(sheet, w, h) ─→ FitResult { count, cols, rows, cell, rotated }
//!                                 │
//! tags ──chunks(count)──→ pack_grid ─→ one sheet per chunk   (pack_batch)
//!
//! pack_pair(a, b):  side by side → stacked → two sheets
//! pack_single(t):   one centered tag
//! ```
//!
//! Sheets are white RGBA canvases at the sheet's exact 300 DPI pixel size.

use image::{Rgba, RgbaImage};
use log::debug;
use serde::Serialize;

use crate::draw::{composite, rotate_quarter};
use crate::error::{Result, TagError};
use crate::paper::{SheetSize, cm_to_px};

/// How a tag size tiles a sheet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FitResult {
    /// Tags per sheet; 0 means the size cannot be printed on this sheet.
    pub count: usize,
    pub cols: u32,
    pub rows: u32,
    /// Pixel size of one grid cell (already swapped when rotated).
    pub cell_w: u32,
    pub cell_h: u32,
    /// Tags are turned a quarter turn to fit more per sheet.
    pub rotated: bool,
    /// Tag size the fit was computed for.
    pub tag_cm: (f32, f32),
}

impl FitResult {
    fn none(tag_cm: (f32, f32)) -> Self {
        Self {
            count: 0,
            cols: 0,
            rows: 0,
            cell_w: 0,
            cell_h: 0,
            rotated: false,
            tag_cm,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    fn degenerate(&self) -> TagError {
        TagError::DegenerateSize {
            width_cm: self.tag_cm.0,
            height_cm: self.tag_cm.1,
        }
    }
}

/// Tags that fit along one axis. Tolerates float noise on exact fits.
fn per_axis(sheet_cm: f32, tag_cm: f32) -> u32 {
    ((sheet_cm + 1e-4) / tag_cm).floor().max(0.0) as u32
}

/// Compare the portrait and the rotated grid and keep the one holding more
/// tags. Ties keep portrait. Zero, negative or NaN dimensions fit zero times.
pub fn fit_count(sheet: &SheetSize, width_cm: f32, height_cm: f32) -> FitResult {
    let tag_cm = (width_cm, height_cm);
    if !(width_cm > 0.0 && height_cm > 0.0) {
        return FitResult::none(tag_cm);
    }

    let (pc, pr) = (per_axis(sheet.width_cm, width_cm), per_axis(sheet.height_cm, height_cm));
    let (rc, rr) = (per_axis(sheet.width_cm, height_cm), per_axis(sheet.height_cm, width_cm));
    let portrait = pc as usize * pr as usize;
    let rotated = rc as usize * rr as usize;

    let fit = if rotated > portrait {
        FitResult {
            count: rotated,
            cols: rc,
            rows: rr,
            cell_w: cm_to_px(height_cm),
            cell_h: cm_to_px(width_cm),
            rotated: true,
            tag_cm,
        }
    } else if portrait > 0 {
        FitResult {
            count: portrait,
            cols: pc,
            rows: pr,
            cell_w: cm_to_px(width_cm),
            cell_h: cm_to_px(height_cm),
            rotated: false,
            tag_cm,
        }
    } else {
        FitResult::none(tag_cm)
    };
    debug!(
        "{}x{}cm on {}: {} per sheet ({}x{}, rotated: {})",
        width_cm, height_cm, sheet.name, fit.count, fit.cols, fit.rows, fit.rotated
    );
    fit
}

fn blank_sheet(sheet: &SheetSize) -> RgbaImage {
    let (w, h) = sheet.pixel_size();
    RgbaImage::from_pixel(w, h, Rgba([255, 255, 255, 255]))
}

/// Offset that centers `inner` within `outer` (negative when it overflows).
#[inline]
fn centered(outer: u32, inner: u32) -> i64 {
    (outer as i64 - inner as i64) / 2
}

/// Lay up to `fit.count` tags out left to right, top to bottom, with the
/// whole grid centered on the sheet. Extra tags are ignored.
pub fn pack_grid(tags: &[RgbaImage], fit: &FitResult, sheet: &SheetSize) -> Result<RgbaImage> {
    if fit.is_empty() {
        return Err(fit.degenerate());
    }
    let mut canvas = blank_sheet(sheet);
    let grid_w = fit.cols * fit.cell_w;
    let grid_h = fit.rows * fit.cell_h;
    let origin_x = centered(canvas.width(), grid_w);
    let origin_y = centered(canvas.height(), grid_h);

    for (i, tag) in tags.iter().take(fit.count).enumerate() {
        let col = (i as u32 % fit.cols) as i64;
        let row = (i as u32 / fit.cols) as i64;
        let turned;
        let tag = if fit.rotated {
            turned = rotate_quarter(tag);
            &turned
        } else {
            tag
        };
        let x = origin_x + col * fit.cell_w as i64 + centered(fit.cell_w, tag.width());
        let y = origin_y + row * fit.cell_h as i64 + centered(fit.cell_h, tag.height());
        composite(&mut canvas, tag, x, y);
    }
    Ok(canvas)
}

/// Pack any number of tags: `ceil(len / count)` sheets, in input order.
pub fn pack_batch(tags: &[RgbaImage], fit: &FitResult, sheet: &SheetSize) -> Result<Vec<RgbaImage>> {
    if fit.is_empty() {
        return Err(fit.degenerate());
    }
    tags.chunks(fit.count)
        .map(|chunk| pack_grid(chunk, fit, sheet))
        .collect()
}

/// Two tags of one item (one per language).
///
/// Side by side when both widths fit across the sheet, else stacked when
/// both heights fit down it, else one sheet each. The order is fixed: side
/// by side wins when both would work.
pub fn pack_pair(a: &RgbaImage, b: &RgbaImage, sheet: &SheetSize) -> Vec<RgbaImage> {
    let (sw, sh) = sheet.pixel_size();

    if a.width() + b.width() <= sw {
        let mut canvas = blank_sheet(sheet);
        let x = centered(sw, a.width() + b.width());
        composite(&mut canvas, a, x, centered(sh, a.height()));
        composite(&mut canvas, b, x + a.width() as i64, centered(sh, b.height()));
        return vec![canvas];
    }

    if a.height() + b.height() <= sh {
        let mut canvas = blank_sheet(sheet);
        let y = centered(sh, a.height() + b.height());
        composite(&mut canvas, a, centered(sw, a.width()), y);
        composite(&mut canvas, b, centered(sw, b.width()), y + a.height() as i64);
        return vec![canvas];
    }

    vec![pack_single(a, sheet), pack_single(b, sheet)]
}

/// One tag centered on a sheet.
pub fn pack_single(tag: &RgbaImage, sheet: &SheetSize) -> RgbaImage {
    let mut canvas = blank_sheet(sheet);
    let x = centered(canvas.width(), tag.width());
    let y = centered(canvas.height(), tag.height());
    composite(&mut canvas, tag, x, y);
    canvas
}
