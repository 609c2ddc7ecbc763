//! Building blocks shared by the layout strategies: the scaling law, text
//! blocks, spec columns, the price block, logos and the sale badge.

use image::RgbaImage;
use log::warn;
use std::sync::Arc;

use super::TagContext;
use crate::draw::{composite, draw_line, draw_starburst, draw_text, qr_image, render_background};
use crate::record::{PriceDisplay, PriceInfo, format_amount};
use crate::resources::{Face, FontSet, Resources};
use crate::specs::{icon_for, is_warranty};
use crate::style::{Color, Palette};
use crate::text::{FittedText, fit_wrapped};

/// Physical size the standard layout is designed at.
pub const STANDARD_BASE_CM: (f32, f32) = (10.0, 15.0);

/// Physical size the small layouts are designed at.
pub const ACCESSORY_BASE_CM: (f32, f32) = (6.0, 4.0);

/// Physical size the keyboard layout is designed at.
pub const KEYBOARD_BASE_CM: (f32, f32) = (20.0, 6.0);

/// Star fill for the "special" badge.
pub const SPECIAL_COLOR: Color = Color::rgb(0x6A, 0x1B, 0x9A);

/// `sqrt(area / base_area)`, so bigger tags get bigger content, not just more.
pub fn scale_for(width_cm: f32, height_cm: f32, base: (f32, f32)) -> f32 {
    let area = (width_cm * height_cm).max(0.0);
    let base_area = base.0 * base.1;
    (area / base_area).sqrt().max(0.1)
}

/// A layout box in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w: w.max(0.0), h: h.max(0.0) }
    }

    /// Whole canvas.
    pub fn of(img: &RgbaImage) -> Self {
        Self::new(0.0, 0.0, img.width() as f32, img.height() as f32)
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.w / 2.0
    }

    /// Shrink by `m` on every side.
    pub fn inset(&self, m: f32) -> Self {
        Self::new(self.x + m, self.y + m, self.w - 2.0 * m, self.h - 2.0 * m)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

impl Align {
    fn x_for(self, rect: &Rect, width: f32) -> f32 {
        match self {
            Align::Left => rect.x,
            Align::Center => rect.center_x() - width / 2.0,
            Align::Right => rect.right() - width,
        }
    }
}

/// Draw already wrapped lines from `y` down. Returns the block height.
pub fn draw_lines(
    canvas: &mut RgbaImage,
    face: &Face,
    fitted: &FittedText,
    rect: &Rect,
    y: f32,
    align: Align,
    color: Color,
) -> f32 {
    let mut line_y = y;
    for line in &fitted.lines {
        let x = align.x_for(rect, face.text_width(line, fitted.size));
        draw_text(canvas, face, fitted.size, x, line_y, line, color);
        line_y += fitted.line_height;
    }
    fitted.height()
}

/// Fit `text` into `rect.w` and at most `max_lines`, then draw it.
#[allow(clippy::too_many_arguments)]
pub fn draw_fitted(
    canvas: &mut RgbaImage,
    fonts: &FontSet,
    text: &str,
    bold: bool,
    size: f32,
    rect: &Rect,
    y: f32,
    max_lines: usize,
    align: Align,
    color: Color,
) -> f32 {
    if text.trim().is_empty() {
        return 0.0;
    }
    let face = fonts.face_for(text, bold);
    let fitted = fit_wrapped(text, face, size, size * 0.55, rect.w, max_lines);
    draw_lines(canvas, face, &fitted, rect, y, align, color)
}

// ---- Specs ----

/// Look of spec rows.
#[derive(Debug, Clone, Copy)]
pub struct SpecStyle {
    pub font_size: f32,
    pub icon_size: u32,
    /// Space between icon and text, and below each row.
    pub gap: f32,
    pub color: Color,
    pub icon_tint: Option<Color>,
    pub max_lines: usize,
}

/// One spec, wrapped for a given column width.
#[derive(Debug, Clone)]
pub struct SpecRow {
    pub text: String,
    pub fitted: FittedText,
    pub height: f32,
}

/// Wrap a spec next to its icon.
pub fn layout_spec(fonts: &FontSet, spec: &str, style: &SpecStyle, width: f32) -> SpecRow {
    let face = fonts.face_for(spec, false);
    let text_w = (width - style.icon_size as f32 - style.gap).max(1.0);
    let fitted = fit_wrapped(
        spec,
        face,
        style.font_size,
        style.font_size * 0.8,
        text_w,
        style.max_lines,
    );
    let height = fitted.height().max(style.icon_size as f32) + style.gap;
    SpecRow {
        text: spec.to_string(),
        fitted,
        height,
    }
}

/// Draw a spec row with its top-left at `(x, y)`.
pub fn draw_spec(canvas: &mut RgbaImage, resources: &Resources, row: &SpecRow, style: &SpecStyle, x: f32, y: f32) {
    let icon = resources.load_icon(icon_for(&row.text), style.icon_size, style.icon_tint);
    let icon_y = y + ((row.fitted.height() - style.icon_size as f32) / 2.0).max(0.0);
    composite(canvas, &icon, x.round() as i64, icon_y.round() as i64);

    let face = resources.fonts().face_for(&row.text, false);
    let text_x = x + style.icon_size as f32 + style.gap;
    let text_y = y + ((style.icon_size as f32 - row.fitted.height()) / 2.0).max(0.0);
    let rect = Rect::new(text_x, y, f32::MAX / 4.0, row.height);
    draw_lines(canvas, face, &row.fitted, &rect, text_y, Align::Left, style.color);
}

/// Pick which specs to draw in one column, in draw order.
///
/// Normal specs are taken in order until `limit` is reached or the next
/// one would overflow `budget`. Warranty specs come last: each is appended
/// while it fits; if the column is already full, the last drawn normal spec
/// is swapped for the first warranty spec once, provided the warranty still
/// fits in its place.
pub fn fit_spec_column(specs: &[String], heights: &[f32], budget: f32, limit: usize) -> Vec<usize> {
    let (warranty, normal): (Vec<usize>, Vec<usize>) =
        (0..specs.len().min(heights.len())).partition(|&i| is_warranty(&specs[i]));

    let mut chosen = Vec::new();
    let mut used = 0.0f32;
    for i in normal {
        if chosen.len() >= limit || used + heights[i] > budget {
            break;
        }
        chosen.push(i);
        used += heights[i];
    }

    let mut swapped = false;
    for w in warranty {
        if chosen.len() < limit && used + heights[w] <= budget {
            chosen.push(w);
            used += heights[w];
            continue;
        }
        if swapped {
            break;
        }
        match chosen.last().copied() {
            Some(last) if !is_warranty(&specs[last]) && used - heights[last] + heights[w] <= budget => {
                used += heights[w] - heights[last];
                if let Some(slot) = chosen.last_mut() {
                    *slot = w;
                }
                swapped = true;
            }
            _ => break,
        }
    }
    chosen
}

/// Two-column packing: the first column fills up, the rest flows into the
/// second. `reserve` is kept free at the bottom of the second column.
pub fn split_columns(
    specs: &[String],
    heights: &[f32],
    budget: f32,
    limit: usize,
    reserve: f32,
) -> (Vec<usize>, Vec<usize>) {
    // Same ordering as a single column: normal specs, then warranty.
    let order: Vec<usize> = {
        let (w, n): (Vec<usize>, Vec<usize>) =
            (0..specs.len().min(heights.len())).partition(|&i| is_warranty(&specs[i]));
        n.into_iter().chain(w).collect()
    };

    let mut first = Vec::new();
    let mut second = Vec::new();
    let mut used = 0.0f32;
    let mut in_second = false;

    for i in order {
        if first.len() + second.len() >= limit {
            break;
        }
        if !in_second {
            if used + heights[i] <= budget {
                first.push(i);
                used += heights[i];
                continue;
            }
            in_second = true;
            used = 0.0;
        }
        if used + heights[i] > budget - reserve {
            break;
        }
        second.push(i);
        used += heights[i];
    }
    (first, second)
}

// ---- Price block ----

/// Price strings ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceTexts {
    /// Large price (sale price during a sale).
    pub main: Option<String>,
    /// Struck-through regular price, only during a sale.
    pub struck: Option<String>,
    pub on_sale: bool,
}

impl PriceTexts {
    pub fn new(info: &PriceInfo, currency: impl Fn(&str) -> String) -> Self {
        match info.display() {
            PriceDisplay::Sale { sale, regular } => Self {
                main: Some(currency(&format_amount(sale))),
                struck: Some(currency(&format_amount(regular))),
                on_sale: true,
            },
            PriceDisplay::Single(v) => Self {
                main: Some(currency(&format_amount(v))),
                struck: None,
                on_sale: false,
            },
            PriceDisplay::Raw(raw) => Self {
                main: Some(raw),
                struck: None,
                on_sale: false,
            },
            PriceDisplay::None => Self {
                main: None,
                struck: None,
                on_sale: false,
            },
        }
    }

    /// Height the block needs at `size`.
    pub fn height(&self, fonts: &FontSet, size: f32) -> f32 {
        let main = if self.main.is_some() {
            fonts.default_face(true).line_height(size)
        } else {
            0.0
        };
        let struck = if self.struck.is_some() {
            fonts.default_face(false).line_height(size * STRUCK_RATIO)
        } else {
            0.0
        };
        main + struck
    }
}

/// Struck-through regular price size relative to the main price.
pub const STRUCK_RATIO: f32 = 0.45;

/// Draw the price block: the main price, and during a sale the regular
/// price under it in the muted color with a line through it. The main price
/// shrinks to fit `rect.w`. Returns the height used.
#[allow(clippy::too_many_arguments)]
pub fn draw_price_block(
    canvas: &mut RgbaImage,
    fonts: &FontSet,
    palette: &Palette,
    texts: &PriceTexts,
    rect: &Rect,
    y: f32,
    size: f32,
    align: Align,
) -> f32 {
    let mut cursor = y;
    if let Some(main) = &texts.main {
        let face = fonts.face_for(main, true);
        let color = if texts.on_sale { palette.accent } else { palette.price };
        let fitted = fit_wrapped(main, face, size, size * 0.4, rect.w, 1);
        cursor += draw_lines(canvas, face, &fitted, rect, cursor, align, color);
    }
    if let Some(struck) = &texts.struck {
        let small = size * STRUCK_RATIO;
        let face = fonts.face_for(struck, false);
        let width = face.text_width(struck, small);
        let x = align.x_for(rect, width);
        draw_text(canvas, face, small, x, cursor, struck, palette.strikethrough);

        let mid = cursor + face.ascent(small) * 0.65;
        let thickness = (small / 12.0).max(1.0);
        draw_line(canvas, (x, mid), (x + width, mid), thickness, palette.strikethrough);
        cursor += face.line_height(small);
    }
    cursor - y
}

// ---- Logo and badge ----

/// Draw the language's logo inside `rect`. Returns the drawn height, 0 when
/// the logo is missing.
pub fn draw_logo(canvas: &mut RgbaImage, ctx: &TagContext<'_>, rect: &Rect, align: Align) -> f32 {
    let Some(path) = ctx.style.logo_for(ctx.language) else {
        return 0.0;
    };
    let Some(logo) = ctx
        .resources
        .load_logo(path, rect.w.max(1.0) as u32, rect.h.max(1.0) as u32)
    else {
        return 0.0;
    };
    let x = align.x_for(rect, logo.width() as f32);
    composite(canvas, &logo, x.round() as i64, rect.y.round() as i64);
    logo.height() as f32
}

/// Starburst for sales and specials. Special wins over sale.
pub fn draw_badge(canvas: &mut RgbaImage, ctx: &TagContext<'_>, on_sale: bool, center: (f32, f32), scale: f32) {
    let (label, fill) = if ctx.special {
        (&ctx.labels.special, SPECIAL_COLOR)
    } else if on_sale {
        (&ctx.labels.sale, ctx.style.palette.accent)
    } else {
        return;
    };
    draw_starburst(
        canvas,
        ctx.resources.fonts(),
        center,
        scale,
        fill,
        label,
        Color::WHITE,
    );
}

/// Composite the theme's background layers, through the cache when given.
pub fn draw_background(canvas: &mut RgbaImage, ctx: &TagContext<'_>, scale: f32) {
    if !ctx.style.has_background() {
        return;
    }
    let (w, h) = canvas.dimensions();
    let sku = ctx.record.sku.trim();
    let render = || render_background(ctx.style, w, h, sku, scale);
    let layer = match ctx.backgrounds {
        Some(cache) => cache.get_or_render(sku, (w, h), render),
        None => Arc::new(render()),
    };
    composite(canvas, &layer, 0, 0);
}

/// Draw the record's QR code with its top-left at `(x, y)`.
///
/// Returns whether a code was drawn; data too long for a QR code is logged
/// and skipped.
pub fn draw_qr(canvas: &mut RgbaImage, ctx: &TagContext<'_>, x: f32, y: f32, size: u32) -> bool {
    let Some(url) = ctx.record.qr_url() else {
        return false;
    };
    match qr_image(url, size, ctx.style.palette.text) {
        Ok(code) => {
            composite(canvas, &code, x.round() as i64, y.round() as i64);
            true
        }
        Err(e) => {
            warn!("Skipping QR code for {}: {}", ctx.record.sku, e);
            false
        }
    }
}

/// SKU and part number footer runs, each sized by its own scale factor.
///
/// Both runs share one row when they fit side by side, otherwise the part
/// number goes on a second row.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentityLine {
    pub sku: String,
    pub sku_size: f32,
    pub part: Option<String>,
    pub part_size: f32,
}

impl IdentityLine {
    /// `base` is the size-scaled font size before the per-run factors.
    pub fn of(ctx: &TagContext<'_>, base: f32) -> Self {
        Self {
            sku: format!("{}: {}", ctx.labels.sku, ctx.record.sku.trim()),
            sku_size: base * ctx.layout.sku,
            part: ctx
                .record
                .part_number()
                .map(|pn| format!("{}: {}", ctx.labels.part_number, pn)),
            part_size: base * ctx.layout.part_number,
        }
    }

    fn gap(&self) -> f32 {
        self.sku_size.min(self.part_size)
    }

    fn widths(&self, fonts: &FontSet) -> (f32, f32) {
        let sku_w = fonts.face_for(&self.sku, false).text_width(&self.sku, self.sku_size);
        let part_w = self
            .part
            .as_deref()
            .map_or(0.0, |p| fonts.face_for(p, false).text_width(p, self.part_size));
        (sku_w, part_w)
    }

    fn line_heights(&self, fonts: &FontSet) -> (f32, f32) {
        let sku_h = fonts.face_for(&self.sku, false).line_height(self.sku_size);
        let part_h = self
            .part
            .as_deref()
            .map_or(0.0, |p| fonts.face_for(p, false).line_height(self.part_size));
        (sku_h, part_h)
    }

    fn one_row(&self, fonts: &FontSet, width: f32) -> bool {
        let (sku_w, part_w) = self.widths(fonts);
        self.part.is_none() || sku_w + self.gap() + part_w <= width
    }

    /// Height of the block when laid out in `width`.
    pub fn height(&self, fonts: &FontSet, width: f32) -> f32 {
        let (sku_h, part_h) = self.line_heights(fonts);
        if self.part.is_none() {
            sku_h
        } else if self.one_row(fonts, width) {
            sku_h.max(part_h)
        } else {
            sku_h + part_h
        }
    }

    /// Draw from `y` down inside `rect`. Returns the block height.
    pub fn draw(&self, canvas: &mut RgbaImage, fonts: &FontSet, rect: &Rect, y: f32, align: Align, color: Color) -> f32 {
        let (sku_h, part_h) = self.line_heights(fonts);
        let Some(part) = self.part.as_deref() else {
            draw_fitted(canvas, fonts, &self.sku, false, self.sku_size, rect, y, 1, align, color);
            return sku_h;
        };

        if self.one_row(fonts, rect.w) {
            // Bottom-aligned runs on one row.
            let (sku_w, part_w) = self.widths(fonts);
            let row_h = sku_h.max(part_h);
            let x = align.x_for(rect, sku_w + self.gap() + part_w);
            let sku_face = fonts.face_for(&self.sku, false);
            draw_text(canvas, sku_face, self.sku_size, x, y + row_h - sku_h, &self.sku, color);
            let part_face = fonts.face_for(part, false);
            draw_text(canvas, part_face, self.part_size, x + sku_w + self.gap(), y + row_h - part_h, part, color);
            row_h
        } else {
            draw_fitted(canvas, fonts, &self.sku, false, self.sku_size, rect, y, 1, align, color);
            draw_fitted(canvas, fonts, part, false, self.part_size, rect, y + sku_h, 1, align, color);
            sku_h + part_h
        }
    }
}
