//! Full brand layout: accent header with the brand logo, title, two spec
//! columns, price block beside a QR code, identity line, the dual-language
//! hint and the brand footer.
//!
//! Sizes with `reserve_material_details` gather every material-like spec
//! into one synthesized "Material Details: ..." row kept at the end of the
//! second column.

use image::RgbaImage;

use super::common::{
    Align, PriceTexts, Rect, STANDARD_BASE_CM, SpecStyle, draw_badge, draw_fitted, draw_logo,
    draw_price_block, draw_qr, draw_spec, IdentityLine, layout_spec, scale_for, split_columns,
};
use super::{LayoutStrategy, TagContext};
use crate::draw::fill_rect;
use crate::error::Result;
use crate::specs::{normalize_label, split_spec};

pub struct BrandFull;

impl LayoutStrategy for BrandFull {
    fn render(&self, ctx: &TagContext<'_>, canvas: &mut RgbaImage) -> Result<()> {
        let scale = scale_for(ctx.size.width_cm, ctx.size.height_cm, STANDARD_BASE_CM);
        let s = ctx.layout;
        let fonts = ctx.resources.fonts();
        let palette = ctx.style.palette;
        let (w, h) = canvas.dimensions();
        let margin = 40.0 * scale;

        // Header band.
        let band_h = (150.0 * scale * s.logo).round() as u32;
        fill_rect(canvas, 0, 0, w, band_h, palette.accent);
        draw_logo(
            canvas,
            ctx,
            &Rect::new(margin, 20.0 * scale, w as f32 * 0.6, band_h as f32 - 40.0 * scale),
            Align::Left,
        );

        let content = Rect::new(
            margin,
            band_h as f32 + 28.0 * scale,
            w as f32 - 2.0 * margin,
            h as f32 - band_h as f32 - 28.0 * scale - margin,
        );
        let mut y = content.y;
        y += draw_fitted(
            canvas,
            fonts,
            &ctx.record.name,
            true,
            58.0 * scale * s.title,
            &content,
            y,
            2,
            Align::Left,
            palette.text,
        );
        y += 24.0 * scale;

        // Footer, bottom up: brand strip, dual hint, identity line, price + QR.
        let small = 26.0 * scale;
        let small_h = fonts.default_face(false).line_height(small);
        let mut bottom = content.bottom();

        if let Some(footer) = ctx.style.footer_text.as_deref().filter(|f| !f.trim().is_empty()) {
            let strip_h = small_h + 16.0 * scale;
            let strip_top = h as f32 - strip_h;
            fill_rect(canvas, 0, strip_top as i32, w, strip_h.ceil() as u32, palette.accent.tint(0.85));
            draw_fitted(canvas, fonts, footer, false, small, &content, strip_top + 8.0 * scale, 1, Align::Center, palette.text);
            bottom = bottom.min(strip_top - 10.0 * scale);
        }
        if ctx.dual {
            bottom -= small_h;
            draw_fitted(
                canvas,
                fonts,
                &ctx.labels.other_language_hint,
                false,
                small,
                &content,
                bottom,
                1,
                Align::Center,
                palette.strikethrough,
            );
            bottom -= 8.0 * scale;
        }

        let identity = IdentityLine::of(ctx, 30.0 * scale);
        bottom -= identity.height(fonts, content.w);
        identity.draw(canvas, fonts, &content, bottom, Align::Left, palette.text);
        bottom -= 14.0 * scale;

        let prices = PriceTexts::new(&ctx.record.prices(), |a| ctx.labels.with_currency(a));
        let price_size = 110.0 * scale * s.price;
        let qr_size = (180.0 * scale) as u32;
        let qr_h = if ctx.record.qr_url().is_some() { qr_size as f32 } else { 0.0 };
        let block_h = prices.height(fonts, price_size).max(qr_h);
        let footer_top = bottom - block_h;

        let qr_drawn = draw_qr(canvas, ctx, content.right() - qr_size as f32, footer_top, qr_size);
        let price_w = if qr_drawn { content.w - qr_size as f32 - 20.0 * scale } else { content.w };
        let price_rect = Rect::new(content.x, footer_top, price_w, block_h);
        draw_price_block(canvas, fonts, &palette, &prices, &price_rect, footer_top, price_size, Align::Left);

        // Two spec columns between title and footer.
        if ctx.size.spec_limit > 0 {
            let style = SpecStyle {
                font_size: 30.0 * scale * s.spec,
                icon_size: (42.0 * scale * s.spec).round().max(1.0) as u32,
                gap: 12.0 * scale,
                color: palette.text,
                icon_tint: Some(palette.accent),
                max_lines: 2,
            };
            let col_gap = 30.0 * scale;
            let col_w = (content.w - col_gap) / 2.0;
            let budget = footer_top - 20.0 * scale - y;

            let (specs, material) = if ctx.size.reserve_material_details {
                material_details(&ctx.specs, &ctx.labels.material_details)
            } else {
                (ctx.specs.clone(), None)
            };
            let rows: Vec<_> = specs.iter().map(|spec| layout_spec(fonts, spec, &style, col_w)).collect();
            let heights: Vec<f32> = rows.iter().map(|r| r.height).collect();
            let material_row = material.as_deref().map(|m| layout_spec(fonts, m, &style, col_w));
            let plan = plan_columns(
                &specs,
                &heights,
                material_row.as_ref().map(|r| r.height),
                budget,
                ctx.size.spec_limit,
            );

            let mut col_y = y;
            for &i in &plan.first {
                draw_spec(canvas, ctx.resources, &rows[i], &style, content.x, col_y);
                col_y += rows[i].height;
            }
            let second_x = content.x + col_w + col_gap;
            let mut col_y = y;
            for &i in &plan.second {
                draw_spec(canvas, ctx.resources, &rows[i], &style, second_x, col_y);
                col_y += rows[i].height;
            }
            if let Some(row) = material_row.filter(|_| plan.material) {
                draw_spec(canvas, ctx.resources, &row, &style, second_x, col_y);
            }
        }

        draw_badge(
            canvas,
            ctx,
            prices.on_sale,
            (w as f32 - margin - 70.0 * scale, band_h as f32 + 10.0 * scale),
            scale,
        );
        Ok(())
    }
}

/// Spec rows picked for the two columns.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ColumnPlan {
    pub first: Vec<usize>,
    pub second: Vec<usize>,
    /// The synthesized material row goes below the second column.
    pub material: bool,
}

/// Pack specs into two columns. A material row of `material_height` is
/// reserved at the bottom of the second column and takes one of the
/// `limit` slots.
pub(crate) fn plan_columns(
    specs: &[String],
    heights: &[f32],
    material_height: Option<f32>,
    budget: f32,
    limit: usize,
) -> ColumnPlan {
    let reserve = material_height.unwrap_or(0.0);
    let limit = limit.saturating_sub(usize::from(material_height.is_some()));
    let (first, second) = split_columns(specs, heights, budget, limit, reserve);
    let second_h: f32 = second.iter().map(|&i| heights[i]).sum();
    let material = material_height.is_some_and(|h| second_h + h <= budget);
    ColumnPlan {
        first,
        second,
        material,
    }
}

/// Pull material-like specs out of the list and merge their values into a
/// single `"<label>: a, b"` spec.
pub(crate) fn material_details(specs: &[String], label: &str) -> (Vec<String>, Option<String>) {
    let mut rest = Vec::with_capacity(specs.len());
    let mut values = Vec::new();
    for spec in specs {
        match split_spec(spec) {
            Some((l, v)) if normalize_label(l).contains("material") => values.push(v.trim().to_string()),
            _ => rest.push(spec.clone()),
        }
    }
    let merged = (!values.is_empty()).then(|| format!("{}: {}", label, values.join(", ")));
    (rest, merged)
}
