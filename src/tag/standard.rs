//! Standard layout: logo header, wrapped title, spec list with icons, and a
//! footer with price, QR code and SKU/part number.

use image::RgbaImage;

use super::common::{
    Align, PriceTexts, Rect, STANDARD_BASE_CM, SpecStyle, draw_background, draw_badge,
    draw_fitted, draw_logo, draw_spec, draw_price_block, draw_qr, fit_spec_column, IdentityLine,
    layout_spec, scale_for,
};
use super::{LayoutStrategy, TagContext};
use crate::draw::draw_line;
use crate::error::Result;

pub struct Standard;

impl LayoutStrategy for Standard {
    fn render(&self, ctx: &TagContext<'_>, canvas: &mut RgbaImage) -> Result<()> {
        let scale = scale_for(ctx.size.width_cm, ctx.size.height_cm, STANDARD_BASE_CM);
        let s = ctx.layout;
        let fonts = ctx.resources.fonts();
        let palette = ctx.style.palette;

        draw_background(canvas, ctx, scale);

        let margin = 45.0 * scale;
        let content = Rect::of(canvas).inset(margin);
        let mut y = content.y;

        let logo_h = draw_logo(
            canvas,
            ctx,
            &Rect::new(content.x, y, content.w * 0.7, 140.0 * scale * s.logo),
            Align::Center,
        );
        if logo_h > 0.0 {
            y += logo_h + 25.0 * scale;
        }

        y += draw_fitted(
            canvas,
            fonts,
            &ctx.record.name,
            true,
            62.0 * scale * s.title,
            &content,
            y,
            3,
            Align::Center,
            palette.text,
        );
        y += 18.0 * scale;
        draw_line(canvas, (content.x, y), (content.right(), y), 3.0 * scale, palette.accent);
        y += 24.0 * scale;

        // Footer, bottom up: identity line, then price block beside the QR code.
        let identity = IdentityLine::of(ctx, 30.0 * scale);
        let id_h = identity.height(fonts, content.w);
        let prices = PriceTexts::new(&ctx.record.prices(), |a| ctx.labels.with_currency(a));
        let price_size = 120.0 * scale * s.price;
        let qr_size = (190.0 * scale) as u32;
        let qr_h = if ctx.record.qr_url().is_some() { qr_size as f32 } else { 0.0 };
        let block_h = prices.height(fonts, price_size).max(qr_h);
        let footer_top = content.bottom() - id_h - 16.0 * scale - block_h;

        if ctx.size.spec_limit > 0 && !ctx.specs.is_empty() {
            let style = SpecStyle {
                font_size: 34.0 * scale * s.spec,
                icon_size: (48.0 * scale * s.spec).round().max(1.0) as u32,
                gap: 14.0 * scale,
                color: palette.text,
                icon_tint: Some(palette.accent),
                max_lines: 2,
            };
            let rows: Vec<_> = ctx
                .specs
                .iter()
                .map(|spec| layout_spec(fonts, spec, &style, content.w))
                .collect();
            let heights: Vec<f32> = rows.iter().map(|r| r.height).collect();
            let budget = footer_top - 20.0 * scale - y;
            for i in fit_spec_column(&ctx.specs, &heights, budget, ctx.size.spec_limit) {
                draw_spec(canvas, ctx.resources, &rows[i], &style, content.x, y);
                y += rows[i].height;
            }
        }

        let qr_drawn = draw_qr(
            canvas,
            ctx,
            content.right() - qr_size as f32,
            footer_top,
            qr_size,
        );
        let (price_rect, align) = if qr_drawn {
            (
                Rect::new(content.x, footer_top, content.w - qr_size as f32 - 20.0 * scale, block_h),
                Align::Left,
            )
        } else {
            (Rect::new(content.x, footer_top, content.w, block_h), Align::Center)
        };
        draw_price_block(canvas, fonts, &palette, &prices, &price_rect, footer_top, price_size, align);

        identity.draw(canvas, fonts, &content, content.bottom() - id_h, Align::Center, palette.text);

        let width = canvas.width() as f32;
        draw_badge(
            canvas,
            ctx,
            prices.on_sale,
            (width - margin - 60.0 * scale, margin + 60.0 * scale),
            scale,
        );
        Ok(())
    }
}
