//! Keyboard layout for long, low tags: a name panel on the left and a
//! price/SKU panel on the right, split by an accent rule.

use image::RgbaImage;

use super::common::{
    Align, KEYBOARD_BASE_CM, PriceTexts, Rect, SpecStyle, draw_badge, draw_fitted, draw_logo,
    draw_price_block, draw_spec, fit_spec_column, IdentityLine, layout_spec, scale_for,
};
use super::{LayoutStrategy, TagContext};
use crate::draw::draw_line;
use crate::error::Result;

/// Share of the width taken by the name panel.
const NAME_PANEL: f32 = 0.62;

pub struct Keyboard;

impl LayoutStrategy for Keyboard {
    fn render(&self, ctx: &TagContext<'_>, canvas: &mut RgbaImage) -> Result<()> {
        let scale = scale_for(ctx.size.width_cm, ctx.size.height_cm, KEYBOARD_BASE_CM);
        let s = ctx.layout;
        let fonts = ctx.resources.fonts();
        let palette = ctx.style.palette;
        let (w, h) = (canvas.width() as f32, canvas.height() as f32);
        let margin = 40.0 * scale;

        let split_x = w * NAME_PANEL;
        let left = Rect::new(margin, margin, split_x - 2.0 * margin, h - 2.0 * margin);
        let right = Rect::new(split_x + margin, margin, w - split_x - 2.0 * margin, h - 2.0 * margin);

        draw_line(
            canvas,
            (split_x, margin),
            (split_x, h - margin),
            4.0 * scale,
            palette.accent,
        );

        // Name panel.
        let mut y = left.y;
        let logo_h = draw_logo(
            canvas,
            ctx,
            &Rect::new(left.x, y, left.w * 0.4, 90.0 * scale * s.logo),
            Align::Left,
        );
        if logo_h > 0.0 {
            y += logo_h + 16.0 * scale;
        }
        y += draw_fitted(
            canvas,
            fonts,
            &ctx.record.name,
            true,
            64.0 * scale * s.title,
            &left,
            y,
            2,
            Align::Left,
            palette.text,
        );

        if ctx.size.spec_limit > 0 && !ctx.specs.is_empty() {
            let style = SpecStyle {
                font_size: 28.0 * scale * s.spec,
                icon_size: (36.0 * scale * s.spec).round().max(1.0) as u32,
                gap: 10.0 * scale,
                color: palette.text,
                icon_tint: Some(palette.accent),
                max_lines: 1,
            };
            y += 12.0 * scale;
            let rows: Vec<_> = ctx.specs.iter().map(|spec| layout_spec(fonts, spec, &style, left.w)).collect();
            let heights: Vec<f32> = rows.iter().map(|r| r.height).collect();
            for i in fit_spec_column(&ctx.specs, &heights, left.bottom() - y, ctx.size.spec_limit) {
                draw_spec(canvas, ctx.resources, &rows[i], &style, left.x, y);
                y += rows[i].height;
            }
        }

        // Price panel: price block centered, identity line under it.
        let prices = PriceTexts::new(&ctx.record.prices(), |a| ctx.labels.with_currency(a));
        let price_size = 130.0 * scale * s.price;
        let identity = IdentityLine::of(ctx, 30.0 * scale);
        let id_h = identity.height(fonts, right.w);
        let block_h = prices.height(fonts, price_size) + 16.0 * scale + id_h;
        let top = right.y + ((right.h - block_h) / 2.0).max(0.0);

        let used = draw_price_block(canvas, fonts, &palette, &prices, &right, top, price_size, Align::Center);
        identity.draw(canvas, fonts, &right, top + used + 16.0 * scale, Align::Center, palette.text);

        draw_badge(
            canvas,
            ctx,
            prices.on_sale,
            (w - 70.0 * scale, 70.0 * scale),
            scale * 0.8,
        );
        Ok(())
    }
}
