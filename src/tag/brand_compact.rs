//! Compact brand layout for the small accessory size: logo and name on
//! top, price on the right, identity line on an accent bar.

use image::RgbaImage;

use super::common::{
    ACCESSORY_BASE_CM, Align, PriceTexts, Rect, draw_badge, draw_fitted, draw_logo,
    draw_price_block, IdentityLine, scale_for,
};
use super::{LayoutStrategy, TagContext};
use crate::draw::fill_rect;
use crate::error::Result;
use crate::style::Color;

pub struct BrandCompact;

impl LayoutStrategy for BrandCompact {
    fn render(&self, ctx: &TagContext<'_>, canvas: &mut RgbaImage) -> Result<()> {
        let scale = scale_for(ctx.size.width_cm, ctx.size.height_cm, ACCESSORY_BASE_CM);
        let s = ctx.layout;
        let fonts = ctx.resources.fonts();
        let palette = ctx.style.palette;
        let (w, h) = canvas.dimensions();

        let bar_h = (64.0 * scale).round() as u32;
        let bar_top = h.saturating_sub(bar_h);
        fill_rect(canvas, 0, bar_top as i32, w, bar_h, palette.accent);

        let margin = 22.0 * scale;
        let content = Rect::new(margin, margin, w as f32 - 2.0 * margin, bar_top as f32 - 2.0 * margin);
        let mut y = content.y;

        let logo_h = draw_logo(
            canvas,
            ctx,
            &Rect::new(content.x, y, content.w * 0.5, 70.0 * scale * s.logo),
            Align::Left,
        );
        if logo_h > 0.0 {
            y += logo_h + 10.0 * scale;
        }

        y += draw_fitted(
            canvas,
            fonts,
            &ctx.record.name,
            true,
            40.0 * scale * s.title,
            &content,
            y,
            2,
            Align::Left,
            palette.text,
        );

        let prices = PriceTexts::new(&ctx.record.prices(), |a| ctx.labels.with_currency(a));
        let price_size = 76.0 * scale * s.price;
        let price_y = (content.bottom() - prices.height(fonts, price_size)).max(y);
        draw_price_block(canvas, fonts, &palette, &prices, &content, price_y, price_size, Align::Right);

        let bar = Rect::new(margin, bar_top as f32, w as f32 - 2.0 * margin, bar_h as f32);
        let identity = IdentityLine::of(ctx, 26.0 * scale);
        let id_y = bar.y + ((bar.h - identity.height(fonts, bar.w)) / 2.0).max(0.0);
        identity.draw(canvas, fonts, &bar, id_y, Align::Center, Color::WHITE);

        draw_badge(
            canvas,
            ctx,
            prices.on_sale,
            (w as f32 - 40.0 * scale, 40.0 * scale),
            scale * 0.4,
        );
        Ok(())
    }
}
