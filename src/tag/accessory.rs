//! Small accessory layout: identity line, name and price stacked, with an
//! optional sticky-note skin.

use image::RgbaImage;

use super::common::{
    ACCESSORY_BASE_CM, Align, IdentityLine, PriceTexts, Rect, draw_badge, draw_fitted,
    draw_price_block, scale_for,
};
use super::{LayoutStrategy, TagContext};
use crate::draw::{fill_polygon, fill_rect};
use crate::error::Result;
use crate::style::Color;

const NOTE_PAPER: Color = Color::rgb(0xFF, 0xF2, 0x9E);
const NOTE_FOLD: Color = Color::rgb(0xE6, 0xD3, 0x6A);
const NOTE_TAPE: Color = Color([0xFF, 0xFF, 0xFF, 0x99]);

pub struct Accessory;

impl LayoutStrategy for Accessory {
    fn render(&self, ctx: &TagContext<'_>, canvas: &mut RgbaImage) -> Result<()> {
        let scale = scale_for(ctx.size.width_cm, ctx.size.height_cm, ACCESSORY_BASE_CM);
        let s = ctx.layout;
        let fonts = ctx.resources.fonts();
        let palette = ctx.style.palette;

        if ctx.style.sticky_note {
            draw_sticky_note(canvas, scale);
        }

        let content = Rect::of(canvas).inset(24.0 * scale);
        let mut y = content.y;

        y += IdentityLine::of(ctx, 26.0 * scale).draw(canvas, fonts, &content, y, Align::Left, palette.text);
        y += 10.0 * scale;

        draw_fitted(
            canvas,
            fonts,
            &ctx.record.name,
            true,
            44.0 * scale * s.title,
            &content,
            y,
            2,
            Align::Center,
            palette.text,
        );

        let prices = PriceTexts::new(&ctx.record.prices(), |a| ctx.labels.with_currency(a));
        let price_size = 88.0 * scale * s.price;
        let price_y = content.bottom() - prices.height(fonts, price_size);
        draw_price_block(canvas, fonts, &palette, &prices, &content, price_y, price_size, Align::Center);

        let width = canvas.width() as f32;
        draw_badge(
            canvas,
            ctx,
            prices.on_sale,
            (width - 42.0 * scale, 42.0 * scale),
            scale * 0.45,
        );
        Ok(())
    }
}

/// Yellow paper, a folded bottom-right corner and a strip of tape.
fn draw_sticky_note(canvas: &mut RgbaImage, scale: f32) {
    let (w, h) = canvas.dimensions();
    fill_rect(canvas, 0, 0, w, h, NOTE_PAPER);

    let fold = 60.0 * scale;
    let (fw, fh) = (w as f32, h as f32);
    fill_polygon(canvas, &[(fw - fold, fh), (fw, fh - fold), (fw, fh)], Color::WHITE);
    fill_polygon(canvas, &[(fw - fold, fh), (fw - fold, fh - fold), (fw, fh - fold)], NOTE_FOLD);

    let tape_w = (w as f32 * 0.3) as u32;
    let tape_h = (28.0 * scale) as u32;
    fill_rect(canvas, ((w - tape_w) / 2) as i32, 0, tape_w, tape_h, NOTE_TAPE);
}
