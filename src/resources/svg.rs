//! SVG icon rasterization with optional recoloring.

use image::{Rgba, RgbaImage};
use resvg::{tiny_skia, usvg};

use crate::error::{Result, TagError};
use crate::style::Color;

/// Rewrite every explicit `fill`/`stroke` color and `currentColor` to `color`.
///
/// `none` stays `none` so cut-outs keep working.
pub fn recolor(svg: &str, color: Color) -> String {
    let hex = color.to_hex_rgb();
    let mut out = svg.replace("currentColor", &hex);
    for attr in ["fill=\"", "stroke=\"", "fill:", "stroke:"] {
        out = rewrite_values(&out, attr, &hex);
    }
    out
}

fn rewrite_values(src: &str, key: &str, hex: &str) -> String {
    let css = key.ends_with(':');
    let mut out = String::with_capacity(src.len());
    let mut rest = src;

    while let Some(pos) = rest.find(key) {
        let (head, tail) = rest.split_at(pos + key.len());
        out.push_str(head);

        let end = if css {
            tail.find([';', '"', '\'', '}']).unwrap_or(tail.len())
        } else {
            tail.find('"').unwrap_or(tail.len())
        };
        let value = tail[..end].trim();
        if value == "none" || value.starts_with("url(") {
            out.push_str(&tail[..end]);
        } else {
            out.push_str(hex);
        }
        rest = &tail[end..];
    }
    out.push_str(rest);
    out
}

/// Render SVG source to fit inside `max_w` x `max_h`, keeping its aspect ratio.
pub fn rasterize(source: &str, max_w: u32, max_h: u32, tint: Option<Color>) -> Result<RgbaImage> {
    let source = match tint {
        Some(color) => recolor(source, color),
        None => source.to_string(),
    };

    let opt = usvg::Options::default();
    let tree = usvg::Tree::from_str(&source, &opt)
        .map_err(|e| TagError::Image(format!("SVG parse failed: {}", e)))?;

    let size = tree.size();
    let scale = (max_w.max(1) as f32 / size.width()).min(max_h.max(1) as f32 / size.height());
    let width = (size.width() * scale).round().max(1.0) as u32;
    let height = (size.height() * scale).round().max(1.0) as u32;

    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| TagError::Image(format!("Cannot allocate {}x{} pixmap", width, height)))?;
    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );

    let mut image = RgbaImage::new(width, height);
    for (src, dst) in pixmap.pixels().iter().zip(image.pixels_mut()) {
        let c = src.demultiply();
        *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SQUARE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10" viewBox="0 0 10 10"><rect width="10" height="10" fill="#000000" stroke="none"/></svg>"##;

    #[test]
    fn test_recolor_keeps_none() {
        let out = recolor(SQUARE, Color::rgb(255, 0, 0));
        assert!(out.contains(r##"fill="#ff0000""##));
        assert!(out.contains(r#"stroke="none""#));
    }

    #[test]
    fn test_recolor_css_and_current_color() {
        let out = recolor(
            r#"<path style="fill:#123456;stroke:currentColor"/>"#,
            Color::rgb(0, 0, 255),
        );
        assert_eq!(out, r#"<path style="fill:#0000ff;stroke:#0000ff"/>"#);
    }

    #[test]
    fn test_rasterize_scales_and_tints() {
        let img = rasterize(SQUARE, 40, 20, Some(Color::rgb(0, 200, 0))).unwrap();
        assert_eq!(img.dimensions(), (20, 20));
        let center = img.get_pixel(10, 10);
        assert_eq!(center[1], 200);
        assert_eq!(center[3], 255);
    }

    #[test]
    fn test_rasterize_rejects_garbage() {
        assert!(rasterize("not svg", 10, 10, None).is_err());
    }
}
