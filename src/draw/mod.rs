//! # Drawing
//!
//! Raster building blocks the tag layouts are composed from.
//!
//! ## Modules
//!
//! - [`canvas`]: pixel blending, rectangles, lines, polygons, text, layer rotation
//! - [`starburst`]: the tilted sale/special star
//! - [`qr`]: footer QR codes
//! - [`background`]: grid/snow/school layers and their SKU-keyed cache

pub mod background;
pub mod canvas;
pub mod qr;
pub mod starburst;

pub use background::{BackgroundCache, render_background};
pub use canvas::{
    blend_pixel, composite, draw_line, draw_text, draw_text_centered, fill_circle, fill_polygon,
    fill_rect, rotate_layer, rotate_quarter, stroke_rect,
};
pub use qr::qr_image;
pub use starburst::draw_starburst;
