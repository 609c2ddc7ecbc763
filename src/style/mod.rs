//! # Style Resolution
//!
//! Themes, brand skins and per-run scale overrides, merged into one effective
//! [`StyleConfig`] per render.
//!
//! ```text
//! ThemeConfig ──┐
//!               ├─ merge_brand_over_theme ─→ StyleConfig ─→ tag renderer
//! BrandConfig ──┘        (brand wins)
//! ```
//!
//! Brand skins and themes are mutually exclusive: [`StyleSelection`] resets
//! one whenever the other is set to something other than its default.

pub mod color;
pub mod layout;
pub mod merge;
pub mod theme;

pub use color::Color;
pub use layout::LayoutSettings;
pub use merge::{StyleConfig, StyleSelection, merge_brand_over_theme};
pub use theme::{
    BrandConfig, DEFAULT_BRAND, DEFAULT_THEME, MODERN_BRAND, Palette, PaletteOverride,
    ThemeConfig, built_in_brands, built_in_themes,
};
