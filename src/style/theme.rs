//! Theme and brand tables.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::Color;

/// Theme name that every brand skin is layered on.
pub const DEFAULT_THEME: &str = "default";

/// Brand name meaning "no brand skin".
pub const DEFAULT_BRAND: &str = "default";

/// Design tag that switches the renderer to the brand layouts.
pub const MODERN_BRAND: &str = "modern_brand";

/// Colors used by every layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub text: Color,
    pub price: Color,
    /// Muted color for the struck-through regular price.
    pub strikethrough: Color,
    pub accent: Color,
    pub background: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            text: Color::rgb(0x1A, 0x1A, 0x1A),
            price: Color::rgb(0x00, 0x00, 0x00),
            strikethrough: Color::rgb(0x8C, 0x8C, 0x8C),
            accent: Color::rgb(0xD6, 0x28, 0x28),
            background: Color::WHITE,
        }
    }
}

/// Brand-supplied palette entries; `None` keeps the theme's color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaletteOverride {
    pub text: Option<Color>,
    pub price: Option<Color>,
    pub strikethrough: Option<Color>,
    pub accent: Option<Color>,
    pub background: Option<Color>,
}

impl PaletteOverride {
    /// Apply over a base palette.
    pub fn apply(&self, base: Palette) -> Palette {
        Palette {
            text: self.text.unwrap_or(base.text),
            price: self.price.unwrap_or(base.price),
            strikethrough: self.strikethrough.unwrap_or(base.strikethrough),
            accent: self.accent.unwrap_or(base.accent),
            background: self.background.unwrap_or(base.background),
        }
    }
}

/// A theme: palette, per-language logos and decorative flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeConfig {
    pub name: String,
    #[serde(default)]
    pub design: Option<String>,
    #[serde(default)]
    pub palette: Palette,
    /// Language code → logo path (relative to the resource root).
    #[serde(default)]
    pub logos: BTreeMap<String, String>,
    #[serde(default)]
    pub background_grid: bool,
    #[serde(default)]
    pub background_snow: bool,
    #[serde(default)]
    pub draw_school_icons: bool,
    /// Sticky-note skin for the accessory layout.
    #[serde(default)]
    pub sticky_note: bool,
}

impl ThemeConfig {
    /// The baseline theme.
    pub fn baseline() -> Self {
        Self {
            name: DEFAULT_THEME.to_string(),
            design: None,
            palette: Palette::default(),
            logos: default_logos("logo"),
            background_grid: false,
            background_snow: false,
            draw_school_icons: false,
            sticky_note: false,
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self::baseline()
    }
}

/// A brand skin. Merging one forces the `modern_brand` design.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrandConfig {
    pub name: String,
    #[serde(default)]
    pub logos: BTreeMap<String, String>,
    #[serde(default)]
    pub palette: PaletteOverride,
    /// Small line printed at the bottom of full brand tags.
    #[serde(default)]
    pub footer_text: Option<String>,
}

fn default_logos(stem: &str) -> BTreeMap<String, String> {
    ["en", "ka", "ru"]
        .iter()
        .map(|lang| (lang.to_string(), format!("logos/{}_{}.png", stem, lang)))
        .collect()
}

/// Built-in themes, baseline first.
pub fn built_in_themes() -> Vec<ThemeConfig> {
    let base = ThemeConfig::baseline();
    vec![
        base.clone(),
        ThemeConfig {
            name: "winter".into(),
            palette: Palette {
                accent: Color::rgb(0x1D, 0x6F, 0xB8),
                ..Palette::default()
            },
            background_snow: true,
            ..base.clone()
        },
        ThemeConfig {
            name: "back_to_school".into(),
            palette: Palette {
                accent: Color::rgb(0xF2, 0xA9, 0x00),
                ..Palette::default()
            },
            background_grid: true,
            draw_school_icons: true,
            sticky_note: true,
            ..base.clone()
        },
        ThemeConfig {
            name: "clearance".into(),
            palette: Palette {
                accent: Color::rgb(0xE8, 0x5D, 0x04),
                price: Color::rgb(0xB0, 0x00, 0x00),
                ..Palette::default()
            },
            ..base
        },
    ]
}

/// Built-in brand skins. `default` is the no-op brand.
pub fn built_in_brands() -> Vec<BrandConfig> {
    vec![
        BrandConfig {
            name: DEFAULT_BRAND.into(),
            ..Default::default()
        },
        BrandConfig {
            name: "nordlys".into(),
            logos: default_logos("nordlys"),
            palette: PaletteOverride {
                accent: Some(Color::rgb(0x00, 0x5B, 0x96)),
                price: Some(Color::rgb(0x00, 0x2B, 0x49)),
                ..Default::default()
            },
            footer_text: Some("Official partner".into()),
        },
        BrandConfig {
            name: "voltaire".into(),
            logos: default_logos("voltaire"),
            palette: PaletteOverride {
                text: Some(Color::rgb(0x22, 0x22, 0x22)),
                accent: Some(Color::rgb(0x76, 0xB9, 0x00)),
                ..Default::default()
            },
            footer_text: None,
        },
    ]
}
