//! Effective style and the brand-over-theme merge.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::theme::{BrandConfig, DEFAULT_BRAND, DEFAULT_THEME, MODERN_BRAND, Palette, ThemeConfig};
use crate::error::{Result, TagError};

/// The one style a tag render sees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleConfig {
    pub theme_name: String,
    /// Set when a non-default brand skin is active.
    pub brand_name: Option<String>,
    pub design: Option<String>,
    pub palette: Palette,
    pub logos: BTreeMap<String, String>,
    pub background_grid: bool,
    pub background_snow: bool,
    pub draw_school_icons: bool,
    pub sticky_note: bool,
    pub footer_text: Option<String>,
}

impl StyleConfig {
    /// Style of a theme with no brand skin.
    pub fn from_theme(theme: &ThemeConfig) -> Self {
        Self {
            theme_name: theme.name.clone(),
            brand_name: None,
            design: theme.design.clone(),
            palette: theme.palette,
            logos: theme.logos.clone(),
            background_grid: theme.background_grid,
            background_snow: theme.background_snow,
            draw_school_icons: theme.draw_school_icons,
            sticky_note: theme.sticky_note,
            footer_text: None,
        }
    }

    /// Whether the brand layouts apply.
    pub fn is_modern_brand(&self) -> bool {
        self.design.as_deref() == Some(MODERN_BRAND)
    }

    /// Logo path for a language, falling back to English.
    pub fn logo_for(&self, lang: &str) -> Option<&str> {
        self.logos
            .get(lang)
            .or_else(|| self.logos.get("en"))
            .map(String::as_str)
    }

    /// Whether any thematic background layer is enabled.
    pub fn has_background(&self) -> bool {
        self.background_grid || self.background_snow || self.draw_school_icons
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self::from_theme(&ThemeConfig::baseline())
    }
}

/// Layer a brand skin over a theme.
///
/// Brand palette and logo entries overwrite the theme's, the design is forced
/// to `modern_brand`, and thematic decorations are dropped. The default brand
/// leaves the theme untouched.
pub fn merge_brand_over_theme(theme: &ThemeConfig, brand: &BrandConfig) -> StyleConfig {
    let mut style = StyleConfig::from_theme(theme);
    if brand.name == DEFAULT_BRAND {
        return style;
    }

    style.brand_name = Some(brand.name.clone());
    style.design = Some(MODERN_BRAND.to_string());
    style.palette = brand.palette.apply(theme.palette);
    for (lang, path) in &brand.logos {
        style.logos.insert(lang.clone(), path.clone());
    }
    style.background_grid = false;
    style.background_snow = false;
    style.draw_school_icons = false;
    style.sticky_note = false;
    style.footer_text = brand.footer_text.clone();
    style
}

/// Theme/brand pick for a render run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleSelection {
    pub theme: String,
    pub brand: String,
}

impl Default for StyleSelection {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_string(),
            brand: DEFAULT_BRAND.to_string(),
        }
    }
}

impl StyleSelection {
    /// Select a theme. A non-default theme clears the brand skin.
    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = theme.into();
        if self.theme != DEFAULT_THEME {
            self.brand = DEFAULT_BRAND.to_string();
        }
        self
    }

    /// Select a brand. A non-default brand resets the theme to its baseline.
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = brand.into();
        if self.brand != DEFAULT_BRAND {
            self.theme = DEFAULT_THEME.to_string();
        }
        self
    }

    /// Look both names up and merge.
    pub fn resolve(&self, themes: &[ThemeConfig], brands: &[BrandConfig]) -> Result<StyleConfig> {
        let theme = themes
            .iter()
            .find(|t| t.name == self.theme)
            .ok_or_else(|| TagError::UnknownTheme(self.theme.clone()))?;

        if self.brand == DEFAULT_BRAND {
            return Ok(StyleConfig::from_theme(theme));
        }

        let brand = brands
            .iter()
            .find(|b| b.name == self.brand)
            .ok_or_else(|| TagError::UnknownBrand(self.brand.clone()))?;
        Ok(merge_brand_over_theme(theme, brand))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::theme::{PaletteOverride, built_in_brands, built_in_themes};
    use crate::style::Color;

    fn brand() -> BrandConfig {
        BrandConfig {
            name: "acme".into(),
            logos: [("en".to_string(), "logos/acme.png".to_string())].into(),
            palette: PaletteOverride {
                accent: Some(Color::rgb(9, 9, 9)),
                ..Default::default()
            },
            footer_text: Some("acme".into()),
        }
    }

    #[test]
    fn test_brand_keys_overwrite_theme() {
        let theme = ThemeConfig {
            background_snow: true,
            ..ThemeConfig::baseline()
        };
        let style = merge_brand_over_theme(&theme, &brand());
        assert!(style.is_modern_brand());
        assert_eq!(style.palette.accent, Color::rgb(9, 9, 9));
        assert_eq!(style.palette.text, theme.palette.text);
        assert_eq!(style.logo_for("en"), Some("logos/acme.png"));
        // Languages the brand does not cover keep the theme logo.
        assert_eq!(style.logo_for("ka"), Some("logos/logo_ka.png"));
        assert!(!style.background_snow);
        assert_eq!(style.brand_name.as_deref(), Some("acme"));
    }

    #[test]
    fn test_default_brand_is_noop() {
        let theme = ThemeConfig::baseline();
        let default_brand = BrandConfig {
            name: DEFAULT_BRAND.into(),
            ..Default::default()
        };
        assert_eq!(
            merge_brand_over_theme(&theme, &default_brand),
            StyleConfig::from_theme(&theme)
        );
    }

    #[test]
    fn test_selection_is_exclusive() {
        let sel = StyleSelection::default().with_theme("winter").with_brand("nordlys");
        assert_eq!(sel.theme, DEFAULT_THEME);
        assert_eq!(sel.brand, "nordlys");

        let sel = sel.with_theme("winter");
        assert_eq!(sel.theme, "winter");
        assert_eq!(sel.brand, DEFAULT_BRAND);
    }

    #[test]
    fn test_resolve_unknown_names() {
        let themes = built_in_themes();
        let brands = built_in_brands();
        let err = StyleSelection::default()
            .with_theme("nope")
            .resolve(&themes, &brands)
            .unwrap_err();
        assert!(matches!(err, TagError::UnknownTheme(_)));

        let err = StyleSelection::default()
            .with_brand("nope")
            .resolve(&themes, &brands)
            .unwrap_err();
        assert!(matches!(err, TagError::UnknownBrand(_)));
    }

    #[test]
    fn test_resolve_brand() {
        let style = StyleSelection::default()
            .with_brand("nordlys")
            .resolve(&built_in_themes(), &built_in_brands())
            .unwrap();
        assert!(style.is_modern_brand());
        assert_eq!(style.theme_name, DEFAULT_THEME);
    }

    #[test]
    fn test_logo_fallback_to_english() {
        let mut style = StyleConfig::default();
        style.logos.remove("ru");
        assert_eq!(style.logo_for("ru"), Some("logos/logo_en.png"));
        style.logos.clear();
        assert_eq!(style.logo_for("ru"), None);
    }
}
