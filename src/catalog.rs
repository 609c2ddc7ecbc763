//! # Catalog
//!
//! The static, user-extensible tables a render run draws on: tag sizes,
//! themes, brand skins, column mapping, per-language labels, default scale
//! factors and font files.
//!
//! ## Config file
//!
//! A JSON object; every key is optional. Sizes, themes and brands replace
//! built-in entries of the same name and append otherwise.
//!
//! ```json
//! {
//!   "sizes": [{"name": "Shelf", "width_cm": 8, "height_cm": 5, "spec_limit": 3}],
//!   "brands": [{"name": "acme", "palette": {"accent": "#0055AA"}}],
//!   "columns": {"Weight": {"display_name": "Net weight"}},
//!   "labels": {"en": {"currency": "GEL"}},
//!   "fonts": {"regular": "fonts/NotoSans-Regular.ttf"},
//!   "resource_root": "assets"
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{Result, TagError};
use crate::paper::{SizeConfig, built_in_sizes};
use crate::record::{ColumnMapping, ProductRecord};
use crate::resources::{FontSpec, Resources};
use crate::style::{
    BrandConfig, LayoutSettings, StyleConfig, StyleSelection, ThemeConfig, built_in_brands,
    built_in_themes,
};
use crate::tag::{TagLabels, TagRequest, built_in_labels};

/// All configuration tables of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub sizes: Vec<SizeConfig>,
    pub themes: Vec<ThemeConfig>,
    pub brands: Vec<BrandConfig>,
    pub columns: ColumnMapping,
    /// Language code → fixed strings.
    pub labels: BTreeMap<String, TagLabels>,
    pub layout: LayoutSettings,
    pub fonts: FontSpec,
    /// Directory fonts, icons and logos are resolved from.
    pub resource_root: PathBuf,
}

/// User config file contents; absent keys leave the built-ins alone.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CatalogOverlay {
    pub sizes: Vec<SizeConfig>,
    pub themes: Vec<ThemeConfig>,
    pub brands: Vec<BrandConfig>,
    pub columns: Option<ColumnMapping>,
    pub labels: BTreeMap<String, TagLabels>,
    pub layout: Option<LayoutSettings>,
    pub fonts: Option<FontSpec>,
    pub resource_root: Option<PathBuf>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::built_in()
    }
}

/// Replace same-named entries, append new ones.
fn merge_named<T>(base: &mut Vec<T>, extra: Vec<T>, name: impl Fn(&T) -> &str) {
    for item in extra {
        match base.iter_mut().find(|b| name(b) == name(&item)) {
            Some(slot) => *slot = item,
            None => base.push(item),
        }
    }
}

impl Catalog {
    /// The shipped tables.
    pub fn built_in() -> Self {
        Self {
            sizes: built_in_sizes(),
            themes: built_in_themes(),
            brands: built_in_brands(),
            columns: ColumnMapping::default(),
            labels: built_in_labels(),
            layout: LayoutSettings::default(),
            fonts: FontSpec::conventional(),
            resource_root: PathBuf::from("."),
        }
    }

    /// Built-ins overlaid with a JSON config file. A relative
    /// `resource_root` is taken relative to the file's directory.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let mut overlay: CatalogOverlay = serde_json::from_str(&text)?;
        if let (Some(root), Some(dir)) = (overlay.resource_root.as_mut(), path.parent())
            && root.is_relative()
        {
            *root = dir.join(&*root);
        }
        let mut catalog = Self::built_in();
        catalog.apply(overlay);
        Ok(catalog)
    }

    /// Built-ins overlaid with JSON config text.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let overlay: CatalogOverlay = serde_json::from_str(text)?;
        let mut catalog = Self::built_in();
        catalog.apply(overlay);
        Ok(catalog)
    }

    pub fn apply(&mut self, overlay: CatalogOverlay) {
        merge_named(&mut self.sizes, overlay.sizes, |s| &s.name);
        merge_named(&mut self.themes, overlay.themes, |t| &t.name);
        merge_named(&mut self.brands, overlay.brands, |b| &b.name);
        if let Some(columns) = overlay.columns {
            self.columns.extend(columns);
        }
        self.labels.extend(overlay.labels);
        if let Some(layout) = overlay.layout {
            self.layout = layout;
        }
        if let Some(fonts) = overlay.fonts {
            self.fonts = fonts;
        }
        if let Some(root) = overlay.resource_root {
            self.resource_root = root;
        }
    }

    /// Size by name, case insensitive.
    pub fn size(&self, name: &str) -> Result<&SizeConfig> {
        self.sizes
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| TagError::UnknownSize(name.to_string()))
    }

    /// Resolve a theme/brand selection.
    pub fn style(&self, selection: &StyleSelection) -> Result<StyleConfig> {
        selection.resolve(&self.themes, &self.brands)
    }

    /// Labels for a language, falling back to English, then the defaults.
    pub fn labels_for(&self, language: &str) -> TagLabels {
        self.labels
            .get(language)
            .or_else(|| self.labels.get("en"))
            .cloned()
            .unwrap_or_default()
    }

    /// Load fonts from the resource root.
    pub fn resources(&self) -> Resources {
        Resources::load(self.resource_root.clone(), &self.fonts)
    }

    /// Build a render request for a size, a style selection and a language.
    pub fn request(&self, size: &str, selection: &StyleSelection, language: &str) -> Result<TagRequest> {
        Ok(TagRequest::new(self.size(size)?.clone(), self.style(selection)?)
            .with_language(language, self.labels_for(language))
            .with_layout(self.layout)
            .with_columns(self.columns.clone()))
    }
}

/// Read product records from a JSON array (or a single object).
///
/// Each element is decoded on its own so one malformed record does not
/// hide the others; its slot holds the error.
pub fn load_records(path: &Path) -> Result<Vec<Result<ProductRecord>>> {
    let text = std::fs::read_to_string(path)?;
    parse_records(&text)
}

/// [`load_records`] on JSON text.
pub fn parse_records(text: &str) -> Result<Vec<Result<ProductRecord>>> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    let items = match value {
        serde_json::Value::Array(items) => items,
        single @ serde_json::Value::Object(_) => vec![single],
        other => {
            return Err(TagError::Config(format!(
                "expected an array of records, found {}",
                json_kind(&other)
            )));
        }
    };
    Ok(items
        .into_iter()
        .map(|item| serde_json::from_value::<ProductRecord>(item).map_err(TagError::from))
        .collect())
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
