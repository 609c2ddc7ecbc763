//! # Tag Rendering
//!
//! Turns one [`ProductRecord`] into one tag image for one language.
//!
//! ## Layout selection
//!
//! The first matching rule picks the strategy:
//!
//! | Rule | Layout |
//! |------|--------|
//! | theme design `modern_brand` on the 6x4 cm accessory size | [`LayoutKind::BrandCompact`] |
//! | theme design `modern_brand`, any other size | [`LayoutKind::BrandFull`] |
//! | size design `keyboard` | [`LayoutKind::Keyboard`] |
//! | size `is_accessory_style` | [`LayoutKind::Accessory`] |
//! | otherwise | [`LayoutKind::Standard`] |
//!
//! A `design` string no layout knows is a configuration error and fails the
//! render with [`TagError::UnknownStrategy`].
//!
//! ## Canvas
//!
//! The canvas is allocated here at the size's exact 300 DPI pixel size and
//! handed to the strategy, so no layout can emit a wrongly sized tag.

pub mod common;
pub mod labels;

mod accessory;
mod brand_compact;
mod brand_full;
mod keyboard;
mod standard;

pub use crate::draw::BackgroundCache;
pub use labels::{TagLabels, built_in_labels};

use image::{Rgba, RgbaImage};
use log::debug;

use crate::error::{Result, TagError};
use crate::paper::SizeConfig;
use crate::record::{ColumnMapping, ProductRecord};
use crate::resources::Resources;
use crate::specs;
use crate::style::{LayoutSettings, MODERN_BRAND, StyleConfig};

/// Size design that selects the keyboard layout.
pub const KEYBOARD_DESIGN: &str = "keyboard";

/// Everything about a render except the record.
#[derive(Debug, Clone)]
pub struct TagRequest {
    pub size: SizeConfig,
    pub style: StyleConfig,
    pub layout: LayoutSettings,
    pub language: String,
    pub labels: TagLabels,
    pub columns: ColumnMapping,
    /// Draw the "special" badge regardless of prices.
    pub special: bool,
    /// The tag is one of a dual-language pair.
    pub dual: bool,
}

impl TagRequest {
    pub fn new(size: SizeConfig, style: StyleConfig) -> Self {
        Self {
            size,
            style,
            layout: LayoutSettings::default(),
            language: "en".into(),
            labels: TagLabels::default(),
            columns: ColumnMapping::default(),
            special: false,
            dual: false,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>, labels: TagLabels) -> Self {
        self.language = language.into();
        self.labels = labels;
        self
    }

    pub fn with_layout(mut self, layout: LayoutSettings) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_columns(mut self, columns: ColumnMapping) -> Self {
        self.columns = columns;
        self
    }

    pub fn special(mut self, special: bool) -> Self {
        self.special = special;
        self
    }

    pub fn dual(mut self, dual: bool) -> Self {
        self.dual = dual;
        self
    }
}

/// What a strategy sees while drawing.
pub struct TagContext<'a> {
    pub record: &'a ProductRecord,
    /// Extracted specs; empty when the size shows none.
    pub specs: Vec<String>,
    pub size: &'a SizeConfig,
    pub style: &'a StyleConfig,
    pub layout: LayoutSettings,
    pub labels: &'a TagLabels,
    pub language: &'a str,
    pub special: bool,
    pub dual: bool,
    pub resources: &'a Resources,
    pub backgrounds: Option<&'a BackgroundCache>,
}

/// One tag layout. The canvas arrives pre-filled with the palette background.
pub trait LayoutStrategy: Sync {
    fn render(&self, ctx: &TagContext<'_>, canvas: &mut RgbaImage) -> Result<()>;
}

/// The closed set of layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutKind {
    Standard,
    Accessory,
    BrandCompact,
    BrandFull,
    Keyboard,
}

impl LayoutKind {
    /// Pick the layout for a size/style pair.
    pub fn select(size: &SizeConfig, style: &StyleConfig) -> Result<LayoutKind> {
        let brand = match style.design.as_deref() {
            None => false,
            Some(MODERN_BRAND) => true,
            Some(other) => return Err(TagError::UnknownStrategy(other.to_string())),
        };
        let keyboard = match size.design.as_deref() {
            None => false,
            Some(KEYBOARD_DESIGN) => true,
            Some(other) => return Err(TagError::UnknownStrategy(other.to_string())),
        };

        let kind = if brand && size.is_accessory_dimension() {
            LayoutKind::BrandCompact
        } else if brand {
            LayoutKind::BrandFull
        } else if keyboard {
            LayoutKind::Keyboard
        } else if size.is_accessory_style {
            LayoutKind::Accessory
        } else {
            LayoutKind::Standard
        };
        Ok(kind)
    }

    pub fn name(self) -> &'static str {
        match self {
            LayoutKind::Standard => "standard",
            LayoutKind::Accessory => "accessory",
            LayoutKind::BrandCompact => "brand_compact",
            LayoutKind::BrandFull => "brand_full",
            LayoutKind::Keyboard => "keyboard",
        }
    }

    pub fn strategy(self) -> &'static dyn LayoutStrategy {
        match self {
            LayoutKind::Standard => &standard::Standard,
            LayoutKind::Accessory => &accessory::Accessory,
            LayoutKind::BrandCompact => &brand_compact::BrandCompact,
            LayoutKind::BrandFull => &brand_full::BrandFull,
            LayoutKind::Keyboard => &keyboard::Keyboard,
        }
    }
}

/// Render one tag.
///
/// Fails for a record without a SKU or a size that rounds to zero pixels.
/// An unknown design fails too. Missing fonts, icons and logos and
/// unparseable prices are absorbed.
pub fn render(
    record: &ProductRecord,
    request: &TagRequest,
    resources: &Resources,
    backgrounds: Option<&BackgroundCache>,
) -> Result<RgbaImage> {
    record.validate()?;
    let (width, height) = request.size.pixel_size();
    if width == 0 || height == 0 {
        return Err(TagError::DegenerateSize {
            width_cm: request.size.width_cm,
            height_cm: request.size.height_cm,
        });
    }
    let kind = LayoutKind::select(&request.size, &request.style)?;
    debug!(
        "Rendering {} as {} ({}, {})",
        record.sku,
        kind.name(),
        request.size.name,
        request.language
    );

    let specs = if request.size.spec_limit == 0 {
        Vec::new()
    } else {
        specs::extract(record, &request.columns)
    };

    let ctx = TagContext {
        record,
        specs,
        size: &request.size,
        style: &request.style,
        layout: request.layout.sanitized(),
        labels: &request.labels,
        language: &request.language,
        special: request.special,
        dual: request.dual,
        resources,
        backgrounds,
    };

    let mut canvas = RgbaImage::from_pixel(width, height, Rgba(request.style.palette.background.0));
    kind.strategy().render(&ctx, &mut canvas)?;
    Ok(canvas)
}
