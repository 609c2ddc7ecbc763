//! # Paper Configuration
//!
//! Tag sizes and print sheets are described in centimeters and rendered at a
//! fixed 300 DPI.
//!
//! ## Calculations
//!
//! ```text
//! pixels = round(cm / 2.54 * 300)
//!
//! For an A4 sheet (21 x 29.7 cm):
//!   21.0 / 2.54 * 300 = 2480.3  -> 2480 px
//!   29.7 / 2.54 * 300 = 3507.9  -> 3508 px
//! ```
//!
//! ## Usage
//!
//! ```
//! use pricetag::paper::{SheetSize, cm_to_px};
//!
//! let a4 = SheetSize::A4;
//! assert_eq!(a4.pixel_size(), (2480, 3508));
//! assert_eq!(cm_to_px(2.54), 300);
//! ```

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Fixed render resolution in dots per inch.
pub const DPI: f64 = 300.0;

const CM_PER_INCH: f64 = 2.54;

/// Convert centimeters to pixels at [`DPI`]. Negative input yields 0.
#[inline]
pub fn cm_to_px(cm: f32) -> u32 {
    let px = (cm as f64 / CM_PER_INCH * DPI).round();
    if px <= 0.0 { 0 } else { px as u32 }
}

/// Convert pixels back to centimeters.
#[inline]
pub fn px_to_cm(px: u32) -> f32 {
    (px as f64 * CM_PER_INCH / DPI) as f32
}

/// # Tag Size
///
/// A printable tag size plus the style flags that go with it.
///
/// - **spec_limit**: maximum specifications shown; 0 hides specs entirely
/// - **is_accessory_style**: use the simplified accessory layout
/// - **design**: fixed layout variant (`"keyboard"`), `None` for the default
/// - **reserve_material_details**: brand layouts keep a trailing slot for a
///   synthesized "Material Details" spec
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeConfig {
    pub name: String,
    pub width_cm: f32,
    pub height_cm: f32,
    #[serde(default)]
    pub spec_limit: usize,
    #[serde(default)]
    pub is_accessory_style: bool,
    #[serde(default)]
    pub design: Option<String>,
    #[serde(default)]
    pub reserve_material_details: bool,
}

impl SizeConfig {
    /// Physical dimensions of the small accessory tag.
    pub const ACCESSORY_CM: (f32, f32) = (6.0, 4.0);

    /// Create a plain size with no style flags.
    pub fn new(name: impl Into<String>, width_cm: f32, height_cm: f32, spec_limit: usize) -> Self {
        Self {
            name: name.into(),
            width_cm,
            height_cm,
            spec_limit,
            is_accessory_style: false,
            design: None,
            reserve_material_details: false,
        }
    }

    /// Mark this size as accessory style.
    pub fn accessory(mut self) -> Self {
        self.is_accessory_style = true;
        self
    }

    /// Force a layout design variant.
    pub fn with_design(mut self, design: impl Into<String>) -> Self {
        self.design = Some(design.into());
        self
    }

    /// Reserve the trailing "Material Details" slot in brand layouts.
    pub fn with_material_details(mut self) -> Self {
        self.reserve_material_details = true;
        self
    }

    /// Pixel dimensions `(width, height)` at 300 DPI.
    pub fn pixel_size(&self) -> (u32, u32) {
        (cm_to_px(self.width_cm), cm_to_px(self.height_cm))
    }

    /// Area in square centimeters.
    #[inline]
    pub fn area_cm2(&self) -> f32 {
        self.width_cm * self.height_cm
    }

    /// Whether this size has the given physical dimensions (either orientation).
    pub fn matches_dimensions(&self, (w, h): (f32, f32)) -> bool {
        let close = |a: f32, b: f32| (a - b).abs() < 0.05;
        (close(self.width_cm, w) && close(self.height_cm, h))
            || (close(self.width_cm, h) && close(self.height_cm, w))
    }

    /// Whether this is the small accessory tag dimension.
    pub fn is_accessory_dimension(&self) -> bool {
        self.matches_dimensions(Self::ACCESSORY_CM)
    }
}

/// Built-in tag sizes, in display order.
pub fn built_in_sizes() -> Vec<SizeConfig> {
    vec![
        SizeConfig::new("Standard", 10.0, 15.0, 8),
        SizeConfig::new("Large", 14.8, 21.0, 12),
        SizeConfig::new("Small", 7.4, 10.5, 5),
        SizeConfig::new("Wide", 15.0, 10.0, 8).with_material_details(),
        SizeConfig::new("Accessory", 6.0, 4.0, 0).accessory(),
        SizeConfig::new("Keyboard", 20.0, 6.0, 0).with_design("keyboard"),
    ]
}

/// # Print Sheet
///
/// A full page the packer tiles tags onto.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SheetSize {
    pub name: Cow<'static, str>,
    pub width_cm: f32,
    pub height_cm: f32,
}

impl SheetSize {
    /// ISO A4 portrait (21 x 29.7 cm).
    pub const A4: SheetSize = SheetSize::fixed("A4", 21.0, 29.7);

    /// ISO A3 portrait (29.7 x 42 cm).
    pub const A3: SheetSize = SheetSize::fixed("A3", 29.7, 42.0);

    /// US Letter portrait (8.5 x 11 in).
    pub const LETTER: SheetSize = SheetSize::fixed("Letter", 21.59, 27.94);

    const fn fixed(name: &'static str, width_cm: f32, height_cm: f32) -> Self {
        Self {
            name: Cow::Borrowed(name),
            width_cm,
            height_cm,
        }
    }

    /// Create a custom sheet.
    pub fn new(name: impl Into<String>, width_cm: f32, height_cm: f32) -> Self {
        Self {
            name: Cow::Owned(name.into()),
            width_cm,
            height_cm,
        }
    }

    /// All built-in sheets.
    pub fn built_in() -> [SheetSize; 3] {
        [Self::A4, Self::A3, Self::LETTER]
    }

    /// Look up a built-in sheet by name (case insensitive).
    pub fn by_name(name: &str) -> Option<SheetSize> {
        Self::built_in()
            .into_iter()
            .find(|sheet| sheet.name.eq_ignore_ascii_case(name))
    }

    /// Pixel dimensions `(width, height)` at 300 DPI.
    pub fn pixel_size(&self) -> (u32, u32) {
        (cm_to_px(self.width_cm), cm_to_px(self.height_cm))
    }
}

impl Default for SheetSize {
    fn default() -> Self {
        Self::A4
    }
}
