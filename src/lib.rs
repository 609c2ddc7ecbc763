//! # Pricetag - Retail Price Tag Renderer
//!
//! Pricetag turns product records into print-ready price tag images at
//! 300 DPI and packs them onto printer sheets. It provides:
//!
//! - **Spec extraction**: label/value specifications from description markup,
//!   attributes and whitelisted fields
//! - **Layout strategies**: standard, accessory, brand compact, brand full
//!   and keyboard tags
//! - **Styling**: themes, brand skins and per-language labels
//! - **Sheet packing**: grid, pair and single-tag sheets with rotation
//! - **Batch rendering**: parallel rendering with per-record failure isolation
//!
//! ## Quick Start
//!
//! ```no_run
//! use pricetag::{
//!     catalog::Catalog,
//!     record::ProductRecord,
//!     sheet::{fit_count, pack_grid},
//!     style::StyleSelection,
//!     tag,
//! };
//!
//! let catalog = Catalog::built_in();
//! let resources = catalog.resources();
//!
//! let record = ProductRecord::new("A-100", "Laptop Pro 14")
//!     .with_prices("1299.00", "1099.00")
//!     .with_attribute("RAM", "16GB");
//!
//! let request = catalog.request("Standard", &StyleSelection::default(), "en")?;
//! let image = tag::render(&record, &request, &resources, None)?;
//!
//! let sheet = pricetag::paper::SheetSize::A4;
//! let fit = fit_count(&sheet, request.size.width_cm, request.size.height_cm);
//! pack_grid(&[image], &fit, &sheet)?.save("sheet.png")?;
//!
//! # Ok::<(), pricetag::TagError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`record`] | Product records, prices and column mapping |
//! | [`specs`] | Specification extraction and icon matching |
//! | [`style`] | Themes, brands and the effective style |
//! | [`tag`] | Layout selection and the tag strategies |
//! | [`sheet`] | Sheet fitting and packing |
//! | [`batch`] | Parallel batch rendering |
//! | [`catalog`] | Configuration tables and record loading |
//! | [`error`] | Error types |

pub mod batch;
pub mod catalog;
pub mod draw;
pub mod error;
pub mod paper;
pub mod record;
pub mod resources;
pub mod sheet;
pub mod specs;
pub mod style;
pub mod tag;
pub mod text;

// Re-exports for convenience
pub use catalog::Catalog;
pub use error::{Result, TagError};
pub use paper::{SheetSize, SizeConfig};
pub use record::ProductRecord;
