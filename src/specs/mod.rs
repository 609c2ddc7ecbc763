//! # Specification Extraction
//!
//! Turns a [`ProductRecord`](crate::record::ProductRecord) into the ordered list
//! of spec lines a tag shows.
//!
//! ```text
//! Description (<li> / Markdown list items) ─┐
//! Attributes (renamed via ColumnMapping)  ──┼─→ concat ─→ dedupe ─→ Vec<String>
//! Top-level fields (whitelisted)          ──┘
//! ```
//!
//! ## Modules
//!
//! - [`description`]: list-item extraction from description markup
//! - [`extract`]: source merging and label de-duplication
//! - [`icons`]: spec label → icon asset matching

pub mod description;
pub mod extract;
pub mod icons;

pub use extract::{dedupe, extract, is_warranty, normalize_label, split_spec};
pub use icons::{GENERIC_ICON, icon_for};
