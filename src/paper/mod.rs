//! # Paper Module
//!
//! Physical tag and sheet dimensions, and their conversion to pixels.
//!
//! ## Modules
//!
//! - [`config`]: Tag sizes, sheet sizes and the 300 DPI unit conversion

pub mod config;

pub use config::{DPI, SheetSize, SizeConfig, built_in_sizes, cm_to_px};
