//! # Text Layout
//!
//! Measurement, greedy word wrapping, shrink-to-fit and script handling on
//! top of [`Face`](crate::resources::Face).
//!
//! ## Modules
//!
//! - [`layout`]: measure, wrap, fit
//! - [`script`]: script detection and right-to-left run reordering

pub mod layout;
pub mod script;

pub use layout::{FittedText, fit_wrapped, measure, wrap};
pub use script::{Script, visual_order};
