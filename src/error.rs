//! # Error Types
//!
//! This module defines error types used throughout the pricetag library.
//!
//! Missing fonts, icons and logos, and unparseable prices, are recovered inside
//! the renderer and never show up here.

use thiserror::Error;

/// Main error type for pricetag operations
#[derive(Debug, Error)]
pub enum TagError {
    /// A size or theme `design` that no layout strategy handles
    #[error("No layout strategy for design '{0}'")]
    UnknownStrategy(String),

    /// Tag dimensions that fit zero times on the target sheet
    #[error("Cannot lay out a {width_cm}x{height_cm}cm tag on this sheet")]
    DegenerateSize { width_cm: f32, height_cm: f32 },

    /// Size name missing from the size table
    #[error("Unknown size: {0}")]
    UnknownSize(String),

    /// Theme name missing from the theme table
    #[error("Unknown theme: {0}")]
    UnknownTheme(String),

    /// Brand name missing from the brand table
    #[error("Unknown brand: {0}")]
    UnknownBrand(String),

    /// Record that cannot be rendered at all
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// Image decode/encode error
    #[error("Image error: {0}")]
    Image(String),

    /// Font decode error
    #[error("Font error: {0}")]
    Font(String),

    /// Malformed configuration
    #[error("Config error: {0}")]
    Config(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error wrapper
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<image::ImageError> for TagError {
    fn from(e: image::ImageError) -> Self {
        TagError::Image(e.to_string())
    }
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, TagError>;
