//! Per-run multiplicative scale overrides.

use serde::{Deserialize, Serialize};

/// Scale factors applied on top of the size-derived base font sizes.
///
/// Every factor defaults to 1.0. Non-finite or non-positive values are
/// treated as 1.0 by [`LayoutSettings::sanitized`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    pub logo: f32,
    pub title: f32,
    pub spec: f32,
    pub price: f32,
    pub sku: f32,
    pub part_number: f32,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            logo: 1.0,
            title: 1.0,
            spec: 1.0,
            price: 1.0,
            sku: 1.0,
            part_number: 1.0,
        }
    }
}

impl LayoutSettings {
    /// Replace unusable factors with 1.0.
    pub fn sanitized(self) -> Self {
        let fix = |v: f32| if v.is_finite() && v > 0.0 { v } else { 1.0 };
        Self {
            logo: fix(self.logo),
            title: fix(self.title),
            spec: fix(self.spec),
            price: fix(self.price),
            sku: fix(self.sku),
            part_number: fix(self.part_number),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let s: LayoutSettings = serde_json::from_str(r#"{"price": 1.5}"#).unwrap();
        assert_eq!(s.price, 1.5);
        assert_eq!(s.title, 1.0);
        assert_eq!(s.logo, 1.0);
    }

    #[test]
    fn test_sanitized() {
        let s = LayoutSettings {
            title: 0.0,
            spec: f32::NAN,
            price: -2.0,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(s, LayoutSettings::default());
    }
}
