//! RGBA colors with `"#RRGGBB"` / `"#RRGGBBAA"` serialization.

use image::Rgba;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(pub [u8; 4]);

impl Color {
    pub const WHITE: Color = Color([255, 255, 255, 255]);
    pub const BLACK: Color = Color([0, 0, 0, 255]);
    pub const TRANSPARENT: Color = Color([0, 0, 0, 0]);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color([r, g, b, 255])
    }

    /// Same color with a different alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Color([self.0[0], self.0[1], self.0[2], a])
    }

    /// Mix toward white by `t` (0.0 = unchanged, 1.0 = white).
    pub fn tint(self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |c: u8| (c as f32 + (255.0 - c as f32) * t).round() as u8;
        Color([mix(self.0[0]), mix(self.0[1]), mix(self.0[2]), self.0[3]])
    }

    /// Hex form without alpha, e.g. `#1a2b3c` (used when recoloring SVG).
    pub fn to_hex_rgb(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0[0], self.0[1], self.0[2])
    }

    #[inline]
    pub fn to_rgba(self) -> Rgba<u8> {
        Rgba(self.0)
    }
}

impl From<Color> for Rgba<u8> {
    fn from(c: Color) -> Self {
        Rgba(c.0)
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.trim().trim_start_matches('#');
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(format!("Invalid color: {}", s));
        }
        let byte = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| format!("Invalid color: {}", s))
        };
        match hex.len() {
            6 => Ok(Color([byte(0)?, byte(2)?, byte(4)?, 255])),
            8 => Ok(Color([byte(0)?, byte(2)?, byte(4)?, byte(6)?])),
            _ => Err(format!("Invalid color: {}", s)),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.0;
        if a == 255 {
            write!(f, "#{:02X}{:02X}{:02X}", r, g, b)
        } else {
            write!(f, "#{:02X}{:02X}{:02X}{:02X}", r, g, b, a)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rgb() {
        assert_eq!("#FF8000".parse::<Color>().unwrap(), Color::rgb(255, 128, 0));
        assert_eq!("ff8000".parse::<Color>().unwrap(), Color::rgb(255, 128, 0));
    }

    #[test]
    fn test_parse_rgba() {
        assert_eq!(
            "#10203040".parse::<Color>().unwrap(),
            Color([0x10, 0x20, 0x30, 0x40])
        );
    }

    #[test]
    fn test_parse_invalid() {
        assert!("#12345".parse::<Color>().is_err());
        assert!("#GGGGGG".parse::<Color>().is_err());
    }

    #[test]
    fn test_parse_non_ascii_is_error() {
        assert!("#aééb".parse::<Color>().is_err());
        assert!(serde_json::from_str::<Color>("\"#aééb\"").is_err());
        assert!("#ff80é0".parse::<Color>().is_err());
    }

    #[test]
    fn test_json_round_trip_uses_hex_string() {
        let json = serde_json::to_string(&Color::rgb(1, 2, 3)).unwrap();
        assert_eq!(json, "\"#010203\"");
        let c: Color = serde_json::from_str("\"#0A0B0C80\"").unwrap();
        assert_eq!(c, Color([10, 11, 12, 128]));
    }

    #[test]
    fn test_tint() {
        assert_eq!(Color::BLACK.tint(1.0), Color::WHITE);
        assert_eq!(Color::BLACK.tint(0.0), Color::BLACK);
    }
}
