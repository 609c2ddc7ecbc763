//! Spec label → icon asset matching.
//!
//! Keywords are tried longest first, so a multi-word trigger such as
//! `"print speed (iso)"` wins over `"print speed"` when both occur.

use std::sync::OnceLock;

/// Icon used when no keyword matches.
pub const GENERIC_ICON: &str = "icons/info.png";

/// Icon asset → trigger keywords (lowercase).
static ICON_KEYWORDS: &[(&str, &[&str])] = &[
    ("icons/cpu.png", &["processor", "cpu", "chipset", "cores"]),
    ("icons/ram.png", &["ram", "memory"]),
    ("icons/storage.png", &["ssd", "hdd", "storage", "emmc", "hard drive"]),
    ("icons/display.png", &["display", "screen", "refresh rate", "panel"]),
    ("icons/resolution.png", &["resolution", "print resolution", "dpi"]),
    ("icons/gpu.png", &["graphics", "gpu", "video card"]),
    ("icons/battery.png", &["battery", "battery life", "mah"]),
    ("icons/weight.png", &["weight", "kg"]),
    ("icons/dimensions.png", &["dimensions", "size", "height", "width", "depth"]),
    ("icons/os.png", &["operating system", "os", "windows"]),
    ("icons/camera.png", &["camera", "webcam", "megapixel"]),
    ("icons/wifi.png", &["wi-fi", "wifi", "wireless", "wlan"]),
    ("icons/bluetooth.png", &["bluetooth"]),
    ("icons/ports.png", &["port", "ports", "usb", "hdmi", "connectivity", "interface"]),
    ("icons/keyboard.png", &["keyboard", "keys", "switches", "layout"]),
    ("icons/color.png", &["color", "colour"]),
    ("icons/warranty.png", &["warranty", "guarantee"]),
    ("icons/print_speed.png", &["print speed", "ppm"]),
    ("icons/print_speed_iso.png", &["print speed (iso)"]),
    ("icons/printer.png", &["print technology", "printing technology", "duplex"]),
    ("icons/audio.png", &["audio", "speakers", "sound", "microphone"]),
    ("icons/power.png", &["power", "wattage", "power supply"]),
    ("icons/material.png", &["material", "material details"]),
];

/// Flat (keyword, icon) list sorted by keyword length, longest first.
fn sorted_keywords() -> &'static [(&'static str, &'static str)] {
    static SORTED: OnceLock<Vec<(&'static str, &'static str)>> = OnceLock::new();
    SORTED.get_or_init(|| {
        let mut flat: Vec<_> = ICON_KEYWORDS
            .iter()
            .flat_map(|(icon, keywords)| keywords.iter().map(move |kw| (*kw, *icon)))
            .collect();
        // Stable sort keeps table order among equal lengths.
        flat.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        flat
    })
}

/// Whether `keyword` occurs in `haystack` delimited by non-alphanumerics.
fn contains_word(haystack: &str, keyword: &str) -> bool {
    let mut start = 0;
    while let Some(rel) = haystack[start..].find(keyword) {
        let begin = start + rel;
        let end = begin + keyword.len();
        let before_ok = haystack[..begin]
            .chars()
            .next_back()
            .is_none_or(|c| !c.is_alphanumeric());
        let after_ok = haystack[end..]
            .chars()
            .next()
            .is_none_or(|c| !c.is_alphanumeric());
        if before_ok && after_ok {
            return true;
        }
        // Advance past the first char of this occurrence.
        start = begin + haystack[begin..].chars().next().map_or(1, char::len_utf8);
    }
    false
}

/// Icon asset path for a spec line.
pub fn icon_for(spec: &str) -> &'static str {
    let lower = spec.to_lowercase();
    sorted_keywords()
        .iter()
        .find(|(keyword, _)| contains_word(&lower, keyword))
        .map(|(_, icon)| *icon)
        .unwrap_or(GENERIC_ICON)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_longest_keyword_wins() {
        assert_eq!(icon_for("Print Speed (ISO): 20ppm"), "icons/print_speed_iso.png");
        assert_eq!(icon_for("Print Speed: 22ppm"), "icons/print_speed.png");
    }

    #[test]
    fn test_whole_word_only() {
        assert_eq!(icon_for("RAM: 16GB"), "icons/ram.png");
        // "ram" inside "program" must not match.
        assert_eq!(icon_for("Program: Office"), GENERIC_ICON);
        assert_eq!(icon_for("OS: Windows 11"), "icons/os.png");
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(icon_for("BLUETOOTH 5.3"), "icons/bluetooth.png");
    }

    #[test]
    fn test_generic_fallback() {
        assert_eq!(icon_for("Made with love"), GENERIC_ICON);
        assert_eq!(icon_for(""), GENERIC_ICON);
    }

    #[test]
    fn test_sorted_longest_first() {
        let sorted = sorted_keywords();
        assert!(sorted.windows(2).all(|w| w[0].0.len() >= w[1].0.len()));
    }

    #[test]
    fn test_contains_word_boundaries() {
        assert!(contains_word("weight: 2 kg", "kg"));
        assert!(!contains_word("weight: 2kg", "kg"));
        assert!(contains_word("print speed (iso): 20", "print speed (iso)"));
    }
}
