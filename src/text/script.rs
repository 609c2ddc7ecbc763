//! Script detection for font selection and right-to-left display order.

use serde::{Deserialize, Serialize};

/// Writing systems the tag renderer distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Script {
    Latin,
    Cyrillic,
    Greek,
    Georgian,
    Armenian,
    Arabic,
    Hebrew,
}

impl Script {
    /// Script of a single character, `None` for digits, punctuation and spaces.
    pub fn of_char(ch: char) -> Option<Script> {
        let script = match ch as u32 {
            0x0041..=0x005A | 0x0061..=0x007A | 0x00C0..=0x024F | 0x1E00..=0x1EFF => Script::Latin,
            0x0370..=0x03FF | 0x1F00..=0x1FFF => Script::Greek,
            0x0400..=0x052F | 0x2DE0..=0x2DFF | 0xA640..=0xA69F => Script::Cyrillic,
            0x0530..=0x058F => Script::Armenian,
            0x0590..=0x05FF | 0xFB1D..=0xFB4F => Script::Hebrew,
            0x0600..=0x06FF | 0x0750..=0x077F | 0x08A0..=0x08FF | 0xFB50..=0xFDFF
            | 0xFE70..=0xFEFF => Script::Arabic,
            0x10A0..=0x10FF | 0x1C90..=0x1CBF | 0x2D00..=0x2D2F => Script::Georgian,
            _ => return None,
        };
        Some(script)
    }

    /// Most frequent script among the letters of `text`; Latin when there are none.
    pub fn detect(text: &str) -> Script {
        let mut counts: Vec<(Script, usize)> = Vec::new();
        for script in text.chars().filter_map(Script::of_char) {
            match counts.iter_mut().find(|(s, _)| *s == script) {
                Some((_, n)) => *n += 1,
                None => counts.push((script, 1)),
            }
        }
        // max_by_key returns the last maximum; reverse so the first-seen script wins ties.
        counts
            .into_iter()
            .rev()
            .max_by_key(|(_, n)| *n)
            .map(|(s, _)| s)
            .unwrap_or(Script::Latin)
    }

    pub fn is_rtl(self) -> bool {
        matches!(self, Script::Arabic | Script::Hebrew)
    }
}

/// Reorder a logical-order line for left-to-right drawing.
///
/// Runs of right-to-left letters (with the spaces and punctuation between
/// them) are reversed in place; everything else keeps logical order. Lines
/// whose dominant script is right-to-left also have their run order reversed.
pub fn visual_order(line: &str) -> String {
    let is_rtl = |c: char| Script::of_char(c).is_some_and(Script::is_rtl);
    if !line.chars().any(is_rtl) {
        return line.to_string();
    }

    // Split into runs: (rtl, chars). Neutral chars join the preceding run.
    let mut runs: Vec<(bool, Vec<char>)> = Vec::new();
    for ch in line.chars() {
        let strong = Script::of_char(ch).map(Script::is_rtl);
        let digit_or_strong_ltr = ch.is_ascii_digit() || strong == Some(false);
        let rtl = match strong {
            Some(r) => r,
            None if digit_or_strong_ltr => false,
            None => runs.last().map(|(r, _)| *r).unwrap_or(false),
        };
        match runs.last_mut() {
            Some((r, chars)) if *r == rtl => chars.push(ch),
            _ => runs.push((rtl, vec![ch])),
        }
    }

    for (rtl, chars) in runs.iter_mut() {
        if *rtl {
            chars.reverse();
        }
    }
    if Script::detect(line).is_rtl() {
        runs.reverse();
    }

    runs.into_iter().flat_map(|(_, chars)| chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect() {
        assert_eq!(Script::detect("Hello"), Script::Latin);
        assert_eq!(Script::detect("ლეპტოპი"), Script::Georgian);
        assert_eq!(Script::detect("Ноутбук 15\""), Script::Cyrillic);
        assert_eq!(Script::detect("שלום"), Script::Hebrew);
        assert_eq!(Script::detect("123 !!"), Script::Latin);
    }

    #[test]
    fn test_detect_majority() {
        assert_eq!(Script::detect("ლეპტოპი HP"), Script::Georgian);
    }

    #[test]
    fn test_rtl() {
        assert!(Script::Arabic.is_rtl());
        assert!(Script::Hebrew.is_rtl());
        assert!(!Script::Georgian.is_rtl());
    }

    #[test]
    fn test_visual_order_ltr_untouched() {
        assert_eq!(visual_order("Price: 10"), "Price: 10");
    }

    #[test]
    fn test_visual_order_reverses_rtl() {
        assert_eq!(visual_order("שלום"), "םולש");
    }

    #[test]
    fn test_visual_order_keeps_numbers() {
        // Digits stay in logical order inside a right-to-left line.
        let out = visual_order("אב 12");
        assert!(out.contains("12"));
        assert!(out.ends_with("בא"));
    }
}
