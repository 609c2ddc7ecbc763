//! Font faces and per-script font sets.
//!
//! TTF/OTF files are rasterized with ab_glyph. Any font that cannot be loaded
//! is replaced by the built-in Spleen 12x24 bitmap face, scaled to the
//! requested pixel height, so a render never stops on a missing font.

use ab_glyph::{Font, FontArc, ScaleFont, point};
use log::warn;
use serde::{Deserialize, Serialize};
use spleen_font::{FONT_12X24, PSF2Font};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::OnceLock;

use crate::text::Script;

/// Spleen cell size used by the bitmap face.
const CELL_W: usize = 12;
const CELL_H: usize = 24;
/// Baseline row inside the Spleen 12x24 cell.
const CELL_BASELINE: f32 = 19.0;

/// Code point ranges decoded from the bitmap font; anything else draws a box.
const BITMAP_RANGES: &[(u32, u32)] = &[(0x20, 0x52F), (0x2000, 0x25FF)];

/// Glyph cells decoded once from the embedded Spleen font.
static BITMAP_CELLS: OnceLock<HashMap<char, Vec<bool>>> = OnceLock::new();

/// A loaded font face.
#[derive(Clone)]
pub enum Face {
    /// Outline font rasterized with anti-aliasing.
    Outline(FontArc),
    /// Built-in bitmap font; `bold` draws a one-cell-pixel offset copy.
    Bitmap { bold: bool },
}

impl std::fmt::Debug for Face {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Face::Outline(_) => f.write_str("Face::Outline"),
            Face::Bitmap { bold } => write!(f, "Face::Bitmap {{ bold: {} }}", bold),
        }
    }
}

impl Face {
    /// Load a font file, or `None` (with a warning) when it is missing or invalid.
    pub fn load(path: &Path) -> Option<Face> {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Font {} unavailable ({}), using built-in font", path.display(), e);
                return None;
            }
        };
        match FontArc::try_from_vec(bytes) {
            Ok(font) => Some(Face::Outline(font)),
            Err(e) => {
                warn!("Font {} could not be parsed ({}), using built-in font", path.display(), e);
                None
            }
        }
    }

    /// The built-in bitmap face.
    pub const fn builtin(bold: bool) -> Face {
        Face::Bitmap { bold }
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, Face::Bitmap { .. })
    }

    /// Distance from the top of the line box to the baseline.
    pub fn ascent(&self, size: f32) -> f32 {
        match self {
            Face::Outline(font) => font.as_scaled(size).ascent(),
            Face::Bitmap { .. } => CELL_BASELINE * size / CELL_H as f32,
        }
    }

    /// Height of one line box.
    pub fn line_height(&self, size: f32) -> f32 {
        match self {
            Face::Outline(font) => {
                let scaled = font.as_scaled(size);
                scaled.ascent() - scaled.descent() + scaled.line_gap()
            }
            Face::Bitmap { .. } => size,
        }
    }

    /// Horizontal advance of a whole string.
    pub fn text_width(&self, text: &str, size: f32) -> f32 {
        match self {
            Face::Outline(font) => {
                let scaled = font.as_scaled(size);
                let mut width = 0.0;
                let mut prev = None;
                for ch in text.chars() {
                    let id = font.glyph_id(ch);
                    if let Some(p) = prev {
                        width += scaled.kern(p, id);
                    }
                    width += scaled.h_advance(id);
                    prev = Some(id);
                }
                width
            }
            Face::Bitmap { .. } => text.chars().count() as f32 * bitmap_advance(size),
        }
    }

    /// Rasterize a single line. `plot(x, y, coverage)` receives pixel
    /// coordinates relative to the top-left of the line box.
    pub fn rasterize(&self, text: &str, size: f32, mut plot: impl FnMut(i32, i32, f32)) {
        match self {
            Face::Outline(font) => {
                let scaled = font.as_scaled(size);
                let ascent = scaled.ascent();
                let mut caret = 0.0f32;
                let mut prev = None;

                for ch in text.chars() {
                    let id = font.glyph_id(ch);
                    if let Some(p) = prev {
                        caret += scaled.kern(p, id);
                    }
                    let glyph = id.with_scale_and_position(size, point(caret, ascent));
                    caret += scaled.h_advance(id);
                    prev = Some(id);

                    if let Some(outlined) = font.outline_glyph(glyph) {
                        let bounds = outlined.px_bounds();
                        outlined.draw(|px, py, coverage| {
                            plot(
                                px as i32 + bounds.min.x as i32,
                                py as i32 + bounds.min.y as i32,
                                coverage,
                            );
                        });
                    }
                }
            }
            Face::Bitmap { bold } => rasterize_bitmap(text, size, *bold, plot),
        }
    }
}

#[inline]
fn bitmap_advance(size: f32) -> f32 {
    CELL_W as f32 * size / CELL_H as f32
}

/// Spleen 12x24 cell for a character, `None` when the font lacks it.
fn spleen_cell(spleen: &mut PSF2Font, ch: char) -> Option<Vec<bool>> {
    let mut cell = vec![false; CELL_W * CELL_H];
    let utf8 = ch.to_string();
    let glyph = spleen.glyph_for_utf8(utf8.as_bytes())?;
    for (row_y, row) in glyph.enumerate() {
        for (col_x, on) in row.enumerate() {
            let idx = row_y * CELL_W + col_x;
            if row_y < CELL_H && col_x < CELL_W {
                cell[idx] = on;
            }
        }
    }
    Some(cell)
}

/// Box outline for characters the bitmap font does not cover.
fn box_cell() -> Vec<bool> {
    let mut cell = vec![false; CELL_W * CELL_H];
    for x in 1..CELL_W - 1 {
        cell[4 * CELL_W + x] = true;
        cell[(CELL_H - 3) * CELL_W + x] = true;
    }
    for y in 4..CELL_H - 2 {
        cell[y * CELL_W + 1] = true;
        cell[y * CELL_W + CELL_W - 2] = true;
    }
    cell
}

fn bitmap_cells() -> &'static HashMap<char, Vec<bool>> {
    BITMAP_CELLS.get_or_init(|| {
        let Ok(mut spleen) = PSF2Font::new(FONT_12X24) else {
            warn!("Bitmap font failed to parse; drawing boxes");
            return HashMap::new();
        };
        BITMAP_RANGES
            .iter()
            .flat_map(|&(lo, hi)| (lo..=hi).filter_map(char::from_u32))
            .filter_map(|ch| spleen_cell(&mut spleen, ch).map(|cell| (ch, cell)))
            .collect()
    })
}

fn rasterize_bitmap(text: &str, size: f32, bold: bool, mut plot: impl FnMut(i32, i32, f32)) {
    let cells = bitmap_cells();
    let missing = box_cell();
    let scale = size / CELL_H as f32;
    let advance = bitmap_advance(size);
    let target_w = advance.ceil().max(1.0) as usize;
    let target_h = size.ceil().max(1.0) as usize;
    let embolden = if bold { (scale.round() as i32).max(1) } else { 0 };

    for (i, ch) in text.chars().enumerate() {
        if ch.is_whitespace() {
            continue;
        }
        let cell = cells.get(&ch).unwrap_or(&missing);
        let origin = (i as f32 * advance).round() as i32;

        for ty in 0..target_h {
            let sy = ((ty as f32 / scale) as usize).min(CELL_H - 1);
            for tx in 0..target_w {
                let sx = ((tx as f32 / scale) as usize).min(CELL_W - 1);
                if cell[sy * CELL_W + sx] {
                    plot(origin + tx as i32, ty as i32, 1.0);
                    if embolden > 0 {
                        plot(origin + tx as i32 + embolden, ty as i32, 1.0);
                    }
                }
            }
        }
    }
}

/// Regular/bold font paths for one script.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontPair {
    pub regular: Option<String>,
    pub bold: Option<String>,
}

/// Font file configuration, relative to the resource root.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSpec {
    /// Default faces, used for any script without its own entry.
    #[serde(flatten)]
    pub default: FontPair,
    /// Script name (`"georgian"`, `"arabic"`, ...) → faces.
    pub scripts: BTreeMap<Script, FontPair>,
}

impl FontSpec {
    /// Conventional layout under `fonts/`.
    pub fn conventional() -> Self {
        Self {
            default: FontPair {
                regular: Some("fonts/Regular.ttf".into()),
                bold: Some("fonts/Bold.ttf".into()),
            },
            scripts: BTreeMap::new(),
        }
    }
}

/// Loaded faces: a default regular/bold pair plus per-script overrides.
#[derive(Debug, Clone)]
pub struct FontSet {
    regular: Face,
    bold: Face,
    scripts: HashMap<Script, (Face, Face)>,
}

impl Default for FontSet {
    fn default() -> Self {
        Self::builtin()
    }
}

impl FontSet {
    /// Only the built-in bitmap face.
    pub fn builtin() -> Self {
        Self {
            regular: Face::builtin(false),
            bold: Face::builtin(true),
            scripts: HashMap::new(),
        }
    }

    /// Load every configured file; failures fall back and never error.
    pub fn load(root: &Path, spec: &FontSpec) -> Self {
        let load_or = |path: &Option<String>, fallback: &Face| {
            path.as_deref()
                .and_then(|p| Face::load(&root.join(p)))
                .unwrap_or_else(|| fallback.clone())
        };

        let regular = load_or(&spec.default.regular, &Face::builtin(false));
        let bold = match spec.default.bold {
            Some(_) => load_or(&spec.default.bold, &regular),
            // No bold configured: bitmap can fake it, outline reuses regular.
            None if regular.is_builtin() => Face::builtin(true),
            None => regular.clone(),
        };

        let scripts = spec
            .scripts
            .iter()
            .map(|(script, pair)| {
                let r = load_or(&pair.regular, &regular);
                let b = load_or(&pair.bold, &r);
                (*script, (r, b))
            })
            .collect();

        Self {
            regular,
            bold,
            scripts,
        }
    }

    /// Face for the dominant script of `text`.
    pub fn face_for(&self, text: &str, bold: bool) -> &Face {
        let script = Script::detect(text);
        match self.scripts.get(&script) {
            Some((r, b)) => {
                if bold {
                    b
                } else {
                    r
                }
            }
            None => self.default_face(bold),
        }
    }

    pub fn default_face(&self, bold: bool) -> &Face {
        if bold { &self.bold } else { &self.regular }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitmap_metrics() {
        let face = Face::builtin(false);
        assert_eq!(face.text_width("abcd", 48.0), 96.0);
        assert_eq!(face.line_height(48.0), 48.0);
        assert!((face.ascent(24.0) - 19.0).abs() < 1e-4);
    }

    #[test]
    fn test_bitmap_rasterize_has_pixels_within_box() {
        let face = Face::builtin(false);
        let mut count = 0;
        let mut max_x = 0;
        face.rasterize("Hi", 48.0, |x, y, c| {
            assert!(y >= 0 && y < 48);
            assert!(c > 0.0);
            max_x = max_x.max(x);
            count += 1;
        });
        assert!(count > 0);
        assert!(max_x < 48);
    }

    #[test]
    fn test_bitmap_cells_decoded_once() {
        let first = bitmap_cells();
        assert!(first.contains_key(&'A'));
        assert!(std::ptr::eq(first, bitmap_cells()));
        // Outside the decoded ranges a box is drawn instead of nothing.
        let mut n = 0;
        Face::builtin(false).rasterize("\u{10A0}", 24.0, |_, _, _| n += 1);
        assert!(n > 0);
    }

    #[test]
    fn test_bold_bitmap_is_heavier() {
        let count = |face: Face| {
            let mut n = 0;
            face.rasterize("Sale", 30.0, |_, _, _| n += 1);
            n
        };
        assert!(count(Face::builtin(true)) > count(Face::builtin(false)));
    }

    #[test]
    fn test_missing_font_falls_back() {
        assert!(Face::load(Path::new("/definitely/not/here.ttf")).is_none());
        let set = FontSet::load(Path::new("/definitely/not"), &FontSpec::conventional());
        assert!(set.default_face(false).is_builtin());
        assert!(set.default_face(true).is_builtin());
    }

    #[test]
    fn test_font_spec_json() {
        let spec: FontSpec = serde_json::from_str(
            r#"{"regular": "a.ttf", "scripts": {"georgian": {"regular": "ka.ttf"}}}"#,
        )
        .unwrap();
        assert_eq!(spec.default.regular.as_deref(), Some("a.ttf"));
        assert!(spec.default.bold.is_none());
        assert_eq!(
            spec.scripts.get(&Script::Georgian).and_then(|p| p.regular.as_deref()),
            Some("ka.ttf")
        );
    }
}
