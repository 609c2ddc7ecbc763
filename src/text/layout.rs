//! Measurement, greedy wrapping and shrink-to-fit.

use crate::resources::Face;

/// Size of a single line: `(width, line height)`.
pub fn measure(face: &Face, size: f32, text: &str) -> (f32, f32) {
    (face.text_width(text, size), face.line_height(size))
}

/// Greedy word wrap.
///
/// A word joins the current line when `current + " " + word` still fits,
/// otherwise it starts a new line. Explicit newlines always break. A single
/// word wider than `max_width` sits alone on its line, unmodified. Non-empty
/// input always yields at least one line.
pub fn wrap(text: &str, face: &Face, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            if current.is_empty() {
                current.push_str(word);
                continue;
            }
            let candidate = format!("{} {}", current, word);
            if face.text_width(&candidate, size) <= max_width {
                current = candidate;
            } else {
                lines.push(std::mem::replace(&mut current, word.to_string()));
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }

    if lines.is_empty() && !text.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Wrapped text at the size it ended up with.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedText {
    pub size: f32,
    pub lines: Vec<String>,
    pub line_height: f32,
}

impl FittedText {
    /// Total height of all lines.
    pub fn height(&self) -> f32 {
        self.lines.len() as f32 * self.line_height
    }
}

/// Wrap `text`, shrinking the size in 5% steps until it fits in `max_lines`
/// lines of at most `max_width`. At `min_size` the text is cut to
/// `max_lines`, with "..." closing the last line.
pub fn fit_wrapped(
    text: &str,
    face: &Face,
    start_size: f32,
    min_size: f32,
    max_width: f32,
    max_lines: usize,
) -> FittedText {
    let max_lines = max_lines.max(1);
    let min_size = min_size.min(start_size);
    let mut size = start_size;

    loop {
        let lines = wrap(text, face, size, max_width);
        let fits = lines.len() <= max_lines
            && lines.iter().all(|l| face.text_width(l, size) <= max_width);

        if fits || size <= min_size {
            let lines = if lines.len() > max_lines {
                truncate_lines(lines, face, size, max_width, max_lines)
            } else {
                lines
            };
            return FittedText {
                size,
                lines,
                line_height: face.line_height(size),
            };
        }
        size = (size * 0.95).max(min_size);
    }
}

fn truncate_lines(
    mut lines: Vec<String>,
    face: &Face,
    size: f32,
    max_width: f32,
    max_lines: usize,
) -> Vec<String> {
    lines.truncate(max_lines);
    if let Some(last) = lines.last_mut() {
        *last = ellipsize(last, face, size, max_width);
    }
    lines
}

/// Append "..." to a line, dropping characters until it fits.
pub fn ellipsize(line: &str, face: &Face, size: f32, max_width: f32) -> String {
    let mut chars: Vec<char> = line.chars().collect();
    loop {
        let head: String = chars.iter().collect();
        let candidate = format!("{}...", head.trim_end());
        if chars.is_empty() || face.text_width(&candidate, size) <= max_width {
            return candidate;
        }
        chars.pop();
    }
}
