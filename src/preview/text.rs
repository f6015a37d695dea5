//! Font-free text metrics for the preview.
//!
//! The preview never loads font files, so glyph advances are estimated per character class.
//! Good enough to show where a line will wrap and how tall the subtitle block gets.

/// Line box height in em.
pub const LINE_HEIGHT_EM: f64 = 1.2;

const FULL_WIDTH_EM: f64 = 1.0;
const HALF_WIDTH_EM: f64 = 0.55;
const SPACE_EM: f64 = 0.3;

/// Wrapped text with its estimated extent in px (outline excluded).
#[derive(Clone, Debug, PartialEq)]
pub struct TextBlock {
    /// Lines after wrapping, trailing spaces removed.
    pub lines: Vec<String>,
    /// Widest line.
    pub width: f64,
    /// Line count times the line height.
    pub height: f64,
}

/// Estimated advance of `c` in em.
pub fn advance_em(c: char) -> f64 {
    if c.is_whitespace() {
        SPACE_EM
    } else if is_full_width(c) {
        FULL_WIDTH_EM
    } else {
        HALF_WIDTH_EM
    }
}

/// Estimated width of a single unwrapped line in px.
pub fn measure_line(text: &str, font_px: f64) -> f64 {
    text.chars().map(advance_em).sum::<f64>() * font_px
}

/// Greedy caption wrap: break at the last space on the overflowing line if there is one,
/// otherwise between characters (CJK text has no spaces).
pub fn wrap(text: &str, font_px: f64, max_width: f64) -> TextBlock {
    let max_width = max_width.max(font_px);
    let mut lines = Vec::<String>::new();
    let mut cur = String::new();
    let mut cur_w = 0.0;

    for c in text.chars() {
        let w = advance_em(c) * font_px;
        if cur_w + w > max_width && !cur.is_empty() {
            // An overflowing space is itself the break; the line so far fits.
            if c == ' ' {
                lines.push(cur.trim_end().to_string());
                cur.clear();
                cur_w = 0.0;
                continue;
            }
            match cur.rfind(' ') {
                Some(idx) if idx > 0 => {
                    let rest = cur[idx + 1..].to_string();
                    cur.truncate(idx);
                    lines.push(cur.trim_end().to_string());
                    cur = rest;
                }
                _ => {
                    lines.push(cur.trim_end().to_string());
                    cur = String::new();
                }
            }
            cur_w = measure_line(&cur, font_px);
        }
        cur.push(c);
        cur_w += w;
    }
    if !cur.is_empty() || lines.is_empty() {
        lines.push(cur.trim_end().to_string());
    }

    let width = lines
        .iter()
        .map(|l| measure_line(l, font_px))
        .fold(0.0, f64::max)
        .min(max_width);
    let height = lines.len() as f64 * font_px * LINE_HEIGHT_EM;
    TextBlock {
        lines,
        width,
        height,
    }
}

fn is_full_width(c: char) -> bool {
    matches!(
        u32::from(c),
        0x1100..=0x115F
            | 0x2E80..=0xA4CF
            | 0xAC00..=0xD7A3
            | 0xF900..=0xFAFF
            | 0xFE30..=0xFE4F
            | 0xFF00..=0xFF60
            | 0xFFE0..=0xFFE6
            | 0x20000..=0x3FFFD
    )
}

#[cfg(test)]
#[path = "../../tests/unit/preview/text.rs"]
mod tests;
