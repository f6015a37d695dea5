use crate::foundation::{
    core::Rgb8,
    error::{LyricVidError, LyricVidResult},
};

/// Parse `#RRGGBB` (or bare `RRGGBB`, case-insensitive) into [`Rgb8`]. Alpha is not accepted.
pub fn parse_hex_rgb(s: &str) -> Result<Rgb8, String> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);

    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    if s.len() != 6 || !s.is_ascii() {
        return Err("hex color must be #RRGGBB (case-insensitive)".to_owned());
    }

    Ok(Rgb8 {
        r: hex_byte(&s[0..2])?,
        g: hex_byte(&s[2..4])?,
        b: hex_byte(&s[4..6])?,
    })
}

/// Canonical `#RRGGBB` (uppercase) form of a color-picker value.
pub fn normalize_hex_color(s: &str) -> LyricVidResult<String> {
    let c = parse_hex_rgb(s).map_err(LyricVidError::validation)?;
    Ok(format!("#{:02X}{:02X}{:02X}", c.r, c.g, c.b))
}
