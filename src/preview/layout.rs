use crate::{
    foundation::{
        color::parse_hex_rgb,
        core::{AspectRatio, Rect, Rgb8, Size},
    },
    preview::text,
    settings::model::SubtitleSettings,
};

/// Subtitle boxes may use at most this share of the frame width.
pub const MAX_WIDTH_FRACTION: f64 = 0.9;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Knobs for the preview frame.
pub struct PreviewOpts {
    /// On-screen frame width in px; the height follows the background aspect ratio.
    pub frame_width: f64,
    /// Caption shown on the primary (Japanese) line.
    pub placeholder_primary: String,
    /// Caption shown on the secondary (Latin) line.
    pub placeholder_secondary: String,
}

impl Default for PreviewOpts {
    fn default() -> Self {
        Self {
            frame_width: 640.0,
            placeholder_primary: "ここに歌詞が表示されます".to_string(),
            placeholder_secondary: "Lyrics will appear here".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Paint parameters for one subtitle line.
pub struct TextStyle {
    /// Font family name.
    pub font_family: String,
    /// Font size in px.
    pub font_px: f64,
    /// Text color.
    pub fill: Rgb8,
    /// Outline color.
    pub stroke: Rgb8,
    /// Outline width in px; zero means no outline.
    pub stroke_px: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// One placed subtitle line (possibly wrapped).
pub struct SubtitleBox {
    /// Wrapped caption lines.
    pub lines: Vec<String>,
    /// Box in frame coordinates, outline included.
    pub rect: Rect,
    /// Width cap the text was wrapped against.
    pub max_width: f64,
    /// How the line is painted.
    pub style: TextStyle,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Derived on-screen layout of the preview. Never stored; recomputed from settings and the
/// background aspect ratio.
pub struct PreviewLayout {
    /// Background width over height, or 16:9.
    pub aspect_ratio: AspectRatio,
    /// Preview frame size in px.
    pub frame: Size,
    /// Japanese line, stacked directly on top of `secondary`.
    pub primary: SubtitleBox,
    /// Latin line at half the primary size.
    pub secondary: SubtitleBox,
    /// Empty band between `secondary` and the frame bottom.
    pub bottom_margin: f64,
}

/// Place the two-language subtitle block in a frame of the given aspect ratio.
///
/// Stacked from the bottom: `bottom_margin` of empty space, the secondary line, then the
/// primary line with no gap. Both lines are horizontally centered.
#[tracing::instrument(level = "trace", skip(settings, opts))]
pub fn derive_layout(
    aspect_ratio: AspectRatio,
    settings: &SubtitleSettings,
    opts: &PreviewOpts,
) -> PreviewLayout {
    let frame = Size::new(
        opts.frame_width,
        aspect_ratio.height_for_width(opts.frame_width),
    );
    let max_width = frame.width * MAX_WIDTH_FRACTION;
    let fill = color_or(&settings.color, Rgb8::WHITE, "color");
    let stroke = color_or(&settings.outline_color, Rgb8::BLACK, "outline_color");
    let bottom_margin = f64::from(settings.bottom_margin);

    let secondary_style = TextStyle {
        font_family: settings.font_family_en.clone(),
        font_px: settings.secondary_font_size(),
        fill,
        stroke,
        stroke_px: settings.outline_size,
    };
    let secondary = place_line(
        &opts.placeholder_secondary,
        secondary_style,
        frame.width,
        max_width,
        frame.height - bottom_margin,
    );

    let primary_style = TextStyle {
        font_family: settings.font_family_ja.clone(),
        font_px: f64::from(settings.font_size),
        fill,
        stroke,
        stroke_px: settings.outline_size,
    };
    let primary = place_line(
        &opts.placeholder_primary,
        primary_style,
        frame.width,
        max_width,
        secondary.rect.y0,
    );

    PreviewLayout {
        aspect_ratio,
        frame,
        primary,
        secondary,
        bottom_margin,
    }
}

fn place_line(
    caption: &str,
    style: TextStyle,
    frame_width: f64,
    max_width: f64,
    bottom: f64,
) -> SubtitleBox {
    let pad = style.stroke_px.max(0.0);
    let block = text::wrap(caption, style.font_px, (max_width - 2.0 * pad).max(1.0));
    let w = (block.width + 2.0 * pad).min(max_width);
    let h = block.height + 2.0 * pad;
    let x0 = (frame_width - w) * 0.5;
    SubtitleBox {
        lines: block.lines,
        rect: Rect::new(x0, bottom - h, x0 + w, bottom),
        max_width,
        style,
    }
}

fn color_or(hex: &str, fallback: Rgb8, field: &'static str) -> Rgb8 {
    parse_hex_rgb(hex).unwrap_or_else(|e| {
        tracing::warn!(field, value = hex, error = %e, "unparseable color in preview");
        fallback
    })
}

#[cfg(test)]
#[path = "../../tests/unit/preview/layout.rs"]
mod tests;
