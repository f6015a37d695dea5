use reqwest::multipart::{Form, Part};

use crate::{
    assets::media::MediaAsset,
    foundation::error::{LyricVidError, LyricVidResult},
    job::state::JobState,
    settings::model::SubtitleSettings,
};

/// Multipart field names expected by the renderer's `create_video` endpoint.
pub mod field {
    /// Audio file part.
    pub const MUSIC_FILE: &str = "music_file";
    /// Background image part.
    pub const IMAGE_FILE: &str = "image_file";
    /// Raw lyric text.
    pub const LYRICS: &str = "lyrics";
    /// Primary font size.
    pub const FONT_SIZE: &str = "font_size";
    /// Text color.
    pub const FONT_COLOR: &str = "font_color";
    /// Japanese font family.
    pub const FONT_NAME_JA: &str = "font_name_ja";
    /// Latin font family.
    pub const FONT_NAME_EN: &str = "font_name_en";
    /// Outline color.
    pub const OUTLINE_COLOR: &str = "outline_color";
    /// Outline width.
    pub const OUTLINE_SIZE: &str = "outline_size";
    /// Space below the secondary line.
    pub const BOTTOM_MARGIN: &str = "bottom_margin";
    /// `"true"` or `"false"`.
    pub const ENABLE_FADE: &str = "enable_fade";
}

#[derive(Clone, Debug)]
/// A submit-eligible job, frozen for encoding.
pub struct RenderRequest {
    audio: MediaAsset,
    image: MediaAsset,
    lyrics: String,
    settings: SubtitleSettings,
}

impl RenderRequest {
    /// Freeze `job` for sending. Fails with a validation error (and no network effect) when
    /// audio, background or lyrics are missing.
    pub fn from_job(job: &JobState) -> LyricVidResult<Self> {
        let (Some(audio), Some(image)) = (job.audio(), job.background()) else {
            return Err(missing(job));
        };
        if job.lyrics().is_empty() {
            return Err(missing(job));
        }
        Ok(Self {
            audio: audio.clone(),
            image: image.clone(),
            lyrics: job.lyrics().to_string(),
            settings: job.settings().clone(),
        })
    }

    /// Audio sent as `music_file`.
    pub fn audio(&self) -> &MediaAsset {
        &self.audio
    }

    /// Image sent as `image_file`.
    pub fn image(&self) -> &MediaAsset {
        &self.image
    }

    /// Non-file fields in wire order, values exactly as sent.
    pub fn text_fields(&self) -> Vec<(&'static str, String)> {
        let s = &self.settings;
        vec![
            (field::LYRICS, self.lyrics.clone()),
            (field::FONT_SIZE, s.font_size.to_string()),
            (field::FONT_COLOR, s.color.clone()),
            (field::FONT_NAME_JA, s.font_family_ja.clone()),
            (field::FONT_NAME_EN, s.font_family_en.clone()),
            (field::OUTLINE_COLOR, s.outline_color.clone()),
            (field::OUTLINE_SIZE, decimal(s.outline_size)),
            (field::BOTTOM_MARGIN, s.bottom_margin.to_string()),
            (field::ENABLE_FADE, s.enable_fade.to_string()),
        ]
    }

    /// Build the multipart body: the two files first, then [`RenderRequest::text_fields`].
    pub fn into_form(self) -> LyricVidResult<Form> {
        let mut form = Form::new()
            .part(field::MUSIC_FILE, file_part(field::MUSIC_FILE, &self.audio)?)
            .part(field::IMAGE_FILE, file_part(field::IMAGE_FILE, &self.image)?);
        for (name, value) in self.text_fields() {
            form = form.text(name, value);
        }
        Ok(form)
    }
}

/// Shortest decimal form: `0`, `2`, `1.25`.
pub fn decimal(v: f64) -> String {
    v.to_string()
}

fn file_part(name: &'static str, asset: &MediaAsset) -> LyricVidResult<Part> {
    Part::bytes(asset.bytes().to_vec())
        .file_name(asset.name().to_string())
        .mime_str(asset.mime())
        .map_err(|e| LyricVidError::validation(format!("{name}: invalid content type: {e}")))
}

fn missing(job: &JobState) -> LyricVidError {
    LyricVidError::validation(format!(
        "cannot submit: missing {}",
        job.missing_inputs().join(", ")
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/request.rs"]
mod tests;
