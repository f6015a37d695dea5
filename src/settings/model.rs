use std::path::Path;

use anyhow::Context;

use crate::foundation::error::{LyricVidError, LyricVidResult};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Typography and layout parameters for the two-language subtitle block.
///
/// Settings are replaced wholesale: [`SubtitleSettings::merged`] returns a new value and never
/// touches the receiver. No range checks happen here; input widgets clamp to their
/// [`crate::SliderDomain`] before a patch is built.
pub struct SubtitleSettings {
    /// Japanese (primary line) font family.
    pub font_family_ja: String,
    /// Latin (secondary line) font family.
    pub font_family_en: String,
    /// Primary line size in px. The secondary line is always half of this.
    pub font_size: u32,
    /// Fill color, `#RRGGBB`.
    pub color: String,
    /// Outline color, `#RRGGBB`.
    pub outline_color: String,
    /// Outline width in px.
    pub outline_size: f64,
    /// Space reserved below the secondary line, in px.
    pub bottom_margin: u32,
    /// Ask the renderer to fade the video in and out. Carried through opaquely.
    pub enable_fade: bool,
}

impl Default for SubtitleSettings {
    fn default() -> Self {
        Self {
            font_family_ja: "Noto Sans JP".to_string(),
            font_family_en: "Roboto".to_string(),
            font_size: 32,
            color: "#FFFFFF".to_string(),
            outline_color: "#000000".to_string(),
            outline_size: 0.0,
            bottom_margin: 50,
            enable_fade: true,
        }
    }
}

impl SubtitleSettings {
    /// Secondary (Latin) line size: exactly half the primary size, fractional when odd.
    pub fn secondary_font_size(&self) -> f64 {
        f64::from(self.font_size) / 2.0
    }

    /// Merge `patch` over `self`. Fields absent from the patch keep their current value.
    pub fn merged(&self, patch: &SettingsPatch) -> Self {
        Self {
            font_family_ja: patch
                .font_family_ja
                .clone()
                .unwrap_or_else(|| self.font_family_ja.clone()),
            font_family_en: patch
                .font_family_en
                .clone()
                .unwrap_or_else(|| self.font_family_en.clone()),
            font_size: patch.font_size.unwrap_or(self.font_size),
            color: patch.color.clone().unwrap_or_else(|| self.color.clone()),
            outline_color: patch
                .outline_color
                .clone()
                .unwrap_or_else(|| self.outline_color.clone()),
            outline_size: patch.outline_size.unwrap_or(self.outline_size),
            bottom_margin: patch.bottom_margin.unwrap_or(self.bottom_margin),
            enable_fade: patch.enable_fade.unwrap_or(self.enable_fade),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
/// Sparse update of [`SubtitleSettings`]; `None` means "leave as is".
pub struct SettingsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// See [`SubtitleSettings::font_family_ja`].
    pub font_family_ja: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// See [`SubtitleSettings::font_family_en`].
    pub font_family_en: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// See [`SubtitleSettings::font_size`].
    pub font_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// See [`SubtitleSettings::color`].
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// See [`SubtitleSettings::outline_color`].
    pub outline_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// See [`SubtitleSettings::outline_size`].
    pub outline_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// See [`SubtitleSettings::bottom_margin`].
    pub bottom_margin: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// See [`SubtitleSettings::enable_fade`].
    pub enable_fade: Option<bool>,
}

impl SettingsPatch {
    /// True when no field is set, i.e. merging is a no-op.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Parse a patch from JSON text.
    pub fn from_json_str(s: &str) -> LyricVidResult<Self> {
        serde_json::from_str(s).map_err(|e| LyricVidError::serde(e.to_string()))
    }

    /// Read and parse a JSON patch file.
    pub fn from_path(path: &Path) -> LyricVidResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read settings patch '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Overlay `other` on top of `self`; fields set in `other` win.
    pub fn and(mut self, other: SettingsPatch) -> Self {
        macro_rules! take {
            ($($f:ident),*) => {
                $(if other.$f.is_some() { self.$f = other.$f; })*
            };
        }
        take!(
            font_family_ja,
            font_family_en,
            font_size,
            color,
            outline_color,
            outline_size,
            bottom_margin,
            enable_fade
        );
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/settings/model.rs"]
mod tests;
