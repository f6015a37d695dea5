use crate::{assets::media::MediaAsset, settings::model::SubtitleSettings};

#[derive(Clone, Debug, Default)]
/// Everything one render request needs: two assets, lyric text, and subtitle settings.
///
/// Values are only ever produced by the `with_*` derivations below, each returning a complete
/// new state; [`crate::JobStore`] swaps them in whole.
pub struct JobState {
    audio: Option<MediaAsset>,
    background: Option<MediaAsset>,
    lyrics: String,
    settings: SubtitleSettings,
}

impl JobState {
    /// Fresh state with no assets, empty lyrics and default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Audio track, if one is set.
    pub fn audio(&self) -> Option<&MediaAsset> {
        self.audio.as_ref()
    }

    /// Background image, if one is set.
    pub fn background(&self) -> Option<&MediaAsset> {
        self.background.as_ref()
    }

    /// Raw lyric text as entered, never trimmed.
    pub fn lyrics(&self) -> &str {
        &self.lyrics
    }

    /// Subtitle settings; always fully populated.
    pub fn settings(&self) -> &SubtitleSettings {
        &self.settings
    }

    /// Number of cues (non-blank lines) in the lyric text.
    pub fn cue_count(&self) -> usize {
        lyric_cues(&self.lyrics).count()
    }

    /// Audio, background and non-empty lyrics are all present.
    pub fn is_submit_eligible(&self) -> bool {
        self.audio.is_some() && self.background.is_some() && !self.lyrics.is_empty()
    }

    /// Human-readable list of what still blocks submission; empty when eligible.
    pub fn missing_inputs(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.audio.is_none() {
            out.push("audio file");
        }
        if self.background.is_none() {
            out.push("background image");
        }
        if self.lyrics.is_empty() {
            out.push("lyrics");
        }
        out
    }

    pub(crate) fn with_audio(&self, audio: Option<MediaAsset>) -> Self {
        Self {
            audio,
            ..self.clone()
        }
    }

    pub(crate) fn with_background(&self, background: Option<MediaAsset>) -> Self {
        Self {
            background,
            ..self.clone()
        }
    }

    pub(crate) fn with_lyrics(&self, lyrics: String) -> Self {
        Self {
            lyrics,
            ..self.clone()
        }
    }

    pub(crate) fn with_settings(&self, settings: SubtitleSettings) -> Self {
        Self {
            settings,
            ..self.clone()
        }
    }
}

/// Cue lines of `lyrics`: each line trimmed, blank lines skipped.
pub fn lyric_cues(lyrics: &str) -> impl Iterator<Item = &str> {
    lyrics.lines().map(str::trim).filter(|l| !l.is_empty())
}

#[cfg(test)]
#[path = "../../tests/unit/job/state.rs"]
mod tests;
