use std::sync::Arc;

use tokio::sync::watch;

use crate::{
    assets::media::MediaAsset, job::state::JobState, settings::model::SettingsPatch,
};

/// Receiving side of a [`JobStore`] subscription.
pub type JobWatch = watch::Receiver<Arc<JobState>>;

#[derive(Clone, Debug)]
/// Single owner of the current [`JobState`].
///
/// Writers go through the four named operations; each derives a complete new state from the
/// current one and publishes it in one swap, so observers never see a half-applied update.
/// Clones share the same state.
pub struct JobStore {
    tx: Arc<watch::Sender<Arc<JobState>>>,
}

impl Default for JobStore {
    fn default() -> Self {
        Self::new()
    }
}

impl JobStore {
    /// Store holding a fresh [`JobState`] with default settings.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Arc::new(JobState::new()));
        Self { tx: Arc::new(tx) }
    }

    /// Replace (or clear) the audio asset.
    pub fn set_audio(&self, audio: Option<MediaAsset>) {
        let id = audio.as_ref().map(|a| a.id().as_u64());
        self.apply("set_audio", |s| s.with_audio(audio));
        tracing::debug!(?id, "audio updated");
    }

    /// Replace (or clear) the background image.
    pub fn set_background(&self, background: Option<MediaAsset>) {
        let id = background.as_ref().map(|a| a.id().as_u64());
        self.apply("set_background", |s| s.with_background(background));
        tracing::debug!(?id, "background updated");
    }

    /// Replace the lyric text verbatim. Empty text is accepted.
    pub fn set_lyrics(&self, lyrics: impl Into<String>) {
        let lyrics = lyrics.into();
        let len = lyrics.len();
        self.apply("set_lyrics", |s| s.with_lyrics(lyrics));
        tracing::debug!(len, "lyrics updated");
    }

    /// Merge a sparse settings patch over the current settings.
    pub fn update_settings(&self, patch: &SettingsPatch) {
        self.apply("update_settings", |s| {
            s.with_settings(s.settings().merged(patch))
        });
        tracing::debug!(?patch, "settings updated");
    }

    /// Current state. The returned value is immutable and stays valid after later updates.
    pub fn snapshot(&self) -> Arc<JobState> {
        Arc::clone(&self.tx.borrow())
    }

    /// Submit-eligibility of the current state, evaluated on every call.
    pub fn is_submit_eligible(&self) -> bool {
        self.tx.borrow().is_submit_eligible()
    }

    /// Observe state changes. The receiver starts out seeing the current state as unchanged.
    pub fn subscribe(&self) -> JobWatch {
        self.tx.subscribe()
    }

    /// Number of live subscriptions.
    pub fn observer_count(&self) -> usize {
        self.tx.receiver_count()
    }

    fn apply(&self, op: &'static str, derive: impl FnOnce(&JobState) -> JobState) {
        self.tx.send_modify(|current| {
            *current = Arc::new(derive(current));
        });
        tracing::trace!(op, observers = self.tx.receiver_count(), "job state replaced");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/job/store.rs"]
mod tests;
