use std::sync::Arc;

use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
};

use crate::{
    assets::{
        decode::ImageProbe,
        handles::{DecodeHandle, HandleRegistry},
        media::AssetId,
    },
    foundation::{
        core::{AspectRatio, ImageDims},
        error::LyricVidResult,
    },
    job::{state::JobState, store::JobWatch},
    preview::layout::{PreviewLayout, PreviewOpts, derive_layout},
    settings::model::SubtitleSettings,
};

/// Identifies one decode attempt: the asset it was started for plus a generation counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodeToken {
    asset: AssetId,
    generation: u64,
}

impl DecodeToken {
    /// Asset the decode was started for.
    pub fn asset(self) -> AssetId {
        self.asset
    }
}

/// Work order returned by [`PreviewCompositor::observe`] when a new background needs sizing.
#[derive(Debug)]
pub struct DecodeTicket {
    /// Pass back to [`PreviewCompositor::complete`] with the result.
    pub token: DecodeToken,
    /// Encoded image, shared with the open decode handle.
    pub bytes: Arc<[u8]>,
}

/// Turns job states into preview layouts.
///
/// Only the background identity and the settings matter; audio and lyric edits leave the
/// output unchanged. At most one decode handle is open at a time, and it is dropped as soon as
/// the dimensions arrive, the background is replaced or cleared, or the compositor is dropped.
#[derive(Debug)]
pub struct PreviewCompositor {
    opts: PreviewOpts,
    handles: HandleRegistry,
    generation: u64,
    background: Option<AssetId>,
    pending: Option<(DecodeToken, DecodeHandle)>,
    aspect_ratio: AspectRatio,
    settings: SubtitleSettings,
}

impl PreviewCompositor {
    /// Compositor with no background and default settings.
    pub fn new(opts: PreviewOpts, handles: HandleRegistry) -> Self {
        Self {
            opts,
            handles,
            generation: 0,
            background: None,
            pending: None,
            aspect_ratio: AspectRatio::DEFAULT,
            settings: SubtitleSettings::default(),
        }
    }

    /// Take in a new job state. Returns a ticket when the background changed to a new asset.
    ///
    /// While a new background is being sized the previous ratio stays in effect; clearing
    /// the background resets to 16:9 immediately.
    pub fn observe(&mut self, state: &JobState) -> Option<DecodeTicket> {
        if self.settings != *state.settings() {
            self.settings = state.settings().clone();
        }

        let next = state.background();
        let next_id = next.map(|a| a.id());
        if next_id == self.background {
            return None;
        }
        self.background = next_id;
        self.generation += 1;
        // Replacing or clearing revokes any in-flight handle.
        self.pending = None;

        let Some(asset) = next else {
            self.aspect_ratio = AspectRatio::DEFAULT;
            tracing::debug!("background cleared; preview back to 16:9");
            return None;
        };

        let handle = self.handles.acquire(asset);
        let token = DecodeToken {
            asset: asset.id(),
            generation: self.generation,
        };
        let bytes = handle.payload();
        self.pending = Some((token, handle));
        tracing::debug!(asset = asset.id().as_u64(), name = asset.name(), "sizing background");
        Some(DecodeTicket { token, bytes })
    }

    /// Apply a decode result. Results for anything but the current ticket are discarded.
    /// Returns whether the result was applied.
    pub fn complete(&mut self, token: DecodeToken, result: LyricVidResult<ImageDims>) -> bool {
        match &self.pending {
            Some((current, _)) if *current == token => {}
            _ => {
                tracing::debug!(asset = token.asset.as_u64(), "discarding stale decode result");
                return false;
            }
        }
        self.pending = None;

        self.aspect_ratio = match result {
            Ok(dims) => AspectRatio::from_dims(dims.width, dims.height).unwrap_or_else(|| {
                tracing::warn!(?dims, "zero-sized background; using 16:9");
                AspectRatio::DEFAULT
            }),
            Err(e) => {
                tracing::warn!(error = %e, "could not size background; using 16:9");
                AspectRatio::DEFAULT
            }
        };
        true
    }

    /// Observe `state` and, if needed, size the background inline with `probe`.
    pub fn refresh_with(&mut self, state: &JobState, probe: &dyn ImageProbe) -> PreviewLayout {
        if let Some(ticket) = self.observe(state) {
            let result = probe.dimensions(&ticket.bytes);
            self.complete(ticket.token, result);
        }
        self.layout()
    }

    /// Ratio currently used for the frame.
    pub fn aspect_ratio(&self) -> AspectRatio {
        self.aspect_ratio
    }

    /// A background decode is outstanding.
    pub fn is_sizing(&self) -> bool {
        self.pending.is_some()
    }

    /// Layout for the current ratio and settings.
    pub fn layout(&self) -> PreviewLayout {
        derive_layout(self.aspect_ratio, &self.settings, &self.opts)
    }
}

/// A running preview: a stream of layouts plus the task producing them.
#[derive(Debug)]
pub struct PreviewTask {
    layouts: watch::Receiver<PreviewLayout>,
    join: JoinHandle<()>,
}

impl PreviewTask {
    /// Subscribe to layout updates. Only actual layout changes are published.
    pub fn layouts(&self) -> watch::Receiver<PreviewLayout> {
        self.layouts.clone()
    }

    /// Latest published layout.
    pub fn current(&self) -> PreviewLayout {
        self.layouts.borrow().clone()
    }

    /// Stop the task. Any open decode handle is released with it.
    pub async fn shutdown(self) {
        self.join.abort();
        let _ = self.join.await;
    }
}

/// Drive a [`PreviewCompositor`] from a job subscription on the current tokio runtime.
///
/// Decodes run on the blocking pool; results that arrive after the background moved on are
/// ignored. The task ends when the store (every [`crate::JobStore`] clone) is dropped or no
/// layout receivers remain.
pub fn spawn_preview(
    mut jobs: JobWatch,
    probe: Arc<dyn ImageProbe>,
    opts: PreviewOpts,
    handles: HandleRegistry,
) -> PreviewTask {
    let mut compositor = PreviewCompositor::new(opts, handles);
    let (done_tx, mut done_rx) = mpsc::unbounded_channel();

    let initial = jobs.borrow_and_update().clone();
    let first_ticket = compositor.observe(&initial);
    let (layout_tx, layout_rx) = watch::channel(compositor.layout());

    let join = tokio::spawn(async move {
        if let Some(ticket) = first_ticket {
            start_decode(ticket, Arc::clone(&probe), done_tx.clone());
        }
        loop {
            tokio::select! {
                changed = jobs.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let state = jobs.borrow_and_update().clone();
                    if let Some(ticket) = compositor.observe(&state) {
                        start_decode(ticket, Arc::clone(&probe), done_tx.clone());
                    }
                    publish(&layout_tx, compositor.layout());
                }
                Some((token, result)) = done_rx.recv() => {
                    if compositor.complete(token, result) {
                        publish(&layout_tx, compositor.layout());
                    }
                }
                _ = layout_tx.closed() => break,
            }
        }
        tracing::debug!("preview task finished");
    });

    PreviewTask {
        layouts: layout_rx,
        join,
    }
}

type DecodeDone = (DecodeToken, LyricVidResult<ImageDims>);

fn start_decode(
    ticket: DecodeTicket,
    probe: Arc<dyn ImageProbe>,
    done: mpsc::UnboundedSender<DecodeDone>,
) {
    tokio::task::spawn_blocking(move || {
        let result = probe.dimensions(&ticket.bytes);
        // The receiver is gone only when the preview task has ended.
        let _ = done.send((ticket.token, result));
    });
}

fn publish(tx: &watch::Sender<PreviewLayout>, layout: PreviewLayout) {
    tx.send_if_modified(|current| {
        if *current == layout {
            return false;
        }
        *current = layout;
        true
    });
}

#[cfg(test)]
#[path = "../../tests/unit/preview/compositor.rs"]
mod tests;
