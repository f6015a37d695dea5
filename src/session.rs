use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use tokio::sync::watch;

use crate::{
    foundation::error::{LyricVidError, LyricVidResult},
    job::store::JobStore,
    render::{client::RendererClient, request::RenderRequest, response::VideoArtifact},
};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Where the most recent submission stands.
pub enum SubmitStatus {
    /// Nothing submitted yet, or the last submission was abandoned.
    #[default]
    Idle,
    /// A request is on the wire.
    InFlight,
    /// The renderer returned a video.
    Completed {
        /// Name the video is saved under.
        file_name: String,
        /// Payload size.
        bytes: usize,
    },
    /// The submission failed.
    Failed {
        /// Display form of the error.
        message: String,
        /// HTTP status for renderer rejections; `None` for validation and transport failures.
        status: Option<u16>,
    },
}

/// A [`JobStore`] paired with the renderer it submits to.
///
/// At most one submission runs at a time. Editing through [`JobSession::store`] stays
/// possible while a render is in flight; the in-flight request carries the snapshot taken
/// when it started.
#[derive(Clone, Debug)]
pub struct JobSession {
    store: JobStore,
    client: RendererClient,
    status: Arc<watch::Sender<SubmitStatus>>,
    in_flight: Arc<AtomicBool>,
}

impl JobSession {
    /// Session over `store` submitting through `client`.
    pub fn new(store: JobStore, client: RendererClient) -> Self {
        let (tx, _rx) = watch::channel(SubmitStatus::Idle);
        Self {
            store,
            client,
            status: Arc::new(tx),
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    /// The store edits go through.
    pub fn store(&self) -> &JobStore {
        &self.store
    }

    /// Status of the most recent submission.
    pub fn status(&self) -> SubmitStatus {
        self.status.borrow().clone()
    }

    /// Observe status changes.
    pub fn subscribe_status(&self) -> watch::Receiver<SubmitStatus> {
        self.status.subscribe()
    }

    /// A submission is currently running.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// The job is complete and nothing is currently being rendered.
    pub fn can_submit(&self) -> bool {
        self.store.is_submit_eligible() && !self.is_in_flight()
    }

    /// Submit the current job and wait for the video.
    ///
    /// Rejected with [`LyricVidError::Validation`] while another submission is running.
    pub async fn submit(&self) -> LyricVidResult<VideoArtifact> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(LyricVidError::validation("a render is already in flight"));
        }
        let _guard = InFlightGuard {
            flag: Arc::clone(&self.in_flight),
            status: Arc::clone(&self.status),
        };

        let request = match RenderRequest::from_job(&self.store.snapshot()) {
            Ok(request) => request,
            Err(e) => {
                self.status.send_replace(SubmitStatus::Failed {
                    message: e.to_string(),
                    status: None,
                });
                return Err(e);
            }
        };
        self.status.send_replace(SubmitStatus::InFlight);
        let result = self.client.send(request).await;

        let next = match &result {
            Ok(artifact) => SubmitStatus::Completed {
                file_name: artifact.file_name.clone(),
                bytes: artifact.bytes.len(),
            },
            Err(e) => SubmitStatus::Failed {
                message: e.to_string(),
                status: e.status(),
            },
        };
        tracing::info!(status = ?next, "submission finished");
        self.status.send_replace(next);
        result
    }
}

// Clears the in-flight flag on every exit path, including a dropped `submit` future.
struct InFlightGuard {
    flag: Arc<AtomicBool>,
    status: Arc<watch::Sender<SubmitStatus>>,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
        self.status.send_if_modified(|s| {
            if *s == SubmitStatus::InFlight {
                *s = SubmitStatus::Idle;
                true
            } else {
                false
            }
        });
    }
}

#[cfg(test)]
#[path = "../tests/unit/session.rs"]
mod tests;
