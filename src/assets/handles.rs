use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use crate::assets::media::{AssetId, MediaAsset};

/// Tracks temporary handles opened to learn background dimensions.
///
/// Cloning shares the same counter.
#[derive(Clone, Debug, Default)]
pub struct HandleRegistry {
    live: Arc<AtomicUsize>,
}

impl HandleRegistry {
    /// Registry with no open handles.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a handle over `asset`'s payload. Released when the returned value is dropped.
    pub fn acquire(&self, asset: &MediaAsset) -> DecodeHandle {
        let live = self.live.fetch_add(1, Ordering::AcqRel) + 1;
        tracing::debug!(asset = asset.id().as_u64(), live, "opened decode handle");
        DecodeHandle {
            asset: asset.id(),
            bytes: asset.shared_bytes(),
            live: Arc::clone(&self.live),
        }
    }

    /// Handles currently open.
    pub fn live(&self) -> usize {
        self.live.load(Ordering::Acquire)
    }
}

/// Scoped view of an asset payload handed to an [`crate::ImageProbe`].
#[derive(Debug)]
pub struct DecodeHandle {
    asset: AssetId,
    bytes: Arc<[u8]>,
    live: Arc<AtomicUsize>,
}

impl DecodeHandle {
    /// Asset this handle was opened for.
    pub fn asset(&self) -> AssetId {
        self.asset
    }

    /// Payload to decode, borrowed from this handle for the duration of the decode.
    pub(crate) fn payload(&self) -> Arc<[u8]> {
        Arc::clone(&self.bytes)
    }
}

impl Drop for DecodeHandle {
    fn drop(&mut self) {
        let live = self.live.fetch_sub(1, Ordering::AcqRel) - 1;
        tracing::debug!(asset = self.asset.as_u64(), live, "released decode handle");
    }
}
