use std::{
    path::Path,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use anyhow::Context;

use crate::foundation::{error::LyricVidResult, math::fingerprint};

static NEXT_ASSET_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// Identity of one acquisition of an asset.
///
/// Every acquisition gets a fresh id, so re-selecting the same file is a new identity.
pub struct AssetId(u64);

impl AssetId {
    fn next() -> Self {
        Self(NEXT_ASSET_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Access raw 64-bit identifier.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

#[derive(Clone)]
/// A user-supplied binary file (audio track or background image) plus its metadata.
pub struct MediaAsset {
    id: AssetId,
    name: String,
    mime: String,
    fingerprint: u64,
    bytes: Arc<[u8]>,
}

impl std::fmt::Debug for MediaAsset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaAsset")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("mime", &self.mime)
            .field("fingerprint", &format_args!("{:016x}", self.fingerprint))
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl MediaAsset {
    /// Wrap in-memory bytes. `mime` falls back to a guess from the file name.
    pub fn from_bytes(
        name: impl Into<String>,
        mime: Option<String>,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Self {
        let name = name.into();
        let bytes = bytes.into();
        let mime = mime.unwrap_or_else(|| guess_mime(&name).to_string());
        Self {
            id: AssetId::next(),
            fingerprint: fingerprint(&bytes),
            name,
            mime,
            bytes,
        }
    }

    /// Read a file from disk.
    pub async fn from_path(path: &Path) -> LyricVidResult<Self> {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("read asset '{}'", path.display()))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "asset".to_string());
        let asset = Self::from_bytes(name, None, bytes);
        tracing::debug!(
            name = %asset.name,
            len = asset.len(),
            fingerprint = %format!("{:016x}", asset.fingerprint),
            "acquired asset from disk"
        );
        Ok(asset)
    }

    /// Identity of this acquisition; shared by clones.
    pub fn id(&self) -> AssetId {
        self.id
    }

    /// File name as supplied, used as the multipart file name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared or guessed MIME type.
    pub fn mime(&self) -> &str {
        &self.mime
    }

    /// Raw payload.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub(crate) fn shared_bytes(&self) -> Arc<[u8]> {
        Arc::clone(&self.bytes)
    }

    /// Payload length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// The payload is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// MIME type from a file extension; `application/octet-stream` when unknown.
pub fn guess_mime(name: &str) -> &'static str {
    let ext = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "m4a" => "audio/mp4",
        "aac" => "audio/aac",
        "flac" => "audio/flac",
        "ogg" => "audio/ogg",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/media.rs"]
mod tests;
