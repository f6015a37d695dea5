use std::io::Cursor;

use crate::foundation::{
    core::ImageDims,
    error::{LyricVidError, LyricVidResult},
};

/// Capability that learns the native pixel size of an encoded image.
///
/// Implementations may block; the preview driver calls them off the async runtime.
pub trait ImageProbe: Send + Sync {
    /// Read width and height from encoded image bytes.
    fn dimensions(&self, bytes: &[u8]) -> LyricVidResult<ImageDims>;
}

/// [`ImageProbe`] backed by the `image` crate. Reads headers only; pixels are never decoded.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeaderProbe;

impl ImageProbe for HeaderProbe {
    fn dimensions(&self, bytes: &[u8]) -> LyricVidResult<ImageDims> {
        let reader = image::ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| LyricVidError::asset_decode(format!("sniff image format: {e}")))?;
        if reader.format().is_none() {
            return Err(LyricVidError::asset_decode("unrecognized image format"));
        }
        let (width, height) = reader
            .into_dimensions()
            .map_err(|e| LyricVidError::asset_decode(format!("read image header: {e}")))?;
        Ok(ImageDims { width, height })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
