/// Convenience result type used across lyricvid.
pub type LyricVidResult<T> = Result<T, LyricVidError>;

/// Top-level error taxonomy for job composition and renderer hand-off.
#[derive(thiserror::Error, Debug)]
pub enum LyricVidError {
    /// A job or input was rejected before any network effect occurred.
    #[error("validation error: {0}")]
    Validation(String),

    /// The renderer answered with a non-success HTTP status.
    #[error("renderer returned status {status}: {body}")]
    Request {
        /// HTTP status code.
        status: u16,
        /// Response body text, verbatim.
        body: String,
    },

    /// No response was obtained from the renderer.
    #[error("transport error: {0}")]
    Transport(String),

    /// Background image dimensions could not be determined.
    #[error("asset decode error: {0}")]
    AssetDecode(String),

    /// Errors when serializing or deserializing settings or configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LyricVidError {
    /// Build a [`LyricVidError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`LyricVidError::Request`] value.
    pub fn request(status: u16, body: impl Into<String>) -> Self {
        Self::Request {
            status,
            body: body.into(),
        }
    }

    /// Build a [`LyricVidError::Transport`] value.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Build a [`LyricVidError::AssetDecode`] value.
    pub fn asset_decode(msg: impl Into<String>) -> Self {
        Self::AssetDecode(msg.into())
    }

    /// Build a [`LyricVidError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// HTTP status carried by a [`LyricVidError::Request`]; `None` for every other kind.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Request { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
