use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::foundation::error::{LyricVidError, LyricVidResult};

/// Name under which a rendered video is offered for download.
pub const ARTIFACT_FILE_NAME: &str = "lyrics_video.mp4";

#[derive(Clone, Debug, PartialEq, Eq)]
/// Something odd about a successful response that did not stop it from being accepted.
pub enum ResponseAnomaly {
    /// Declared content type is not `video/*`.
    UnexpectedContentType(String),
    /// No content type was declared.
    MissingContentType,
    /// The body was empty.
    EmptyBody,
}

impl std::fmt::Display for ResponseAnomaly {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedContentType(ct) => write!(f, "unexpected content type '{ct}'"),
            Self::MissingContentType => f.write_str("missing content type"),
            Self::EmptyBody => f.write_str("empty body"),
        }
    }
}

#[derive(Clone, Debug)]
/// The rendered video, ready to be saved.
pub struct VideoArtifact {
    /// Download name, always [`ARTIFACT_FILE_NAME`].
    pub file_name: String,
    /// Content type as declared by the renderer.
    pub content_type: Option<String>,
    /// Video payload.
    pub bytes: Vec<u8>,
    /// Oddities accepted along with the payload.
    pub anomalies: Vec<ResponseAnomaly>,
}

impl VideoArtifact {
    /// Write the video into `dir` (created if needed) and return the file path.
    pub async fn write_to_dir(&self, dir: &Path) -> LyricVidResult<PathBuf> {
        tokio::fs::create_dir_all(dir)
            .await
            .with_context(|| format!("create output dir '{}'", dir.display()))?;
        let path = dir.join(&self.file_name);
        tokio::fs::write(&path, &self.bytes)
            .await
            .with_context(|| format!("write video '{}'", path.display()))?;
        tracing::info!(path = %path.display(), len = self.bytes.len(), "saved video");
        Ok(path)
    }

    /// No anomalies were recorded.
    pub fn is_clean(&self) -> bool {
        self.anomalies.is_empty()
    }
}

/// Turn a renderer response into an artifact or an error.
///
/// Any 2xx is accepted whatever its declared type; a mismatch is logged and recorded on the
/// artifact. Every other status becomes [`LyricVidError::Request`] with the body as text.
pub fn interpret_response(
    status: u16,
    content_type: Option<&str>,
    body: Vec<u8>,
) -> LyricVidResult<VideoArtifact> {
    if !(200..300).contains(&status) {
        let text = String::from_utf8_lossy(&body).into_owned();
        tracing::warn!(status, body = %text, "renderer rejected the job");
        return Err(LyricVidError::request(status, text));
    }

    let mut anomalies = Vec::new();
    match content_type {
        None => anomalies.push(ResponseAnomaly::MissingContentType),
        Some(ct) if !is_video(ct) => {
            anomalies.push(ResponseAnomaly::UnexpectedContentType(ct.to_string()))
        }
        Some(_) => {}
    }
    if body.is_empty() {
        anomalies.push(ResponseAnomaly::EmptyBody);
    }
    for a in &anomalies {
        tracing::warn!(anomaly = %a, "accepting renderer response anyway");
    }

    Ok(VideoArtifact {
        file_name: ARTIFACT_FILE_NAME.to_string(),
        content_type: content_type.map(str::to_string),
        bytes: body,
        anomalies,
    })
}

fn is_video(content_type: &str) -> bool {
    let essence = content_type.split(';').next().unwrap_or("").trim();
    essence
        .get(..6)
        .is_some_and(|p| p.eq_ignore_ascii_case("video/"))
}

#[cfg(test)]
#[path = "../../tests/unit/render/response.rs"]
mod tests;
