use std::{path::Path, time::Duration};

use anyhow::Context;
use reqwest::header::CONTENT_TYPE;

use crate::{
    foundation::error::{LyricVidError, LyricVidResult},
    job::state::JobState,
    render::{
        request::RenderRequest,
        response::{VideoArtifact, interpret_response},
    },
};

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
/// Where the renderer lives.
pub struct RendererConfig {
    /// Scheme, host and port, e.g. `http://127.0.0.1:8000`.
    pub base_url: String,
    /// Path of the render endpoint below `base_url`.
    pub endpoint: String,
    /// Optional connect timeout. There is no overall request timeout: renders take as long
    /// as they take.
    pub connect_timeout_ms: Option<u64>,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            endpoint: "create_video".to_string(),
            connect_timeout_ms: None,
        }
    }
}

impl RendererConfig {
    /// Config with the default endpoint under `base_url`.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Read a JSON config file. Missing keys take their defaults.
    pub fn from_path(path: &Path) -> LyricVidResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read renderer config '{}'", path.display()))?;
        serde_json::from_str(&text).map_err(|e| LyricVidError::serde(e.to_string()))
    }

    /// `base_url` and `endpoint` joined by exactly one `/`.
    pub fn endpoint_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.endpoint.trim_start_matches('/')
        )
    }
}

#[derive(Clone, Debug)]
/// HTTP client for the renderer's single `POST` endpoint.
pub struct RendererClient {
    http: reqwest::Client,
    url: String,
}

impl RendererClient {
    /// Client for the endpoint named by `config`.
    pub fn new(config: &RendererConfig) -> LyricVidResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(ms) = config.connect_timeout_ms {
            builder = builder.connect_timeout(Duration::from_millis(ms));
        }
        let http = builder
            .build()
            .map_err(|e| LyricVidError::Other(anyhow::anyhow!("build HTTP client: {e}")))?;
        Ok(Self {
            http,
            url: config.endpoint_url(),
        })
    }

    /// Full endpoint URL requests are posted to.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Encode `job`, send it, and interpret the answer.
    ///
    /// Ineligible jobs fail with [`LyricVidError::Validation`] before anything is sent.
    /// No retry: each call is one independent render.
    pub async fn submit(&self, job: &JobState) -> LyricVidResult<VideoArtifact> {
        let request = RenderRequest::from_job(job)?;
        tracing::debug!(cues = job.cue_count(), "job frozen for submission");
        self.send(request).await
    }

    /// Send an already frozen request and interpret the answer.
    #[tracing::instrument(skip_all, fields(url = %self.url))]
    pub async fn send(&self, request: RenderRequest) -> LyricVidResult<VideoArtifact> {
        tracing::info!(
            audio = request.audio().name(),
            image = request.image().name(),
            "submitting render job"
        );
        let form = request.into_form()?;

        let response = self
            .http
            .post(&self.url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| LyricVidError::transport(e.to_string()))?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        tracing::debug!(%status, ?content_type, "renderer responded");

        let body = match response.bytes().await {
            Ok(b) => b.to_vec(),
            Err(e) if status.is_success() => {
                return Err(LyricVidError::transport(format!("read video body: {e}")));
            }
            Err(e) => format!("<unreadable response body: {e}>").into_bytes(),
        };
        interpret_response(status.as_u16(), content_type.as_deref(), body)
    }
}
