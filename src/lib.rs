//! Lyricvid composes lyric-subtitle video jobs and hands them to a remote renderer.
//!
//! A job is an audio track, a background image, lyric text and a set of subtitle settings.
//! This crate owns everything on the client side of that exchange:
//!
//! 1. **Store**: [`JobStore`] holds the current [`JobState`] and changes it only through four
//!    named operations, publishing every new state to observers.
//! 2. **Preview**: [`PreviewCompositor`] (driven by [`spawn_preview`]) sizes the frame from the
//!    background's aspect ratio and stacks the primary and secondary captions above the
//!    bottom margin, without ever rendering video.
//! 3. **Submit**: [`RendererClient`] encodes a submit-eligible job as a multipart `POST` to
//!    `<base>/create_video` and interprets the reply as a [`VideoArtifact`] or a typed
//!    [`LyricVidError`]. [`JobSession`] pairs a store with a client and keeps submissions
//!    one at a time.
//!
//! Decoding and HTTP run on tokio; all state handed across tasks is immutable and shared by
//! `Arc`.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod foundation;
mod job;
mod preview;
mod render;
mod session;
mod settings;

pub use assets::decode::{HeaderProbe, ImageProbe};
pub use assets::handles::{DecodeHandle, HandleRegistry};
pub use assets::media::{AssetId, MediaAsset, guess_mime};
pub use foundation::color::{normalize_hex_color, parse_hex_rgb};
pub use foundation::core::{AspectRatio, ImageDims, Rect, Rgb8, Size};
pub use foundation::error::{LyricVidError, LyricVidResult};
pub use job::state::{JobState, lyric_cues};
pub use job::store::{JobStore, JobWatch};
pub use preview::compositor::{
    DecodeTicket, DecodeToken, PreviewCompositor, PreviewTask, spawn_preview,
};
pub use preview::layout::{
    MAX_WIDTH_FRACTION, PreviewLayout, PreviewOpts, SubtitleBox, TextStyle, derive_layout,
};
pub use preview::text::{LINE_HEIGHT_EM, TextBlock, advance_em, measure_line, wrap};
pub use render::client::{RendererClient, RendererConfig};
pub use render::request::{RenderRequest, decimal, field};
pub use render::response::{
    ARTIFACT_FILE_NAME, ResponseAnomaly, VideoArtifact, interpret_response,
};
pub use session::{JobSession, SubmitStatus};
pub use settings::domain::{
    BOTTOM_MARGIN_DOMAIN, FONT_SIZE_DOMAIN, OUTLINE_SIZE_DOMAIN, SliderDomain,
};
pub use settings::fonts::{EN_FONT_CATALOG, JA_FONT_CATALOG, is_cataloged_en, is_cataloged_ja};
pub use settings::model::{SettingsPatch, SubtitleSettings};
