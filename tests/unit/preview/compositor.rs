use std::{io::Cursor, time::Duration};

use super::*;
use crate::{
    assets::{decode::HeaderProbe, media::MediaAsset},
    foundation::error::LyricVidError,
    job::store::JobStore,
    settings::model::SettingsPatch,
};

struct FixedProbe(ImageDims);

impl ImageProbe for FixedProbe {
    fn dimensions(&self, _bytes: &[u8]) -> LyricVidResult<ImageDims> {
        Ok(self.0)
    }
}

struct FailingProbe;

impl ImageProbe for FailingProbe {
    fn dimensions(&self, _bytes: &[u8]) -> LyricVidResult<ImageDims> {
        Err(LyricVidError::asset_decode("corrupt"))
    }
}

fn png(width: u32, height: u32) -> Vec<u8> {
    let img = image::GrayImage::from_pixel(width, height, image::Luma([128]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageLuma8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

fn bg(bytes: Vec<u8>) -> MediaAsset {
    MediaAsset::from_bytes("bg.png", None, bytes)
}

fn dims(width: u32, height: u32) -> ImageDims {
    ImageDims { width, height }
}

#[test]
fn no_background_means_default_ratio_and_no_ticket() {
    let mut c = PreviewCompositor::new(PreviewOpts::default(), HandleRegistry::new());
    assert!(c.observe(&JobState::new()).is_none());
    assert_eq!(c.aspect_ratio(), AspectRatio::DEFAULT);
    assert!(!c.is_sizing());
}

#[test]
fn full_hd_background_yields_sixteen_ninths() {
    let mut c = PreviewCompositor::new(PreviewOpts::default(), HandleRegistry::new());
    let state = JobState::new().with_background(Some(bg(png(1920, 1080))));
    let layout = c.refresh_with(&state, &HeaderProbe);
    assert!((layout.aspect_ratio.as_f64() - 16.0 / 9.0).abs() < 1e-12);
}

#[test]
fn decode_handle_is_released_once_dimensions_arrive() {
    let reg = HandleRegistry::new();
    let mut c = PreviewCompositor::new(PreviewOpts::default(), reg.clone());
    let state = JobState::new().with_background(Some(bg(vec![0u8; 8])));

    let ticket = c.observe(&state).unwrap();
    assert_eq!(reg.live(), 1);
    assert!(c.is_sizing());

    assert!(c.complete(ticket.token, Ok(dims(1000, 500))));
    assert_eq!(reg.live(), 0);
    assert_eq!(c.aspect_ratio().as_f64(), 2.0);
    assert_eq!(c.layout().frame.height, 320.0);
}

#[test]
fn ticket_decodes_the_payload_held_by_its_handle() {
    let mut c = PreviewCompositor::new(PreviewOpts::default(), HandleRegistry::new());
    let asset = bg(vec![7u8; 4]);
    let ticket = c
        .observe(&JobState::new().with_background(Some(asset.clone())))
        .unwrap();

    let (token, handle) = c.pending.as_ref().unwrap();
    assert_eq!(*token, ticket.token);
    assert_eq!(handle.asset(), asset.id());
    assert!(Arc::ptr_eq(&ticket.bytes, &handle.payload()));
    assert_eq!(&*ticket.bytes, asset.bytes());
}

#[test]
fn late_result_for_replaced_background_is_ignored() {
    let reg = HandleRegistry::new();
    let mut c = PreviewCompositor::new(PreviewOpts::default(), reg.clone());

    let a = JobState::new().with_background(Some(bg(vec![1u8])));
    let ta = c.observe(&a).unwrap();
    let b = a.with_background(Some(bg(vec![2u8])));
    let tb = c.observe(&b).unwrap();
    assert_eq!(reg.live(), 1, "replacing must release the first handle");
    assert_ne!(ta.token, tb.token);

    assert!(!c.complete(ta.token, Ok(dims(100, 400))));
    assert_eq!(c.aspect_ratio(), AspectRatio::DEFAULT);
    assert!(c.is_sizing());

    assert!(c.complete(tb.token, Ok(dims(400, 100))));
    assert_eq!(c.aspect_ratio().as_f64(), 4.0);
    assert_eq!(reg.live(), 0);
}

#[test]
fn result_arriving_after_clear_is_ignored() {
    let reg = HandleRegistry::new();
    let mut c = PreviewCompositor::new(PreviewOpts::default(), reg.clone());
    let with_bg = JobState::new().with_background(Some(bg(vec![1u8])));
    let t = c.observe(&with_bg).unwrap();

    assert!(c.observe(&with_bg.with_background(None)).is_none());
    assert_eq!(reg.live(), 0);
    assert!(!c.complete(t.token, Ok(dims(1, 3))));
    assert_eq!(c.aspect_ratio(), AspectRatio::DEFAULT);
}

#[test]
fn clearing_background_resets_ratio() {
    let mut c = PreviewCompositor::new(PreviewOpts::default(), HandleRegistry::new());
    let with_bg = JobState::new().with_background(Some(bg(vec![1u8])));
    let t = c.observe(&with_bg).unwrap();
    c.complete(t.token, Ok(dims(300, 100)));
    assert_eq!(c.aspect_ratio().as_f64(), 3.0);

    c.observe(&with_bg.with_background(None));
    assert_eq!(c.aspect_ratio(), AspectRatio::DEFAULT);
}

#[test]
fn decode_failure_falls_back_to_default() {
    let reg = HandleRegistry::new();
    let mut c = PreviewCompositor::new(PreviewOpts::default(), reg.clone());
    let state = JobState::new().with_background(Some(bg(b"junk".to_vec())));
    let layout = c.refresh_with(&state, &FailingProbe);
    assert_eq!(layout.aspect_ratio, AspectRatio::DEFAULT);
    assert_eq!(reg.live(), 0);

    let zero = state.with_background(Some(bg(vec![0u8])));
    let t = c.observe(&zero).unwrap();
    assert!(c.complete(t.token, Ok(dims(0, 0))));
    assert_eq!(c.aspect_ratio(), AspectRatio::DEFAULT);
}

#[test]
fn dropping_compositor_releases_pending_handle() {
    let reg = HandleRegistry::new();
    let mut c = PreviewCompositor::new(PreviewOpts::default(), reg.clone());
    let _ticket = c
        .observe(&JobState::new().with_background(Some(bg(vec![1u8]))))
        .unwrap();
    assert_eq!(reg.live(), 1);
    drop(c);
    assert_eq!(reg.live(), 0);
}

#[test]
fn same_background_is_not_decoded_twice() {
    let mut c = PreviewCompositor::new(PreviewOpts::default(), HandleRegistry::new());
    let state = JobState::new().with_background(Some(bg(vec![1u8])));
    assert!(c.observe(&state).is_some());
    assert!(c.observe(&state.with_lyrics("x".to_string())).is_none());
}

#[test]
fn lyrics_and_audio_do_not_change_the_layout() {
    let mut c = PreviewCompositor::new(PreviewOpts::default(), HandleRegistry::new());
    let state = JobState::new();
    let before = c.refresh_with(&state, &HeaderProbe);
    let edited = state
        .with_lyrics("new words".to_string())
        .with_audio(Some(MediaAsset::from_bytes("a.mp3", None, vec![1u8])));
    let after = c.refresh_with(&edited, &HeaderProbe);
    assert_eq!(before, after);
}

#[test]
fn settings_changes_flow_into_layout() {
    let mut c = PreviewCompositor::new(PreviewOpts::default(), HandleRegistry::new());
    let state = JobState::new();
    let patched = state.with_settings(state.settings().merged(&SettingsPatch {
        font_size: Some(50),
        ..SettingsPatch::default()
    }));
    let layout = c.refresh_with(&patched, &HeaderProbe);
    assert_eq!(layout.primary.style.font_px, 50.0);
    assert_eq!(layout.secondary.style.font_px, 25.0);
}

async fn wait_for(
    rx: &mut watch::Receiver<PreviewLayout>,
    pred: impl Fn(&PreviewLayout) -> bool,
) -> PreviewLayout {
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            {
                let current = rx.borrow_and_update();
                if pred(&*current) {
                    return (*current).clone();
                }
            }
            rx.changed().await.unwrap();
        }
    })
    .await
    .expect("layout condition not reached in time")
}

#[tokio::test]
async fn driver_tracks_background_and_settings() {
    let store = JobStore::new();
    let reg = HandleRegistry::new();
    let task = spawn_preview(
        store.subscribe(),
        Arc::new(FixedProbe(dims(1000, 500))),
        PreviewOpts::default(),
        reg.clone(),
    );
    let mut rx = task.layouts();
    assert_eq!(task.current().aspect_ratio, AspectRatio::DEFAULT);

    store.set_background(Some(bg(vec![1u8, 2, 3])));
    let l = wait_for(&mut rx, |l| l.aspect_ratio.as_f64() == 2.0).await;
    assert_eq!(l.frame.height, 320.0);
    assert_eq!(reg.live(), 0);

    store.update_settings(&SettingsPatch {
        font_size: Some(48),
        ..SettingsPatch::default()
    });
    let l = wait_for(&mut rx, |l| l.primary.style.font_px == 48.0).await;
    assert_eq!(l.secondary.style.font_px, 24.0);
    assert_eq!(l.aspect_ratio.as_f64(), 2.0);

    store.set_lyrics("line1\nline2");
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
    assert!(!rx.has_changed().unwrap(), "lyrics must not republish the layout");

    task.shutdown().await;
}

#[tokio::test]
async fn driver_falls_back_when_decode_fails() {
    let store = JobStore::new();
    let reg = HandleRegistry::new();
    let task = spawn_preview(
        store.subscribe(),
        Arc::new(FailingProbe),
        PreviewOpts::default(),
        reg.clone(),
    );
    let mut rx = task.layouts();

    store.set_background(Some(bg(b"junk".to_vec())));
    store.update_settings(&SettingsPatch {
        bottom_margin: Some(0),
        ..SettingsPatch::default()
    });
    let l = wait_for(&mut rx, |l| l.bottom_margin == 0.0).await;
    assert_eq!(l.aspect_ratio, AspectRatio::DEFAULT);

    tokio::time::timeout(Duration::from_secs(5), async {
        while reg.live() != 0 {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("decode handle not released");

    task.shutdown().await;
}

#[tokio::test]
async fn driver_stops_when_store_is_dropped() {
    let store = JobStore::new();
    let task = spawn_preview(
        store.subscribe(),
        Arc::new(HeaderProbe),
        PreviewOpts::default(),
        HandleRegistry::new(),
    );
    drop(store);
    tokio::time::timeout(Duration::from_secs(5), task.join)
        .await
        .expect("preview task did not stop")
        .unwrap();
}
