use super::*;

#[test]
fn each_acquisition_gets_a_new_identity() {
    let a = MediaAsset::from_bytes("bg.png", None, vec![1u8, 2, 3]);
    let b = MediaAsset::from_bytes("bg.png", None, vec![1u8, 2, 3]);
    assert_ne!(a.id(), b.id());
    let expected = format!("{:016x}", crate::foundation::math::fingerprint(&[1, 2, 3]));
    assert!(format!("{a:?}").contains(&expected));
    assert!(format!("{b:?}").contains(&expected));
}

#[test]
fn clones_share_identity_and_payload() {
    let a = MediaAsset::from_bytes("song.mp3", None, vec![9u8; 16]);
    let b = a.clone();
    assert_eq!(a.id(), b.id());
    assert_eq!(b.len(), 16);
    assert!(!b.is_empty());
}

#[test]
fn mime_is_guessed_from_name_unless_given() {
    let a = MediaAsset::from_bytes("Song.MP3", None, Vec::<u8>::new());
    assert_eq!(a.mime(), "audio/mpeg");

    let b = MediaAsset::from_bytes("blob", Some("image/avif".to_string()), Vec::<u8>::new());
    assert_eq!(b.mime(), "image/avif");

    assert_eq!(guess_mime("cover.jpeg"), "image/jpeg");
    assert_eq!(guess_mime("noext"), "application/octet-stream");
}

#[tokio::test]
async fn from_path_reads_file_and_name() {
    let dir = std::env::temp_dir().join(format!("lyricvid_media_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("track.wav");
    std::fs::write(&path, b"RIFF....").unwrap();

    let asset = MediaAsset::from_path(&path).await.unwrap();
    assert_eq!(asset.name(), "track.wav");
    assert_eq!(asset.mime(), "audio/wav");
    assert_eq!(asset.bytes(), b"RIFF....");

    std::fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn from_path_missing_file_is_an_error() {
    let err = MediaAsset::from_path(Path::new("/definitely/not/here.png"))
        .await
        .unwrap_err();
    assert!(err.to_string().contains("read asset"));
}
