use super::*;

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba([10, 20, 30, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn header_probe_reads_png_dimensions() {
    let dims = HeaderProbe.dimensions(&png_bytes(40, 20)).unwrap();
    assert_eq!(
        dims,
        ImageDims {
            width: 40,
            height: 20
        }
    );
}

#[test]
fn header_probe_rejects_garbage() {
    let err = HeaderProbe.dimensions(b"not an image").unwrap_err();
    assert!(matches!(err, LyricVidError::AssetDecode(_)));
}

#[test]
fn header_probe_rejects_truncated_png() {
    let mut bytes = png_bytes(8, 8);
    bytes.truncate(12);
    assert!(HeaderProbe.dimensions(&bytes).is_err());
}
