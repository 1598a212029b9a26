//! End-to-end normalization scenarios through the public API.

use std::io::Cursor;
use std::path::Path;

use dishcrop_core::{
    Config, CropRegion, ImageError, NormalizeReport, Normalizer, SourceImage, TARGET_SIZE,
};
use image::{DynamicImage, GenericImageView, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};

fn config_in(dir: &Path) -> Config {
    let mut config = Config::default();
    config.general.scratch_dir = Some(dir.to_path_buf());
    config
}

fn encode(img: &DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, format).unwrap();
    buffer.into_inner()
}

/// Left half red, right half blue, so the crop position shows in the output.
fn split_image(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, _| {
        if x < width / 2 {
            Rgb([255, 0, 0])
        } else {
            Rgb([0, 0, 255])
        }
    }))
}

async fn run(dir: &Path, source: SourceImage) -> (Vec<u8>, NormalizeReport) {
    let normalizer = Normalizer::new(&config_in(dir));
    let (payload, report) = normalizer.normalize_with_report(&source).await.unwrap();
    (payload.decode_bytes().unwrap(), report)
}

fn assert_square_jpeg(bytes: &[u8]) -> DynamicImage {
    assert_eq!(&bytes[0..3], &[0xFF, 0xD8, 0xFF], "JPEG signature");
    assert_eq!(image::guess_format(bytes).unwrap(), ImageFormat::Jpeg);
    let decoded = image::load_from_memory(bytes).unwrap();
    assert_eq!(decoded.dimensions(), (TARGET_SIZE, TARGET_SIZE));
    decoded
}

#[tokio::test]
async fn landscape_1920x1080() {
    let dir = tempfile::tempdir().unwrap();
    let bytes = encode(&split_image(1920, 1080), ImageFormat::Png);
    let (jpeg, report) = run(dir.path(), SourceImage::from_bytes(bytes, "wide.png")).await;

    assert_eq!(
        report.crop,
        CropRegion {
            x: 420,
            y: 0,
            size: 1080
        }
    );
    let out = assert_square_jpeg(&jpeg).to_rgb8();
    // Crop is centered on the red/blue boundary.
    assert!(out.get_pixel(100, 320)[0] > 200);
    assert!(out.get_pixel(540, 320)[2] > 200);
}

#[tokio::test]
async fn portrait_800x1200() {
    let dir = tempfile::tempdir().unwrap();
    let bytes = encode(&split_image(800, 1200), ImageFormat::Jpeg);
    let (jpeg, report) = run(dir.path(), SourceImage::from_bytes(bytes, "tall.jpg")).await;

    assert_eq!(
        report.crop,
        CropRegion {
            x: 0,
            y: 200,
            size: 800
        }
    );
    assert_eq!((report.source_width, report.source_height), (800, 1200));
    assert_square_jpeg(&jpeg);
}

#[tokio::test]
async fn square_500x500_is_upscaled() {
    let dir = tempfile::tempdir().unwrap();
    let bytes = encode(&split_image(500, 500), ImageFormat::Png);
    let (jpeg, report) = run(dir.path(), SourceImage::from_bytes(bytes, "square.png")).await;

    assert_eq!(
        report.crop,
        CropRegion {
            x: 0,
            y: 0,
            size: 500
        }
    );
    assert_square_jpeg(&jpeg);
}

#[tokio::test]
async fn transparent_png_becomes_opaque_jpeg() {
    let dir = tempfile::tempdir().unwrap();
    let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(300, 200, Rgba([10, 200, 10, 128])));
    let bytes = encode(&img, ImageFormat::Png);
    let (jpeg, _) = run(dir.path(), SourceImage::from_bytes(bytes, "alpha.png")).await;

    let decoded = assert_square_jpeg(&jpeg);
    assert!(!decoded.color().has_alpha());
}

#[tokio::test]
async fn from_path_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("photo.jpg");
    std::fs::write(&path, encode(&split_image(640, 480), ImageFormat::Jpeg)).unwrap();

    let scratch = tempfile::tempdir().unwrap();
    let source = SourceImage::from_path(&path, &Config::default().limits)
        .await
        .unwrap();
    let (jpeg, report) = run(scratch.path(), source).await;

    assert!(report.source.ends_with("photo.jpg"));
    assert_eq!(report.encoded_bytes, jpeg.len());
    assert_square_jpeg(&jpeg);
}

#[tokio::test]
async fn corrupt_source_is_unreadable_and_leaves_nothing_behind() {
    let dir = tempfile::tempdir().unwrap();
    let normalizer = Normalizer::new(&config_in(dir.path()));

    let mut bytes = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
    bytes.extend_from_slice(&[0u8; 32]);
    let err = normalizer
        .normalize(&SourceImage::from_bytes(bytes, "broken.png"))
        .await
        .unwrap_err();

    assert!(matches!(err, ImageError::Unreadable { .. }), "{err:?}");
    assert!(std::fs::read_dir(dir.path()).unwrap().next().is_none());
}

#[tokio::test]
async fn unwritable_scratch_dir_is_export_failure() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("gone");
    let normalizer = Normalizer::new(&config_in(&missing));

    let bytes = encode(&split_image(64, 64), ImageFormat::Png);
    let err = normalizer
        .normalize(&SourceImage::from_bytes(bytes, "ok.png"))
        .await
        .unwrap_err();

    assert!(matches!(err, ImageError::ExportFailure { .. }), "{err:?}");
}

#[tokio::test]
#[ignore = "decodes a 12000x12000 RGBA source, needs about 2 GiB of memory"]
async fn largest_allowed_rgba_source_normalizes() {
    let dir = tempfile::tempdir().unwrap();
    let side = Config::default().limits.max_image_dimension;
    let pixel = Rgba([200, 80, 20, 255]);
    let img = DynamicImage::ImageRgba8(RgbaImage::from_pixel(side, side, pixel));
    let bytes = encode(&img, ImageFormat::Png);
    drop(img);

    let (jpeg, report) = run(dir.path(), SourceImage::from_bytes(bytes, "big.png")).await;
    assert_eq!(report.crop.size, side);
    assert_square_jpeg(&jpeg);
}
