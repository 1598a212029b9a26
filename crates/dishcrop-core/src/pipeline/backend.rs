//! Raster primitives the normalizer is built on.
//!
//! `RasterBackend` is the seam between pipeline sequencing and the pixel
//! work itself. `ImageBackend` implements it with the `image` crate.

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::GenericImageView;
use std::io::{BufWriter, Cursor, Write};

use crate::config::LimitsConfig;
use crate::error::ImageError;

use super::geometry::CropRegion;
use super::source::SourceImage;
use super::surface::{CompressedArtifact, OffscreenSurface};

/// Platform capabilities consumed by the pipeline, one per step.
pub trait RasterBackend: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &str;

    /// Read pixel dimensions `(width, height)` of the source.
    fn inspect(&self, source: &SourceImage) -> Result<(u32, u32), ImageError>;

    /// Render `region` of the source scaled to fill `surface`, then flush it.
    fn draw(
        &self,
        source: &SourceImage,
        region: CropRegion,
        surface: &mut OffscreenSurface,
    ) -> Result<(), ImageError>;

    /// Encode the flushed surface as JPEG into `artifact`.
    fn export(
        &self,
        surface: &OffscreenSurface,
        quality: u8,
        artifact: &mut CompressedArtifact,
    ) -> Result<(), ImageError>;

    /// Read the artifact's bytes back.
    fn read_artifact(&self, artifact: &CompressedArtifact) -> Result<Vec<u8>, ImageError>;
}

/// `RasterBackend` on top of the `image` crate.
///
/// Decoder limits follow the configured dimension limit rather than the
/// `image` crate's fixed 512 MiB default.
#[derive(Debug, Clone, Copy)]
pub struct ImageBackend {
    max_dimension: u32,
    max_decode_bytes: u64,
}

impl ImageBackend {
    pub fn new(limits: &LimitsConfig) -> Self {
        Self {
            max_dimension: limits.max_image_dimension,
            max_decode_bytes: limits.decode_budget_bytes(),
        }
    }

    fn decode_limits(&self) -> image::Limits {
        let mut limits = image::Limits::default();
        limits.max_image_width = Some(self.max_dimension);
        limits.max_image_height = Some(self.max_dimension);
        limits.max_alloc = Some(self.max_decode_bytes);
        limits
    }
}

impl Default for ImageBackend {
    fn default() -> Self {
        Self::new(&LimitsConfig::default())
    }
}

impl RasterBackend for ImageBackend {
    fn name(&self) -> &str {
        "image"
    }

    fn inspect(&self, source: &SourceImage) -> Result<(u32, u32), ImageError> {
        // Header only; the full decode happens in draw.
        let reader = image::ImageReader::new(Cursor::new(source.bytes()))
            .with_guessed_format()
            .map_err(|e| {
                ImageError::unreadable(source.label(), format!("Cannot detect format: {}", e))
            })?;
        if reader.format().is_none() {
            return Err(ImageError::unreadable(
                source.label(),
                "Unsupported image format",
            ));
        }
        reader.into_dimensions().map_err(|e| {
            ImageError::unreadable(source.label(), format!("Cannot read dimensions: {}", e))
        })
    }

    fn draw(
        &self,
        source: &SourceImage,
        region: CropRegion,
        surface: &mut OffscreenSurface,
    ) -> Result<(), ImageError> {
        let mut reader = image::ImageReader::new(Cursor::new(source.bytes()))
            .with_guessed_format()
            .map_err(|e| ImageError::draw(source.label(), format!("Decode failed: {}", e)))?;
        reader.limits(self.decode_limits());
        let decoded = reader.decode().map_err(|e| match e {
            image::ImageError::Limits(_) => {
                ImageError::unreadable(source.label(), format!("Exceeds decode limits: {}", e))
            }
            _ => ImageError::draw(source.label(), format!("Decode failed: {}", e)),
        })?;

        let (width, height) = decoded.dimensions();
        if !region.fits_within(width, height) {
            return Err(ImageError::draw(
                source.label(),
                format!(
                    "Crop {}x{}+{}+{} outside decoded {}x{} image",
                    region.size, region.size, region.x, region.y, width, height
                ),
            ));
        }

        let frame = decoded
            .crop_imm(region.x, region.y, region.size, region.size)
            .resize_exact(surface.size(), surface.size(), FilterType::Triangle)
            .to_rgb8();

        surface.draw_frame(frame)?;
        surface.flush();
        Ok(())
    }

    fn export(
        &self,
        surface: &OffscreenSurface,
        quality: u8,
        artifact: &mut CompressedArtifact,
    ) -> Result<(), ImageError> {
        let pixels = surface.read_pixels()?;
        let label = artifact.label().to_string();

        let mut writer = BufWriter::new(artifact.file_mut());
        JpegEncoder::new_with_quality(&mut writer, quality)
            .encode_image(pixels)
            .map_err(|e| ImageError::export(&label, format!("JPEG encode failed: {}", e)))?;
        writer
            .flush()
            .map_err(|e| ImageError::export(&label, format!("Cannot write artifact: {}", e)))?;
        Ok(())
    }

    fn read_artifact(&self, artifact: &CompressedArtifact) -> Result<Vec<u8>, ImageError> {
        let bytes = std::fs::read(artifact.path()).map_err(|e| {
            ImageError::read(
                artifact.label(),
                format!("Cannot read {}: {}", artifact.path().display(), e),
            )
        })?;
        if bytes.is_empty() {
            return Err(ImageError::read(artifact.label(), "Artifact is empty"));
        }
        Ok(bytes)
    }
}
