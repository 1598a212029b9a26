//! Pipeline orchestration: inspect, crop, draw, export, encode.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;
use crate::error::ImageError;
use crate::types::{EncodedPayload, NormalizeReport};

use super::backend::{ImageBackend, RasterBackend};
use super::geometry::center_crop;
use super::source::SourceImage;
use super::surface::{CompressedArtifact, OffscreenSurface};
use super::validate::Validator;
use super::{JPEG_QUALITY, TARGET_SIZE};

/// Turns a source image into a 640×640 JPEG payload, base64-encoded.
///
/// Every run allocates its own surface and artifact, so concurrent runs on
/// clones of the same normalizer never share drawing state.
#[derive(Clone)]
pub struct Normalizer {
    backend: Arc<dyn RasterBackend>,
    validator: Validator,
    scratch_dir: PathBuf,
}

impl Normalizer {
    /// Create a normalizer backed by the `image` crate.
    pub fn new(config: &Config) -> Self {
        Self::with_backend(config, Arc::new(ImageBackend::new(&config.limits)))
    }

    /// Create a normalizer on top of a custom backend.
    pub fn with_backend(config: &Config, backend: Arc<dyn RasterBackend>) -> Self {
        Self {
            backend,
            validator: Validator::new(config.limits.clone()),
            scratch_dir: config.scratch_dir(),
        }
    }

    /// Normalize `source` without blocking the async runtime.
    pub async fn normalize(&self, source: &SourceImage) -> Result<EncodedPayload, ImageError> {
        self.normalize_with_report(source)
            .await
            .map(|(payload, _)| payload)
    }

    /// Like [`normalize`](Self::normalize), also returning what was done.
    pub async fn normalize_with_report(
        &self,
        source: &SourceImage,
    ) -> Result<(EncodedPayload, NormalizeReport), ImageError> {
        let this = self.clone();
        let owned = source.clone();
        tokio::task::spawn_blocking(move || this.run(&owned))
            .await
            .map_err(|e| ImageError::draw(source.label(), format!("Task join error: {}", e)))?
    }

    /// Synchronous variant for callers outside a runtime.
    pub fn normalize_blocking(&self, source: &SourceImage) -> Result<EncodedPayload, ImageError> {
        self.run(source).map(|(payload, _)| payload)
    }

    fn run(&self, source: &SourceImage) -> Result<(EncodedPayload, NormalizeReport), ImageError> {
        let result = self.run_steps(source);
        if let Err(e) = &result {
            tracing::warn!(
                stage = e.stage(),
                backend = self.backend.name(),
                "Normalization aborted: {}",
                e
            );
        }
        result
    }

    fn run_steps(
        &self,
        source: &SourceImage,
    ) -> Result<(EncodedPayload, NormalizeReport), ImageError> {
        let start = Instant::now();
        tracing::debug!("Normalizing: {} ({} bytes)", source.label(), source.len());

        // Inspect
        self.validator.validate(source)?;
        let (width, height) = self.backend.inspect(source)?;
        self.validator.check_dimensions(source, width, height)?;
        let region = center_crop(width, height).ok_or_else(|| {
            ImageError::unreadable(source.label(), format!("No crop for {}x{}", width, height))
        })?;
        tracing::trace!("  Inspect: {}x{} -> {:?} ({:?})", width, height, region, start.elapsed());

        // Draw
        let draw_start = Instant::now();
        let mut surface = OffscreenSurface::allocate(source.label());
        self.backend.draw(source, region, &mut surface)?;
        if !surface.is_flushed() {
            return Err(ImageError::draw(
                source.label(),
                "Backend returned before the surface was flushed",
            ));
        }
        tracing::trace!("  Draw: {:?}", draw_start.elapsed());

        // Export
        let export_start = Instant::now();
        let mut artifact = CompressedArtifact::create_in(&self.scratch_dir, source.label())?;
        self.backend.export(&surface, JPEG_QUALITY, &mut artifact)?;
        drop(surface);
        tracing::trace!("  Export: {:?}", export_start.elapsed());

        // Read + encode
        let read_start = Instant::now();
        let bytes = self.backend.read_artifact(&artifact)?;
        drop(artifact);
        let payload = EncodedPayload::encode(&bytes);
        tracing::trace!("  Encode: {:?}", read_start.elapsed());

        let elapsed = start.elapsed();
        tracing::debug!(
            "Normalized {} in {:?} ({}x{} -> {}x{}, {} bytes)",
            source.label(),
            elapsed,
            width,
            height,
            TARGET_SIZE,
            TARGET_SIZE,
            bytes.len()
        );

        let report = NormalizeReport {
            source: source.label().to_string(),
            source_width: width,
            source_height: height,
            crop: region,
            output_size: TARGET_SIZE,
            quality: JPEG_QUALITY,
            encoded_bytes: bytes.len(),
            elapsed_ms: elapsed.as_millis() as u64,
        };
        Ok((payload, report))
    }
}
