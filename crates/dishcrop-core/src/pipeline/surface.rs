//! Per-invocation drawing surface and compressed artifact.
//!
//! Both are allocated by the normalizer for a single run and released on
//! drop, whichever step the run ends in.

use image::RgbImage;
use std::fs::File;
use std::path::Path;

use crate::error::ImageError;

use super::TARGET_SIZE;

/// Offscreen raster of `TARGET_SIZE × TARGET_SIZE` RGB pixels.
///
/// Pixels are only readable after a frame has been drawn and flushed.
pub struct OffscreenSurface {
    label: String,
    pixels: RgbImage,
    flushed: bool,
}

impl OffscreenSurface {
    /// Allocate a blank surface owned by one pipeline run.
    pub fn allocate(label: &str) -> Self {
        Self {
            label: label.to_string(),
            pixels: RgbImage::new(TARGET_SIZE, TARGET_SIZE),
            flushed: false,
        }
    }

    /// Side length in pixels.
    pub fn size(&self) -> u32 {
        TARGET_SIZE
    }

    /// Label of the source this surface was allocated for.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Replace the surface contents with a rendered frame.
    ///
    /// Leaves the surface unflushed.
    pub fn draw_frame(&mut self, frame: RgbImage) -> Result<(), ImageError> {
        if frame.dimensions() != (TARGET_SIZE, TARGET_SIZE) {
            return Err(ImageError::draw(
                &self.label,
                format!(
                    "Frame is {}x{}, surface is {}x{}",
                    frame.width(),
                    frame.height(),
                    TARGET_SIZE,
                    TARGET_SIZE
                ),
            ));
        }
        self.pixels = frame;
        self.flushed = false;
        Ok(())
    }

    /// Mark the last drawn frame as complete.
    pub fn flush(&mut self) {
        self.flushed = true;
    }

    pub fn is_flushed(&self) -> bool {
        self.flushed
    }

    /// Flushed pixels, or `DrawFailure` if the draw never completed.
    pub fn read_pixels(&self) -> Result<&RgbImage, ImageError> {
        if !self.flushed {
            return Err(ImageError::draw(
                &self.label,
                "Surface read before draw was flushed",
            ));
        }
        Ok(&self.pixels)
    }
}

/// Temporary compressed image file, removed when dropped.
pub struct CompressedArtifact {
    label: String,
    file: tempfile::NamedTempFile,
}

impl CompressedArtifact {
    /// Create an empty artifact inside `dir`.
    pub fn create_in(dir: &Path, label: &str) -> Result<Self, ImageError> {
        let file = tempfile::Builder::new()
            .prefix("dishcrop-")
            .suffix(".jpg")
            .tempfile_in(dir)
            .map_err(|e| {
                ImageError::export(
                    label,
                    format!("Cannot create artifact in {}: {}", dir.display(), e),
                )
            })?;
        Ok(Self {
            label: label.to_string(),
            file,
        })
    }

    /// Location of the artifact on disk.
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Label of the source this artifact was created for.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Writable handle used by the exporter.
    pub fn file_mut(&mut self) -> &mut File {
        self.file.as_file_mut()
    }
}
