//! Source checks before the pipeline touches the decoder.

use crate::config::LimitsConfig;
use crate::error::ImageError;

use super::source::SourceImage;

/// Validates sources against size limits and known image signatures.
#[derive(Debug, Clone)]
pub struct Validator {
    limits: LimitsConfig,
}

impl Validator {
    /// Create a new validator with the given limits.
    pub fn new(limits: LimitsConfig) -> Self {
        Self { limits }
    }

    /// Quick checks on the encoded bytes:
    /// - source is non-empty
    /// - size is within `max_file_size_mb`
    /// - header matches a decodable format
    pub fn validate(&self, source: &SourceImage) -> Result<(), ImageError> {
        if source.is_empty() {
            return Err(ImageError::unreadable(source.label(), "Source is empty"));
        }

        if source.len() as u64 > self.limits.max_file_bytes() {
            return Err(file_too_large(
                source.label(),
                source.len() as u64,
                &self.limits,
            ));
        }

        if !Self::is_valid_image_header(source.bytes()) {
            return Err(ImageError::unreadable(
                source.label(),
                "Unrecognized image format (invalid magic bytes)",
            ));
        }

        Ok(())
    }

    /// Reject sources whose inspected dimensions exceed the limit.
    pub fn check_dimensions(
        &self,
        source: &SourceImage,
        width: u32,
        height: u32,
    ) -> Result<(), ImageError> {
        if width == 0 || height == 0 {
            return Err(ImageError::unreadable(
                source.label(),
                format!("Degenerate dimensions {}x{}", width, height),
            ));
        }
        let max_dim = self.limits.max_image_dimension;
        if width > max_dim || height > max_dim {
            return Err(ImageError::unreadable(
                source.label(),
                format!("Image too large ({}x{} > {})", width, height, max_dim),
            ));
        }
        Ok(())
    }

    /// Check if the header bytes match a format the decoder is built with.
    fn is_valid_image_header(header: &[u8]) -> bool {
        match header {
            // JPEG
            [0xFF, 0xD8, 0xFF, ..] => true,
            // PNG
            [0x89, b'P', b'N', b'G', ..] => true,
            // GIF
            [b'G', b'I', b'F', b'8', ..] => true,
            // WebP: RIFF....WEBP
            [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => true,
            // BMP
            [b'B', b'M', ..] => true,
            // TIFF, little- and big-endian
            [b'I', b'I', 0x2A, 0x00, ..] | [b'M', b'M', 0x00, 0x2A, ..] => true,
            _ => false,
        }
    }
}

pub(super) fn file_too_large(label: &str, len: u64, limits: &LimitsConfig) -> ImageError {
    ImageError::unreadable(
        label,
        format!(
            "File too large ({}MB > {}MB)",
            len / (1024 * 1024),
            limits.max_file_size_mb
        ),
    )
}
