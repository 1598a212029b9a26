//! Caller-supplied source images.

use std::path::Path;
use std::sync::Arc;

use tokio::io::AsyncReadExt;

use crate::config::LimitsConfig;
use crate::error::ImageError;

use super::validate::file_too_large;

/// A picked or captured image, held in memory until the pipeline consumes it.
///
/// Cloning is cheap: the bytes are shared.
#[derive(Debug, Clone)]
pub struct SourceImage {
    bytes: Arc<[u8]>,
    label: String,
}

impl SourceImage {
    /// Wrap bytes that are already in memory.
    ///
    /// `label` names the image in logs and errors (a path, or e.g. "camera").
    pub fn from_bytes(bytes: impl Into<Vec<u8>>, label: impl Into<String>) -> Self {
        Self {
            bytes: Arc::from(bytes.into()),
            label: label.into(),
        }
    }

    /// Read an image file from disk.
    ///
    /// Files over `limits.max_file_size_mb` are rejected from their metadata,
    /// and the read itself stops one byte past the limit.
    pub async fn from_path(path: &Path, limits: &LimitsConfig) -> Result<Self, ImageError> {
        let label = path.display().to_string();
        let read_error = |e: std::io::Error| {
            ImageError::unreadable(&label, format!("Cannot read file: {}", e))
        };
        let max_bytes = limits.max_file_bytes();

        let file = tokio::fs::File::open(path).await.map_err(read_error)?;
        let size = file.metadata().await.map_err(read_error)?.len();
        if size > max_bytes {
            return Err(file_too_large(&label, size, limits));
        }

        let mut bytes = Vec::with_capacity(size as usize);
        file.take(max_bytes.saturating_add(1))
            .read_to_end(&mut bytes)
            .await
            .map_err(read_error)?;
        if bytes.len() as u64 > max_bytes {
            return Err(file_too_large(&label, bytes.len() as u64, limits));
        }
        Ok(Self::from_bytes(bytes, label))
    }

    /// Raw encoded bytes of the source.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Label used in logs and errors.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Size of the encoded source in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bytes() {
        let source = SourceImage::from_bytes(vec![1, 2, 3], "camera");
        assert_eq!(source.len(), 3);
        assert_eq!(source.label(), "camera");
        assert_eq!(source.bytes(), &[1, 2, 3]);
    }

    #[test]
    fn test_clone_shares_bytes() {
        let source = SourceImage::from_bytes(vec![0u8; 1024], "album");
        let copy = source.clone();
        assert!(std::ptr::eq(source.bytes().as_ptr(), copy.bytes().as_ptr()));
    }

    #[tokio::test]
    async fn test_from_path_missing_file_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.jpg");
        let err = SourceImage::from_path(&missing, &LimitsConfig::default()).await.unwrap_err();
        assert!(matches!(err, ImageError::Unreadable { .. }));
        assert!(err.to_string().contains("nope.jpg"));
    }

    #[tokio::test]
    async fn test_from_path_reads_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dish.bin");
        std::fs::write(&path, b"abc").unwrap();
        let source = SourceImage::from_path(&path, &LimitsConfig::default()).await.unwrap();
        assert_eq!(source.bytes(), b"abc");
        assert!(source.label().ends_with("dish.bin"));
    }

    #[tokio::test]
    async fn test_from_path_rejects_file_over_size_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("huge.jpg");
        let mut bytes = vec![0xFF, 0xD8, 0xFF];
        bytes.resize(2 * 1024 * 1024, 0);
        std::fs::write(&path, &bytes).unwrap();

        let limits = LimitsConfig {
            max_file_size_mb: 1,
            ..LimitsConfig::default()
        };
        let err = SourceImage::from_path(&path, &limits).await.unwrap_err();
        assert!(matches!(err, ImageError::Unreadable { .. }));
        assert!(err.to_string().contains("too large"));
    }

    #[tokio::test]
    async fn test_from_path_accepts_file_at_size_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("edge.jpg");
        std::fs::write(&path, vec![0u8; 1024 * 1024]).unwrap();

        let limits = LimitsConfig {
            max_file_size_mb: 1,
            ..LimitsConfig::default()
        };
        let source = SourceImage::from_path(&path, &limits).await.unwrap();
        assert_eq!(source.len(), 1024 * 1024);
    }
}
