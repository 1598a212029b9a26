//! Error types for dishcrop.
//!
//! Image errors are organized by pipeline step so a failure always says
//! which step aborted the run. API errors keep the HTTP status when one
//! was received, which the retry policy relies on.

use thiserror::Error;

/// Top-level error type for dishcrop operations.
#[derive(Error, Debug)]
pub enum DishcropError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Image normalization errors
    #[error("Image error: {0}")]
    Image(#[from] ImageError),

    /// Menu API errors
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Image normalization errors, one per pipeline step.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageError {
    /// Source dimensions or content could not be determined
    #[error("Unreadable source {source_label}: {message}")]
    Unreadable {
        source_label: String,
        message: String,
    },

    /// Crop/scale render did not complete
    #[error("Draw failed for {source_label}: {message}")]
    DrawFailure {
        source_label: String,
        message: String,
    },

    /// Compressed artifact could not be exported from the surface
    #[error("Export failed for {source_label}: {message}")]
    ExportFailure {
        source_label: String,
        message: String,
    },

    /// Compressed artifact could not be read back for encoding
    #[error("Read failed for {source_label}: {message}")]
    ReadFailure {
        source_label: String,
        message: String,
    },
}

impl ImageError {
    /// Name of the pipeline step that failed, for logging.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Unreadable { .. } => "inspect",
            Self::DrawFailure { .. } => "draw",
            Self::ExportFailure { .. } => "export",
            Self::ReadFailure { .. } => "read",
        }
    }

    pub(crate) fn unreadable(source_label: &str, message: impl Into<String>) -> Self {
        Self::Unreadable {
            source_label: source_label.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn draw(source_label: &str, message: impl Into<String>) -> Self {
        Self::DrawFailure {
            source_label: source_label.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn export(source_label: &str, message: impl Into<String>) -> Self {
        Self::ExportFailure {
            source_label: source_label.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn read(source_label: &str, message: impl Into<String>) -> Self {
        Self::ReadFailure {
            source_label: source_label.to_string(),
            message: message.into(),
        }
    }
}

/// Menu API client errors.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Input rejected before any request was sent
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Transport-level failure (DNS, connect, timeout)
    #[error("Request to {endpoint} failed: {message}")]
    Request {
        endpoint: String,
        message: String,
        timed_out: bool,
        connect: bool,
    },

    /// Backend answered with a non-success status
    #[error("HTTP {status} from {endpoint}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    /// Response body could not be parsed
    #[error("Failed to parse response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },
}

/// Convenience type alias for dishcrop results.
pub type Result<T> = std::result::Result<T, DishcropError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_names() {
        assert_eq!(ImageError::unreadable("a.jpg", "x").stage(), "inspect");
        assert_eq!(ImageError::draw("a.jpg", "x").stage(), "draw");
        assert_eq!(ImageError::export("a.jpg", "x").stage(), "export");
        assert_eq!(ImageError::read("a.jpg", "x").stage(), "read");
    }

    #[test]
    fn test_image_error_display_includes_source() {
        let err = ImageError::unreadable("photos/dish.jpg", "bad header");
        let msg = err.to_string();
        assert!(msg.contains("photos/dish.jpg"));
        assert!(msg.contains("bad header"));
    }

    #[test]
    fn test_image_error_converts_to_top_level() {
        let err: DishcropError = ImageError::read("x", "gone").into();
        assert!(matches!(err, DishcropError::Image(ImageError::ReadFailure { .. })));
    }
}
