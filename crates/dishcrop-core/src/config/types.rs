//! Sub-configuration structs with their defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// General settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Directory for temporary compressed artifacts (system temp dir when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scratch_dir: Option<PathBuf>,
}

/// Resource limits to protect against problematic inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum source file size in megabytes
    pub max_file_size_mb: u64,

    /// Maximum source dimension (width or height)
    pub max_image_dimension: u32,

    /// Upper bound the CLI puts around one normalization run, in milliseconds.
    /// The pipeline itself never times out.
    pub normalize_timeout_ms: u64,
}

/// Widest decoded pixel the backend can produce (four `f32` channels).
const MAX_DECODED_BYTES_PER_PIXEL: u64 = 16;

impl LimitsConfig {
    /// `max_file_size_mb` in bytes.
    pub fn max_file_bytes(&self) -> u64 {
        self.max_file_size_mb.saturating_mul(1024 * 1024)
    }

    /// Decoder allocation budget: a square of `max_image_dimension` at the
    /// widest pixel format, so any source within the dimension limit decodes.
    pub fn decode_budget_bytes(&self) -> u64 {
        let side = u64::from(self.max_image_dimension);
        side.saturating_mul(side).saturating_mul(MAX_DECODED_BYTES_PER_PIXEL)
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_file_size_mb: 50,
            max_image_dimension: 12000,
            normalize_timeout_ms: 15000,
        }
    }
}

/// Menu API client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Backend root, without trailing slash
    pub base_url: String,

    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,

    /// Extra attempts for transient failures (429, 5xx, timeouts)
    pub retry_attempts: u32,

    /// Base delay between retries in milliseconds
    pub retry_delay_ms: u64,

    /// Menu used when a command is given no explicit id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_menu_id: Option<i64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://func.fs1n.site".to_string(),
            timeout_ms: 10000,
            retry_attempts: 2,
            retry_delay_ms: 500,
            default_menu_id: None,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_file_bytes_saturates() {
        assert_eq!(LimitsConfig::default().max_file_bytes(), 50 * 1024 * 1024);
        let limits = LimitsConfig {
            max_file_size_mb: u64::MAX,
            ..LimitsConfig::default()
        };
        assert_eq!(limits.max_file_bytes(), u64::MAX);
    }

    #[test]
    fn test_decode_budget_covers_largest_allowed_source() {
        let limits = LimitsConfig::default();
        // 12000x12000 RGBA at 16 bits per channel
        assert!(limits.decode_budget_bytes() >= 12000 * 12000 * 8);
        // Above the image crate's 512 MiB default
        assert!(limits.decode_budget_bytes() > 512 * 1024 * 1024);
    }
}
