//! Data produced by the normalization pipeline.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::pipeline::CropRegion;

/// Base64 text of a normalized JPEG, ready to embed in an upload request.
///
/// Only the pipeline constructs one, so the text always decodes to a
/// 640×640 JPEG. It serializes as a plain string but never deserializes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EncodedPayload(String);

impl EncodedPayload {
    pub(crate) fn encode(bytes: &[u8]) -> Self {
        Self(BASE64.encode(bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Length of the base64 text.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `data:` URL form, for clients that want one.
    pub fn data_url(&self) -> String {
        format!("data:image/jpeg;base64,{}", self.0)
    }

    /// Decode back to the JPEG bytes.
    pub fn decode_bytes(&self) -> Result<Vec<u8>, base64::DecodeError> {
        BASE64.decode(&self.0)
    }
}

impl fmt::Display for EncodedPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EncodedPayload {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Summary of one normalization run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizeReport {
    /// Source label (path or picker name)
    pub source: String,

    /// Source width in pixels
    pub source_width: u32,

    /// Source height in pixels
    pub source_height: u32,

    /// Region sampled from the source
    pub crop: CropRegion,

    /// Output side length in pixels
    pub output_size: u32,

    /// JPEG quality used
    pub quality: u8,

    /// Size of the JPEG before base64
    pub encoded_bytes: usize,

    /// Wall time of the run
    pub elapsed_ms: u64,
}

/// A report together with its payload, as printed by the CLI.
#[derive(Debug, Clone, Serialize)]
pub struct NormalizeRecord {
    #[serde(flatten)]
    pub report: NormalizeReport,

    /// Base64 JPEG
    pub image: EncodedPayload,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_round_trip() {
        let payload = EncodedPayload::encode(&[0xFF, 0xD8, 0xFF, 0xE0]);
        assert_eq!(payload.as_str(), "/9j/4A==");
        assert_eq!(payload.decode_bytes().unwrap(), vec![0xFF, 0xD8, 0xFF, 0xE0]);
    }

    #[test]
    fn test_payload_data_url() {
        let payload = EncodedPayload::encode(&[1, 2, 3]);
        assert!(payload.data_url().starts_with("data:image/jpeg;base64,"));
    }

    #[test]
    fn test_payload_serializes_as_plain_string() {
        let payload = EncodedPayload::encode(b"hi");
        let json = serde_json::to_string(&payload).unwrap();
        assert_eq!(json, "\"aGk=\"");
    }

    #[test]
    fn test_record_flattens_report() {
        let record = NormalizeRecord {
            report: NormalizeReport {
                source: "a.jpg".to_string(),
                source_width: 800,
                source_height: 1200,
                crop: CropRegion {
                    x: 0,
                    y: 200,
                    size: 800,
                },
                output_size: 640,
                quality: 80,
                encoded_bytes: 3,
                elapsed_ms: 1,
            },
            image: EncodedPayload::encode(&[1, 2, 3]),
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["source_width"], 800);
        assert_eq!(value["crop"]["y"], 200);
        assert_eq!(value["image"], "AQID");
    }
}
