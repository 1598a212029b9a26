//! Image normalization pipeline.
//!
//! Stages, each a separate module:
//! - **validate**: size limit and signature checks on the encoded source
//! - **geometry**: center square crop computation
//! - **surface**: per-run offscreen raster and compressed artifact
//! - **backend**: raster primitives (inspect, draw, export, read)
//! - **normalizer**: runs the stages in order, stopping at the first failure

pub mod backend;
pub mod geometry;
pub mod normalizer;
pub mod source;
pub mod surface;
pub mod validate;

// Re-exports for convenient access
pub use backend::{ImageBackend, RasterBackend};
pub use geometry::{center_crop, CropRegion};
pub use normalizer::Normalizer;
pub use source::SourceImage;
pub use surface::{CompressedArtifact, OffscreenSurface};
pub use validate::Validator;

/// Side length of every normalized image, in pixels.
pub const TARGET_SIZE: u32 = 640;

/// JPEG quality of the exported artifact (0-100).
pub const JPEG_QUALITY: u8 = 80;
