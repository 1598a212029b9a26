//! Dishcrop Core - dish photo normalization and menu API client.
//!
//! Takes a picked or captured photo, crops the largest centered square,
//! scales it to 640×640, encodes it as JPEG and hands back base64 text
//! ready to embed in an `add-dish` request.
//!
//! # Architecture
//!
//! ```text
//! SourceImage → Inspect → Center crop → Draw 640×640 → Export JPEG → Base64
//! ```
//!
//! Every step fails fast with an [`ImageError`] naming the step. Uploading
//! is a separate concern handled by [`api::MenuClient`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use dishcrop_core::{AddDishRequest, Config, MenuClient, Normalizer, SourceImage};
//!
//! #[tokio::main]
//! async fn main() -> dishcrop_core::Result<()> {
//!     let config = Config::load()?;
//!     let source = SourceImage::from_path("./dish.jpg".as_ref(), &config.limits).await?;
//!     let payload = Normalizer::new(&config).normalize(&source).await?;
//!
//!     let client = MenuClient::new(&config.api)?;
//!     client
//!         .add_dish(&AddDishRequest::new(1, "番茄炒蛋", Some("炒菜"), payload))
//!         .await?;
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod api;
pub mod config;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod types;

// Re-exports for convenient access
pub use api::{AddDishRequest, MenuClient};
pub use config::Config;
pub use error::{ApiError, ConfigError, DishcropError, ImageError, Result};
pub use output::{OutputFormat, OutputWriter};
pub use pipeline::{CropRegion, Normalizer, SourceImage, JPEG_QUALITY, TARGET_SIZE};
pub use types::{EncodedPayload, NormalizeRecord, NormalizeReport};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
