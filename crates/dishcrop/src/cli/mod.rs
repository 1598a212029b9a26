//! Subcommand implementations.

pub mod categories;
pub mod config;
pub mod dish;
pub mod menu;
pub mod normalize;

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use dishcrop_core::{Config, EncodedPayload, NormalizeReport, Normalizer, SourceImage};

/// Pick the menu id from the flag, falling back to `api.default_menu_id`.
pub(crate) fn resolve_menu_id(flag: Option<i64>, config: &Config) -> anyhow::Result<i64> {
    flag.or(config.api.default_menu_id).ok_or_else(|| {
        anyhow::anyhow!("No menu id given. Pass --menu-id or set api.default_menu_id in the config.")
    })
}

/// Read and normalize a photo, bounded by `limits.normalize_timeout_ms`.
pub(crate) async fn normalize_file(
    path: &Path,
    config: &Config,
) -> anyhow::Result<(EncodedPayload, NormalizeReport)> {
    let source = SourceImage::from_path(path, &config.limits).await?;
    let normalizer = Normalizer::new(config);
    let timeout_ms = config.limits.normalize_timeout_ms;

    let result = tokio::time::timeout(
        Duration::from_millis(timeout_ms),
        normalizer.normalize_with_report(&source),
    )
    .await
    .with_context(|| format!("Normalizing {} timed out after {}ms", path.display(), timeout_ms))?;

    result.map_err(|e| {
        tracing::error!(stage = e.stage(), "Image processing failed: {}", e);
        anyhow::Error::new(e).context("Image processing failed. Pick another photo and try again.")
    })
}
