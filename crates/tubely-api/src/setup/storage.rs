//! Thumbnail store setup

use anyhow::{Context, Result};
use std::sync::Arc;
use tubely_core::Config;
use tubely_storage::{create_thumbnail_store, ThumbnailStore};

/// Create the thumbnail store selected by `THUMBNAIL_STORE`.
pub async fn setup_thumbnail_store(config: &Config) -> Result<Arc<dyn ThumbnailStore>> {
    tracing::info!("Initializing thumbnail store...");
    let store = create_thumbnail_store(config)
        .await
        .context("Failed to create thumbnail store")?;
    tracing::info!(
        backend = %store.backend_type(),
        assets_root = %config.assets_root(),
        public_base_url = %config.public_base_url(),
        "Thumbnail store initialized successfully"
    );
    Ok(store)
}
