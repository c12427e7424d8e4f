#[cfg(feature = "storage-local")]
use crate::LocalThumbnailStore;
#[cfg(feature = "storage-memory")]
use crate::MemoryThumbnailStore;
use crate::{StorageError, StorageResult, ThumbnailBackend, ThumbnailStore};
use std::sync::Arc;
use tubely_core::Config;

/// Create a thumbnail store based on configuration
pub async fn create_thumbnail_store(config: &Config) -> StorageResult<Arc<dyn ThumbnailStore>> {
    match config.thumbnail_backend() {
        #[cfg(feature = "storage-local")]
        ThumbnailBackend::Local => {
            let store = LocalThumbnailStore::new(
                config.assets_root(),
                config.public_base_url().to_string(),
                config.allowed_thumbnail_types(),
            )
            .await?;
            Ok(Arc::new(store))
        }

        #[cfg(not(feature = "storage-local"))]
        ThumbnailBackend::Local => Err(StorageError::ConfigError(
            "Local thumbnail store not available (storage-local feature not enabled)".to_string(),
        )),

        #[cfg(feature = "storage-memory")]
        ThumbnailBackend::Memory => Ok(Arc::new(MemoryThumbnailStore::new(
            config.public_base_url().to_string(),
        ))),

        #[cfg(not(feature = "storage-memory"))]
        ThumbnailBackend::Memory => Err(StorageError::ConfigError(
            "In-memory thumbnail store not available (storage-memory feature not enabled)"
                .to_string(),
        )),
    }
}
