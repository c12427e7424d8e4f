use crate::keys::join_url;
use crate::traits::{StorageError, StorageResult, StoredThumbnail, ThumbnailStore};
use crate::ThumbnailBackend;
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tubely_core::constants::THUMBNAILS_ROUTE;
use uuid::Uuid;

/// In-memory thumbnail store
///
/// One map per process, created at startup and shared by every request through
/// `AppState`. Contents live until the process exits. Each operation takes the
/// lock once; concurrent writes to the same video are last-write-wins.
#[derive(Clone)]
pub struct MemoryThumbnailStore {
    entries: Arc<RwLock<HashMap<Uuid, StoredThumbnail>>>,
    base_url: String,
}

impl MemoryThumbnailStore {
    /// Create an empty store
    ///
    /// # Arguments
    /// * `base_url` - Public base URL of the server (e.g., "http://localhost:8091")
    pub fn new(base_url: String) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            base_url,
        }
    }

    fn generate_url(&self, video_id: Uuid) -> String {
        join_url(&self.base_url, &format!("{}/{}", THUMBNAILS_ROUTE, video_id))
    }

    /// Number of stored thumbnails
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl ThumbnailStore for MemoryThumbnailStore {
    async fn put(&self, video_id: Uuid, data: Bytes, media_type: &str) -> StorageResult<String> {
        let size = data.len();
        let replaced = {
            let mut entries = self.entries.write().await;
            entries
                .insert(
                    video_id,
                    StoredThumbnail {
                        data,
                        media_type: media_type.to_string(),
                    },
                )
                .is_some()
        };

        tracing::info!(
            video_id = %video_id,
            size_bytes = size,
            replaced,
            "In-memory thumbnail write successful"
        );

        Ok(self.generate_url(video_id))
    }

    async fn get(&self, video_id: Uuid) -> StorageResult<StoredThumbnail> {
        self.entries
            .read()
            .await
            .get(&video_id)
            .cloned()
            .ok_or(StorageError::NotFound(video_id))
    }

    async fn exists(&self, video_id: Uuid) -> StorageResult<bool> {
        Ok(self.entries.read().await.contains_key(&video_id))
    }

    fn backend_type(&self) -> ThumbnailBackend {
        ThumbnailBackend::Memory
    }
}
