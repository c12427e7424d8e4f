use crate::keys::{
    extension_for_media_type, join_url, media_type_for_extension, thumbnail_filename,
};
use crate::traits::{StorageError, StorageResult, StoredThumbnail, ThumbnailStore};
use crate::ThumbnailBackend;
use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tubely_core::constants::ASSETS_ROUTE;
use uuid::Uuid;

/// Local filesystem thumbnail store
///
/// Thumbnails are written to `{base_path}/{video_id}.{ext}` and served by the
/// static asset route. Writes go straight to the target file; there is no
/// temp-file-and-rename, so concurrent uploads for one video may interleave.
///
/// The store only accepts the media types it was built with. Lookups probe the
/// `{video_id}.{ext}` path for each of their extensions.
#[derive(Clone)]
pub struct LocalThumbnailStore {
    base_path: PathBuf,
    base_url: String,
    extensions: Vec<String>,
}

impl LocalThumbnailStore {
    /// Create a new LocalThumbnailStore instance
    ///
    /// # Arguments
    /// * `base_path` - Assets root directory (e.g., "./assets")
    /// * `base_url` - Public base URL of the server (e.g., "http://localhost:8091")
    /// * `media_types` - Media types the store accepts (e.g., `["image/png"]`)
    pub async fn new(
        base_path: impl Into<PathBuf>,
        base_url: String,
        media_types: &[String],
    ) -> StorageResult<Self> {
        let base_path = base_path.into();

        let mut extensions: Vec<String> = Vec::with_capacity(media_types.len());
        for media_type in media_types {
            let extension = extension_for_media_type(media_type).map_err(|_| {
                StorageError::ConfigError(format!(
                    "Media type '{}' has no usable file extension",
                    media_type
                ))
            })?;
            if !extensions.contains(&extension) {
                extensions.push(extension);
            }
        }
        if extensions.is_empty() {
            return Err(StorageError::ConfigError(
                "Local thumbnail store needs at least one media type".to_string(),
            ));
        }

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create assets directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalThumbnailStore {
            base_path,
            base_url,
            extensions,
        })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Generate public URL for a thumbnail file
    fn generate_url(&self, filename: &str) -> String {
        join_url(&self.base_url, &format!("{}/{}", ASSETS_ROUTE, filename))
    }

    /// Every path a thumbnail of `video_id` may live at, one per known extension.
    fn candidates(&self, video_id: Uuid) -> impl Iterator<Item = (PathBuf, &str)> + '_ {
        self.extensions.iter().map(move |ext| {
            (
                self.base_path.join(thumbnail_filename(video_id, ext)),
                ext.as_str(),
            )
        })
    }

    /// First existing thumbnail file of `video_id` and its extension.
    async fn find(&self, video_id: Uuid) -> StorageResult<Option<(PathBuf, String)>> {
        for (path, ext) in self.candidates(video_id) {
            if fs::try_exists(&path).await? {
                return Ok(Some((path, ext.to_string())));
            }
        }
        Ok(None)
    }

    /// Remove thumbnails of `video_id` stored under another extension than `keep`.
    async fn remove_stale(&self, video_id: Uuid, keep: &Path) {
        for (path, _) in self.candidates(video_id).filter(|(p, _)| p != keep) {
            match fs::remove_file(&path).await {
                Ok(()) => tracing::debug!(path = %path.display(), "Removed stale thumbnail"),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => tracing::warn!(
                    error = %e,
                    path = %path.display(),
                    "Failed to remove stale thumbnail"
                ),
            }
        }
    }
}

#[async_trait]
impl ThumbnailStore for LocalThumbnailStore {
    async fn put(&self, video_id: Uuid, data: Bytes, media_type: &str) -> StorageResult<String> {
        let extension = extension_for_media_type(media_type)?;
        if !self.extensions.contains(&extension) {
            return Err(StorageError::UnsupportedMediaType(media_type.to_string()));
        }
        let filename = thumbnail_filename(video_id, &extension);
        let path = self.base_path.join(&filename);
        let size = data.len();

        let start = std::time::Instant::now();

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(&data).await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::WriteFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        self.remove_stale(video_id, &path).await;

        let url = self.generate_url(&filename);

        tracing::info!(
            path = %path.display(),
            video_id = %video_id,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local thumbnail write successful"
        );

        Ok(url)
    }

    async fn get(&self, video_id: Uuid) -> StorageResult<StoredThumbnail> {
        let start = std::time::Instant::now();

        let (path, extension) = self
            .find(video_id)
            .await?
            .ok_or(StorageError::NotFound(video_id))?;

        let data = fs::read(&path).await.map_err(|e| {
            StorageError::ReadFailed(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        tracing::debug!(
            path = %path.display(),
            video_id = %video_id,
            size_bytes = data.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local thumbnail read successful"
        );

        Ok(StoredThumbnail {
            data: Bytes::from(data),
            media_type: media_type_for_extension(&extension),
        })
    }

    async fn exists(&self, video_id: Uuid) -> StorageResult<bool> {
        Ok(self.find(video_id).await?.is_some())
    }

    fn backend_type(&self) -> ThumbnailBackend {
        ThumbnailBackend::Local
    }
}
