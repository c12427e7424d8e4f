//! Thumbnail store abstraction
//!
//! This module defines the ThumbnailStore trait that all store backends must implement.

use crate::ThumbnailBackend;
use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use uuid::Uuid;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("Thumbnail not found: {0}")]
    NotFound(Uuid),

    #[error("Cannot derive a file extension from media type '{0}'")]
    UnsupportedMediaType(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// A thumbnail as held by a store: the raw bytes and their declared media type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredThumbnail {
    pub data: Bytes,
    pub media_type: String,
}

/// Thumbnail store abstraction
///
/// Both backends (local filesystem, in-memory) implement this trait so the upload
/// pipeline never depends on where the bytes end up. A store holds at most one
/// thumbnail per video; `put` replaces whatever was there before.
#[async_trait]
pub trait ThumbnailStore: Send + Sync {
    /// Store the thumbnail for `video_id` and return the URL that serves it.
    ///
    /// The URL only depends on the video ID (and, for the local backend, the media
    /// type), so re-uploading yields the same URL.
    async fn put(&self, video_id: Uuid, data: Bytes, media_type: &str) -> StorageResult<String>;

    /// Fetch the current thumbnail for `video_id`.
    async fn get(&self, video_id: Uuid) -> StorageResult<StoredThumbnail>;

    /// Check whether a thumbnail is stored for `video_id`
    async fn exists(&self, video_id: Uuid) -> StorageResult<bool>;

    /// Get the store backend type
    fn backend_type(&self) -> ThumbnailBackend;
}
