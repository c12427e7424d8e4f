//! Tubely Storage Library
//!
//! This crate provides the thumbnail store abstraction and its two backends:
//! the local filesystem and a process-wide in-memory map.
//!
//! # Thumbnail URL format
//!
//! Each backend produces a stable URL for a stored thumbnail:
//!
//! - **Local**: `{base_url}/assets/{video_id}.{ext}` where `ext` is the media type subtype
//! - **Memory**: `{base_url}/api/thumbnails/{video_id}`
//!
//! Filenames and extensions are derived in the `keys` module so every backend agrees.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-memory")]
pub mod memory;
pub mod traits;

// Re-export commonly used types
pub use factory::create_thumbnail_store;
#[cfg(feature = "storage-local")]
pub use local::LocalThumbnailStore;
#[cfg(feature = "storage-memory")]
pub use memory::MemoryThumbnailStore;
pub use traits::{StorageError, StorageResult, StoredThumbnail, ThumbnailStore};
pub use tubely_core::ThumbnailBackend;
