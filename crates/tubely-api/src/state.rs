//! Application state shared by every handler.

use std::sync::Arc;
use tubely_core::Config;
use tubely_db::VideoRepository;
use tubely_storage::ThumbnailStore;

/// Thumbnail store plus the upload limits applied in front of it.
#[derive(Clone)]
pub struct ThumbnailConfig {
    pub store: Arc<dyn ThumbnailStore>,
    pub max_upload_size: usize,
    pub allowed_media_types: Vec<String>,
}

/// Token verification settings.
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
}

/// Main application state: aggregates sub-states for dependency injection.
#[derive(Clone)]
pub struct AppState {
    pub videos: Arc<dyn VideoRepository>,
    pub thumbnails: ThumbnailConfig,
    pub auth: AuthConfig,
}

impl AppState {
    pub fn new(
        config: &Config,
        videos: Arc<dyn VideoRepository>,
        store: Arc<dyn ThumbnailStore>,
    ) -> Self {
        Self {
            videos,
            thumbnails: ThumbnailConfig {
                store,
                max_upload_size: config.max_upload_size_bytes(),
                allowed_media_types: config.allowed_thumbnail_types().to_vec(),
            },
            auth: AuthConfig {
                jwt_secret: config.jwt_secret().to_string(),
            },
        }
    }
}
