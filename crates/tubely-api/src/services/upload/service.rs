//! Thumbnail upload service
//!
//! Runs the upload pipeline for one request: parse → authorize → store → persist.
//! Each step aborts the request on failure; nothing is rolled back.

use std::sync::Arc;

use axum::extract::Multipart;
use chrono::Utc;
use tubely_core::constants::THUMBNAIL_FIELD;
use tubely_core::models::Video;
use tubely_core::AppError;
use uuid::Uuid;

use crate::error::storage_error_to_app;
use crate::services::ownership::load_owned_video;
use crate::state::AppState;
use crate::utils::upload::{parse_thumbnail_upload, ThumbnailUpload};

/// Thumbnail upload service
///
/// Works against whichever `ThumbnailStore` the application state was built with.
pub struct ThumbnailUploadService {
    state: Arc<AppState>,
}

impl ThumbnailUploadService {
    /// Create a new ThumbnailUploadService
    pub fn new(state: &Arc<AppState>) -> Self {
        Self {
            state: state.clone(),
        }
    }

    /// Complete upload workflow for `video_id` on behalf of `user_id`.
    ///
    /// # Returns
    /// The video record with its new `thumbnail_url`, as persisted.
    pub async fn upload(
        &self,
        video_id: Uuid,
        user_id: Uuid,
        multipart: Multipart,
    ) -> Result<Video, AppError> {
        let thumbnails = &self.state.thumbnails;

        // 1. Parse and validate the form
        let upload = parse_thumbnail_upload(
            multipart,
            THUMBNAIL_FIELD,
            thumbnails.max_upload_size,
            &thumbnails.allowed_media_types,
        )
        .await?;

        self.store_for_owner(video_id, user_id, upload).await
    }

    /// Authorize, store and persist an already parsed upload.
    pub async fn store_for_owner(
        &self,
        video_id: Uuid,
        user_id: Uuid,
        upload: ThumbnailUpload,
    ) -> Result<Video, AppError> {
        // 2. Ownership is checked before anything is written
        let mut video = load_owned_video(self.state.videos.as_ref(), video_id, user_id).await?;

        // 3. Store the bytes
        let size_bytes = upload.data.len();
        let thumbnail_url = self
            .state
            .thumbnails
            .store
            .put(video_id, upload.data, &upload.media_type)
            .await
            .map_err(storage_error_to_app)?;

        // 4. Point the video at the new thumbnail and persist it
        video.thumbnail_url = Some(thumbnail_url);
        video.updated_at = Utc::now();

        if let Err(e) = self.state.videos.update_video(&video).await {
            tracing::warn!(
                video_id = %video_id,
                error = %e,
                "Thumbnail stored but video update failed; stored thumbnail left in place"
            );
            return Err(e);
        }

        tracing::info!(
            video_id = %video_id,
            user_id = %user_id,
            media_type = %upload.media_type,
            size_bytes,
            backend = %self.state.thumbnails.store.backend_type(),
            "Thumbnail uploaded"
        );

        Ok(video)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use tubely_core::models::CreateVideoParams;
    use tubely_core::{Config, ErrorMetadata, ThumbnailBackend};
    use tubely_db::{InMemoryVideoRepository, VideoRepository};
    use tubely_storage::{MemoryThumbnailStore, ThumbnailStore};

    fn test_config() -> Config {
        Config {
            server_port: 8091,
            environment: "development".to_string(),
            cors_origins: vec!["*".to_string()],
            jwt_secret: "s".repeat(32),
            database_url: None,
            db_max_connections: 1,
            db_timeout_seconds: 1,
            thumbnail_backend: ThumbnailBackend::Memory,
            assets_root: "./assets".to_string(),
            public_base_url: "http://localhost:8091".to_string(),
            max_upload_size_bytes: 1024,
            allowed_thumbnail_types: vec!["image/jpeg".to_string(), "image/png".to_string()],
        }
    }

    struct Fixture {
        service: ThumbnailUploadService,
        repo: InMemoryVideoRepository,
        store: MemoryThumbnailStore,
        video: Video,
    }

    async fn fixture() -> Fixture {
        let repo = InMemoryVideoRepository::new();
        let store = MemoryThumbnailStore::new("http://localhost:8091".to_string());
        let video = repo
            .create_video(CreateVideoParams {
                title: "title".to_string(),
                description: "description".to_string(),
                user_id: Uuid::new_v4(),
            })
            .await
            .unwrap();
        let state = Arc::new(AppState::new(
            &test_config(),
            Arc::new(repo.clone()),
            Arc::new(store.clone()),
        ));
        Fixture {
            service: ThumbnailUploadService::new(&state),
            repo,
            store,
            video,
        }
    }

    fn png(len: usize) -> ThumbnailUpload {
        ThumbnailUpload {
            data: Bytes::from(vec![7u8; len]),
            media_type: "image/png".to_string(),
        }
    }

    #[tokio::test]
    async fn owner_upload_sets_thumbnail_url() {
        let f = fixture().await;

        let video = f
            .service
            .store_for_owner(f.video.id, f.video.user_id, png(10))
            .await
            .unwrap();

        let expected = format!("http://localhost:8091/api/thumbnails/{}", f.video.id);
        assert_eq!(video.thumbnail_url.as_deref(), Some(expected.as_str()));

        let persisted = f.repo.get_video(f.video.id).await.unwrap().unwrap();
        assert_eq!(persisted.thumbnail_url, video.thumbnail_url);
        assert_eq!(f.store.get(f.video.id).await.unwrap().data.len(), 10);
    }

    #[tokio::test]
    async fn non_owner_upload_writes_nothing() {
        let f = fixture().await;

        let err = f
            .service
            .store_for_owner(f.video.id, Uuid::new_v4(), png(10))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Forbidden(_)));
        assert!(!f.store.exists(f.video.id).await.unwrap());
        let persisted = f.repo.get_video(f.video.id).await.unwrap().unwrap();
        assert!(persisted.thumbnail_url.is_none());
    }

    #[tokio::test]
    async fn update_failure_keeps_stored_thumbnail() {
        let f = fixture().await;
        f.repo.set_fail_updates(true);

        let err = f
            .service
            .store_for_owner(f.video.id, f.video.user_id, png(4))
            .await
            .unwrap_err();

        assert_eq!(err.http_status_code(), 500);
        assert!(f.store.exists(f.video.id).await.unwrap());
        f.repo.set_fail_updates(false);
        let persisted = f.repo.get_video(f.video.id).await.unwrap().unwrap();
        assert!(persisted.thumbnail_url.is_none());
    }

    #[tokio::test]
    async fn lookup_failure_is_client_error() {
        let f = fixture().await;
        f.repo.set_fail_lookups(true);

        let err = f
            .service
            .store_for_owner(f.video.id, f.video.user_id, png(4))
            .await
            .unwrap_err();

        assert_eq!(err.http_status_code(), 400);
        assert_eq!(err.error_code(), "REPOSITORY_LOOKUP_ERROR");
    }
}
