//! In-memory video repository
//!
//! Used when no `DATABASE_URL` is configured and by the API integration tests.
//! Failure injection lets tests exercise the repository error paths.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tubely_core::models::{CreateVideoParams, Video};
use tubely_core::AppError;
use uuid::Uuid;

use crate::traits::VideoRepository;

#[derive(Clone, Default)]
pub struct InMemoryVideoRepository {
    videos: Arc<RwLock<HashMap<Uuid, Video>>>,
    fail_lookups: Arc<AtomicBool>,
    fail_updates: Arc<AtomicBool>,
}

impl InMemoryVideoRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a prepared record as-is.
    pub async fn insert(&self, video: Video) {
        self.videos.write().await.insert(video.id, video);
    }

    /// Make every subsequent `get_video` fail.
    pub fn set_fail_lookups(&self, fail: bool) {
        self.fail_lookups.store(fail, Ordering::SeqCst);
    }

    /// Make every subsequent write fail.
    pub fn set_fail_updates(&self, fail: bool) {
        self.fail_updates.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl VideoRepository for InMemoryVideoRepository {
    async fn get_video(&self, id: Uuid) -> Result<Option<Video>, AppError> {
        if self.fail_lookups.load(Ordering::SeqCst) {
            return Err(AppError::repository_lookup("lookup failure injected"));
        }
        Ok(self.videos.read().await.get(&id).cloned())
    }

    async fn update_video(&self, video: &Video) -> Result<(), AppError> {
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(AppError::repository_update("update failure injected"));
        }

        let mut videos = self.videos.write().await;
        let stored = videos.get_mut(&video.id).ok_or_else(|| {
            AppError::repository_update(format!("video {} no longer exists", video.id))
        })?;

        let mut updated = video.clone();
        updated.created_at = stored.created_at;
        updated.user_id = stored.user_id;
        *stored = updated;
        Ok(())
    }

    async fn create_video(&self, params: CreateVideoParams) -> Result<Video, AppError> {
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(AppError::repository_update("update failure injected"));
        }
        let video = Video::new(params);
        self.videos.write().await.insert(video.id, video.clone());
        Ok(video)
    }

    async fn ping(&self) -> Result<(), AppError> {
        if self.fail_lookups.load(Ordering::SeqCst) {
            return Err(AppError::repository_lookup("lookup failure injected"));
        }
        Ok(())
    }
}
