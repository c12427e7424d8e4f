//! Repository traits
//!
//! The API only talks to video storage through [`VideoRepository`], so the
//! persistence engine can be swapped without touching the upload pipeline.

use async_trait::async_trait;
use tubely_core::models::{CreateVideoParams, Video};
use tubely_core::AppError;
use uuid::Uuid;

/// Access to video records.
///
/// Errors from `get_video` are reported as lookup failures and errors from the
/// write methods as update failures (see [`tubely_core::RepositoryPhase`]).
#[async_trait]
pub trait VideoRepository: Send + Sync {
    /// Load a video by id. `Ok(None)` when no such video exists.
    async fn get_video(&self, id: Uuid) -> Result<Option<Video>, AppError>;

    /// Persist every mutable field of `video`, `updated_at` included.
    ///
    /// The owner and creation time of a stored video never change.
    async fn update_video(&self, video: &Video) -> Result<(), AppError>;

    /// Insert a new video owned by `params.user_id`.
    async fn create_video(&self, params: CreateVideoParams) -> Result<Video, AppError>;

    /// Cheap reachability check used by readiness probes.
    async fn ping(&self) -> Result<(), AppError>;
}
