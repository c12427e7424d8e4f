//! Video ownership guard

use tubely_core::models::Video;
use tubely_core::AppError;
use tubely_db::VideoRepository;
use uuid::Uuid;

/// Load `video_id` and make sure `user_id` owns it.
///
/// Read-only. Fails with `VideoNotFound` when the record does not exist, with
/// `Forbidden` when it belongs to someone else, and passes repository lookup
/// errors through unchanged.
pub async fn load_owned_video(
    videos: &dyn VideoRepository,
    video_id: Uuid,
    user_id: Uuid,
) -> Result<Video, AppError> {
    let video = videos
        .get_video(video_id)
        .await?
        .ok_or(AppError::VideoNotFound(video_id))?;

    if !video.is_owned_by(user_id) {
        tracing::warn!(
            video_id = %video_id,
            owner_id = %video.user_id,
            caller_id = %user_id,
            "Rejected thumbnail change by non-owner"
        );
        return Err(AppError::Forbidden(format!(
            "user {} does not own video {}",
            user_id, video_id
        )));
    }

    Ok(video)
}
