use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use tubely_core::models::Video;
use tubely_core::AppError;

use crate::auth::CallerIdentity;
use crate::error::{ErrorResponse, HttpAppError};
use crate::services::ThumbnailUploadService;
use crate::state::AppState;
use crate::utils::path::VideoIdParam;

/// Upload thumbnail handler
///
/// Replaces the thumbnail of a video owned by the caller and returns the updated
/// video record. Extractors run in order, so an invalid video ID is reported before
/// the token is checked and both come before the body is read.
///
/// # Errors
/// - `AppError::InvalidIdentifier` - Path segment is not a UUID
/// - `AppError::MissingCredential` / `AppError::InvalidCredential` - Bad or absent bearer token
/// - `AppError::MalformedRequest` - Body is not a multipart form, too large, or lacks the file
/// - `AppError::MissingContentType` / `AppError::UnsupportedMediaType` - File part type rejected
/// - `AppError::VideoNotFound` - No video with that ID
/// - `AppError::Forbidden` - Caller does not own the video
/// - `AppError::StorageWrite` - Thumbnail could not be written
/// - `AppError::Repository` - Video lookup or update failed
#[utoipa::path(
    post,
    path = "/api/thumbnail_upload/{video_id}",
    tag = "thumbnails",
    params(
        ("video_id" = String, Path, description = "Video UUID")
    ),
    request_body(content = inline(Object), content_type = "multipart/form-data", description = "Form with a 'thumbnail' file field (image/jpeg or image/png)"),
    responses(
        (status = 200, description = "Thumbnail uploaded, updated video returned", body = Video),
        (status = 400, description = "Invalid ID, malformed upload, unsupported type or unknown video", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token, or caller does not own the video", body = ErrorResponse),
        (status = 500, description = "Storage or update failure", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[tracing::instrument(
    skip_all,
    fields(
        video_id = %video_id,
        user_id = %caller.user_id,
        operation = "upload_thumbnail"
    )
)]
pub async fn upload_thumbnail(
    VideoIdParam(video_id): VideoIdParam,
    State(state): State<Arc<AppState>>,
    caller: CallerIdentity,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Video>, HttpAppError> {
    let multipart = multipart.map_err(|e| {
        AppError::MalformedRequest(format!("Unable to parse form file: {}", e.body_text()))
    })?;

    let video = ThumbnailUploadService::new(&state)
        .upload(video_id, caller.user_id, multipart)
        .await?;

    Ok(Json(video))
}
